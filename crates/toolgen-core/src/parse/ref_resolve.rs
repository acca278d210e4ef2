use std::collections::HashSet;

use super::components::Components;
use super::operation::PathItem;
use super::parameter::{Parameter, ParameterOrRef};
use super::request_body::{RequestBody, RequestBodyOrRef};
use super::schema::{Schema, SchemaOrRef};
use super::spec::OpenApiSpec;
use crate::error::ResolveError;
use crate::ir::HttpMethod;

/// Resolves the `$ref` pointers tool generation reads (parameters, parameter
/// schemas and request bodies), producing a spec where those are all inline.
pub struct RefResolver<'a> {
    components: Option<&'a Components>,
    visited: HashSet<String>,
}

impl<'a> RefResolver<'a> {
    pub fn new(spec: &'a OpenApiSpec) -> Self {
        Self {
            components: spec.components.as_ref(),
            visited: HashSet::new(),
        }
    }

    /// Resolve the document, returning a copy with no `$ref` in any parameter,
    /// parameter schema or request body.
    pub fn resolve_spec(&mut self, spec: &OpenApiSpec) -> Result<OpenApiSpec, ResolveError> {
        let mut resolved = spec.clone();
        for item in resolved.paths.values_mut() {
            self.resolve_path_item(item)?;
        }
        Ok(resolved)
    }

    fn resolve_path_item(&mut self, item: &mut PathItem) -> Result<(), ResolveError> {
        item.parameters = self.resolve_parameters(&item.parameters)?;

        for method in HttpMethod::ALL {
            let Some(op) = item.operation_mut(method) else {
                continue;
            };
            op.parameters = self.resolve_parameters(&op.parameters)?;
            if let Some(ref body) = op.request_body {
                let resolved = self.resolve_request_body_or_ref(body)?;
                op.request_body = Some(RequestBodyOrRef::RequestBody(resolved));
            }
        }
        Ok(())
    }

    fn resolve_parameters(
        &mut self,
        params: &[ParameterOrRef],
    ) -> Result<Vec<ParameterOrRef>, ResolveError> {
        params
            .iter()
            .map(|p| {
                self.resolve_parameter_or_ref(p)
                    .map(ParameterOrRef::Parameter)
            })
            .collect()
    }

    fn resolve_parameter_or_ref(
        &mut self,
        param: &ParameterOrRef,
    ) -> Result<Parameter, ResolveError> {
        let mut resolved = match param {
            ParameterOrRef::Ref { ref_path } => self.lookup_parameter(ref_path)?,
            ParameterOrRef::Parameter(p) => p.clone(),
        };
        if let Some(ref schema) = resolved.schema {
            resolved.schema = Some(SchemaOrRef::Schema(Box::new(
                self.resolve_schema_or_ref(schema)?,
            )));
        }
        Ok(resolved)
    }

    /// Resolve a schema reference chain down to an inline schema.
    pub fn resolve_schema_or_ref(
        &mut self,
        schema_or_ref: &SchemaOrRef,
    ) -> Result<Schema, ResolveError> {
        match schema_or_ref {
            SchemaOrRef::Schema(schema) => Ok(schema.as_ref().clone()),
            SchemaOrRef::Ref { ref_path } => {
                if !self.visited.insert(ref_path.clone()) {
                    return Err(ResolveError::CircularRef(ref_path.clone()));
                }
                let name = parse_ref_name(ref_path, "schemas")?;
                let target = self
                    .components
                    .and_then(|c| c.schema(name))
                    .ok_or_else(|| ResolveError::RefTargetNotFound(ref_path.clone()))?;
                let result = self.resolve_schema_or_ref(target);
                self.visited.remove(ref_path);
                result
            }
        }
    }

    fn resolve_request_body_or_ref(
        &mut self,
        body: &RequestBodyOrRef,
    ) -> Result<RequestBody, ResolveError> {
        match body {
            RequestBodyOrRef::RequestBody(rb) => Ok(rb.clone()),
            RequestBodyOrRef::Ref { ref_path } => {
                if !self.visited.insert(ref_path.clone()) {
                    return Err(ResolveError::CircularRef(ref_path.clone()));
                }
                let name = parse_ref_name(ref_path, "requestBodies")?;
                let target = self
                    .components
                    .and_then(|c| c.request_body(name))
                    .ok_or_else(|| ResolveError::RefTargetNotFound(ref_path.clone()))?;
                let result = self.resolve_request_body_or_ref(target);
                self.visited.remove(ref_path);
                result
            }
        }
    }

    fn lookup_parameter(&mut self, ref_path: &str) -> Result<Parameter, ResolveError> {
        if !self.visited.insert(ref_path.to_string()) {
            return Err(ResolveError::CircularRef(ref_path.to_string()));
        }
        let name = parse_ref_name(ref_path, "parameters")?;
        let target = self
            .components
            .and_then(|c| c.parameter(name))
            .ok_or_else(|| ResolveError::RefTargetNotFound(ref_path.to_string()))?;
        let result = match target {
            ParameterOrRef::Parameter(param) => Ok(param.clone()),
            ParameterOrRef::Ref { ref_path: inner } => self.lookup_parameter(inner),
        };
        self.visited.remove(ref_path);
        result
    }
}

/// Parse a `$ref` path like `#/components/schemas/Foo` and extract the name.
fn parse_ref_name<'a>(ref_path: &'a str, expected_section: &str) -> Result<&'a str, ResolveError> {
    let stripped = ref_path
        .strip_prefix("#/components/")
        .ok_or_else(|| ResolveError::InvalidRefFormat(ref_path.to_string()))?;
    let (section, name) = stripped
        .split_once('/')
        .ok_or_else(|| ResolveError::InvalidRefFormat(ref_path.to_string()))?;
    if section != expected_section {
        return Err(ResolveError::InvalidRefFormat(format!(
            "expected section '{}', got '{}' in {}",
            expected_section, section, ref_path
        )));
    }
    Ok(name)
}
