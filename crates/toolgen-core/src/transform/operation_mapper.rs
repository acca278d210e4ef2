//! Turns one raw operation into a [`ToolSpec`]. Mapping never fails: every
//! missing field degrades to a documented fallback.

use log::debug;

use crate::ir::{
    HttpMethod, ParamLocation, ParamType, ParameterSpec, RequestBodySpec, ToolSpec,
};
use crate::parse::operation::{Operation, PathItem};
use crate::parse::parameter::{Parameter, ParameterLocation, ParameterOrRef};
use crate::parse::request_body::RequestBodyOrRef;
use crate::parse::schema::{Schema, SchemaType};

use super::name_normalizer::route_to_name;
use super::spec_model::RawOperation;

/// Name of the synthetic argument carrying the raw request body.
pub const REQUEST_BODY_PARAM: &str = "requestBody";

const DEFAULT_CONTENT_TYPE: &str = "application/json";

/// Map one operation to a tool.
pub fn map_operation(raw: &RawOperation<'_>) -> ToolSpec {
    let op = raw.operation;
    let name = tool_name(raw.method, raw.path, op);
    let description = tool_description(raw.method, raw.path, op);

    let mut parameters: Vec<ParameterSpec> = merged_parameters(raw.path_item, op)
        .into_iter()
        .map(map_parameter)
        .collect();

    let request_body = if raw.method.accepts_body() {
        map_request_body(op, &name).map(|(param, body)| {
            parameters.push(param);
            body
        })
    } else {
        None
    };

    debug!(
        "mapped {} {} to tool {name} with {} argument(s)",
        raw.method,
        raw.path,
        parameters.len()
    );

    ToolSpec {
        name,
        description,
        method: raw.method,
        path: raw.path.to_string(),
        parameters,
        request_body,
    }
}

fn non_blank(value: Option<&String>) -> Option<&str> {
    value.map(String::as_str).filter(|s| !s.trim().is_empty())
}

fn tool_name(method: HttpMethod, path: &str, op: &Operation) -> String {
    non_blank(op.operation_id.as_ref())
        .map(str::to_string)
        .unwrap_or_else(|| route_to_name(method, path))
}

fn tool_description(method: HttpMethod, path: &str, op: &Operation) -> String {
    non_blank(op.summary.as_ref())
        .or_else(|| non_blank(op.description.as_ref()))
        .map(str::to_string)
        .unwrap_or_else(|| format!("Call {} {}", method.as_str().to_uppercase(), path))
}

/// Path-level parameters followed by the operation's own. An operation
/// parameter with the same name and location replaces the path-level one in
/// place. Unresolved references are skipped.
fn merged_parameters<'a>(item: &'a PathItem, op: &'a Operation) -> Vec<&'a Parameter> {
    let inline = |p: &'a ParameterOrRef| {
        let param = p.as_parameter();
        if param.is_none() {
            debug!("skipping unresolved parameter reference");
        }
        param
    };

    let mut merged: Vec<&Parameter> = item.parameters.iter().filter_map(inline).collect();
    for param in op.parameters.iter().filter_map(inline) {
        match merged.iter_mut().find(|p| p.same_slot(param)) {
            Some(slot) => *slot = param,
            None => merged.push(param),
        }
    }
    merged
}

fn map_parameter(param: &Parameter) -> ParameterSpec {
    let schema = param.inline_schema();
    ParameterSpec {
        name: param.name.clone(),
        description: parameter_description(param, schema),
        param_type: map_schema_type(schema),
        location: match param.location {
            ParameterLocation::Path => ParamLocation::Path,
            ParameterLocation::Query => ParamLocation::Query,
            ParameterLocation::Header => ParamLocation::Header,
            ParameterLocation::Cookie => ParamLocation::Cookie,
        },
        required: param.is_required(),
    }
}

/// The parameter's description (or its name), followed by the allowed values
/// and the default when the schema declares them.
fn parameter_description(param: &Parameter, schema: Option<&Schema>) -> String {
    let mut description = non_blank(param.description.as_ref())
        .unwrap_or(param.name.as_str())
        .to_string();

    if let Some(schema) = schema {
        if !schema.enum_values.is_empty() {
            let values: Vec<String> = schema.enum_values.iter().map(value_text).collect();
            description.push_str(&format!(" Valid values: [{}]", values.join(", ")));
        }
        if let Some(default) = schema.default_value.as_ref() {
            description.push_str(&format!(" Default: {}", value_text(default)));
        }
    }
    description
}

/// Plain text for a JSON value: strings without quotes, everything else as JSON.
fn value_text(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Scalar type mapping. Arrays, objects, unknown types and missing schemas
/// all become strings.
pub fn map_schema_type(schema: Option<&Schema>) -> ParamType {
    match schema
        .and_then(|s| s.schema_type.as_ref())
        .and_then(|t| t.primary())
    {
        Some(SchemaType::Integer) => ParamType::Int,
        Some(SchemaType::Number) => ParamType::Double,
        Some(SchemaType::Boolean) => ParamType::Boolean,
        _ => ParamType::String,
    }
}

fn map_request_body(op: &Operation, tool_name: &str) -> Option<(ParameterSpec, RequestBodySpec)> {
    let body = match op.request_body.as_ref()? {
        RequestBodyOrRef::RequestBody(body) => body,
        RequestBodyOrRef::Ref { ref_path } => {
            debug!("skipping unresolved request body reference {ref_path}");
            return None;
        }
    };

    let content_type = body
        .first_content_type()
        .unwrap_or(DEFAULT_CONTENT_TYPE)
        .to_string();

    let description = non_blank(body.description.as_ref())
        .map(str::to_string)
        .unwrap_or_else(|| format!("Request body for {tool_name}"));

    Some((
        ParameterSpec {
            name: REQUEST_BODY_PARAM.to_string(),
            description,
            param_type: ParamType::String,
            location: ParamLocation::Body,
            required: body.required,
        },
        RequestBodySpec { content_type },
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse;
    use crate::parse::spec::OpenApiSpec;
    use crate::transform::spec_model::SpecModel;

    fn tools(yaml: &str) -> Vec<ToolSpec> {
        let spec: OpenApiSpec = parse::from_yaml(yaml).unwrap();
        SpecModel::new(&spec)
            .operations()
            .map(|raw| map_operation(&raw))
            .collect()
    }

    #[test]
    fn test_fallback_name_and_description() {
        let tools = tools(
            r#"
openapi: 3.0.0
info: {title: T, version: "1"}
paths:
  /users/{id}:
    get: {}
"#,
        );
        assert_eq!(tools[0].name, "get_users__id_");
        assert_eq!(tools[0].description, "Call GET /users/{id}");
    }

    #[test]
    fn test_description_prefers_summary_then_description() {
        let tools = tools(
            r#"
openapi: 3.0.0
info: {title: T, version: "1"}
paths:
  /a:
    get:
      operationId: getA
      summary: Short
      description: Long
    post:
      summary: ""
      description: Only description
"#,
        );
        assert_eq!(tools[0].name, "getA");
        assert_eq!(tools[0].description, "Short");
        assert_eq!(tools[1].name, "post_a");
        assert_eq!(tools[1].description, "Only description");
    }

    #[test]
    fn test_parameter_description_enum_and_default() {
        let tools = tools(
            r#"
openapi: 3.0.0
info: {title: T, version: "1"}
paths:
  /a:
    get:
      parameters:
        - name: unit
          in: query
          schema:
            type: string
            enum: [a, b]
            default: a
        - name: limit
          in: query
          description: Max rows
          schema:
            type: integer
            default: 10
"#,
        );
        let params = &tools[0].parameters;
        assert_eq!(params[0].description, "unit Valid values: [a, b] Default: a");
        assert_eq!(params[1].description, "Max rows Default: 10");
        assert_eq!(params[1].param_type, ParamType::Int);
    }

    #[test]
    fn test_type_mapping() {
        let schema = |yaml: &str| -> Schema { serde_yaml_ng::from_str(yaml).unwrap() };
        assert_eq!(map_schema_type(Some(&schema("type: integer"))), ParamType::Int);
        assert_eq!(map_schema_type(Some(&schema("type: number"))), ParamType::Double);
        assert_eq!(map_schema_type(Some(&schema("type: boolean"))), ParamType::Boolean);
        assert_eq!(map_schema_type(Some(&schema("type: string"))), ParamType::String);
        assert_eq!(map_schema_type(Some(&schema("type: array"))), ParamType::String);
        assert_eq!(map_schema_type(Some(&schema("type: object"))), ParamType::String);
        assert_eq!(
            map_schema_type(Some(&schema("type: [integer, 'null']"))),
            ParamType::Int
        );
        assert_eq!(map_schema_type(Some(&schema("{}"))), ParamType::String);
        assert_eq!(map_schema_type(None), ParamType::String);
    }

    #[test]
    fn test_request_body_only_for_post_put_patch() {
        let tools = tools(
            r#"
openapi: 3.0.0
info: {title: T, version: "1"}
paths:
  /a:
    get:
      requestBody:
        content:
          application/json: {}
    delete:
      requestBody:
        content:
          application/json: {}
    put:
      requestBody:
        content:
          text/plain: {}
          application/json: {}
    patch:
      requestBody:
        description: Patch document
        content: {}
"#,
        );
        let get = &tools[0];
        let put = &tools[1];
        let delete = &tools[2];
        let patch = &tools[3];

        assert!(get.request_body.is_none());
        assert!(get.body_parameter().is_none());
        assert!(delete.request_body.is_none());

        assert_eq!(put.request_body.as_ref().unwrap().content_type, "text/plain");
        let body = put.body_parameter().unwrap();
        assert_eq!(body.name, REQUEST_BODY_PARAM);
        assert_eq!(body.param_type, ParamType::String);
        assert_eq!(body.description, "Request body for put_a");

        assert_eq!(
            patch.request_body.as_ref().unwrap().content_type,
            "application/json"
        );
        assert_eq!(patch.body_parameter().unwrap().description, "Patch document");
    }

    #[test]
    fn test_body_parameter_is_last() {
        let tools = tools(
            r#"
openapi: 3.0.0
info: {title: T, version: "1"}
paths:
  /items/{id}:
    post:
      parameters:
        - {name: id, in: path, required: true, schema: {type: integer}}
        - {name: dryRun, in: query, schema: {type: boolean}}
      requestBody:
        content:
          application/json: {}
"#,
        );
        let names: Vec<&str> = tools[0].parameters.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["id", "dryRun", "requestBody"]);
        assert_eq!(tools[0].parameters[2].location, ParamLocation::Body);
    }

    #[test]
    fn test_path_level_parameters_merge() {
        let tools = tools(
            r#"
openapi: 3.0.0
info: {title: T, version: "1"}
paths:
  /orgs/{org}/repos:
    parameters:
      - {name: org, in: path, required: true, description: Org slug}
      - {name: page, in: query, description: Page from path}
    get:
      parameters:
        - {name: page, in: query, description: Page from operation, schema: {type: integer}}
        - {name: sort, in: query}
"#,
        );
        let params = &tools[0].parameters;
        let names: Vec<&str> = params.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["org", "page", "sort"]);
        assert_eq!(params[1].description, "Page from operation");
        assert_eq!(params[1].param_type, ParamType::Int);
        assert_eq!(params[2].description, "sort");
        assert!(params[0].required);
    }
}
