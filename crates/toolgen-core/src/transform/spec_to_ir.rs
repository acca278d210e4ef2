use log::debug;

use crate::config::{DEFAULT_FALLBACK_URL, DuplicatePolicy, ToolgenConfig};
use crate::error::TransformError;
use crate::ir::{ApiInfo, ToolModel, ToolSpec};
use crate::parse::ref_resolve::RefResolver;
use crate::parse::spec::OpenApiSpec;

use super::name_normalizer::dedupe_tool_names;
use super::operation_mapper::map_operation;
use super::server_resolver::{ServerOverride, resolve_servers};
use super::spec_model::SpecModel;

/// Options controlling server selection and tool naming.
#[derive(Debug, Clone)]
pub struct TransformOptions {
    pub servers: ServerOverride,
    pub fallback_url: String,
    pub duplicate_names: DuplicatePolicy,
}

impl Default for TransformOptions {
    fn default() -> Self {
        Self {
            servers: ServerOverride::default(),
            fallback_url: DEFAULT_FALLBACK_URL.to_string(),
            duplicate_names: DuplicatePolicy::default(),
        }
    }
}

impl TransformOptions {
    /// Options taken from a config file, before command-line overrides.
    pub fn from_config(config: &ToolgenConfig) -> Self {
        Self {
            servers: ServerOverride {
                index: config.servers.index,
                url: config.servers.url.clone(),
            },
            fallback_url: config.servers.fallback_url.clone(),
            duplicate_names: config.duplicate_names,
        }
    }
}

/// Transform a parsed OpenAPI spec into the tool model.
pub fn transform(spec: &OpenApiSpec) -> Result<ToolModel, TransformError> {
    transform_with_options(spec, &TransformOptions::default())
}

/// Transform with explicit server and naming options.
pub fn transform_with_options(
    spec: &OpenApiSpec,
    options: &TransformOptions,
) -> Result<ToolModel, TransformError> {
    // Phase 1: Resolve $ref pointers in parameters and request bodies
    let mut resolver = RefResolver::new(spec);
    let resolved = resolver.resolve_spec(spec)?;
    let model = SpecModel::new(&resolved);

    // Phase 2: Discover servers and choose the base URL
    let (servers, mut advisories) =
        resolve_servers(&model, &options.servers, &options.fallback_url);
    debug!(
        "base url {} from {} candidate(s)",
        servers.base_url,
        servers.candidates.len()
    );

    // Phase 3: One tool per operation
    let mut tools: Vec<ToolSpec> = model.operations().map(|raw| map_operation(&raw)).collect();

    // Phase 4: Unique tool names
    advisories.extend(dedupe_tool_names(&mut tools, options.duplicate_names)?);

    for advisory in &advisories {
        debug!("advisory: {advisory}");
    }

    let info = model.info();
    Ok(ToolModel {
        info: ApiInfo {
            title: info.title.clone(),
            version: info.version.clone(),
        },
        servers,
        tools,
        advisories,
    })
}
