use thiserror::Error;

/// The document could not be read as OpenAPI 3.x.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("invalid YAML: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unsupported OpenAPI version {0} (expected 3.x)")]
    UnsupportedVersion(String),
}

/// A `$ref` used by a parameter, parameter schema or request body could not
/// be followed. Always fatal.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("$ref cycle through {0}")]
    CircularRef(String),

    #[error("malformed $ref {0}")]
    InvalidRefFormat(String),

    #[error("$ref target {0} does not exist")]
    RefTargetNotFound(String),
}

#[derive(Debug, Error)]
pub enum TransformError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Resolve(#[from] ResolveError),

    /// Only raised under [`crate::config::DuplicatePolicy::Fail`].
    #[error("tool name '{name}' is used more than once (again by {method} {path})")]
    DuplicateToolName {
        name: String,
        method: String,
        path: String,
    },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("invalid config in {path}: {source}")]
    Parse {
        path: String,
        source: serde_yaml_ng::Error,
    },
}
