use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::ConfigError;

/// Base URL used when a document declares no usable server anywhere.
pub const DEFAULT_FALLBACK_URL: &str = "https://api.open-meteo.com";

/// Default config file name.
pub const CONFIG_FILE_NAME: &str = ".toolgen.yaml";

/// Project configuration loaded from `.toolgen.yaml`. Command-line flags take
/// precedence over every field.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ToolgenConfig {
    pub output_dir: String,
    pub servers: ServerConfig,
    pub duplicate_names: DuplicatePolicy,
}

impl Default for ToolgenConfig {
    fn default() -> Self {
        Self {
            output_dir: ".".to_string(),
            servers: ServerConfig::default(),
            duplicate_names: DuplicatePolicy::Suffix,
        }
    }
}

/// Base URL selection.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// 0-based index into the discovered server list.
    pub index: Option<usize>,
    /// Absolute URL; wins over `index`.
    pub url: Option<String>,
    pub fallback_url: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            index: None,
            url: None,
            fallback_url: DEFAULT_FALLBACK_URL.to_string(),
        }
    }
}

/// What to do when two operations resolve to the same tool name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// Rename later duplicates to `name_2`, `name_3`, ... and warn.
    #[default]
    Suffix,
    /// Abort generation.
    Fail,
}

/// Load config from a YAML file. Returns `None` if the file doesn't exist.
pub fn load_config(path: &Path) -> Result<Option<ToolgenConfig>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.display().to_string(),
        source,
    })?;
    let config = serde_yaml_ng::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.display().to_string(),
        source,
    })?;
    Ok(Some(config))
}

/// Generate the default config file content.
pub fn default_config_content() -> &'static str {
    r#"# toolgen configuration
output_dir: .

servers:
  # index: 0                          # pick a discovered server by position
  # url: https://api.example.com      # or force a base URL (wins over index)
  fallback_url: https://api.open-meteo.com

duplicate_names: suffix   # suffix | fail
"#
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ToolgenConfig::default();
        assert_eq!(config.output_dir, ".");
        assert_eq!(config.servers.index, None);
        assert_eq!(config.servers.url, None);
        assert_eq!(config.servers.fallback_url, DEFAULT_FALLBACK_URL);
        assert_eq!(config.duplicate_names, DuplicatePolicy::Suffix);
    }

    #[test]
    fn test_parse_config_yaml() {
        let yaml = r#"
output_dir: generated
servers:
  index: 1
  url: https://api.example.com
  fallback_url: https://fallback.example.com
duplicate_names: fail
"#;
        let config: ToolgenConfig = serde_yaml_ng::from_str(yaml).unwrap();
        assert_eq!(config.output_dir, "generated");
        assert_eq!(config.servers.index, Some(1));
        assert_eq!(
            config.servers.url,
            Some("https://api.example.com".to_string())
        );
        assert_eq!(config.servers.fallback_url, "https://fallback.example.com");
        assert_eq!(config.duplicate_names, DuplicatePolicy::Fail);
    }

    #[test]
    fn test_parse_minimal_config() {
        let yaml = "servers:\n  index: 2\n";
        let config: ToolgenConfig = serde_yaml_ng::from_str(yaml).unwrap();
        assert_eq!(config.servers.index, Some(2));
        // Defaults applied
        assert_eq!(config.output_dir, ".");
        assert_eq!(config.servers.fallback_url, DEFAULT_FALLBACK_URL);
    }

    #[test]
    fn test_default_content_parses() {
        let config: ToolgenConfig = serde_yaml_ng::from_str(default_config_content()).unwrap();
        assert_eq!(config.servers.fallback_url, DEFAULT_FALLBACK_URL);
        assert_eq!(config.duplicate_names, DuplicatePolicy::Suffix);
    }

    #[test]
    fn test_missing_file_is_none() {
        let loaded = load_config(Path::new("/definitely/not/here/.toolgen.yaml")).unwrap();
        assert!(loaded.is_none());
    }
}
