use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A server variable for URL templates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerVariable {
    pub default: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(rename = "enum", default, skip_serializing_if = "Vec::is_empty")]
    pub enum_values: Vec<String>,
}

/// A server URL definition. `url` is optional here so that sloppy documents
/// with `servers: [{description: ...}]` still parse.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Server {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub variables: IndexMap<String, ServerVariable>,
}

impl Server {
    /// The URL with every `{name}` placeholder that has a declared variable
    /// replaced by the variable's default. Unknown placeholders are left as-is.
    pub fn expanded_url(&self) -> Option<String> {
        let url = self.url.as_deref()?;
        let expanded = self
            .variables
            .iter()
            .fold(url.to_string(), |acc, (name, var)| {
                acc.replace(&format!("{{{name}}}"), &var.default)
            });
        Some(expanded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expanded_url_substitutes_defaults() {
        let server: Server = serde_yaml_ng::from_str(
            r#"
url: https://{region}.example.com/{version}
variables:
  region:
    default: eu
    enum: [eu, us]
  version:
    default: v2
"#,
        )
        .unwrap();
        assert_eq!(
            server.expanded_url().as_deref(),
            Some("https://eu.example.com/v2")
        );
    }

    #[test]
    fn test_expanded_url_keeps_unknown_placeholders() {
        let server = Server {
            url: Some("https://{tenant}.example.com".to_string()),
            ..Server::default()
        };
        assert_eq!(
            server.expanded_url().as_deref(),
            Some("https://{tenant}.example.com")
        );
    }

    #[test]
    fn test_missing_url() {
        let server: Server = serde_yaml_ng::from_str("description: nothing here").unwrap();
        assert_eq!(server.expanded_url(), None);
    }
}
