use serde::Serialize;

use super::advisory::Advisory;
use super::tool::ToolSpec;

/// Environment variable the generated server reads to override its base URL.
pub const SERVER_URL_ENV: &str = "SERVER_URL";

/// Environment variable the generated server reads to pick a declared server.
pub const SERVER_INDEX_ENV: &str = "SERVER_INDEX";

/// Everything a renderer needs for one generation run.
#[derive(Debug, Clone, Serialize)]
pub struct ToolModel {
    pub info: ApiInfo,
    pub servers: ServerSelection,
    pub tools: Vec<ToolSpec>,
    /// Non-fatal findings, in the order they were made.
    pub advisories: Vec<Advisory>,
}

/// API metadata.
#[derive(Debug, Clone, Serialize)]
pub struct ApiInfo {
    pub title: String,
    pub version: String,
}

/// The candidate server list and the base URL chosen from it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServerSelection {
    /// Every usable server URL discovered, or the fallback URL alone.
    pub candidates: Vec<String>,
    /// Never empty.
    pub base_url: String,
}
