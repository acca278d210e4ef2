//! Reads an API description from a local file or an HTTP(S) URL.

use std::fs;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use log::debug;
use toolgen_core::parse::{self, spec::OpenApiSpec};

const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Document format, when it can be told without parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Json,
    Yaml,
    Unknown,
}

pub fn is_url(source: &str) -> bool {
    source.starts_with("http://") || source.starts_with("https://")
}

/// Format from a file name or URL path, ignoring any query string.
pub fn format_from_name(name: &str) -> SourceFormat {
    let name = name.split(['?', '#']).next().unwrap_or(name).to_ascii_lowercase();
    if name.ends_with(".json") {
        SourceFormat::Json
    } else if name.ends_with(".yaml") || name.ends_with(".yml") {
        SourceFormat::Yaml
    } else {
        SourceFormat::Unknown
    }
}

/// Final path segment of `source`, without query string or fragment.
pub fn source_name(source: &str) -> String {
    let path = if is_url(source) {
        source.split(['?', '#']).next().unwrap_or(source)
    } else {
        source
    };
    path.trim_end_matches(['/', '\\'])
        .rsplit(['/', '\\'])
        .next()
        .filter(|name| !name.is_empty())
        .unwrap_or(path)
        .to_string()
}

pub fn format_from_content_type(content_type: &str) -> SourceFormat {
    let content_type = content_type.to_ascii_lowercase();
    if content_type.contains("json") {
        SourceFormat::Json
    } else if content_type.contains("yaml") {
        SourceFormat::Yaml
    } else {
        SourceFormat::Unknown
    }
}

/// Parse with the known format, or sniff the content when unknown.
pub fn parse_content(content: &str, format: SourceFormat) -> Result<OpenApiSpec> {
    let spec = match format {
        SourceFormat::Json => parse::from_json(content)?,
        SourceFormat::Yaml => parse::from_yaml(content)?,
        SourceFormat::Unknown => parse::from_str(content)?,
    };
    Ok(spec)
}

/// Load and parse the document at `source`, a path or an http(s) URL.
pub fn load_spec(source: &str) -> Result<OpenApiSpec> {
    let (content, format) = if is_url(source) {
        fetch(source)?
    } else {
        let content =
            fs::read_to_string(source).with_context(|| format!("failed to read {source}"))?;
        (content, format_from_name(source))
    };
    debug!("loaded {} bytes from {source} as {format:?}", content.len());
    parse_content(&content, format).with_context(|| format!("failed to parse {source}"))
}

fn fetch(url: &str) -> Result<(String, SourceFormat)> {
    let client = reqwest::blocking::Client::builder()
        .timeout(FETCH_TIMEOUT)
        .user_agent(concat!("toolgen/", env!("CARGO_PKG_VERSION")))
        .build()
        .context("failed to create HTTP client")?;

    let response = client
        .get(url)
        .send()
        .with_context(|| format!("failed to fetch {url}"))?;
    let status = response.status();
    if !status.is_success() {
        bail!("HTTP {status} when fetching {url}");
    }

    let content_type = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();
    let content = response
        .text()
        .with_context(|| format!("failed to read response body from {url}"))?;

    let format = match format_from_name(url) {
        SourceFormat::Unknown => format_from_content_type(&content_type),
        known => known,
    };
    Ok((content, format))
}
