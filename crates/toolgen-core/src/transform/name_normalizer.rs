use std::collections::HashSet;

use log::debug;

use crate::config::DuplicatePolicy;
use crate::error::TransformError;
use crate::ir::{Advisory, HttpMethod, ToolSpec};

/// Derive a tool name from HTTP method + path for operations without an
/// `operationId`. Every character outside `[A-Za-z0-9]` becomes `_`.
///
/// Examples:
/// - `GET /items` → `get_items`
/// - `GET /users/{id}` → `get_users__id_`
/// - `POST /v1/chat-completions` → `post_v1_chat_completions`
pub fn route_to_name(method: HttpMethod, path: &str) -> String {
    let sanitized: String = path
        .chars()
        .map(|ch| if ch.is_ascii_alphanumeric() { ch } else { '_' })
        .collect();
    format!("{}{}", method.as_str(), sanitized)
}

/// Make tool names unique. With [`DuplicatePolicy::Suffix`] the second and
/// later occurrences of a name get `_2`, `_3`, ... appended, skipping any
/// suffix another tool already uses. With [`DuplicatePolicy::Fail`] the
/// first duplicate is an error.
pub fn dedupe_tool_names(
    tools: &mut [ToolSpec],
    policy: DuplicatePolicy,
) -> Result<Vec<Advisory>, TransformError> {
    let originals: HashSet<String> = tools.iter().map(|t| t.name.clone()).collect();
    let mut taken: HashSet<String> = HashSet::with_capacity(tools.len());
    let mut advisories = Vec::new();

    for tool in tools.iter_mut() {
        if taken.insert(tool.name.clone()) {
            continue;
        }
        if policy == DuplicatePolicy::Fail {
            return Err(TransformError::DuplicateToolName {
                name: tool.name.clone(),
                method: tool.method.as_str().to_uppercase(),
                path: tool.path.clone(),
            });
        }

        let mut n = 2;
        let renamed = loop {
            let candidate = format!("{}_{n}", tool.name);
            if !taken.contains(&candidate) && !originals.contains(&candidate) {
                break candidate;
            }
            n += 1;
        };
        debug!("renaming duplicate tool {} to {renamed}", tool.name);
        advisories.push(Advisory::DuplicateToolName {
            original: tool.name.clone(),
            renamed: renamed.clone(),
        });
        taken.insert(renamed.clone());
        tool.name = renamed;
    }

    Ok(advisories)
}
