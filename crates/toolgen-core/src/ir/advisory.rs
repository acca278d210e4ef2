use std::fmt;

use serde::Serialize;

/// A non-fatal finding reported to the operator. Generation always proceeds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Advisory {
    /// More than one server was discovered and none was chosen explicitly.
    MultipleServers { candidates: Vec<String> },
    /// `--server-index` pointed past the end of the candidate list.
    ServerIndexOutOfRange { index: usize, available: usize },
    /// Two operations resolved to the same tool name; the later one was renamed.
    DuplicateToolName { original: String, renamed: String },
}

impl fmt::Display for Advisory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Advisory::MultipleServers { candidates } => {
                writeln!(
                    f,
                    "multiple servers found, using index 0; rerun with --server-index or --server-url to choose:"
                )?;
                for (i, url) in candidates.iter().enumerate() {
                    write!(f, "  [{i}] {url}")?;
                    if i + 1 < candidates.len() {
                        writeln!(f)?;
                    }
                }
                Ok(())
            }
            Advisory::ServerIndexOutOfRange { index, available } => write!(
                f,
                "server index {index} is out of range ({available} server(s) found), using index 0"
            ),
            Advisory::DuplicateToolName { original, renamed } => write!(
                f,
                "tool name '{original}' is already taken, renamed to '{renamed}'"
            ),
        }
    }
}
