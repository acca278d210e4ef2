pub mod advisory;
pub mod auth;
pub mod tool;
pub mod types;

pub use advisory::Advisory;
pub use auth::{AuthEnv, AuthStrategy, select_auth};
pub use tool::*;
pub use types::{ApiInfo, SERVER_INDEX_ENV, SERVER_URL_ENV, ServerSelection, ToolModel};
