//! Authentication strategies a generated server can apply to outgoing calls.
//!
//! The generated code decides at its own startup, from environment variables,
//! which strategy to use. The decision rule lives here so it can be tested
//! and so renderers emit it in the same priority order.

use serde::Serialize;

pub const API_KEY_ENV: &str = "API_KEY";
pub const API_KEY_HEADER_ENV: &str = "API_KEY_HEADER";
pub const BEARER_TOKEN_ENV: &str = "BEARER_TOKEN";
pub const API_USERNAME_ENV: &str = "API_USERNAME";
pub const API_PASSWORD_ENV: &str = "API_PASSWORD";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthStrategy {
    /// Send `API_KEY` in the header named by `API_KEY_HEADER`.
    ApiKey,
    /// `Authorization: Bearer <BEARER_TOKEN>`.
    Bearer,
    /// `Authorization: Basic` from `API_USERNAME` and `API_PASSWORD`.
    Basic,
    None,
}

impl AuthStrategy {
    /// Strategies that authenticate, highest priority first.
    pub const PRIORITY: [AuthStrategy; 3] =
        [AuthStrategy::ApiKey, AuthStrategy::Bearer, AuthStrategy::Basic];

    /// Environment variables that must all be set for this strategy to apply.
    pub fn env_vars(&self) -> &'static [&'static str] {
        match self {
            AuthStrategy::ApiKey => &[API_KEY_ENV, API_KEY_HEADER_ENV],
            AuthStrategy::Bearer => &[BEARER_TOKEN_ENV],
            AuthStrategy::Basic => &[API_USERNAME_ENV, API_PASSWORD_ENV],
            AuthStrategy::None => &[],
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AuthStrategy::ApiKey => "API key",
            AuthStrategy::Bearer => "Bearer token",
            AuthStrategy::Basic => "Basic",
            AuthStrategy::None => "none",
        }
    }
}

/// Snapshot of the authentication environment variables.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthEnv {
    pub api_key: Option<String>,
    pub api_key_header: Option<String>,
    pub bearer_token: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
}

impl AuthEnv {
    /// Read the variables from the current process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from an arbitrary lookup, e.g. a map in tests.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            api_key: lookup(API_KEY_ENV),
            api_key_header: lookup(API_KEY_HEADER_ENV),
            bearer_token: lookup(BEARER_TOKEN_ENV),
            username: lookup(API_USERNAME_ENV),
            password: lookup(API_PASSWORD_ENV),
        }
    }

    fn is_set(&self, name: &str) -> bool {
        let value = match name {
            API_KEY_ENV => &self.api_key,
            API_KEY_HEADER_ENV => &self.api_key_header,
            BEARER_TOKEN_ENV => &self.bearer_token,
            API_USERNAME_ENV => &self.username,
            API_PASSWORD_ENV => &self.password,
            _ => return false,
        };
        value.is_some()
    }
}

/// The first strategy in [`AuthStrategy::PRIORITY`] whose variables are all
/// present, or [`AuthStrategy::None`].
pub fn select_auth(env: &AuthEnv) -> AuthStrategy {
    AuthStrategy::PRIORITY
        .into_iter()
        .find(|strategy| strategy.env_vars().iter().all(|var| env.is_set(var)))
        .unwrap_or(AuthStrategy::None)
}
