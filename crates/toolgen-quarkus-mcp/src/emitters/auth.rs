//! Java fragments for the authentication chain in the generated constructor.

use heck::ToLowerCamelCase;
use minijinja::context;
use toolgen_core::ir::AuthStrategy;
use toolgen_core::ir::auth::{
    API_KEY_ENV, API_KEY_HEADER_ENV, API_PASSWORD_ENV, API_USERNAME_ENV, BEARER_TOKEN_ENV,
};

/// Local variable holding the value of an environment variable.
pub fn env_local(var: &str) -> String {
    var.to_lower_camel_case()
}

/// Every variable any strategy reads, in declaration order.
pub fn auth_env_vars() -> Vec<minijinja::Value> {
    let mut seen: Vec<&str> = Vec::new();
    for strategy in AuthStrategy::PRIORITY {
        for &var in strategy.env_vars() {
            if !seen.contains(&var) {
                seen.push(var);
            }
        }
    }
    seen.into_iter()
        .map(|var| context! { name => var, local => env_local(var) })
        .collect()
}

/// Java expressions for one branch of the chain: the guard, the header to
/// set and the startup log message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthBranch {
    pub condition: String,
    pub header_name: String,
    pub header_value: String,
    pub log_message: String,
}

pub fn auth_branch(strategy: AuthStrategy) -> Option<AuthBranch> {
    let (header_name, header_value, log_message) = match strategy {
        AuthStrategy::ApiKey => (
            env_local(API_KEY_HEADER_ENV),
            env_local(API_KEY_ENV),
            format!(
                "\"Using API key authentication with header: \" + {}",
                env_local(API_KEY_HEADER_ENV)
            ),
        ),
        AuthStrategy::Bearer => (
            "\"Authorization\"".to_string(),
            format!("\"Bearer \" + {}", env_local(BEARER_TOKEN_ENV)),
            "\"Using Bearer token authentication\"".to_string(),
        ),
        AuthStrategy::Basic => (
            "\"Authorization\"".to_string(),
            format!(
                "Credentials.basic({}, {})",
                env_local(API_USERNAME_ENV),
                env_local(API_PASSWORD_ENV)
            ),
            "\"Using Basic authentication\"".to_string(),
        ),
        AuthStrategy::None => return None,
    };

    let condition = strategy
        .env_vars()
        .iter()
        .map(|var| format!("{} != null", env_local(var)))
        .collect::<Vec<_>>()
        .join(" && ");

    Some(AuthBranch {
        condition,
        header_name,
        header_value,
        log_message,
    })
}

/// Template contexts for the whole chain, highest priority first.
pub fn auth_branches() -> Vec<minijinja::Value> {
    AuthStrategy::PRIORITY
        .into_iter()
        .filter_map(auth_branch)
        .map(|branch| {
            context! {
                condition => branch.condition,
                header_name => branch.header_name,
                header_value => branch.header_value,
                log_message => branch.log_message,
            }
        })
        .collect()
}
