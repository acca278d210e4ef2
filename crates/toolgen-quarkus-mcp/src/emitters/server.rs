use minijinja::{Environment, context};
use toolgen_core::ir::{
    HttpMethod, ParamLocation, ParameterSpec, SERVER_INDEX_ENV, SERVER_URL_ENV, ToolModel,
    ToolSpec,
};

use super::auth::{auth_branches, auth_env_vars};
use crate::escape::{escape_java, escape_javadoc};
use crate::generator::QuarkusConfig;
use crate::type_mapper::{
    IdentifierPool, is_nullable, java_type, parameter_identifier, sanitize_identifier,
};

const GENERATOR_NAME: &str = "toolgen";

/// Members every generated class declares, plus `Object` methods.
const RESERVED_METHOD_NAMES: &[&str] = &[
    "execute",
    "formatJsonResponse",
    "encodePathSegment",
    "resolveBaseUrl",
    "clone",
    "equals",
    "finalize",
    "getClass",
    "hashCode",
    "notify",
    "notifyAll",
    "toString",
    "wait",
];

/// Names a tool method body refers to: its locals, the `baseUrl` field and
/// the types it uses as expressions.
const METHOD_LOCALS: &[&str] = &[
    "path",
    "url",
    "urlBuilder",
    "requestBuilder",
    "cookies",
    "baseUrl",
    "HttpUrl",
    "Request",
    "RequestBody",
    "MediaType",
    "String",
    "StringJoiner",
];

/// Emit the complete `<ClassName>.java` source.
pub fn emit_server(model: &ToolModel, config: &QuarkusConfig) -> Result<String, minijinja::Error> {
    let mut env = Environment::new();
    env.set_trim_blocks(true);
    env.set_lstrip_blocks(true);
    env.set_keep_trailing_newline(true);
    env.add_filter("escape_java", |value: String| escape_java(&value));
    env.add_filter("escape_javadoc", |value: String| escape_javadoc(&value));
    env.add_template(
        "server.java.j2",
        include_str!("../../templates/server.java.j2"),
    )?;
    let tmpl = env.get_template("server.java.j2")?;

    let mut method_names = IdentifierPool::with_reserved(
        RESERVED_METHOD_NAMES
            .iter()
            .copied()
            .chain([config.class_name.as_str()]),
    );
    let tools: Vec<minijinja::Value> = model
        .tools
        .iter()
        .map(|tool| build_tool_context(tool, &mut method_names))
        .collect();

    tmpl.render(context! {
        class_name => &config.class_name,
        source_name => &config.source_name,
        title => &model.info.title,
        api_version => &model.info.version,
        generator => GENERATOR_NAME,
        generator_version => env!("CARGO_PKG_VERSION"),
        servers => &model.servers.candidates,
        base_url => &model.servers.base_url,
        server_url_env => SERVER_URL_ENV,
        server_index_env => SERVER_INDEX_ENV,
        auth_env => auth_env_vars(),
        auth => auth_branches(),
        tools => tools,
    })
}

fn build_tool_context(tool: &ToolSpec, method_names: &mut IdentifierPool) -> minijinja::Value {
    let method_name = method_names.claim(&sanitize_identifier(&tool.name));

    let mut locals = IdentifierPool::with_reserved(METHOD_LOCALS.iter().copied());
    let idents: Vec<String> = tool
        .parameters
        .iter()
        .map(|p| locals.claim(&parameter_identifier(&p.name)))
        .collect();
    let arg_names = argument_names(&tool.parameters);
    let args = || {
        tool.parameters
            .iter()
            .zip(idents.iter())
            .zip(arg_names.iter())
            .map(|((p, ident), arg_name)| (p, ident, arg_name))
    };
    let located = |location: ParamLocation| -> Vec<minijinja::Value> {
        args()
            .filter(|(p, _, _)| p.location == location)
            .map(|(p, ident, arg_name)| arg_context(p, ident, arg_name))
            .collect()
    };

    let body_ident = args()
        .find(|(p, _, _)| p.location == ParamLocation::Body)
        .map(|(_, ident, _)| ident.clone());

    context! {
        name => &tool.name,
        method_name => method_name,
        description => &tool.description,
        http_method => tool.method.as_str(),
        path => &tool.path,
        params => args()
            .map(|(p, ident, arg_name)| arg_context(p, ident, arg_name))
            .collect::<Vec<_>>(),
        path_params => located(ParamLocation::Path),
        query_params => located(ParamLocation::Query),
        header_params => located(ParamLocation::Header),
        cookie_params => located(ParamLocation::Cookie),
        request => request_kind(tool),
        body_ident => body_ident,
        content_type => tool.request_body.as_ref().map(|b| b.content_type.as_str()),
    }
}

/// MCP argument names, unique within one tool. A wire name reused in another
/// location becomes `<name>_<location>`.
fn argument_names(parameters: &[ParameterSpec]) -> Vec<String> {
    let mut pool = IdentifierPool::with_reserved(std::iter::empty());
    parameters
        .iter()
        .map(|p| {
            if pool.is_taken(&p.name) {
                pool.claim(&format!("{}_{}", p.name, p.location.as_str()))
            } else {
                pool.claim(&p.name)
            }
        })
        .collect()
}

fn arg_context(param: &ParameterSpec, ident: &str, arg_name: &str) -> minijinja::Value {
    context! {
        name => &param.name,
        arg_name => arg_name,
        ident => ident,
        java_type => java_type(param.param_type),
        description => &param.description,
        required => param.required,
        nullable => is_nullable(param.param_type),
        renamed => ident != arg_name,
        placeholder => format!("{{{}}}", param.name),
    }
}

/// How the request method is set: plain GET/DELETE, a method with the body
/// argument, or a method with an empty body.
fn request_kind(tool: &ToolSpec) -> &'static str {
    match tool.method {
        HttpMethod::Get => "get",
        HttpMethod::Delete => "delete",
        HttpMethod::Post | HttpMethod::Put | HttpMethod::Patch => {
            if tool.request_body.is_some() {
                "body"
            } else {
                "empty"
            }
        }
    }
}
