//! Renders a tool model into a single-file Java MCP server that runs under
//! jbang with Quarkus MCP, OkHttp and Jackson.

pub mod emitters;
pub mod error;
pub mod escape;
pub mod generator;
pub mod type_mapper;

pub use error::GeneratorError;
pub use generator::{QuarkusConfig, QuarkusMcpGenerator};
