use log::debug;
use toolgen_core::ir::ToolModel;
use toolgen_core::{CodeGenerator, GeneratedFile};

use crate::emitters;
use crate::error::GeneratorError;
use crate::type_mapper::is_java_identifier;

/// Settings for one rendered server class.
#[derive(Debug, Clone)]
pub struct QuarkusConfig {
    /// Java class name; also the output file stem.
    pub class_name: String,
    /// Where the API description came from, recorded in the file header.
    pub source_name: String,
}

/// Java/Quarkus MCP server generator.
pub struct QuarkusMcpGenerator;

impl CodeGenerator for QuarkusMcpGenerator {
    type Config = QuarkusConfig;
    type Error = GeneratorError;

    fn generate(
        &self,
        model: &ToolModel,
        config: &QuarkusConfig,
    ) -> Result<Vec<GeneratedFile>, GeneratorError> {
        if !is_java_identifier(&config.class_name) {
            return Err(GeneratorError::InvalidClassName(config.class_name.clone()));
        }

        let content = emitters::server::emit_server(model, config)?;
        debug!(
            "rendered {} with {} tool(s)",
            config.class_name,
            model.tools.len()
        );

        Ok(vec![GeneratedFile {
            path: format!("{}.java", config.class_name),
            content,
        }])
    }
}
