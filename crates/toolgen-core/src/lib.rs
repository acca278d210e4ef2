//! OpenAPI 3.x to MCP tool model.
//!
//! [`parse`] reads the document, [`transform`] resolves references, picks the
//! base URL and maps every operation to a [`ir::ToolSpec`]. Renderers take the
//! resulting [`ir::ToolModel`] through [`CodeGenerator`].

pub mod config;
pub mod error;
pub mod ir;
pub mod parse;
pub mod transform;

/// One output file, relative to the output directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    pub path: String,
    pub content: String,
}

/// A target language renderer.
pub trait CodeGenerator {
    /// Per-run settings such as the output identifier.
    type Config;
    type Error: std::error::Error + Send + Sync + 'static;

    /// Render the model. Output must be byte-identical for identical input.
    fn generate(
        &self,
        model: &ir::ToolModel,
        config: &Self::Config,
    ) -> Result<Vec<GeneratedFile>, Self::Error>;
}
