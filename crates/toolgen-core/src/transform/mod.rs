pub mod name_normalizer;
pub mod operation_mapper;
pub mod server_resolver;
pub mod spec_model;
pub mod spec_to_ir;

pub use server_resolver::ServerOverride;
pub use spec_to_ir::{TransformOptions, transform, transform_with_options};
