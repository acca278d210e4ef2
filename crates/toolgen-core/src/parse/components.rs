use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::parameter::ParameterOrRef;
use super::request_body::RequestBodyOrRef;
use super::schema::SchemaOrRef;

/// The `components` sections a tool can reach through `$ref`. Responses and
/// security schemes are not read.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Components {
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub schemas: IndexMap<String, SchemaOrRef>,

    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub parameters: IndexMap<String, ParameterOrRef>,

    #[serde(
        rename = "requestBodies",
        default,
        skip_serializing_if = "IndexMap::is_empty"
    )]
    pub request_bodies: IndexMap<String, RequestBodyOrRef>,
}

impl Components {
    pub fn schema(&self, name: &str) -> Option<&SchemaOrRef> {
        self.schemas.get(name)
    }

    pub fn parameter(&self, name: &str) -> Option<&ParameterOrRef> {
        self.parameters.get(name)
    }

    pub fn request_body(&self, name: &str) -> Option<&RequestBodyOrRef> {
        self.request_bodies.get(name)
    }
}
