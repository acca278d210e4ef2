use serde::{Deserialize, Serialize};

use super::schema::SchemaOrRef;

/// A media type object. Only the schema is kept; the body is passed through
/// to the API as raw text, so examples and encodings are irrelevant here.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MediaType {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<SchemaOrRef>,
}
