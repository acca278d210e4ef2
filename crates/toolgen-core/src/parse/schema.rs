use serde::{Deserialize, Serialize};

/// A JSON Schema type keyword value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaType {
    String,
    Number,
    Integer,
    Boolean,
    Array,
    Object,
    Null,
    /// Anything else (`file`, vendor extensions). Treated like a string.
    #[serde(other)]
    Other,
}

/// The `type` field can be a single type or an array of types.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TypeSet {
    Single(SchemaType),
    Multiple(Vec<SchemaType>),
}

impl TypeSet {
    /// The type that describes a value of this schema: the single type, or the
    /// first non-`null` entry of a 3.1 style type list.
    pub fn primary(&self) -> Option<SchemaType> {
        match self {
            TypeSet::Single(t) => Some(*t),
            TypeSet::Multiple(types) => types
                .iter()
                .copied()
                .find(|t| *t != SchemaType::Null)
                .or_else(|| types.first().copied()),
        }
    }
}

/// A reference or inline schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SchemaOrRef {
    Ref {
        #[serde(rename = "$ref")]
        ref_path: String,
    },
    Schema(Box<Schema>),
}

impl SchemaOrRef {
    /// The inline schema, or `None` for an unresolved reference.
    pub fn as_schema(&self) -> Option<&Schema> {
        match self {
            SchemaOrRef::Schema(schema) => Some(schema),
            SchemaOrRef::Ref { .. } => None,
        }
    }
}

/// A JSON Schema object, reduced to the scalar facets a tool parameter uses.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Schema {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub schema_type: Option<TypeSet>,

    #[serde(rename = "default", skip_serializing_if = "Option::is_none")]
    pub default_value: Option<serde_json::Value>,

    #[serde(rename = "enum", default, skip_serializing_if = "Vec::is_empty")]
    pub enum_values: Vec<serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primary_single() {
        assert_eq!(
            TypeSet::Single(SchemaType::Integer).primary(),
            Some(SchemaType::Integer)
        );
    }

    #[test]
    fn test_primary_skips_null() {
        let types = TypeSet::Multiple(vec![SchemaType::Null, SchemaType::Boolean]);
        assert_eq!(types.primary(), Some(SchemaType::Boolean));
    }

    #[test]
    fn test_primary_only_null() {
        let types = TypeSet::Multiple(vec![SchemaType::Null]);
        assert_eq!(types.primary(), Some(SchemaType::Null));
        assert_eq!(TypeSet::Multiple(vec![]).primary(), None);
    }

    #[test]
    fn test_unknown_type_is_other() {
        let schema: Schema = serde_yaml_ng::from_str("type: file").unwrap();
        assert_eq!(
            schema.schema_type.and_then(|t| t.primary()),
            Some(SchemaType::Other)
        );
    }

    #[test]
    fn test_parse_enum_and_default() {
        let schema: Schema = serde_yaml_ng::from_str(
            r#"
type: string
enum: [celsius, fahrenheit]
default: celsius
"#,
        )
        .unwrap();
        assert_eq!(schema.enum_values.len(), 2);
        assert_eq!(
            schema.default_value,
            Some(serde_json::Value::String("celsius".to_string()))
        );
    }
}
