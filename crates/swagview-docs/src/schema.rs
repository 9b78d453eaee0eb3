//! Swagger 2.0 schema nodes and references.
//!
//! A schema's `type` decides how it is resolved, so the node keeps it as a
//! tagged [`SchemaKind`] instead of a free-form string. On the wire the node
//! is the usual flat Swagger object; conversion goes through [`RawSchema`].

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Prefix that local definition references carry in Swagger 2.0 documents.
pub const DEFINITIONS_PREFIX: &str = "#/definitions/";

/// A `$ref` pointer into the document's definitions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Reference {
    /// The raw pointer, e.g. `#/definitions/User`.
    #[serde(rename = "$ref")]
    pub pointer: String,
}

impl Reference {
    /// Create a reference from a raw pointer string.
    #[must_use]
    pub fn new(pointer: impl Into<String>) -> Self {
        Self {
            pointer: pointer.into(),
        }
    }

    /// Create a reference to the named definition.
    #[must_use]
    pub fn to_definition(name: &str) -> Self {
        Self::new(format!("{DEFINITIONS_PREFIX}{name}"))
    }

    /// The raw pointer string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.pointer
    }

    /// The bare definition name, with `prefix` stripped when present.
    ///
    /// A pointer that does not carry the prefix is taken as the name itself.
    #[must_use]
    pub fn definition_name<'a>(&'a self, prefix: &str) -> &'a str {
        self.pointer
            .strip_prefix(prefix)
            .unwrap_or(&self.pointer)
    }
}

/// A schema slot: either a reference or an inline schema node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SchemaOrRef {
    /// `{"$ref": "..."}`; sibling keys are ignored.
    Ref(Reference),
    /// Inline schema.
    Node(SchemaNode),
}

impl SchemaOrRef {
    /// Create a reference slot to the named definition.
    #[must_use]
    pub fn definition(name: &str) -> Self {
        Self::Ref(Reference::to_definition(name))
    }

    /// The reference, if this slot carries one.
    #[must_use]
    pub fn reference(&self) -> Option<&Reference> {
        match self {
            Self::Ref(reference) => Some(reference),
            Self::Node(_) => None,
        }
    }

    /// The inline node, if this slot carries one.
    #[must_use]
    pub fn as_node(&self) -> Option<&SchemaNode> {
        match self {
            Self::Ref(_) => None,
            Self::Node(node) => Some(node),
        }
    }
}

impl From<SchemaNode> for SchemaOrRef {
    fn from(node: SchemaNode) -> Self {
        Self::Node(node)
    }
}

impl From<Reference> for SchemaOrRef {
    fn from(reference: Reference) -> Self {
        Self::Ref(reference)
    }
}

/// Leaf schema types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrimitiveType {
    /// `string`
    String,
    /// `number`
    Number,
    /// `integer`
    Integer,
    /// `boolean`
    Boolean,
    /// `file` (Swagger 2.0 form uploads)
    File,
    /// `null`
    Null,
    /// A type name this crate does not know about.
    Other(String),
    /// No `type` declared.
    Untyped,
}

impl PrimitiveType {
    /// Parse a declared type name.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name {
            "string" => Self::String,
            "number" => Self::Number,
            "integer" => Self::Integer,
            "boolean" => Self::Boolean,
            "file" => Self::File,
            "null" => Self::Null,
            other => Self::Other(other.to_string()),
        }
    }

    /// The declared type name, `None` when untyped.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::String => Some("string"),
            Self::Number => Some("number"),
            Self::Integer => Some("integer"),
            Self::Boolean => Some("boolean"),
            Self::File => Some("file"),
            Self::Null => Some("null"),
            Self::Other(name) => Some(name),
            Self::Untyped => None,
        }
    }
}

/// The shape of a schema node, chosen by its `type`.
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaKind {
    /// `type: object`
    Object {
        /// Property schemas in document order.
        properties: IndexMap<String, SchemaOrRef>,
    },
    /// `type: array`
    Array {
        /// Item schema; `None` when the document omits it.
        items: Option<Box<SchemaOrRef>>,
    },
    /// Any other declared type.
    Primitive(PrimitiveType),
}

/// A schema definition or inline schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawSchema", into = "RawSchema")]
pub struct SchemaNode {
    /// Shape of the node.
    pub kind: SchemaKind,
    /// Format hint (e.g. `int64`, `date-time`).
    pub format: Option<String>,
    /// Short title.
    pub title: Option<String>,
    /// Description.
    pub description: Option<String>,
    /// Default value.
    pub default: Option<serde_json::Value>,
    /// Allowed values, in declaration order.
    pub enum_values: Vec<serde_json::Value>,
}

impl SchemaNode {
    fn with_kind(kind: SchemaKind) -> Self {
        Self {
            kind,
            format: None,
            title: None,
            description: None,
            default: None,
            enum_values: Vec::new(),
        }
    }

    /// Create a string schema.
    #[must_use]
    pub fn string() -> Self {
        Self::with_kind(SchemaKind::Primitive(PrimitiveType::String))
    }

    /// Create an integer schema.
    #[must_use]
    pub fn integer() -> Self {
        Self::with_kind(SchemaKind::Primitive(PrimitiveType::Integer))
    }

    /// Create a number schema.
    #[must_use]
    pub fn number() -> Self {
        Self::with_kind(SchemaKind::Primitive(PrimitiveType::Number))
    }

    /// Create a boolean schema.
    #[must_use]
    pub fn boolean() -> Self {
        Self::with_kind(SchemaKind::Primitive(PrimitiveType::Boolean))
    }

    /// Create a schema of the given primitive type.
    #[must_use]
    pub fn primitive(primitive: PrimitiveType) -> Self {
        Self::with_kind(SchemaKind::Primitive(primitive))
    }

    /// Create an object schema with no properties.
    #[must_use]
    pub fn object() -> Self {
        Self::with_kind(SchemaKind::Object {
            properties: IndexMap::new(),
        })
    }

    /// Create an array schema with the given item schema.
    #[must_use]
    pub fn array(items: impl Into<SchemaOrRef>) -> Self {
        Self::with_kind(SchemaKind::Array {
            items: Some(Box::new(items.into())),
        })
    }

    /// Add a property. Has no effect on non-object schemas.
    #[must_use]
    pub fn property(mut self, name: impl Into<String>, schema: impl Into<SchemaOrRef>) -> Self {
        if let SchemaKind::Object { properties } = &mut self.kind {
            properties.insert(name.into(), schema.into());
        }
        self
    }

    /// Set the format.
    #[must_use]
    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    /// Set the title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the description.
    #[must_use]
    pub fn with_description(mut self, desc: impl Into<String>) -> Self {
        self.description = Some(desc.into());
        self
    }

    /// Set the default value.
    #[must_use]
    pub fn with_default(mut self, default: impl Into<serde_json::Value>) -> Self {
        self.default = Some(default.into());
        self
    }

    /// Set the allowed values.
    #[must_use]
    pub fn with_enum<I, V>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<serde_json::Value>,
    {
        self.enum_values = values.into_iter().map(Into::into).collect();
        self
    }

    /// The declared type name, `None` for an untyped node.
    #[must_use]
    pub fn type_name(&self) -> Option<&str> {
        match &self.kind {
            SchemaKind::Object { .. } => Some("object"),
            SchemaKind::Array { .. } => Some("array"),
            SchemaKind::Primitive(primitive) => primitive.name(),
        }
    }

    /// Item schema of an array node.
    #[must_use]
    pub fn items(&self) -> Option<&SchemaOrRef> {
        match &self.kind {
            SchemaKind::Array { items } => items.as_deref(),
            _ => None,
        }
    }
}

/// Flat wire form of [`SchemaNode`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct RawSchema {
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    schema_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    format: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    default: Option<serde_json::Value>,
    #[serde(default, rename = "enum", skip_serializing_if = "Vec::is_empty")]
    enum_values: Vec<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    properties: Option<IndexMap<String, SchemaOrRef>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    items: Option<Box<SchemaOrRef>>,
}

impl From<RawSchema> for SchemaNode {
    fn from(raw: RawSchema) -> Self {
        // Without a `type`, `properties` implies an object and `items` an array.
        let kind = match raw.schema_type.as_deref() {
            Some("object") => SchemaKind::Object {
                properties: raw.properties.unwrap_or_default(),
            },
            Some("array") => SchemaKind::Array { items: raw.items },
            Some(name) => SchemaKind::Primitive(PrimitiveType::from_name(name)),
            None => match (raw.properties, raw.items) {
                (Some(properties), _) => SchemaKind::Object { properties },
                (None, Some(items)) => SchemaKind::Array { items: Some(items) },
                (None, None) => SchemaKind::Primitive(PrimitiveType::Untyped),
            },
        };

        Self {
            kind,
            format: raw.format,
            title: raw.title,
            description: raw.description,
            default: raw.default,
            enum_values: raw.enum_values,
        }
    }
}

impl From<SchemaNode> for RawSchema {
    fn from(node: SchemaNode) -> Self {
        let schema_type = node.type_name().map(str::to_string);
        let (properties, items) = match node.kind {
            SchemaKind::Object { properties } => (Some(properties), None),
            SchemaKind::Array { items } => (None, items),
            SchemaKind::Primitive(_) => (None, None),
        };

        Self {
            schema_type,
            format: node.format,
            title: node.title,
            description: node.description,
            default: node.default,
            enum_values: node.enum_values,
            properties,
            items,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_reference_definition_name() {
        let reference = Reference::to_definition("User");
        assert_eq!(reference.as_str(), "#/definitions/User");
        assert_eq!(reference.definition_name(DEFINITIONS_PREFIX), "User");

        let bare = Reference::new("User");
        assert_eq!(bare.definition_name(DEFINITIONS_PREFIX), "User");
    }

    #[test]
    fn test_deserialize_ref_slot() {
        let slot: SchemaOrRef =
            serde_json::from_value(json!({"$ref": "#/definitions/Pet", "description": "x"}))
                .unwrap();
        assert_eq!(slot, SchemaOrRef::definition("Pet"));
    }

    #[test]
    fn test_deserialize_object() {
        let node: SchemaNode = serde_json::from_value(json!({
            "type": "object",
            "title": "Pet",
            "properties": {
                "name": {"type": "string"},
                "owner": {"$ref": "#/definitions/User"},
                "tags": {"type": "array", "items": {"type": "string"}}
            }
        }))
        .unwrap();

        assert_eq!(node.type_name(), Some("object"));
        assert_eq!(node.title.as_deref(), Some("Pet"));
        let SchemaKind::Object { properties } = &node.kind else {
            panic!("expected object");
        };
        let keys: Vec<&str> = properties.keys().map(String::as_str).collect();
        assert_eq!(keys, ["name", "owner", "tags"]);
        assert!(properties["owner"].reference().is_some());
        assert_eq!(
            properties["tags"].as_node().and_then(SchemaNode::type_name),
            Some("array")
        );
    }

    #[test]
    fn test_implicit_types() {
        let object: SchemaNode =
            serde_json::from_value(json!({"properties": {"a": {"type": "string"}}})).unwrap();
        assert_eq!(object.type_name(), Some("object"));

        let array: SchemaNode =
            serde_json::from_value(json!({"items": {"type": "integer"}})).unwrap();
        assert_eq!(array.type_name(), Some("array"));

        let untyped: SchemaNode = serde_json::from_value(json!({"title": "x"})).unwrap();
        assert_eq!(untyped.kind, SchemaKind::Primitive(PrimitiveType::Untyped));
        assert_eq!(untyped.type_name(), None);
    }

    #[test]
    fn test_unknown_primitive_is_kept() {
        let node: SchemaNode = serde_json::from_value(json!({"type": "uuid"})).unwrap();
        assert_eq!(
            node.kind,
            SchemaKind::Primitive(PrimitiveType::Other("uuid".to_string()))
        );
        assert_eq!(node.type_name(), Some("uuid"));
    }

    #[test]
    fn test_serialize_flat() {
        let node = SchemaNode::array(SchemaOrRef::definition("Pet")).with_title("Pets");
        let value = serde_json::to_value(&node).unwrap();
        assert_eq!(
            value,
            json!({"type": "array", "title": "Pets", "items": {"$ref": "#/definitions/Pet"}})
        );
    }

    #[test]
    fn test_builders() {
        let node = SchemaNode::object()
            .property("id", SchemaNode::integer().with_format("int64"))
            .property("status", SchemaNode::string().with_enum(["WIN", "LOSE"]));
        let SchemaKind::Object { properties } = &node.kind else {
            panic!("expected object");
        };
        assert_eq!(properties.len(), 2);

        // Properties on a non-object are ignored.
        let leaf = SchemaNode::string().property("x", SchemaNode::string());
        assert_eq!(leaf.kind, SchemaKind::Primitive(PrimitiveType::String));
    }
}
