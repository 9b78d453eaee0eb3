//! Example payload resolution.
//!
//! [`Resolver`] turns a `$ref` into a representative example of the
//! referenced schema: objects become mappings, arrays become one-element
//! sequences and leaf fields become [`describe`] strings.
//!
//! Resolution never fails. An unknown reference, or a reference to a
//! definition that is neither an object nor an array, resolves to `None`,
//! and a `None` nested inside an object or array stays in place rather than
//! aborting the whole payload.
//!
//! ```
//! use swagview_docs::{DefinitionRegistry, Reference, Resolver, SchemaNode};
//!
//! let mut registry = DefinitionRegistry::new();
//! registry.load(Some(
//!     [("Hero".to_string(), SchemaNode::object().property("name", SchemaNode::string()))]
//!         .into_iter()
//!         .collect(),
//! ));
//!
//! let example = Resolver::new(&registry)
//!     .resolve_ref(&Reference::to_definition("Hero"))
//!     .unwrap();
//! assert_eq!(example.to_json()["name"], "Type: string");
//! ```

use indexmap::IndexMap;
use serde::Serialize;
use tracing::debug;

use crate::describe::describe;
use crate::registry::DefinitionRegistry;
use crate::schema::{Reference, SchemaKind, SchemaNode, SchemaOrRef, DEFINITIONS_PREFIX};

/// Default limit on nested definition expansion.
pub const DEFAULT_MAX_DEPTH: usize = 32;

/// Default limit on definitions expanded for one example.
pub const DEFAULT_MAX_NODES: usize = 10_000;

/// A resolved example value.
///
/// Absent nested values are `None` and serialize as `null`, so an object
/// always keeps the full key set of its schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ResolvedValue {
    /// Property name to resolved value, in schema order.
    Object(IndexMap<String, Option<ResolvedValue>>),
    /// Exactly one representative element.
    Array(Vec<Option<ResolvedValue>>),
    /// Descriptor line for a leaf field.
    Descriptor(String),
}

impl ResolvedValue {
    /// The properties, if this is an object.
    #[must_use]
    pub fn as_object(&self) -> Option<&IndexMap<String, Option<ResolvedValue>>> {
        match self {
            Self::Object(map) => Some(map),
            _ => None,
        }
    }

    /// The elements, if this is an array.
    #[must_use]
    pub fn as_array(&self) -> Option<&[Option<ResolvedValue>]> {
        match self {
            Self::Array(items) => Some(items),
            _ => None,
        }
    }

    /// The descriptor, if this is a leaf.
    #[must_use]
    pub fn as_descriptor(&self) -> Option<&str> {
        match self {
            Self::Descriptor(text) => Some(text),
            _ => None,
        }
    }

    /// Convert to a JSON value, keeping property order.
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        fn slot(value: Option<&ResolvedValue>) -> serde_json::Value {
            value.map_or(serde_json::Value::Null, ResolvedValue::to_json)
        }

        match self {
            Self::Object(map) => serde_json::Value::Object(
                map.iter().map(|(k, v)| (k.clone(), slot(v.as_ref()))).collect(),
            ),
            Self::Array(items) => serde_json::Value::Array(items.iter().map(|v| slot(v.as_ref())).collect()),
            Self::Descriptor(text) => serde_json::Value::String(text.clone()),
        }
    }
}

/// Resolution settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolveOptions {
    /// Maximum number of nested definitions expanded along one path.
    pub max_depth: usize,
    /// Maximum number of definitions expanded for one top-level example.
    pub max_nodes: usize,
    /// Prefix stripped from `$ref` pointers to get the definition name.
    pub ref_prefix: String,
}

impl Default for ResolveOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            max_nodes: DEFAULT_MAX_NODES,
            ref_prefix: DEFINITIONS_PREFIX.to_string(),
        }
    }
}

/// Resolves references against one [`DefinitionRegistry`].
///
/// The resolver borrows its registry, so the registry cannot be replaced
/// while a resolver for it is alive.
#[derive(Debug, Clone)]
pub struct Resolver<'a> {
    registry: &'a DefinitionRegistry,
    options: ResolveOptions,
}

impl<'a> Resolver<'a> {
    /// Create a resolver with default options.
    #[must_use]
    pub fn new(registry: &'a DefinitionRegistry) -> Self {
        Self {
            registry,
            options: ResolveOptions::default(),
        }
    }

    /// Replace the resolution options.
    #[must_use]
    pub fn with_options(mut self, options: ResolveOptions) -> Self {
        self.options = options;
        self
    }

    /// The resolution options in use.
    #[must_use]
    pub fn options(&self) -> &ResolveOptions {
        &self.options
    }

    /// Resolve a `$ref` into an example value.
    ///
    /// Returns `None` when the name is not defined or the definition is not
    /// an object or array.
    #[must_use]
    pub fn resolve_ref(&self, reference: &Reference) -> Option<ResolvedValue> {
        self.resolve_in(reference, &mut Walk::default())
    }

    /// Resolve a response or body schema slot.
    ///
    /// References go through [`Resolver::resolve_ref`]. Inline object and
    /// array nodes are built directly; an inline leaf yields its descriptor.
    #[must_use]
    pub fn resolve_schema(&self, schema: &SchemaOrRef) -> Option<ResolvedValue> {
        let mut walk = Walk::default();
        match schema {
            SchemaOrRef::Ref(reference) => self.resolve_in(reference, &mut walk),
            SchemaOrRef::Node(node) => Some(match &node.kind {
                SchemaKind::Object { properties } => {
                    ResolvedValue::Object(self.object_in(properties, &mut walk))
                }
                SchemaKind::Array { .. } => ResolvedValue::Array(self.array_in(node, &mut walk)),
                SchemaKind::Primitive(_) => ResolvedValue::Descriptor(describe(node)),
            }),
        }
    }

    /// Build the example mapping of an object node.
    ///
    /// The result has exactly the node's property keys. A non-object node
    /// yields an empty mapping.
    #[must_use]
    pub fn build_object(&self, node: &SchemaNode) -> IndexMap<String, Option<ResolvedValue>> {
        match &node.kind {
            SchemaKind::Object { properties } => self.object_in(properties, &mut Walk::default()),
            _ => IndexMap::new(),
        }
    }

    /// Build the one-element example sequence of an array node.
    #[must_use]
    pub fn build_array(&self, node: &SchemaNode) -> Vec<Option<ResolvedValue>> {
        self.array_in(node, &mut Walk::default())
    }

    fn resolve_in(&self, reference: &Reference, walk: &mut Walk) -> Option<ResolvedValue> {
        let name = reference.definition_name(&self.options.ref_prefix);
        let Some(node) = self.registry.lookup(name) else {
            debug!(reference = reference.as_str(), "Unresolved schema reference");
            return None;
        };

        if walk.chain.iter().any(|seen| seen == name) {
            debug!(definition = name, "Circular schema reference");
            return Some(ResolvedValue::Descriptor(format!(
                "Circular reference: {name}"
            )));
        }

        if walk.chain.len() >= self.options.max_depth {
            debug!(
                definition = name,
                max_depth = self.options.max_depth,
                "Schema nesting too deep"
            );
            return Some(ResolvedValue::Descriptor(format!(
                "Max depth exceeded: {name}"
            )));
        }

        if walk.expanded >= self.options.max_nodes {
            debug!(
                definition = name,
                max_nodes = self.options.max_nodes,
                "Example too large"
            );
            return Some(ResolvedValue::Descriptor(format!(
                "Node budget exceeded: {name}"
            )));
        }

        walk.expanded += 1;
        walk.chain.push(name.to_string());
        let value = match &node.kind {
            SchemaKind::Object { properties } => {
                Some(ResolvedValue::Object(self.object_in(properties, walk)))
            }
            SchemaKind::Array { .. } => Some(ResolvedValue::Array(self.array_in(node, walk))),
            SchemaKind::Primitive(primitive) => {
                debug!(
                    definition = name,
                    schema_type = primitive.name().unwrap_or("none"),
                    "Definition is not an object or array"
                );
                None
            }
        };
        walk.chain.pop();

        value
    }

    fn object_in(
        &self,
        properties: &IndexMap<String, SchemaOrRef>,
        walk: &mut Walk,
    ) -> IndexMap<String, Option<ResolvedValue>> {
        properties
            .iter()
            .map(|(key, prop)| {
                let value = match prop {
                    SchemaOrRef::Ref(reference) => self.resolve_in(reference, walk),
                    SchemaOrRef::Node(node) => match node.items().and_then(SchemaOrRef::reference) {
                        Some(items) => Some(ResolvedValue::Array(vec![self.resolve_in(items, walk)])),
                        None => Some(ResolvedValue::Descriptor(describe(node))),
                    },
                };
                (key.clone(), value)
            })
            .collect()
    }

    fn array_in(&self, node: &SchemaNode, walk: &mut Walk) -> Vec<Option<ResolvedValue>> {
        let element = match node.items().and_then(SchemaOrRef::reference) {
            Some(items) => self.resolve_in(items, walk),
            None => Some(ResolvedValue::Descriptor(describe(node))),
        };
        vec![element]
    }
}

/// State of one top-level resolution.
#[derive(Debug, Default)]
struct Walk {
    /// Definitions currently being expanded, outermost first.
    chain: Vec<String>,
    /// Definitions expanded so far.
    expanded: usize,
}
