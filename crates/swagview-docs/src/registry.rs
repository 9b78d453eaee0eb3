//! Named schema definitions of the currently loaded document.

use indexmap::IndexMap;
use tracing::debug;

use crate::schema::SchemaNode;

/// The `definitions` section of one loaded document.
///
/// Loading replaces the whole registry; there is no merging, so names from a
/// previously loaded document are never visible afterwards.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DefinitionRegistry {
    definitions: IndexMap<String, SchemaNode>,
}

impl DefinitionRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding the given definitions.
    #[must_use]
    pub fn from_definitions(definitions: IndexMap<String, SchemaNode>) -> Self {
        Self { definitions }
    }

    /// Replace every definition with `definitions` (empty when `None`).
    pub fn load(&mut self, definitions: Option<IndexMap<String, SchemaNode>>) {
        self.definitions = definitions.unwrap_or_default();
        debug!(definitions = self.definitions.len(), "Loaded schema definitions");
    }

    /// Look up a definition by bare name.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<&SchemaNode> {
        self.definitions.get(name)
    }

    /// Number of definitions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    /// Whether the registry holds no definitions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Definition names in document order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.definitions.keys().map(String::as_str)
    }
}
