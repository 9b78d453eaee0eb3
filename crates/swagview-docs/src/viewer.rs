//! Viewer session over the currently loaded document.

use indexmap::IndexMap;
use tracing::info;

use crate::document::{Operation, SwaggerDocument};
use crate::error::DocsResult;
use crate::page::{DocsPage, DEFAULT_JSON_INDENT};
use crate::registry::DefinitionRegistry;
use crate::resolver::{ResolveOptions, ResolvedValue, Resolver};
use crate::schema::Reference;

/// Holds one loaded document and its definition registry.
///
/// Loading a new document replaces the previous one entirely, registry
/// included, so references are always resolved against the document on
/// display.
///
/// # Example
///
/// ```
/// use swagview_docs::{DocsViewer, Reference, SwaggerDocument};
///
/// let doc = SwaggerDocument::from_json_str(r#"{
///     "swagger": "2.0",
///     "info": {"title": "Demo", "version": "1"},
///     "definitions": {"Hero": {"type": "object", "properties": {"name": {"type": "string"}}}}
/// }"#).unwrap();
///
/// let mut viewer = DocsViewer::new();
/// viewer.load_document(doc);
///
/// let hero = viewer.resolve_ref(&Reference::to_definition("Hero")).unwrap();
/// assert_eq!(hero.to_json()["name"], "Type: string");
/// ```
#[derive(Debug, Clone)]
pub struct DocsViewer {
    document: Option<SwaggerDocument>,
    registry: DefinitionRegistry,
    options: ResolveOptions,
    json_indent: usize,
    page_title: Option<String>,
}

impl Default for DocsViewer {
    fn default() -> Self {
        Self::new()
    }
}

impl DocsViewer {
    /// Create a viewer with no document loaded.
    #[must_use]
    pub fn new() -> Self {
        Self {
            document: None,
            registry: DefinitionRegistry::new(),
            options: ResolveOptions::default(),
            json_indent: DEFAULT_JSON_INDENT,
            page_title: None,
        }
    }

    /// Set the resolution options.
    #[must_use]
    pub fn with_options(mut self, options: ResolveOptions) -> Self {
        self.options = options;
        self
    }

    /// Set the indent width of rendered example payloads.
    #[must_use]
    pub fn with_json_indent(mut self, indent: usize) -> Self {
        self.json_indent = indent;
        self
    }

    /// Override the rendered page title.
    #[must_use]
    pub fn with_page_title(mut self, title: impl Into<String>) -> Self {
        self.page_title = Some(title.into());
        self
    }

    /// Display `document`, replacing whatever was loaded before.
    pub fn load_document(&mut self, document: SwaggerDocument) {
        self.registry.load(Some(document.definitions.clone()));
        info!(
            title = %document.info.title,
            version = %document.info.version,
            operations = document.operation_count(),
            definitions = self.registry.len(),
            "Document loaded into viewer"
        );
        self.document = Some(document);
    }

    /// The loaded document.
    #[must_use]
    pub fn document(&self) -> Option<&SwaggerDocument> {
        self.document.as_ref()
    }

    /// Definitions of the loaded document.
    #[must_use]
    pub fn registry(&self) -> &DefinitionRegistry {
        &self.registry
    }

    /// A resolver over the loaded document's definitions.
    #[must_use]
    pub fn resolver(&self) -> Resolver<'_> {
        Resolver::new(&self.registry).with_options(self.options.clone())
    }

    /// Resolve a `$ref` against the loaded document.
    #[must_use]
    pub fn resolve_ref(&self, reference: &Reference) -> Option<ResolvedValue> {
        self.resolver().resolve_ref(reference)
    }

    /// Example payload for each response of `operation`, keyed by status code.
    ///
    /// Responses without a schema, or whose schema does not resolve, map
    /// to `None`.
    #[must_use]
    pub fn response_examples(&self, operation: &Operation) -> IndexMap<String, Option<ResolvedValue>> {
        let resolver = self.resolver();
        operation
            .responses
            .iter()
            .map(|(code, response)| {
                let example = response
                    .schema
                    .as_ref()
                    .and_then(|schema| resolver.resolve_schema(schema));
                (code.clone(), example)
            })
            .collect()
    }

    /// Example payload of the operation's body parameter.
    ///
    /// `None` when nothing is loaded.
    #[must_use]
    pub fn request_example(&self, operation: &Operation) -> Option<ResolvedValue> {
        let document = self.document.as_ref()?;
        operation
            .body_parameter(&document.parameters)
            .and_then(|p| p.schema.as_ref())
            .and_then(|schema| self.resolver().resolve_schema(schema))
    }

    /// Render the loaded document, `None` when nothing is loaded.
    pub fn render(&self) -> Option<DocsResult<String>> {
        let document = self.document.as_ref()?;
        let mut page = DocsPage::new(document, &self.registry)
            .json_indent(self.json_indent)
            .resolve_options(self.options.clone());
        if let Some(title) = &self.page_title {
            page = page.title(title.clone());
        }
        Some(page.html())
    }
}
