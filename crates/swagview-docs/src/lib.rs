//! # Swagview Docs
//!
//! Browsable documentation for Swagger 2.0 documents.
//!
//! This crate provides:
//! - **Document model** for Swagger 2.0 JSON and YAML documents
//! - **Example resolution**: turns a `$ref` into a representative payload
//!   (objects become mappings, arrays one-element sequences, leaf fields
//!   descriptor lines)
//! - **HTML page** rendering of paths, parameters and response examples
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use swagview_docs::{DocsViewer, Reference, SwaggerDocument};
//!
//! let doc = SwaggerDocument::from_path("api.yaml")?;
//!
//! let mut viewer = DocsViewer::new();
//! viewer.load_document(doc);
//!
//! // Example payload of a single definition
//! let example = viewer.resolve_ref(&Reference::to_definition("User"));
//!
//! // Full documentation page
//! let html = viewer.render().transpose()?;
//! ```
//!
//! ## Resolution rules
//!
//! - A reference to an unknown name, or to a definition that is neither an
//!   object nor an array, resolves to `None`; it is never an error.
//! - Self-referencing definitions stop at a `Circular reference: <name>`
//!   descriptor instead of recursing forever.
//! - One example expands a bounded number of definitions; references past
//!   the budget become a `Node budget exceeded: <name>` descriptor.
//! - Every object example keeps exactly the property keys of its schema.

mod describe;
mod document;
mod error;
mod page;
mod registry;
mod resolver;
mod schema;
mod viewer;

pub use describe::describe;
pub use document::{
    Info, Operation, Parameter, ParameterIn, ParameterOrRef, PathItem, Response, SwaggerDocument,
    Tag, PARAMETERS_PREFIX,
};
pub use error::{DocsError, DocsResult};
pub use page::{example_json, DocsPage, DEFAULT_JSON_INDENT};
pub use registry::DefinitionRegistry;
pub use resolver::{
    ResolveOptions, ResolvedValue, Resolver, DEFAULT_MAX_DEPTH, DEFAULT_MAX_NODES,
};
pub use schema::{
    PrimitiveType, Reference, SchemaKind, SchemaNode, SchemaOrRef, DEFINITIONS_PREFIX,
};
pub use viewer::DocsViewer;
