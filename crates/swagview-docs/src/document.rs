//! Swagger 2.0 document types and loading.
//!
//! The types cover the parts of a Swagger 2.0 document that the viewer
//! displays: project info, paths with their operations, and the
//! `definitions` section. Unknown keys are ignored.
//!
//! Reference: <https://swagger.io/specification/v2/>

use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{DocsError, DocsResult};
use crate::schema::{Reference, SchemaNode, SchemaOrRef};

/// Pointer prefix of entries in the top-level `parameters` section.
pub const PARAMETERS_PREFIX: &str = "#/parameters/";

/// Swagger document root object.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SwaggerDocument {
    /// Swagger version (should be "2.0").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub swagger: Option<String>,
    /// API metadata.
    pub info: Info,
    /// Host serving the API.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    /// Base path of every operation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[serde(rename = "basePath")]
    pub base_path: Option<String>,
    /// API paths and operations.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub paths: IndexMap<String, PathItem>,
    /// Named schema definitions.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub definitions: IndexMap<String, SchemaNode>,
    /// Parameters shared between operations, by name.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub parameters: IndexMap<String, Parameter>,
    /// Tags for API grouping.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<Tag>,
}

/// API metadata.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Info {
    /// API title.
    #[serde(default)]
    pub title: String,
    /// API version.
    #[serde(default)]
    pub version: String,
    /// API description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A path item containing operations for a single path.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PathItem {
    /// GET operation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub get: Option<Operation>,
    /// PUT operation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub put: Option<Operation>,
    /// POST operation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post: Option<Operation>,
    /// DELETE operation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delete: Option<Operation>,
    /// OPTIONS operation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Operation>,
    /// HEAD operation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub head: Option<Operation>,
    /// PATCH operation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patch: Option<Operation>,
    /// Parameters common to all operations.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<ParameterOrRef>,
}

impl PathItem {
    /// Declared operations as `(method, operation)`, in a fixed method order.
    pub fn operations(&self) -> impl Iterator<Item = (&'static str, &Operation)> {
        [
            ("get", &self.get),
            ("put", &self.put),
            ("post", &self.post),
            ("delete", &self.delete),
            ("options", &self.options),
            ("head", &self.head),
            ("patch", &self.patch),
        ]
        .into_iter()
        .filter_map(|(method, op)| op.as_ref().map(|op| (method, op)))
    }
}

/// An API operation (endpoint).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Operation {
    /// Unique operation identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[serde(rename = "operationId")]
    pub operation_id: Option<String>,
    /// Short summary.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// Full description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Tags for grouping.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    /// Whether deprecated.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub deprecated: bool,
    /// Parameters.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<ParameterOrRef>,
    /// Responses by status code.
    #[serde(default)]
    pub responses: IndexMap<String, Response>,
}

impl Operation {
    /// The `body` parameter, if the operation declares one.
    ///
    /// References are looked up in `shared`, the document's `parameters`.
    #[must_use]
    pub fn body_parameter<'d>(
        &'d self,
        shared: &'d IndexMap<String, Parameter>,
    ) -> Option<&'d Parameter> {
        self.parameters
            .iter()
            .filter_map(|slot| slot.resolve(shared))
            .find(|p| p.location == ParameterIn::Body)
    }
}

/// Parameter location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ParameterIn {
    /// Query string parameter.
    Query,
    /// HTTP header.
    Header,
    /// URL path parameter.
    Path,
    /// Form field.
    FormData,
    /// Request body.
    Body,
}

impl ParameterIn {
    /// The location as written in the document.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Query => "query",
            Self::Header => "header",
            Self::Path => "path",
            Self::FormData => "formData",
            Self::Body => "body",
        }
    }
}

/// A parameter slot: either a reference or an inline parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParameterOrRef {
    /// `{"$ref": "#/parameters/..."}`.
    Ref(Reference),
    /// Inline parameter.
    Parameter(Parameter),
}

impl ParameterOrRef {
    /// The inline parameter, or the entry of `shared` the reference names.
    #[must_use]
    pub fn resolve<'d>(
        &'d self,
        shared: &'d IndexMap<String, Parameter>,
    ) -> Option<&'d Parameter> {
        match self {
            Self::Parameter(param) => Some(param),
            Self::Ref(reference) => shared.get(reference.definition_name(PARAMETERS_PREFIX)),
        }
    }
}

impl From<Parameter> for ParameterOrRef {
    fn from(param: Parameter) -> Self {
        Self::Parameter(param)
    }
}

/// An operation parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    /// Parameter name.
    pub name: String,
    /// Parameter location.
    #[serde(rename = "in")]
    pub location: ParameterIn,
    /// Description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Whether required.
    #[serde(default)]
    pub required: bool,
    /// Declared type (non-body parameters).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[serde(rename = "type")]
    pub param_type: Option<String>,
    /// Format hint (non-body parameters).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    /// Body schema (body parameters).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<SchemaOrRef>,
}

/// Response definition.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Response {
    /// Description.
    #[serde(default)]
    pub description: String,
    /// Payload schema.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<SchemaOrRef>,
}

/// API tag for grouping operations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tag {
    /// Tag name.
    pub name: String,
    /// Description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl SwaggerDocument {
    /// Parse a document from JSON text.
    pub fn from_json_str(json: &str) -> DocsResult<Self> {
        let doc: Self = serde_json::from_str(json)?;
        doc.checked()
    }

    /// Parse a document from YAML text.
    pub fn from_yaml_str(yaml: &str) -> DocsResult<Self> {
        let doc: Self = serde_yaml::from_str(yaml)?;
        doc.checked()
    }

    /// Read a document from a `.json`, `.yaml` or `.yml` file.
    pub fn from_path(path: impl AsRef<Path>) -> DocsResult<Self> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase);

        let doc = match extension.as_deref() {
            Some("json") => Self::from_json_str(&fs::read_to_string(path)?)?,
            Some("yaml" | "yml") => Self::from_yaml_str(&fs::read_to_string(path)?)?,
            _ => return Err(DocsError::unsupported_format(path)),
        };

        info!(
            path = %path.display(),
            title = %doc.info.title,
            paths = doc.paths.len(),
            definitions = doc.definitions.len(),
            "Loaded Swagger document"
        );
        Ok(doc)
    }

    /// Number of operations across all paths.
    #[must_use]
    pub fn operation_count(&self) -> usize {
        self.paths.values().map(|item| item.operations().count()).sum()
    }

    fn checked(self) -> DocsResult<Self> {
        match self.swagger.as_deref() {
            None | Some("2.0") => Ok(self),
            Some(other) => Err(DocsError::unsupported_version(other)),
        }
    }
}
