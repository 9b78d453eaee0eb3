//! Static HTML documentation page.
//!
//! [`DocsPage`] renders a loaded Swagger document as a single self-contained
//! page: the project header, then for every path and method the operation
//! id, summary, parameter table and one example payload per response.
//!
//! ```rust,ignore
//! use swagview_docs::{DefinitionRegistry, DocsPage, SwaggerDocument};
//!
//! let doc = SwaggerDocument::from_path("api.json")?;
//! let registry = DefinitionRegistry::from_definitions(doc.definitions.clone());
//! let html = DocsPage::new(&doc, &registry).json_indent(2).html()?;
//! ```

use indexmap::IndexMap;
use serde::Serialize;

use crate::document::{
    Operation, Parameter, ParameterOrRef, PathItem, SwaggerDocument, PARAMETERS_PREFIX,
};
use crate::error::DocsResult;
use crate::registry::DefinitionRegistry;
use crate::resolver::{ResolveOptions, ResolvedValue, Resolver};
use crate::schema::SchemaOrRef;

/// Default indent width of example payloads.
pub const DEFAULT_JSON_INDENT: usize = 4;

/// HTML page generation for one document.
#[derive(Debug, Clone)]
pub struct DocsPage<'a> {
    /// The document to display.
    document: &'a SwaggerDocument,
    /// Resolver over the document's definitions.
    resolver: Resolver<'a>,
    /// Title for the HTML page.
    title: String,
    /// Indent width of example payloads.
    json_indent: usize,
}

impl<'a> DocsPage<'a> {
    /// Create a page for `document`, resolving examples against `registry`.
    #[must_use]
    pub fn new(document: &'a SwaggerDocument, registry: &'a DefinitionRegistry) -> Self {
        Self {
            document,
            resolver: Resolver::new(registry),
            title: format!("{} - API Docs", document.info.title),
            json_indent: DEFAULT_JSON_INDENT,
        }
    }

    /// Set the page title.
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set the indent width of example payloads.
    #[must_use]
    pub fn json_indent(mut self, indent: usize) -> Self {
        self.json_indent = indent;
        self
    }

    /// Set the resolution options used for examples.
    #[must_use]
    pub fn resolve_options(mut self, options: ResolveOptions) -> Self {
        self.resolver = self.resolver.with_options(options);
        self
    }

    /// Generate the complete HTML page.
    pub fn html(&self) -> DocsResult<String> {
        let info = &self.document.info;
        let mut paths = String::new();
        for (path, item) in &self.document.paths {
            paths.push_str("<li>\n<article>\n");
            for (method, op) in item.operations() {
                paths.push_str(&self.operation_html(path, method, item, op)?);
            }
            paths.push_str("</article>\n<br />\n</li>\n");
        }

        Ok(format!(
            r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <style>
        body {{
            margin: 0 auto;
            max-width: 960px;
            font-family: sans-serif;
        }}
        .params-table {{
            border-collapse: collapse;
        }}
        .params-table th,
        .params-table td {{
            border: 1px solid #ddd;
            padding: 4px 8px;
        }}
        pre.code {{
            background: #272822;
            color: #f8f8f2;
            padding: 8px;
            overflow-x: auto;
        }}
    </style>
</head>
<body>
<div id="swagger-json-container" class="file-content wiki">
<div>
    <h2>{project}</h2>
    <div>Version: {version}</div>
</div>
<br />
<ul>
{paths}</ul>
</div>
</body>
</html>"#,
            title = html_escape(&self.title),
            project = html_escape(&info.title),
            version = html_escape(&info.version),
            paths = paths,
        ))
    }

    fn operation_html(
        &self,
        path: &str,
        method: &str,
        item: &PathItem,
        op: &Operation,
    ) -> DocsResult<String> {
        let mut html = format!(
            "<div>\n<h3>{id}</h3>\n<blockquote>\n<p>{summary}</p>\n</blockquote>\n\
             <div>\n<h4 style=\"text-transform: uppercase;\">{method}</h4>\n<pre>{path}</pre>\n</div>\n",
            id = html_escape(op.operation_id.as_deref().unwrap_or_default()),
            summary = html_escape(op.summary.as_deref().unwrap_or_default()),
            method = method,
            path = html_escape(path),
        );

        let shared = &self.document.parameters;
        html.push_str("<h4>Parameters</h4>\n");
        html.push_str(&params_table(
            &merged_parameters(shared, item, op),
            shared,
            &self.resolver.options().ref_prefix,
        ));

        if let Some(body) = op
            .body_parameter(shared)
            .and_then(|p| p.schema.as_ref())
            .and_then(|schema| self.resolver.resolve_schema(schema))
        {
            html.push_str("<h4>Request Body</h4>\n");
            html.push_str(&self.code_block(&body)?);
        }

        html.push_str("<h4>Responses</h4>\n");
        for (code, response) in &op.responses {
            html.push_str(&format!(
                "<div>\n<h4>Status: {code} {desc}</h4>\n",
                code = html_escape(code),
                desc = html_escape(&response.description),
            ));
            if let Some(example) = response
                .schema
                .as_ref()
                .and_then(|schema| self.resolver.resolve_schema(schema))
            {
                html.push_str(&self.code_block(&example)?);
            }
            html.push_str("</div>\n");
        }

        html.push_str("</div>\n");
        Ok(html)
    }

    fn code_block(&self, example: &ResolvedValue) -> DocsResult<String> {
        Ok(format!(
            "<pre class=\"code js-syntax-highlight monokai\"><code>{}</code></pre>\n",
            html_escape(&example_json(example, self.json_indent)?)
        ))
    }
}

/// Serialize an example payload as indented JSON.
pub fn example_json(example: &ResolvedValue, indent: usize) -> DocsResult<String> {
    let indent = " ".repeat(indent);
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(indent.as_bytes());
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    example.serialize(&mut serializer)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

// Path-level parameters first, unless the operation redefines the same name and location.
fn merged_parameters<'d>(
    shared: &'d IndexMap<String, Parameter>,
    item: &'d PathItem,
    op: &'d Operation,
) -> Vec<&'d ParameterOrRef> {
    item.parameters
        .iter()
        .filter(|common| !op.parameters.iter().any(|p| same_parameter(shared, common, p)))
        .chain(&op.parameters)
        .collect()
}

fn same_parameter(
    shared: &IndexMap<String, Parameter>,
    a: &ParameterOrRef,
    b: &ParameterOrRef,
) -> bool {
    match (a.resolve(shared), b.resolve(shared)) {
        (Some(a), Some(b)) => a.name == b.name && a.location == b.location,
        (None, None) => a == b,
        _ => false,
    }
}

fn params_table(
    slots: &[&ParameterOrRef],
    shared: &IndexMap<String, Parameter>,
    ref_prefix: &str,
) -> String {
    let mut rows = String::new();
    for slot in slots {
        let (name, ty, location, required) = match (slot.resolve(shared), *slot) {
            (Some(param), _) | (None, ParameterOrRef::Parameter(param)) => (
                param.name.as_str(),
                param_type_cell(param, ref_prefix),
                param.location.as_str(),
                param.required.to_string(),
            ),
            // Unknown shared parameter: only the name is known.
            (None, ParameterOrRef::Ref(reference)) => (
                reference.definition_name(PARAMETERS_PREFIX),
                String::new(),
                "",
                String::new(),
            ),
        };
        rows.push_str(&format!(
            "        <tr>\n            <td>{name}</td>\n            <td>{ty}</td>\n            \
             <td>{location}</td>\n            <td>{required}</td>\n        </tr>\n",
            name = html_escape(name),
            ty = html_escape(&ty),
            location = location,
            required = required,
        ));
    }

    format!(
        "<table class=\"params-table\">\n    <thead>\n        <tr>\n            <th>Name</th>\n            \
         <th>Type</th>\n            <th>Param In</th>\n            <th>Required</th>\n        </tr>\n    \
         </thead>\n    <tbody>\n{rows}    </tbody>\n</table>\n"
    )
}

// Body parameters have no `type`; show the referenced definition instead.
fn param_type_cell(param: &Parameter, ref_prefix: &str) -> String {
    let ty = match (&param.param_type, &param.schema) {
        (Some(ty), _) => ty.clone(),
        (None, Some(SchemaOrRef::Ref(reference))) => {
            reference.definition_name(ref_prefix).to_string()
        }
        (None, Some(SchemaOrRef::Node(node))) => node.type_name().unwrap_or_default().to_string(),
        (None, None) => String::new(),
    };

    match param.format.as_deref() {
        Some(format) if !format.is_empty() => format!("{ty} (Format: {format})"),
        _ => ty,
    }
}

/// Simple HTML escape for document text.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::ParameterIn;
    use crate::schema::Reference;

    fn create_test_document() -> SwaggerDocument {
        SwaggerDocument::from_json_str(
            r##"{
                "swagger": "2.0",
                "info": {"title": "Dota <Stats>", "version": "1.2.0"},
                "paths": {
                    "/matches/{match_id}": {
                        "get": {
                            "operationId": "GetFeFightAnalysis",
                            "summary": "Fight analysis",
                            "parameters": [
                                {"name": "match_id", "in": "path", "required": true,
                                 "type": "string", "format": "int64"}
                            ],
                            "responses": {
                                "200": {"description": "OK", "schema": {"$ref": "#/definitions/Reply"}},
                                "default": {"description": "error"}
                            }
                        },
                        "post": {
                            "operationId": "Annotate",
                            "parameters": [
                                {"name": "body", "in": "body", "required": true,
                                 "schema": {"$ref": "#/definitions/Reply"}}
                            ],
                            "responses": {}
                        }
                    }
                },
                "definitions": {
                    "Reply": {
                        "type": "object",
                        "properties": {"win": {"type": "boolean", "title": "Won"}}
                    }
                }
            }"##,
        )
        .unwrap()
    }

    fn registry_for(doc: &SwaggerDocument) -> DefinitionRegistry {
        DefinitionRegistry::from_definitions(doc.definitions.clone())
    }

    #[test]
    fn test_page_html_generation() {
        let doc = create_test_document();
        let registry = registry_for(&doc);
        let html = DocsPage::new(&doc, &registry).html().unwrap();

        assert!(html.contains("<!DOCTYPE html>"));
        assert!(html.contains("<h2>Dota &lt;Stats&gt;</h2>"));
        assert!(html.contains("Version: 1.2.0"));
        assert!(html.contains("<h3>GetFeFightAnalysis</h3>"));
        assert!(html.contains("<pre>/matches/{match_id}</pre>"));
        assert!(html.contains("<td>string (Format: int64)</td>"));
        assert!(html.contains("Status: 200 OK"));
        assert!(html.contains("&quot;win&quot;: &quot;Type: boolean Title: Won&quot;"));
    }

    #[test]
    fn test_methods_in_fixed_order() {
        let doc = create_test_document();
        let registry = registry_for(&doc);
        let html = DocsPage::new(&doc, &registry).html().unwrap();

        let get = html.find("GetFeFightAnalysis").unwrap();
        let post = html.find("Annotate").unwrap();
        assert!(get < post);
    }

    #[test]
    fn test_request_body_example() {
        let doc = create_test_document();
        let registry = registry_for(&doc);
        let html = DocsPage::new(&doc, &registry).html().unwrap();

        assert!(html.contains("<h4>Request Body</h4>"));
        assert!(html.contains("<td>Reply</td>"));
    }

    #[test]
    fn test_response_without_schema_has_no_code_block() {
        let doc = create_test_document();
        let registry = registry_for(&doc);
        let html = DocsPage::new(&doc, &registry).html().unwrap();

        let start = html.find("Status: default error").unwrap();
        let end = start + html[start..].find("</div>").unwrap();
        assert!(!html[start..end].contains("<pre"));
    }

    #[test]
    fn test_unresolved_schema_renders_nothing() {
        let doc = create_test_document();
        let empty = DefinitionRegistry::new();
        let html = DocsPage::new(&doc, &empty).html().unwrap();

        assert!(html.contains("Status: 200 OK"));
        assert!(!html.contains("<code>"));
    }

    #[test]
    fn test_title_and_indent() {
        let doc = create_test_document();
        let registry = registry_for(&doc);
        let html = DocsPage::new(&doc, &registry)
            .title("Custom")
            .json_indent(2)
            .html()
            .unwrap();

        assert!(html.contains("<title>Custom</title>"));
        assert!(html.contains("{\n  &quot;win&quot;"));
    }

    #[test]
    fn test_example_json_indent() {
        let example = ResolvedValue::Array(vec![Some(ResolvedValue::Descriptor(
            "Type: string".to_string(),
        ))]);
        assert_eq!(
            example_json(&example, 4).unwrap(),
            "[\n    \"Type: string\"\n]"
        );
    }

    #[test]
    fn test_merged_parameters() {
        let shared = Parameter {
            name: "id".to_string(),
            location: ParameterIn::Path,
            description: None,
            required: true,
            param_type: Some("string".to_string()),
            format: None,
            schema: None,
        };
        let item = PathItem {
            parameters: vec![shared.clone().into()],
            ..PathItem::default()
        };
        let overriding = Operation {
            parameters: vec![Parameter {
                param_type: Some("integer".to_string()),
                ..shared.clone()
            }
            .into()],
            ..Operation::default()
        };
        let none = IndexMap::new();

        let merged = merged_parameters(&none, &item, &overriding);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0], &overriding.parameters[0]);

        let op = Operation::default();
        let merged = merged_parameters(&none, &item, &op);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0], &ParameterOrRef::Parameter(shared));
    }

    #[test]
    fn test_merged_parameters_through_references() {
        let mut shared = IndexMap::new();
        shared.insert(
            "id".to_string(),
            Parameter {
                name: "id".to_string(),
                location: ParameterIn::Path,
                description: None,
                required: true,
                param_type: Some("string".to_string()),
                format: None,
                schema: None,
            },
        );
        let reference = ParameterOrRef::Ref(Reference::new("#/parameters/id"));
        let item = PathItem {
            parameters: vec![reference.clone()],
            ..PathItem::default()
        };
        let inline = ParameterOrRef::Parameter(Parameter {
            param_type: Some("integer".to_string()),
            ..shared["id"].clone()
        });
        let op = Operation {
            parameters: vec![inline.clone()],
            ..Operation::default()
        };

        assert_eq!(merged_parameters(&shared, &item, &op), [&inline]);

        let dangling = Operation {
            parameters: vec![ParameterOrRef::Ref(Reference::new("#/parameters/page"))],
            ..Operation::default()
        };
        assert_eq!(merged_parameters(&shared, &item, &dangling).len(), 2);
    }

    #[test]
    fn test_body_type_cell_uses_ref_prefix() {
        let doc = SwaggerDocument::from_json_str(
            r##"{
                "info": {"title": "T", "version": "1"},
                "paths": {
                    "/heroes": {
                        "post": {
                            "operationId": "CreateHero",
                            "parameters": [{"name": "body", "in": "body",
                                            "schema": {"$ref": "#/components/schemas/Hero"}}],
                            "responses": {}
                        }
                    }
                },
                "definitions": {"Hero": {"type": "object", "properties": {}}}
            }"##,
        )
        .unwrap();
        let registry = registry_for(&doc);
        let options = ResolveOptions {
            ref_prefix: "#/components/schemas/".to_string(),
            ..ResolveOptions::default()
        };

        let html = DocsPage::new(&doc, &registry)
            .resolve_options(options)
            .html()
            .unwrap();
        assert!(html.contains("<td>Hero</td>"));
        assert!(!html.contains("#/components/schemas/"));
        assert!(html.contains("<h4>Request Body</h4>"));
    }

    #[test]
    fn test_html_escape() {
        assert_eq!(html_escape("<script>"), "&lt;script&gt;");
        assert_eq!(html_escape("\"test\""), "&quot;test&quot;");
        assert_eq!(html_escape("a & b"), "a &amp; b");
    }
}
