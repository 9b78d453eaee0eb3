//! One-line descriptors for leaf schema fields.
//!
//! A descriptor is documentation text shown in place of a value in an
//! example payload, e.g. `Type: string (Format: int64) Title: Match ID`.
//! It is never parsed back.

use serde_json::Value;

use crate::schema::{SchemaNode, SchemaOrRef};

/// Format a schema node as a single descriptor line.
///
/// Fields appear in a fixed order and absent or empty ones are skipped:
/// `Type`, `Items Type` (arrays only), `Title`, `Desc`, `Default`, `Enum`.
///
/// # Example
///
/// ```
/// use swagview_docs::{describe, SchemaNode};
///
/// let node = SchemaNode::string().with_format("int64").with_title("Match ID");
/// assert_eq!(describe(&node), "Type: string (Format: int64) Title: Match ID");
/// ```
#[must_use]
pub fn describe(node: &SchemaNode) -> String {
    let mut fields: Vec<String> = Vec::new();

    if let Some(type_name) = node.type_name() {
        fields.push(typed("Type:", type_name, node.format.as_deref()));
    }

    if let Some(items) = node.items().and_then(SchemaOrRef::as_node) {
        if let Some(type_name) = items.type_name() {
            fields.push(typed("Items Type:", type_name, items.format.as_deref()));
        }
    }

    if let Some(title) = non_empty(node.title.as_deref()) {
        fields.push(format!("Title: {title}"));
    }

    if let Some(desc) = non_empty(node.description.as_deref()) {
        fields.push(format!("Desc: {desc}"));
    }

    if let Some(default) = node.default.as_ref().and_then(scalar_text) {
        fields.push(format!("Default: {default}"));
    }

    if !node.enum_values.is_empty() {
        let values: Vec<String> = node
            .enum_values
            .iter()
            .map(|v| scalar_text(v).unwrap_or_default())
            .collect();
        fields.push(format!("Enum: {}", values.join(", ")));
    }

    fields.join(" ")
}

fn typed(label: &str, type_name: &str, format: Option<&str>) -> String {
    match non_empty(format) {
        Some(format) => format!("{label} {type_name} (Format: {format})"),
        None => format!("{label} {type_name}"),
    }
}

fn non_empty(s: Option<&str>) -> Option<&str> {
    s.filter(|s| !s.is_empty())
}

// Strings print bare, other scalars as JSON text. Null and "" count as absent.
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_type_format_title() {
        let node = SchemaNode::string()
            .with_format("int64")
            .with_title("Match ID");
        assert_eq!(describe(&node), "Type: string (Format: int64) Title: Match ID");
    }

    #[test]
    fn test_enum() {
        let node = SchemaNode::string().with_enum(["WIN", "LOSE"]);
        assert_eq!(describe(&node), "Type: string Enum: WIN, LOSE");
    }

    #[test]
    fn test_all_fields_in_order() {
        let node = SchemaNode::integer()
            .with_format("int32")
            .with_title("Kills")
            .with_description("Total kills")
            .with_default(0)
            .with_enum([0, 1, 2]);
        assert_eq!(
            describe(&node),
            "Type: integer (Format: int32) Title: Kills Desc: Total kills Default: 0 Enum: 0, 1, 2"
        );
    }

    #[test]
    fn test_array_items_type() {
        let node = SchemaNode::array(SchemaNode::string().with_format("date"));
        assert_eq!(describe(&node), "Type: array Items Type: string (Format: date)");
    }

    #[test]
    fn test_array_with_ref_items_omits_items_type() {
        let node = SchemaNode::array(SchemaOrRef::definition("Hero")).with_title("Heroes");
        assert_eq!(describe(&node), "Type: array Title: Heroes");
    }

    #[test]
    fn test_empty_and_null_fields_are_skipped() {
        let mut node = SchemaNode::boolean().with_title("").with_description("");
        node.format = Some(String::new());
        node.default = Some(Value::Null);
        assert_eq!(describe(&node), "Type: boolean");
    }

    #[test]
    fn test_default_values() {
        let node = SchemaNode::boolean().with_default(false);
        assert_eq!(describe(&node), "Type: boolean Default: false");

        let node = SchemaNode::string().with_default("radiant");
        assert_eq!(describe(&node), "Type: string Default: radiant");
    }

    #[test]
    fn test_untyped_node() {
        let node: SchemaNode = serde_json::from_value(json!({"title": "Anything"})).unwrap();
        assert_eq!(describe(&node), "Title: Anything");
    }
}
