//! JSON serialization of a configuration document.
//!
//! JSON shape:
//! {
//!   "name": "JobConfiguration",
//!   "attributes": { "Type": "data16", "Lumi": "4.5" },
//!   "children": [
//!     { "name": "InputData", "attributes": {...}, "children": [...] },
//!     ...
//!   ]
//! }
//!
//! Attribute values are always strings; typing happens later, when the
//! loader or the property registry interprets them. `attributes` and
//! `children` both default to empty.

use crate::doc::ConfigNode;
use serde::Deserialize;
use std::collections::BTreeMap;

/// Raw node shape as it appears in the JSON file.
#[derive(Debug, Clone, Deserialize)]
pub struct RawNode {
    pub name: String,

    #[serde(default)]
    pub attributes: BTreeMap<String, String>,

    #[serde(default)]
    pub children: Vec<RawNode>,
}

impl From<RawNode> for ConfigNode {
    fn from(raw: RawNode) -> Self {
        let mut node = ConfigNode::new(raw.name);
        for (name, value) in raw.attributes {
            node = node.attr(name, value);
        }
        for child in raw.children {
            node = node.child(child.into());
        }
        node
    }
}

/// Parse a whole document from JSON text.
pub fn parse_document(text: &str) -> crate::Result<ConfigNode> {
    let raw: RawNode = serde_json::from_str(text)?;
    Ok(raw.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_nested_document() {
        let doc = parse_document(
            r#"{
                "name": "JobConfiguration",
                "children": [
                    {
                        "name": "InputData",
                        "attributes": { "Type": "data", "Lumi": "1.0" },
                        "children": [
                            { "name": "In", "attributes": { "FileName": "a.root" } }
                        ]
                    }
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(doc.name(), "JobConfiguration");
        assert_eq!(doc.children().len(), 1);

        let input = &doc.children()[0];
        assert_eq!(input.attribute("Type"), Some("data"));
        assert_eq!(input.children()[0].attribute("FileName"), Some("a.root"));
    }

    #[test]
    fn missing_fields_default_to_empty() {
        let doc = parse_document(r#"{ "name": "JobConfiguration" }"#).unwrap();
        assert!(!doc.has_children());
        assert!(!doc.has_attributes());
    }
}
