//! Configuration document: the generic node tree the loader walks.
//!
//! The tree is supplied by the caller; the loader only ever reads it. Nodes
//! can be built programmatically with the builder methods below, or loaded
//! from the JSON serialization in [`json`].

pub mod json;

pub use json::RawNode;

/// One node of a configuration document: a name, an ordered attribute list
/// and an ordered child list.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigNode {
    name: String,
    attributes: Vec<(String, String)>,
    children: Vec<ConfigNode>,
}

impl ConfigNode {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Builder-style attribute append, used when assembling documents in code.
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((name.into(), value.into()));
        self
    }

    /// Builder-style child append.
    pub fn child(mut self, child: ConfigNode) -> Self {
        self.children.push(child);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// First attribute with the given name, if any.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Attributes in document order.
    pub fn attributes(&self) -> &[(String, String)] {
        &self.attributes
    }

    pub fn has_attributes(&self) -> bool {
        !self.attributes.is_empty()
    }

    /// Children in document order.
    pub fn children(&self) -> &[ConfigNode] {
        &self.children
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }
}
