//! XML node abstraction consumed by the engine

/// Type of XML node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeType {
    /// Document node
    Document,
    /// Element node
    Element,
    /// Text node (CDATA included)
    Text,
    /// Comment node
    Comment,
    /// Processing instruction node
    ProcessingInstruction,
}

/// Ordered attribute map of an element.
///
/// Keys are unique; the first occurrence wins if a caller supplies duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes {
    entries: Vec<(String, String)>,
}

impl Attributes {
    /// Create an empty attribute map
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an attribute, keeping the existing value if `name` is already present
    pub fn insert<N: Into<String>, V: Into<String>>(&mut self, name: N, value: V) {
        let name = name.into();
        if !self.contains(&name) {
            self.entries.push((name, value.into()));
        }
    }

    /// Raw value of an attribute, empty strings included
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Value of an attribute, treating an empty value as absent
    pub fn value(&self, name: &str) -> Option<&str> {
        self.get(name).filter(|value| !value.is_empty())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|(key, _)| key == name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over `(name, value)` pairs in document order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }
}

impl<N: Into<String>, V: Into<String>> FromIterator<(N, V)> for Attributes {
    fn from_iter<I: IntoIterator<Item = (N, V)>>(iter: I) -> Self {
        let mut attributes = Attributes::new();
        for (name, value) in iter {
            attributes.insert(name, value);
        }
        attributes
    }
}

/// Read-only view of one node in a parsed XML tree.
///
/// Implemented by adapters over a concrete parser so the engine never depends
/// on a particular tree representation. The trait is object safe: the engine
/// walks `&dyn XmlNode` and hands the same reference to rule handlers.
pub trait XmlNode {
    /// Get the type of this node
    fn node_type(&self) -> NodeType;

    /// Qualified name of an element, or the target of a processing instruction
    fn node_name(&self) -> Option<String>;

    /// Attributes of an element; empty for every other node type
    fn attributes(&self) -> Attributes;

    /// Concatenated descendant text for elements and documents, the node's own
    /// text for text, comment and processing instruction nodes
    fn text_content(&self) -> String;

    /// Children in document order
    fn children(&self) -> Vec<Box<dyn XmlNode + '_>>;

    /// Get the parent of a node, if it has one
    fn parent(&self) -> Option<Box<dyn XmlNode + '_>>;

    /// The node following this one under the same parent, of any type
    fn next_sibling(&self) -> Option<Box<dyn XmlNode + '_>>;

    /// The first element after this node under the same parent, skipping
    /// text, comments and processing instructions
    fn next_element_sibling(&self) -> Option<Box<dyn XmlNode + '_>>;
}

/// Returns the value of attribute `name` on `node`.
///
/// A missing attribute and an attribute with an empty value both yield `None`,
/// so callers cannot tell the two apart.
pub fn attribute_value(node: &dyn XmlNode, name: &str) -> Option<String> {
    node.attributes().value(name).map(str::to_string)
}
