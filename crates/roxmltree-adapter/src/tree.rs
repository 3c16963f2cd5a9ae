//! XmlNode implementation for roxmltree

use roxmltree::Node;
use xml_rule_engine::tree::{Attributes, NodeType, XmlNode};

/// Wrapper around a roxmltree node that implements the XmlNode trait
#[derive(Debug, Clone, Copy)]
pub struct RoxNode<'a, 'input> {
    node: Node<'a, 'input>,
}

impl<'a, 'input> RoxNode<'a, 'input> {
    /// Create a new RoxNode
    pub fn new(node: Node<'a, 'input>) -> Self {
        Self { node }
    }

    /// Get the underlying roxmltree node
    pub fn inner(&self) -> Node<'a, 'input> {
        self.node
    }

    /// Join a local name with the prefix bound to its namespace, if any
    fn qualified(&self, namespace: Option<&str>, local: &str) -> String {
        match namespace.and_then(|uri| self.node.lookup_prefix(uri)) {
            Some(prefix) if !prefix.is_empty() => format!("{}:{}", prefix, local),
            _ => local.to_string(),
        }
    }
}

impl<'a, 'input> From<Node<'a, 'input>> for RoxNode<'a, 'input> {
    fn from(node: Node<'a, 'input>) -> Self {
        Self::new(node)
    }
}

impl XmlNode for RoxNode<'_, '_> {
    fn node_type(&self) -> NodeType {
        match self.node.node_type() {
            roxmltree::NodeType::Root => NodeType::Document,
            roxmltree::NodeType::Element => NodeType::Element,
            roxmltree::NodeType::Text => NodeType::Text,
            roxmltree::NodeType::Comment => NodeType::Comment,
            roxmltree::NodeType::PI => NodeType::ProcessingInstruction,
        }
    }

    /// The prefix is looked up from the namespace URI in scope, not copied
    /// from the source text. When a URI is bound both as the default namespace
    /// and to a prefix, the first binding roxmltree reports wins, so
    /// `<a:item>` may come back as `item`.
    fn node_name(&self) -> Option<String> {
        match self.node.node_type() {
            roxmltree::NodeType::Element => {
                let tag = self.node.tag_name();
                Some(self.qualified(tag.namespace(), tag.name()))
            }
            roxmltree::NodeType::PI => self.node.pi().map(|pi| pi.target.to_string()),
            _ => None,
        }
    }

    fn attributes(&self) -> Attributes {
        if !self.node.is_element() {
            return Attributes::new();
        }
        self.node
            .attributes()
            .map(|attr| {
                let name = self.qualified(attr.namespace(), attr.name());
                (name, attr.value().to_string())
            })
            .collect()
    }

    fn text_content(&self) -> String {
        match self.node.node_type() {
            roxmltree::NodeType::Root | roxmltree::NodeType::Element => self
                .node
                .descendants()
                .filter(|n| n.is_text())
                .filter_map(|n| n.text())
                .collect(),
            roxmltree::NodeType::PI => self
                .node
                .pi()
                .and_then(|pi| pi.value)
                .unwrap_or_default()
                .to_string(),
            _ => self.node.text().unwrap_or_default().to_string(),
        }
    }

    fn children(&self) -> Vec<Box<dyn XmlNode + '_>> {
        self.node
            .children()
            .map(|child| Box::new(RoxNode::new(child)) as Box<dyn XmlNode + '_>)
            .collect()
    }

    fn parent(&self) -> Option<Box<dyn XmlNode + '_>> {
        self.node
            .parent()
            .map(|parent| Box::new(RoxNode::new(parent)) as Box<dyn XmlNode + '_>)
    }

    fn next_sibling(&self) -> Option<Box<dyn XmlNode + '_>> {
        self.node
            .next_sibling()
            .map(|sibling| Box::new(RoxNode::new(sibling)) as Box<dyn XmlNode + '_>)
    }

    fn next_element_sibling(&self) -> Option<Box<dyn XmlNode + '_>> {
        self.node
            .next_sibling_element()
            .map(|sibling| Box::new(RoxNode::new(sibling)) as Box<dyn XmlNode + '_>)
    }
}
