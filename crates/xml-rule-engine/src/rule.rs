//! Depth-scoped matching rules

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, HandlerResult, Result};
use crate::tree::{Attributes, XmlNode};

/// The kind of node a [`Rule`] matches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleKind {
    /// An element, handed its attributes
    Element,
    /// An element, handed its text content
    Content,
    /// A comment, handed its text
    Comment,
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleKind::Element => f.write_str("element"),
            RuleKind::Content => f.write_str("content"),
            RuleKind::Comment => f.write_str("comment"),
        }
    }
}

/// Handler invoked with a matched element and its attributes
pub type ElementHandler = Box<dyn FnMut(&dyn XmlNode, &Attributes) -> HandlerResult>;

/// Handler invoked with a matched node and its text content
pub type TextHandler = Box<dyn FnMut(&dyn XmlNode, &str) -> HandlerResult>;

/// Payload handed to handlers registered through [`Rule::named`]
#[derive(Debug, Clone, Copy)]
pub enum Matched<'a> {
    Attributes(&'a Attributes),
    Text(&'a str),
}

/// A matcher bound to a handler.
///
/// The name is carried only by the variants that match on it, so a comment
/// rule with a name cannot be represented.
pub enum Rule {
    Element {
        depth: usize,
        name: String,
        handler: ElementHandler,
    },
    Content {
        depth: usize,
        name: String,
        handler: TextHandler,
    },
    Comment {
        depth: usize,
        handler: TextHandler,
    },
}

impl Rule {
    /// Match elements named `name` at `depth`, receiving their attributes
    pub fn element<S, F>(depth: usize, name: S, handler: F) -> Result<Self>
    where
        S: Into<String>,
        F: FnMut(&dyn XmlNode, &Attributes) -> HandlerResult + 'static,
    {
        Ok(Rule::Element {
            depth,
            name: checked_name(RuleKind::Element, name.into())?,
            handler: Box::new(handler),
        })
    }

    /// Match elements named `name` at `depth`, receiving their text content
    pub fn content<S, F>(depth: usize, name: S, handler: F) -> Result<Self>
    where
        S: Into<String>,
        F: FnMut(&dyn XmlNode, &str) -> HandlerResult + 'static,
    {
        Ok(Rule::Content {
            depth,
            name: checked_name(RuleKind::Content, name.into())?,
            handler: Box::new(handler),
        })
    }

    /// Match comments at `depth`, receiving their text
    pub fn comment<F>(depth: usize, handler: F) -> Self
    where
        F: FnMut(&dyn XmlNode, &str) -> HandlerResult + 'static,
    {
        Rule::Comment {
            depth,
            handler: Box::new(handler),
        }
    }

    /// Build a rule without a name. Only valid for [`RuleKind::Comment`].
    pub fn unnamed<F>(kind: RuleKind, depth: usize, handler: F) -> Result<Self>
    where
        F: FnMut(&dyn XmlNode, &str) -> HandlerResult + 'static,
    {
        if kind != RuleKind::Comment {
            return Err(Error::invalid_rule(format!(
                "{} rules require a name; only comment rules can be built without one",
                kind
            )));
        }
        Ok(Rule::comment(depth, handler))
    }

    /// Build a named rule. Only valid for [`RuleKind::Element`] and
    /// [`RuleKind::Content`]; the handler receives [`Matched::Attributes`] or
    /// [`Matched::Text`] respectively.
    pub fn named<S, F>(kind: RuleKind, depth: usize, name: S, mut handler: F) -> Result<Self>
    where
        S: Into<String>,
        F: FnMut(&dyn XmlNode, Matched<'_>) -> HandlerResult + 'static,
    {
        match kind {
            RuleKind::Element => Rule::element(depth, name, move |node, attributes| {
                handler(node, Matched::Attributes(attributes))
            }),
            RuleKind::Content => Rule::content(depth, name, move |node, text| {
                handler(node, Matched::Text(text))
            }),
            RuleKind::Comment => Err(Error::invalid_rule(
                "comment rules match on depth only and cannot carry a name",
            )),
        }
    }

    pub fn kind(&self) -> RuleKind {
        match self {
            Rule::Element { .. } => RuleKind::Element,
            Rule::Content { .. } => RuleKind::Content,
            Rule::Comment { .. } => RuleKind::Comment,
        }
    }

    pub fn depth(&self) -> usize {
        match self {
            Rule::Element { depth, .. }
            | Rule::Content { depth, .. }
            | Rule::Comment { depth, .. } => *depth,
        }
    }

    /// Element name this rule matches; `None` for comment rules
    pub fn name(&self) -> Option<&str> {
        match self {
            Rule::Element { name, .. } | Rule::Content { name, .. } => Some(name.as_str()),
            Rule::Comment { .. } => None,
        }
    }
}

fn checked_name(kind: RuleKind, name: String) -> Result<String> {
    if name.is_empty() {
        return Err(Error::invalid_rule(format!("{} rules need a non-empty name", kind)));
    }
    Ok(name)
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => write!(f, "{} rule `{}` at depth {}", self.kind(), name, self.depth()),
            None => write!(f, "{} rule at depth {}", self.kind(), self.depth()),
        }
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("kind", &self.kind())
            .field("depth", &self.depth())
            .field("name", &self.name())
            .finish_non_exhaustive()
    }
}
