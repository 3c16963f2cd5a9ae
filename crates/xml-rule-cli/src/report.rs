//! Collected handler invocations and their text rendering

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use serde::Serialize;
use xml_rule_engine::{Attributes, RuleKind, XmlNode};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttributeRecord {
    pub name: String,
    pub value: String,
}

/// What a handler received
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Payload {
    Attributes(Vec<AttributeRecord>),
    Text(String),
}

impl From<&Attributes> for Payload {
    fn from(attributes: &Attributes) -> Self {
        Payload::Attributes(
            attributes
                .iter()
                .map(|(name, value)| AttributeRecord {
                    name: name.to_string(),
                    value: value.to_string(),
                })
                .collect(),
        )
    }
}

/// One handler invocation, in dispatch order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Record {
    pub kind: RuleKind,
    pub depth: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node: Option<String>,
    pub payload: Payload,
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.depth, self.kind)?;
        if let Some(node) = &self.node {
            write!(f, " <{}>", node)?;
        }
        match &self.payload {
            Payload::Attributes(attributes) => {
                for attr in attributes {
                    write!(f, " {}={:?}", attr.name, attr.value)?;
                }
                Ok(())
            }
            Payload::Text(text) => write!(f, " {:?}", text),
        }
    }
}

/// Shared sink the rule handlers append to
#[derive(Debug, Clone, Default)]
pub struct Recorder {
    records: Rc<RefCell<Vec<Record>>>,
}

impl Recorder {
    pub fn push(&self, kind: RuleKind, depth: usize, node: &dyn XmlNode, payload: Payload) {
        self.records.borrow_mut().push(Record {
            kind,
            depth,
            node: node.node_name(),
            payload,
        });
    }

    /// Drain everything recorded so far
    pub fn take(&self) -> Vec<Record> {
        std::mem::take(&mut *self.records.borrow_mut())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_attributes_and_text() {
        let attributes: Attributes = [("name", "demo"), ("default", "dist")].into_iter().collect();
        let element = Record {
            kind: RuleKind::Element,
            depth: 0,
            node: Some("project".to_string()),
            payload: Payload::from(&attributes),
        };
        assert_eq!(
            element.to_string(),
            r#"0 element <project> name="demo" default="dist""#
        );

        let comment = Record {
            kind: RuleKind::Comment,
            depth: 1,
            node: None,
            payload: Payload::Text(" note ".to_string()),
        };
        assert_eq!(comment.to_string(), r#"1 comment " note ""#);
    }

    #[test]
    fn serializes_to_json() {
        let record = Record {
            kind: RuleKind::Content,
            depth: 1,
            node: Some("description".to_string()),
            payload: Payload::Text("Builds".to_string()),
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "kind": "content",
                "depth": 1,
                "node": "description",
                "payload": {"text": "Builds"}
            })
        );
    }
}
