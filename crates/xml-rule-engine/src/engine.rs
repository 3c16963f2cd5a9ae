//! Depth-bounded traversal that dispatches rules

use log::{debug, trace};

use crate::error::{Error, HandlerError, Result};
use crate::rule::Rule;
use crate::tree::{NodeType, XmlNode};

/// Walks a tree once and invokes the handlers of matching rules.
///
/// Rules fire in registration order. Nothing below the deepest rule is ever
/// dispatched on, so subtrees past `max_depth` are skipped.
#[derive(Debug)]
pub struct Engine {
    rules: Vec<Rule>,
    max_depth: usize,
}

impl Engine {
    /// Create an engine owning `rules`
    pub fn new<I: IntoIterator<Item = Rule>>(rules: I) -> Self {
        let rules: Vec<Rule> = rules.into_iter().collect();
        let max_depth = rules.iter().map(Rule::depth).max().unwrap_or(0);
        Self { rules, max_depth }
    }

    /// Deepest level any rule can match; 0 when there are no rules
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Walk the tree rooted at `root` (level 0).
    ///
    /// The first handler error aborts the walk and is returned as
    /// [`Error::Handler`].
    pub fn run(&mut self, root: &dyn XmlNode) -> Result<()> {
        debug!(
            "running {} rules, max depth {}",
            self.rules.len(),
            self.max_depth
        );
        let mut dispatched = 0;
        self.visit(root, 0, &mut dispatched)?;
        debug!("run finished, {} handler calls", dispatched);
        Ok(())
    }

    fn visit(&mut self, node: &dyn XmlNode, level: usize, dispatched: &mut usize) -> Result<()> {
        if level > self.max_depth {
            trace!("pruned node at level {}", level);
            return Ok(());
        }

        if self.rules.iter().any(|rule| rule.depth() == level) {
            match node.node_type() {
                NodeType::Comment => self.dispatch_comment(node, level, dispatched)?,
                _ => self.dispatch_named(node, level, dispatched)?,
            }
        }

        for child in node.children() {
            // Text and PI children are covered by the parent's text content
            if matches!(child.node_type(), NodeType::Element | NodeType::Comment) {
                self.visit(child.as_ref(), level + 1, dispatched)?;
            }
        }
        Ok(())
    }

    fn dispatch_comment(
        &mut self,
        node: &dyn XmlNode,
        level: usize,
        dispatched: &mut usize,
    ) -> Result<()> {
        let mut text: Option<String> = None;
        for rule in self.rules.iter_mut() {
            let result = match rule {
                Rule::Comment { depth, handler } if *depth == level => {
                    let text = text.get_or_insert_with(|| node.text_content());
                    handler(node, text.as_str())
                }
                _ => continue,
            };
            *dispatched += 1;
            trace!("dispatched {}", rule);
            if let Err(source) = result {
                return Err(handler_failure(rule, level, source));
            }
        }
        Ok(())
    }

    fn dispatch_named(
        &mut self,
        node: &dyn XmlNode,
        level: usize,
        dispatched: &mut usize,
    ) -> Result<()> {
        let Some(node_name) = node.node_name() else {
            return Ok(());
        };

        let mut attributes = None;
        let mut text: Option<String> = None;
        for rule in self.rules.iter_mut() {
            // Element and content rules are tested independently, so both
            // fire when they share a depth and name.
            let result = match rule {
                Rule::Element {
                    depth,
                    name,
                    handler,
                } if *depth == level && *name == node_name => {
                    let attributes = attributes.get_or_insert_with(|| node.attributes());
                    handler(node, &*attributes)
                }
                Rule::Content {
                    depth,
                    name,
                    handler,
                } if *depth == level && *name == node_name => {
                    let text = text.get_or_insert_with(|| node.text_content());
                    handler(node, text.as_str())
                }
                _ => continue,
            };
            *dispatched += 1;
            trace!("dispatched {} on <{}>", rule, node_name);
            if let Err(source) = result {
                return Err(handler_failure(rule, level, source));
            }
        }
        Ok(())
    }
}

fn handler_failure(rule: &Rule, level: usize, source: HandlerError) -> Error {
    Error::Handler {
        rule: rule.to_string(),
        depth: level,
        source,
    }
}
