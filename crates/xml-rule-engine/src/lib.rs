//! Depth-scoped rule dispatch over a parsed XML tree.
//!
//! Callers register [`Rule`]s ("an element named `project` at depth 0", "any
//! comment at depth 1") and hand a root [`XmlNode`] to [`Engine::run`]. The
//! engine walks the tree once, pre-order, and invokes the handler of every
//! rule that matches the visited node.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use xml_rule_engine::{Engine, Rule};
//!
//! let mut engine = Engine::new([
//!     Rule::element(0, "project", |_, attrs| {
//!         println!("default target: {:?}", attrs.value("default"));
//!         Ok(())
//!     })?,
//!     Rule::comment(1, |_, text| {
//!         println!("comment: {}", text.trim());
//!         Ok(())
//!     }),
//! ]);
//! engine.run(&root)?;
//! ```

pub mod engine;
pub mod error;
pub mod rule;
pub mod tree;

pub use engine::Engine;
pub use error::{Error, HandlerError, HandlerResult, Result};
pub use rule::{Matched, Rule, RuleKind};
pub use tree::{attribute_value, Attributes, NodeType, XmlNode};
