//! roxmltree adapter for the XML rule engine
//!
//! This adapter wraps roxmltree nodes to implement the xml-rule-engine
//! `XmlNode` trait, and offers parse-and-run helpers for strings, readers and files.

pub mod document;
pub mod tree;

// Re-export main types
pub use document::{parse, root_element, run_file, run_reader, run_str};
pub use tree::RoxNode;

// Re-export key types for convenience
pub use roxmltree::Document;
