//! Parse-and-run entry points

use std::io::Read;
use std::path::Path;

use log::debug;
use roxmltree::{Document, ParsingOptions};
use xml_rule_engine::error::{Error, Result};
use xml_rule_engine::Engine;

use crate::tree::RoxNode;

/// Parse XML text into a roxmltree document.
///
/// DTDs are accepted so that documents carrying a DOCTYPE still parse.
pub fn parse(xml: &str) -> Result<Document<'_>> {
    let options = ParsingOptions {
        allow_dtd: true,
        ..ParsingOptions::default()
    };
    Document::parse_with_options(xml, options).map_err(|e| Error::xml_parse(e.to_string()))
}

/// Get the document element (root element) of a document
pub fn root_element<'a, 'input>(doc: &'a Document<'input>) -> RoxNode<'a, 'input> {
    RoxNode::new(doc.root_element())
}

/// Parse `xml` and run `engine` from its root element
pub fn run_str(engine: &mut Engine, xml: &str) -> Result<()> {
    let doc = parse(xml)?;
    engine.run(&root_element(&doc))
}

/// Read all of `reader` as UTF-8 XML, then run `engine` from its root element
pub fn run_reader<R: Read>(engine: &mut Engine, mut reader: R) -> Result<()> {
    let mut xml = String::new();
    reader.read_to_string(&mut xml)?;
    run_str(engine, &xml)
}

/// Read and parse the file at `path`, then run `engine` from its root element
pub fn run_file<P: AsRef<Path>>(engine: &mut Engine, path: P) -> Result<()> {
    let path = path.as_ref();
    debug!("reading {}", path.display());
    let xml = std::fs::read_to_string(path)?;
    run_str(engine, &xml)
}
