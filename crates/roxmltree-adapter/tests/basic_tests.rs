//! Basic tests for roxmltree-adapter

use std::cell::RefCell;
use std::rc::Rc;

use roxmltree_adapter::{parse, root_element, run_file, run_reader, run_str};
use xml_rule_engine::{attribute_value, Engine, Error, NodeType, Rule, XmlNode};

const BUILD_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE project>
<project name="demo" default="dist" basedir=".">
    <description>Builds the demo project</description>
    <!-- Source directory -->
    <property name="src" location="src"/>
    <!-- Output directory -->
    <property name="build" value="build" description="Compiled classes"/>
    <target name="dist">
        <!-- Not a property -->
        <mkdir dir="${build}"/>
    </target>
</project>"#;

type Log = Rc<RefCell<Vec<String>>>;

fn new_log() -> Log {
    Rc::new(RefCell::new(Vec::new()))
}

fn entries(log: &Log) -> Vec<String> {
    log.borrow().clone()
}

#[test]
fn test_rox_node_parse_xml() {
    let doc = parse("<root><item>test</item></root>").unwrap();

    // Get document element
    let root = root_element(&doc);

    // Check node name
    assert_eq!(root.node_type(), NodeType::Element);
    assert_eq!(root.node_name(), Some("root".to_string()));

    // Get children
    let children = root.children();
    assert_eq!(children.len(), 1);

    // Check child name and text
    assert_eq!(children[0].node_name(), Some("item".to_string()));
    assert_eq!(children[0].text_content(), "test");
}

#[test]
fn test_rox_node_text_content_skips_comments() {
    let doc = parse("<p>Hello, <b>wor<![CDATA[ld]]></b><!-- hidden -->!</p>").unwrap();
    let p = root_element(&doc);
    assert_eq!(p.text_content(), "Hello, world!");

    let kinds: Vec<NodeType> = p.children().iter().map(|c| c.node_type()).collect();
    assert_eq!(
        kinds,
        vec![
            NodeType::Text,
            NodeType::Element,
            NodeType::Comment,
            NodeType::Text
        ]
    );
}

#[test]
fn test_rox_node_qualified_names() {
    let doc = parse(r#"<root xmlns:x="urn:x" xmlns="urn:default"><x:item x:id="1" plain="2"/></root>"#)
        .unwrap();
    let root = root_element(&doc);
    assert_eq!(root.node_name(), Some("root".to_string()));

    let children = root.children();
    let item = children[0].as_ref();
    assert_eq!(item.node_name(), Some("x:item".to_string()));
    let attrs = item.attributes();
    assert_eq!(attrs.get("x:id"), Some("1"));
    assert_eq!(attrs.get("plain"), Some("2"));
}

#[test]
fn test_attribute_value_normalizes_empty() {
    let doc = parse(r#"<root full="yes" empty=""/>"#).unwrap();
    let root = root_element(&doc);
    assert_eq!(attribute_value(&root, "full"), Some("yes".to_string()));
    assert_eq!(attribute_value(&root, "empty"), None);
    assert_eq!(attribute_value(&root, "missing"), None);
}

#[test]
fn test_parse_error_is_reported() {
    let mut engine = Engine::new(Vec::new());
    let err = run_str(&mut engine, "<root><unclosed></root>").unwrap_err();
    assert!(matches!(err, Error::XmlParse(_)), "got {err}");
}

#[test]
fn test_missing_file_is_io_error() {
    let mut engine = Engine::new(Vec::new());
    let path = std::path::Path::new(env!("CARGO_TARGET_TMPDIR")).join("does-not-exist.xml");
    let err = run_file(&mut engine, &path).unwrap_err();
    assert!(matches!(err, Error::Io(_)), "got {err}");
}

#[test]
fn test_run_file() {
    let path = std::path::Path::new(env!("CARGO_TARGET_TMPDIR")).join("run-file-build.xml");
    std::fs::write(&path, BUILD_XML).unwrap();

    let seen = new_log();
    let sink = seen.clone();
    let mut engine = Engine::new([Rule::element(0, "project", move |_, attrs| {
        sink.borrow_mut()
            .push(attrs.value("default").unwrap_or("-").to_string());
        Ok(())
    })
    .unwrap()]);
    run_file(&mut engine, &path).unwrap();

    assert_eq!(entries(&seen), vec!["dist"]);
}

#[test]
fn test_comment_text_is_verbatim() {
    let seen = new_log();
    let sink = seen.clone();
    let mut engine = Engine::new([Rule::comment(1, move |_, text| {
        sink.borrow_mut().push(text.to_string());
        Ok(())
    })]);

    run_str(&mut engine, "<root><!-- note --><a><!-- deeper --></a></root>").unwrap();

    assert_eq!(entries(&seen), vec![" note "]);
}

#[test]
fn test_processing_instructions_are_not_dispatched() {
    let seen = new_log();
    let sink = seen.clone();
    let mut engine = Engine::new([Rule::element(1, "pi", move |_, _| {
        sink.borrow_mut().push("pi".to_string());
        Ok(())
    })
    .unwrap()]);

    run_str(&mut engine, "<root><?pi data?>text</root>").unwrap();

    assert!(entries(&seen).is_empty());
}

#[test]
fn test_prefix_comes_from_namespace_lookup() {
    let xml = r#"<root xmlns="urn:a" xmlns:a="urn:a"><a:item/></root>"#;
    let doc = parse(xml).unwrap();
    let root = root_element(&doc);
    let children = root.children();
    assert_eq!(children[0].node_name(), Some("item".to_string()));

    let seen = new_log();
    let (a, b) = (seen.clone(), seen.clone());
    let mut engine = Engine::new([
        Rule::element(1, "a:item", move |_, _| {
            a.borrow_mut().push("a:item".to_string());
            Ok(())
        })
        .unwrap(),
        Rule::element(1, "item", move |_, _| {
            b.borrow_mut().push("item".to_string());
            Ok(())
        })
        .unwrap(),
    ]);
    run_str(&mut engine, xml).unwrap();

    assert_eq!(entries(&seen), vec!["item"]);
}

#[test]
fn test_rox_node_navigation() {
    let doc = parse("<root><a/>text<!-- c --><b/></root>").unwrap();
    let root = root_element(&doc);
    assert_eq!(root.parent().map(|p| p.node_type()), Some(NodeType::Document));

    let children = root.children();
    let a = children[0].as_ref();
    assert_eq!(a.next_sibling().map(|n| n.node_type()), Some(NodeType::Text));
    assert_eq!(
        a.next_element_sibling().and_then(|n| n.node_name()),
        Some("b".to_string())
    );
    assert_eq!(
        a.parent().and_then(|n| n.node_name()),
        Some("root".to_string())
    );
    assert!(children[3].next_sibling().is_none());
}

#[test]
fn test_run_reader() {
    let seen = new_log();
    let sink = seen.clone();
    let mut engine = Engine::new([Rule::content(1, "description", move |_, text| {
        sink.borrow_mut().push(text.to_string());
        Ok(())
    })
    .unwrap()]);

    run_reader(&mut engine, BUILD_XML.as_bytes()).unwrap();
    assert_eq!(entries(&seen), vec!["Builds the demo project"]);

    let err = run_reader(&mut engine, &b"\xff\xfe<"[..]).unwrap_err();
    assert!(matches!(err, Error::Io(_)), "got {err}");
}

#[test]
fn test_build_file_metadata() {
    let seen = new_log();
    let (a, b, c) = (seen.clone(), seen.clone(), seen.clone());
    let mut engine = Engine::new([
        Rule::element(0, "project", move |_, attrs| {
            a.borrow_mut().push(format!(
                "project {} default={}",
                attrs.value("name").unwrap_or("-"),
                attrs.value("default").unwrap_or("-")
            ));
            Ok(())
        })
        .unwrap(),
        Rule::content(1, "description", move |_, text| {
            b.borrow_mut().push(format!("description {}", text));
            Ok(())
        })
        .unwrap(),
        // Each comment documents the property element that follows it
        Rule::comment(1, move |node, text| {
            let Some(property) = node.next_element_sibling() else {
                return Ok(());
            };
            if property.node_name().as_deref() != Some("property") {
                return Ok(());
            }
            let field = |name: &str| {
                attribute_value(property.as_ref(), name).unwrap_or_else(|| "-".to_string())
            };
            c.borrow_mut().push(format!(
                "property name={} value={} description={} ({})",
                field("name"),
                field("value"),
                field("description"),
                text.trim()
            ));
            Ok(())
        }),
    ]);
    assert_eq!(engine.max_depth(), 1);

    run_str(&mut engine, BUILD_XML).unwrap();

    insta::assert_snapshot!(entries(&seen).join("\n"), @r"
    project demo default=dist
    description Builds the demo project
    property name=src value=- description=- (Source directory)
    property name=build value=build description=Compiled classes (Output directory)
    ");
}
