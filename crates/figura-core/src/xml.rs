//! XML encoder and decoder, working at the level of JSON text.
//!
//! Only two element names carry meaning:
//!
//! - `Dict` — an object. Scalar entries become attributes (`key="token"`); list and
//!   object entries become a child element named after the key, wrapping a nested
//!   `Dict` or `List`.
//! - `List` — an array. Scalar items become empty-valued attributes whose *name* is
//!   the scalar token (`<List $1='' $2=''/>`); composite items become child elements.
//!
//! Scalar tokens: numbers are `$` + the number literal, booleans are `yeah`/`nop`,
//! null is `null`, and strings are XML-escaped text. Attributes are written before
//! child elements, so inside any map or list scalars come back ahead of composites.
//!
//! The encoder takes JSON text (or an already parsed `serde_json::Value`); the decoder
//! produces JSON text in the same `", "` / `": "` spacing as
//! [`value_to_json`](crate::value_to_json).

use crate::error::Result;
use crate::escape::{escape_xml, push_json_string};
use crate::json::parse_document;
use crate::observer::{Diagnostic, LogObserver, Observer};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use serde_json::{Map, Number, Value as Node};

pub const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="utf-8"?>"#;

const DICT: &str = "Dict";
const LIST: &str = "List";
const TRUE_TOKEN: &str = "yeah";
const FALSE_TOKEN: &str = "nop";
const NULL_TOKEN: &str = "null";

/// Deepest accepted element nesting. Every `Dict` entry adds a wrapper element, so this
/// is twice the JSON parser's nesting limit.
const MAX_DEPTH: usize = 256;

/// Convert a JSON document to XML, logging skipped entries.
///
/// Returns `Ok(None)` when the document's top level is not `[` or `{`, and an error
/// when it is not valid JSON.
pub fn json_to_xml(json: &str) -> Result<Option<String>> {
    json_to_xml_with(json, &mut LogObserver)
}

/// Convert a JSON document to XML, reporting skipped entries to `observer`.
pub fn json_to_xml_with(json: &str, observer: &mut dyn Observer) -> Result<Option<String>> {
    Ok(parse_document(json)?
        .as_ref()
        .and_then(|node| node_to_xml_with(node, observer)))
}

/// Convert a parsed JSON node to XML. Scalar roots have no XML form.
pub fn node_to_xml(node: &Node) -> Option<String> {
    node_to_xml_with(node, &mut LogObserver)
}

/// Convert a parsed JSON node to XML.
///
/// Map entries whose key is not an XML name cannot become an attribute or element; they
/// are left out and reported as [`Diagnostic::InvalidKey`].
pub fn node_to_xml_with(node: &Node, observer: &mut dyn Observer) -> Option<String> {
    if !is_composite(node) {
        return None;
    }
    let mut out = String::from(XML_DECLARATION);
    write_composite(node, "\n", observer, &mut out);
    Some(out)
}

fn is_composite(node: &Node) -> bool {
    matches!(node, Node::Array(_) | Node::Object(_))
}

/// XML 1.0 `Name`, restricted to what a map key can spell: a letter, `_` or `:` first,
/// then letters, digits, `_`, `:`, `-` or `.`.
fn is_xml_name(key: &str) -> bool {
    let mut chars = key.chars();
    chars
        .next()
        .is_some_and(|c| c.is_alphabetic() || matches!(c, '_' | ':'))
        && chars.all(|c| c.is_alphanumeric() || matches!(c, '_' | ':' | '-' | '.'))
}

/// `level` is the newline-plus-tabs prefix for this element's tags. It only affects
/// layout.
fn write_composite(node: &Node, level: &str, observer: &mut dyn Observer, out: &mut String) {
    match node {
        Node::Object(map) => write_dict(map, level, observer, out),
        Node::Array(items) => write_list(items, level, observer, out),
        _ => {}
    }
}

fn write_dict(map: &Map<String, Node>, level: &str, observer: &mut dyn Observer, out: &mut String) {
    let child_level = format!("{level}\t");
    let mut attrs = String::new();
    let mut items = String::new();
    for (key, value) in map {
        if !is_xml_name(key) {
            observer.observe(Diagnostic::InvalidKey { key: key.clone() });
            continue;
        }
        if is_composite(value) {
            items.push_str(&format!("<{key}>"));
            write_composite(value, &child_level, observer, &mut items);
            items.push_str(&format!("</{key}>"));
        } else {
            attrs.push_str(&format!(" {key}=\"{}\"", scalar_token(value)));
        }
    }
    write_element(DICT, level, &attrs, &items, out);
}

fn write_list(list: &[Node], level: &str, observer: &mut dyn Observer, out: &mut String) {
    let child_level = format!("{level}\t");
    let mut attrs = String::new();
    let mut items = String::new();
    for item in list {
        if is_composite(item) {
            write_composite(item, &child_level, observer, &mut items);
        } else {
            attrs.push_str(&format!(" {}=''", scalar_token(item)));
        }
    }
    write_element(LIST, level, &attrs, &items, out);
}

fn write_element(name: &str, level: &str, attrs: &str, items: &str, out: &mut String) {
    out.push_str(level);
    out.push('<');
    out.push_str(name);
    out.push_str(attrs);
    if items.is_empty() {
        out.push_str("/>");
    } else {
        out.push('>');
        out.push_str(items);
        out.push_str(level);
        out.push_str("</");
        out.push_str(name);
        out.push('>');
    }
}

fn scalar_token(node: &Node) -> String {
    match node {
        Node::Null => NULL_TOKEN.to_string(),
        Node::Bool(true) => TRUE_TOKEN.to_string(),
        Node::Bool(false) => FALSE_TOKEN.to_string(),
        Node::Number(n) => format!("${n}"),
        Node::String(s) => escape_xml(s),
        Node::Array(_) | Node::Object(_) => String::new(),
    }
}

/// Convert engine-style XML to JSON text, logging skipped elements.
pub fn xml_to_json(xml: &str) -> Option<String> {
    xml_to_json_with(xml, &mut LogObserver)
}

/// Convert engine-style XML to JSON text.
///
/// Returns `None` when the XML is not well-formed or its root element is neither
/// `Dict` nor `List`. Unknown elements further down are skipped and reported to
/// `observer`.
pub fn xml_to_json_with(xml: &str, observer: &mut dyn Observer) -> Option<String> {
    let root = match parse_tree(xml) {
        Ok(Some(root)) => root,
        Ok(None) => {
            log::debug!("XML document has no root element");
            return None;
        }
        Err(message) => {
            log::debug!("malformed XML: {message}");
            return None;
        }
    };
    let mut out = String::new();
    if !write_json(&root, observer, &mut out) {
        observer.observe(Diagnostic::UnknownElement { name: root.name });
        return None;
    }
    Some(out)
}

/// Minimal element tree: attributes in document order, text ignored.
#[derive(Debug)]
struct Element {
    name: String,
    attributes: Vec<(String, String)>,
    children: Vec<Element>,
}

impl Element {
    fn from_start(start: &BytesStart<'_>) -> std::result::Result<Self, String> {
        let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
        let mut attributes = Vec::new();
        // List items may repeat, so duplicate attribute names are allowed.
        for attr in start.attributes().with_checks(false) {
            let attr = attr.map_err(|e| e.to_string())?;
            let raw_key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
            let key = quick_xml::escape::unescape(&raw_key)
                .map_err(|e| e.to_string())?
                .into_owned();
            let value = attr.unescape_value().map_err(|e| e.to_string())?.into_owned();
            attributes.push((key, value));
        }
        Ok(Self {
            name,
            attributes,
            children: Vec::new(),
        })
    }

    fn is_composite(&self) -> bool {
        self.name == DICT || self.name == LIST
    }
}

fn parse_tree(xml: &str) -> std::result::Result<Option<Element>, String> {
    let mut reader = Reader::from_str(xml);
    let mut stack: Vec<Element> = Vec::new();
    let mut root = None;
    loop {
        match reader.read_event().map_err(|e| e.to_string())? {
            Event::Start(start) => {
                if stack.len() >= MAX_DEPTH {
                    return Err(format!("elements nested deeper than {MAX_DEPTH} levels"));
                }
                stack.push(Element::from_start(&start)?);
            }
            Event::Empty(start) => attach(Element::from_start(&start)?, &mut stack, &mut root)?,
            Event::End(_) => {
                let element = stack.pop().ok_or("unexpected closing tag")?;
                attach(element, &mut stack, &mut root)?;
            }
            Event::Eof => break,
            _ => {}
        }
    }
    if let Some(open) = stack.last() {
        return Err(format!("unclosed element <{}>", open.name));
    }
    Ok(root)
}

fn attach(
    element: Element,
    stack: &mut [Element],
    root: &mut Option<Element>,
) -> std::result::Result<(), String> {
    match stack.last_mut() {
        Some(parent) => parent.children.push(element),
        None if root.is_some() => return Err("more than one root element".to_string()),
        None => *root = Some(element),
    }
    Ok(())
}

/// Write `element` as JSON. Returns `false` without writing if it is not a `Dict`
/// or `List`.
fn write_json(element: &Element, observer: &mut dyn Observer, out: &mut String) -> bool {
    match element.name.as_str() {
        DICT => {
            out.push('{');
            let mut first = true;
            for (key, token) in &element.attributes {
                push_separator(&mut first, out);
                push_json_string(key, false, out);
                out.push_str(": ");
                push_scalar(token, out);
            }
            for wrapper in &element.children {
                push_separator(&mut first, out);
                push_json_string(&wrapper.name, false, out);
                out.push_str(": ");
                write_wrapped(wrapper, observer, out);
            }
            out.push('}');
            true
        }
        LIST => {
            out.push('[');
            let mut first = true;
            for (token, _) in &element.attributes {
                push_separator(&mut first, out);
                push_scalar(token, out);
            }
            for child in &element.children {
                if !child.is_composite() {
                    observer.observe(Diagnostic::UnknownElement {
                        name: child.name.clone(),
                    });
                    continue;
                }
                push_separator(&mut first, out);
                write_json(child, observer, out);
            }
            out.push(']');
            true
        }
        _ => false,
    }
}

/// A `Dict` entry element wraps the nested `Dict`/`List` holding its value.
fn write_wrapped(wrapper: &Element, observer: &mut dyn Observer, out: &mut String) {
    match wrapper.children.iter().find(|child| child.is_composite()) {
        Some(inner) => {
            write_json(inner, observer, out);
        }
        None => {
            observer.observe(Diagnostic::MissingWrapperContent {
                key: wrapper.name.clone(),
            });
            out.push_str("null");
        }
    }
}

fn push_separator(first: &mut bool, out: &mut String) {
    if !*first {
        out.push_str(", ");
    }
    *first = false;
}

/// Inverse of `scalar_token`, written as JSON.
fn push_scalar(token: &str, out: &mut String) {
    if let Some(number) = token.strip_prefix('$').filter(|n| is_number_literal(n)) {
        out.push_str(number);
        return;
    }
    match token {
        NULL_TOKEN => out.push_str("null"),
        TRUE_TOKEN => out.push_str("true"),
        FALSE_TOKEN => out.push_str("false"),
        _ => push_json_string(token, false, out),
    }
}

/// Numeric tokens follow the JSON number grammar exactly.
fn is_number_literal(s: &str) -> bool {
    s.parse::<Number>().is_ok()
}
