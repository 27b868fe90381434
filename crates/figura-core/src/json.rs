//! JSON encoder and decoder for the value model.
//!
//! Encoding walks the [`Value`] tree depth-first and writes text directly. Decoding is
//! two-phase: `serde_json` parses the text into a generic node tree, then a
//! rehydration pass turns nodes into typed values:
//!
//! - strings run through the extended-type decoder (`$p$3,4` → `Point`)
//! - integers take the narrowest width that holds them (`42` → `Int16`)
//! - numbers written with a fraction or exponent become `Float`
//!
//! Only `[...]` and `{...}` documents are accepted; any other top level decodes to
//! `Null`.
//!
//! # Example
//! ```
//! use figura_core::{json_to_value, value_to_json, Point, Value};
//!
//! let value: Value = [("pos", Value::Point(Point::new(5, -5)))].into_iter().collect();
//! let json = value_to_json(&value);
//! assert_eq!(json, r#"{"pos": "$p$5,-5"}"#);
//! assert_eq!(json_to_value(&json).unwrap(), value);
//! ```

use crate::error::{CodecError, Result};
use crate::escape::push_json_string;
use crate::extended;
use crate::observer::{Diagnostic, LogObserver, Observer};
use crate::value::Value;
use serde_json::{Number, Value as Node};

/// Encode a value as JSON text, logging any unrepresentable values.
pub fn value_to_json(value: &Value) -> String {
    value_to_json_with(value, &mut LogObserver)
}

/// Encode a value as JSON text.
///
/// Lists and maps use `", "` between items and `": "` after keys. A non-finite float
/// has no JSON form: it is written as an inline `(unrepresentable ...)` marker and
/// reported to `observer`, and the rest of the tree is still encoded.
pub fn value_to_json_with(value: &Value, observer: &mut dyn Observer) -> String {
    let mut out = String::new();
    encode_value(value, observer, &mut out);
    out
}

fn encode_value(value: &Value, observer: &mut dyn Observer, out: &mut String) {
    match value {
        Value::Null => out.push_str("null"),
        Value::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        Value::Int16(n) => out.push_str(&n.to_string()),
        Value::Int32(n) => out.push_str(&n.to_string()),
        Value::Int64(n) => out.push_str(&n.to_string()),
        Value::Float(f) => encode_float(*f, observer, out),
        Value::String(s) => push_json_string(s, true, out),
        Value::Point(p) => push_json_string(&extended::encode_point(p), false, out),
        Value::PointList(points) => {
            push_json_string(&extended::encode_point_list(points), false, out)
        }
        Value::Color(c) => push_json_string(&extended::encode_color(c), false, out),
        Value::Thickness(t) => push_json_string(&extended::encode_thickness(t), false, out),
        Value::List(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                encode_value(item, observer, out);
            }
            out.push(']');
        }
        Value::Map(entries) => {
            out.push('{');
            for (i, (key, item)) in entries.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                // Keys are never sentinel-decoded, so `$` stays literal.
                push_json_string(key, false, out);
                out.push_str(": ");
                encode_value(item, observer, out);
            }
            out.push('}');
        }
    }
}

/// Floats always carry a `.` or an exponent (`1.0`, `1e300`) so the decoder reads
/// them back as floats.
fn encode_float(f: f64, observer: &mut dyn Observer, out: &mut String) {
    if f.is_finite() {
        out.push_str(&format!("{f:?}"));
    } else {
        observer.observe(Diagnostic::Unrepresentable {
            value: f.to_string(),
        });
        out.push_str(&format!("(unrepresentable {f})"));
    }
}

/// Decode JSON text into a value.
///
/// Returns `Ok(Value::Null)` when the first non-whitespace character is neither `[`
/// nor `{`. Fails when the document is not valid JSON or an extended-type payload is
/// malformed; a bad payload anywhere fails the whole decode.
pub fn json_to_value(json: &str) -> Result<Value> {
    match parse_document(json)? {
        Some(node) => rehydrate(node),
        None => Ok(Value::Null),
    }
}

/// Parse a `[...]` or `{...}` document into a generic node tree.
pub(crate) fn parse_document(json: &str) -> Result<Option<Node>> {
    let trimmed = json.trim();
    match trimmed.chars().next() {
        Some('[') | Some('{') => Ok(Some(serde_json::from_str(trimmed)?)),
        first => {
            log::debug!("ignoring JSON document starting with {first:?}");
            Ok(None)
        }
    }
}

fn rehydrate(node: Node) -> Result<Value> {
    Ok(match node {
        Node::Null => Value::Null,
        Node::Bool(b) => Value::Bool(b),
        Node::Number(n) => rehydrate_number(&n)?,
        Node::String(s) => extended::decode_string(&s)?,
        Node::Array(items) => Value::List(
            items
                .into_iter()
                .map(rehydrate)
                .collect::<Result<Vec<_>>>()?,
        ),
        Node::Object(map) => Value::Map(
            map.into_iter()
                .map(|(key, item)| Ok((key, rehydrate(item)?)))
                .collect::<Result<Vec<_>>>()?,
        ),
    })
}

/// Number literals keep their source text: a fraction or exponent marks a float, and
/// anything else is an integer (`-0` included). Integers beyond the 64-bit signed range
/// fall back to `Float`; literals beyond the `f64` range are malformed.
fn rehydrate_number(n: &Number) -> Result<Value> {
    let literal = n.to_string();
    if !literal.contains(['.', 'e', 'E']) {
        if let Ok(wide) = literal.parse::<i64>() {
            return Ok(Value::narrowest_int(wide));
        }
    }
    literal
        .parse::<f64>()
        .ok()
        .filter(|f| f.is_finite())
        .map(Value::Float)
        .ok_or_else(|| CodecError::malformed(literal, "JSON number"))
}
