//! Value ⇄ XML conversions, always routed through JSON text.
//!
//! There is no direct value-to-XML transform: `value_to_xml` is `value_to_json`
//! followed by `json_to_xml`, and `xml_to_value` is `xml_to_json` followed by
//! `json_to_value`. Both directions therefore share the JSON path's extended-type
//! tagging and integer-width inference.

use crate::error::Result;
use crate::json::{json_to_value, value_to_json_with};
use crate::observer::{LogObserver, Observer};
use crate::value::Value;
use crate::xml::{json_to_xml_with, xml_to_json_with};

/// Encode a value as XML, logging diagnostics.
pub fn value_to_xml(value: &Value) -> Result<Option<String>> {
    value_to_xml_with(value, &mut LogObserver)
}

/// Encode a value as XML.
///
/// Returns `Ok(None)` for scalar values, which have no XML form. Map entries whose
/// key is not an XML name are left out and reported to `observer`. Fails if the
/// intermediate JSON is unreadable, which happens when the tree holds an
/// unrepresentable float.
pub fn value_to_xml_with(value: &Value, observer: &mut dyn Observer) -> Result<Option<String>> {
    let json = value_to_json_with(value, observer);
    json_to_xml_with(&json, observer)
}

/// Decode XML into a value, logging diagnostics.
pub fn xml_to_value(xml: &str) -> Result<Value> {
    xml_to_value_with(xml, &mut LogObserver)
}

/// Decode XML into a value. Malformed XML, or a root that is not `Dict`/`List`,
/// decodes to `Null`.
pub fn xml_to_value_with(xml: &str, observer: &mut dyn Observer) -> Result<Value> {
    match xml_to_json_with(xml, observer) {
        Some(json) => json_to_value(&json),
        None => Ok(Value::Null),
    }
}
