//! # figura-core
//!
//! Schema-less serialization of a tagged value tree to and from JSON and XML.
//!
//! Besides the usual JSON types, a [`Value`] can hold four domain types with no native
//! JSON or XML form: points, point lists, colors and thickness quads. They travel as
//! sentinel-prefixed strings (`"$p$5,-5"`) and are restored to typed values on decode.
//! Integers decode to the narrowest of three widths that holds them.
//!
//! ## Quick start
//!
//! ```rust
//! use figura_core::{json_to_value, value_to_json, value_to_xml, xml_to_value, Point, Value};
//!
//! let value: Value = [
//!     ("pos", Value::Point(Point::new(5, -5))),
//!     ("tags", Value::List(vec!["a".into(), "b".into()])),
//! ]
//! .into_iter()
//! .collect();
//!
//! // Value → JSON
//! let json = value_to_json(&value);
//! assert_eq!(json, r#"{"pos": "$p$5,-5", "tags": ["a", "b"]}"#);
//! assert_eq!(json_to_value(&json).unwrap(), value);
//!
//! // Value → XML, routed through JSON
//! let xml = value_to_xml(&value).unwrap().unwrap();
//! assert_eq!(xml_to_value(&xml).unwrap(), value);
//! ```
//!
//! ## Modules
//!
//! - [`value`] — the `Value` tree and the extended types
//! - [`escape`] — JSON and XML string escaping
//! - [`extended`] — sentinel encoding of extended types
//! - [`json`] — `Value` ⇄ JSON text
//! - [`xml`] — JSON text ⇄ XML text
//! - [`pivot`] — `Value` ⇄ XML text via JSON
//! - [`observer`] — diagnostics for lossy but non-fatal events
//! - [`guarded`] — a text-editable point with a validity flag
//! - [`error`] — error types for decode failures

pub mod error;
pub mod escape;
pub mod extended;
pub mod guarded;
pub mod json;
pub mod observer;
pub mod pivot;
pub mod value;
pub mod xml;

pub use error::CodecError;
pub use guarded::GuardedPoint;
pub use json::{json_to_value, value_to_json, value_to_json_with};
pub use observer::{Diagnostic, LogObserver, Observer};
pub use pivot::{value_to_xml, value_to_xml_with, xml_to_value, xml_to_value_with};
pub use value::{Color, Point, Thickness, Value};
pub use xml::{
    json_to_xml, json_to_xml_with, node_to_xml, node_to_xml_with, xml_to_json, xml_to_json_with,
};
