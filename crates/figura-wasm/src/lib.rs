//! WASM bindings for figura-core.
//!
//! Exposes the JSON/XML conversions as `#[wasm_bindgen]` functions callable from
//! JavaScript/TypeScript. Diagnostics go through the `log` facade and are dropped
//! unless the host installs a logger.
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p figura-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target nodejs --out-dir pkg/ \
//!   target/wasm32-unknown-unknown/release/figura_wasm.wasm
//! ```

use wasm_bindgen::prelude::*;

/// Convert a JSON object or array into the XML document form.
///
/// Throws a JS error if the input is not valid JSON or its root is a scalar.
#[wasm_bindgen(js_name = jsonToXml)]
pub fn json_to_xml(json: &str) -> std::result::Result<String, JsValue> {
    figura_core::json_to_xml(json)
        .map_err(|e| JsValue::from_str(&e.to_string()))?
        .ok_or_else(|| JsValue::from_str("input must be a JSON object or array"))
}

/// Convert an XML document back into JSON text.
///
/// Throws a JS error if the XML is malformed or its root is not `Dict`/`List`.
#[wasm_bindgen(js_name = xmlToJson)]
pub fn xml_to_json(xml: &str) -> std::result::Result<String, JsValue> {
    figura_core::xml_to_json(xml)
        .ok_or_else(|| JsValue::from_str("input is not a well-formed Dict/List XML document"))
}

/// Decode JSON into typed values and encode it again in canonical spacing.
#[wasm_bindgen(js_name = normalizeJson)]
pub fn normalize_json(json: &str) -> std::result::Result<String, JsValue> {
    let value = figura_core::json_to_value(json).map_err(|e| JsValue::from_str(&e.to_string()))?;
    if value.is_null() {
        return Err(JsValue::from_str("input must be a JSON object or array"));
    }
    Ok(figura_core::value_to_json(&value))
}
