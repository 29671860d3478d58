//! Error conversion for JavaScript callers.
//!
//! Every failure crosses the boundary as a JS `Error` carrying the
//! `Display` message, so callers can `catch (e) { e.message }`.

use std::fmt::Display;

use wasm_bindgen::JsValue;

/// Convert any displayable error into a thrown JS `Error`.
pub(crate) fn to_js_error(err: impl Display) -> JsValue {
    js_sys::Error::new(&err.to_string()).into()
}

/// Serialize `value` for JavaScript. Maps and structs become plain objects.
pub(crate) fn to_js_value<T: serde::Serialize>(value: &T) -> Result<JsValue, JsValue> {
    let serializer = serde_wasm_bindgen::Serializer::new().serialize_maps_as_objects(true);
    value.serialize(&serializer).map_err(to_js_error)
}
