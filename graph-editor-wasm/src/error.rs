// Result objects returned across the JS boundary:
// `{ ok: true, value }` or `{ ok: false, error: { code, message, data? } }`.

use js_sys::{Object, Reflect};
use wasm_bindgen::prelude::*;

fn object(fields: &[(&str, JsValue)]) -> JsValue {
    let obj = Object::new();
    for (key, value) in fields {
        let _ = Reflect::set(&obj, &JsValue::from_str(key), value);
    }
    obj.into()
}

pub fn success(value: JsValue) -> JsValue {
    object(&[("ok", JsValue::TRUE), ("value", value)])
}

fn failure(code: &str, message: String, data: Option<JsValue>) -> JsValue {
    let mut detail = vec![("code", JsValue::from_str(code)), ("message", JsValue::from_str(&message))];
    if let Some(d) = data { detail.push(("data", d)); }
    object(&[("ok", JsValue::FALSE), ("error", object(&detail))])
}

/// A name argument (mode, node type, colour) outside the accepted set.
pub fn invalid_value(param: &str, got: &str) -> JsValue {
    let data = object(&[("param", JsValue::from_str(param)), ("got", JsValue::from_str(got))]);
    failure("invalid_value", format!("unrecognised value for '{}'", param), Some(data))
}

pub fn not_permitted(action: &str) -> JsValue {
    let data = object(&[("action", JsValue::from_str(action))]);
    failure("not_permitted", format!("{} is not permitted for the current selection", action), Some(data))
}

pub fn invalid_config(message: String) -> JsValue { failure("invalid_config", message, None) }

pub fn no_context() -> JsValue { failure("no_context", "canvas has no 2d context".to_string(), None) }

/// Serialises `v` into a success object, or a `serialize` failure.
pub fn to_js<T: serde::Serialize + ?Sized>(v: &T) -> JsValue {
    match serde_wasm_bindgen::to_value(v) {
        Ok(v) => success(v),
        Err(e) => failure("serialize", e.to_string(), None),
    }
}
