//! Reflect-based accessors for browser globals.
//!
//! Many of the properties probed here (`deviceMemory`, `connection`,
//! `getBattery`, `queryLocalFonts`) are non-standard or Chromium-only and
//! have no typed `web-sys` binding, so they are read by name.

use js_sys::{Array, Function, Reflect};
use serde::Serialize;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use crate::error::{ProbeError, Result};

/// Get a property from the global scope.
pub fn get_global(prop: &str) -> Result<JsValue> {
    Ok(Reflect::get(&js_sys::global(), &JsValue::from_str(prop))?)
}

/// `prop in globalThis`
pub fn has_global(prop: &str) -> bool {
    Reflect::has(&js_sys::global(), &JsValue::from_str(prop)).unwrap_or(false)
}

/// `prop in obj`
pub fn has_prop(obj: &JsValue, prop: &str) -> bool {
    obj.is_object() && Reflect::has(obj, &JsValue::from_str(prop)).unwrap_or(false)
}

/// Property value, with `undefined` and `null` collapsed to `None`.
pub fn get_prop(obj: &JsValue, prop: &str) -> Option<JsValue> {
    Reflect::get(obj, &JsValue::from_str(prop))
        .ok()
        .filter(|v| !v.is_undefined() && !v.is_null())
}

pub fn number_prop(obj: &JsValue, prop: &str) -> Option<f64> {
    get_prop(obj, prop).and_then(|v| v.as_f64())
}

pub fn string_prop(obj: &JsValue, prop: &str) -> Option<String> {
    get_prop(obj, prop).and_then(|v| v.as_string())
}

pub fn bool_prop(obj: &JsValue, prop: &str) -> Option<bool> {
    get_prop(obj, prop).and_then(|v| v.as_bool())
}

/// Call `obj[method]()` with `obj` as `this`.
pub fn call_method(obj: &JsValue, method: &str, args: &Array) -> Result<JsValue> {
    let func: Function = Reflect::get(obj, &JsValue::from_str(method))?
        .dyn_into()
        .map_err(|_| ProbeError::Unavailable(format!("{} is not a function", method)))?;
    Ok(Reflect::apply(&func, obj, args)?)
}

/// `new globalThis[name]()`
pub fn construct_global(name: &str) -> Result<JsValue> {
    let ctor: Function = get_global(name)?
        .dyn_into()
        .map_err(|_| ProbeError::Unavailable(format!("{} is not a constructor", name)))?;
    Ok(Reflect::construct(&ctor, &Array::new())?)
}

/// Convert a `getParameter` result to JSON. Typed arrays (ranges,
/// viewport dims) become number arrays.
pub fn to_json(value: &JsValue) -> serde_json::Value {
    if let Some(n) = value.as_f64() {
        return serde_json::Number::from_f64(n)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null);
    }
    if let Some(s) = value.as_string() {
        return serde_json::Value::String(s);
    }
    if let Some(b) = value.as_bool() {
        return serde_json::Value::Bool(b);
    }
    if js_sys::ArrayBuffer::is_view(value) || Array::is_array(value) {
        let items = Array::from(value)
            .iter()
            .map(|item| to_json(&item))
            .collect();
        return serde_json::Value::Array(items);
    }
    serde_json::Value::Null
}

/// Serialize to a plain JS object: maps become objects, not `Map`s.
pub fn to_plain_object<T: Serialize>(value: &T) -> std::result::Result<JsValue, JsValue> {
    let serializer = serde_wasm_bindgen::Serializer::json_compatible();
    value
        .serialize(&serializer)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}
