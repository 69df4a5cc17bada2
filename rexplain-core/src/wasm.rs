//! WebAssembly bindings for JavaScript
//!
//! This module exposes the explainer and block formatter to browsers and
//! Node.js. Enable with the "wasm" feature flag.

use wasm_bindgen::prelude::*;

use crate::fragment::Fragment;

fn set(target: &js_sys::Object, key: &str, value: &JsValue) -> Result<(), JsValue> {
    js_sys::Reflect::set(target, &JsValue::from_str(key), value).map(|_| ())
}

fn fragment_object(fragment: &Fragment) -> Result<js_sys::Object, JsValue> {
    let obj = js_sys::Object::new();
    set(&obj, "sourceText", &JsValue::from_str(&fragment.source_text))?;
    set(&obj, "explanation", &JsValue::from_str(&fragment.explanation))?;
    set(&obj, "depth", &JsValue::from_f64(fragment.depth as f64))?;
    Ok(obj)
}

fn fragment_array(fragments: &[Fragment]) -> Result<js_sys::Array, JsValue> {
    let array = js_sys::Array::new();
    for fragment in fragments {
        array.push(&fragment_object(fragment)?.into());
    }
    Ok(array)
}

/// Explain a pattern and its flags
///
/// Returns `{ fragments, flagFragments }`, or throws the compiler diagnostic
/// when the pattern is invalid.
#[wasm_bindgen(js_name = explain)]
pub fn explain(pattern: &str, flags: &str) -> Result<js_sys::Object, JsValue> {
    let explanation =
        crate::explain(pattern, flags).map_err(|e| JsValue::from_str(&e.to_string()))?;

    let obj = js_sys::Object::new();
    set(&obj, "fragments", &fragment_array(&explanation.fragments)?.into())?;
    set(
        &obj,
        "flagFragments",
        &fragment_array(&explanation.flag_fragments)?.into(),
    )?;
    Ok(obj)
}

/// Explain a flag string on its own
#[wasm_bindgen(js_name = explainFlags)]
pub fn explain_flags(flags: &str) -> Result<js_sys::Array, JsValue> {
    fragment_array(&crate::explain_flags(flags))
}

/// Render a JSON block document as a pattern
#[wasm_bindgen(js_name = formatBlocks)]
pub fn format_blocks(json: &str) -> Result<String, JsValue> {
    crate::blocks_from_json(json)
        .map(|blocks| crate::format_blocks(&blocks))
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Initialize panic hook for better error messages in WASM
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
}
