use crate::constants::*;
use plasma_core::{direction_or_default, RenderConfig};
use wasm_bindgen::JsValue;

fn field(options: &JsValue, key: &str) -> Option<JsValue> {
    if !options.is_object() {
        return None;
    }
    js_sys::Reflect::get(options, &JsValue::from_str(key))
        .ok()
        .filter(|v| !v.is_undefined() && !v.is_null())
}

fn apply_fields(config: &mut RenderConfig, options: &JsValue) {
    if let Some(v) = field(options, OPT_COLOR) {
        // an explicit empty string turns the tint off
        config.color = v.as_string();
    }
    if let Some(v) = field(options, OPT_SPEED).and_then(|v| v.as_f64()) {
        config.speed = v as f32;
    }
    if let Some(v) = field(options, OPT_DIRECTION) {
        config.direction = direction_or_default(v.as_string().as_deref());
    }
    if let Some(v) = field(options, OPT_SCALE).and_then(|v| v.as_f64()) {
        config.scale = v as f32;
    }
    if let Some(v) = field(options, OPT_OPACITY).and_then(|v| v.as_f64()) {
        config.opacity = v as f32;
    }
    if let Some(v) = field(options, OPT_MOUSE_INTERACTIVE).and_then(|v| v.as_bool()) {
        config.mouse_interactive = v;
    }
}

/// Read mount options from a plain JS object. Missing or mistyped fields
/// keep their defaults.
pub fn read_config(options: &JsValue) -> RenderConfig {
    let mut config = RenderConfig::default();
    apply_fields(&mut config, options);
    config.sanitized()
}

/// Apply a partial update on top of the current config.
pub fn merge_config(current: &RenderConfig, options: &JsValue) -> RenderConfig {
    let mut next = current.clone();
    apply_fields(&mut next, options);
    next.sanitized()
}

pub fn page_options() -> JsValue {
    let obj = js_sys::Object::new();
    let set = |k: &str, v: JsValue| {
        let _ = js_sys::Reflect::set(&obj, &JsValue::from_str(k), &v);
    };
    set(OPT_COLOR, JsValue::from_str(PAGE_COLOR));
    set(OPT_SPEED, JsValue::from_f64(PAGE_SPEED as f64));
    set(OPT_DIRECTION, JsValue::from_str("forward"));
    set(OPT_SCALE, JsValue::from_f64(PAGE_SCALE as f64));
    set(OPT_OPACITY, JsValue::from_f64(PAGE_OPACITY as f64));
    set(OPT_MOUSE_INTERACTIVE, JsValue::from_bool(PAGE_MOUSE_INTERACTIVE));
    obj.into()
}
