use crate::constants::{CANVAS_STYLE, PREFERENCE_STORAGE_KEY, REDUCED_MOTION_QUERY};
use plasma_core::{resolve_enabled, Environment};
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

#[inline]
pub fn window_document() -> Option<(web::Window, web::Document)> {
    let window = web::window()?;
    let document = window.document()?;
    Some((window, document))
}

#[inline]
pub fn js_err(e: JsValue) -> anyhow::Error {
    anyhow::anyhow!("{:?}", e)
}

/// Milliseconds on the same clock `requestAnimationFrame` reports.
#[inline]
pub fn now_ms(window: &web::Window) -> f64 {
    window.performance().map(|p| p.now()).unwrap_or(0.0)
}

pub fn environment(window: &web::Window) -> Environment {
    let viewport_width = window
        .inner_width()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0);
    let has_touch_events =
        js_sys::Reflect::has(window, &JsValue::from_str("ontouchstart")).unwrap_or(false);
    Environment {
        viewport_width,
        device_pixel_ratio: window.device_pixel_ratio(),
        max_touch_points: window.navigator().max_touch_points(),
        has_touch_events,
    }
}

pub fn prefers_reduced_motion(window: &web::Window) -> bool {
    window
        .match_media(REDUCED_MOTION_QUERY)
        .ok()
        .flatten()
        .map(|m| m.matches())
        .unwrap_or(false)
}

pub fn stored_preference(window: &web::Window) -> Option<String> {
    window
        .local_storage()
        .ok()
        .flatten()
        .and_then(|s| s.get_item(PREFERENCE_STORAGE_KEY).ok().flatten())
}

pub fn effect_enabled(window: &web::Window) -> bool {
    let stored = stored_preference(window);
    resolve_enabled(stored.as_deref(), prefers_reduced_motion(window))
}

/// CSS size of the element, as laid out.
#[inline]
pub fn css_size(el: &web::Element) -> (f64, f64) {
    let rect = el.get_bounding_client_rect();
    (rect.width(), rect.height())
}

pub fn create_canvas(
    document: &web::Document,
    container: &web::HtmlElement,
) -> anyhow::Result<web::HtmlCanvasElement> {
    let canvas: web::HtmlCanvasElement = document
        .create_element("canvas")
        .map_err(js_err)?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    let style = canvas.style();
    for (prop, value) in CANVAS_STYLE {
        style.set_property(prop, value).map_err(js_err)?;
    }
    canvas.set_width(1);
    canvas.set_height(1);
    container.append_child(&canvas).map_err(js_err)?;
    Ok(canvas)
}

#[inline]
pub fn now() -> f64 {
    web::window().map(|w| now_ms(&w)).unwrap_or(0.0)
}
