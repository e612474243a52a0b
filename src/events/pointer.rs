use super::{listen, with_mounted};
use crate::dom;
use crate::mount::Mounted;
use glam::Vec2;
use plasma_core::Disposer;
use std::cell::RefCell;
use std::rc::Weak;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Pointer position relative to the container, in CSS pixels.
#[inline]
fn container_px(ev: &web::MouseEvent, container: &web::HtmlElement) -> Vec2 {
    let rect = container.get_bounding_client_rect();
    Vec2::new(
        (ev.client_x() as f64 - rect.left()) as f32,
        (ev.client_y() as f64 - rect.top()) as f32,
    )
}

// The canvas does not take pointer events, so listen on the window.
pub fn wire(
    disposer: &mut Disposer,
    window: &web::Window,
    container: &web::HtmlElement,
    weak: Weak<RefCell<Mounted>>,
) -> anyhow::Result<()> {
    let container = container.clone();
    listen(disposer, "pointer", window, "pointermove", move |ev| {
        let Some(ev) = ev.dyn_ref::<web::MouseEvent>() else {
            return;
        };
        let now = dom::now();
        with_mounted(&weak, |m| {
            if !m.surface.controller.config().mouse_interactive {
                return;
            }
            let pos = container_px(ev, &container);
            m.surface.controller.on_pointer_move(pos, now);
        });
    })
}
