use super::with_mounted;
use crate::dom;
use crate::mount::Mounted;
use plasma_core::{Disposer, Transition};
use std::cell::RefCell;
use std::rc::Weak;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Container size changes are coalesced into the next rendered frame.
pub fn wire_resize(
    disposer: &mut Disposer,
    container: &web::HtmlElement,
    weak: Weak<RefCell<Mounted>>,
) -> anyhow::Result<()> {
    let closure = Closure::wrap(Box::new(move |_entries: js_sys::Array, _obs: web::ResizeObserver| {
        with_mounted(&weak, |m| m.surface.mark_resize());
    }) as Box<dyn FnMut(js_sys::Array, web::ResizeObserver)>);
    let observer =
        web::ResizeObserver::new(closure.as_ref().unchecked_ref()).map_err(dom::js_err)?;
    observer.observe(container);
    disposer.push("resize-observer", move || {
        observer.disconnect();
        drop(closure);
    });
    Ok(())
}

/// Suspend while the anchor section is scrolled out of view.
pub fn wire_intersection(
    disposer: &mut Disposer,
    anchor: &web::Element,
    weak: Weak<RefCell<Mounted>>,
) -> anyhow::Result<()> {
    let closure = Closure::wrap(Box::new(
        move |entries: js_sys::Array, _obs: web::IntersectionObserver| {
            // the most recent entry wins when several are batched
            let Some(entry) = entries
                .iter()
                .last()
                .and_then(|e| e.dyn_into::<web::IntersectionObserverEntry>().ok())
            else {
                return;
            };
            let intersecting = entry.is_intersecting();
            let now = dom::now();
            with_mounted(&weak, |m| {
                let Mounted { surface, raf, .. } = m;
                let t = surface
                    .controller
                    .scheduler_mut()
                    .set_anchor_intersecting(intersecting, now, raf);
                if t != Transition::Unchanged {
                    log::debug!("[sched] anchor intersecting={intersecting} -> {t:?}");
                }
            });
        },
    ) as Box<dyn FnMut(js_sys::Array, web::IntersectionObserver)>);
    let observer =
        web::IntersectionObserver::new(closure.as_ref().unchecked_ref()).map_err(dom::js_err)?;
    observer.observe(anchor);
    disposer.push("intersection-observer", move || {
        observer.disconnect();
        drop(closure);
    });
    Ok(())
}
