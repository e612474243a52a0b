pub mod observers;
pub mod pointer;
pub mod viewport;
pub mod visibility;

use crate::dom;
use crate::mount::Mounted;
use plasma_core::Disposer;
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Run `f` against the mounted instance if it is still alive and not
/// already borrowed by the frame loop.
pub(crate) fn with_mounted(weak: &Weak<RefCell<Mounted>>, f: impl FnOnce(&mut Mounted)) {
    let Some(mounted) = weak.upgrade() else {
        return;
    };
    let Ok(mut m) = mounted.try_borrow_mut() else {
        return;
    };
    f(&mut m);
}

/// Add a passive listener and register its removal.
pub(crate) fn listen(
    disposer: &mut Disposer,
    label: &'static str,
    target: &web::EventTarget,
    event: &'static str,
    handler: impl FnMut(web::Event) + 'static,
) -> anyhow::Result<()> {
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(web::Event)>);
    let opts = web::AddEventListenerOptions::new();
    opts.set_passive(true);
    target
        .add_event_listener_with_callback_and_add_event_listener_options(
            event,
            closure.as_ref().unchecked_ref(),
            &opts,
        )
        .map_err(dom::js_err)?;
    let target = target.clone();
    disposer.push(label, move || {
        let _ = target.remove_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
        drop(closure);
    });
    Ok(())
}

pub fn wire_all(
    mounted: &Rc<RefCell<Mounted>>,
    window: &web::Window,
    document: &web::Document,
    container: &web::HtmlElement,
    anchor: Option<&web::Element>,
) -> anyhow::Result<()> {
    let weak = Rc::downgrade(mounted);
    let mut m = mounted.borrow_mut();
    let disposer = &mut m.disposer;
    visibility::wire(disposer, document, weak.clone())?;
    observers::wire_resize(disposer, container, weak.clone())?;
    if let Some(anchor) = anchor {
        observers::wire_intersection(disposer, anchor, weak.clone())?;
    }
    pointer::wire(disposer, window, container, weak.clone())?;
    viewport::wire(disposer, window, weak)?;
    Ok(())
}
