use crate::dom;
use crate::events;
use crate::frame::{self, RafHost};
use crate::options;
use crate::surface::Surface;
use plasma_core::{DeviceProfile, Disposer, RunState};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsValue;
use web_sys as web;

pub struct Mounted {
    pub(crate) surface: Surface,
    pub(crate) raf: RafHost,
    pub(crate) disposer: Disposer,
}

impl Mounted {
    pub fn state(&self) -> RunState {
        self.surface.controller.scheduler().state()
    }

    /// Cancel the frame, release listeners and observers, remove the
    /// canvas. Safe to call more than once.
    pub fn teardown(&mut self) {
        if self.state() == RunState::Stopped {
            return;
        }
        let Mounted {
            surface,
            raf,
            disposer,
        } = self;
        surface.controller.scheduler_mut().stop(raf);
        let released = disposer.dispose_all();
        raf.release();
        surface.teardown();
        log::info!("[plasma] torn down ({released} cleanups)");
    }
}

impl Drop for Mounted {
    fn drop(&mut self) {
        self.teardown();
    }
}

/// Bring up a background inside `container`. `Ok(None)` means the effect is
/// disabled by preference.
pub async fn mount(
    container: &web::HtmlElement,
    anchor: Option<&web::Element>,
    options: &JsValue,
) -> anyhow::Result<Option<Rc<RefCell<Mounted>>>> {
    let (window, document) =
        dom::window_document().ok_or_else(|| anyhow::anyhow!("no window/document"))?;
    if !dom::effect_enabled(&window) {
        log::info!("[plasma] disabled by preference");
        return Ok(None);
    }

    let config = options::read_config(options);
    let profile = DeviceProfile::from_environment(&dom::environment(&window));
    let visible = !document.hidden();
    let now = dom::now_ms(&window);
    let surface = Surface::initialize(&document, container, config, profile, visible, now).await?;

    let mounted = Rc::new(RefCell::new(Mounted {
        surface,
        raf: RafHost::new(window.clone()),
        disposer: Disposer::new(),
    }));
    frame::install(&mounted);
    let wired = events::wire_all(&mounted, &window, &document, container, anchor);
    if let Err(e) = wired {
        mounted.borrow_mut().teardown();
        return Err(e);
    }

    {
        let mut m = mounted.borrow_mut();
        let Mounted { surface, raf, .. } = &mut *m;
        surface.controller.scheduler_mut().start(dom::now_ms(&window), raf);
    }
    log::info!(
        "[plasma] mounted ({} cleanups, anchor={})",
        mounted.borrow().disposer.len(),
        anchor.is_some()
    );
    Ok(Some(mounted))
}
