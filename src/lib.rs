#![cfg(target_arch = "wasm32")]
use crate::constants::{ANCHOR_ID, CONTAINER_ID};
use crate::mount::Mounted;
use plasma_core::{page_shows_background, RunState};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod constants;
mod dom;
mod events;
mod frame;
mod mount;
mod options;
mod render;
mod surface;

thread_local! {
    // the page's own background lives as long as the page
    static PAGE_BACKGROUND: RefCell<Option<PlasmaBackground>> = const { RefCell::new(None) };
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("plasma-web starting");

    spawn_local(async move {
        if let Err(e) = compose_page().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

/// Mount onto the page's background container, anchored to the hero section.
async fn compose_page() -> anyhow::Result<()> {
    let (window, document) =
        dom::window_document().ok_or_else(|| anyhow::anyhow!("no window/document"))?;
    if !page_shows_background(&dom::environment(&window)) {
        log::info!("[plasma] skipped on this viewport");
        return Ok(());
    }
    let Some(container) = document.get_element_by_id(CONTAINER_ID) else {
        log::info!("[plasma] no #{CONTAINER_ID} on this page");
        return Ok(());
    };
    let container: web::HtmlElement = container
        .dyn_into::<web::HtmlElement>()
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    let anchor = document.get_element_by_id(ANCHOR_ID);
    let handle = PlasmaBackground::mount(container, anchor, options::page_options()).await;
    PAGE_BACKGROUND.with(|slot| *slot.borrow_mut() = Some(handle));
    Ok(())
}

/// Handle to a mounted plasma background. An inert handle (effect disabled
/// or initialization failed) accepts every call and does nothing.
#[wasm_bindgen]
pub struct PlasmaBackground {
    inner: Option<Rc<RefCell<Mounted>>>,
}

#[wasm_bindgen]
impl PlasmaBackground {
    /// Never rejects: failures are logged and yield an inert handle.
    pub async fn mount(
        container: web::HtmlElement,
        anchor: Option<web::Element>,
        options: JsValue,
    ) -> PlasmaBackground {
        match mount::mount(&container, anchor.as_ref(), &options).await {
            Ok(inner) => PlasmaBackground { inner },
            Err(e) => {
                log::error!("[plasma] init failed: {:?}", e);
                PlasmaBackground { inner: None }
            }
        }
    }

    /// Patch color, speed, direction, scale, opacity or interactivity.
    pub fn update(&self, options: JsValue) {
        let Some(inner) = &self.inner else {
            return;
        };
        let Ok(mut m) = inner.try_borrow_mut() else {
            return;
        };
        let next = options::merge_config(m.surface.controller.config(), &options);
        m.surface.update(next);
    }

    pub fn teardown(&mut self) {
        if let Some(inner) = self.inner.take() {
            if let Ok(mut m) = inner.try_borrow_mut() {
                m.teardown();
            }
        }
    }

    #[wasm_bindgen(js_name = isActive)]
    pub fn is_active(&self) -> bool {
        self.inner.is_some()
    }

    pub fn state(&self) -> String {
        let state = self
            .inner
            .as_ref()
            .and_then(|m| m.try_borrow().ok().map(|m| m.state()));
        match state {
            Some(RunState::Running) => "running",
            Some(RunState::Suspended) => "suspended",
            Some(RunState::Stopped) => "stopped",
            None => "inactive",
        }
        .to_string()
    }
}
