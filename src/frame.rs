use crate::mount::Mounted;
use instant::Instant;
use plasma_core::{FrameRequester, Tick};
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

/// `requestAnimationFrame` behind the scheduler's [`FrameRequester`] seam.
pub struct RafHost {
    window: web::Window,
    callback: FrameCallback,
}

impl RafHost {
    pub fn new(window: web::Window) -> Self {
        Self {
            window,
            callback: Rc::new(RefCell::new(None)),
        }
    }

    /// Drop the frame closure. Any callback already queued by the browser
    /// is cancelled by the scheduler before this runs.
    pub fn release(&mut self) {
        self.callback.borrow_mut().take();
    }
}

impl FrameRequester for RafHost {
    fn request(&mut self) -> Option<i32> {
        let cb = self.callback.borrow();
        let cb = cb.as_ref()?;
        self.window
            .request_animation_frame(cb.as_ref().unchecked_ref())
            .ok()
    }

    fn cancel(&mut self, id: i32) {
        let _ = self.window.cancel_animation_frame(id);
    }
}

/// Install the per-refresh closure. It holds only a weak handle so the
/// mounted instance is freed by teardown.
pub fn install(mounted: &Rc<RefCell<Mounted>>) {
    let weak: Weak<RefCell<Mounted>> = Rc::downgrade(mounted);
    let slot = mounted.borrow().raf.callback.clone();
    *slot.borrow_mut() = Some(Closure::wrap(Box::new(move |now_ms: f64| {
        let Some(mounted) = weak.upgrade() else {
            return;
        };
        let Ok(mut m) = mounted.try_borrow_mut() else {
            return;
        };
        tick(&mut m, now_ms);
    }) as Box<dyn FnMut(f64)>));
}

fn tick(m: &mut Mounted, now_ms: f64) {
    let Mounted { surface, raf, .. } = m;
    let time_sec = match surface.controller.scheduler_mut().on_frame(now_ms, raf) {
        Tick::Idle | Tick::Skip => return,
        Tick::Render { time_sec } => time_sec,
    };

    let started = Instant::now();
    if !surface.render(time_sec) {
        return;
    }
    let cost_ms = started.elapsed().as_secs_f64() * 1000.0;

    if let Some(adj) = surface.controller.scheduler_mut().record_frame(cost_ms) {
        surface.apply_adjustment(adj);
    }
}
