use super::{listen, with_mounted};
use crate::constants::VIEWPORT_EVENTS;
use crate::dom;
use crate::mount::Mounted;
use plasma_core::{DeviceProfile, Disposer};
use std::cell::RefCell;
use std::rc::Weak;
use web_sys as web;

/// Re-derive the device profile when the viewport changes shape.
pub fn wire(
    disposer: &mut Disposer,
    window: &web::Window,
    weak: Weak<RefCell<Mounted>>,
) -> anyhow::Result<()> {
    for &event in VIEWPORT_EVENTS {
        let weak = weak.clone();
        let win = window.clone();
        listen(disposer, "viewport", window, event, move |_| {
            let profile = DeviceProfile::from_environment(&dom::environment(&win));
            with_mounted(&weak, |m| m.surface.reprofile(profile));
        })?;
    }
    Ok(())
}
