use super::{listen, with_mounted};
use crate::dom;
use crate::mount::Mounted;
use plasma_core::{Disposer, Transition};
use std::cell::RefCell;
use std::rc::Weak;
use web_sys as web;

pub fn wire(
    disposer: &mut Disposer,
    document: &web::Document,
    weak: Weak<RefCell<Mounted>>,
) -> anyhow::Result<()> {
    let doc = document.clone();
    listen(disposer, "visibility", document, "visibilitychange", move |_| {
        let visible = !doc.hidden();
        let now = dom::now();
        with_mounted(&weak, |m| {
            let Mounted { surface, raf, .. } = m;
            let t = surface
                .controller
                .scheduler_mut()
                .set_document_visible(visible, now, raf);
            if t != Transition::Unchanged {
                log::debug!("[sched] visibility={visible} -> {t:?}");
            }
        });
    })
}
