/// Cleanups registered by a mounted instance (listener removal, observer
/// disconnect, canvas removal). Each runs exactly once.
#[derive(Default)]
pub struct Disposer {
    cleanups: Vec<(&'static str, Box<dyn FnOnce()>)>,
}

impl Disposer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, label: &'static str, cleanup: impl FnOnce() + 'static) {
        self.cleanups.push((label, Box::new(cleanup)));
    }

    pub fn len(&self) -> usize {
        self.cleanups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cleanups.is_empty()
    }

    /// Run every cleanup, most recent first. Later calls do nothing.
    pub fn dispose_all(&mut self) -> usize {
        let mut ran = 0;
        while let Some((label, cleanup)) = self.cleanups.pop() {
            log::trace!("[plasma] dispose {label}");
            cleanup();
            ran += 1;
        }
        ran
    }
}

impl Drop for Disposer {
    fn drop(&mut self) {
        self.dispose_all();
    }
}
