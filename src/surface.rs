//! Browser half of the render surface: owns the canvas and GPU state and
//! applies what the [`SurfaceController`] decides.

use crate::dom;
use crate::render::GpuState;
use plasma_core::{Adjustment, BufferSize, DeviceProfile, RenderConfig, SurfaceController};
use web_sys as web;

pub struct Surface {
    pub controller: SurfaceController,
    gpu: GpuState,
    canvas: web::HtmlCanvasElement,
    container: web::HtmlElement,
    resize_pending: bool,
    error_streak: u32,
}

impl Surface {
    /// Create the canvas inside `container` and bring up the GPU pipeline.
    /// On failure the canvas is removed again.
    pub async fn initialize(
        document: &web::Document,
        container: &web::HtmlElement,
        config: RenderConfig,
        profile: DeviceProfile,
        document_visible: bool,
        now_ms: f64,
    ) -> anyhow::Result<Self> {
        let canvas = dom::create_canvas(document, container)?;
        let gpu = match GpuState::new(canvas.clone(), profile.power_preference).await {
            Ok(gpu) => gpu,
            Err(e) => {
                canvas.remove();
                return Err(e);
            }
        };
        let controller = SurfaceController::initialize(config, profile, document_visible, now_ms)
            .with_max_dimension(gpu.max_dimension());
        let mut surface = Self {
            controller,
            gpu,
            canvas,
            container: container.clone(),
            resize_pending: false,
            error_streak: 0,
        };
        surface.resize(true);
        Ok(surface)
    }

    /// Defer a resize to the next rendered frame.
    #[inline]
    pub fn mark_resize(&mut self) {
        self.resize_pending = true;
    }

    pub fn resize(&mut self, force: bool) {
        self.resize_pending = false;
        let (w, h) = dom::css_size(&self.container);
        if let Some(size) = self.controller.resize(w, h, force) {
            self.apply_buffer(size);
        }
    }

    // the controller already fits `size` to the device limit
    fn apply_buffer(&mut self, size: BufferSize) {
        self.canvas.set_width(size.width);
        self.canvas.set_height(size.height);
        self.gpu.resize_if_needed(size.width, size.height);
    }

    pub fn update(&mut self, config: RenderConfig) {
        self.controller.update_uniforms(config);
        self.gpu.write_uniforms(self.controller.uniforms());
    }

    pub fn apply_adjustment(&mut self, adj: Adjustment) {
        if let Some(size) = self.controller.apply_adjustment(adj) {
            self.apply_buffer(size);
        }
    }

    pub fn reprofile(&mut self, profile: DeviceProfile) {
        if let Some(size) = self.controller.reprofile(profile) {
            self.apply_buffer(size);
        }
        self.resize_pending = true;
    }

    /// Draw one frame. Errors are swallowed; the first of a streak is logged.
    pub fn render(&mut self, time_sec: f32) -> bool {
        if self.resize_pending {
            self.resize(false);
        }
        let uniforms = *self.controller.frame_uniforms(time_sec);
        match self.gpu.render(&uniforms) {
            Ok(()) => {
                self.error_streak = 0;
                true
            }
            Err(e) => {
                if self.error_streak == 0 {
                    log::warn!("[gpu] render skipped: {e}");
                }
                self.error_streak = self.error_streak.saturating_add(1);
                false
            }
        }
    }

    pub fn teardown(&mut self) {
        self.canvas.remove();
    }
}
