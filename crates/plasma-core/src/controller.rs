//! Platform-independent half of the render surface controller.
//!
//! Holds everything the browser glue needs to decide *what* to write to
//! the GPU: the current config, the uniform block, the applied buffer size,
//! the pointer throttle and the adaptive scheduler. The glue only performs
//! the writes.

use crate::config::RenderConfig;
use crate::device::DeviceProfile;
use crate::pointer::{css_to_buffer, PointerThrottle};
use crate::scheduler::{Adjustment, AdaptiveScheduler};
use crate::sizing::{buffer_size, css_pixels, BufferSize, ResizeGate};
use crate::uniforms::PlasmaUniforms;
use glam::Vec2;

pub struct SurfaceController {
    config: RenderConfig,
    profile: DeviceProfile,
    uniforms: PlasmaUniforms,
    resize_gate: ResizeGate,
    pointer: PointerThrottle,
    css_size: (u32, u32),
    buffer: Option<BufferSize>,
    max_dimension: u32,
    scheduler: AdaptiveScheduler,
}

impl SurfaceController {
    pub fn initialize(
        config: RenderConfig,
        profile: DeviceProfile,
        document_visible: bool,
        now_ms: f64,
    ) -> Self {
        let config = config.sanitized();
        let uniforms = PlasmaUniforms::from_config(&config, 1, 1);
        let scheduler = AdaptiveScheduler::new(&profile, document_visible, now_ms);
        log::info!(
            "[plasma] profile {:?} scale={:.2} cap={:.2} fps={} ({:.1}ms) power={:?}",
            profile.class,
            profile.initial_resolution_scale,
            profile.pixel_ratio_cap,
            profile.target_fps,
            profile.target_frame_interval_ms,
            profile.power_preference
        );
        Self {
            config,
            profile,
            uniforms,
            resize_gate: ResizeGate::default(),
            pointer: PointerThrottle::default(),
            css_size: (1, 1),
            buffer: None,
            max_dimension: u32::MAX,
            scheduler,
        }
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Limit either side of the drawing buffer to what the device can
    /// allocate.
    pub fn with_max_dimension(mut self, max_dimension: u32) -> Self {
        self.max_dimension = max_dimension.max(1);
        self
    }

    pub fn uniforms(&self) -> &PlasmaUniforms {
        &self.uniforms
    }

    pub fn buffer(&self) -> Option<BufferSize> {
        self.buffer
    }

    pub fn scheduler(&self) -> &AdaptiveScheduler {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut AdaptiveScheduler {
        &mut self.scheduler
    }

    /// Compute a new drawing-buffer size for the container's CSS size.
    /// Returns `None` when the change is within the area threshold.
    pub fn resize(&mut self, css_width: f64, css_height: f64, force: bool) -> Option<BufferSize> {
        let (w, h) = css_pixels(css_width, css_height);
        if force {
            self.resize_gate.record(w, h);
        } else if !self.resize_gate.admit(w, h) {
            return None;
        }
        self.css_size = (w, h);
        let size = buffer_size(
            w,
            h,
            self.scheduler.resolution_scale(),
            self.scheduler.resolution_cap(),
            self.max_dimension,
        );
        self.uniforms.set_resolution(size.width, size.height);
        self.buffer = Some(size);
        log::debug!(
            "[resize] css={}x{} buffer={}x{} ratio={:.2}",
            w,
            h,
            size.width,
            size.height,
            size.pixel_ratio
        );
        Some(size)
    }

    pub fn update_uniforms(&mut self, config: RenderConfig) {
        self.config = config.sanitized();
        self.uniforms.apply_config(&self.config);
    }

    /// Returns true when the mouse uniform was written.
    pub fn on_pointer_move(&mut self, pos_css: Vec2, now_ms: f64) -> bool {
        if !self.config.mouse_interactive || !self.pointer.admit(now_ms) {
            return false;
        }
        let ratio = self.buffer.map(|b| b.pixel_ratio).unwrap_or(1.0);
        let pos = css_to_buffer(pos_css, self.css_size.1 as f32, ratio);
        self.uniforms.set_mouse(pos);
        true
    }

    /// Uniforms for a render at animation time `time_sec`.
    pub fn frame_uniforms(&mut self, time_sec: f32) -> &PlasmaUniforms {
        self.uniforms.set_time(time_sec, self.config.direction);
        &self.uniforms
    }

    /// Follow up a scheduler adjustment; a resolution change forces a resize
    /// at the current CSS size.
    pub fn apply_adjustment(&mut self, adj: Adjustment) -> Option<BufferSize> {
        if !adj.resolution_changed {
            return None;
        }
        let (w, h) = self.css_size;
        self.resize(w as f64, h as f64, true)
    }

    /// Adopt a re-derived device profile.
    pub fn reprofile(&mut self, profile: DeviceProfile) -> Option<BufferSize> {
        if profile == self.profile {
            return None;
        }
        log::info!(
            "[plasma] reprofile {:?} -> {:?}",
            self.profile.class,
            profile.class
        );
        self.profile = profile;
        let adj = self.scheduler.retarget(&profile)?;
        self.apply_adjustment(adj)
    }
}
