// Tuning constants for the plasma background. Every threshold the renderer
// and scheduler compare against lives here.

// Device classification
pub const CONSTRAINED_BREAKPOINT_PX: f64 = 768.0; // viewports narrower than this are constrained
pub const RAW_DPR_MIN: f64 = 1.0;
pub const RAW_DPR_MAX: f64 = 2.0;
pub const CONSTRAINED_DPR_CAP: f32 = 1.0;
pub const FULL_DPR_CAP: f32 = 1.5;
pub const CONSTRAINED_TARGET_FPS: u32 = 18;
pub const FULL_TARGET_FPS: u32 = 24;

// Adaptive controller
pub const FRAME_SAMPLE_WINDOW: usize = 30;
pub const SLOW_FRAME_MS: f64 = 28.0; // mean render cost above this degrades quality
pub const RESOLUTION_STEP: f32 = 0.5;
pub const RESOLUTION_FLOOR: f32 = 0.75;
pub const FPS_STEP_DOWN: u32 = 3;
pub const FPS_STEP_UP: u32 = 1;
pub const FPS_FLOOR: u32 = 12;

// Surface sizing
pub const RESIZE_AREA_THRESHOLD: f64 = 0.02; // relative area change below this is ignored
pub const MAX_BUFFER_PIXELS: f64 = 1920.0 * 1080.0;
pub const MIN_SCALE: f32 = 0.01;

// Pointer
pub const POINTER_THROTTLE_MS: f64 = 16.0;

// Shader parameter mapping
pub const SPEED_UNIFORM_FACTOR: f32 = 0.4;
pub const PINGPONG_PERIOD_SEC: f32 = 10.0;

// Color used when a configured hex string cannot be parsed
pub const FALLBACK_RGB: [f32; 3] = [1.0, 0.5, 0.2];

// Mount defaults
pub const DEFAULT_COLOR: &str = "#6f00ff";
pub const DEFAULT_SPEED: f32 = 0.5;
pub const DEFAULT_SCALE: f32 = 0.5;
pub const DEFAULT_OPACITY: f32 = 0.5;

#[inline]
pub fn frame_interval_ms(fps: u32) -> f64 {
    1000.0 / fps.max(1) as f64
}
