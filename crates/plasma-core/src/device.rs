//! Device capability heuristic.
//!
//! A single snapshot of the browser environment decides how much rendering
//! work the background may spend. Touch-capable devices are treated as
//! constrained even on wide viewports, so a phone in "desktop site" mode
//! still gets the low-power profile.

use crate::constants::*;

/// Environment queries taken at one point in time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Environment {
    pub viewport_width: f64,
    pub device_pixel_ratio: f64,
    pub max_touch_points: i32,
    pub has_touch_events: bool,
}

impl Environment {
    #[inline]
    pub fn is_touch_capable(&self) -> bool {
        self.has_touch_events || self.max_touch_points > 0
    }

    /// Device pixel ratio clamped to the range the renderer considers.
    #[inline]
    pub fn raw_pixel_ratio(&self) -> f64 {
        let dpr = if self.device_pixel_ratio.is_finite() {
            self.device_pixel_ratio
        } else {
            RAW_DPR_MIN
        };
        dpr.clamp(RAW_DPR_MIN, RAW_DPR_MAX)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeviceClass {
    Constrained,
    Full,
}

impl DeviceClass {
    pub fn classify(env: &Environment) -> Self {
        if env.is_touch_capable() || env.viewport_width < CONSTRAINED_BREAKPOINT_PX {
            DeviceClass::Constrained
        } else {
            DeviceClass::Full
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PowerPreference {
    LowPower,
    HighPerformance,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DeviceProfile {
    pub class: DeviceClass,
    pub pixel_ratio_cap: f32,
    pub initial_resolution_scale: f32,
    pub target_fps: u32,
    pub target_frame_interval_ms: f64,
    pub power_preference: PowerPreference,
}

impl DeviceProfile {
    pub fn from_environment(env: &Environment) -> Self {
        let class = DeviceClass::classify(env);
        let (cap, fps, power) = match class {
            DeviceClass::Constrained => (
                CONSTRAINED_DPR_CAP,
                CONSTRAINED_TARGET_FPS,
                PowerPreference::LowPower,
            ),
            DeviceClass::Full => (FULL_DPR_CAP, FULL_TARGET_FPS, PowerPreference::HighPerformance),
        };
        Self {
            class,
            pixel_ratio_cap: cap,
            initial_resolution_scale: (env.raw_pixel_ratio() as f32).min(cap),
            target_fps: fps,
            target_frame_interval_ms: frame_interval_ms(fps),
            power_preference: power,
        }
    }
}
