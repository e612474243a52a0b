use crate::constants::{MAX_BUFFER_PIXELS, RESIZE_AREA_THRESHOLD};

/// Drawing-buffer dimensions in physical pixels plus the multiplier that
/// produced them.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BufferSize {
    pub width: u32,
    pub height: u32,
    pub pixel_ratio: f32,
}

/// Suppresses resizes whose area change is below [`RESIZE_AREA_THRESHOLD`]
/// relative to the last applied area.
#[derive(Clone, Copy, Debug, Default)]
pub struct ResizeGate {
    last_area: u64,
}

impl ResizeGate {
    pub fn last_area(&self) -> u64 {
        self.last_area
    }

    /// Returns true and records the area when the change is large enough.
    pub fn admit(&mut self, css_width: u32, css_height: u32) -> bool {
        let area = css_width as u64 * css_height as u64;
        if self.last_area > 0 {
            let delta = area.abs_diff(self.last_area) as f64 / self.last_area as f64;
            if delta < RESIZE_AREA_THRESHOLD {
                return false;
            }
        }
        self.last_area = area;
        true
    }

    /// Record an area without gating, for forced resizes.
    pub fn record(&mut self, css_width: u32, css_height: u32) {
        self.last_area = css_width as u64 * css_height as u64;
    }
}

/// Floor a CSS size to whole pixels, at least 1×1.
#[inline]
pub fn css_pixels(width: f64, height: f64) -> (u32, u32) {
    let clamp = |v: f64| {
        if v.is_finite() {
            v.floor().max(1.0) as u32
        } else {
            1
        }
    };
    (clamp(width), clamp(height))
}

/// Effective multiplier. The largest ratio the buffer may use is the
/// resolution cap, limited so the buffer never holds more than
/// [`MAX_BUFFER_PIXELS`] and neither side exceeds `max_dimension`. The
/// adaptive scale then degrades relative to that, so a step down always
/// shrinks the buffer even when the ceiling is the binding limit.
pub fn effective_pixel_ratio(
    css_width: u32,
    css_height: u32,
    resolution_scale: f32,
    resolution_cap: f32,
    max_dimension: u32,
) -> f32 {
    let (w, h) = (css_width.max(1) as f64, css_height.max(1) as f64);
    let ceiling = (MAX_BUFFER_PIXELS / (w * h)).sqrt();
    let side = max_dimension.max(1) as f64 / w.max(h);
    let cap = if resolution_cap > 0.0 {
        resolution_cap
    } else {
        resolution_scale
    };
    let full = (cap as f64).min(ceiling).min(side);
    let degrade = (resolution_scale / cap).min(1.0) as f64;
    ((full * degrade) as f32).max(f32::EPSILON)
}

pub fn buffer_size(
    css_width: u32,
    css_height: u32,
    resolution_scale: f32,
    resolution_cap: f32,
    max_dimension: u32,
) -> BufferSize {
    let ratio = effective_pixel_ratio(
        css_width,
        css_height,
        resolution_scale,
        resolution_cap,
        max_dimension,
    );
    let axis = |css: u32| ((css as f32 * ratio).floor() as u32).clamp(1, max_dimension.max(1));
    BufferSize {
        width: axis(css_width),
        height: axis(css_height),
        pixel_ratio: ratio,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_resize_always_applies() {
        let mut gate = ResizeGate::default();
        assert!(gate.admit(100, 100));
        assert_eq!(gate.last_area(), 10_000);
    }

    #[test]
    fn small_changes_are_ignored() {
        let mut gate = ResizeGate::default();
        assert!(gate.admit(1000, 1000));
        // 1.9% smaller
        assert!(!gate.admit(1000, 981));
        assert_eq!(gate.last_area(), 1_000_000);
        // exactly 2%
        assert!(gate.admit(1000, 980));
        assert_eq!(gate.last_area(), 980_000);
    }

    #[test]
    fn ignored_changes_do_not_accumulate_baseline() {
        let mut gate = ResizeGate::default();
        assert!(gate.admit(1000, 1000));
        assert!(!gate.admit(1000, 990));
        assert!(!gate.admit(1000, 985));
        assert!(gate.admit(1000, 975));
    }

    #[test]
    fn buffer_respects_pixel_ceiling() {
        let b = buffer_size(3840, 2160, 1.5, 1.5, u32::MAX);
        assert!(b.width as f64 * b.height as f64 <= MAX_BUFFER_PIXELS);
        assert!(b.pixel_ratio < 1.0);

        let b = buffer_size(1280, 720, 1.5, 1.5, u32::MAX);
        assert_eq!(b.pixel_ratio, 1.5);
        assert_eq!((b.width, b.height), (1920, 1080));
    }

    #[test]
    fn degraded_scale_shrinks_below_the_ceiling() {
        let full = buffer_size(2560, 1440, 1.0, 1.0, u32::MAX);
        assert_eq!((full.width, full.height), (1920, 1080));

        let degraded = buffer_size(2560, 1440, 0.75, 1.0, u32::MAX);
        assert_eq!(degraded.pixel_ratio, 0.5625);
        assert_eq!((degraded.width, degraded.height), (1440, 810));
    }

    #[test]
    fn wide_container_fits_texture_limit_and_keeps_aspect() {
        let b = buffer_size(3000, 300, 1.5, 1.5, 4096);
        assert!(b.width <= 4096);
        assert!(b.pixel_ratio < 1.5);
        // both axes use the same ratio
        assert_eq!(b.height, (300.0 * b.pixel_ratio).floor() as u32);
        assert!(b.width as f64 * b.height as f64 <= MAX_BUFFER_PIXELS);
    }

    #[test]
    fn css_pixels_floor_and_minimum() {
        assert_eq!(css_pixels(10.9, 0.2), (10, 1));
        assert_eq!(css_pixels(f64::NAN, -5.0), (1, 1));
    }
}
