use crate::constants::POINTER_THROTTLE_MS;
use glam::Vec2;

/// Lets one pointer update through per [`POINTER_THROTTLE_MS`] window.
#[derive(Clone, Copy, Debug, Default)]
pub struct PointerThrottle {
    last_ms: Option<f64>,
}

impl PointerThrottle {
    pub fn admit(&mut self, now_ms: f64) -> bool {
        match self.last_ms {
            Some(last) if now_ms - last < POINTER_THROTTLE_MS => false,
            _ => {
                self.last_ms = Some(now_ms);
                true
            }
        }
    }
}

/// Convert a container-relative CSS position (origin top-left) into buffer
/// pixels with the origin at the bottom-left, matching the shader's frame.
#[inline]
pub fn css_to_buffer(pos_css: Vec2, css_height: f32, pixel_ratio: f32) -> Vec2 {
    Vec2::new(pos_css.x, css_height - pos_css.y) * pixel_ratio
}
