use crate::color::hex_to_rgb;
use crate::config::{Direction, RenderConfig};
use crate::constants::{PINGPONG_PERIOD_SEC, SPEED_UNIFORM_FACTOR};
use glam::Vec2;

/// CPU mirror of `PlasmaUniforms` in `plasma.wgsl`. Field order and padding
/// must match the WGSL struct (64 bytes, 16-byte aligned rows).
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct PlasmaUniforms {
    pub resolution: [f32; 2],
    pub time: f32,
    pub speed: f32,
    pub custom_color: [f32; 3],
    pub use_custom_color: f32,
    pub mouse: [f32; 2],
    pub direction: f32,
    pub scale: f32,
    pub opacity: f32,
    pub mouse_interactive: f32,
    pub _pad: [f32; 2],
}

impl PlasmaUniforms {
    pub fn from_config(config: &RenderConfig, width: u32, height: u32) -> Self {
        let mut u = Self {
            resolution: [width.max(1) as f32, height.max(1) as f32],
            time: 0.0,
            speed: 0.0,
            custom_color: [1.0, 1.0, 1.0],
            use_custom_color: 0.0,
            mouse: [0.0, 0.0],
            direction: 1.0,
            scale: 1.0,
            opacity: 1.0,
            mouse_interactive: 0.0,
            _pad: [0.0; 2],
        };
        u.apply_config(config);
        u
    }

    /// Patch every config-driven field in place.
    pub fn apply_config(&mut self, config: &RenderConfig) {
        match config.custom_color() {
            Some(hex) => {
                self.custom_color = hex_to_rgb(Some(hex));
                self.use_custom_color = 1.0;
            }
            None => {
                self.custom_color = [1.0, 1.0, 1.0];
                self.use_custom_color = 0.0;
            }
        }
        self.speed = config.speed * SPEED_UNIFORM_FACTOR;
        self.direction = config.direction.sign();
        self.scale = config.scale;
        self.opacity = config.opacity;
        self.mouse_interactive = if config.mouse_interactive { 1.0 } else { 0.0 };
    }

    pub fn set_resolution(&mut self, width: u32, height: u32) {
        self.resolution = [width.max(1) as f32, height.max(1) as f32];
    }

    pub fn set_mouse(&mut self, pos: Vec2) {
        self.mouse = pos.to_array();
    }

    pub fn set_time(&mut self, seconds: f32, direction: Direction) {
        self.time = match direction {
            Direction::PingPong => pingpong_time(seconds),
            Direction::Forward | Direction::Reverse => seconds,
        };
    }
}

/// Map monotonic time onto a smoothstep-eased sweep that runs forward for
/// one period, then backward for the next.
pub fn pingpong_time(seconds: f32) -> f32 {
    let period = PINGPONG_PERIOD_SEC;
    let t = seconds.max(0.0);
    let segment = t % period;
    let forward = ((t / period).floor() as u64) % 2 == 0;
    let u = segment / period;
    let eased = u * u * (3.0 - 2.0 * u);
    if forward {
        eased * period
    } else {
        (1.0 - eased) * period
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_matches_wgsl_size() {
        assert_eq!(std::mem::size_of::<PlasmaUniforms>(), 64);
        assert_eq!(std::mem::offset_of!(PlasmaUniforms, custom_color), 16);
        assert_eq!(std::mem::offset_of!(PlasmaUniforms, mouse), 32);
        assert_eq!(std::mem::offset_of!(PlasmaUniforms, opacity), 48);
    }

    #[test]
    fn config_maps_to_uniforms() {
        let cfg = RenderConfig {
            color: Some("#ff0000".into()),
            speed: 1.0,
            direction: Direction::Reverse,
            scale: 1.0,
            opacity: 0.5,
            mouse_interactive: true,
        };
        let u = PlasmaUniforms::from_config(&cfg, 800, 600);
        assert_eq!(u.resolution, [800.0, 600.0]);
        assert_eq!(u.custom_color, [1.0, 0.0, 0.0]);
        assert_eq!(u.use_custom_color, 1.0);
        assert!((u.speed - 0.4).abs() < 1e-6);
        assert_eq!(u.direction, -1.0);
        assert_eq!(u.opacity, 0.5);
        assert_eq!(u.mouse_interactive, 1.0);
    }

    #[test]
    fn no_color_disables_tint() {
        let cfg = RenderConfig {
            color: None,
            ..Default::default()
        };
        let u = PlasmaUniforms::from_config(&cfg, 1, 1);
        assert_eq!(u.use_custom_color, 0.0);
    }

    #[test]
    fn pingpong_sweeps_back_and_forth() {
        assert_eq!(pingpong_time(0.0), 0.0);
        assert!((pingpong_time(5.0) - 5.0).abs() < 1e-4);
        assert!((pingpong_time(9.999) - 10.0).abs() < 1e-2);
        assert!((pingpong_time(10.0) - 10.0).abs() < 1e-4);
        assert!((pingpong_time(15.0) - 5.0).abs() < 1e-4);
        assert!(pingpong_time(19.999) < 0.01);
        let a = pingpong_time(12.0);
        let b = pingpong_time(13.0);
        assert!(b < a, "second segment should run backward");
    }
}
