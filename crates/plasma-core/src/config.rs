use crate::constants::{
    DEFAULT_COLOR, DEFAULT_OPACITY, DEFAULT_SCALE, DEFAULT_SPEED, MIN_SCALE,
};
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("unknown direction {0:?} (expected forward, reverse or pingpong)")]
    Direction(String),
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Direction {
    #[default]
    Forward,
    Reverse,
    PingPong,
}

impl Direction {
    /// Sign written to the direction uniform. Ping-pong drives time itself
    /// back and forth, so its sign stays positive.
    #[inline]
    pub fn sign(self) -> f32 {
        match self {
            Direction::Reverse => -1.0,
            Direction::Forward | Direction::PingPong => 1.0,
        }
    }
}

impl FromStr for Direction {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "forward" => Ok(Direction::Forward),
            "reverse" => Ok(Direction::Reverse),
            "pingpong" | "ping-pong" => Ok(Direction::PingPong),
            _ => Err(ConfigError::Direction(s.to_string())),
        }
    }
}

/// Mount-time configuration of the background. Changing it after mount only
/// patches uniforms.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderConfig {
    pub color: Option<String>,
    pub speed: f32,
    pub direction: Direction,
    pub scale: f32,
    pub opacity: f32,
    pub mouse_interactive: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            color: Some(DEFAULT_COLOR.to_string()),
            speed: DEFAULT_SPEED,
            direction: Direction::Forward,
            scale: DEFAULT_SCALE,
            opacity: DEFAULT_OPACITY,
            mouse_interactive: false,
        }
    }
}

impl RenderConfig {
    /// The custom tint, if any. An empty string means "no tint".
    pub fn custom_color(&self) -> Option<&str> {
        self.color.as_deref().filter(|c| !c.trim().is_empty())
    }

    /// Clamp values into ranges the shader can use.
    pub fn sanitized(mut self) -> Self {
        if !self.speed.is_finite() {
            self.speed = DEFAULT_SPEED;
        }
        self.scale = if self.scale.is_finite() {
            self.scale.max(MIN_SCALE)
        } else {
            DEFAULT_SCALE
        };
        self.opacity = if self.opacity.is_finite() {
            self.opacity.clamp(0.0, 1.0)
        } else {
            DEFAULT_OPACITY
        };
        self
    }
}

/// Lenient direction lookup used for host-provided strings.
pub fn direction_or_default(value: Option<&str>) -> Direction {
    match value.map(Direction::from_str) {
        Some(Ok(d)) => d,
        Some(Err(e)) => {
            log::warn!("[plasma] {e}; using forward");
            Direction::Forward
        }
        None => Direction::Forward,
    }
}
