pub mod color;
pub mod config;
pub mod constants;
pub mod controller;
pub mod device;
pub mod dispose;
pub mod pointer;
pub mod preference;
pub mod scheduler;
pub mod sizing;
pub mod uniforms;

pub use color::{hex_to_rgb, parse_hex, ColorError};
pub use config::{direction_or_default, ConfigError, Direction, RenderConfig};
pub use controller::SurfaceController;
pub use device::{DeviceClass, DeviceProfile, Environment, PowerPreference};
pub use dispose::Disposer;
pub use preference::{page_shows_background, resolve_enabled};
pub use scheduler::{AdaptiveScheduler, Adjustment, FrameRequester, RunState, Tick, Transition};
pub use sizing::BufferSize;
pub use uniforms::PlasmaUniforms;

// Shader bundled as a string constant
pub static PLASMA_WGSL: &str = include_str!("../shaders/plasma.wgsl");
