// Page wiring and browser-facing constants for the plasma front-end.

// Element ids the page composes against
pub const CONTAINER_ID: &str = "plasma-background";
pub const ANCHOR_ID: &str = "hero";

// Client-local effect preference
pub const PREFERENCE_STORAGE_KEY: &str = "plasma-background:enabled";
pub const REDUCED_MOTION_QUERY: &str = "(prefers-reduced-motion: reduce)";

// Canvas styling applied when the surface is created
pub const CANVAS_STYLE: &[(&str, &str)] = &[
    ("display", "block"),
    ("width", "100%"),
    ("height", "100%"),
    ("pointer-events", "none"),
];

// Props the page mounts the background with
pub const PAGE_COLOR: &str = "#6f00ff";
pub const PAGE_SPEED: f32 = 0.3;
pub const PAGE_SCALE: f32 = 0.8;
pub const PAGE_OPACITY: f32 = 0.4;
pub const PAGE_MOUSE_INTERACTIVE: bool = false;

// Mount option keys read from the JS options object
pub const OPT_COLOR: &str = "color";
pub const OPT_SPEED: &str = "speed";
pub const OPT_DIRECTION: &str = "direction";
pub const OPT_SCALE: &str = "scale";
pub const OPT_OPACITY: &str = "opacity";
pub const OPT_MOUSE_INTERACTIVE: &str = "mouseInteractive";

// Window events that re-derive the device profile
pub const VIEWPORT_EVENTS: &[&str] = &["resize", "orientationchange"];
