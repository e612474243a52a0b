use crate::constants::CONSTRAINED_BREAKPOINT_PX;
use crate::device::Environment;

/// Page-level gate applied before mounting: wide viewports always get the
/// background, narrow ones only when they report at most one touch point.
pub fn page_shows_background(env: &Environment) -> bool {
    env.viewport_width >= CONSTRAINED_BREAKPOINT_PX
        || (env.has_touch_events && env.max_touch_points <= 1)
}

/// Decide whether the effect should run. An explicit stored choice wins;
/// otherwise the platform's reduced-motion signal disables it.
pub fn resolve_enabled(stored: Option<&str>, prefers_reduced_motion: bool) -> bool {
    match stored.map(|s| s.trim().to_ascii_lowercase()).as_deref() {
        Some("1" | "true" | "on") => true,
        Some("0" | "false" | "off") => false,
        _ => !prefers_reduced_motion,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stored_value_overrides_motion_preference() {
        assert!(resolve_enabled(Some("true"), true));
        assert!(resolve_enabled(Some(" 1 "), true));
        assert!(!resolve_enabled(Some("FALSE"), false));
        assert!(!resolve_enabled(Some("off"), false));
    }

    fn env(width: f64, touch_events: bool, points: i32) -> Environment {
        Environment {
            viewport_width: width,
            device_pixel_ratio: 1.0,
            max_touch_points: points,
            has_touch_events: touch_events,
        }
    }

    #[test]
    fn page_gate() {
        assert!(page_shows_background(&env(1440.0, false, 0)));
        assert!(page_shows_background(&env(768.0, true, 5)));
        assert!(!page_shows_background(&env(375.0, true, 5)));
        assert!(page_shows_background(&env(375.0, true, 1)));
        assert!(!page_shows_background(&env(375.0, false, 0)));
    }

    #[test]
    fn falls_back_to_reduced_motion() {
        assert!(resolve_enabled(None, false));
        assert!(!resolve_enabled(None, true));
        assert!(!resolve_enabled(Some("maybe"), true));
    }
}
