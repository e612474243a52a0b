//! Hex color parsing for the custom tint uniform.

use crate::constants::FALLBACK_RGB;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    #[error("expected 6 hex digits, got {0} characters")]
    Length(usize),
    #[error("invalid hex digit {0:?}")]
    Digit(char),
}

/// Parse `#rrggbb` (the `#` is optional, digits are case-insensitive) into
/// normalized RGB.
pub fn parse_hex(input: &str) -> Result<[f32; 3], ColorError> {
    let digits = input.strip_prefix('#').unwrap_or(input);
    let count = digits.chars().count();
    if count != 6 {
        return Err(ColorError::Length(count));
    }
    if let Some(bad) = digits.chars().find(|c| !c.is_ascii_hexdigit()) {
        return Err(ColorError::Digit(bad));
    }
    let channel = |i: usize| -> Result<f32, ColorError> {
        u8::from_str_radix(&digits[i..i + 2], 16)
            .map(|v| v as f32 / 255.0)
            .map_err(|_| ColorError::Digit(digits[i..].chars().next().unwrap_or('?')))
    };
    Ok([channel(0)?, channel(2)?, channel(4)?])
}

/// Lenient variant used by the renderer: anything unparsable yields
/// [`FALLBACK_RGB`].
pub fn hex_to_rgb(input: Option<&str>) -> [f32; 3] {
    match input.map(parse_hex) {
        Some(Ok(rgb)) => rgb,
        Some(Err(e)) => {
            log::debug!("[plasma] color fallback: {e}");
            FALLBACK_RGB
        }
        None => FALLBACK_RGB,
    }
}
