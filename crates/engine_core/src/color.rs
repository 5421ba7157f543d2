//! RGB colours stored as linear `Vec3` channels in `0.0..=1.0`.
//!
//! Colours arrive from the outside world as CSS-style hex strings
//! (`#00ffff`, `#0ff`); everything past the boundary works on `Vec3`.

use glam::Vec3;
use thiserror::Error;

pub const WHITE: Vec3 = Vec3::ONE;
pub const BLACK: Vec3 = Vec3::ZERO;
pub const CYAN: Vec3 = Vec3::new(0.0, 1.0, 1.0);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorParseError {
    #[error("colour {0:?} must start with '#'")]
    MissingHash(String),
    #[error("colour {0:?} must have 3 or 6 hex digits")]
    BadLength(String),
    #[error("colour {0:?} contains a non-hex digit")]
    BadDigit(String),
}

/// Parse `#rrggbb` or `#rgb` into a `Vec3`.
pub fn parse_hex_color(text: &str) -> Result<Vec3, ColorParseError> {
    let trimmed = text.trim();
    let digits = trimmed
        .strip_prefix('#')
        .ok_or_else(|| ColorParseError::MissingHash(text.to_string()))?;

    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(ColorParseError::BadDigit(text.to_string()));
    }

    let channel = |s: &str| {
        u8::from_str_radix(s, 16).map_err(|_| ColorParseError::BadDigit(text.to_string()))
    };

    let (r, g, b) = match digits.len() {
        6 => (channel(&digits[0..2])?, channel(&digits[2..4])?, channel(&digits[4..6])?),
        3 => {
            // #abc expands to #aabbcc
            let r = channel(&digits[0..1])?;
            let g = channel(&digits[1..2])?;
            let b = channel(&digits[2..3])?;
            (r * 17, g * 17, b * 17)
        }
        _ => return Err(ColorParseError::BadLength(text.to_string())),
    };

    Ok(Vec3::new(r as f32, g as f32, b as f32) / 255.0)
}

/// Convert to 8-bit channels, clamping overbright values.
pub fn to_rgb8(color: Vec3) -> [u8; 3] {
    let c = color.clamp(Vec3::ZERO, Vec3::ONE) * 255.0;
    [c.x.round() as u8, c.y.round() as u8, c.z.round() as u8]
}

/// Replace non-finite channels with zero and clamp to `0.0..=1.0`.
pub fn sanitize_color(color: Vec3) -> Vec3 {
    let fix = |v: f32| if v.is_finite() { v.clamp(0.0, 1.0) } else { 0.0 };
    Vec3::new(fix(color.x), fix(color.y), fix(color.z))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_long_and_short_forms() {
        assert_eq!(parse_hex_color("#00ffff").unwrap(), CYAN);
        assert_eq!(parse_hex_color("#fff").unwrap(), WHITE);
        assert_eq!(parse_hex_color(" #000000 ").unwrap(), BLACK);
        let c = parse_hex_color("#ff8000").unwrap();
        assert!((c.y - 128.0 / 255.0).abs() < 1e-6);
    }

    #[test]
    fn rejects_malformed_colors() {
        assert!(matches!(parse_hex_color("00ffff"), Err(ColorParseError::MissingHash(_))));
        assert!(matches!(parse_hex_color("#00ff"), Err(ColorParseError::BadLength(_))));
        assert!(matches!(parse_hex_color("#00ffzz"), Err(ColorParseError::BadDigit(_))));
        assert!(matches!(parse_hex_color("#é0"), Err(ColorParseError::BadDigit(_))));
    }

    #[test]
    fn rgb8_clamps_overbright() {
        assert_eq!(to_rgb8(Vec3::new(2.5, 0.5, -1.0)), [255, 128, 0]);
    }

    #[test]
    fn sanitize_drops_nan() {
        let c = sanitize_color(Vec3::new(f32::NAN, 3.0, 0.25));
        assert_eq!(c, Vec3::new(0.0, 1.0, 0.25));
    }
}
