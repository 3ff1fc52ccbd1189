//! Hex color parsing for tile backgrounds and tile colors.

use image::Rgba;
use palette::{Srgb, Srgba, WithAlpha};

use crate::error::{FaviconError, Result};

/// Parses a `#rgb` or `#rrggbb` string (the `#` is optional).
///
/// Short-form digits are doubled, so `"#a3f"` is the same color as
/// `"#aa33ff"`. Digits are case-insensitive.
///
/// # Example
///
/// ```
/// use favicon_forge::parse_hex_color;
///
/// let white = parse_hex_color("#FFF").unwrap();
/// assert_eq!((white.red, white.green, white.blue), (255, 255, 255));
///
/// assert!(parse_hex_color("#12345").is_err());
/// ```
pub fn parse_hex_color(hex: &str) -> Result<Srgb<u8>> {
    let invalid = || FaviconError::InvalidFormat {
        input: hex.to_string(),
    };

    let digits = hex.strip_prefix('#').unwrap_or(hex);
    if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(invalid());
    }

    let nibbles: Vec<u8> = digits.bytes().map(hex_value).collect();
    let [r, g, b] = match nibbles.as_slice() {
        &[r, g, b] => [r * 0x11, g * 0x11, b * 0x11],
        &[r1, r0, g1, g0, b1, b0] => [(r1 << 4) | r0, (g1 << 4) | g0, (b1 << 4) | b0],
        _ => return Err(invalid()),
    };

    Ok(Srgb::new(r, g, b))
}

/// Formats a color as lowercase `#rrggbb`.
pub fn to_hex_string(color: Srgb<u8>) -> String {
    format!("#{:02x}{:02x}{:02x}", color.red, color.green, color.blue)
}

/// Returns the color at full opacity.
pub fn opaque(color: Srgb<u8>) -> Srgba<u8> {
    color.with_alpha(u8::MAX)
}

/// Fully transparent black, the initial fill of every rescale canvas.
pub fn transparent() -> Srgba<u8> {
    Srgb::new(0u8, 0, 0).with_alpha(0)
}

/// Converts a palette color into an `image` pixel.
pub fn to_pixel(color: Srgba<u8>) -> Rgba<u8> {
    Rgba([color.red, color.green, color.blue, color.alpha])
}

fn hex_value(digit: u8) -> u8 {
    match digit {
        b'0'..=b'9' => digit - b'0',
        b'a'..=b'f' => digit - b'a' + 10,
        b'A'..=b'F' => digit - b'A' + 10,
        _ => 0,
    }
}

// ============================================================================
// Tests
// ============================================================================
