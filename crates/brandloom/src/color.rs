//! Color parsing and interpolation.
//!
//! Colors travel through the engine as parsed [`Color`] values, never as raw
//! strings, so a malformed `#RRGGBB` is rejected once at the boundary
//! (construction or deserialization) instead of deep inside a generator.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{BrandloomError, BrandloomResult};

/// An opaque sRGB color with 8-bit channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const BLACK: Color = Color::rgb(0, 0, 0);

    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// A neutral grey with all three channels set to `value`.
    #[inline]
    pub const fn grey(value: u8) -> Self {
        Self::rgb(value, value, value)
    }

    /// Parse a `#RRGGBB` string.
    ///
    /// Both upper and lower case hex digits are accepted. Anything else
    /// (missing `#`, shorthand `#RGB`, stray characters) fails with
    /// [`BrandloomError::InvalidColorFormat`].
    pub fn from_hex(input: &str) -> BrandloomResult<Self> {
        let Some(digits) = input.strip_prefix('#') else {
            return Err(BrandloomError::invalid_color(input, "missing leading '#'"));
        };
        if digits.len() != 6 {
            return Err(BrandloomError::invalid_color(
                input,
                format!("expected 6 hex digits, found {}", digits.len()),
            ));
        }
        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(BrandloomError::invalid_color(input, "non-hex character"));
        }

        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16)
                .map_err(|e| BrandloomError::invalid_color(input, e.to_string()))
        };
        Ok(Self::rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }

    /// Encode as `#RRGGBB` with upper case digits.
    pub fn to_hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// Channels as floats, handy for weighted blending.
    #[inline]
    pub fn channels(&self) -> [f64; 3] {
        [self.r as f64, self.g as f64, self.b as f64]
    }

    /// Build a color from float channels, rounding each to the nearest integer.
    #[inline]
    pub fn from_channels(channels: [f64; 3]) -> Self {
        let to_u8 = |v: f64| v.round().clamp(0.0, 255.0) as u8;
        Self::rgb(to_u8(channels[0]), to_u8(channels[1]), to_u8(channels[2]))
    }
}

/// Linearly interpolate between two colors, channel by channel.
///
/// Each channel is rounded independently, so `interpolate(a, b, 0.0) == a`
/// and `interpolate(a, b, 1.0) == b` hold exactly. `t` is clamped to [0, 1].
pub fn interpolate(from: Color, to: Color, t: f64) -> Color {
    let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
    let a = from.channels();
    let b = to.channels();
    Color::from_channels([
        a[0] + (b[0] - a[0]) * t,
        a[1] + (b[1] - a[1]) * t,
        a[2] + (b[2] - a[2]) * t,
    ])
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Color {
    type Err = BrandloomError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Color::from_hex(s)
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Color::from_hex(&raw).map_err(serde::de::Error::custom)
    }
}
