use std::fmt;
use std::str::FromStr;

use crate::foundation::error::{AvatarError, AvatarResult};

pub use kurbo::{Affine, BezPath, Circle, Point, Rect};

/// Side length of the square avatar canvas, in logical pixels.
pub const CANVAS_SIZE: u32 = 1000;

/// Pixel dimensions of a render target.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Canvas {
    /// The fixed square avatar canvas.
    pub const AVATAR: Canvas = Canvas {
        width: CANVAS_SIZE,
        height: CANVAS_SIZE,
    };

    /// Side length for square canvases (the width otherwise).
    pub fn side(self) -> f64 {
        f64::from(self.width)
    }

    /// Canvas center point.
    pub fn center(self) -> Point {
        Point::new(f64::from(self.width) / 2.0, f64::from(self.height) / 2.0)
    }

    /// Full-canvas rectangle.
    pub fn bounds(self) -> Rect {
        Rect::new(0.0, 0.0, f64::from(self.width), f64::from(self.height))
    }
}

/// Opaque 24-bit sRGB color.
///
/// Parses from `#RRGGBB` (case-insensitive, leading `#` optional) and serializes back to lowercase
/// `#rrggbb`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgb8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Rgb8 {
    /// Pure black.
    pub const BLACK: Rgb8 = Rgb8::new(0, 0, 0);
    /// Pure white.
    pub const WHITE: Rgb8 = Rgb8::new(255, 255, 255);

    /// Construct from channel values.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse a `#RRGGBB` hex string.
    pub fn parse_hex(s: &str) -> AvatarResult<Self> {
        let trimmed = s.trim();
        let digits = trimmed.strip_prefix('#').unwrap_or(trimmed);
        if digits.len() != 6 || !digits.is_ascii() {
            return Err(AvatarError::validation(format!(
                "hex color must be #RRGGBB (got \"{s}\")"
            )));
        }

        let byte = |pair: &str| -> AvatarResult<u8> {
            u8::from_str_radix(pair, 16).map_err(|_| {
                AvatarError::validation(format!("invalid hex byte \"{pair}\" in \"{s}\""))
            })
        };

        Ok(Self {
            r: byte(&digits[0..2])?,
            g: byte(&digits[2..4])?,
            b: byte(&digits[4..6])?,
        })
    }

    /// Lowercase `#rrggbb` representation.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Channels plus an explicit alpha.
    pub fn with_alpha(self, a: u8) -> [u8; 4] {
        [self.r, self.g, self.b, a]
    }
}

impl fmt::Display for Rgb8 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Rgb8 {
    type Err = AvatarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_hex(s)
    }
}

impl serde::Serialize for Rgb8 {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> serde::Deserialize<'de> for Rgb8 {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::parse_hex(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
