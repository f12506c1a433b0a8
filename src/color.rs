//! Module implementing the color applied to the ticks of a raster plot.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::RasterError;

/// An opaque RGB color.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    /// The neutral gray used for raster ticks unless stated otherwise.
    pub const GRAY: Color = Color::new(0x9a, 0x9a, 0x9a);
    pub const BLACK: Color = Color::new(0x00, 0x00, 0x00);
    pub const WHITE: Color = Color::new(0xff, 0xff, 0xff);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Color { r, g, b }
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::GRAY
    }
}

impl FromStr for Color {
    type Err = RasterError;

    /// Parse a color of the form `#rrggbb` (the leading `#` is optional).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s.trim().strip_prefix('#').unwrap_or(s.trim());
        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(RasterError::InvalidColor(format!(
                "expected #rrggbb, got {:?}",
                s
            )));
        }

        let channel = |i: usize| {
            u8::from_str_radix(&hex[i..i + 2], 16)
                .map_err(|e| RasterError::InvalidColor(e.to_string()))
        };

        Ok(Color::new(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl TryFrom<String> for Color {
    type Error = RasterError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}

impl From<Color> for plotters::style::RGBColor {
    fn from(color: Color) -> Self {
        plotters::style::RGBColor(color.r, color.g, color.b)
    }
}
