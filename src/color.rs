//! Hex color values shared by the settings records and the renderers.

use std::fmt;
use std::str::FromStr;

use palette::Srgb;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error returned when a color string is not a valid hex color.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid color {value:?}: expected #rgb or #rrggbb")]
pub struct ColorError {
    /// The rejected input.
    pub value: String,
}

/// An opaque sRGB color, written as `#rrggbb`.
///
/// Parsing accepts `#rgb` and `#rrggbb` (the leading `#` is optional and
/// hex digits are case-insensitive), which covers everything the editor's
/// color pickers produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Self = Self::new(0, 0, 0);
    pub const WHITE: Self = Self::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parses a hex color string.
    pub fn parse(value: &str) -> Result<Self, ColorError> {
        let rgb: Srgb<u8> = Srgb::from_str(value.trim()).map_err(|_| ColorError {
            value: value.to_string(),
        })?;
        Ok(Self::new(rgb.red, rgb.green, rgb.blue))
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for Color {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Color {
    type Error = ColorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}

#[cfg(feature = "jsonschema")]
impl schemars::JsonSchema for Color {
    fn schema_name() -> String {
        "Color".to_string()
    }

    fn json_schema(generator: &mut schemars::r#gen::SchemaGenerator) -> schemars::schema::Schema {
        <String as schemars::JsonSchema>::json_schema(generator)
    }
}
