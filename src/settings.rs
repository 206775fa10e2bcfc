//! Settings records edited by the UI.
//!
//! [`IconSettings`] and [`BackgroundSettings`] are plain values: the editor
//! replaces them wholesale on every change and never mutates a recorded
//! snapshot in place.

use serde::{Deserialize, Serialize};

#[cfg(feature = "tsify")]
use tsify_next::Tsify;

use crate::color::Color;
use crate::glyph::CustomGlyph;

/// `rounded` value meaning "render the background as a circle".
pub const FULLY_ROUND: f32 = 9999.0;

// ============================================================================
// IconSettings
// ============================================================================

/// Geometry and paint of the icon glyph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "tsify", derive(Tsify), tsify(into_wasm_abi, from_wasm_abi))]
pub struct IconSettings {
    /// Edge length of the icon box in canvas pixels.
    pub size: f32,
    /// Clockwise rotation in degrees.
    pub rotate: f32,
    /// Stroke width of the glyph; `0` falls back to the default width.
    pub border_width: f32,
    #[cfg_attr(feature = "tsify", tsify(type = "string"))]
    pub border_color: Color,
    /// Opacity in percent (0-100).
    pub fill_opacity: f32,
    /// Stroke color of the glyph.
    #[cfg_attr(feature = "tsify", tsify(type = "string"))]
    pub fill_color: Color,
    /// Replaces the selected built-in glyph when set.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[cfg_attr(
        feature = "tsify",
        tsify(optional, type = "string | { path: string; viewBox?: string }")
    )]
    pub custom_vector_path: Option<CustomGlyph>,
}

impl Default for IconSettings {
    fn default() -> Self {
        Self {
            size: 300.0,
            rotate: 0.0,
            border_width: 0.0,
            border_color: Color::BLACK,
            fill_opacity: 100.0,
            fill_color: Color::BLACK,
            custom_vector_path: None,
        }
    }
}

impl IconSettings {
    /// Returns a copy with the custom glyph replaced.
    pub fn with_custom_vector_path(mut self, glyph: Option<CustomGlyph>) -> Self {
        self.custom_vector_path = glyph;
        self
    }

    /// Rotation normalized to `[0, 360)`.
    pub fn normalized_rotation(&self) -> f32 {
        self.rotate.rem_euclid(360.0)
    }
}

// ============================================================================
// Background enums
// ============================================================================

/// Shadow tier of the background box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "tsify", derive(Tsify))]
pub enum ShadowLevel {
    #[default]
    #[serde(rename = "none")]
    None,
    #[serde(rename = "sm")]
    Sm,
    #[serde(rename = "md")]
    Md,
    #[serde(rename = "lg")]
    Lg,
    #[serde(rename = "xl")]
    Xl,
    #[serde(rename = "2xl")]
    Xxl,
}

impl ShadowLevel {
    pub const ALL: [Self; 6] = [Self::None, Self::Sm, Self::Md, Self::Lg, Self::Xl, Self::Xxl];
}

/// Gradient geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "tsify", derive(Tsify))]
pub enum GradientType {
    #[default]
    Linear,
    Radial,
}

/// Symbolic center of a radial gradient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "tsify", derive(Tsify))]
pub enum GradientPosition {
    Left,
    #[default]
    Center,
    Right,
    /// Reserved by the UI; rendered as [`GradientPosition::Center`].
    Custom,
}

// ============================================================================
// BackgroundSettings
// ============================================================================

/// Shape and paint of the background box behind the icon.
///
/// When `is_gradient` is false the gradient fields are kept but ignored.
/// When it is true, `fill_color` and `border_color` become the two gradient
/// stops and the border itself is painted transparent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "tsify", derive(Tsify), tsify(into_wasm_abi, from_wasm_abi))]
pub struct BackgroundSettings {
    pub size: f32,
    pub rotate: f32,
    pub border_width: f32,
    #[cfg_attr(feature = "tsify", tsify(type = "string"))]
    pub border_color: Color,
    /// Opacity in percent (0-100).
    pub fill_opacity: f32,
    #[cfg_attr(feature = "tsify", tsify(type = "string"))]
    pub fill_color: Color,
    /// Corner radius in pixels, or [`FULLY_ROUND`].
    pub rounded: f32,
    /// Inset of the background box from the 500x500 zone, per side.
    pub padding: f32,
    pub shadow: ShadowLevel,
    pub is_gradient: bool,
    /// Linear gradient direction in CSS degrees (0 points up).
    pub gradient_angle: f32,
    pub gradient_type: GradientType,
    pub gradient_position: GradientPosition,
}

impl Default for BackgroundSettings {
    fn default() -> Self {
        Self {
            size: 300.0,
            rotate: 0.0,
            border_width: 0.0,
            border_color: Color::new(0xe5, 0xe7, 0xeb),
            fill_opacity: 100.0,
            fill_color: Color::new(0x81, 0x8c, 0xf8),
            rounded: 0.0,
            padding: 45.0,
            shadow: ShadowLevel::None,
            is_gradient: false,
            gradient_angle: 90.0,
            gradient_type: GradientType::Linear,
            gradient_position: GradientPosition::Center,
        }
    }
}

impl BackgroundSettings {
    /// Returns true if `rounded` holds the circle sentinel.
    pub fn is_fully_round(&self) -> bool {
        self.rounded == FULLY_ROUND
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_editor_start_state() {
        let icon = IconSettings::default();
        assert_eq!(icon.size, 300.0);
        assert_eq!(icon.fill_color, Color::BLACK);
        assert!(icon.custom_vector_path.is_none());

        let bg = BackgroundSettings::default();
        assert_eq!(bg.padding, 45.0);
        assert_eq!(bg.fill_color.to_string(), "#818cf8");
        assert_eq!(bg.border_color.to_string(), "#e5e7eb");
        assert_eq!(bg.gradient_position, GradientPosition::Center);
        assert!(!bg.is_fully_round());
    }

    #[test]
    fn background_json_uses_camel_case_and_css_names() {
        let bg = BackgroundSettings {
            shadow: ShadowLevel::Xxl,
            gradient_type: GradientType::Radial,
            ..Default::default()
        };
        let json = serde_json::to_string(&bg).unwrap();
        assert!(json.contains("\"isGradient\":false"));
        assert!(json.contains("\"gradientType\":\"radial\""));
        assert!(json.contains("\"shadow\":\"2xl\""));
        assert!(json.contains("\"fillColor\":\"#818cf8\""));
    }

    #[test]
    fn partial_json_fills_defaults() {
        let bg: BackgroundSettings =
            serde_json::from_str(r##"{"rounded": 9999, "fillColor": "#FF0000"}"##).unwrap();
        assert!(bg.is_fully_round());
        assert_eq!(bg.fill_color, Color::new(255, 0, 0));
        assert_eq!(bg.padding, 45.0);
    }

    #[test]
    fn invalid_color_is_rejected() {
        let result = serde_json::from_str::<IconSettings>(r#"{"fillColor": "blurple"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn rotation_normalizes() {
        let icon = IconSettings {
            rotate: -90.0,
            ..Default::default()
        };
        assert_eq!(icon.normalized_rotation(), 270.0);
    }
}
