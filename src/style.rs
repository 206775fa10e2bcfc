//! Style resolution shared by the live preview and both exporters.
//!
//! Everything here is a pure function of the settings records. The preview,
//! the vector exporter and the raster exporter all call the same resolvers,
//! which keeps the three renderings in sync.

use std::f32::consts::FRAC_PI_2;

use serde::Serialize;

use crate::color::Color;
use crate::settings::{BackgroundSettings, GradientPosition, GradientType, ShadowLevel, FULLY_ROUND};

/// Stroke width used when an icon's border width is unset.
pub const DEFAULT_STROKE_WIDTH: f32 = 2.0;

// ============================================================================
// Paint
// ============================================================================

/// A gradient color stop at a normalized offset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GradientStop {
    pub offset: f32,
    pub color: Color,
}

/// A point in normalized box coordinates (`0..1` spans the box).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NormalizedPoint {
    pub x: f32,
    pub y: f32,
}

impl NormalizedPoint {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// A two-stop linear gradient following CSS `linear-gradient(<angle>, ...)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LinearGradient {
    /// Direction in CSS degrees: 0 points up, 90 points right.
    pub angle: f32,
    pub stops: [GradientStop; 2],
}

impl LinearGradient {
    /// Returns the gradient line's start and end points in normalized box
    /// units.
    ///
    /// The line passes through the box center in the direction of `angle`
    /// and has the CSS gradient-line length, so the first and last stops
    /// land on the box corners (or edges for axis-aligned angles).
    pub fn endpoints(&self) -> (NormalizedPoint, NormalizedPoint) {
        let theta = self.angle.to_radians();
        let half_length = (theta.sin().abs() + theta.cos().abs()) / 2.0;
        let direction = theta - FRAC_PI_2;
        let dx = direction.cos() * half_length;
        let dy = direction.sin() * half_length;
        (
            NormalizedPoint::new(0.5 - dx, 0.5 - dy),
            NormalizedPoint::new(0.5 + dx, 0.5 + dy),
        )
    }
}

/// A two-stop circular gradient following CSS
/// `radial-gradient(circle at <position>, ...)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RadialGradient {
    pub position: GradientPosition,
    /// Gradient center, which is also the focal point.
    pub center: NormalizedPoint,
    /// Distance from the center to the farthest box corner.
    pub radius: f32,
    /// Inner stop first.
    pub stops: [GradientStop; 2],
}

/// How the background box is painted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum PaintDescriptor {
    Solid { color: Color },
    Linear(LinearGradient),
    Radial(RadialGradient),
}

impl PaintDescriptor {
    /// Returns the gradient stops, or `None` for a solid paint.
    pub fn stops(&self) -> Option<&[GradientStop; 2]> {
        match self {
            Self::Solid { .. } => None,
            Self::Linear(linear) => Some(&linear.stops),
            Self::Radial(radial) => Some(&radial.stops),
        }
    }

    pub fn is_gradient(&self) -> bool {
        !matches!(self, Self::Solid { .. })
    }
}

/// Resolves the background paint.
///
/// Gradient stops reuse the background's `fill_color` (first stop) and
/// `border_color` (second stop). With `is_gradient` unset the gradient fields
/// are ignored entirely.
pub fn resolve_background_paint(settings: &BackgroundSettings) -> PaintDescriptor {
    if !settings.is_gradient {
        return PaintDescriptor::Solid {
            color: settings.fill_color,
        };
    }

    let stops = [
        GradientStop {
            offset: 0.0,
            color: settings.fill_color,
        },
        GradientStop {
            offset: 1.0,
            color: settings.border_color,
        },
    ];

    match settings.gradient_type {
        GradientType::Linear => PaintDescriptor::Linear(LinearGradient {
            angle: settings.gradient_angle,
            stops,
        }),
        GradientType::Radial => {
            let center = radial_center(settings.gradient_position);
            PaintDescriptor::Radial(RadialGradient {
                position: settings.gradient_position,
                center,
                radius: farthest_corner(center),
                stops,
            })
        }
    }
}

/// Maps a symbolic radial position to normalized coordinates.
pub fn radial_center(position: GradientPosition) -> NormalizedPoint {
    match position {
        GradientPosition::Left => NormalizedPoint::new(0.0, 0.5),
        GradientPosition::Right => NormalizedPoint::new(1.0, 0.5),
        GradientPosition::Center | GradientPosition::Custom => NormalizedPoint::new(0.5, 0.5),
    }
}

fn farthest_corner(center: NormalizedPoint) -> f32 {
    let dx = center.x.max(1.0 - center.x);
    let dy = center.y.max(1.0 - center.y);
    dx.hypot(dy)
}

// ============================================================================
// Shadow
// ============================================================================

/// One layer of a CSS-style box shadow, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShadowLayer {
    pub offset_x: f32,
    pub offset_y: f32,
    pub blur: f32,
    pub spread: f32,
    /// Opacity of the black shadow color.
    pub opacity: f32,
}

impl ShadowLayer {
    const fn new(offset_y: f32, blur: f32, spread: f32, opacity: f32) -> Self {
        Self {
            offset_x: 0.0,
            offset_y,
            blur,
            spread,
            opacity,
        }
    }

    /// Renders the layer as a `box-shadow` component.
    pub fn to_css(&self) -> String {
        format!(
            "{}px {}px {}px {}px rgb(0 0 0 / {})",
            self.offset_x, self.offset_y, self.blur, self.spread, self.opacity
        )
    }
}

/// The resolved shadow of the background box. Layers are listed front to
/// back, as in CSS.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ShadowSpec {
    pub layers: &'static [ShadowLayer],
}

impl ShadowSpec {
    pub fn is_none(&self) -> bool {
        self.layers.is_empty()
    }

    /// Renders all layers as one `box-shadow` value.
    pub fn to_css(&self) -> String {
        if self.is_none() {
            return "none".to_string();
        }
        self.layers
            .iter()
            .map(ShadowLayer::to_css)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

const SHADOW_SM: [ShadowLayer; 1] = [ShadowLayer::new(1.0, 2.0, 0.0, 0.05)];
const SHADOW_MD: [ShadowLayer; 2] = [
    ShadowLayer::new(4.0, 6.0, -1.0, 0.1),
    ShadowLayer::new(2.0, 4.0, -2.0, 0.1),
];
const SHADOW_LG: [ShadowLayer; 2] = [
    ShadowLayer::new(10.0, 15.0, -3.0, 0.1),
    ShadowLayer::new(4.0, 6.0, -4.0, 0.1),
];
const SHADOW_XL: [ShadowLayer; 2] = [
    ShadowLayer::new(20.0, 25.0, -5.0, 0.1),
    ShadowLayer::new(8.0, 10.0, -6.0, 0.1),
];
const SHADOW_2XL: [ShadowLayer; 1] = [ShadowLayer::new(25.0, 50.0, -12.0, 0.25)];

/// Looks up the shadow layers for a tier.
pub fn resolve_shadow(level: ShadowLevel) -> ShadowSpec {
    let layers: &'static [ShadowLayer] = match level {
        ShadowLevel::None => &[],
        ShadowLevel::Sm => &SHADOW_SM,
        ShadowLevel::Md => &SHADOW_MD,
        ShadowLevel::Lg => &SHADOW_LG,
        ShadowLevel::Xl => &SHADOW_XL,
        ShadowLevel::Xxl => &SHADOW_2XL,
    };
    ShadowSpec { layers }
}

// ============================================================================
// Scalars
// ============================================================================

/// Resolves the corner radius of a square box of edge `box_size`.
///
/// [`FULLY_ROUND`] yields exactly half the box, i.e. a circle. Other values
/// are clamped to `[0, box_size / 2]`, like CSS and SVG do.
pub fn resolve_corner_radius(rounded: f32, box_size: f32) -> f32 {
    let half = (box_size / 2.0).max(0.0);
    if rounded == FULLY_ROUND {
        half
    } else if rounded.is_finite() {
        rounded.clamp(0.0, half)
    } else {
        0.0
    }
}

/// Resolves the gap between the downloadable zone and the background box.
///
/// Negative and non-finite values collapse to zero.
pub fn resolve_padding(padding: f32) -> f32 {
    if padding.is_finite() {
        padding.max(0.0)
    } else {
        0.0
    }
}

/// Converts a percent opacity to `[0, 1]`.
pub fn resolve_opacity(percent: f32) -> f32 {
    if percent.is_nan() {
        return 1.0;
    }
    (percent / 100.0).clamp(0.0, 1.0)
}

/// Resolves the icon stroke width, falling back to [`DEFAULT_STROKE_WIDTH`]
/// when the border width is zero or unset.
pub fn resolve_stroke_width(border_width: f32) -> f32 {
    if border_width > 0.0 && border_width.is_finite() {
        border_width
    } else {
        DEFAULT_STROKE_WIDTH
    }
}
