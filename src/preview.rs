//! CSS styles for the live preview.
//!
//! The preview is a padded, rounded container holding a rotated icon box.
//! Its styles come from the same resolvers the exporters use, so what the
//! user sees is what gets exported.

use serde::ser::{Serialize, Serializer};

use crate::export::svg::num;
use crate::export::CANVAS_SIZE;
use crate::settings::{BackgroundSettings, GradientPosition, IconSettings};
use crate::style::{
    resolve_background_paint, resolve_corner_radius, resolve_opacity, resolve_padding,
    resolve_shadow, resolve_stroke_width, PaintDescriptor,
};

/// An ordered list of CSS declarations.
///
/// Serializes as a `{ property: value }` map, ready to be assigned to an
/// element's style.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CssStyle {
    declarations: Vec<(&'static str, String)>,
}

impl CssStyle {
    fn set(&mut self, property: &'static str, value: impl Into<String>) {
        self.declarations.push((property, value.into()));
    }

    /// Returns the value of a property, if declared.
    pub fn get(&self, property: &str) -> Option<&str> {
        self.declarations
            .iter()
            .find(|(name, _)| *name == property)
            .map(|(_, value)| value.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.declarations.iter().map(|(name, value)| (*name, value.as_str()))
    }

    /// Renders the declarations as an inline `style` attribute value.
    pub fn to_inline(&self) -> String {
        self.iter()
            .map(|(name, value)| format!("{name}: {value}"))
            .collect::<Vec<_>>()
            .join("; ")
    }
}

impl Serialize for CssStyle {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter())
    }
}

/// Styles of the two preview elements.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewStyles {
    /// The background box inside the 500x500 downloadable zone.
    pub container: CssStyle,
    /// The icon box centered in the container.
    pub icon: CssStyle,
}

impl PreviewStyles {
    pub fn resolve(icon: &IconSettings, background: &BackgroundSettings) -> Self {
        Self {
            container: container_style(background),
            icon: icon_style(icon),
        }
    }
}

fn px(value: f32) -> String {
    format!("{}px", num(value))
}

fn container_style(background: &BackgroundSettings) -> CssStyle {
    let padding = resolve_padding(background.padding);
    let box_size = (CANVAS_SIZE - 2.0 * padding).max(0.0);
    let mut style = CssStyle::default();

    style.set("box-sizing", "border-box");
    style.set("width", px(box_size));
    style.set("height", px(box_size));
    style.set("margin", px(padding));
    let radius = if background.is_fully_round() {
        "50%".to_string()
    } else {
        px(resolve_corner_radius(background.rounded, box_size))
    };
    style.set("border-radius", radius);

    let paint = resolve_background_paint(background);
    let border_color = match paint {
        PaintDescriptor::Solid { color } => {
            style.set("background-color", color.to_string());
            background.border_color.to_string()
        }
        PaintDescriptor::Linear(linear) => {
            style.set(
                "background",
                format!(
                    "linear-gradient({}deg, {}, {})",
                    num(linear.angle),
                    linear.stops[0].color,
                    linear.stops[1].color
                ),
            );
            "transparent".to_string()
        }
        PaintDescriptor::Radial(radial) => {
            let at = match radial.position {
                GradientPosition::Left => "left",
                GradientPosition::Right => "right",
                GradientPosition::Center | GradientPosition::Custom => "center",
            };
            style.set(
                "background",
                format!(
                    "radial-gradient(circle at {at}, {}, {})",
                    radial.stops[0].color, radial.stops[1].color
                ),
            );
            "transparent".to_string()
        }
    };
    style.set(
        "border",
        format!("{} solid {border_color}", px(background.border_width.max(0.0))),
    );

    style.set("opacity", num(resolve_opacity(background.fill_opacity)));
    style.set("box-shadow", resolve_shadow(background.shadow).to_css());
    style
}

fn icon_style(icon: &IconSettings) -> CssStyle {
    let mut style = CssStyle::default();
    style.set("width", px(icon.size));
    style.set("height", px(icon.size));
    style.set("transform", format!("rotate({}deg)", num(icon.normalized_rotation())));
    style.set("opacity", num(resolve_opacity(icon.fill_opacity)));
    style.set("stroke", icon.fill_color.to_string());
    style.set("stroke-width", num(resolve_stroke_width(icon.border_width)));
    style
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::{GradientType, ShadowLevel, FULLY_ROUND};

    #[test]
    fn default_container_is_padded_and_solid() {
        let styles = PreviewStyles::resolve(&IconSettings::default(), &BackgroundSettings::default());
        let c = &styles.container;
        assert_eq!(c.get("width"), Some("410px"));
        assert_eq!(c.get("margin"), Some("45px"));
        assert_eq!(c.get("border-radius"), Some("0px"));
        assert_eq!(c.get("background-color"), Some("#818cf8"));
        assert_eq!(c.get("border"), Some("0px solid #e5e7eb"));
        assert_eq!(c.get("opacity"), Some("1"));
        assert_eq!(c.get("box-shadow"), Some("none"));
        assert_eq!(c.get("background"), None);
    }

    #[test]
    fn gradient_container_uses_transparent_border() {
        let bg = BackgroundSettings {
            is_gradient: true,
            gradient_angle: 135.0,
            border_width: 4.0,
            ..Default::default()
        };
        let styles = PreviewStyles::resolve(&IconSettings::default(), &bg);
        assert_eq!(
            styles.container.get("background"),
            Some("linear-gradient(135deg, #818cf8, #e5e7eb)")
        );
        assert_eq!(styles.container.get("border"), Some("4px solid transparent"));

        let radial = BackgroundSettings {
            gradient_type: GradientType::Radial,
            gradient_position: GradientPosition::Custom,
            ..bg
        };
        let styles = PreviewStyles::resolve(&IconSettings::default(), &radial);
        assert_eq!(
            styles.container.get("background"),
            Some("radial-gradient(circle at center, #818cf8, #e5e7eb)")
        );
    }

    #[test]
    fn fully_round_and_shadow() {
        let bg = BackgroundSettings {
            rounded: FULLY_ROUND,
            shadow: ShadowLevel::Sm,
            fill_opacity: 40.0,
            ..Default::default()
        };
        let styles = PreviewStyles::resolve(&IconSettings::default(), &bg);
        assert_eq!(styles.container.get("border-radius"), Some("50%"));
        assert_eq!(
            styles.container.get("box-shadow"),
            Some("0px 1px 2px 0px rgb(0 0 0 / 0.05)")
        );
        assert_eq!(styles.container.get("opacity"), Some("0.4"));
    }

    #[test]
    fn icon_style_matches_export_stroke() {
        let icon = IconSettings {
            size: 300.0,
            rotate: 45.0,
            ..Default::default()
        };
        let styles = PreviewStyles::resolve(&icon, &BackgroundSettings::default());
        assert_eq!(styles.icon.get("transform"), Some("rotate(45deg)"));
        assert_eq!(styles.icon.get("stroke-width"), Some("2"));
        assert_eq!(styles.icon.get("stroke"), Some("#000000"));
        assert_eq!(styles.icon.get("width"), Some("300px"));
    }

    #[test]
    fn negative_padding_fills_the_zone() {
        let bg = BackgroundSettings {
            padding: -20.0,
            ..Default::default()
        };
        let styles = PreviewStyles::resolve(&IconSettings::default(), &bg);
        assert_eq!(styles.container.get("width"), Some("500px"));
        assert_eq!(styles.container.get("margin"), Some("0px"));
    }

    #[test]
    fn serializes_as_property_map() {
        let styles = PreviewStyles::resolve(&IconSettings::default(), &BackgroundSettings::default());
        let json = serde_json::to_value(&styles).unwrap();
        assert_eq!(json["container"]["margin"], "45px");
        assert_eq!(json["icon"]["stroke-width"], "2");
        assert!(styles.icon.to_inline().starts_with("width: 300px; height: 300px"));
    }
}
