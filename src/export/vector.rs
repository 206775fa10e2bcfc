//! Standalone SVG export.
//!
//! The document mirrors the downloadable zone: a full-canvas background rect
//! and the icon group on top. Padding and shadow are preview-only effects and
//! are not part of the vector artifact.

use simple_xml_builder::XMLElement;

use super::svg::{gradient_element, icon_group, num, paint_fill, rounded_rect, svg_root};
use super::{ExportError, CANVAS_SIZE};
use crate::glyph::{resolve_glyph, BuiltinGlyph};
use crate::settings::{BackgroundSettings, IconSettings};
use crate::style::{resolve_background_paint, resolve_corner_radius, resolve_opacity};

/// Builds the SVG document for the current settings.
pub fn export_vector(
    icon: &IconSettings,
    background: &BackgroundSettings,
    glyph: BuiltinGlyph,
) -> Result<String, ExportError> {
    let glyph = resolve_glyph(glyph, icon)?;
    let paint = resolve_background_paint(background);

    let mut root = svg_root(CANVAS_SIZE);
    if let Some(gradient) = gradient_element(&paint) {
        let mut defs = XMLElement::new("defs");
        defs.add_child(gradient);
        root.add_child(defs);
    }

    let mut rect = rounded_rect(
        0.0,
        0.0,
        CANVAS_SIZE,
        resolve_corner_radius(background.rounded, CANVAS_SIZE),
    );
    rect.add_attribute("fill", &paint_fill(&paint));
    if !paint.is_gradient() && background.border_width > 0.0 {
        rect.add_attribute("stroke", &background.border_color.to_string());
        rect.add_attribute("stroke-width", &num(background.border_width));
    }

    let mut scene = XMLElement::new("g");
    let opacity = resolve_opacity(background.fill_opacity);
    if opacity < 1.0 {
        scene.add_attribute("opacity", &num(opacity));
    }
    scene.add_child(rect);
    scene.add_child(icon_group(icon, &glyph, CANVAS_SIZE));
    root.add_child(scene);

    let document = root.to_string();
    log::debug!("built vector document ({} bytes)", document.len());
    Ok(document)
}

#[cfg(test)]
mod tests {
    use resvg::usvg::{self, Node, Paint};

    use super::*;
    use crate::color::Color;
    use crate::export::svg::rasterize;
    use crate::glyph::{CustomGlyph, GlyphError};
    use crate::settings::{GradientPosition, GradientType, FULLY_ROUND};

    /// Returns the first gradient paint found on any path in the tree.
    fn first_gradient_stops(group: &usvg::Group) -> Option<Vec<(u8, u8, u8, f32)>> {
        for node in group.children() {
            match node {
                Node::Group(child) => {
                    if let Some(stops) = first_gradient_stops(child) {
                        return Some(stops);
                    }
                }
                Node::Path(path) => {
                    let stops = match path.fill().map(|fill| fill.paint()) {
                        Some(Paint::LinearGradient(lg)) => lg.stops(),
                        Some(Paint::RadialGradient(rg)) => rg.stops(),
                        _ => continue,
                    };
                    return Some(
                        stops
                            .iter()
                            .map(|s| {
                                let c = s.color();
                                (c.red, c.green, c.blue, s.offset().get())
                            })
                            .collect(),
                    );
                }
                _ => {}
            }
        }
        None
    }

    fn parse(svg: &str) -> usvg::Tree {
        usvg::Tree::from_str(svg, &usvg::Options::default()).unwrap()
    }

    fn gradient_background(gradient_type: GradientType, position: GradientPosition) -> BackgroundSettings {
        BackgroundSettings {
            is_gradient: true,
            gradient_type,
            gradient_position: position,
            fill_color: Color::new(255, 0, 0),
            border_color: Color::new(0, 0, 255),
            ..Default::default()
        }
    }

    #[test]
    fn document_parses_as_svg() {
        let svg = export_vector(&IconSettings::default(), &BackgroundSettings::default(), BuiltinGlyph::Book)
            .unwrap();
        let tree = parse(&svg);
        assert_eq!(tree.size().width(), 500.0);
        assert_eq!(tree.size().height(), 500.0);
    }

    #[test]
    fn gradient_stops_survive_export() {
        for gradient_type in [GradientType::Linear, GradientType::Radial] {
            let bg = gradient_background(gradient_type, GradientPosition::Center);
            let svg = export_vector(&IconSettings::default(), &bg, BuiltinGlyph::Book).unwrap();
            let stops = first_gradient_stops(parse(&svg).root()).expect("gradient fill");
            let resolved: Vec<_> = resolve_background_paint(&bg)
                .stops()
                .expect("gradient paint")
                .iter()
                .map(|s| (s.color.r, s.color.g, s.color.b, s.offset))
                .collect();
            assert_eq!(stops, resolved);
        }
    }

    #[test]
    fn solid_background_has_no_gradient() {
        let bg = BackgroundSettings {
            is_gradient: false,
            gradient_type: GradientType::Radial,
            ..Default::default()
        };
        let svg = export_vector(&IconSettings::default(), &bg, BuiltinGlyph::Book).unwrap();
        assert!(first_gradient_stops(parse(&svg).root()).is_none());
        assert!(!svg.contains("logoGradient"));
    }

    #[test]
    fn radial_right_is_brightest_on_the_right() {
        let bg = gradient_background(GradientType::Radial, GradientPosition::Right);
        let icon = IconSettings {
            size: 10.0,
            ..Default::default()
        };
        let svg = export_vector(&icon, &bg, BuiltinGlyph::Book).unwrap();
        let img = rasterize(&svg, CANVAS_SIZE, 1.0).unwrap();

        let right = img.get_pixel(498, 250);
        let left = img.get_pixel(1, 250);
        // Fill (red) is the inner stop at the right edge, border (blue) the outer.
        assert!(right[0] > 240 && right[2] < 15, "right edge {right:?}");
        assert!(left[2] > left[0], "left edge {left:?}");
    }

    #[test]
    fn fully_round_background_is_a_circle() {
        let bg = BackgroundSettings {
            rounded: FULLY_ROUND,
            ..Default::default()
        };
        let icon = IconSettings {
            size: 10.0,
            ..Default::default()
        };
        let svg = export_vector(&icon, &bg, BuiltinGlyph::Check).unwrap();
        let img = rasterize(&svg, CANVAS_SIZE, 1.0).unwrap();

        assert_eq!(img.get_pixel(10, 10)[3], 0, "corner lies outside the circle");
        assert_eq!(img.get_pixel(250, 3)[3], 255, "top edge lies inside the circle");
        assert_eq!(img.get_pixel(3, 250)[3], 255, "left edge lies inside the circle");
    }

    #[test]
    fn background_opacity_wraps_the_icon() {
        let bg = BackgroundSettings {
            fill_opacity: 50.0,
            ..Default::default()
        };
        let svg = export_vector(&IconSettings::default(), &bg, BuiltinGlyph::Book).unwrap();
        let img = rasterize(&svg, CANVAS_SIZE, 1.0).unwrap();
        let alpha = img.get_pixel(20, 250)[3];
        assert!((120..=135).contains(&alpha), "alpha {alpha}");
    }

    fn stroke_widths(group: &usvg::Group, out: &mut Vec<f32>) {
        for node in group.children() {
            match node {
                Node::Group(child) => stroke_widths(child, out),
                Node::Path(path) => {
                    if let Some(stroke) = path.stroke() {
                        out.push(stroke.width().get());
                    }
                }
                _ => {}
            }
        }
    }

    /// Returns the stroke width of the first path in the tree, which is the
    /// background rect.
    fn background_stroke(group: &usvg::Group) -> Option<Option<f32>> {
        for node in group.children() {
            match node {
                Node::Group(child) => {
                    if let Some(found) = background_stroke(child) {
                        return Some(found);
                    }
                }
                Node::Path(path) => return Some(path.stroke().map(|s| s.width().get())),
                _ => {}
            }
        }
        None
    }

    #[test]
    fn only_solid_backgrounds_get_a_border_stroke() {
        let solid = BackgroundSettings {
            border_width: 6.0,
            ..Default::default()
        };
        let svg = export_vector(&IconSettings::default(), &solid, BuiltinGlyph::Book).unwrap();
        assert_eq!(background_stroke(parse(&svg).root()), Some(Some(6.0)));

        for gradient_type in [GradientType::Linear, GradientType::Radial] {
            let gradient = BackgroundSettings {
                border_width: 6.0,
                ..gradient_background(gradient_type, GradientPosition::Center)
            };
            let svg = export_vector(&IconSettings::default(), &gradient, BuiltinGlyph::Book).unwrap();
            assert_eq!(background_stroke(parse(&svg).root()), Some(None));
        }
    }

    #[test]
    fn rotated_icon_uses_centered_transform_and_default_stroke() {
        let icon = IconSettings {
            size: 300.0,
            rotate: 45.0,
            border_width: 0.0,
            fill_color: Color::BLACK,
            fill_opacity: 100.0,
            ..Default::default()
        };
        let svg = export_vector(&icon, &BackgroundSettings::default(), BuiltinGlyph::Book).unwrap();
        assert!(svg.contains("translate(100,100) rotate(45 150 150)"));

        let mut widths = Vec::new();
        stroke_widths(parse(&svg).root(), &mut widths);
        assert!(!widths.is_empty());
        assert!(widths.iter().all(|w| *w == 2.0), "{widths:?}");
    }

    #[test]
    fn custom_glyph_must_start_with_moveto() {
        let icon = IconSettings::default().with_custom_vector_path(Some(CustomGlyph::new("L4 4")));
        let result = export_vector(&icon, &BackgroundSettings::default(), BuiltinGlyph::Book);
        assert!(matches!(
            result,
            Err(ExportError::MissingGlyph(GlyphError::MissingMoveTo('L')))
        ));
    }

    #[test]
    fn custom_glyph_replaces_builtin() {
        let icon = IconSettings {
            size: 240.0,
            fill_color: Color::new(0, 128, 0),
            ..Default::default()
        }
        .with_custom_vector_path(Some(CustomGlyph::new("M2 12h20")));
        let bg = BackgroundSettings {
            fill_color: Color::WHITE,
            ..Default::default()
        };
        let svg = export_vector(&icon, &bg, BuiltinGlyph::Book).unwrap();
        assert!(svg.contains("M2 12h20"));

        let img = rasterize(&svg, CANVAS_SIZE, 1.0).unwrap();
        // A horizontal line across the middle of the icon box.
        assert_eq!(img.get_pixel(250, 250).0, [0, 128, 0, 255]);
        assert_eq!(img.get_pixel(250, 200).0, [255, 255, 255, 255]);
    }
}
