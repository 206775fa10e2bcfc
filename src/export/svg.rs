//! SVG scene building and rendering utilities.
//!
//! Both exporters assemble their documents from the element builders here,
//! so the gradient definition and the icon group are written exactly once.
//! The raster exporter then renders the document with resvg.

use image::{Rgba, RgbaImage};
use resvg::tiny_skia::{Pixmap, Transform};
use resvg::usvg::{Options, Tree};
use simple_xml_builder::XMLElement;

use super::ExportError;
use crate::glyph::{GlyphPrimitive, ResolvedGlyph};
use crate::settings::IconSettings;
use crate::style::{resolve_opacity, resolve_stroke_width, GradientStop, PaintDescriptor};

const SVG_NAMESPACE: &str = "http://www.w3.org/2000/svg";

/// Id of the background gradient definition.
pub const GRADIENT_ID: &str = "logoGradient";

// ============================================================================
// Formatting
// ============================================================================

/// Formats a coordinate with at most four decimals and no trailing zeros.
pub fn num(value: f32) -> String {
    let rounded = (value * 10_000.0).round() / 10_000.0;
    // Avoid "-0".
    if rounded == 0.0 {
        return "0".to_string();
    }
    rounded.to_string()
}

fn percent(value: f32) -> String {
    format!("{}%", num(value * 100.0))
}

// ============================================================================
// Element builders
// ============================================================================

/// Creates the root `<svg>` element for a square canvas.
pub fn svg_root(canvas: f32) -> XMLElement {
    let mut root = XMLElement::new("svg");
    root.add_attribute("xmlns", SVG_NAMESPACE);
    root.add_attribute("width", &num(canvas));
    root.add_attribute("height", &num(canvas));
    root.add_attribute("viewBox", &format!("0 0 {} {}", num(canvas), num(canvas)));
    root
}

/// Creates a `<rect>` with uniform corner radius.
pub fn rounded_rect(x: f32, y: f32, size: f32, radius: f32) -> XMLElement {
    let mut rect = XMLElement::new("rect");
    rect.add_attribute("x", &num(x));
    rect.add_attribute("y", &num(y));
    rect.add_attribute("width", &num(size));
    rect.add_attribute("height", &num(size));
    if radius > 0.0 {
        rect.add_attribute("rx", &num(radius));
        rect.add_attribute("ry", &num(radius));
    }
    rect
}

/// Returns the `fill` value for a paint, referencing [`GRADIENT_ID`] for
/// gradients.
pub fn paint_fill(paint: &PaintDescriptor) -> String {
    match paint {
        PaintDescriptor::Solid { color } => color.to_string(),
        PaintDescriptor::Linear(_) | PaintDescriptor::Radial(_) => format!("url(#{GRADIENT_ID})"),
    }
}

/// Builds the gradient definition for a paint, or `None` for solid paints.
///
/// Coordinates are in `objectBoundingBox` units, so the gradient stretches
/// over whatever shape references it.
pub fn gradient_element(paint: &PaintDescriptor) -> Option<XMLElement> {
    let mut gradient = match paint {
        PaintDescriptor::Solid { .. } => return None,
        PaintDescriptor::Linear(linear) => {
            let (start, end) = linear.endpoints();
            let mut el = XMLElement::new("linearGradient");
            el.add_attribute("id", GRADIENT_ID);
            el.add_attribute("x1", &percent(start.x));
            el.add_attribute("y1", &percent(start.y));
            el.add_attribute("x2", &percent(end.x));
            el.add_attribute("y2", &percent(end.y));
            el
        }
        PaintDescriptor::Radial(radial) => {
            let mut el = XMLElement::new("radialGradient");
            el.add_attribute("id", GRADIENT_ID);
            el.add_attribute("gradientUnits", "objectBoundingBox");
            el.add_attribute("cx", &num(radial.center.x));
            el.add_attribute("cy", &num(radial.center.y));
            el.add_attribute("r", &num(radial.radius));
            el.add_attribute("fx", &num(radial.center.x));
            el.add_attribute("fy", &num(radial.center.y));
            el
        }
    };

    if let Some(stops) = paint.stops() {
        for stop in stops {
            gradient.add_child(stop_element(stop));
        }
    }
    Some(gradient)
}

fn stop_element(stop: &GradientStop) -> XMLElement {
    let mut el = XMLElement::new("stop");
    el.add_attribute("offset", &percent(stop.offset));
    el.add_attribute("stop-color", &stop.color.to_string());
    el
}

/// Returns the icon group's transform on a square canvas.
///
/// The icon box is centered on the canvas and rotated about its own center.
pub fn icon_transform(icon: &IconSettings, canvas: f32) -> String {
    let offset = (canvas - icon.size) / 2.0;
    let pivot = icon.size / 2.0;
    format!(
        "translate({},{}) rotate({} {} {})",
        num(offset),
        num(offset),
        num(icon.normalized_rotation()),
        num(pivot),
        num(pivot)
    )
}

/// Builds the positioned, rotated and recolored icon group.
///
/// The stroke color, stroke width and `fill="none"` are set on the nested
/// `<svg>` and repeated on every primitive.
pub fn icon_group(icon: &IconSettings, glyph: &ResolvedGlyph<'_>, canvas: f32) -> XMLElement {
    let stroke = icon.fill_color.to_string();
    let stroke_width = num(resolve_stroke_width(icon.border_width));

    let mut group = XMLElement::new("g");
    group.add_attribute("transform", &icon_transform(icon, canvas));
    let opacity = resolve_opacity(icon.fill_opacity);
    if opacity < 1.0 {
        group.add_attribute("opacity", &num(opacity));
    }

    let vb = glyph.view_box;
    let mut svg = XMLElement::new("svg");
    svg.add_attribute("width", &num(icon.size));
    svg.add_attribute("height", &num(icon.size));
    svg.add_attribute(
        "viewBox",
        &format!("{} {} {} {}", num(vb.min_x), num(vb.min_y), num(vb.width), num(vb.height)),
    );
    svg.add_attribute("fill", "none");
    svg.add_attribute("stroke", &stroke);
    svg.add_attribute("stroke-width", &stroke_width);
    svg.add_attribute("stroke-linecap", "round");
    svg.add_attribute("stroke-linejoin", "round");

    for primitive in &glyph.primitives {
        let mut el = primitive_element(primitive);
        el.add_attribute("fill", "none");
        el.add_attribute("stroke", &stroke);
        el.add_attribute("stroke-width", &stroke_width);
        svg.add_child(el);
    }

    group.add_child(svg);
    group
}

fn primitive_element(primitive: &GlyphPrimitive<'_>) -> XMLElement {
    match *primitive {
        GlyphPrimitive::Path(data) => {
            let mut el = XMLElement::new("path");
            el.add_attribute("d", data);
            el
        }
        GlyphPrimitive::Rect {
            x,
            y,
            width,
            height,
            rx,
        } => {
            let mut el = XMLElement::new("rect");
            el.add_attribute("x", &num(x));
            el.add_attribute("y", &num(y));
            el.add_attribute("width", &num(width));
            el.add_attribute("height", &num(height));
            if rx > 0.0 {
                el.add_attribute("rx", &num(rx));
            }
            el
        }
        GlyphPrimitive::Line { x1, y1, x2, y2 } => {
            let mut el = XMLElement::new("line");
            el.add_attribute("x1", &num(x1));
            el.add_attribute("y1", &num(y1));
            el.add_attribute("x2", &num(x2));
            el.add_attribute("y2", &num(y2));
            el
        }
        GlyphPrimitive::Circle { cx, cy, r } => {
            let mut el = XMLElement::new("circle");
            el.add_attribute("cx", &num(cx));
            el.add_attribute("cy", &num(cy));
            el.add_attribute("r", &num(r));
            el
        }
    }
}

// ============================================================================
// Rendering
// ============================================================================

/// Renders an SVG document onto a transparent `size * scale` square image.
pub fn rasterize(svg_data: &str, size: f32, scale: f32) -> Result<RgbaImage, ExportError> {
    let tree = Tree::from_str(svg_data, &Options::default())?;

    let pixels = (size * scale).round().max(0.0) as u32;
    let mut pixmap = Pixmap::new(pixels, pixels).ok_or(ExportError::Pixmap {
        width: pixels,
        height: pixels,
    })?;
    resvg::render(&tree, Transform::from_scale(scale, scale), &mut pixmap.as_mut());

    Ok(pixmap_to_rgba_image(&pixmap))
}

/// Converts a tiny_skia Pixmap to an image::RgbaImage.
fn pixmap_to_rgba_image(pixmap: &Pixmap) -> RgbaImage {
    let width = pixmap.width();
    let mut img = RgbaImage::new(width, pixmap.height());

    for (i, pixel) in pixmap.pixels().iter().enumerate() {
        let x = i as u32 % width;
        let y = i as u32 / width;
        // tiny_skia uses premultiplied alpha, we need to unpremultiply
        let (r, g, b, a) = unpremultiply(pixel.red(), pixel.green(), pixel.blue(), pixel.alpha());
        img.put_pixel(x, y, Rgba([r, g, b, a]));
    }

    img
}

/// Unpremultiplies a premultiplied alpha pixel.
fn unpremultiply(r: u8, g: u8, b: u8, a: u8) -> (u8, u8, u8, u8) {
    if a == 0 {
        (0, 0, 0, 0)
    } else {
        let a_f = a as f32 / 255.0;
        (
            (r as f32 / a_f).round().min(255.0) as u8,
            (g as f32 / a_f).round().min(255.0) as u8,
            (b as f32 / a_f).round().min(255.0) as u8,
            a,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;
    use crate::glyph::BuiltinGlyph;

    const SIMPLE_SVG: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="100" height="100"><circle cx="50" cy="50" r="40" fill="#ff0000"/></svg>"##;

    #[test]
    fn num_trims_and_rounds() {
        assert_eq!(num(100.0), "100");
        assert_eq!(num(0.70710678), "0.7071");
        assert_eq!(num(-0.00001), "0");
        assert_eq!(num(12.5), "12.5");
    }

    #[test]
    fn icon_transform_centers_and_pivots() {
        let icon = IconSettings {
            size: 300.0,
            rotate: 45.0,
            ..Default::default()
        };
        assert_eq!(icon_transform(&icon, 500.0), "translate(100,100) rotate(45 150 150)");

        let small = IconSettings {
            size: 120.0,
            rotate: 370.0,
            ..Default::default()
        };
        assert_eq!(icon_transform(&small, 500.0), "translate(190,190) rotate(10 60 60)");
    }

    #[test]
    fn rasterize_simple_svg() {
        let img = rasterize(SIMPLE_SVG, 100.0, 2.0).unwrap();
        assert_eq!(img.dimensions(), (200, 200));

        let center = img.get_pixel(100, 100);
        assert_eq!(center.0, [255, 0, 0, 255]);

        let corner = img.get_pixel(0, 0);
        assert_eq!(corner[3], 0, "outside the circle stays transparent");
    }

    #[test]
    fn rasterize_rejects_malformed_markup() {
        let result = rasterize("<svg", 100.0, 1.0);
        assert!(matches!(result, Err(ExportError::Scene(_))));
    }

    #[test]
    fn icon_group_renders_in_fill_color() {
        let icon = IconSettings {
            size: 500.0,
            fill_color: Color::new(0, 0, 255),
            border_width: 0.0,
            ..Default::default()
        };
        let glyph = BuiltinGlyph::Check.resolve();
        let mut root = svg_root(500.0);
        root.add_child(icon_group(&icon, &glyph, 500.0));

        let img = rasterize(&root.to_string(), 500.0, 1.0).unwrap();
        // The check mark's lower vertex sits at (9, 17) in the 24x24 box.
        let vertex = img.get_pixel((9.0 * 500.0 / 24.0) as u32, (17.0 * 500.0 / 24.0) as u32);
        assert_eq!(vertex.0, [0, 0, 255, 255]);
    }

    #[test]
    fn unpremultiply_restores_channels() {
        assert_eq!(unpremultiply(0, 0, 0, 0), (0, 0, 0, 0));
        assert_eq!(unpremultiply(128, 0, 0, 128), (255, 0, 0, 128));
    }
}
