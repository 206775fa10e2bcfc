//! PNG export.
//!
//! The composition is rebuilt as a style-complete SVG scene from the resolved
//! settings and rendered headlessly with resvg. Unlike the vector artifact,
//! the scene includes everything the preview shows around the box: padding,
//! inset border and box shadow layers.

use std::io::Cursor;

use image::{ImageFormat, RgbaImage};
use serde::{Deserialize, Serialize};
use simple_xml_builder::XMLElement;

use super::svg::{gradient_element, icon_group, num, paint_fill, rasterize, rounded_rect, svg_root};
use super::{ExportError, CANVAS_SIZE, RASTER_SCALE};
use crate::glyph::{resolve_glyph, BuiltinGlyph, ResolvedGlyph};
use crate::settings::{BackgroundSettings, IconSettings};
use crate::style::{
    resolve_background_paint, resolve_corner_radius, resolve_opacity, resolve_padding,
    resolve_shadow, ShadowLayer,
};

/// Raster export settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
pub struct RasterOptions {
    /// Device pixels per canvas pixel.
    pub scale: f32,
}

impl Default for RasterOptions {
    fn default() -> Self {
        Self {
            scale: RASTER_SCALE,
        }
    }
}

impl RasterOptions {
    /// Edge length of the output image in pixels.
    pub fn pixel_size(&self) -> u32 {
        (CANVAS_SIZE * self.scale).round().max(0.0) as u32
    }
}

/// Renders the current settings and encodes the result as PNG.
pub fn export_raster(
    icon: &IconSettings,
    background: &BackgroundSettings,
    glyph: BuiltinGlyph,
    options: &RasterOptions,
) -> Result<Vec<u8>, ExportError> {
    let image = render_raster(icon, background, glyph, options)?;
    encode_png(&image)
}

/// Renders the current settings to an RGBA image on a transparent backdrop.
pub fn render_raster(
    icon: &IconSettings,
    background: &BackgroundSettings,
    glyph: BuiltinGlyph,
    options: &RasterOptions,
) -> Result<RgbaImage, ExportError> {
    let glyph = resolve_glyph(glyph, icon)?;
    let scene = build_scene(icon, background, &glyph);
    log::debug!(
        "rendering raster scene at {}x{} ({} bytes of markup)",
        options.pixel_size(),
        options.pixel_size(),
        scene.len()
    );
    rasterize(&scene, CANVAS_SIZE, options.scale)
}

fn encode_png(image: &RgbaImage) -> Result<Vec<u8>, ExportError> {
    let mut bytes = Vec::new();
    image.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
    if bytes.is_empty() {
        return Err(ExportError::EmptyOutput);
    }
    Ok(bytes)
}

// ============================================================================
// Scene
// ============================================================================

/// Builds the render scene for the padded background box and icon.
fn build_scene(icon: &IconSettings, background: &BackgroundSettings, glyph: &ResolvedGlyph<'_>) -> String {
    let paint = resolve_background_paint(background);
    let padding = resolve_padding(background.padding);
    let box_size = CANVAS_SIZE - 2.0 * padding;
    let radius = resolve_corner_radius(background.rounded, box_size);
    let shadow = resolve_shadow(background.shadow);

    let mut root = svg_root(CANVAS_SIZE);
    let mut defs = XMLElement::new("defs");
    let mut has_defs = false;
    if let Some(gradient) = gradient_element(&paint) {
        defs.add_child(gradient);
        has_defs = true;
    }

    let mut scene = XMLElement::new("g");
    let opacity = resolve_opacity(background.fill_opacity);
    if opacity < 1.0 {
        scene.add_attribute("opacity", &num(opacity));
    }

    if box_size > 0.0 {
        // CSS lists shadow layers front to back; paint the back one first.
        for (index, layer) in shadow.layers.iter().enumerate().rev() {
            let Some(mut rect) =
                shadow_rect(layer, padding, box_size, radius, background.is_fully_round())
            else {
                continue;
            };
            if layer.blur > 0.0 {
                let id = format!("logoShadow{index}");
                defs.add_child(shadow_filter(&id, layer.blur));
                has_defs = true;
                rect.add_attribute("filter", &format!("url(#{id})"));
            }
            scene.add_child(rect);
        }

        let mut rect = rounded_rect(padding, padding, box_size, radius);
        rect.add_attribute("fill", &paint_fill(&paint));
        scene.add_child(rect);

        // Border-box sizing: the border is drawn inside the box edge.
        let border = background.border_width.min(box_size / 2.0);
        if !paint.is_gradient() && border > 0.0 {
            let inset = border / 2.0;
            let mut rect = rounded_rect(
                padding + inset,
                padding + inset,
                box_size - border,
                (radius - inset).max(0.0),
            );
            rect.add_attribute("fill", "none");
            rect.add_attribute("stroke", &background.border_color.to_string());
            rect.add_attribute("stroke-width", &num(border));
            scene.add_child(rect);
        }
    }

    scene.add_child(icon_group(icon, glyph, CANVAS_SIZE));

    if has_defs {
        root.add_child(defs);
    }
    root.add_child(scene);
    root.to_string()
}

/// Builds the shape of one shadow layer, or `None` when spread collapses it.
fn shadow_rect(
    layer: &ShadowLayer,
    padding: f32,
    box_size: f32,
    radius: f32,
    fully_round: bool,
) -> Option<XMLElement> {
    let size = box_size + 2.0 * layer.spread;
    if size <= 0.0 {
        return None;
    }
    let radius = if fully_round {
        size / 2.0
    } else if radius > 0.0 {
        (radius + layer.spread).clamp(0.0, size / 2.0)
    } else {
        0.0
    };

    let mut rect = rounded_rect(
        padding + layer.offset_x - layer.spread,
        padding + layer.offset_y - layer.spread,
        size,
        radius,
    );
    rect.add_attribute("fill", "#000000");
    rect.add_attribute("fill-opacity", &num(layer.opacity));
    Some(rect)
}

/// A Gaussian blur matching a CSS blur radius. The filter region covers the
/// whole canvas so wide blurs are not clipped to the shape's bounds.
fn shadow_filter(id: &str, blur: f32) -> XMLElement {
    let mut filter = XMLElement::new("filter");
    filter.add_attribute("id", id);
    filter.add_attribute("filterUnits", "userSpaceOnUse");
    filter.add_attribute("x", "0");
    filter.add_attribute("y", "0");
    filter.add_attribute("width", &num(CANVAS_SIZE));
    filter.add_attribute("height", &num(CANVAS_SIZE));

    let mut blur_el = XMLElement::new("feGaussianBlur");
    blur_el.add_attribute("stdDeviation", &num(blur / 2.0));
    filter.add_child(blur_el);
    filter
}
