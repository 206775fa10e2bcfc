//! logo-forge: logo editor core with SVG and PNG export
//!
//! This crate backs a visual logo editor: an icon glyph drawn over a styled
//! background box (solid or gradient fill, rounded corners, border, padding,
//! shadow). It provides the settings records the UI edits, the live preview
//! styles, a bounded undo/redo history and two exporters that reproduce the
//! preview as a standalone SVG document or a 1000x1000 PNG.
//!
//! # Example
//!
//! ```
//! use logo_forge::{BackgroundSettings, LogoEditor, FULLY_ROUND};
//!
//! let mut editor = LogoEditor::new();
//! editor.update_background(BackgroundSettings {
//!     rounded: FULLY_ROUND,
//!     is_gradient: true,
//!     ..Default::default()
//! });
//!
//! let png = editor.export_png().unwrap();
//! assert_eq!(png.file_name(), "logo.png");
//!
//! // Undo never touches exported artifacts, only the editor state.
//! editor.undo();
//! assert!(!editor.background().is_gradient);
//! ```
//!
//! # Serializable Profiles
//!
//! For CLI/WASM communication, use [`LogoProfile`] with the [`Configurable`]
//! trait:
//!
//! ```
//! use logo_forge::{BuiltinGlyph, Configurable, LogoEditor, LogoProfile};
//!
//! let mut editor = LogoEditor::new();
//! editor.apply_profile(&LogoProfile::new().with_glyph(BuiltinGlyph::Scroll));
//!
//! let json = editor.export_profile().to_json().unwrap();
//! assert!(json.contains("\"glyph\":\"scroll\""));
//! ```

mod color;
mod editor;
pub mod export;
mod glyph;
mod history;
mod preview;
mod profile;
mod settings;
mod style;
mod suggest;

#[cfg(feature = "tsify")]
mod wasm;

pub use color::{Color, ColorError};
pub use editor::{Configurable, LogoEditor};
pub use export::{
    export_raster, export_vector, render_raster, ExportArtifact, ExportError, ExportFormat,
    Exporter, RasterOptions, CANVAS_SIZE, PNG_FILE_NAME, RASTER_SCALE, SVG_FILE_NAME,
};
pub use glyph::{
    resolve_glyph, BuiltinGlyph, CustomGlyph, GlyphError, GlyphPrimitive, ResolvedGlyph, ViewBox,
    ViewBoxError,
};
pub use history::{History, HistoryEntry, MAX_HISTORY};
pub use preview::{CssStyle, PreviewStyles};
pub use profile::LogoProfile;
pub use settings::{
    BackgroundSettings, GradientPosition, GradientType, IconSettings, ShadowLevel, FULLY_ROUND,
};
pub use style::{
    resolve_background_paint, resolve_corner_radius, resolve_opacity, resolve_padding,
    resolve_shadow, resolve_stroke_width, radial_center, GradientStop, LinearGradient, NormalizedPoint,
    PaintDescriptor, RadialGradient, ShadowLayer, ShadowSpec, DEFAULT_STROKE_WIDTH,
};
pub use suggest::{parse_suggestions, GlyphSuggestion, SuggestionError, Suggestions};

#[cfg(feature = "tsify")]
pub use wasm::EditorHandle;
