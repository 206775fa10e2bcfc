//! Logo exporters.
//!
//! [`vector`] produces a standalone SVG document and [`raster`] renders a PNG
//! at twice the canvas resolution. Both draw the same 500x500 scene from the
//! shared style resolvers. [`Exporter`] wraps them with a single in-flight
//! guard and packages the output as a downloadable [`ExportArtifact`].

pub mod raster;
pub mod svg;
pub mod vector;

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::atomic::{AtomicBool, Ordering};

use resvg::usvg;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::glyph::{BuiltinGlyph, GlyphError};
use crate::settings::{BackgroundSettings, IconSettings};

pub use raster::{export_raster, render_raster, RasterOptions};
pub use vector::export_vector;

/// Edge length of the square logo canvas in CSS pixels.
pub const CANVAS_SIZE: f32 = 500.0;
/// Default pixel ratio of raster exports.
pub const RASTER_SCALE: f32 = 2.0;

pub const PNG_FILE_NAME: &str = "logo.png";
pub const SVG_FILE_NAME: &str = "logo.svg";

// ============================================================================
// Errors
// ============================================================================

/// Errors that abort an export. No partial artifact is ever produced.
#[derive(Debug, Error)]
pub enum ExportError {
    /// The glyph could not be captured for drawing.
    #[error("cannot capture icon glyph: {0}")]
    MissingGlyph(#[from] GlyphError),
    #[error("failed to parse generated scene: {0}")]
    Scene(#[from] usvg::Error),
    #[error("cannot allocate a {width}x{height} pixmap")]
    Pixmap { width: u32, height: u32 },
    #[error("failed to encode image: {0}")]
    Encoding(#[from] image::ImageError),
    #[error("export produced no data")]
    EmptyOutput,
    #[error("another export is already in progress")]
    Busy,
    #[error("failed to write artifact: {0}")]
    Io(#[from] std::io::Error),
}

// ============================================================================
// Formats and artifacts
// ============================================================================

/// Output format of an export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
pub enum ExportFormat {
    #[default]
    Png,
    Svg,
}

impl ExportFormat {
    pub fn file_name(&self) -> &'static str {
        match self {
            Self::Png => PNG_FILE_NAME,
            Self::Svg => SVG_FILE_NAME,
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Svg => "image/svg+xml",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Png => write!(f, "png"),
            Self::Svg => write!(f, "svg"),
        }
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "png" => Ok(Self::Png),
            "svg" => Ok(Self::Svg),
            other => Err(format!("unknown export format: {other}")),
        }
    }
}

/// A finished export, ready to be offered as a download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifact {
    pub format: ExportFormat,
    pub bytes: Vec<u8>,
}

impl ExportArtifact {
    pub fn file_name(&self) -> &'static str {
        self.format.file_name()
    }

    pub fn mime_type(&self) -> &'static str {
        self.format.mime_type()
    }

    /// Writes the artifact under its download name into `dir`.
    pub fn write_to_dir(&self, dir: impl AsRef<Path>) -> Result<PathBuf, ExportError> {
        let path = dir.as_ref().join(self.file_name());
        std::fs::write(&path, &self.bytes)?;
        log::info!("wrote {} ({} bytes)", path.display(), self.bytes.len());
        Ok(path)
    }
}

// ============================================================================
// Exporter
// ============================================================================

/// Runs exports one at a time.
///
/// A second export requested while one is running fails fast with
/// [`ExportError::Busy`] instead of queueing.
#[derive(Debug, Default)]
pub struct Exporter {
    in_flight: AtomicBool,
    raster: RasterOptions,
}

struct InFlightGuard<'a>(&'a AtomicBool);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl Exporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_raster_options(raster: RasterOptions) -> Self {
        Self {
            in_flight: AtomicBool::new(false),
            raster,
        }
    }

    pub fn raster_options(&self) -> &RasterOptions {
        &self.raster
    }

    /// Returns true while an export is running.
    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    fn begin(&self) -> Result<InFlightGuard<'_>, ExportError> {
        self.in_flight
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .map_err(|_| ExportError::Busy)?;
        Ok(InFlightGuard(&self.in_flight))
    }

    /// Exports the current state in `format`.
    pub fn export(
        &self,
        format: ExportFormat,
        icon: &IconSettings,
        background: &BackgroundSettings,
        glyph: BuiltinGlyph,
    ) -> Result<ExportArtifact, ExportError> {
        let _guard = self.begin()?;
        log::debug!("exporting {format}");

        let bytes = match format {
            ExportFormat::Png => export_raster(icon, background, glyph, &self.raster)?,
            ExportFormat::Svg => export_vector(icon, background, glyph)?.into_bytes(),
        };
        if bytes.is_empty() {
            return Err(ExportError::EmptyOutput);
        }

        log::info!("exported {} ({} bytes)", format.file_name(), bytes.len());
        Ok(ExportArtifact { format, bytes })
    }
}
