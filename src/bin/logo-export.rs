//! Renders a logo profile to `logo.png` and/or `logo.svg`.
//!
//! ```text
//! logo-export --profile design.json --format svg --out-dir dist
//! ```
//!
//! Without `--format` both artifacts are written. Log output is controlled
//! with `RUST_LOG` and defaults to `info`.

use std::path::PathBuf;
use std::sync::Once;

use anyhow::{Context, Result};
use clap::Parser;
use logo_forge::{ExportFormat, LogoEditor, LogoProfile, RasterOptions, RASTER_SCALE};

#[derive(Debug, Parser)]
#[command(name = "logo-export", version, about = "Export a logo profile as PNG or SVG")]
struct Args {
    /// Profile JSON file; the default design is used when omitted.
    #[arg(long, value_name = "FILE")]
    profile: Option<PathBuf>,

    /// Output format; repeat to write several.
    #[arg(long, value_enum)]
    format: Vec<ExportFormat>,

    /// Directory the artifacts are written to.
    #[arg(long, value_name = "DIR", default_value = ".")]
    out_dir: PathBuf,

    /// Pixel ratio of the PNG output.
    #[arg(long, default_value_t = RASTER_SCALE)]
    scale: f32,

    /// Print the resolved profile as JSON and exit.
    #[arg(long)]
    print_profile: bool,
}

static INIT: Once = Once::new();

fn init_logging() {
    INIT.call_once(|| {
        let mut builder = env_logger::Builder::new();
        if let Ok(filter) = std::env::var("RUST_LOG") {
            builder.parse_filters(&filter);
        } else {
            builder.filter_level(log::LevelFilter::Info);
        }
        builder.init();
    });
}

fn load_profile(path: Option<&PathBuf>) -> Result<LogoProfile> {
    let Some(path) = path else {
        log::info!("no profile given, using the default design");
        return Ok(LogoProfile::default());
    };
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read profile {}", path.display()))?;
    LogoProfile::from_json(&json).with_context(|| format!("invalid profile {}", path.display()))
}

fn main() -> Result<()> {
    init_logging();
    let args = Args::parse();

    let profile = load_profile(args.profile.as_ref())?;
    if args.print_profile {
        println!("{}", profile.to_json_pretty()?);
        return Ok(());
    }

    anyhow::ensure!(
        args.scale.is_finite() && args.scale > 0.0,
        "--scale must be a positive number, got {}",
        args.scale
    );

    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("failed to create {}", args.out_dir.display()))?;

    let formats = if args.format.is_empty() {
        vec![ExportFormat::Png, ExportFormat::Svg]
    } else {
        args.format
    };

    let editor =
        LogoEditor::from_profile(&profile).with_raster_options(RasterOptions { scale: args.scale });
    for format in formats {
        let artifact = editor
            .export(format)
            .with_context(|| format!("failed to export {format}"))?;
        artifact.write_to_dir(&args.out_dir)?;
    }
    Ok(())
}
