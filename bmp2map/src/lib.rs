use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use libbmpmap::{BmpHeader, ConvertOptions, SymbolCounts, TileMap};
use tracing::{debug, info, instrument, Level};
use tracing_subscriber::{filter::LevelFilter, EnvFilter};

/// Extension given to map files when no output path is provided
pub const MAP_EXTENSION: &str = "map";

/// What was written by [`bmp_to_map`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub width: u32,
    pub height: u32,
    pub counts: SymbolCounts,
}

#[instrument]
pub fn bmp_to_map(bmp_file: &Path, output_name: &Path, options: &ConvertOptions) -> Result<Summary> {
    let map = TileMap::from_bmp_file(bmp_file, options)
        .with_context(|| format!("Failed to convert {}", bmp_file.display()))?;
    let summary = Summary {
        width: map.width(),
        height: map.height(),
        counts: map.counts(),
    };
    debug!("Converted map: {:?}", &summary);

    info!("Writing map to {}", output_name.display());
    map.into_file(output_name)
        .with_context(|| format!("Failed to write {}", output_name.display()))?;
    Ok(summary)
}

#[instrument]
pub fn describe_bmp(bmp_file: &Path) -> Result<String> {
    let raw = std::fs::read(bmp_file)
        .with_context(|| format!("Failed to read {}", bmp_file.display()))?;
    let header = BmpHeader::parse(&raw).context("Failed to read BMP header")?;
    let padding = match header.padding_per_row() {
        Ok(padding) => padding.to_string(),
        Err(e) => format!("n/a ({e})"),
    };
    Ok(format!(
        "{header}\nrow padding:       {padding} (4-byte aligned: {})",
        header.aligned_padding()
    ))
}

/// Builds the log filter from `RUST_LOG`-style directives, falling back to the `-v` count
pub fn log_filter(verbosity: u8, directives: Option<&str>) -> EnvFilter {
    let level = match verbosity {
        0 => Level::ERROR,
        1 => Level::WARN,
        2 => Level::INFO,
        3 => Level::DEBUG,
        _ => Level::TRACE,
    };
    EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(level).into())
        .parse_lossy(directives.unwrap_or_default())
}

/// Returns `<dir>/<stem>.map` for an input bitmap
pub fn default_output_path(bmp_file: &Path) -> Result<PathBuf> {
    let Some(dir) = bmp_file.parent() else {
        bail!("Invalid bmp file");
    };
    let Some(Some(filename)) = bmp_file.file_stem().map(|os| os.to_str()) else {
        bail!("Invalid bmp file");
    };
    let mut output = PathBuf::new();
    output.push(dir);
    output.push(format!("{filename}.{MAP_EXTENSION}"));
    info!("output name: {}", output.display());
    Ok(output)
}
