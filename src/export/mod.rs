//! File exporters: plain text, JSON and SVG.
//!
//! Every exporter draws connectors through the shared prefix deriver, so the
//! topology is identical across formats.

mod json;
mod svg;
mod text;

use std::io::Write;
use std::path::Path;

use crate::error::ExportError;
use crate::tree::layout::Glyphs;
use crate::tree::Entry;

pub use json::JsonExporter;
pub use svg::SvgExporter;
pub use text::TextExporter;

/// Supported export formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Text,
    Json,
    Svg,
}

impl Format {
    /// Pick a format from the output file name.
    ///
    /// Known extensions win; raster image extensions are rejected. Otherwise
    /// a name mentioning `json` selects JSON and anything else falls back to
    /// plain text.
    pub fn from_path(path: &Path) -> Result<Self, ExportError> {
        let ext = path
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "txt" => Ok(Format::Text),
            "json" => Ok(Format::Json),
            "svg" => Ok(Format::Svg),
            "png" | "jpg" | "jpeg" => Err(ExportError::UnsupportedFormat(ext.clone())),
            _ => {
                let name = path.to_string_lossy().to_lowercase();
                if name.contains("json") {
                    Ok(Format::Json)
                } else {
                    Ok(Format::Text)
                }
            }
        }
    }
}

/// Serializes a walk's entries to a writer.
pub trait Exporter {
    fn export(&self, w: &mut dyn Write, entries: &[Entry]) -> Result<(), ExportError>;
}

/// Build the exporter for `format`.
pub fn exporter_for(format: Format, glyphs: Glyphs) -> Box<dyn Exporter> {
    match format {
        Format::Text => Box::new(TextExporter::new(glyphs)),
        Format::Json => Box::new(JsonExporter::new(glyphs)),
        Format::Svg => Box::new(SvgExporter::new(glyphs)),
    }
}

/// Display name with a trailing `/` for directories.
fn decorated_name(entry: &Entry) -> String {
    let mut name = entry.name();
    if entry.is_dir() && !name.ends_with('/') {
        name.push('/');
    }
    name
}
