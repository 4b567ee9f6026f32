use serde::Serialize;
use std::io::Write;
use std::time::UNIX_EPOCH;

use super::Exporter;
use crate::error::ExportError;
use crate::tree::layout::{lines, Glyphs};
use crate::tree::Entry;

/// Pretty-printed JSON document with one object per entry.
pub struct JsonExporter {
    glyphs: Glyphs,
}

impl JsonExporter {
    pub fn new(glyphs: Glyphs) -> Self {
        Self { glyphs }
    }
}

#[derive(Serialize)]
struct Document {
    root: String,
    entries: Vec<JsonEntry>,
}

#[derive(Serialize)]
struct JsonEntry {
    path: String,
    name: String,
    depth: usize,
    is_dir: bool,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    is_symlink: bool,
    size: u64,
    /// Seconds since the Unix epoch.
    modified: Option<u64>,
    is_last: bool,
    prefix: String,
}

impl Exporter for JsonExporter {
    fn export(&self, w: &mut dyn Write, entries: &[Entry]) -> Result<(), ExportError> {
        let root = entries.first().ok_or(ExportError::Empty)?;
        let doc = Document {
            root: root.name(),
            entries: lines(entries, &self.glyphs)
                .map(|line| JsonEntry {
                    path: line.entry.path.to_string_lossy().replace('\\', "/"),
                    name: line.entry.name(),
                    depth: line.entry.depth,
                    is_dir: line.entry.is_dir(),
                    is_symlink: line.entry.metadata.is_symlink,
                    size: line.entry.metadata.size,
                    modified: line
                        .entry
                        .metadata
                        .modified
                        .and_then(|t| t.duration_since(UNIX_EPOCH).ok())
                        .map(|d| d.as_secs()),
                    is_last: line.is_last,
                    prefix: line.prefix,
                })
                .collect(),
        };
        serde_json::to_writer_pretty(&mut *w, &doc)?;
        writeln!(w)?;
        Ok(())
    }
}
