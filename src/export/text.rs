use std::io::Write;

use super::{decorated_name, Exporter};
use crate::error::ExportError;
use crate::tree::layout::{lines, Glyphs};
use crate::tree::Entry;

/// One `prefix + name` line per entry.
pub struct TextExporter {
    glyphs: Glyphs,
}

impl TextExporter {
    pub fn new(glyphs: Glyphs) -> Self {
        Self { glyphs }
    }
}

impl Exporter for TextExporter {
    fn export(&self, w: &mut dyn Write, entries: &[Entry]) -> Result<(), ExportError> {
        if entries.is_empty() {
            return Err(ExportError::Empty);
        }
        for line in lines(entries, &self.glyphs) {
            writeln!(w, "{}{}", line.prefix, decorated_name(line.entry))?;
        }
        Ok(())
    }
}
