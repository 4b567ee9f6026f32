use std::io::Write;

use super::{decorated_name, Exporter};
use crate::error::ExportError;
use crate::tree::layout::{lines, Glyphs};
use crate::tree::Entry;

const SVG_WIDTH: usize = 1200;
const LINE_HEIGHT: usize = 22;
const PADDING: usize = 20;
const FONT_SIZE: usize = 16;

const DIR_COLOR: &str = "#1e88e5";
const FILE_COLOR: &str = "#000000";

/// Monospace SVG drawing, one `<text>` element per entry.
pub struct SvgExporter {
    glyphs: Glyphs,
}

impl SvgExporter {
    pub fn new(glyphs: Glyphs) -> Self {
        Self { glyphs }
    }
}

/// Canvas height for `n` lines.
fn svg_height(n: usize) -> usize {
    PADDING * 2 + n * LINE_HEIGHT
}

fn escape_xml(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c if c.is_control() => out.push('\u{fffd}'),
            c => out.push(c),
        }
    }
    out
}

impl Exporter for SvgExporter {
    fn export(&self, w: &mut dyn Write, entries: &[Entry]) -> Result<(), ExportError> {
        if entries.is_empty() {
            return Err(ExportError::Empty);
        }
        let height = svg_height(entries.len());

        writeln!(w, r#"<?xml version="1.0" encoding="UTF-8"?>"#)?;
        writeln!(
            w,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{SVG_WIDTH}" height="{height}">"#
        )?;
        writeln!(
            w,
            r##"<rect x="0" y="0" width="{SVG_WIDTH}" height="{height}" style="fill:#ffffff"/>"##
        )?;

        let mut y = PADDING + FONT_SIZE;
        for line in lines(entries, &self.glyphs) {
            let color = if line.entry.is_dir() {
                DIR_COLOR
            } else {
                FILE_COLOR
            };
            let text = escape_xml(&format!("{}{}", line.prefix, decorated_name(line.entry)));
            writeln!(
                w,
                r#"<text x="{PADDING}" y="{y}" xml:space="preserve" style="font-family:monospace;font-size:{FONT_SIZE}px;fill:{color}">{text}</text>"#
            )?;
            y += LINE_HEIGHT;
        }

        writeln!(w, "</svg>")?;
        Ok(())
    }
}
