//! Console rendering of a walk: styled tree lines and the metrics report.

use crate::metrics::{format_size, Metrics};
use crate::tree::layout::{lines, Glyphs, TreeLine};
use crate::tree::Entry;
use crossterm::style::{style, Stylize};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use std::io::{self, Write};

/// Configuration for the rendering pipeline.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Whether to emit color styling.
    pub use_color: bool,
    /// Current terminal width in columns.
    pub terminal_width: u16,
    pub glyphs: Glyphs,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            use_color: false,
            terminal_width: 80,
            glyphs: Glyphs::UNICODE,
        }
    }
}

const DIR_ICON: &str = "\u{1f4c1}"; // 📁
const FILE_ICON: &str = "\u{1f4c4}"; // 📄

// Room reserved for the icon and a little slack when truncating names.
const ICON_ALLOWANCE: usize = 10;

const DIR_STYLE: Style = Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD);
const PREFIX_STYLE: Style = Style::new().fg(Color::DarkGray);
const SIZE_STYLE: Style = Style::new().fg(Color::Yellow);

/// Sanitize control characters to avoid terminal control-sequence injection.
pub fn sanitize_terminal_text(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => {
                let code = c as u32;
                if code <= 0xFF {
                    out.push_str(&format!("\\x{:02X}", code));
                } else {
                    out.push_str(&format!("\\u{{{:X}}}", code));
                }
            }
            _ => out.push(c),
        }
    }
    out
}

/// Shorten `name` so `prefix + icon + name` fits in `width` columns.
fn fit_name(name: String, prefix_cols: usize, width: u16) -> String {
    let max = (width as usize).saturating_sub(prefix_cols + ICON_ALLOWANCE);
    let len = name.chars().count();
    if len > max && max > 10 {
        let mut cut: String = name.chars().take(max - 3).collect();
        cut.push_str("...");
        cut
    } else {
        name
    }
}

/// The displayed name of a line, sanitized and width-fitted.
fn display_name(line: &TreeLine<'_>, config: &RenderConfig) -> String {
    let name = sanitize_terminal_text(&line.entry.name());
    fit_name(name, line.prefix.chars().count(), config.terminal_width)
}

fn icon(entry: &Entry) -> &'static str {
    if entry.is_dir() {
        DIR_ICON
    } else {
        FILE_ICON
    }
}

/// Plain-text form of one line: prefix, icon, name and file size.
pub fn format_line(line: &TreeLine<'_>, config: &RenderConfig) -> String {
    let mut text = format!(
        "{}{} {}",
        line.prefix,
        icon(line.entry),
        display_name(line, config)
    );
    if !line.entry.is_dir() {
        text.push_str(&format!(" ({})", format_size(line.entry.metadata.size)));
    }
    text
}

/// Write the whole tree to `w`, one line per entry.
pub fn render_tree<W: Write>(w: &mut W, entries: &[Entry], config: &RenderConfig) -> io::Result<()> {
    if entries.is_empty() {
        let msg = "No files or directories found";
        if config.use_color {
            writeln!(w, "{}", style(msg).red())?;
        } else {
            writeln!(w, "{}", msg)?;
        }
        return Ok(());
    }

    for line in lines(entries, &config.glyphs) {
        if !config.use_color {
            writeln!(w, "{}", format_line(&line, config))?;
            continue;
        }
        let name = format!("{} {}", icon(line.entry), display_name(&line, config));
        write!(w, "{}", style(line.prefix.as_str()).dark_grey())?;
        if line.entry.is_dir() {
            write!(w, "{}", style(name).cyan().bold())?;
        } else {
            write!(w, "{}", style(name).white())?;
            let size = format!(" ({})", format_size(line.entry.metadata.size));
            write!(w, "{}", style(size).yellow())?;
        }
        writeln!(w)?;
    }
    Ok(())
}

/// Write the scan metrics report to `w`.
pub fn render_metrics<W: Write>(w: &mut W, metrics: &Metrics, config: &RenderConfig) -> io::Result<()> {
    writeln!(w)?;
    let header = "\u{1f4ca} Scan Metrics";
    if config.use_color {
        writeln!(w, "{}", style(header).cyan().bold())?;
    } else {
        writeln!(w, "{}", header)?;
    }
    for row in metrics.to_string().lines() {
        writeln!(w, "   {}", row)?;
    }
    Ok(())
}

/// Convert entries into styled ratatui `Line`s for the explorer view.
pub fn tree_to_lines(entries: &[Entry], config: &RenderConfig) -> Vec<Line<'static>> {
    lines(entries, &config.glyphs)
        .map(|line| tree_line_to_line(&line, config))
        .collect()
}

fn tree_line_to_line(line: &TreeLine<'_>, config: &RenderConfig) -> Line<'static> {
    let mut spans = Vec::new();
    if !line.prefix.is_empty() {
        if config.use_color {
            spans.push(Span::styled(line.prefix.clone(), PREFIX_STYLE));
        } else {
            spans.push(Span::raw(line.prefix.clone()));
        }
    }

    let mut name = sanitize_terminal_text(&line.entry.name());
    if line.entry.is_dir() {
        name.push('/');
        if config.use_color {
            spans.push(Span::styled(name, DIR_STYLE));
        } else {
            spans.push(Span::raw(name));
        }
    } else {
        spans.push(Span::raw(name));
        let size = format!("  {}", format_size(line.entry.metadata.size));
        if config.use_color {
            spans.push(Span::styled(size, SIZE_STYLE));
        } else {
            spans.push(Span::raw(size));
        }
    }
    Line::from(spans)
}

/// Extract plain text from a `Line` (useful for testing).
pub fn line_to_plain_text(line: &Line<'_>) -> String {
    line.spans.iter().map(|s| s.content.as_ref()).collect()
}
