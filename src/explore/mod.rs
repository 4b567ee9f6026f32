//! Interactive explorer: browse a walk, descend into directories, preview files.
//!
//! Each navigation step re-runs the walk on the newly selected directory; the
//! state machine here is terminal-agnostic and driven by key events.

mod ui;

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::text::Line;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};

use crate::cancel::CancelToken;
use crate::config::Settings;
use crate::error::WalkError;
use crate::render::{tree_to_lines, RenderConfig};
use crate::terminal::TerminalGuard;
use crate::tree::{Entry, Scanner, WalkConfig, WalkdirScanner};

/// Upper bound on bytes read for a file preview.
pub const PREVIEW_LIMIT: u64 = 64 * 1024;

const PAGE: usize = 10;
const POLL_INTERVAL: Duration = Duration::from_millis(200);

/// Contents of an open file preview.
#[derive(Debug, Clone)]
pub struct Preview {
    pub title: String,
    pub content: String,
    pub scroll: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Continue,
    Quit,
}

pub struct Explorer<S: Scanner> {
    scanner: S,
    walk: WalkConfig,
    render: RenderConfig,
    cancel: CancelToken,
    dir: PathBuf,
    entries: Vec<Entry>,
    lines: Vec<Line<'static>>,
    // Indices into `entries` that pass the name filter; `selected` indexes this.
    visible: Vec<usize>,
    selected: usize,
    filter: String,
    filtering: bool,
    preview: Option<Preview>,
    status: Option<String>,
}

impl<S: Scanner> Explorer<S> {
    /// Scan `dir` and build the initial view.
    pub fn open(
        scanner: S,
        dir: &Path,
        walk: WalkConfig,
        render: RenderConfig,
        cancel: CancelToken,
    ) -> Result<Self, WalkError> {
        let dir = dir.canonicalize().map_err(|e| WalkError::from_io(dir, e))?;
        let mut explorer = Self {
            scanner,
            walk,
            render,
            cancel,
            dir: dir.clone(),
            entries: Vec::new(),
            lines: Vec::new(),
            visible: Vec::new(),
            selected: 0,
            filter: String::new(),
            filtering: false,
            preview: None,
            status: None,
        };
        explorer.load(&dir)?;
        Ok(explorer)
    }

    fn load(&mut self, dir: &Path) -> Result<(), WalkError> {
        debug!(dir = %dir.display(), "explorer scan");
        let result = self.scanner.scan(dir, &self.walk, &self.cancel)?;
        self.lines = tree_to_lines(&result.entries, &self.render);
        self.entries = result.entries;
        self.dir = dir.to_path_buf();
        self.filter.clear();
        self.filtering = false;
        self.refilter();
        self.preview = None;
        self.status = None;
        Ok(())
    }

    /// Recompute the visible rows. The root row always stays.
    fn refilter(&mut self) {
        let needle = self.filter.to_lowercase();
        self.visible = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, e)| e.depth == 0 || e.name().to_lowercase().contains(&needle))
            .map(|(i, _)| i)
            .collect();
        self.selected = 0;
    }

    fn selected_entry(&self) -> Option<&Entry> {
        self.entries.get(*self.visible.get(self.selected)?)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn lines(&self) -> &[Line<'static>] {
        &self.lines
    }

    /// Indices of the rows currently shown, into [`Explorer::entries`].
    pub fn visible(&self) -> &[usize] {
        &self.visible
    }

    /// Position of the cursor among the visible rows.
    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn filter(&self) -> &str {
        &self.filter
    }

    /// Whether keystrokes currently edit the filter.
    pub fn is_filtering(&self) -> bool {
        self.filtering
    }

    pub fn preview(&self) -> Option<&Preview> {
        self.preview.as_ref()
    }

    /// Last navigation error, shown in the footer.
    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    /// Absolute path of the selected entry.
    pub fn selected_path(&self) -> Option<PathBuf> {
        let entry = self.selected_entry()?;
        if entry.depth == 0 {
            Some(self.dir.clone())
        } else {
            Some(self.dir.join(&entry.path))
        }
    }

    pub fn move_by(&mut self, delta: isize) {
        if let Some(preview) = &mut self.preview {
            let scroll = preview.scroll as isize + delta;
            preview.scroll = scroll.clamp(0, u16::MAX as isize) as u16;
            return;
        }
        let last = self.visible.len().saturating_sub(1) as isize;
        self.selected = (self.selected as isize + delta).clamp(0, last) as usize;
    }

    /// Enter: open the selected directory or preview the selected file.
    pub fn activate(&mut self) {
        if self.preview.take().is_some() {
            return;
        }
        let Some(entry) = self.selected_entry() else {
            return;
        };
        if entry.depth == 0 {
            return;
        }
        let (is_dir, name) = (entry.is_dir(), entry.name());
        let Some(path) = self.selected_path() else {
            return;
        };
        if is_dir {
            if let Err(e) = self.load(&path) {
                self.status = Some(e.to_string());
            }
        } else {
            match read_preview(&path) {
                Ok(content) => {
                    self.preview = Some(Preview {
                        title: name,
                        content,
                        scroll: 0,
                    });
                }
                Err(e) => self.status = Some(format!("{}: {}", path.display(), e)),
            }
        }
    }

    /// Esc/Backspace: close the preview, or go up to the parent directory.
    pub fn back(&mut self) {
        if self.preview.take().is_some() {
            return;
        }
        let Some(parent) = self.dir.parent().map(Path::to_path_buf) else {
            return;
        };
        let child = self.dir.file_name().map(|n| n.to_os_string());
        match self.load(&parent) {
            Ok(()) => {
                if let Some(child) = child {
                    // The filter is cleared on load, so entry and row indices agree.
                    if let Some(i) = self
                        .entries
                        .iter()
                        .position(|e| e.depth == 1 && e.path.as_os_str() == child.as_os_str())
                    {
                        self.selected = i;
                    }
                }
            }
            Err(e) => self.status = Some(e.to_string()),
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Action {
        if self.filtering {
            self.edit_filter(key);
            return Action::Continue;
        }
        match key.code {
            KeyCode::Char('q') => return Action::Quit,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                return Action::Quit
            }
            KeyCode::Up | KeyCode::Char('k') => self.move_by(-1),
            KeyCode::Down | KeyCode::Char('j') => self.move_by(1),
            KeyCode::PageUp => self.move_by(-(PAGE as isize)),
            KeyCode::PageDown => self.move_by(PAGE as isize),
            KeyCode::Home => self.move_by(isize::MIN / 2),
            KeyCode::End => self.move_by(isize::MAX / 2),
            KeyCode::Enter => self.activate(),
            KeyCode::Char('/') if self.preview.is_none() => self.filtering = true,
            KeyCode::Esc if !self.filter.is_empty() && self.preview.is_none() => {
                self.filter.clear();
                self.refilter();
            }
            KeyCode::Esc | KeyCode::Backspace => self.back(),
            _ => {}
        }
        Action::Continue
    }
}

impl<S: Scanner> Explorer<S> {
    /// Keystrokes while the filter prompt is open.
    fn edit_filter(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter => self.filtering = false,
            KeyCode::Esc => {
                self.filtering = false;
                self.filter.clear();
                self.refilter();
            }
            KeyCode::Backspace => {
                self.filter.pop();
                self.refilter();
            }
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.filtering = false;
            }
            KeyCode::Char(c) => {
                self.filter.push(c);
                self.refilter();
            }
            KeyCode::Up => self.move_by(-1),
            KeyCode::Down => self.move_by(1),
            _ => {}
        }
    }
}

/// Read up to [`PREVIEW_LIMIT`] bytes as displayable text.
fn read_preview(path: &Path) -> std::io::Result<String> {
    let mut buf = Vec::new();
    File::open(path)?.take(PREVIEW_LIMIT).read_to_end(&mut buf)?;
    let text = String::from_utf8_lossy(&buf);
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\n' => out.push('\n'),
            '\t' => out.push_str("    "),
            c if c.is_control() => out.push('\u{fffd}'),
            c => out.push(c),
        }
    }
    Ok(out)
}

/// Run the explorer on `dir` until the user quits.
pub fn run(dir: &Path, settings: &Settings, cancel: &CancelToken) -> Result<()> {
    let mut app = Explorer::open(
        WalkdirScanner,
        dir,
        settings.walk.clone(),
        settings.render.clone(),
        cancel.clone(),
    )?;
    info!(dir = %app.dir().display(), "starting interactive mode");

    let mut terminal = TerminalGuard::new().context("failed to initialize terminal")?;
    loop {
        terminal.draw(|frame| ui::draw(frame, &app))?;
        if cancel.is_cancelled() {
            break;
        }
        if !event::poll(POLL_INTERVAL)? {
            continue;
        }
        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press && app.handle_key(key) == Action::Quit {
                break;
            }
        }
    }
    Ok(())
}
