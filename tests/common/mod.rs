#![allow(dead_code)]

use scantree::render::RenderConfig;
use scantree::tree::layout::Glyphs;
use scantree::tree::{Entry, EntryMetadata, IgnoreSet, WalkConfig};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// WalkConfig with no depth limit and no ignore patterns.
pub fn default_walk_config() -> WalkConfig {
    WalkConfig::default()
}

/// WalkConfig ignoring the given patterns.
pub fn walk_config_ignoring(patterns: &[&str]) -> WalkConfig {
    WalkConfig {
        ignore: IgnoreSet::new(patterns),
        ..WalkConfig::default()
    }
}

/// RenderConfig with color disabled and ASCII connectors.
pub fn plain_render_config(width: u16) -> RenderConfig {
    RenderConfig {
        use_color: false,
        terminal_width: width,
        glyphs: Glyphs::ASCII,
    }
}

/// Create a directory structure from a list of relative paths.
/// Paths ending with '/' create directories; others create empty files.
pub fn create_fixture(paths: &[&str]) -> TempDir {
    let tmp = TempDir::new().unwrap();
    for p in paths {
        let full = tmp.path().join(p);
        if p.ends_with('/') {
            fs::create_dir_all(&full).unwrap();
        } else {
            if let Some(parent) = full.parent() {
                fs::create_dir_all(parent).unwrap();
            }
            fs::write(&full, "").unwrap();
        }
    }
    tmp
}

/// Write `len` bytes to `rel` under `root`, creating parents.
pub fn write_sized(root: &std::path::Path, rel: &str, len: usize) {
    let full = root.join(rel);
    if let Some(parent) = full.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(full, vec![b'x'; len]).unwrap();
}

/// Build an Entry by hand for render and export tests.
pub fn make_entry(path: &str, depth: usize, is_dir: bool, size: u64) -> Entry {
    Entry {
        path: PathBuf::from(path),
        metadata: EntryMetadata {
            size,
            is_dir,
            is_symlink: false,
            modified: None,
        },
        depth,
    }
}

/// Root-relative paths of a walk, slash-separated, root excluded.
pub fn rel_paths(entries: &[Entry]) -> Vec<String> {
    entries
        .iter()
        .skip(1)
        .map(|e| {
            e.path
                .components()
                .map(|c| c.as_os_str().to_string_lossy().into_owned())
                .collect::<Vec<_>>()
                .join("/")
        })
        .collect()
}
