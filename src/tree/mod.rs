//! Directory walking, filtering, and tree layout computation.

mod ignore;
pub mod layout;
pub(crate) mod walk;

use crate::cancel::CancelToken;
use crate::error::WalkError;
use crate::metrics::Metrics;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

pub use ignore::{split_patterns, IgnoreSet};
pub use walk::{walk, walk_observed, WalkObserver};

/// Metadata captured once per visited node.
#[derive(Debug, Clone, PartialEq)]
pub struct EntryMetadata {
    /// Size in bytes as reported by the platform.
    pub size: u64,
    pub is_dir: bool,
    pub is_symlink: bool,
    /// Modification time, when the platform provides one.
    pub modified: Option<SystemTime>,
}

impl EntryMetadata {
    pub(crate) fn from_fs(meta: &std::fs::Metadata, is_symlink: bool) -> Self {
        Self {
            size: meta.len(),
            is_dir: meta.is_dir(),
            is_symlink,
            modified: meta.modified().ok(),
        }
    }
}

/// A single node produced by a walk.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    /// Path relative to the scan root. The root entry holds its base name.
    pub path: PathBuf,
    pub metadata: EntryMetadata,
    /// Number of path components below the root (root = 0).
    pub depth: usize,
}

impl Entry {
    /// Display name: the final path component, or the whole path for the root.
    pub fn name(&self) -> String {
        if self.depth == 0 {
            return self.path.to_string_lossy().into_owned();
        }
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.to_string_lossy().into_owned())
    }

    pub fn is_dir(&self) -> bool {
        self.metadata.is_dir
    }
}

/// How per-node failures below the root are handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WalkMode {
    /// Unreadable nodes are logged and omitted; the walk continues.
    #[default]
    Lenient,
    /// The first unreadable node aborts the walk.
    Strict,
}

/// Ordering of siblings within a directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum SortOrder {
    /// Whatever order the filesystem enumerates.
    Filesystem,
    /// Byte-wise file name order.
    #[default]
    Name,
    /// Directories first, then case-insensitive alpha, dotfiles last.
    DirsFirst,
}

/// Configuration for a walk.
#[derive(Debug, Clone)]
pub struct WalkConfig {
    /// Whether to include hidden entries (dotfiles).
    pub show_hidden: bool,
    /// Maximum depth below the root; zero or negative means unlimited.
    pub max_depth: i64,
    /// Glob patterns matched against root-relative, slash-separated paths.
    pub ignore: IgnoreSet,
    pub mode: WalkMode,
    pub sort: SortOrder,
    /// Whether to follow symbolic links during traversal.
    pub follow_symlinks: bool,
}

impl Default for WalkConfig {
    fn default() -> Self {
        Self {
            show_hidden: false,
            max_depth: 0,
            ignore: IgnoreSet::empty(),
            mode: WalkMode::default(),
            sort: SortOrder::default(),
            follow_symlinks: false,
        }
    }
}

impl WalkConfig {
    /// The depth limit as an option, `None` meaning unlimited.
    pub fn depth_limit(&self) -> Option<usize> {
        usize::try_from(self.max_depth).ok().filter(|d| *d > 0)
    }
}

/// Output of a completed walk.
#[derive(Debug, Clone)]
pub struct WalkResult {
    /// Entries in pre-order, root first.
    pub entries: Vec<Entry>,
    pub metrics: Metrics,
}

/// Abstraction over tree scanning so callers can swap or mock it.
pub trait Scanner {
    fn scan(
        &self,
        root: &Path,
        config: &WalkConfig,
        cancel: &CancelToken,
    ) -> Result<WalkResult, WalkError>;
}

/// Default `Scanner` backed by the walkdir-based walk.
pub struct WalkdirScanner;

impl Scanner for WalkdirScanner {
    fn scan(
        &self,
        root: &Path,
        config: &WalkConfig,
        cancel: &CancelToken,
    ) -> Result<WalkResult, WalkError> {
        walk(root, config, cancel)
    }
}
