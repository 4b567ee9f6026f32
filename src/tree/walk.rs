use std::cmp::Ordering;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Instant;

use tracing::{debug, trace, warn};
use walkdir::{DirEntry, WalkDir};

use super::{Entry, EntryMetadata, SortOrder, WalkConfig, WalkMode, WalkResult};
use crate::cancel::CancelToken;
use crate::error::WalkError;
use crate::metrics::MetricsCollector;

/// Receives every entry as soon as the walk emits it.
pub trait WalkObserver {
    fn on_entry(&mut self, entry: &Entry);
}

impl<F: FnMut(&Entry)> WalkObserver for F {
    fn on_entry(&mut self, entry: &Entry) {
        self(entry)
    }
}

/// Walk `root` in a single pre-order pass, applying the hidden, depth and
/// ignore filters while walking.
pub fn walk(
    root: &Path,
    config: &WalkConfig,
    cancel: &CancelToken,
) -> Result<WalkResult, WalkError> {
    walk_observed(root, config, cancel, &mut |_: &Entry| {})
}

/// Same as [`walk`], notifying `observer` of each emitted entry.
pub fn walk_observed(
    root: &Path,
    config: &WalkConfig,
    cancel: &CancelToken,
    observer: &mut dyn WalkObserver,
) -> Result<WalkResult, WalkError> {
    let started = Instant::now();

    let root = root
        .canonicalize()
        .map_err(|e| WalkError::from_io(root, e))?;
    let root_meta = fs::metadata(&root).map_err(|e| WalkError::from_io(&root, e))?;
    if !root_meta.is_dir() {
        return Err(WalkError::NotADirectory(root));
    }
    // Open the listing once so an unreadable root fails the same way in both modes.
    fs::read_dir(&root).map_err(|e| WalkError::from_io(&root, e))?;

    debug!(
        root = %root.display(),
        mode = ?config.mode,
        max_depth = config.max_depth,
        show_hidden = config.show_hidden,
        "starting directory walk"
    );

    if cancel.is_cancelled() {
        return Err(WalkError::Cancelled);
    }

    let mut entries = Vec::new();
    let mut metrics = MetricsCollector::new();

    let root_entry = Entry {
        path: PathBuf::from(root_name(&root)),
        metadata: EntryMetadata::from_fs(&root_meta, false),
        depth: 0,
    };
    metrics.record(&root_entry);
    observer.on_entry(&root_entry);
    entries.push(root_entry);

    let walker = WalkDir::new(&root)
        .follow_links(config.follow_symlinks)
        .min_depth(1);
    let walker = match config.sort {
        SortOrder::Filesystem => walker,
        SortOrder::Name => walker.sort_by_file_name(),
        SortOrder::DirsFirst => walker.sort_by(dirs_first_cmp),
    };

    let depth_limit = config.depth_limit();
    let mut it = walker.into_iter();

    while let Some(next) = it.next() {
        if cancel.is_cancelled() {
            warn!("directory walk cancelled");
            return Err(WalkError::Cancelled);
        }

        let dent = match next {
            Ok(dent) => dent,
            Err(e) => {
                let fatal = e.depth() == 0 || config.mode == WalkMode::Strict;
                let err = classify(e, &root);
                if fatal {
                    return Err(err);
                }
                warn!(error = %err, "skipping unreadable entry");
                continue;
            }
        };

        let is_dir = dent.file_type().is_dir();

        if !config.show_hidden && dent.file_name().to_string_lossy().starts_with('.') {
            if is_dir {
                it.skip_current_dir();
            }
            continue;
        }

        let depth = dent.depth();
        if depth_limit.is_some_and(|limit| depth > limit) {
            if is_dir {
                it.skip_current_dir();
            }
            continue;
        }

        let rel = dent.path().strip_prefix(&root).unwrap_or(dent.path());
        if let Some(pattern) = config.ignore.first_match(&to_slash(rel)) {
            trace!(path = %rel.display(), pattern, "ignored");
            if is_dir {
                it.skip_current_dir();
            }
            continue;
        }

        let meta = match dent.metadata() {
            Ok(meta) => meta,
            Err(e) => {
                let err = classify(e, &root);
                if config.mode == WalkMode::Strict {
                    return Err(err);
                }
                warn!(error = %err, "skipping entry with unreadable metadata");
                if is_dir {
                    it.skip_current_dir();
                }
                continue;
            }
        };

        let entry = Entry {
            path: rel.to_path_buf(),
            metadata: EntryMetadata::from_fs(&meta, dent.path_is_symlink()),
            depth,
        };
        trace!(path = %entry.path.display(), depth, "entry");
        metrics.record(&entry);
        observer.on_entry(&entry);
        entries.push(entry);
    }

    let metrics = metrics.finish(started.elapsed());
    debug!(
        entries = entries.len() - 1,
        elapsed = ?metrics.scan_duration,
        "directory walk finished"
    );

    Ok(WalkResult { entries, metrics })
}

/// Base name of the resolved root, or its full path when it has none.
fn root_name(root: &Path) -> String {
    root.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| root.to_string_lossy().into_owned())
}

/// Join path components with `/` regardless of platform.
fn to_slash(rel: &Path) -> String {
    rel.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

fn classify(err: walkdir::Error, root: &Path) -> WalkError {
    let path = err
        .path()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| root.to_path_buf());
    if err.loop_ancestor().is_some() {
        return WalkError::Io {
            path,
            source: io::Error::other("filesystem loop detected"),
        };
    }
    match err.into_io_error() {
        Some(io_err) => WalkError::from_io(path, io_err),
        None => WalkError::Io {
            path,
            source: io::Error::other("unreadable entry"),
        },
    }
}

/// Directories first, then case-insensitive alpha, dotfiles last.
fn dirs_first_cmp(a: &DirEntry, b: &DirEntry) -> Ordering {
    let a_is_dir = a.file_type().is_dir();
    let b_is_dir = b.file_type().is_dir();
    if a_is_dir != b_is_dir {
        return if a_is_dir {
            Ordering::Less
        } else {
            Ordering::Greater
        };
    }

    let a_name = a.file_name().to_string_lossy();
    let b_name = b.file_name().to_string_lossy();

    let a_dot = a_name.starts_with('.');
    let b_dot = b_name.starts_with('.');
    if a_dot != b_dot {
        return if a_dot {
            Ordering::Greater
        } else {
            Ordering::Less
        };
    }

    a_name.to_lowercase().cmp(&b_name.to_lowercase())
}
