//! Settings resolution: optional YAML config file merged under CLI flags.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};

use crate::cli::Args;
use crate::render::RenderConfig;
use crate::tree::layout::Glyphs;
use crate::tree::{split_patterns, IgnoreSet, SortOrder, WalkConfig, WalkMode};

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "SCANTREE_CONFIG";

const DEFAULT_MAX_DEPTH: i64 = 10;

/// Contents of the YAML config file. Every key is optional.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub show_hidden_files: bool,
    /// Zero or negative means unlimited.
    pub max_depth: i64,
    pub ignore_patterns: Vec<String>,
    pub strict: bool,
    pub sort: SortOrder,
    pub ascii: bool,
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            show_hidden_files: false,
            max_depth: DEFAULT_MAX_DEPTH,
            ignore_patterns: Vec::new(),
            strict: false,
            sort: SortOrder::default(),
            ascii: false,
        }
    }
}

impl FileConfig {
    pub fn from_yaml(text: &str) -> Result<Self> {
        // An empty document deserializes to unit, not a map.
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(text).context("invalid configuration file")
    }
}

/// Per-user config location: `$XDG_CONFIG_HOME/scantree/config.yaml`, falling
/// back to `~/.config` (or `%APPDATA%` on Windows).
pub fn default_config_path() -> Option<PathBuf> {
    let base = if cfg!(windows) {
        std::env::var_os("APPDATA").map(PathBuf::from)
    } else {
        std::env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| std::env::var_os("HOME").map(|h| PathBuf::from(h).join(".config")))
    };
    base.map(|b| b.join("scantree").join("config.yaml"))
}

/// Load the config file.
///
/// An explicitly named file (flag or environment) must exist. The per-user
/// default is optional and yields defaults when absent.
pub fn load(explicit: Option<&Path>) -> Result<FileConfig> {
    let from_env = std::env::var_os(CONFIG_ENV).map(PathBuf::from);
    if let Some(path) = explicit.map(Path::to_path_buf).or(from_env) {
        let text = std::fs::read_to_string(&path)
            .with_context(|| format!("{}: failed to read config", path.display()))?;
        return FileConfig::from_yaml(&text)
            .with_context(|| format!("{}: failed to parse config", path.display()));
    }

    match default_config_path() {
        Some(path) if path.is_file() => {
            tracing::debug!(path = %path.display(), "loading config");
            let text = std::fs::read_to_string(&path)
                .with_context(|| format!("{}: failed to read config", path.display()))?;
            FileConfig::from_yaml(&text)
                .with_context(|| format!("{}: failed to parse config", path.display()))
        }
        _ => Ok(FileConfig::default()),
    }
}

/// Everything a run needs, resolved from flags and the config file.
#[derive(Debug, Clone)]
pub struct Settings {
    pub walk: WalkConfig,
    pub render: RenderConfig,
    pub show_progress: bool,
    pub show_metrics: bool,
}

impl Settings {
    /// Merge CLI flags over file values. `-I` patterns follow file patterns.
    pub fn resolve(args: &Args, file: FileConfig, terminal_width: u16) -> Self {
        let mut patterns = file.ignore_patterns;
        patterns.extend(split_patterns(&args.ignore));

        let walk = WalkConfig {
            show_hidden: args.show_hidden || file.show_hidden_files,
            max_depth: args.max_depth.unwrap_or(file.max_depth),
            ignore: IgnoreSet::new(&patterns),
            mode: if args.strict || file.strict {
                WalkMode::Strict
            } else {
                WalkMode::Lenient
            },
            sort: args.sort.unwrap_or(file.sort),
            follow_symlinks: args.follow_symlinks,
        };

        let render = RenderConfig {
            use_color: !args.no_color && std::io::stdout().is_terminal(),
            terminal_width,
            glyphs: if args.ascii || file.ascii {
                Glyphs::ASCII
            } else {
                Glyphs::UNICODE
            },
        };

        Self {
            walk,
            render,
            show_progress: !args.no_progress,
            show_metrics: !args.no_metrics,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn empty_file_yields_defaults() {
        assert_eq!(FileConfig::from_yaml("").unwrap(), FileConfig::default());
        assert_eq!(FileConfig::default().max_depth, 10);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let cfg = FileConfig::from_yaml("show_hidden_files: true\nsort: dirs-first\n").unwrap();
        assert!(cfg.show_hidden_files);
        assert_eq!(cfg.sort, SortOrder::DirsFirst);
        assert_eq!(cfg.max_depth, 10);
    }

    #[test]
    fn malformed_yaml_is_an_error() {
        assert!(FileConfig::from_yaml("max_depth: [nope").is_err());
    }

    #[test]
    fn flags_override_file_values() {
        let file = FileConfig {
            max_depth: 3,
            ignore_patterns: vec!["*.log".into()],
            ..FileConfig::default()
        };
        let args = Args::parse_from(["scantree", "-L", "0", "-I", "target, dist", "--strict", "."]);
        let s = Settings::resolve(&args, file, 100);
        assert_eq!(s.walk.max_depth, 0);
        assert_eq!(s.walk.mode, WalkMode::Strict);
        assert_eq!(
            s.walk.ignore.patterns().collect::<Vec<_>>(),
            vec!["*.log", "target", "dist"]
        );
        assert_eq!(s.render.terminal_width, 100);
    }

    #[test]
    fn file_values_apply_without_flags() {
        let file = FileConfig {
            show_hidden_files: true,
            ascii: true,
            ..FileConfig::default()
        };
        let args = Args::parse_from(["scantree", "."]);
        let s = Settings::resolve(&args, file, 80);
        assert!(s.walk.show_hidden);
        assert_eq!(s.walk.max_depth, 10);
        assert_eq!(s.render.glyphs, Glyphs::ASCII);
        assert_eq!(s.walk.mode, WalkMode::Lenient);
    }
}
