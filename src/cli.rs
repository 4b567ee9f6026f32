use clap::Parser;
use std::path::PathBuf;

use crate::tree::SortOrder;

const EXAMPLES: &str = "\
Examples:
  scantree                      Tree of the current directory
  scantree -L 2 src             Two levels below src/
  scantree -I 'target,*.log'    Skip target/ and log files
  scantree -e tree.svg          Export an SVG drawing
  scantree -i ~/projects        Browse interactively";

#[derive(Parser, Debug, Clone)]
#[command(
    name = "scantree",
    version,
    about = "Directory tree visualizer with scan metrics and export",
    after_help = EXAMPLES
)]
pub struct Args {
    /// Directory to scan (default: current directory)
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Max depth below the root (0 or negative: unlimited)
    #[arg(short = 'L', long = "level", allow_negative_numbers = true)]
    pub max_depth: Option<i64>,

    /// Glob patterns to exclude, matched against root-relative paths (repeatable, comma lists accepted)
    #[arg(short = 'I', long = "ignore", action = clap::ArgAction::Append)]
    pub ignore: Vec<String>,

    /// Show hidden files (dotfiles)
    #[arg(short = 'a', long = "all")]
    pub show_hidden: bool,

    /// Abort on the first unreadable entry instead of skipping it
    #[arg(long = "strict")]
    pub strict: bool,

    /// Sibling order
    #[arg(long = "sort", value_enum)]
    pub sort: Option<SortOrder>,

    /// Draw connectors with ASCII characters
    #[arg(long = "ascii")]
    pub ascii: bool,

    /// Follow symbolic links
    #[arg(short = 'f', long = "follow-symlinks")]
    pub follow_symlinks: bool,

    /// Export the tree to a file (.txt, .json, .svg)
    #[arg(short = 'e', long = "export", value_name = "FILE")]
    pub export: Option<PathBuf>,

    /// Disable the scan progress indicator
    #[arg(long = "no-progress")]
    pub no_progress: bool,

    /// Hide scan metrics
    #[arg(long = "no-metrics")]
    pub no_metrics: bool,

    /// Disable colored output
    #[arg(long = "no-color")]
    pub no_color: bool,

    /// Browse the tree interactively
    #[arg(short = 'i', long = "interactive")]
    pub interactive: bool,

    /// Configuration file (default: $SCANTREE_CONFIG or the per-user config)
    #[arg(long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (repeatable)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short = 'q', long = "quiet")]
    pub quiet: bool,
}

impl Args {
    /// Enforce invariants after parsing.
    pub fn validated(mut self) -> Self {
        // Respect NO_COLOR env var
        if std::env::var_os("NO_COLOR").is_some() {
            self.no_color = true;
        }
        if self.quiet {
            self.verbose = 0;
        }
        self
    }
}
