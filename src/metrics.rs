//! Aggregate counters produced alongside a walk.

use std::fmt;
use std::time::Duration;

use crate::tree::Entry;

/// Scans shorter than this report no throughput figure.
pub const MIN_RATE_DURATION: Duration = Duration::from_millis(10);

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Metrics {
    /// Files emitted, root excluded.
    pub total_files: u64,
    /// Directories emitted, root excluded.
    pub total_dirs: u64,
    /// Sum of file sizes in bytes; directories contribute nothing.
    pub total_size: u64,
    pub max_depth: usize,
    pub scan_duration: Duration,
    /// `None` when the scan was too short for a meaningful rate.
    pub files_per_second: Option<f64>,
}

/// Running reduction fed one entry at a time by the walk.
#[derive(Debug, Default)]
pub struct MetricsCollector {
    files: u64,
    dirs: u64,
    size: u64,
    max_depth: usize,
}

impl MetricsCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, entry: &Entry) {
        self.max_depth = self.max_depth.max(entry.depth);
        if entry.depth == 0 {
            return;
        }
        if entry.metadata.is_dir {
            self.dirs += 1;
        } else {
            self.files += 1;
            self.size += entry.metadata.size;
        }
    }

    pub fn finish(self, elapsed: Duration) -> Metrics {
        let files_per_second = if elapsed < MIN_RATE_DURATION {
            None
        } else {
            Some(self.files as f64 / elapsed.as_secs_f64())
        };
        Metrics {
            total_files: self.files,
            total_dirs: self.dirs,
            total_size: self.size,
            max_depth: self.max_depth,
            scan_duration: elapsed,
            files_per_second,
        }
    }
}

/// Human-readable byte count using 1024-based units.
pub fn format_size(bytes: u64) -> String {
    const KB: u64 = 1 << 10;
    const MB: u64 = 1 << 20;
    const GB: u64 = 1 << 30;

    match bytes {
        b if b >= GB => format!("{:.1} GB", b as f64 / GB as f64),
        b if b >= MB => format!("{:.1} MB", b as f64 / MB as f64),
        b if b >= KB => format!("{:.1} KB", b as f64 / KB as f64),
        b => format!("{} B", b),
    }
}

/// Duration rendered with millisecond precision, or exact below one millisecond.
pub fn format_duration(d: Duration) -> String {
    if d < Duration::from_millis(1) {
        format!("{:?}", d)
    } else {
        format!("{:?}", Duration::from_millis(d.as_millis() as u64))
    }
}

impl fmt::Display for Metrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Files:       {}", self.total_files)?;
        writeln!(f, "Directories: {}", self.total_dirs)?;
        writeln!(f, "Total Size:  {}", format_size(self.total_size))?;
        writeln!(f, "Max Depth:   {}", self.max_depth)?;
        writeln!(f, "Duration:    {}", format_duration(self.scan_duration))?;
        match self.files_per_second {
            Some(rate) => write!(f, "Performance: {:.1} files/sec", rate),
            None => write!(f, "Performance: N/A (unstable, short duration)"),
        }
    }
}
