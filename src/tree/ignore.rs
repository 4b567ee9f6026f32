use globset::{GlobBuilder, GlobMatcher};
use tracing::warn;

use crate::error::InvalidPattern;

/// Ordered list of compiled ignore globs.
///
/// Patterns are tested in the order given; the first match wins. A pattern
/// that fails to compile is dropped and recorded in [`IgnoreSet::invalid`].
#[derive(Debug, Clone, Default)]
pub struct IgnoreSet {
    matchers: Vec<(String, GlobMatcher)>,
    invalid: Vec<InvalidPattern>,
}

impl IgnoreSet {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Compile `patterns`, skipping (and logging) any that are malformed.
    pub fn new<S: AsRef<str>>(patterns: &[S]) -> Self {
        let mut set = Self::default();
        for pattern in patterns {
            let pattern = pattern.as_ref();
            match GlobBuilder::new(pattern).literal_separator(false).build() {
                Ok(glob) => set
                    .matchers
                    .push((pattern.to_string(), glob.compile_matcher())),
                Err(e) => {
                    warn!(pattern, error = %e, "skipping invalid ignore pattern");
                    set.invalid.push(InvalidPattern {
                        pattern: pattern.to_string(),
                        reason: e.kind().to_string(),
                    });
                }
            }
        }
        set
    }

    /// The first pattern matching the slash-normalized relative path.
    pub fn first_match(&self, rel_path: &str) -> Option<&str> {
        self.matchers
            .iter()
            .find(|(_, m)| m.is_match(rel_path))
            .map(|(p, _)| p.as_str())
    }

    pub fn is_match(&self, rel_path: &str) -> bool {
        self.first_match(rel_path).is_some()
    }

    /// Patterns that compiled successfully, in order.
    pub fn patterns(&self) -> impl Iterator<Item = &str> {
        self.matchers.iter().map(|(p, _)| p.as_str())
    }

    /// Diagnostics for patterns that failed to compile.
    pub fn invalid(&self) -> &[InvalidPattern] {
        &self.invalid
    }

    pub fn is_empty(&self) -> bool {
        self.matchers.is_empty()
    }
}

/// Normalize raw `--ignore` values into individual patterns.
///
/// Accepts single patterns, comma-separated lists, whitespace-separated
/// lists, and either form wrapped in square brackets.
pub fn split_patterns<S: AsRef<str>>(raw: &[S]) -> Vec<String> {
    let mut out = Vec::new();
    for item in raw {
        let s = item.as_ref().trim();
        let s = s.strip_prefix('[').unwrap_or(s);
        let s = s.strip_suffix(']').unwrap_or(s);

        if s.contains(',') {
            out.extend(
                s.split(',')
                    .map(str::trim)
                    .filter(|p| !p.is_empty())
                    .map(String::from),
            );
        } else {
            out.extend(s.split_whitespace().map(String::from));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn star_crosses_separators() {
        let set = IgnoreSet::new(&["*.log"]);
        assert!(set.is_match("app.log"));
        assert!(set.is_match("logs/app.log"));
        assert!(!set.is_match("app.rs"));
    }

    #[test]
    fn directory_contents_glob_does_not_match_directory() {
        let set = IgnoreSet::new(&["b/*"]);
        assert!(!set.is_match("b"));
        assert!(set.is_match("b/c.txt"));
        assert!(set.is_match("b/d/e.txt"));
    }

    #[test]
    fn invalid_pattern_is_skipped_without_affecting_others() {
        let set = IgnoreSet::new(&["[unclosed", "*.tmp"]);
        assert_eq!(set.invalid().len(), 1);
        assert_eq!(set.invalid()[0].pattern, "[unclosed");
        assert!(set.is_match("x.tmp"));
        assert_eq!(set.patterns().collect::<Vec<_>>(), vec!["*.tmp"]);
    }

    #[test]
    fn first_match_follows_list_order() {
        let set = IgnoreSet::new(&["target/**", "target/*"]);
        assert_eq!(set.first_match("target/debug"), Some("target/**"));
    }

    #[test]
    fn split_handles_commas_spaces_and_brackets() {
        let raw = ["[a, b]", "c d", "e", "  ", "f,,g"];
        assert_eq!(split_patterns(&raw), vec!["a", "b", "c", "d", "e", "f", "g"]);
    }
}
