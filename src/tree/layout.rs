//! Connector prefixes derived from the flat, depth-annotated entry list.
//!
//! The tree is never materialized. Each entry's connector depends only on
//! the depth of the entry after it, and the ancestor columns come from a
//! per-depth flag table updated left to right.

use super::Entry;

/// Glyph set used to draw connectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyphs {
    pub branch: &'static str,
    pub corner: &'static str,
    pub vertical: &'static str,
    pub blank: &'static str,
}

impl Glyphs {
    pub const UNICODE: Glyphs = Glyphs {
        branch: "\u{251c}\u{2500}\u{2500} ",   // ├──
        corner: "\u{2514}\u{2500}\u{2500} ",   // └──
        vertical: "\u{2502}   ",               // │
        blank: "    ",
    };

    pub const ASCII: Glyphs = Glyphs {
        branch: "|-- ",
        corner: "`-- ",
        vertical: "|   ",
        blank: "    ",
    };
}

impl Default for Glyphs {
    fn default() -> Self {
        Glyphs::UNICODE
    }
}

/// Whether the entry at `index` closes its run of siblings: it is the final
/// entry, or the next entry is no deeper than it.
pub fn is_last(entries: &[Entry], index: usize) -> bool {
    match entries.get(index + 1) {
        Some(next) => next.depth <= entries[index].depth,
        None => true,
    }
}

/// Forward-pass prefix builder holding one flag per depth level.
#[derive(Debug, Clone)]
pub struct PrefixDeriver {
    glyphs: Glyphs,
    // needs_vertical[d]: the latest entry seen at depth d was not last.
    needs_vertical: Vec<bool>,
}

impl PrefixDeriver {
    pub fn new(glyphs: Glyphs) -> Self {
        Self {
            glyphs,
            needs_vertical: Vec::new(),
        }
    }

    /// Consume the next entry in order and return its prefix.
    pub fn push(&mut self, depth: usize, is_last: bool) -> String {
        if depth == 0 {
            return String::new();
        }
        if self.needs_vertical.len() <= depth {
            self.needs_vertical.resize(depth + 1, false);
        }
        self.needs_vertical[depth] = !is_last;

        let mut prefix = String::new();
        for d in 1..depth {
            if self.needs_vertical[d] {
                prefix.push_str(self.glyphs.vertical);
            } else {
                prefix.push_str(self.glyphs.blank);
            }
        }
        prefix.push_str(if is_last {
            self.glyphs.corner
        } else {
            self.glyphs.branch
        });
        prefix
    }
}

/// Prefix for every entry, in order.
pub fn derive_prefixes(entries: &[Entry], glyphs: &Glyphs) -> Vec<String> {
    let mut deriver = PrefixDeriver::new(*glyphs);
    (0..entries.len())
        .map(|i| deriver.push(entries[i].depth, is_last(entries, i)))
        .collect()
}

/// Prefix for the entry at `index`.
///
/// Replays the forward pass up to `index`; renderers drawing every line
/// should use [`lines`] instead.
pub fn derive_prefix(entries: &[Entry], index: usize, glyphs: &Glyphs) -> String {
    let mut deriver = PrefixDeriver::new(*glyphs);
    let mut prefix = String::new();
    if entries.is_empty() {
        return prefix;
    }
    for i in 0..=index.min(entries.len() - 1) {
        prefix = deriver.push(entries[i].depth, is_last(entries, i));
    }
    prefix
}

/// One renderable line: the entry plus its derived topology.
#[derive(Debug, Clone)]
pub struct TreeLine<'a> {
    pub entry: &'a Entry,
    pub is_last: bool,
    pub prefix: String,
}

/// Iterator pairing each entry with its prefix, computed on the fly.
pub struct Lines<'a> {
    entries: &'a [Entry],
    index: usize,
    deriver: PrefixDeriver,
}

impl<'a> Iterator for Lines<'a> {
    type Item = TreeLine<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let entry = self.entries.get(self.index)?;
        let last = is_last(self.entries, self.index);
        let prefix = self.deriver.push(entry.depth, last);
        self.index += 1;
        Some(TreeLine {
            entry,
            is_last: last,
            prefix,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let rest = self.entries.len() - self.index;
        (rest, Some(rest))
    }
}

/// Walk `entries` in order, yielding each with its connector prefix.
pub fn lines<'a>(entries: &'a [Entry], glyphs: &Glyphs) -> Lines<'a> {
    Lines {
        entries,
        index: 0,
        deriver: PrefixDeriver::new(*glyphs),
    }
}
