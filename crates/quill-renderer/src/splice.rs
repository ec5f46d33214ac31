//! Single-pass, offset-based string splicing for inline passes.
//!
//! Collects replacements keyed by byte range and applies them in one pass.

use std::ops::Range;

/// Collects byte-range replacements for single-pass application.
///
/// Inline passes find their matches left to right and register each one with
/// the exact range it covers. [`apply()`](Self::apply) then rebuilds the text
/// once. Two spans with identical text are each replaced where they were
/// found, never at "the first occurrence" of their text.
///
/// ```text
/// Replace-by-value (N matches):
///   for m in matches:
///     text = text.replacen(m.as_str(), ..., 1)   # O(len) scan + allocation each
///   Total: O(N × len), and wrong when two matches share text
///
/// Splices:
///   for m in matches:
///     splices.add(m.range(), ...)                # collect only
///   splices.apply(text)                          # single O(len) allocation
/// ```
///
/// Ranges must be registered in ascending order and must not overlap; this is
/// what a regex `find_iter`/`captures_iter` produces.
#[derive(Debug, Default)]
pub(crate) struct Splices {
    items: Vec<(Range<usize>, String)>,
}

impl Splices {
    /// Create a new empty collector.
    #[must_use]
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Register a replacement of `range` with `to`.
    pub(crate) fn add(&mut self, range: Range<usize>, to: impl Into<String>) {
        debug_assert!(
            self.items.last().is_none_or(|(last, _)| last.end <= range.start),
            "splices must be added in order without overlap"
        );
        self.items.push((range, to.into()));
    }

    /// Apply all registered splices to `text`.
    ///
    /// Consumes the collector to prevent accidental reuse.
    pub(crate) fn apply(self, text: &mut String) {
        if self.is_empty() {
            return;
        }

        let mut out = String::with_capacity(text.len());
        let mut cursor = 0;
        for (range, to) in self.items {
            out.push_str(&text[cursor..range.start]);
            out.push_str(&to);
            cursor = range.end;
        }
        out.push_str(&text[cursor..]);
        *text = out;
    }

    /// Check if there are any splices registered.
    #[must_use]
    pub(crate) fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
