//! Paragraph segmentation.

use std::sync::LazyLock;

use regex::Regex;

/// A line break followed, after any whitespace-only lines, by another break.
static PARAGRAPH_BREAK_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n\s*\n").unwrap());

/// Split a document body into trimmed, non-empty paragraphs.
///
/// `\r\n` is normalized to `\n` first. Paragraph order is preserved.
///
/// # Examples
///
/// ```
/// use quill_renderer::split_paragraphs;
///
/// let paragraphs = split_paragraphs("First line\nstill first\n\n  \n\nSecond");
/// assert_eq!(paragraphs, vec!["First line\nstill first", "Second"]);
/// ```
#[must_use]
pub fn split_paragraphs(text: &str) -> Vec<String> {
    let normalized = text.replace("\r\n", "\n");
    PARAGRAPH_BREAK_RE
        .split(&normalized)
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_owned)
        .collect()
}
