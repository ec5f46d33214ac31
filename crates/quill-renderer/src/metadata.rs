//! Front-matter support.
//!
//! A document may start with a metadata block introduced by a line that is
//! exactly `?`, followed by `key=value` lines and closed by a blank line:
//!
//! ```text
//! ?
//! title=Release notes
//! author=Ada
//!
//! Body starts here.
//! ```
//!
//! [`get_metadata`] reads the block without touching the document;
//! [`clear_metadata`] returns the body that follows it.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::Warning;

/// First blank line: two consecutive line breaks, either style.
static BLANK_LINE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\r?\n\r?\n").unwrap());

/// Front-matter key/value pairs.
///
/// Keys are unique; a repeated key keeps the last value seen. Iteration is in
/// key order so serialized output is stable.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Metadata {
    entries: BTreeMap<String, String>,
}

impl Metadata {
    /// Create empty metadata.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a value by key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Insert a pair, replacing any previous value for `key`.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }

    /// Number of keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no keys are present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Metadata {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut metadata = Self::new();
        for (key, value) in iter {
            metadata.insert(key, value);
        }
        metadata
    }
}

/// Result of reading a document's front matter.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct MetadataResult {
    /// Parsed pairs (empty when `found` is false).
    pub metadata: Metadata,
    /// Whether the document starts with a `?` block.
    pub found: bool,
    /// Malformed lines that were skipped.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Vec::is_empty"))]
    pub warnings: Vec<Warning>,
}

/// Read the optional front-matter block at the start of `document`.
///
/// Lines are trimmed and split on the first `=`. Lines without `=` are
/// skipped and reported as [`Warning::MalformedMetadata`]. Reading stops at
/// the first blank line.
///
/// # Examples
///
/// ```
/// use quill_renderer::get_metadata;
///
/// let result = get_metadata("?\ntitle=Hello\n\nBody");
/// assert!(result.found);
/// assert_eq!(result.metadata.get("title"), Some("Hello"));
///
/// assert!(!get_metadata("Body only").found);
/// ```
#[must_use]
pub fn get_metadata(document: &str) -> MetadataResult {
    let mut lines = document.lines();
    if lines.next() != Some("?") {
        return MetadataResult::default();
    }

    let mut result = MetadataResult {
        found: true,
        ..MetadataResult::default()
    };

    for line in lines.map(str::trim) {
        if line.is_empty() {
            break;
        }
        match line.split_once('=') {
            Some((key, value)) => result.metadata.insert(key, value),
            None => result.warnings.push(Warning::MalformedMetadata {
                line: line.to_owned(),
            }),
        }
    }

    result
}

/// Return `document` with its front-matter block removed.
///
/// Documents that do not start with `?` followed by a line break are returned
/// unchanged. Otherwise everything up to and including the first blank line is
/// dropped; a block that is never closed leaves an empty body.
///
/// A blank line here means two line breaks with nothing between them. This is
/// stricter than [`get_metadata`], which stops reading at a whitespace-only
/// line: a block closed by `" "` yields its pairs but clears the whole body.
///
/// # Examples
///
/// ```
/// use quill_renderer::clear_metadata;
///
/// assert_eq!(clear_metadata("?\nkey=value\n\nBody"), "Body");
/// assert_eq!(clear_metadata("No front matter"), "No front matter");
/// assert_eq!(clear_metadata("?\nkey=value"), "");
/// ```
#[must_use]
pub fn clear_metadata(document: &str) -> &str {
    let Some(rest) = document.strip_prefix('?') else {
        return document;
    };
    if !rest.starts_with('\n') && !rest.starts_with("\r\n") {
        return document;
    }

    // The `?` line's own break counts, so an empty block ("?\n\n") closes immediately.
    match BLANK_LINE_RE.find(rest) {
        Some(m) => &rest[m.end()..],
        None => "",
    }
}
