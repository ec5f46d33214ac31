//! Structured diagnostics collected during rendering.

use std::fmt;

/// Advisory diagnostic produced while rendering or reading metadata.
///
/// Warnings never change the output; callers decide whether to log them.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum Warning {
    /// A front-matter line without `=`; the line was skipped.
    MalformedMetadata {
        /// The offending line, trimmed.
        line: String,
    },
    /// A link target starting with `http` whose host could not be derived.
    UnparsableUrl {
        /// The link target as written.
        url: String,
        /// Why parsing failed.
        reason: String,
    },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedMetadata { line } => write!(f, "broken metadata: {line}"),
            Self::UnparsableUrl { url, reason } => write!(f, "url parse error: {url}: {reason}"),
        }
    }
}
