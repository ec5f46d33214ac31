//! Document-level rendering pipeline.

use crate::Warning;
use crate::block::render_paragraph;
use crate::metadata::clear_metadata;
use crate::paragraph::split_paragraphs;

/// Result of rendering a document.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RenderResult {
    /// Rendered HTML fragment.
    pub html: String,
    /// Warnings generated during rendering (e.g., unparsable link URLs).
    pub warnings: Vec<Warning>,
}

/// Render a document to an HTML fragment, collecting warnings.
///
/// The front-matter block is skipped, the body is split into paragraphs and
/// each paragraph becomes exactly one top-level HTML block, in order.
///
/// # Examples
///
/// ```
/// use quill_renderer::render;
///
/// let result = render("# Title\n\nSee (https://www.example.com/docs).");
/// assert_eq!(
///     result.html,
///     "<h1>Title</h1>\n<p>See <a href=\"https://www.example.com/docs\">example.com</a>.</p>"
/// );
/// assert!(result.warnings.is_empty());
/// ```
#[must_use]
pub fn render(document: &str) -> RenderResult {
    let mut warnings = Vec::new();
    let html = render_into(document, &mut warnings);
    RenderResult { html, warnings }
}

/// Render a document to an HTML fragment, discarding warnings.
///
/// ```
/// assert_eq!(quill_renderer::render_text("Hello **world**"), "<p>Hello <b>world</b></p>");
/// ```
#[must_use]
pub fn render_text(document: &str) -> String {
    render(document).html
}

/// Pipeline shared by [`render`] and blockquote bodies.
pub(crate) fn render_into(document: &str, warnings: &mut Vec<Warning>) -> String {
    let body = clear_metadata(document);

    let mut html = String::with_capacity(body.len() + body.len() / 2);
    for paragraph in split_paragraphs(body) {
        html.push_str(&render_paragraph(&paragraph, warnings).into_html());
        html.push('\n');
    }

    html.trim().to_owned()
}
