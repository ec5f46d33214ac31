//! Block-level dispatch for a single paragraph.
//!
//! Each paragraph is classified once ([`Block::detect`]) and rendered into a
//! [`Rendered`] value that tells the caller whether it still needs a `<p>`
//! wrapper.

use std::fmt::Write;

use crate::Warning;
use crate::inline::render_inline;
use crate::renderer::render_into;

/// Paragraph separator for a horizontal rule.
const HORIZONTAL_RULE: &str = "===";
/// Blockquote line prefix.
const QUOTE_PREFIX: &str = "> ";
/// Table row prefix and cell separator.
const TABLE_SEP: char = '|';
/// Marks the first table row as a header row (`|!Name|Value`).
const TABLE_HEADER: char = '!';

/// List flavor, chosen by the first line's prefix.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ListKind {
    /// `- item` → `<ol>`
    Ordered,
    /// `* item` → `<ul>`
    Unordered,
}

impl ListKind {
    fn prefix(self) -> &'static str {
        match self {
            ListKind::Ordered => "- ",
            ListKind::Unordered => "* ",
        }
    }

    fn tag(self) -> &'static str {
        match self {
            ListKind::Ordered => "ol",
            ListKind::Unordered => "ul",
        }
    }
}

/// Block-level construct a paragraph renders as.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Block {
    /// `===`
    HorizontalRule,
    /// `# ` through `###### `; carries the level (1-6).
    Header(u8),
    /// Lines prefixed with `> `.
    Blockquote,
    /// Lines starting with `|`.
    Table {
        /// First row starts with `|!`.
        has_header_row: bool,
    },
    /// `- ` or `* ` items.
    List(ListKind),
    /// Anything else.
    Plain,
}

impl Block {
    /// Classify soft-broken paragraph text.
    ///
    /// Checks run in priority order and the first match wins: rule, header,
    /// quote, table, ordered list, unordered list.
    #[must_use]
    pub fn detect(text: &str) -> Self {
        if text.trim_end_matches('\n') == HORIZONTAL_RULE {
            return Block::HorizontalRule;
        }

        for level in 1..=6u8 {
            let hashes = "#".repeat(usize::from(level));
            if text
                .strip_prefix(hashes.as_str())
                .is_some_and(|rest| rest.starts_with(' '))
            {
                return Block::Header(level);
            }
        }

        if text.starts_with(QUOTE_PREFIX) {
            return Block::Blockquote;
        }

        if text.starts_with(TABLE_SEP) && text.lines().all(|line| line.starts_with(TABLE_SEP)) {
            return Block::Table {
                has_header_row: text[1..].starts_with(TABLE_HEADER),
            };
        }

        for kind in [ListKind::Ordered, ListKind::Unordered] {
            if text.starts_with(kind.prefix()) {
                return Block::List(kind);
            }
        }

        Block::Plain
    }
}

/// A rendered paragraph.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Rendered {
    /// Inline content that still needs a `<p>` wrapper.
    Wrapped(String),
    /// Already a block-level element; emitted as is.
    Bare(String),
}

impl Rendered {
    /// Final HTML for this paragraph.
    #[must_use]
    pub fn into_html(self) -> String {
        match self {
            Rendered::Wrapped(html) => format!("<p>{html}</p>"),
            Rendered::Bare(html) => html,
        }
    }
}

/// Apply soft breaks line by line.
///
/// `text +` becomes `text<br>`, a lone `+` becomes `<br>`. Every output line
/// ends with `\n`.
pub(crate) fn render_breaks(paragraph: &str) -> String {
    let mut out = String::with_capacity(paragraph.len() + 16);
    for line in paragraph.lines() {
        if let Some(head) = line.strip_suffix(" +") {
            out.push_str(head);
            out.push_str("<br>");
        } else if line.trim() == "+" {
            out.push_str("<br>");
        } else {
            out.push_str(line);
        }
        out.push('\n');
    }
    out
}

/// Render one trimmed paragraph.
///
/// Warnings are appended to `warnings`. Use [`Rendered::into_html`] to get
/// the final markup.
///
/// ```
/// use quill_renderer::{Rendered, render_paragraph};
///
/// let mut warnings = Vec::new();
/// let rendered = render_paragraph("## Setup", &mut warnings);
/// assert_eq!(rendered, Rendered::Bare("<h2>Setup</h2>".to_owned()));
/// ```
pub fn render_paragraph(paragraph: &str, warnings: &mut Vec<Warning>) -> Rendered {
    let text = render_breaks(paragraph);
    let block = Block::detect(&text);

    let mut html = match block {
        Block::HorizontalRule => return Rendered::Bare("<hr>".to_owned()),
        // The quote body went through the whole pipeline already.
        Block::Blockquote => return Rendered::Bare(render_quote(&text, warnings)),
        Block::Header(level) => {
            let content = text[usize::from(level) + 1..].trim();
            format!("<h{level}>{content}</h{level}>")
        }
        Block::Table { has_header_row } => render_table(&text, has_header_row),
        Block::List(kind) => render_list(&text, kind),
        Block::Plain => text,
    };

    let starts_with_block = render_inline(&mut html, warnings);
    let html = html.trim_matches('\n').to_owned();

    if block == Block::Plain && !starts_with_block {
        Rendered::Wrapped(html)
    } else {
        Rendered::Bare(html)
    }
}

fn render_quote(text: &str, warnings: &mut Vec<Warning>) -> String {
    let mut body = String::with_capacity(text.len());
    for line in text.lines() {
        if let Some(rest) = line.strip_prefix(QUOTE_PREFIX) {
            body.push_str(rest);
        } else if line != QUOTE_PREFIX.trim_end() {
            body.push_str(line);
        }
        body.push('\n');
    }

    let inner = render_into(&body, warnings);
    format!("<blockquote>\n{inner}\n</blockquote>")
}

fn render_table(text: &str, has_header_row: bool) -> String {
    let mut out = String::with_capacity(text.len() * 2);
    out.push_str("<table>\n");
    out.push_str(if has_header_row { "<thead>\n" } else { "<tbody>\n" });

    let mut header = has_header_row;
    for line in text.lines() {
        let cell = if header { "th" } else { "td" };
        out.push_str("<tr>\n");
        for (i, field) in line.split(TABLE_SEP).enumerate().skip(1) {
            let field = if header && i == 1 {
                field.strip_prefix(TABLE_HEADER).unwrap_or(field)
            } else {
                field
            };
            writeln!(out, "<{cell}>{}</{cell}>", field.trim()).unwrap();
        }
        out.push_str("</tr>\n");

        if header {
            header = false;
            out.push_str("</thead>\n<tbody>\n");
        }
    }

    out.push_str("</tbody>\n</table>");
    out
}

fn render_list(text: &str, kind: ListKind) -> String {
    let prefix = kind.prefix();
    let mut items: Vec<String> = Vec::new();
    for line in text.lines() {
        if let Some(item) = line.strip_prefix(prefix) {
            items.push(item.to_owned());
        } else if let Some(current) = items.last_mut() {
            current.push('\n');
            current.push_str(line);
        } else {
            items.push(line.to_owned());
        }
    }

    let tag = kind.tag();
    let mut out = format!("<{tag}>\n");
    for item in &items {
        writeln!(out, "<li>{item}</li>").unwrap();
    }
    write!(out, "</{tag}>").unwrap();
    out
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn paragraph(text: &str) -> Rendered {
        let mut warnings = Vec::new();
        render_paragraph(text, &mut warnings)
    }

    #[test]
    fn test_breaks_trailing_plus() {
        assert_eq!(render_breaks("one +\ntwo"), "one<br>\ntwo\n");
    }

    #[test]
    fn test_breaks_lone_plus() {
        assert_eq!(render_breaks("one\n+\ntwo"), "one\n<br>\ntwo\n");
        assert_eq!(render_breaks("one\n  +  \ntwo"), "one\n<br>\ntwo\n");
    }

    #[test]
    fn test_breaks_plus_without_space_untouched() {
        assert_eq!(render_breaks("1+\n2"), "1+\n2\n");
    }

    #[test]
    fn test_detect_priority() {
        assert_eq!(Block::detect("===\n"), Block::HorizontalRule);
        assert_eq!(Block::detect("# Title\n"), Block::Header(1));
        assert_eq!(Block::detect("###### Deep\n"), Block::Header(6));
        assert_eq!(Block::detect("> quoted\n"), Block::Blockquote);
        assert_eq!(
            Block::detect("|!a|b\n|1|2\n"),
            Block::Table {
                has_header_row: true
            }
        );
        assert_eq!(
            Block::detect("|a|b\n"),
            Block::Table {
                has_header_row: false
            }
        );
        assert_eq!(Block::detect("- one\n"), Block::List(ListKind::Ordered));
        assert_eq!(Block::detect("* one\n"), Block::List(ListKind::Unordered));
        assert_eq!(Block::detect("just text\n"), Block::Plain);
    }

    #[test]
    fn test_detect_near_misses_are_plain() {
        assert_eq!(Block::detect("#Title\n"), Block::Plain);
        assert_eq!(Block::detect("####### seven\n"), Block::Plain);
        assert_eq!(Block::detect(">no space\n"), Block::Plain);
        assert_eq!(Block::detect("|a|b\nnot a row\n"), Block::Plain);
        assert_eq!(Block::detect("-no space\n"), Block::Plain);
        assert_eq!(Block::detect("==== \n"), Block::Plain);
    }

    #[test]
    fn test_detect_empty_is_plain() {
        assert_eq!(Block::detect(""), Block::Plain);
    }

    #[test]
    fn test_horizontal_rule() {
        assert_eq!(paragraph("==="), Rendered::Bare("<hr>".to_owned()));
    }

    #[test]
    fn test_header_levels() {
        assert_eq!(
            paragraph("## Sub **title**"),
            Rendered::Bare("<h2>Sub <b>title</b></h2>".to_owned())
        );
    }

    #[test]
    fn test_table_with_header() {
        let rendered = paragraph("|!Name|Value\n|a|1\n|b|2");
        assert_eq!(
            rendered.into_html(),
            "<table>\n<thead>\n<tr>\n<th>Name</th>\n<th>Value</th>\n</tr>\n</thead>\n\
             <tbody>\n<tr>\n<td>a</td>\n<td>1</td>\n</tr>\n<tr>\n<td>b</td>\n<td>2</td>\n</tr>\n\
             </tbody>\n</table>"
        );
    }

    #[test]
    fn test_table_without_header() {
        let rendered = paragraph("| x | **y** ");
        assert_eq!(
            rendered.into_html(),
            "<table>\n<tbody>\n<tr>\n<td>x</td>\n<td><b>y</b></td>\n</tr>\n</tbody>\n</table>"
        );
    }

    #[test]
    fn test_table_bang_only_stripped_in_header_row() {
        let html = paragraph("|a|b\n|!c|d").into_html();
        assert!(html.contains("<td>!c</td>"));
        assert!(!html.contains("<thead>"));
    }

    #[test]
    fn test_table_trailing_pipe_yields_empty_cell() {
        let html = paragraph("|a|").into_html();
        assert_eq!(
            html,
            "<table>\n<tbody>\n<tr>\n<td>a</td>\n<td></td>\n</tr>\n</tbody>\n</table>"
        );
    }

    #[test]
    fn test_unordered_list() {
        assert_eq!(
            paragraph("* item1\n* item2").into_html(),
            "<ul>\n<li>item1</li>\n<li>item2</li>\n</ul>"
        );
    }

    #[test]
    fn test_ordered_list_multiline_item() {
        assert_eq!(
            paragraph("- first\n  continued\n- second").into_html(),
            "<ol>\n<li>first\n  continued</li>\n<li>second</li>\n</ol>"
        );
    }

    #[test]
    fn test_list_mixed_prefix_is_continuation() {
        assert_eq!(
            paragraph("- one\n* two").into_html(),
            "<ol>\n<li>one\n* two</li>\n</ol>"
        );
    }

    #[test]
    fn test_list_with_soft_break() {
        assert_eq!(
            paragraph("* a +\nb").into_html(),
            "<ul>\n<li>a<br>\nb</li>\n</ul>"
        );
    }

    #[test]
    fn test_blockquote_recurses() {
        assert_eq!(
            paragraph("> # Quoted\n>\n> Body **text**").into_html(),
            "<blockquote>\n<h1>Quoted</h1>\n<p>Body <b>text</b></p>\n</blockquote>"
        );
    }

    #[test]
    fn test_blockquote_nested() {
        assert_eq!(
            paragraph("> > inner").into_html(),
            "<blockquote>\n<blockquote>\n<p>inner</p>\n</blockquote>\n</blockquote>"
        );
    }

    #[test]
    fn test_plain_is_wrapped() {
        assert_eq!(
            paragraph("plain text"),
            Rendered::Wrapped("plain text".to_owned())
        );
    }

    #[test]
    fn test_leading_hidden_image_is_bare() {
        assert!(matches!(paragraph(":[x](a.png)"), Rendered::Bare(_)));
        assert!(matches!(paragraph("see :[x](a.png)"), Rendered::Wrapped(_)));
    }

    #[test]
    fn test_literal_backslash_is_not_a_marker() {
        assert_eq!(
            paragraph(r"\<b>not bare"),
            Rendered::Wrapped(r"\<b>not bare".to_owned())
        );
    }
}
