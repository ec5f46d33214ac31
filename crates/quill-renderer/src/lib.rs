//! Renderer for quill markup, a small line-oriented markup dialect.
//!
//! This crate turns a quill document into an HTML fragment. It is a pure
//! text-to-text transform: no I/O, no global state, and no failure mode.
//! Malformed markup degrades to literal text, and advisory diagnostics are
//! returned as [`Warning`] values instead of being logged.
//!
//! # Pipeline
//!
//! 1. The optional front-matter block (`?` line, `key=value` lines, blank
//!    line) is stripped with [`clear_metadata`]; read it with [`get_metadata`].
//! 2. The body is split into paragraphs on blank lines ([`split_paragraphs`]).
//! 3. Each paragraph gets soft breaks, is classified as one [`Block`] and is
//!    wrapped in the matching HTML structure. Blockquotes re-enter the whole
//!    pipeline for their body.
//! 4. Inline spans are rendered: accents, links, images, footnotes.
//! 5. Paragraphs that are not already block-level elements get a `<p>`.
//!
//! # Syntax
//!
//! | Markup | HTML |
//! |--------|------|
//! | `# Title` … `###### Title` | `<h1>` … `<h6>` |
//! | `> quoted` | `<blockquote>` |
//! | `\|!Head\|Head` then `\|a\|b` | `<table>` with `<thead>` |
//! | `* item` / `- item` | `<ul>` / `<ol>` |
//! | `===` | `<hr>` |
//! | `**b**` `__u__` `~~i~~` `--s--` | `<b>` `<u>` `<i>` `<s>` |
//! | `[label](url)` / `(url)` | `<a>`; `@D` prefix adds `download`, `^url` opens a new tab |
//! | `:(file)` / `:[desc](file)` | `<img>` / collapsible `<details>` image |
//! | `[^ref]` / `[^ref]: note` | footnote reference / definition |
//! | `text +` or a lone `+` | `<br>` |
//!
//! # Example
//!
//! ```
//! use quill_renderer::{get_metadata, render};
//!
//! let document = "?\ntitle=Notes\n\n# Notes\n\nSee **this** (https://www.example.com).";
//!
//! let meta = get_metadata(document);
//! assert_eq!(meta.metadata.get("title"), Some("Notes"));
//!
//! let result = render(document);
//! assert_eq!(
//!     result.html,
//!     "<h1>Notes</h1>\n<p>See <b>this</b> <a href=\"https://www.example.com\">example.com</a>.</p>"
//! );
//! ```

mod block;
mod inline;
mod metadata;
mod paragraph;
mod renderer;
mod splice;
mod util;
mod warning;

pub use block::{Block, ListKind, Rendered, render_paragraph};
pub use inline::Accent;
pub use metadata::{Metadata, MetadataResult, clear_metadata, get_metadata};
pub use paragraph::split_paragraphs;
pub use renderer::{RenderResult, render, render_text};
pub use warning::Warning;
