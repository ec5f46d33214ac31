//! Inline span rendering: accents, links, images and footnotes.
//!
//! Each pass scans the paragraph buffer left to right, records every
//! replacement with its byte range in [`Splices`], then rebuilds the buffer
//! once. Passes run in a fixed order (see [`render_inline`]) and each one sees
//! the output of the previous pass.

use std::ops::Range;
use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::Warning;
use crate::splice::Splices;
use crate::util::{path_base, url_host};

/// Complex link: `[label](target)`, optionally prefixed with `@D`.
static COMPLEX_LINK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)(?P<download>@D)?\[(?P<label>.*?)\]\s*\((?P<target>.*?)\)").unwrap()
});

/// Simple link: `(target)`, optionally prefixed with `@D`.
static SIMPLE_LINK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)(?P<download>@D)?\((?P<target>.*?)\)").unwrap());

/// Normal image: `:(file)`.
static NORMAL_IMAGE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s):\((?P<file>.*?)\)").unwrap());

/// Hidden image: `:[desc](file)`.
static HIDDEN_IMAGE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s):\[(?P<desc>.*?)\]\s*\((?P<file>.*?)\)").unwrap());

/// Footnote definition, anchored at the start of the paragraph.
static FOOTNOTE_DEF_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)^\[\^([^\[]*?)\]: ").unwrap());

/// Footnote reference anywhere in the paragraph.
static FOOTNOTE_REF_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\[\^([^\[]*?)\]").unwrap());

/// Marker prefix on a link or image target requesting a new tab.
const NEW_TAB: char = '^';

/// Paired-delimiter emphasis.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Accent {
    /// `**text**` → `<b>`
    Bold,
    /// `__text__` → `<u>`
    Underline,
    /// `~~text~~` → `<i>`
    Italic,
    /// `--text--` → `<s>`
    Strike,
}

impl Accent {
    /// All accents in the order they are applied.
    pub const ALL: [Accent; 4] = [
        Accent::Bold,
        Accent::Underline,
        Accent::Italic,
        Accent::Strike,
    ];

    /// HTML tag name emitted for this accent.
    #[must_use]
    pub fn tag(self) -> &'static str {
        match self {
            Accent::Bold => "b",
            Accent::Underline => "u",
            Accent::Italic => "i",
            Accent::Strike => "s",
        }
    }

    fn regex(self) -> &'static Regex {
        static BOLD: LazyLock<Regex> =
            LazyLock::new(|| Regex::new(r"(?s)\*\*(.*?)\*\*").unwrap());
        static UNDERLINE: LazyLock<Regex> =
            LazyLock::new(|| Regex::new(r"(?s)__(.*?)__").unwrap());
        static ITALIC: LazyLock<Regex> =
            LazyLock::new(|| Regex::new(r"(?s)~~(.*?)~~").unwrap());
        static STRIKE: LazyLock<Regex> =
            LazyLock::new(|| Regex::new(r"(?s)--(.*?)--").unwrap());

        match self {
            Accent::Bold => &BOLD,
            Accent::Underline => &UNDERLINE,
            Accent::Italic => &ITALIC,
            Accent::Strike => &STRIKE,
        }
    }
}

/// Run every inline pass over `text` in order: accents, links, images,
/// footnotes.
///
/// Returns `true` when the result starts with a block-level element (a hidden
/// image or a footnote definition) and must not be wrapped in `<p>`.
pub(crate) fn render_inline(text: &mut String, warnings: &mut Vec<Warning>) -> bool {
    for accent in Accent::ALL {
        render_accent(text, accent);
    }
    render_links(text, warnings);
    let hidden_image_first = render_images(text);
    let footnote_definition = render_footnotes(text);
    hidden_image_first || footnote_definition
}

/// Replace every match of `re` in `text` with the output of `render`.
///
/// `render` returning `None` leaves that match as it is.
fn splice_matches(
    text: &mut String,
    re: &Regex,
    mut render: impl FnMut(&Captures) -> Option<String>,
) {
    let mut splices = Splices::new();
    for caps in re.captures_iter(text) {
        if let Some(html) = render(&caps) {
            splices.add(caps.get(0).map_or(0..0, |m| m.range()), html);
        }
    }
    splices.apply(text);
}

pub(crate) fn render_accent(text: &mut String, accent: Accent) {
    let tag = accent.tag();
    splice_matches(text, accent.regex(), |caps| {
        Some(format!("<{tag}>{}</{tag}>", &caps[1]))
    });
}

/// Complex links are resolved over the whole text before simple links, so
/// an unbalanced `(` earlier in the paragraph cannot swallow a later
/// `[label](target)`. Matches that overlap an image are left for the image
/// pass.
pub(crate) fn render_links(text: &mut String, warnings: &mut Vec<Warning>) {
    let images = image_spans(text);
    splice_matches(text, &COMPLEX_LINK_RE, |caps| {
        let whole = caps.get(0)?;
        if overlaps_any(&images, &whole.range()) {
            return None;
        }
        let (target, new_tab) = split_new_tab(caps.name("target").map_or("", |m| m.as_str()));
        let label = caps.name("label").map_or("", |m| m.as_str());
        Some(link_html(target, label, caps.name("download").is_some(), new_tab))
    });

    let images = image_spans(text);
    splice_matches(text, &SIMPLE_LINK_RE, |caps| {
        let whole = caps.get(0)?;
        if overlaps_any(&images, &whole.range()) {
            return None;
        }
        let (target, new_tab) = split_new_tab(caps.name("target").map_or("", |m| m.as_str()));
        let label = simple_label(target, warnings);
        Some(link_html(target, &label, caps.name("download").is_some(), new_tab))
    });
}

fn link_html(target: &str, label: &str, download: bool, new_tab: bool) -> String {
    let mut html = format!(r#"<a href="{target}""#);
    if download {
        html.push_str(" download");
    }
    if new_tab {
        html.push_str(r#" target="_blank""#);
    }
    html.push('>');
    html.push_str(label);
    html.push_str("</a>");
    html
}

/// Byte ranges of every image, either form, in `text`.
fn image_spans(text: &str) -> Vec<Range<usize>> {
    NORMAL_IMAGE_RE
        .find_iter(text)
        .chain(HIDDEN_IMAGE_RE.find_iter(text))
        .map(|m| m.range())
        .collect()
}

fn overlaps_any(spans: &[Range<usize>], range: &Range<usize>) -> bool {
    spans
        .iter()
        .any(|span| span.start < range.end && range.start < span.end)
}

/// Normal images are rendered first, then hidden ones.
///
/// Returns `true` if a hidden image starts the text.
pub(crate) fn render_images(text: &mut String) -> bool {
    splice_matches(text, &NORMAL_IMAGE_RE, |caps| {
        Some(image_html(caps.name("file").map_or("", |m| m.as_str())))
    });

    let mut hidden_first = false;
    splice_matches(text, &HIDDEN_IMAGE_RE, |caps| {
        if caps.get(0).is_some_and(|m| m.start() == 0) {
            hidden_first = true;
        }
        let desc = caps.name("desc").map_or("", |m| m.as_str());
        let file = caps.name("file").map_or("", |m| m.as_str());
        Some(format!(
            "<details><summary>[{desc}]</summary>{}</details>",
            image_html(file)
        ))
    });
    hidden_first
}

/// Returns `true` if the text was a footnote definition.
pub(crate) fn render_footnotes(text: &mut String) -> bool {
    let definition = FOOTNOTE_DEF_RE.captures(text).map(|caps| {
        let reference = caps[1].to_owned();
        let body_start = caps.get(0).map_or(0, |m| m.end());
        (reference, body_start)
    });

    if let Some((reference, body_start)) = &definition {
        let body = text[*body_start..].trim_end_matches('\n');
        *text = format!(
            "<p class=\"footnote\" id=\"fn-{reference}\">\n<sup><a href=\"#fr-{reference}\">{reference}</a></sup>\n{body}</p>"
        );
    }

    splice_matches(text, &FOOTNOTE_REF_RE, |caps| {
        let reference = &caps[1];
        Some(format!(
            r##"<sup class="footref" id="fr-{reference}"><a href="#fn-{reference}">{reference}</a></sup>"##
        ))
    });

    definition.is_some()
}

/// Strip the new-tab marker from a target.
fn split_new_tab(target: &str) -> (&str, bool) {
    match target.strip_prefix(NEW_TAB) {
        Some(stripped) => (stripped, true),
        None => (target, false),
    }
}

/// Visible label for `(target)` links.
///
/// `http` targets show their host without `www.`; anything else shows its
/// last path segment.
fn simple_label(target: &str, warnings: &mut Vec<Warning>) -> String {
    if !target.starts_with("http") {
        return path_base(target).to_owned();
    }
    match url_host(target) {
        Ok(host) => host.strip_prefix("www.").unwrap_or(&host).to_owned(),
        Err(reason) => {
            warnings.push(Warning::UnparsableUrl {
                url: target.to_owned(),
                reason,
            });
            String::new()
        }
    }
}

/// `<img>` for `file`, wrapped in a new-tab anchor when marked with `^`.
fn image_html(file: &str) -> String {
    let (file, new_tab) = split_new_tab(file);
    let img = format!(r#"<img src="{file}" alt="{file}">"#);
    if new_tab {
        format!(r#"<a href="{file}" target="_blank">{img}</a>"#)
    } else {
        img
    }
}
