//! Inline HTML to MDX text conversion.

use super::html::{collapse_whitespace, has_class, tag_name};
use crate::model::DEFAULT_SECTION;
use scraper::{ElementRef, Node};
use unicode_normalization::UnicodeNormalization;

/// How literal braces in source text are protected from the MDX parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BraceStyle {
    /// Backslash-escape each brace
    #[default]
    Escape,
    /// Wrap each `{...}` run in an inline code span
    Code,
}

/// Inline conversion settings.
#[derive(Debug, Clone, Copy, Default)]
pub struct InlineOptions {
    /// Brace handling
    pub braces: BraceStyle,
}

/// Tags converted inline rather than as blocks.
const INLINE_TAGS: &[&str] = &[
    "a", "abbr", "b", "br", "cite", "code", "em", "i", "q", "small", "span", "strong", "sub",
    "sup", "u",
];

/// Check whether an element is inline content.
pub fn is_inline(element: &ElementRef<'_>) -> bool {
    INLINE_TAGS.contains(&tag_name(element))
}

/// Convert the children of an element into one line of MDX text.
pub fn inline_text(element: ElementRef<'_>, options: &InlineOptions) -> String {
    let mut out = String::new();
    push_children(&mut out, element, options);
    finish(&out, options)
}

/// Accumulates a run of inline content (text nodes and inline elements)
/// until a block boundary flushes it as one paragraph.
#[derive(Debug, Default)]
pub struct InlineBuffer {
    raw: String,
    options: InlineOptions,
}

impl InlineBuffer {
    /// Create an empty buffer.
    pub fn new(options: InlineOptions) -> Self {
        Self {
            raw: String::new(),
            options,
        }
    }

    /// Append a source text node.
    pub fn push_text(&mut self, text: &str) {
        push_escaped(&mut self.raw, text);
    }

    /// Append an inline element.
    pub fn push_element(&mut self, element: ElementRef<'_>) {
        push_element(&mut self.raw, element, &self.options);
    }

    /// Take the converted text, leaving the buffer empty.
    ///
    /// Returns `None` when the buffered content is only whitespace.
    pub fn take(&mut self) -> Option<String> {
        let text = finish(&self.raw, &self.options);
        self.raw.clear();
        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

/// Convert raw source text into escaped MDX text.
pub fn escape_text(text: &str, options: &InlineOptions) -> String {
    let mut out = String::new();
    push_escaped(&mut out, text);
    finish(&out, options)
}

fn finish(raw: &str, options: &InlineOptions) -> String {
    let nfc: String = raw.nfc().collect();
    let text = collapse_whitespace(&nfc);
    match options.braces {
        BraceStyle::Escape => text,
        BraceStyle::Code => code_braces(&text),
    }
}

fn push_children(out: &mut String, element: ElementRef<'_>, options: &InlineOptions) {
    for child in element.children() {
        match child.value() {
            Node::Text(text) => push_escaped(out, text),
            Node::Element(_) => {
                if let Some(el) = ElementRef::wrap(child) {
                    push_element(out, el, options);
                }
            }
            _ => {}
        }
    }
}

fn push_element(out: &mut String, element: ElementRef<'_>, options: &InlineOptions) {
    if has_class(&element, "mandatory") || has_class(&element, "linkEx") {
        return;
    }

    match tag_name(&element) {
        "br" => out.push_str("<br />"),
        "b" | "strong" => wrap(out, element, "**", options),
        "i" | "em" => wrap(out, element, "*", options),
        "span"
            if has_class(&element, "bolded")
                || has_class(&element, "bolder")
                || has_class(&element, "thisem") =>
        {
            wrap(out, element, "**", options)
        }
        "sup" | "sub" => {
            let tag = tag_name(&element);
            let inner = inline_text(element, options);
            out.push_str(&format!("<{tag}>{inner}</{tag}>"));
        }
        "a" => push_link(out, element, options),
        "script" | "style" => {}
        _ if is_inline(&element) => push_children(out, element, options),
        _ => {
            out.push(' ');
            push_children(out, element, options);
            out.push(' ');
        }
    }
}

fn wrap(out: &mut String, element: ElementRef<'_>, marker: &str, options: &InlineOptions) {
    let raw: String = element.text().collect();
    let inner = inline_text(element, options);
    if inner.is_empty() {
        return;
    }
    if raw.starts_with(char::is_whitespace) {
        out.push(' ');
    }
    out.push_str(marker);
    out.push_str(&inner);
    out.push_str(marker);
    if raw.ends_with(char::is_whitespace) {
        out.push(' ');
    }
}

fn push_link(out: &mut String, element: ElementRef<'_>, options: &InlineOptions) {
    let label = inline_text(element, options);
    let Some(href) = element.value().attr("href").map(str::trim) else {
        out.push_str(&label);
        return;
    };

    if has_class(&element, "linkOutline") || is_external(href) {
        out.push_str(&format!("<OutLink href=\"{}\">{}</OutLink>", href, label));
    } else if has_class(&element, "linkInline") {
        out.push_str(&format!("<InLink to=\"{}\">{}</InLink>", site_path(href), label));
    } else {
        out.push_str(&format!("[{}]({})", label, site_path(href)));
    }
}

fn push_escaped(out: &mut String, text: &str) {
    for c in text.chars() {
        match c {
            '{' => out.push_str("\\{"),
            '}' => out.push_str("\\}"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
}

/// Replace escaped `\{...\}` runs with inline code spans.
fn code_braces(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(start) = rest.find("\\{") {
        let after = &rest[start + 2..];
        match after.find("\\}") {
            Some(end) => {
                out.push_str(&rest[..start]);
                out.push_str("`{");
                out.push_str(&after[..end]);
                out.push_str("}`");
                rest = &after[end + 2..];
            }
            None => break,
        }
    }
    out.push_str(rest);
    out
}

/// Check whether a link leaves the site.
pub fn is_external(href: &str) -> bool {
    href.starts_with("http://") || href.starts_with("https://") || href.starts_with("mailto:")
}

/// Documentation section named by a link or path (the segment after `docs`).
pub fn section_of(href: &str) -> String {
    let segments: Vec<&str> = href.split(|c: char| c == '/' || c == '\\').collect();
    segments
        .iter()
        .position(|s| *s == "docs")
        .and_then(|i| segments.get(i + 1))
        .filter(|s| !s.is_empty() && !s.contains('.') && **s != "ISBDM")
        .map(|s| s.to_string())
        .unwrap_or_else(|| DEFAULT_SECTION.to_string())
}

/// File stem of the last path segment of a link.
pub fn link_stem(href: &str) -> String {
    let path = href.split('#').next().unwrap_or_default();
    let last = path.rsplit('/').next().unwrap_or_default();
    last.strip_suffix(".html").unwrap_or(last).to_string()
}

/// Site path of an element page link: `/docs/<section>/<stem>`.
pub fn element_path(href: &str) -> String {
    format!("/docs/{}/{}", section_of(href), link_stem(href))
}

/// Site path of any internal link.
///
/// Absolute links lose the legacy `/ISBDM` prefix and `.html` suffix;
/// relative links resolve to an element page path.
pub fn site_path(href: &str) -> String {
    let (path, fragment) = match href.split_once('#') {
        Some((p, f)) => (p, Some(f)),
        None => (href, None),
    };

    let mut resolved = if path.starts_with('/') {
        let trimmed = path.strip_prefix("/ISBDM").unwrap_or(path);
        trimmed.strip_suffix(".html").unwrap_or(trimmed).to_string()
    } else if path.is_empty() {
        String::new()
    } else {
        element_path(path)
    };

    if let Some(fragment) = fragment {
        resolved.push('#');
        resolved.push_str(fragment);
    }
    resolved
}
