//! HTML parser adapter over `scraper`.
//!
//! [`SourceDocument`] owns the parsed tree for one input page and exposes
//! CSS-selector queries plus the label/value row lookup used by element
//! pages. The free functions work on any [`ElementRef`] inside it.

use scraper::{ElementRef, Html, Node, Selector};
use unicode_normalization::UnicodeNormalization;

/// Immutable parsed HTML page.
pub struct SourceDocument {
    html: Html,
}

impl SourceDocument {
    /// Parse a complete HTML document.
    pub fn parse(markup: &str) -> Self {
        Self {
            html: Html::parse_document(markup),
        }
    }

    /// Root `<html>` element.
    pub fn root(&self) -> ElementRef<'_> {
        self.html.root_element()
    }

    /// All elements matching a selector, in document order.
    ///
    /// An invalid selector matches nothing.
    pub fn select(&self, css: &str) -> Vec<ElementRef<'_>> {
        let Some(sel) = selector(css) else {
            return Vec::new();
        };
        let found = self.html.select(&sel).collect();
        found
    }

    /// First element matching a selector.
    pub fn select_first(&self, css: &str) -> Option<ElementRef<'_>> {
        let sel = selector(css)?;
        let found = self.html.select(&sel).next();
        found
    }

    /// Value cell (`.eltext`) of the first `.row` whose `.elref` label equals `label`.
    pub fn row_value(&self, label: &str) -> Option<ElementRef<'_>> {
        self.select(".row").into_iter().find_map(|row| {
            let row_label: String = select_in(row, ".elref")
                .into_iter()
                .map(text_of)
                .collect::<Vec<_>>()
                .join(" ");
            if row_label.trim() == label {
                first_in(row, ".eltext")
            } else {
                None
            }
        })
    }

    /// Normalized text of the first element matching a selector.
    pub fn text_at(&self, css: &str) -> Option<String> {
        self.select_first(css).map(text_of)
    }
}

/// Compile a CSS selector, logging and discarding invalid ones.
pub fn selector(css: &str) -> Option<Selector> {
    match Selector::parse(css) {
        Ok(sel) => Some(sel),
        Err(e) => {
            log::debug!("Invalid selector '{}': {:?}", css, e);
            None
        }
    }
}

/// Descendants of `element` matching a selector.
pub fn select_in<'a>(element: ElementRef<'a>, css: &str) -> Vec<ElementRef<'a>> {
    let Some(sel) = selector(css) else {
        return Vec::new();
    };
    let found = element.select(&sel).collect();
    found
}

/// First descendant of `element` matching a selector.
pub fn first_in<'a>(element: ElementRef<'a>, css: &str) -> Option<ElementRef<'a>> {
    let sel = selector(css)?;
    let found = element.select(&sel).next();
    found
}

/// Lowercase tag name.
pub fn tag_name<'a>(element: &ElementRef<'a>) -> &'a str {
    element.value().name()
}

/// Check whether an element carries a class.
pub fn has_class(element: &ElementRef<'_>, class: &str) -> bool {
    element.value().classes().any(|c| c == class)
}

/// Check whether an element is a heading (`h1` to `h6`).
pub fn is_heading(element: &ElementRef<'_>) -> bool {
    matches!(tag_name(element), "h1" | "h2" | "h3" | "h4" | "h5" | "h6")
}

/// Element children, skipping text and comments.
pub fn child_elements<'a>(element: ElementRef<'a>) -> impl Iterator<Item = ElementRef<'a>> {
    element.children().filter_map(ElementRef::wrap)
}

/// Following element siblings, in document order.
pub fn next_element_siblings<'a>(element: ElementRef<'a>) -> impl Iterator<Item = ElementRef<'a>> {
    element.next_siblings().filter_map(ElementRef::wrap)
}

/// Following element sibling.
pub fn next_element_sibling<'a>(element: ElementRef<'a>) -> Option<ElementRef<'a>> {
    next_element_siblings(element).next()
}

/// Whitespace-normalized text content of an element.
///
/// Block-level boundaries (`<p>`, `<li>`, `<div>`, `<br>`, ...) separate
/// words; inline elements do not.
pub fn text_of(element: ElementRef<'_>) -> String {
    let mut raw = String::new();
    push_text(element, &mut raw);
    normalize_text(&raw)
}

fn push_text(element: ElementRef<'_>, out: &mut String) {
    let block = is_block(tag_name(&element));
    if block {
        out.push(' ');
    }
    for child in element.children() {
        match child.value() {
            Node::Text(text) => out.push_str(text),
            Node::Element(_) => {
                if let Some(child) = ElementRef::wrap(child) {
                    push_text(child, out);
                }
            }
            _ => {}
        }
    }
    if block {
        out.push(' ');
    }
}

fn is_block(tag: &str) -> bool {
    matches!(
        tag,
        "p" | "div"
            | "li"
            | "ul"
            | "ol"
            | "br"
            | "hr"
            | "h1"
            | "h2"
            | "h3"
            | "h4"
            | "h5"
            | "h6"
            | "table"
            | "tr"
            | "td"
            | "th"
            | "section"
            | "blockquote"
            | "dd"
            | "dt"
    )
}

/// NFC-normalize, collapse whitespace runs to one space, and trim.
pub fn normalize_text(text: &str) -> String {
    let nfc: String = text.nfc().collect();
    collapse_whitespace(&nfc)
}

/// Collapse whitespace runs (including non-breaking spaces) to one space and trim.
pub fn collapse_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for word in text.split(|c: char| c.is_whitespace() || c == '\u{a0}') {
        if word.is_empty() {
            continue;
        }
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(word);
    }
    out
}
