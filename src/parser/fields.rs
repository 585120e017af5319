//! Field extractors for element pages.
//!
//! Each extractor pulls one semantic field out of a parsed page and
//! tolerates absent structure by returning an empty value or a default.

use super::html::{select_in, text_of, SourceDocument};
use super::inline::{element_path, link_stem};
use crate::model::{element_uri, TypeRef, DEFAULT_DOMAIN, DEFAULT_RANGE, DEFAULT_SECTION};
use std::path::Path;

/// Row label of the scope note.
pub const SCOPE_NOTE_LABEL: &str = "Scope note";
/// Row label of the domain.
pub const DOMAIN_LABEL: &str = "Domain";
/// Row label of the range.
pub const RANGE_LABEL: &str = "Range";
/// Row label listing narrower elements.
pub const SUB_TYPE_LABEL: &str = "Element sub-type";
/// Row label listing broader elements.
pub const SUPER_TYPE_LABEL: &str = "Element super-type";

/// Page title: the first `h3` heading.
pub fn title(doc: &SourceDocument) -> Option<String> {
    doc.text_at("h3").filter(|t| !t.is_empty())
}

/// Definition: the first value cell of the page.
pub fn definition(doc: &SourceDocument) -> String {
    doc.text_at(".eltext").unwrap_or_default()
}

/// Text of a labelled row, if present and non-empty.
pub fn labelled_value(doc: &SourceDocument, label: &str) -> Option<String> {
    doc.row_value(label)
        .map(text_of)
        .filter(|value| !value.is_empty())
}

/// Domain, defaulting to `Manifestation`.
pub fn domain(doc: &SourceDocument) -> String {
    labelled_value(doc, DOMAIN_LABEL).unwrap_or_else(|| {
        log::debug!("No domain row, using {}", DEFAULT_DOMAIN);
        DEFAULT_DOMAIN.to_string()
    })
}

/// Range, defaulting to `Literal`.
pub fn range(doc: &SourceDocument) -> String {
    labelled_value(doc, RANGE_LABEL).unwrap_or_else(|| {
        log::debug!("No range row, using {}", DEFAULT_RANGE);
        DEFAULT_RANGE.to_string()
    })
}

/// Scope note, empty when absent.
pub fn scope_note(doc: &SourceDocument) -> String {
    labelled_value(doc, SCOPE_NOTE_LABEL).unwrap_or_default()
}

/// Element references listed in a labelled row.
pub fn type_refs(doc: &SourceDocument, label: &str, namespace: &str) -> Vec<TypeRef> {
    let Some(cell) = doc.row_value(label) else {
        return Vec::new();
    };
    let row = cell.parent().and_then(scraper::ElementRef::wrap).unwrap_or(cell);

    select_in(row, ".linkMenuElement")
        .into_iter()
        .map(|link| {
            let href = link.value().attr("href").unwrap_or_default();
            let stem = link_stem(href);
            TypeRef::new(
                element_uri(namespace, &stem),
                element_path(href),
                text_of(link),
            )
        })
        .collect()
}

/// Narrower elements.
pub fn sub_types(doc: &SourceDocument, namespace: &str) -> Vec<TypeRef> {
    type_refs(doc, SUB_TYPE_LABEL, namespace)
}

/// Broader elements.
pub fn super_types(doc: &SourceDocument, namespace: &str) -> Vec<TypeRef> {
    type_refs(doc, SUPER_TYPE_LABEL, namespace)
}

/// Attribution footer text (`.row.mt-2 .guid`).
pub fn attribution(doc: &SourceDocument) -> Option<String> {
    let text = doc
        .select(".row.mt-2 .guid")
        .into_iter()
        .map(text_of)
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    (!text.is_empty()).then_some(text)
}

/// File stem of a source path, verbatim.
pub fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Documentation section of a source path: the directory after `docs`.
///
/// The legacy `ISBDM` root and paths without a `docs` directory map to
/// `statements`.
pub fn section_from_path(path: &Path) -> String {
    let components: Vec<String> = path
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    components
        .iter()
        .position(|c| c == "docs")
        .and_then(|i| components.get(i + 1))
        .filter(|c| *c != "ISBDM" && is_directory_name(c))
        .cloned()
        .unwrap_or_else(|| DEFAULT_SECTION.to_string())
}

fn is_directory_name(component: &str) -> bool {
    !component.ends_with(".html")
}
