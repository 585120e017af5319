//! Element page extraction.

use super::content::ContentConverter;
use super::fields;
use super::html::{text_of, SourceDocument};
use super::options::ParseOptions;
use crate::error::{Error, Result};
use crate::model::{ElementDocument, ElementIdentity, ElementMetadata, Section};
use std::path::Path;

/// `h4` section titles, in output order.
pub const SECTION_TITLES: &[&str] = &["Additional information", "Element values", "Stipulations"];

/// Extract an element document from a parsed page.
///
/// `path` supplies the identifier (file stem) and the docs section.
pub fn extract_element(
    doc: &SourceDocument,
    path: &Path,
    options: &ParseOptions,
) -> Result<ElementDocument> {
    let id = fields::file_stem(path);
    let label = match fields::title(doc) {
        Some(title) => title,
        None if options.is_lenient() => {
            log::warn!("No title in {}, using file stem", path.display());
            id.clone()
        }
        None => return Err(Error::MissingTitle(path.to_path_buf())),
    };

    let namespace = &options.namespaces.elements;
    let mut metadata = ElementMetadata::new(id.as_str(), label.as_str())
        .with_definition(fields::definition(doc))
        .with_domain(fields::domain(doc))
        .with_range(fields::range(doc))
        .with_scope_note(fields::scope_note(doc));
    metadata.sub_types = fields::sub_types(doc, namespace);
    metadata.super_types = fields::super_types(doc, namespace);

    let section = options
        .section
        .clone()
        .unwrap_or_else(|| fields::section_from_path(path));
    let identity = ElementIdentity::new(id.as_str(), section, &label);

    let converter = ContentConverter::new(options.inline);
    let sections = extract_sections(doc, &converter);

    log::debug!(
        "Extracted element {} ({}) with {} sections",
        id,
        metadata.property_kind(),
        sections.len()
    );

    Ok(ElementDocument {
        uri: metadata.uri(namespace),
        defined_by: namespace.clone(),
        identity,
        metadata,
        sections,
    })
}

/// Body sections: the known `h4` sections in fixed order, then every `h5`
/// subsection nested under the last of them.
///
/// A page without `h4` sections gets an untitled section holding the
/// subsections.
pub fn extract_sections(doc: &SourceDocument, converter: &ContentConverter) -> Vec<Section> {
    let headings = doc.select("h4");
    let mut sections: Vec<Section> = SECTION_TITLES
        .iter()
        .filter_map(|title| {
            headings
                .iter()
                .find(|h| text_of(**h) == *title)
                .map(|heading| {
                    let mut section = Section::new(*title);
                    section.divisions = converter.convert_section(*heading);
                    section
                })
        })
        .collect();

    let subsections: Vec<Section> = doc
        .select("h5")
        .into_iter()
        .map(|heading| {
            let mut section = Section::new(text_of(heading));
            section.divisions = converter.convert_section(heading);
            section
        })
        .collect();

    if !subsections.is_empty() {
        match sections.last_mut() {
            Some(last) => last.subsections = subsections,
            None => {
                let mut untitled = Section::new("");
                untitled.subsections = subsections;
                sections.push(untitled);
            }
        }
    }

    sections
}
