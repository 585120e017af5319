//! Controlled vocabulary page extraction.

use super::fields;
use super::html::{first_in, next_element_sibling, select_in, text_of, SourceDocument};
use super::options::ParseOptions;
use crate::error::{Error, Result};
use crate::model::{ElementLink, Vocabulary, VocabularyConcept};
use scraper::ElementRef;
use std::path::Path;

/// Extract a vocabulary from a parsed page.
pub fn extract_vocabulary(
    doc: &SourceDocument,
    path: &Path,
    options: &ParseOptions,
) -> Result<Vocabulary> {
    let stem = fields::file_stem(path);
    let title = match fields::title(doc) {
        Some(title) => title,
        None if options.is_lenient() => {
            log::warn!("No title in {}, using file stem", path.display());
            stem.clone()
        }
        None => return Err(Error::MissingTitle(path.to_path_buf())),
    };

    let mut vocab = Vocabulary::new(stem, title);
    vocab.uri = options.namespaces.vocabulary_uri(vocab.local_name());

    if let Some(guid) = doc.select_first(".guid") {
        let paragraphs = select_in(guid, "p");
        vocab.description = paragraphs.first().map(|p| text_of(*p)).unwrap_or_default();
        vocab.scope_note = paragraphs.get(1).map(|p| text_of(*p)).unwrap_or_default();
        vocab.element_link = element_link(guid);
    }

    vocab.concepts = doc
        .select(".vesValue")
        .into_iter()
        .filter_map(concept)
        .collect();
    vocab.attribution = fields::attribution(doc);

    for warning in vocab.validate() {
        log::warn!("{}: {}", path.display(), warning);
    }
    log::debug!(
        "Extracted vocabulary {} with {} concepts",
        vocab.stem,
        vocab.concept_count()
    );

    Ok(vocab)
}

/// One concept from a `.vesValue` cell and the two cells after it.
///
/// Cells without value text are skipped.
fn concept(value_cell: ElementRef<'_>) -> Option<VocabularyConcept> {
    let value = paragraph_text(value_cell);
    if value.is_empty() {
        log::debug!("Skipping concept row without a value");
        return None;
    }

    let definition_cell = next_element_sibling(value_cell);
    let definition = definition_cell.map(paragraph_text).unwrap_or_default();
    let scope_note = definition_cell
        .and_then(next_element_sibling)
        .map(paragraph_text)
        .filter(|note| !note.is_empty());

    let concept = VocabularyConcept::new(value, definition);
    Some(match scope_note {
        Some(note) => concept.with_scope_note(note),
        None => concept,
    })
}

/// Text of every `p` in a cell, joined by spaces.
fn paragraph_text(cell: ElementRef<'_>) -> String {
    select_in(cell, "p")
        .into_iter()
        .map(text_of)
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// The element a vocabulary is used with: the first link of the introduction.
fn element_link(guid: ElementRef<'_>) -> Option<ElementLink> {
    let anchor = first_in(guid, "a")?;
    let href = anchor.value().attr("href")?;
    let label = text_of(anchor);
    if label.is_empty() {
        return None;
    }
    Some(ElementLink {
        label,
        path: href.strip_prefix("/ISBDM").unwrap_or(href).to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"<html><body><div class="col-md-7">
        <h3>Extent of unitary structure</h3>
        <div class="guid">
            <p>For use with <a href="/ISBDM/docs/statements/1275.html">Has extent of unitary structure</a>.</p>
            <p>Terms describe units.</p>
        </div>
        <div class="row"><div class="col vesValue"><p>activity card</p></div><div class="col"><p>A card with activities.</p></div><div class="col"><p>Use for games.</p></div></div>
        <div class="row"><div class="col vesValue"><p>atlas</p></div><div class="col"><p>A volume of maps.</p></div><div class="col"></div></div>
        <div class="row"><div class="col vesValue"><p></p></div><div class="col"><p>Orphan definition.</p></div></div>
        <div class="row mt-2"><div class="guid">Adapted from RDA.</div></div>
    </div></body></html>"#;

    #[test]
    fn test_extract_vocabulary() {
        let doc = SourceDocument::parse(PAGE);
        let vocab =
            extract_vocabulary(&doc, Path::new("ves/1275.html"), &ParseOptions::new()).unwrap();

        assert_eq!(vocab.id.as_deref(), Some("1275"));
        assert_eq!(vocab.title, "Extent of unitary structure");
        assert_eq!(vocab.uri, "http://iflastandards.info/ns/isbdm/values/1275");
        assert_eq!(vocab.scope_note, "Terms describe units.");
        assert_eq!(vocab.attribution.as_deref(), Some("Adapted from RDA."));

        let link = vocab.element_link.unwrap();
        assert_eq!(link.label, "Has extent of unitary structure");
        assert_eq!(link.path, "/docs/statements/1275.html");
    }

    #[test]
    fn test_concepts() {
        let doc = SourceDocument::parse(PAGE);
        let vocab = extract_vocabulary(&doc, Path::new("1275.html"), &ParseOptions::new()).unwrap();

        assert_eq!(vocab.concept_count(), 2);
        assert_eq!(vocab.concepts[0].value, "activity card");
        assert_eq!(vocab.concepts[0].scope_note.as_deref(), Some("Use for games."));
        assert_eq!(vocab.concepts[1].definition, "A volume of maps.");
        assert!(vocab.concepts[1].scope_note.is_none());
    }

    #[test]
    fn test_named_vocabulary_uri() {
        let doc = SourceDocument::parse("<h3>Media type</h3>");
        let options = ParseOptions::new().with_values_namespace("http://example.org/values/");
        let vocab = extract_vocabulary(&doc, Path::new("mediaType.html"), &options).unwrap();
        assert!(vocab.id.is_none());
        assert_eq!(vocab.uri, "http://example.org/values/mediaType");
        assert!(vocab.concepts.is_empty());
        assert!(vocab.element_link.is_none());
    }
}
