//! General information page extraction.
//!
//! Introductions and other prose pages carry only guidance blocks. The
//! helpers here are shared with string encoding scheme pages, which have
//! the same layout.

use super::content::ContentConverter;
use super::fields;
use super::html::{has_class, SourceDocument};
use super::options::ParseOptions;
use crate::error::{Error, Result};
use crate::model::{Division, DivisionRole, GeneralDocument};
use scraper::ElementRef;
use std::path::Path;

/// Extract a general information document from a parsed page.
pub fn extract_general(
    doc: &SourceDocument,
    path: &Path,
    options: &ParseOptions,
) -> Result<GeneralDocument> {
    let title = page_title(doc, path, options)?;
    let converter = ContentConverter::new(options.inline);

    Ok(GeneralDocument {
        id: fields::file_stem(path),
        title,
        divisions: guidance_divisions(doc, path, &converter),
    })
}

/// Page title, falling back to the file stem in lenient mode.
pub(super) fn page_title(doc: &SourceDocument, path: &Path, options: &ParseOptions) -> Result<String> {
    match fields::title(doc) {
        Some(title) => Ok(title),
        None if options.is_lenient() => {
            log::warn!("No title in {}, using file stem", path.display());
            Ok(fields::file_stem(path))
        }
        None => Err(Error::MissingTitle(path.to_path_buf())),
    }
}

/// Top-level guidance blocks of the main column, one division each.
///
/// Pages without a main column are scanned whole. Guidance nested in
/// another guidance block is converted with its parent.
pub(super) fn guidance_divisions(
    doc: &SourceDocument,
    path: &Path,
    converter: &ContentConverter,
) -> Vec<Division> {
    let mut guids = doc.select(".col-md-7 .guid");
    if guids.is_empty() {
        log::debug!("No main-column guidance in {}, scanning whole page", path.display());
        guids = doc.select(".guid");
    }

    let divisions: Vec<Division> = guids
        .into_iter()
        .filter(|guid| !inside_guidance(guid))
        .map(|guid| Division::with_blocks(DivisionRole::Guidance, converter.collect_blocks(guid)))
        .filter(|division| !division.blocks.is_empty())
        .collect();

    if divisions.is_empty() {
        log::warn!("No guidance content found in {}", path.display());
    }
    divisions
}

fn inside_guidance(element: &ElementRef<'_>) -> bool {
    element
        .ancestors()
        .filter_map(ElementRef::wrap)
        .any(|ancestor| has_class(&ancestor, "guid"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ContentBlock, ExampleRow};

    const PAGE: &str = r#"<html><body><div class="col-md-7">
        <h3>Introduction to ISBDM</h3>
        <div class="row"><div class="col">
          <div class="guid">
            <p>ISBDM describes <span class="thisem">manifestations</span>.</p>
            <ol><li>Identify the manifestation.</li><li>Record its statements.</li></ol>
            <div class="xampleBlockGuid"><div class="xamples">
              <div class="row"><div class="col xampleLabel">Has title proper</div><div class="col xampleValue">Hamlet</div></div>
              <div class="row"><div class="col editComment">[Taken from the title page.]</div></div>
            </div></div>
          </div>
          <div class="guid"><p>See the element pages.</p></div>
        </div></div>
    </div></body></html>"#;

    #[test]
    fn test_extract_general() {
        let doc = SourceDocument::parse(PAGE);
        let general = extract_general(&doc, Path::new("intro/general.html"), &ParseOptions::new()).unwrap();

        assert_eq!(general.id, "general");
        assert_eq!(general.title, "Introduction to ISBDM");
        assert_eq!(general.divisions.len(), 2);
        assert_eq!(
            general.divisions[0].blocks[0],
            ContentBlock::paragraph("ISBDM describes **manifestations**.")
        );
        assert!(matches!(
            general.divisions[0].blocks[1],
            ContentBlock::List { ordered: true, .. }
        ));
        let ContentBlock::ExampleGroup(group) = &general.divisions[0].blocks[2] else {
            panic!("expected an example group");
        };
        assert_eq!(group.rows, vec![ExampleRow::new("Has title proper", "Hamlet")]);
        assert_eq!(group.annotation.as_deref(), Some("[Taken from the title page.]"));
        assert_eq!(general.blocks().count(), 4);
    }

    #[test]
    fn test_missing_title() {
        let doc = SourceDocument::parse("<div class=\"guid\"><p>Untitled.</p></div>");
        let path = Path::new("intro/notes.html");

        let result = extract_general(&doc, path, &ParseOptions::new());
        assert!(matches!(result, Err(Error::MissingTitle(_))));

        let general = extract_general(&doc, path, &ParseOptions::new().lenient()).unwrap();
        assert_eq!(general.title, "notes");
    }
}
