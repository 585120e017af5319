//! String encoding scheme page extraction.

use super::content::ContentConverter;
use super::fields;
use super::general::{guidance_divisions, page_title};
use super::html::SourceDocument;
use super::inline::{BraceStyle, InlineOptions};
use super::options::ParseOptions;
use crate::detect::SES_PREFIX;
use crate::error::Result;
use crate::model::SesDocument;
use std::path::Path;

/// Id of the scheme overview page (`ISBDMSES.html`).
pub const OVERVIEW_ID: &str = "overview";

/// Extract a string encoding scheme document from a parsed page.
///
/// Encoding patterns in SES pages are written with literal braces, so
/// braces are always rendered as code spans here.
pub fn extract_ses(doc: &SourceDocument, path: &Path, options: &ParseOptions) -> Result<SesDocument> {
    let stem = fields::file_stem(path);
    let id = ses_id(&stem);
    let title = page_title(doc, path, options)?;

    let converter = ContentConverter::new(InlineOptions {
        braces: BraceStyle::Code,
    });
    let divisions = guidance_divisions(doc, path, &converter);

    Ok(SesDocument {
        id,
        title,
        divisions,
    })
}

/// Document id for an SES file stem: the stem without `ISBDMSES`, lowercased.
pub fn ses_id(stem: &str) -> String {
    let id = stem.replace(SES_PREFIX, "").to_lowercase();
    if id.is_empty() {
        OVERVIEW_ID.to_string()
    } else {
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ContentBlock;

    const PAGE: &str = r##"<html><body><div class="col-md-7">
        <h3>Collation</h3>
        <div class="guid">
            <p>Record the collation as {number} leaves. <a class="linkEx" href="#x">Example</a></p>
            <ul class="bull"><li>Leaves</li><li>Pages</li></ul>
        </div>
        <div class="guid"><p>Second note.</p></div>
    </div></body></html>"##;

    #[test]
    fn test_ses_id() {
        assert_eq!(ses_id("ISBDMSES"), "overview");
        assert_eq!(ses_id("ISBDMSESCol"), "col");
        assert_eq!(ses_id("ISBDMSESDateRange"), "daterange");
    }

    #[test]
    fn test_extract_ses() {
        let doc = SourceDocument::parse(PAGE);
        let ses = extract_ses(&doc, Path::new("ses/ISBDMSESCol.html"), &ParseOptions::new()).unwrap();

        assert_eq!(ses.id, "col");
        assert_eq!(ses.slug(), "/ses/col");
        assert_eq!(ses.title, "Collation");
        assert_eq!(ses.divisions.len(), 2);
        assert_eq!(
            ses.divisions[0].blocks[0],
            ContentBlock::paragraph("Record the collation as `{number}` leaves.")
        );
        assert_eq!(
            ses.divisions[0].blocks[1],
            ContentBlock::list(false, vec!["Leaves".to_string(), "Pages".to_string()])
        );
    }

    #[test]
    fn test_fallback_outside_main_column() {
        let doc = SourceDocument::parse("<h3>Dates</h3><div class=\"guid\"><p>Use ISO 8601.</p></div>");
        let ses = extract_ses(&doc, Path::new("ISBDMSESDate.html"), &ParseOptions::new()).unwrap();
        assert_eq!(ses.divisions.len(), 1);
    }
}
