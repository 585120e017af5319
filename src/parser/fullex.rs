//! Full example page extraction.
//!
//! A full example page describes one manifestation as a table of
//! element/value rows (`.row.px-2`). Rows whose comment cell links to a
//! collapsed panel (`a.linkEdco`) carry that panel's editorial comment as
//! their detail.

use super::fields;
use super::general::page_title;
use super::html::{first_in, text_of, SourceDocument};
use super::inline::{inline_text, site_path};
use super::options::ParseOptions;
use crate::detect::FULL_EXAMPLE_DIR;
use crate::error::Result;
use crate::model::{FullExampleDocument, FullExampleEntry};
use scraper::ElementRef;
use std::path::Path;

/// Navigation position of the first full example; the index page takes 1.
pub const FIRST_POSITION: u32 = 2;

/// Extract a full example document from a parsed page.
pub fn extract_full_example(
    doc: &SourceDocument,
    path: &Path,
    options: &ParseOptions,
) -> Result<FullExampleDocument> {
    let id = fields::file_stem(path);
    let title = page_title(doc, path, options)?;

    let description = doc
        .select(".col-md-7 p")
        .into_iter()
        .filter(|p| !in_comment(p))
        .map(|p| inline_text(p, &options.inline))
        .filter(|text| !text.is_empty())
        .collect();

    let entries: Vec<FullExampleEntry> = doc
        .select(".row.px-2")
        .into_iter()
        .filter(|row| first_in(*row, ".xampleHeader").is_none())
        .filter_map(|row| entry(doc, row))
        .collect();
    if entries.is_empty() {
        log::warn!("No example rows found in {}", path.display());
    }

    let sidebar_position = navigation_position(doc, &id);

    Ok(FullExampleDocument {
        id,
        title,
        description,
        entries,
        sidebar_position,
    })
}

fn entry(doc: &SourceDocument, row: ElementRef<'_>) -> Option<FullExampleEntry> {
    let label = first_in(row, ".xampleLabel")?;
    let (element, element_url) = match first_in(label, "a") {
        Some(link) => (
            text_of(link),
            link.value().attr("href").map(site_path).unwrap_or_default(),
        ),
        None => (text_of(label), String::new()),
    };
    let value = first_in(row, ".xampleValue").map(text_of).unwrap_or_default();

    Some(FullExampleEntry {
        element,
        element_url,
        value,
        detail: detail(doc, row),
    })
}

/// Editorial comment in the collapsed panel a row links to.
fn detail(doc: &SourceDocument, row: ElementRef<'_>) -> Option<String> {
    let link = first_in(row, ".xampleComment a.linkEdco")?;
    let target = link.value().attr("href")?.strip_prefix('#')?;
    let panel = doc
        .select("[id]")
        .into_iter()
        .find(|e| e.value().id() == Some(target))?;
    first_in(panel, ".editComment")
        .map(text_of)
        .filter(|text| !text.is_empty())
}

fn in_comment(element: &ElementRef<'_>) -> bool {
    element
        .ancestors()
        .filter_map(ElementRef::wrap)
        .any(|a| a.value().classes().any(|c| c == "editComment" || c == "collapse"))
}

/// Position of the page among the full example links of the section menu.
fn navigation_position(doc: &SourceDocument, id: &str) -> Option<u32> {
    let section = format!("/{}/", FULL_EXAMPLE_DIR);
    let pages: Vec<String> = doc
        .select("nav a.linkMenuEntry")
        .into_iter()
        .filter_map(|a| a.value().attr("href"))
        .map(site_path)
        .filter(|path| path.contains(&section) && !path.ends_with("/index"))
        .collect();
    let target = format!("{}{}", section, id);
    let index = pages.iter().position(|path| path.ends_with(&target))?;
    u32::try_from(index).ok().map(|i| i + FIRST_POSITION)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r##"<html><body>
    <nav class="navISBDMSection">
      <a class="linkMenuEntry" href="/ISBDM/docs/fullex/index.html">Full examples</a>
      <a class="linkMenuEntry" href="/ISBDM/docs/fullex/fx001.html">Book</a>
      <a class="linkMenuEntry" href="/ISBDM/docs/fullex/fx002.html">Map</a>
    </nav>
    <div class="col-md-7">
      <h3>Printed map (sheet)</h3>
      <p>A folded map issued by a national mapping agency.</p>
      <div class="row px-2"><div class="col xampleHeader">Element</div><div class="col xampleHeader">Value</div></div>
      <div class="row px-2">
        <div class="col xampleLabel"><a class="linkInline" href="/ISBDM/docs/statements/1028.html">has title proper</a></div>
        <div class="col xampleValue">Ordnance  Survey map</div>
        <div class="col xampleComment"><a class="linkEdco" href="#ec1">[?]</a></div>
      </div>
      <div class="collapse" id="ec1"><div class="editComment"><p>Taken from the cover panel.</p></div></div>
      <div class="row px-2">
        <div class="col xampleLabel">has extent</div>
        <div class="col xampleValue">1 map</div>
        <div class="col xampleComment"></div>
      </div>
    </div></body></html>"##;

    #[test]
    fn test_extract_full_example() {
        let doc = SourceDocument::parse(PAGE);
        let fullex =
            extract_full_example(&doc, Path::new("fullex/fx002.html"), &ParseOptions::new()).unwrap();

        assert_eq!(fullex.id, "fx002");
        assert_eq!(fullex.title, "Printed map (sheet)");
        assert_eq!(fullex.sidebar_label(), "Printed map");
        assert_eq!(
            fullex.description,
            vec!["A folded map issued by a national mapping agency.".to_string()]
        );
        assert_eq!(fullex.entries.len(), 2);
        assert_eq!(
            fullex.entries[0],
            FullExampleEntry {
                element: "has title proper".to_string(),
                element_url: "/docs/statements/1028".to_string(),
                value: "Ordnance Survey map".to_string(),
                detail: Some("Taken from the cover panel.".to_string()),
            }
        );
        assert_eq!(fullex.entries[1].element_url, "");
        assert_eq!(fullex.entries[1].detail, None);
        assert_eq!(fullex.sidebar_position, Some(3));
    }

    #[test]
    fn test_page_outside_navigation() {
        let doc = SourceDocument::parse(PAGE);
        let fullex =
            extract_full_example(&doc, Path::new("fullex/fx009.html"), &ParseOptions::new()).unwrap();
        assert_eq!(fullex.sidebar_position, None);
    }
}
