//! Full example page converter.

use crate::detect::DocumentKind;
use crate::error::Result;
use crate::model::Document;
use crate::parser::{extract_full_example, ParseOptions, SourceDocument};
use std::path::Path;

use super::DocumentConverter;

/// Converts full example pages into `ExampleTable` documents.
#[derive(Debug, Clone, Default)]
pub struct FullExampleConverter {
    _private: (),
}

impl FullExampleConverter {
    /// Create a new full example converter.
    pub fn new() -> Self {
        Self { _private: () }
    }
}

impl DocumentConverter for FullExampleConverter {
    fn kind(&self) -> DocumentKind {
        DocumentKind::FullExample
    }

    fn extract(
        &self,
        source: &SourceDocument,
        path: &Path,
        options: &ParseOptions,
    ) -> Result<Document> {
        extract_full_example(source, path, options).map(Document::FullExample)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert::ConvertOptions;

    #[test]
    fn test_example_table() {
        let html = r#"<div class="col-md-7"><h3>Book (two volumes)</h3>
            <div class="row px-2"><div class="col xampleLabel"><a href="/ISBDM/docs/attributes/1277.html">has extent</a></div><div class="col xampleValue">2 "volumes"</div></div></div>"#;
        let result = FullExampleConverter::new()
            .convert_str(html, Path::new("fullex/fx004.html"), &ConvertOptions::default())
            .unwrap();

        assert_eq!(result.kind, DocumentKind::FullExample);
        assert!(result.content.contains("sidebar_label: Book\n"));
        assert!(result.content.contains("\"elementUrl\": \"/docs/attributes/1277\""));
        assert!(result.content.contains(r#""value": "2 \"volumes\"""#));
    }
}
