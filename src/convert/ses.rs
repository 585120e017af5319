//! String encoding scheme page converter.

use crate::detect::DocumentKind;
use crate::error::Result;
use crate::model::Document;
use crate::parser::{extract_ses, ParseOptions, SourceDocument};
use std::path::Path;

use super::DocumentConverter;

/// Converts string encoding scheme pages.
#[derive(Debug, Clone, Default)]
pub struct SesConverter {
    _private: (),
}

impl SesConverter {
    /// Create a new SES converter.
    pub fn new() -> Self {
        Self { _private: () }
    }
}

impl DocumentConverter for SesConverter {
    fn kind(&self) -> DocumentKind {
        DocumentKind::Ses
    }

    fn extract(
        &self,
        source: &SourceDocument,
        path: &Path,
        options: &ParseOptions,
    ) -> Result<Document> {
        extract_ses(source, path, options).map(Document::Ses)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert::ConvertOptions;

    #[test]
    fn test_overview_page() {
        let html = "<div class=\"col-md-7\"><h3>String encoding schemes</h3><div class=\"guid\"><p>Schemes for literals.</p></div></div>";
        let result = SesConverter::new()
            .convert_str(html, Path::new("ISBDMSES.html"), &ConvertOptions::default())
            .unwrap();
        assert!(result.content.starts_with("---\nid: overview\n"));
        assert!(result.content.contains("slug: /ses/overview"));
        assert!(result.content.contains("Schemes for literals."));
    }
}
