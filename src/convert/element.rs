//! Element page converter.

use crate::detect::DocumentKind;
use crate::error::Result;
use crate::model::Document;
use crate::parser::{extract_element, ParseOptions, SourceDocument};
use std::path::Path;

use super::DocumentConverter;

/// Converts element definition pages.
#[derive(Debug, Clone, Default)]
pub struct ElementConverter {
    _private: (),
}

impl ElementConverter {
    /// Create a new element converter.
    pub fn new() -> Self {
        Self { _private: () }
    }
}

impl DocumentConverter for ElementConverter {
    fn kind(&self) -> DocumentKind {
        DocumentKind::Element
    }

    fn extract(
        &self,
        source: &SourceDocument,
        path: &Path,
        options: &ParseOptions,
    ) -> Result<Document> {
        extract_element(source, path, options).map(Document::Element)
    }
}
