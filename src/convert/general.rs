//! General information page converter.

use crate::detect::DocumentKind;
use crate::error::Result;
use crate::model::Document;
use crate::parser::{extract_general, ParseOptions, SourceDocument};
use std::path::Path;

use super::DocumentConverter;

/// Converts introductions and other prose pages.
#[derive(Debug, Clone, Default)]
pub struct GeneralConverter {
    _private: (),
}

impl GeneralConverter {
    /// Create a new general page converter.
    pub fn new() -> Self {
        Self { _private: () }
    }
}

impl DocumentConverter for GeneralConverter {
    fn kind(&self) -> DocumentKind {
        DocumentKind::General
    }

    fn extract(
        &self,
        source: &SourceDocument,
        path: &Path,
        options: &ParseOptions,
    ) -> Result<Document> {
        extract_general(source, path, options).map(Document::General)
    }
}
