//! Controlled vocabulary page converter.

use crate::detect::DocumentKind;
use crate::error::Result;
use crate::model::Document;
use crate::parser::{extract_vocabulary, ParseOptions, SourceDocument};
use std::path::Path;

use super::DocumentConverter;

/// Converts controlled vocabulary pages into vocabulary table documents.
#[derive(Debug, Clone, Default)]
pub struct VocabularyConverter {
    _private: (),
}

impl VocabularyConverter {
    /// Create a new vocabulary converter.
    pub fn new() -> Self {
        Self { _private: () }
    }
}

impl DocumentConverter for VocabularyConverter {
    fn kind(&self) -> DocumentKind {
        DocumentKind::Vocabulary
    }

    fn extract(
        &self,
        source: &SourceDocument,
        path: &Path,
        options: &ParseOptions,
    ) -> Result<Document> {
        extract_vocabulary(source, path, options).map(Document::Vocabulary)
    }
}
