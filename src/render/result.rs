//! Rendering result with statistics.

use crate::detect::DocumentKind;
use crate::model::{ContentBlock, Vocabulary};
use serde::{Deserialize, Serialize};

/// Result of rendering a document: the output text plus statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderResult {
    /// The rendered document (header block and body)
    pub content: String,

    /// Kind of the rendered document
    pub kind: DocumentKind,

    /// Conversion statistics
    pub stats: ConversionStats,

    /// Non-fatal problems found while rendering
    pub warnings: Vec<String>,
}

impl RenderResult {
    /// Create a new render result.
    pub fn new(content: String, kind: DocumentKind, stats: ConversionStats) -> Self {
        Self {
            content,
            kind,
            stats,
            warnings: Vec::new(),
        }
    }

    /// Attach warnings.
    pub fn with_warnings(mut self, warnings: Vec<String>) -> Self {
        self.warnings = warnings;
        self
    }

    /// Get the content length in bytes.
    pub fn content_len(&self) -> usize {
        self.content.len()
    }
}

/// Counters collected while rendering one document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionStats {
    /// Number of paragraphs rendered
    pub paragraph_count: u32,

    /// Number of list items rendered
    pub list_item_count: u32,

    /// Number of example groups rendered
    pub example_group_count: u32,

    /// Number of example table rows rendered
    pub example_row_count: u32,

    /// Number of see-also links rendered
    pub see_also_count: u32,

    /// Number of vocabulary concepts
    pub concept_count: u32,

    /// Number of body sections and subsections
    pub section_count: u32,

    /// Approximate word count (whitespace-separated tokens)
    pub word_count: u32,

    /// Character count (excluding whitespace)
    pub char_count: u32,
}

impl ConversionStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Increment paragraph count.
    pub fn add_paragraph(&mut self) {
        self.paragraph_count += 1;
    }

    /// Add list items.
    pub fn add_list_items(&mut self, count: usize) {
        self.list_item_count += count as u32;
    }

    /// Count an example group and its rows.
    pub fn add_example_group(&mut self, rows: usize) {
        self.example_group_count += 1;
        self.example_row_count += rows as u32;
    }

    /// Increment see-also count.
    pub fn add_see_also(&mut self) {
        self.see_also_count += 1;
    }

    /// Increment section count.
    pub fn add_section(&mut self) {
        self.section_count += 1;
    }

    /// Count one content block.
    pub fn add_block(&mut self, block: &ContentBlock) {
        match block {
            ContentBlock::Paragraph { .. } => self.add_paragraph(),
            ContentBlock::List { items, .. } => self.add_list_items(items.len()),
            ContentBlock::ExampleGroup(group) => self.add_example_group(group.rows.len()),
            ContentBlock::SeeAlso { .. } => self.add_see_also(),
        }
    }

    /// Count the concepts of a vocabulary.
    pub fn add_vocabulary(&mut self, vocab: &Vocabulary) {
        self.concept_count += vocab.concept_count() as u32;
    }

    /// Add word and character counts from text.
    pub fn count_text(&mut self, text: &str) {
        self.word_count += text.split_whitespace().count() as u32;
        self.char_count += text.chars().filter(|c| !c.is_whitespace()).count() as u32;
    }

    /// Merge another stats instance into this one.
    pub fn merge(&mut self, other: &ConversionStats) {
        self.paragraph_count += other.paragraph_count;
        self.list_item_count += other.list_item_count;
        self.example_group_count += other.example_group_count;
        self.example_row_count += other.example_row_count;
        self.see_also_count += other.see_also_count;
        self.concept_count += other.concept_count;
        self.section_count += other.section_count;
        self.word_count += other.word_count;
        self.char_count += other.char_count;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ExampleGroup, ExampleRow};

    #[test]
    fn test_count_text() {
        let mut stats = ConversionStats::new();
        stats.count_text("Record the title proper.");

        assert_eq!(stats.word_count, 4);
        assert_eq!(stats.char_count, 21);
    }

    #[test]
    fn test_add_block() {
        let mut stats = ConversionStats::new();
        stats.add_block(&ContentBlock::paragraph("One"));
        stats.add_block(&ContentBlock::list(true, vec!["a".into(), "b".into()]));
        stats.add_block(&ContentBlock::ExampleGroup(ExampleGroup::new(
            vec![ExampleRow::new("Has title", "Maps")],
            None,
        )));

        assert_eq!(stats.paragraph_count, 1);
        assert_eq!(stats.list_item_count, 2);
        assert_eq!(stats.example_group_count, 1);
        assert_eq!(stats.example_row_count, 1);
    }

    #[test]
    fn test_merge() {
        let mut first = ConversionStats {
            paragraph_count: 5,
            concept_count: 2,
            ..Default::default()
        };
        let second = ConversionStats {
            paragraph_count: 3,
            concept_count: 1,
            see_also_count: 4,
            ..Default::default()
        };

        first.merge(&second);

        assert_eq!(first.paragraph_count, 8);
        assert_eq!(first.concept_count, 3);
        assert_eq!(first.see_also_count, 4);
    }
}
