//! Verification of converted documents against their sources.
//!
//! - [`completeness`]: paragraph/list-item ratio classes
//! - [`similarity`]: word-frequency overlap
//! - [`vocabulary`]: concept term comparison and header integrity

pub mod completeness;
pub mod similarity;
pub mod vocabulary;

pub use completeness::{
    check_completeness, classify, converted_counts, source_counts, verify_directory, verify_file,
    Completeness, CompletenessReport, ContentCounts, Thresholds,
};
pub use similarity::{mdx_plain_text, word_similarity, SIMILARITY_PASS};
pub use vocabulary::{
    check_integrity, check_vocabulary_directory, check_vocabulary_file, compare_terms,
    compare_vocabulary, header_concepts, IntegrityIssue, IntegrityReport, TermComparison,
    MAX_DEFINITION_LEN, MAX_VALUE_LEN,
};
