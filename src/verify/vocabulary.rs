//! Vocabulary checks: term comparison and header integrity.

use crate::convert::read_source;
use crate::error::Result;
use crate::model::VocabularyConcept;
use crate::parser::{collapse_whitespace, extract_vocabulary, ParseOptions, SourceDocument};
use crate::render::{parse_frontmatter, split_frontmatter};
use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Longest concept value that does not look like concatenated values.
pub const MAX_VALUE_LEN: usize = 45;

/// Longest plausible concept definition.
pub const MAX_DEFINITION_LEN: usize = 500;

/// A problem found in a vocabulary's concept list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntegrityIssue {
    /// The vocabulary lists no concepts
    NoConcepts,
    /// Concept at this index has no value
    MissingValue(usize),
    /// Concept at this index has no definition
    MissingDefinition(usize),
    /// Value longer than [`MAX_VALUE_LEN`]
    LongValue(String),
    /// Definition longer than [`MAX_DEFINITION_LEN`], by concept value
    LongDefinition(String),
    /// Values that occur more than once
    Duplicates(Vec<String>),
}

impl fmt::Display for IntegrityIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IntegrityIssue::NoConcepts => write!(f, "No concepts found"),
            IntegrityIssue::MissingValue(i) => write!(f, "Concept at index {} is missing a value", i),
            IntegrityIssue::MissingDefinition(i) => {
                write!(f, "Concept at index {} is missing a definition", i)
            }
            IntegrityIssue::LongValue(value) => {
                let head: String = value.chars().take(MAX_VALUE_LEN).collect();
                write!(f, "Concept \"{}...\" has a suspiciously long value", head)
            }
            IntegrityIssue::LongDefinition(value) => {
                write!(f, "Concept \"{}\" has a very long definition", value)
            }
            IntegrityIssue::Duplicates(values) => {
                write!(f, "Found {} duplicate values: {}", values.len(), values.join(", "))
            }
        }
    }
}

/// Check a concept list for empty, overlong and duplicated entries.
pub fn check_integrity(concepts: &[VocabularyConcept]) -> Vec<IntegrityIssue> {
    if concepts.is_empty() {
        return vec![IntegrityIssue::NoConcepts];
    }

    let mut issues = Vec::new();
    let mut seen = HashSet::new();
    let mut duplicates = Vec::new();

    for (index, concept) in concepts.iter().enumerate() {
        if concept.value.trim().is_empty() {
            issues.push(IntegrityIssue::MissingValue(index));
        }
        if concept.definition.trim().is_empty() {
            issues.push(IntegrityIssue::MissingDefinition(index));
        }
        if concept.value.chars().count() > MAX_VALUE_LEN {
            issues.push(IntegrityIssue::LongValue(concept.value.clone()));
        }
        if concept.definition.chars().count() > MAX_DEFINITION_LEN {
            issues.push(IntegrityIssue::LongDefinition(concept.value.clone()));
        }
        if !concept.value.is_empty() && !seen.insert(concept.value.as_str()) {
            duplicates.push(concept.value.clone());
        }
    }

    if !duplicates.is_empty() {
        issues.push(IntegrityIssue::Duplicates(duplicates));
    }
    issues
}

/// Differences between the concepts of a source page and a converted header.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TermComparison {
    /// Source values absent from the header
    pub missing: Vec<String>,
    /// Header values absent from the source
    pub extra: Vec<String>,
    /// Values present in both whose definitions differ
    pub mismatched: Vec<String>,
}

impl TermComparison {
    /// Check if both sides list the same terms with the same definitions.
    pub fn is_match(&self) -> bool {
        self.missing.is_empty() && self.extra.is_empty() && self.mismatched.is_empty()
    }
}

/// Compare source concepts with converted concepts by value.
///
/// Definitions are compared after whitespace normalization.
pub fn compare_terms(source: &[VocabularyConcept], converted: &[VocabularyConcept]) -> TermComparison {
    let converted_by_value: HashMap<&str, &VocabularyConcept> =
        converted.iter().map(|c| (c.value.as_str(), c)).collect();
    let source_values: HashSet<&str> = source.iter().map(|c| c.value.as_str()).collect();

    let mut comparison = TermComparison::default();
    for concept in source {
        match converted_by_value.get(concept.value.as_str()) {
            None => comparison.missing.push(concept.value.clone()),
            Some(other)
                if collapse_whitespace(&other.definition) != collapse_whitespace(&concept.definition) =>
            {
                comparison.mismatched.push(concept.value.clone())
            }
            Some(_) => {}
        }
    }
    comparison.extra = converted
        .iter()
        .filter(|c| !source_values.contains(c.value.as_str()))
        .map(|c| c.value.clone())
        .collect();
    comparison
}

#[derive(Deserialize)]
struct ConceptsHeader {
    concepts: Option<Vec<HeaderConcept>>,
}

#[derive(Deserialize)]
struct HeaderConcept {
    #[serde(default)]
    value: String,
    #[serde(default)]
    definition: String,
    #[serde(default, rename = "scopeNote")]
    scope_note: Option<String>,
}

impl From<HeaderConcept> for VocabularyConcept {
    fn from(concept: HeaderConcept) -> Self {
        VocabularyConcept {
            value: concept.value,
            definition: concept.definition,
            scope_note: concept.scope_note,
        }
    }
}

/// Concepts listed in a converted document's header.
///
/// Returns `None` when the document has no header or the header has no
/// `concepts` key, i.e. it is not a vocabulary.
pub fn header_concepts(text: &str) -> Result<Option<Vec<VocabularyConcept>>> {
    if split_frontmatter(text).is_none() {
        return Ok(None);
    }
    let header: ConceptsHeader = parse_frontmatter(text)?;
    Ok(header
        .concepts
        .map(|concepts| concepts.into_iter().map(VocabularyConcept::from).collect()))
}

/// Integrity result for one converted vocabulary.
#[derive(Debug, Clone)]
pub struct IntegrityReport {
    /// Converted file
    pub path: PathBuf,
    /// Number of concepts in the header
    pub concept_count: usize,
    /// Problems found
    pub issues: Vec<IntegrityIssue>,
}

impl IntegrityReport {
    /// Check if no problems were found.
    pub fn is_valid(&self) -> bool {
        self.issues.is_empty()
    }
}

/// Check one converted vocabulary. `None` if the file is not a vocabulary.
pub fn check_vocabulary_file(path: &Path) -> Result<Option<IntegrityReport>> {
    let text = fs::read_to_string(path)?;
    let Some(concepts) = header_concepts(&text)? else {
        return Ok(None);
    };
    Ok(Some(IntegrityReport {
        path: path.to_path_buf(),
        concept_count: concepts.len(),
        issues: check_integrity(&concepts),
    }))
}

/// Check every converted vocabulary (`*.mdx` with a `concepts` header) in a
/// directory tree, sorted by path.
///
/// Files whose header cannot be parsed are reported with a warning and left out.
pub fn check_vocabulary_directory(dir: &Path) -> Result<Vec<IntegrityReport>> {
    if !dir.is_dir() {
        return Err(crate::error::Error::NotFound(dir.to_path_buf()));
    }
    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "mdx"))
        .collect();
    files.sort();

    let mut reports = Vec::new();
    for file in files {
        match check_vocabulary_file(&file) {
            Ok(Some(report)) => reports.push(report),
            Ok(None) => log::debug!("{} is not a vocabulary", file.display()),
            Err(e) => log::warn!("Skipping {}: {}", file.display(), e),
        }
    }
    Ok(reports)
}

/// Compare a source vocabulary page with its converted document.
pub fn compare_vocabulary(source: &Path, converted: &Path) -> Result<TermComparison> {
    let html = read_source(source)?;
    let doc = SourceDocument::parse(&html);
    let vocab = extract_vocabulary(&doc, source, &ParseOptions::new().lenient())?;

    let text = fs::read_to_string(converted)?;
    let header = header_concepts(&text)?.unwrap_or_default();
    Ok(compare_terms(&vocab.concepts, &header))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn concept(value: &str, definition: &str) -> VocabularyConcept {
        VocabularyConcept::new(value, definition)
    }

    #[test]
    fn test_clean_vocabulary() {
        let concepts = vec![concept("black", "Dark."), concept("white", "Light.")];
        assert!(check_integrity(&concepts).is_empty());
    }

    #[test]
    fn test_integrity_issues() {
        let long_value = "cartographic tactile three-dimensional form plus more";
        let concepts = vec![
            concept("", "No value."),
            concept("black", ""),
            concept(long_value, "Long."),
            concept("white", &"x".repeat(501)),
            concept("black", "Again."),
        ];
        let issues = check_integrity(&concepts);
        assert_eq!(
            issues,
            vec![
                IntegrityIssue::MissingValue(0),
                IntegrityIssue::MissingDefinition(1),
                IntegrityIssue::LongValue(long_value.to_string()),
                IntegrityIssue::LongDefinition("white".to_string()),
                IntegrityIssue::Duplicates(vec!["black".to_string()]),
            ]
        );
        assert_eq!(issues[4].to_string(), "Found 1 duplicate values: black");
    }

    #[test]
    fn test_no_concepts() {
        assert_eq!(check_integrity(&[]), vec![IntegrityIssue::NoConcepts]);
    }

    #[test]
    fn test_compare_terms() {
        let source = vec![concept("black", "Dark."), concept("white", "Light."), concept("grey", "Mid.")];
        let converted = vec![concept("black", "Dark."), concept("white", "Bright."), concept("red", "Red.")];
        let comparison = compare_terms(&source, &converted);
        assert_eq!(comparison.missing, vec!["grey"]);
        assert_eq!(comparison.extra, vec!["red"]);
        assert_eq!(comparison.mismatched, vec!["white"]);
        assert!(!comparison.is_match());
    }

    #[test]
    fn test_header_concepts() {
        let text = "---\ntitle: Colour\nconcepts:\n- value: black\n  definition: Dark.\n- value: white\n---\n\nBody\n";
        let concepts = header_concepts(text).unwrap().unwrap();
        assert_eq!(concepts.len(), 2);
        assert_eq!(concepts[1].definition, "");
        assert_eq!(check_integrity(&concepts), vec![IntegrityIssue::MissingDefinition(1)]);

        assert!(header_concepts("---\nid: '1025'\n---\n").unwrap().is_none());
        assert!(header_concepts("No header").unwrap().is_none());
    }
}
