//! Controlled vocabularies and their concepts.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Longest concept value accepted without a warning.
pub const MAX_CONCEPT_VALUE_LEN: usize = 50;

/// One permissible value of a vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VocabularyConcept {
    /// Short label
    pub value: String,

    /// Definition text
    pub definition: String,

    /// Optional scope note
    #[serde(rename = "scopeNote", default, skip_serializing_if = "Option::is_none")]
    pub scope_note: Option<String>,
}

impl VocabularyConcept {
    /// Create a concept without a scope note.
    pub fn new(value: impl Into<String>, definition: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            definition: definition.into(),
            scope_note: None,
        }
    }

    /// Set the scope note.
    pub fn with_scope_note(mut self, note: impl Into<String>) -> Self {
        self.scope_note = Some(note.into());
        self
    }
}

/// Link from a vocabulary to the element it serves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementLink {
    /// Element label
    pub label: String,
    /// Site-relative path
    pub path: String,
}

/// A controlled vocabulary page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vocabulary {
    /// Numeric identifier, kept as written in the file name
    pub id: Option<String>,

    /// File stem of the source page
    pub stem: String,

    /// Vocabulary title
    pub title: String,

    /// Vocabulary URI, also used as `isDefinedBy`
    pub uri: String,

    /// Vocabulary description
    pub description: String,

    /// Vocabulary scope note
    pub scope_note: String,

    /// Concepts in source order
    pub concepts: Vec<VocabularyConcept>,

    /// Element the vocabulary is used with
    pub element_link: Option<ElementLink>,

    /// Attribution footer text
    pub attribution: Option<String>,
}

impl Vocabulary {
    /// Create an empty vocabulary for a file stem.
    ///
    /// The stem becomes the vocabulary id when it is purely numeric.
    pub fn new(stem: impl Into<String>, title: impl Into<String>) -> Self {
        let stem = stem.into();
        let id = if !stem.is_empty() && stem.chars().all(|c| c.is_ascii_digit()) {
            Some(stem.clone())
        } else {
            None
        };
        Self {
            id,
            stem,
            title: title.into(),
            ..Default::default()
        }
    }

    /// Identifier used in URIs: the numeric id, or the stem.
    pub fn local_name(&self) -> &str {
        self.id.as_deref().unwrap_or(&self.stem)
    }

    /// Number of concepts.
    pub fn concept_count(&self) -> usize {
        self.concepts.len()
    }

    /// Check concepts for empty, overlong, or duplicated values.
    pub fn validate(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        let mut seen = HashSet::new();

        for (index, concept) in self.concepts.iter().enumerate() {
            if concept.value.is_empty() {
                warnings.push(format!("Concept {}: empty value", index));
                continue;
            }
            if concept.value.chars().count() > MAX_CONCEPT_VALUE_LEN {
                warnings.push(format!(
                    "Concept {}: value exceeds {} characters: \"{}\"",
                    index, MAX_CONCEPT_VALUE_LEN, concept.value
                ));
            }
            if !seen.insert(concept.value.as_str()) {
                warnings.push(format!(
                    "Concept {}: duplicate value \"{}\"",
                    index, concept.value
                ));
            }
        }

        warnings
    }
}
