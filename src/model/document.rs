//! Document-level types.

use super::{ContentBlock, Division, ElementIdentity, ElementMetadata, Section, Vocabulary};
use crate::detect::DocumentKind;
use serde::{Deserialize, Serialize};

/// An extracted element page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementDocument {
    /// Site placement
    pub identity: ElementIdentity,

    /// Element metadata
    pub metadata: ElementMetadata,

    /// Element URI
    pub uri: String,

    /// Namespace the element is defined in
    pub defined_by: String,

    /// Body sections in output order
    pub sections: Vec<Section>,
}

impl ElementDocument {
    /// Iterate over every body block.
    pub fn blocks(&self) -> impl Iterator<Item = &ContentBlock> {
        self.sections.iter().flat_map(|s| s.blocks())
    }
}

/// An extracted string encoding scheme page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SesDocument {
    /// Document id derived from the file name
    pub id: String,

    /// Page title
    pub title: String,

    /// Guidance divisions in source order
    pub divisions: Vec<Division>,
}

impl SesDocument {
    /// Canonical URL slug.
    pub fn slug(&self) -> String {
        format!("/ses/{}", self.id)
    }

    /// Iterate over every body block.
    pub fn blocks(&self) -> impl Iterator<Item = &ContentBlock> {
        self.divisions.iter().flat_map(|d| d.blocks.iter())
    }
}

/// An extracted general information page, such as a section introduction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneralDocument {
    /// File stem
    pub id: String,

    /// Page title
    pub title: String,

    /// Guidance divisions in source order
    pub divisions: Vec<Division>,
}

impl GeneralDocument {
    /// Iterate over every body block.
    pub fn blocks(&self) -> impl Iterator<Item = &ContentBlock> {
        self.divisions.iter().flat_map(|d| d.blocks.iter())
    }
}

/// One row of a full example: an element and the value recorded for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FullExampleEntry {
    /// Element label
    pub element: String,

    /// Site path of the element page, empty when the label is not linked
    pub element_url: String,

    /// Recorded value
    pub value: String,

    /// Editorial comment attached to the row
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

/// An extracted full example page: one manifestation described element by element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FullExampleDocument {
    /// File stem, such as `fx001`
    pub id: String,

    /// Page title
    pub title: String,

    /// Introductory paragraphs
    pub description: Vec<String>,

    /// Example rows in source order
    pub entries: Vec<FullExampleEntry>,

    /// Position in the section navigation
    pub sidebar_position: Option<u32>,
}

impl FullExampleDocument {
    /// Sidebar label: the title up to its first parenthesis.
    pub fn sidebar_label(&self) -> &str {
        let head = self.title.split('(').next().unwrap_or_default().trim();
        if head.is_empty() {
            &self.title
        } else {
            head
        }
    }
}

/// Any extracted page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "document", rename_all = "snake_case")]
pub enum Document {
    /// Element definition page
    Element(ElementDocument),
    /// Controlled vocabulary page
    Vocabulary(Vocabulary),
    /// String encoding scheme page
    Ses(SesDocument),
    /// Full example page
    FullExample(FullExampleDocument),
    /// General information page
    General(GeneralDocument),
}

impl Document {
    /// Kind of this document.
    pub fn kind(&self) -> DocumentKind {
        match self {
            Document::Element(_) => DocumentKind::Element,
            Document::Vocabulary(_) => DocumentKind::Vocabulary,
            Document::Ses(_) => DocumentKind::Ses,
            Document::FullExample(_) => DocumentKind::FullExample,
            Document::General(_) => DocumentKind::General,
        }
    }

    /// Display title.
    pub fn title(&self) -> &str {
        match self {
            Document::Element(doc) => &doc.metadata.label,
            Document::Vocabulary(vocab) => &vocab.title,
            Document::Ses(doc) => &doc.title,
            Document::FullExample(doc) => &doc.title,
            Document::General(doc) => &doc.title,
        }
    }
}
