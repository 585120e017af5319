//! Content blocks that make up a document body.

use serde::{Deserialize, Serialize};

/// One property/value row of an example table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExampleRow {
    /// Property label
    pub property: String,
    /// Example value
    pub value: String,
}

impl ExampleRow {
    /// Create a new example row.
    pub fn new(property: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            value: value.into(),
        }
    }
}

/// A worked example: a table of rows plus an optional editorial annotation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExampleGroup {
    /// Table rows in source order
    pub rows: Vec<ExampleRow>,

    /// Editorial comment following the table
    #[serde(skip_serializing_if = "Option::is_none")]
    pub annotation: Option<String>,
}

impl ExampleGroup {
    /// Create an example group.
    pub fn new(rows: Vec<ExampleRow>, annotation: Option<String>) -> Self {
        Self { rows, annotation }
    }

    /// Check whether the group has neither rows nor an annotation.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty() && self.annotation.is_none()
    }
}

/// A unit of body content, in source order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentBlock {
    /// Paragraph of inline MDX text
    Paragraph {
        /// Converted paragraph text
        text: String,
    },

    /// Ordered or unordered list
    List {
        /// Numbered list when true
        ordered: bool,
        /// Item texts
        items: Vec<String>,
    },

    /// Worked example
    ExampleGroup(ExampleGroup),

    /// Cross-reference to a related element
    SeeAlso {
        /// Link text
        label: String,
        /// Site-relative target path
        path: String,
    },
}

impl ContentBlock {
    /// Create a paragraph block.
    pub fn paragraph(text: impl Into<String>) -> Self {
        ContentBlock::Paragraph { text: text.into() }
    }

    /// Create a list block.
    pub fn list(ordered: bool, items: Vec<String>) -> Self {
        ContentBlock::List { ordered, items }
    }

    /// Check if this is an example group.
    pub fn is_example(&self) -> bool {
        matches!(self, ContentBlock::ExampleGroup(_))
    }
}

/// Semantic role of a body division.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "snake_case")]
pub enum DivisionRole {
    /// Explanatory guidance
    Guidance,
    /// A rule, optionally mandatory
    Stipulation {
        /// The rule carries a mandatory marker
        mandatory: bool,
    },
    /// Content outside any guidance or stipulation wrapper
    Plain,
}

/// A run of blocks sharing one wrapper in the output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Division {
    /// Wrapper role
    #[serde(flatten)]
    pub role: DivisionRole,

    /// Blocks in source order
    pub blocks: Vec<ContentBlock>,
}

impl Division {
    /// Create an empty division.
    pub fn new(role: DivisionRole) -> Self {
        Self {
            role,
            blocks: Vec::new(),
        }
    }

    /// Create a division with blocks.
    pub fn with_blocks(role: DivisionRole, blocks: Vec<ContentBlock>) -> Self {
        Self { role, blocks }
    }

    /// Number of example groups in this division.
    pub fn example_count(&self) -> usize {
        self.blocks.iter().filter(|b| b.is_example()).count()
    }
}

/// A titled body section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    /// Heading text
    pub title: String,

    /// Divisions in source order
    pub divisions: Vec<Division>,

    /// Nested sections
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub subsections: Vec<Section>,
}

impl Section {
    /// Create an empty section.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            divisions: Vec::new(),
            subsections: Vec::new(),
        }
    }

    /// Iterate over all blocks of this section and its subsections.
    pub fn blocks(&self) -> Box<dyn Iterator<Item = &ContentBlock> + '_> {
        Box::new(
            self.divisions
                .iter()
                .flat_map(|d| d.blocks.iter())
                .chain(self.subsections.iter().flat_map(|s| s.blocks())),
        )
    }
}
