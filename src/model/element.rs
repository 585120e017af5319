//! Element (property definition) metadata.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Domain used when a page declares none.
pub const DEFAULT_DOMAIN: &str = "Manifestation";

/// Range used when a page declares none.
pub const DEFAULT_RANGE: &str = "Literal";

/// Section used when a path or link carries none.
pub const DEFAULT_SECTION: &str = "statements";

/// A reference to another element (sub-type or super-type).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeRef {
    /// Full element URI
    pub uri: String,

    /// Site-relative document path, e.g. `/docs/statements/1025`
    #[serde(rename = "url")]
    pub relative_path: String,

    /// Display label
    pub label: String,
}

impl TypeRef {
    /// Create a new type reference.
    pub fn new(
        uri: impl Into<String>,
        relative_path: impl Into<String>,
        label: impl Into<String>,
    ) -> Self {
        Self {
            uri: uri.into(),
            relative_path: relative_path.into(),
            label: label.into(),
        }
    }
}

/// Whether an element takes literal or reference values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PropertyKind {
    /// Literal-valued property
    DatatypeProperty,
    /// Reference-valued property
    ObjectProperty,
}

impl PropertyKind {
    /// Derive the property kind from a range value.
    pub fn from_range(range: &str) -> Self {
        if range == DEFAULT_RANGE {
            PropertyKind::DatatypeProperty
        } else {
            PropertyKind::ObjectProperty
        }
    }

    /// Name as written in the RDF header.
    pub fn as_str(&self) -> &'static str {
        match self {
            PropertyKind::DatatypeProperty => "DatatypeProperty",
            PropertyKind::ObjectProperty => "ObjectProperty",
        }
    }
}

impl fmt::Display for PropertyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Metadata extracted from an element page.
///
/// The property kind is not stored; [`ElementMetadata::property_kind`]
/// always derives it from `range`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementMetadata {
    /// Identifier taken verbatim from the file stem (leading zeros kept)
    pub identifier: String,

    /// Element label (page title)
    pub label: String,

    /// Definition text
    pub definition: String,

    /// Domain class
    pub domain: String,

    /// Range class, or `Literal`
    pub range: String,

    /// Scope note, empty when the page has none
    pub scope_note: String,

    /// Narrower elements
    pub sub_types: Vec<TypeRef>,

    /// Broader elements
    pub super_types: Vec<TypeRef>,
}

impl ElementMetadata {
    /// Create metadata with default domain and range.
    pub fn new(identifier: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            label: label.into(),
            definition: String::new(),
            domain: DEFAULT_DOMAIN.to_string(),
            range: DEFAULT_RANGE.to_string(),
            scope_note: String::new(),
            sub_types: Vec::new(),
            super_types: Vec::new(),
        }
    }

    /// Set the definition.
    pub fn with_definition(mut self, definition: impl Into<String>) -> Self {
        self.definition = definition.into();
        self
    }

    /// Set the domain.
    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = domain.into();
        self
    }

    /// Set the range.
    pub fn with_range(mut self, range: impl Into<String>) -> Self {
        self.range = range.into();
        self
    }

    /// Set the scope note.
    pub fn with_scope_note(mut self, note: impl Into<String>) -> Self {
        self.scope_note = note.into();
        self
    }

    /// Property kind derived from the range.
    pub fn property_kind(&self) -> PropertyKind {
        PropertyKind::from_range(&self.range)
    }

    /// Element URI within the given namespace.
    pub fn uri(&self, namespace: &str) -> String {
        element_uri(namespace, &self.identifier)
    }
}

/// Build an element URI from a namespace and a file stem.
pub fn element_uri(namespace: &str, identifier: &str) -> String {
    format!("{}P{}", namespace, identifier)
}

/// Site placement of an element document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementIdentity {
    /// Document id (file stem)
    pub id: String,

    /// Documentation section, e.g. `statements` or `notes`
    pub section: String,

    /// Canonical URL slug
    pub slug: String,

    /// Alternate URLs
    pub aliases: Vec<String>,
}

impl ElementIdentity {
    /// Build the identity of an element from its id, section, and label.
    pub fn new(id: impl Into<String>, section: impl Into<String>, label: &str) -> Self {
        let id = id.into();
        let section = section.into();
        let slug = format!("/docs/{}/{}", section, id);
        let aliases = vec![
            format!("/elements/P{}", id),
            format!("/{}/{}", section, kebab_case(label)),
        ];
        Self {
            id,
            section,
            slug,
            aliases,
        }
    }
}

/// Lowercase, join whitespace runs with `-`, and drop other punctuation.
pub fn kebab_case(label: &str) -> String {
    let mut out = String::with_capacity(label.len());
    let mut in_space = false;
    for c in label.trim().chars().flat_map(char::to_lowercase) {
        if c.is_whitespace() {
            if !in_space {
                out.push('-');
            }
            in_space = true;
            continue;
        }
        in_space = false;
        if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
            out.push(c);
        }
    }
    out
}
