//! Header block (frontmatter) records and their YAML form.
//!
//! Field order in the output follows struct declaration order. Quoting and
//! escaping are left to `serde_yaml`, so every header written here parses
//! back with [`parse_frontmatter`].

use super::RenderOptions;
use crate::error::{Error, Result};
use crate::model::{
    ElementDocument, FullExampleDocument, GeneralDocument, PrefixTable, SesDocument, TypeRef,
    Vocabulary, VocabularyConcept,
};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Publication status of every converted element.
pub const STATUS_PUBLISHED: &str = "Published";

const DELIMITER: &str = "---";

/// Header of an element document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementFrontmatter {
    pub id: String,
    pub slug: String,
    pub aliases: Vec<String>,
    pub sidebar_label: String,
    pub sidebar_position: u32,
    pub sidebar_level: u32,
    #[serde(rename = "RDF")]
    pub rdf: RdfProperties,
    #[serde(rename = "scopeNote")]
    pub scope_note: String,
}

/// RDF-like property description of an element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RdfProperties {
    pub label: String,
    pub definition: String,
    pub domain: String,
    pub range: String,
    pub uri: String,
    #[serde(rename = "type")]
    pub property_type: String,
    pub scope_note: String,
    #[serde(rename = "elementSubType")]
    pub sub_types: Vec<TypeRef>,
    #[serde(rename = "elementSuperType")]
    pub super_types: Vec<TypeRef>,
    pub status: String,
    pub is_defined_by: String,
    pub equivalent_property: Vec<String>,
    pub inverse_of: Vec<String>,
}

impl ElementFrontmatter {
    /// Build the header of an element document.
    ///
    /// With `compact_uris`, URIs are compacted through `prefixes`, which
    /// records the prefixes used.
    pub fn from_document(
        doc: &ElementDocument,
        options: &RenderOptions,
        prefixes: &mut PrefixTable,
    ) -> Self {
        let meta = &doc.metadata;
        let mut rdf = RdfProperties {
            label: meta.label.clone(),
            definition: meta.definition.clone(),
            domain: meta.domain.clone(),
            range: meta.range.clone(),
            uri: doc.uri.clone(),
            property_type: meta.property_kind().to_string(),
            scope_note: meta.scope_note.clone(),
            sub_types: meta.sub_types.clone(),
            super_types: meta.super_types.clone(),
            status: STATUS_PUBLISHED.to_string(),
            is_defined_by: doc.defined_by.clone(),
            equivalent_property: Vec::new(),
            inverse_of: Vec::new(),
        };

        if options.compact_uris {
            rdf.compact_uris(prefixes);
        }

        Self {
            id: doc.identity.id.clone(),
            slug: doc.identity.slug.clone(),
            aliases: doc.identity.aliases.clone(),
            sidebar_label: meta.label.clone(),
            sidebar_position: options.sidebar_position,
            sidebar_level: options.sidebar_level,
            rdf,
            scope_note: meta.scope_note.clone(),
        }
    }
}

impl RdfProperties {
    fn compact_uris(&mut self, prefixes: &mut PrefixTable) {
        let uris: Vec<String> = std::iter::once(self.uri.clone())
            .chain(self.sub_types.iter().map(|t| t.uri.clone()))
            .chain(self.super_types.iter().map(|t| t.uri.clone()))
            .collect();
        prefixes.infer(uris.iter().map(String::as_str));

        self.uri = prefixes.compact(&self.uri);
        self.is_defined_by = prefixes.compact(&self.is_defined_by);
        for type_ref in self.sub_types.iter_mut().chain(self.super_types.iter_mut()) {
            type_ref.uri = prefixes.compact(&type_ref.uri);
        }
    }
}

/// Header of a vocabulary document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VocabularyFrontmatter {
    pub vocabulary_id: Option<String>,
    pub title: String,
    pub uri: String,
    pub description: String,
    pub is_defined_by: String,
    pub scope_note: String,
    pub concepts: Vec<VocabularyConcept>,
}

impl VocabularyFrontmatter {
    /// Build the header of a vocabulary document.
    pub fn from_vocabulary(
        vocab: &Vocabulary,
        options: &RenderOptions,
        prefixes: &mut PrefixTable,
    ) -> Self {
        let (uri, is_defined_by) = if options.compact_uris {
            (prefixes.compact(&vocab.uri), prefixes.compact(&vocab.uri))
        } else {
            (vocab.uri.clone(), vocab.uri.clone())
        };

        Self {
            vocabulary_id: vocab.id.clone(),
            title: vocab.title.clone(),
            uri,
            description: vocab.description.clone(),
            is_defined_by,
            scope_note: vocab.scope_note.clone(),
            concepts: vocab.concepts.clone(),
        }
    }
}

/// Header of a string encoding scheme document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SesFrontmatter {
    pub id: String,
    pub title: String,
    pub slug: String,
}

impl SesFrontmatter {
    /// Build the header of an SES document.
    pub fn from_document(doc: &SesDocument) -> Self {
        Self {
            id: doc.id.clone(),
            title: doc.title.clone(),
            slug: doc.slug(),
        }
    }
}

/// Header of a full example document or of the full example index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FullExampleFrontmatter {
    pub title: String,
    pub sidebar_label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sidebar_position: Option<u32>,
}

impl FullExampleFrontmatter {
    /// Build the header of a full example document.
    pub fn from_document(doc: &FullExampleDocument) -> Self {
        Self {
            title: doc.title.clone(),
            sidebar_label: doc.sidebar_label().to_string(),
            sidebar_position: doc.sidebar_position,
        }
    }
}

/// Header of a general information document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneralFrontmatter {
    pub id: String,
    pub title: String,
    pub sidebar_position: u32,
}

impl GeneralFrontmatter {
    /// Build the header of a general document; it leads its sidebar group.
    pub fn from_document(doc: &GeneralDocument) -> Self {
        Self {
            id: doc.id.clone(),
            title: doc.title.clone(),
            sidebar_position: 1,
        }
    }
}

/// Serialize a header record as a `---` delimited YAML block.
pub fn to_frontmatter<T: Serialize>(header: &T) -> Result<String> {
    let yaml = serde_yaml::to_string(header)?;
    Ok(format!("{DELIMITER}\n{yaml}{DELIMITER}\n"))
}

/// Split a document into its YAML header (without delimiters) and body.
pub fn split_frontmatter(text: &str) -> Option<(&str, &str)> {
    let rest = text.strip_prefix("---\n")?;
    if let Some(body) = rest.strip_prefix("---\n") {
        return Some(("", body));
    }
    let end = rest.find("\n---\n")?;
    Some((&rest[..end + 1], &rest[end + 5..]))
}

/// Parse the header block of a document into a record.
pub fn parse_frontmatter<T: DeserializeOwned>(text: &str) -> Result<T> {
    let (yaml, _) = split_frontmatter(text)
        .ok_or_else(|| Error::Render("document has no frontmatter block".to_string()))?;
    Ok(serde_yaml::from_str(yaml)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ElementIdentity, ElementMetadata, Namespaces};

    fn element(label: &str, range: &str) -> ElementDocument {
        let metadata = ElementMetadata::new("1025", label)
            .with_definition("Relates a manifestation to a \"statement\": {any}.")
            .with_range(range);
        let namespaces = Namespaces::default();
        ElementDocument {
            identity: ElementIdentity::new("1025", "statements", label),
            uri: metadata.uri(&namespaces.elements),
            defined_by: namespaces.elements.clone(),
            metadata,
            sections: Vec::new(),
        }
    }

    #[test]
    fn test_element_field_order() {
        let doc = element("Has manifestation statement", "Literal");
        let header = ElementFrontmatter::from_document(
            &doc,
            &RenderOptions::default(),
            &mut PrefixTable::new(),
        );
        let yaml = to_frontmatter(&header).unwrap();

        let keys: Vec<&str> = yaml
            .lines()
            .filter(|line| !line.starts_with(' ') && !line.starts_with('-') && line.contains(':'))
            .map(|line| line.split(':').next().unwrap_or_default())
            .collect();
        assert_eq!(
            keys,
            vec!["id", "slug", "aliases", "sidebar_label", "sidebar_position", "sidebar_level", "RDF", "scopeNote"]
        );
        assert!(yaml.contains("type: DatatypeProperty"));
        assert!(yaml.contains("elementSubType: []"));
        assert!(yaml.contains("elementSuperType: []"));
        assert!(yaml.contains("status: Published"));
    }

    #[test]
    fn test_round_trip() {
        let doc = element("Has title: \"proper\" {x}", "Nomen");
        let header = ElementFrontmatter::from_document(
            &doc,
            &RenderOptions::default(),
            &mut PrefixTable::new(),
        );
        let text = format!("{}\n# Body\n", to_frontmatter(&header).unwrap());

        let parsed: ElementFrontmatter = parse_frontmatter(&text).unwrap();
        assert_eq!(parsed, header);
        assert_eq!(parsed.id, "1025");
        assert_eq!(parsed.rdf.property_type, "ObjectProperty");
    }

    #[test]
    fn test_compact_uris() {
        let doc = element("Has note", "Literal");
        let mut prefixes = Namespaces::default().prefix_table();
        let header = ElementFrontmatter::from_document(
            &doc,
            &RenderOptions::new().with_compact_uris(true),
            &mut prefixes,
        );
        assert_eq!(header.rdf.uri, "isbdm:P1025");
        assert_eq!(header.rdf.is_defined_by, "isbdm:");
        let used: Vec<_> = prefixes.used().map(|(p, _)| p).collect();
        assert_eq!(used, vec!["isbdm"]);
    }

    #[test]
    fn test_split_frontmatter() {
        let (yaml, body) = split_frontmatter("---\nid: x\n---\n\nBody").unwrap();
        assert_eq!(yaml, "id: x\n");
        assert_eq!(body, "\nBody");
        assert!(split_frontmatter("No header").is_none());
    }

    #[test]
    fn test_ses_header() {
        let doc = SesDocument {
            id: "overview".to_string(),
            title: "String encoding schemes".to_string(),
            divisions: Vec::new(),
        };
        let yaml = to_frontmatter(&SesFrontmatter::from_document(&doc)).unwrap();
        assert_eq!(
            yaml,
            "---\nid: overview\ntitle: String encoding schemes\nslug: /ses/overview\n---\n"
        );
    }
}
