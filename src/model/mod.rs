//! Document model types for extracted documentation pages.
//!
//! This module defines the intermediate representation that bridges
//! HTML extraction and MDX rendering. Every value is created during a
//! single conversion and owned by it.

mod block;
mod document;
mod element;
mod namespace;
mod vocabulary;

pub use block::{ContentBlock, Division, DivisionRole, ExampleGroup, ExampleRow, Section};
pub use document::{
    Document, ElementDocument, FullExampleDocument, FullExampleEntry, GeneralDocument, SesDocument,
};
pub use element::{
    element_uri, kebab_case, ElementIdentity, ElementMetadata, PropertyKind, TypeRef,
    DEFAULT_DOMAIN, DEFAULT_RANGE, DEFAULT_SECTION,
};
pub use namespace::{
    Namespaces, PrefixTable, ELEMENT_NAMESPACE, STANDARD_PREFIXES, VALUES_NAMESPACE,
};
pub use vocabulary::{ElementLink, Vocabulary, VocabularyConcept, MAX_CONCEPT_VALUE_LEN};
