//! Namespace prefix table for compacting URIs into CURIEs.
//!
//! A [`PrefixTable`] is an explicit accumulator: each conversion owns one,
//! passes it by `&mut` to whatever compacts or infers URIs, and reads back
//! which prefixes were used. Nothing is shared between conversions.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Minimum number of URIs sharing a namespace before a prefix is inferred.
const MIN_INFERRED_OCCURRENCES: usize = 3;

/// Namespace prefixes known to every table.
pub const STANDARD_PREFIXES: &[(&str, &str)] = &[
    ("dcterms", "http://purl.org/dc/terms/"),
    ("owl", "http://www.w3.org/2002/07/owl#"),
    ("rdf", "http://www.w3.org/1999/02/22-rdf-syntax-ns#"),
    ("rdfs", "http://www.w3.org/2000/01/rdf-schema#"),
    ("skos", "http://www.w3.org/2004/02/skos/core#"),
    ("xsd", "http://www.w3.org/2001/XMLSchema#"),
];

/// Default namespace of element URIs.
pub const ELEMENT_NAMESPACE: &str = "http://iflastandards.info/ns/isbdm/elements/";

/// Default namespace of vocabulary URIs.
pub const VALUES_NAMESPACE: &str = "http://iflastandards.info/ns/isbdm/values/";

/// Base URIs for minted element and vocabulary identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Namespaces {
    /// Element namespace, also the elements' `isDefinedBy`
    pub elements: String,
    /// Vocabulary namespace
    pub values: String,
}

impl Namespaces {
    /// Create namespaces from explicit base URIs.
    pub fn new(elements: impl Into<String>, values: impl Into<String>) -> Self {
        Self {
            elements: elements.into(),
            values: values.into(),
        }
    }

    /// URI of a vocabulary with the given local name.
    pub fn vocabulary_uri(&self, local_name: &str) -> String {
        format!("{}{}", self.values, local_name)
    }

    /// Prefix table holding the standard prefixes plus `isbdm` and `isbdmv`.
    pub fn prefix_table(&self) -> PrefixTable {
        let mut table = PrefixTable::new();
        table.insert("isbdm", self.elements.clone());
        table.insert("isbdmv", self.values.clone());
        table
    }
}

impl Default for Namespaces {
    fn default() -> Self {
        Self::new(ELEMENT_NAMESPACE, VALUES_NAMESPACE)
    }
}

/// Prefix to namespace mapping with usage tracking.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrefixTable {
    prefixes: BTreeMap<String, String>,
    used: BTreeSet<String>,
}

impl PrefixTable {
    /// Create a table holding the standard RDF prefixes.
    pub fn new() -> Self {
        let mut table = Self::empty();
        for (prefix, namespace) in STANDARD_PREFIXES {
            table.insert(*prefix, *namespace);
        }
        table
    }

    /// Create a table with no prefixes.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Register or replace a prefix.
    pub fn insert(&mut self, prefix: impl Into<String>, namespace: impl Into<String>) {
        self.prefixes.insert(prefix.into(), namespace.into());
    }

    /// Namespace bound to a prefix.
    pub fn namespace(&self, prefix: &str) -> Option<&str> {
        self.prefixes.get(prefix).map(String::as_str)
    }

    /// Number of registered prefixes.
    pub fn len(&self) -> usize {
        self.prefixes.len()
    }

    /// Check if no prefixes are registered.
    pub fn is_empty(&self) -> bool {
        self.prefixes.is_empty()
    }

    /// Expand a CURIE such as `skos:definition`.
    ///
    /// Strings without a known prefix are returned unchanged.
    pub fn expand(&self, curie: &str) -> String {
        match curie.split_once(':') {
            Some((prefix, local)) => match self.prefixes.get(prefix) {
                Some(namespace) => format!("{}{}", namespace, local),
                None => curie.to_string(),
            },
            None => curie.to_string(),
        }
    }

    /// Compact a URI using the longest matching namespace and record the prefix as used.
    ///
    /// URIs outside every known namespace are returned unchanged.
    pub fn compact(&mut self, uri: &str) -> String {
        let best = self
            .prefixes
            .iter()
            .filter(|(_, namespace)| uri.starts_with(namespace.as_str()))
            .max_by_key(|(_, namespace)| namespace.len())
            .map(|(prefix, namespace)| (prefix.clone(), namespace.len()));

        match best {
            Some((prefix, ns_len)) => {
                let compacted = format!("{}:{}", prefix, &uri[ns_len..]);
                self.used.insert(prefix);
                compacted
            }
            None => uri.to_string(),
        }
    }

    /// Infer prefixes for frequent namespaces not yet covered by the table.
    ///
    /// A namespace is everything up to the last `#` or `/` of a URI. The
    /// prefix is its last path segment. Returns the prefixes added.
    pub fn infer<'a, I>(&mut self, uris: I) -> Vec<String>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut counts: BTreeMap<String, usize> = BTreeMap::new();
        for uri in uris {
            let split = uri.rfind(|c| c == '#' || c == '/');
            if let Some(idx) = split.filter(|&i| i > 0) {
                *counts.entry(uri[..=idx].to_string()).or_default() += 1;
            }
        }

        let mut candidates: Vec<(String, usize)> = counts.into_iter().collect();
        candidates.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

        let mut added = Vec::new();
        for (namespace, count) in candidates {
            if count < MIN_INFERRED_OCCURRENCES {
                continue;
            }
            let covered = self
                .prefixes
                .values()
                .any(|existing| namespace.starts_with(existing.as_str()));
            if covered {
                continue;
            }
            let Some(prefix) = namespace
                .split('/')
                .filter(|part| !part.is_empty())
                .next_back()
                .map(|part| part.trim_end_matches('#').to_string())
            else {
                continue;
            };
            if prefix.is_empty() || prefix.ends_with(':') || self.prefixes.contains_key(&prefix) {
                continue;
            }
            log::debug!("Inferred prefix '{}' for namespace {}", prefix, namespace);
            self.prefixes.insert(prefix.clone(), namespace);
            added.push(prefix);
        }
        added
    }

    /// Prefixes used by [`PrefixTable::compact`] so far, sorted.
    pub fn used(&self) -> impl Iterator<Item = (&str, &str)> {
        self.used.iter().filter_map(|prefix| {
            self.prefixes
                .get(prefix)
                .map(|namespace| (prefix.as_str(), namespace.as_str()))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_namespaces_prefix_table() {
        let mut table = Namespaces::default().prefix_table();
        assert_eq!(
            table.compact("http://iflastandards.info/ns/isbdm/values/1275"),
            "isbdmv:1275"
        );
        assert_eq!(
            Namespaces::default().vocabulary_uri("1275"),
            "http://iflastandards.info/ns/isbdm/values/1275"
        );
    }

    #[test]
    fn test_expand_and_compact() {
        let mut table = PrefixTable::new();
        table.insert("isbdm", "http://iflastandards.info/ns/isbdm/elements/");

        assert_eq!(
            table.expand("skos:definition"),
            "http://www.w3.org/2004/02/skos/core#definition"
        );
        assert_eq!(table.expand("unknown:thing"), "unknown:thing");
        assert_eq!(
            table.compact("http://iflastandards.info/ns/isbdm/elements/P1025"),
            "isbdm:P1025"
        );
        assert_eq!(table.compact("http://example.org/x"), "http://example.org/x");

        let used: Vec<_> = table.used().map(|(p, _)| p).collect();
        assert_eq!(used, vec!["isbdm"]);
    }

    #[test]
    fn test_compact_prefers_longest_namespace() {
        let mut table = PrefixTable::empty();
        table.insert("isbd", "http://iflastandards.info/ns/isbd/");
        table.insert("isbdm", "http://iflastandards.info/ns/isbd/m/");
        assert_eq!(
            table.compact("http://iflastandards.info/ns/isbd/m/P1"),
            "isbdm:P1"
        );
    }

    #[test]
    fn test_tables_are_independent() {
        let mut first = PrefixTable::new();
        let second = PrefixTable::new();
        first.insert("ex", "http://example.org/");
        assert!(first.namespace("ex").is_some());
        assert!(second.namespace("ex").is_none());
    }

    #[test]
    fn test_infer_frequent_namespace() {
        let mut table = PrefixTable::new();
        let uris = [
            "http://iflastandards.info/ns/isbdm/values/1275/T1001",
            "http://iflastandards.info/ns/isbdm/values/1275/T1002",
            "http://iflastandards.info/ns/isbdm/values/1275/T1003",
            "http://example.org/rare/one",
        ];
        let added = table.infer(uris.iter().copied());
        assert_eq!(added, vec!["1275".to_string()]);
        assert_eq!(
            table.compact("http://iflastandards.info/ns/isbdm/values/1275/T1002"),
            "1275:T1002"
        );
    }
}
