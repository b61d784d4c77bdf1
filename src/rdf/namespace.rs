//! Prefixes for compact IRIs
//!
//! Resource definition files write `foaf:name` instead of the full IRI; the
//! [`NamespaceManager`] turns those back into absolute IRIs.

use indexmap::IndexMap;
use oxiri::Iri;
use thiserror::Error;

/// Prefix errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PrefixError {
    #[error("Unknown prefix: {0}")]
    UnknownPrefix(String),

    /// Neither `prefix:local` nor an absolute IRI
    #[error("Not a compact or absolute IRI: {0}")]
    InvalidIri(String),
}

pub type PrefixResult<T> = Result<T, PrefixError>;

const WELL_KNOWN: [(&str, &str); 7] = [
    ("rdf", "http://www.w3.org/1999/02/22-rdf-syntax-ns#"),
    ("rdfs", "http://www.w3.org/2000/01/rdf-schema#"),
    ("xsd", "http://www.w3.org/2001/XMLSchema#"),
    ("owl", "http://www.w3.org/2002/07/owl#"),
    ("foaf", "http://xmlns.com/foaf/0.1/"),
    ("dc", "http://purl.org/dc/elements/1.1/"),
    ("dcterms", "http://purl.org/dc/terms/"),
];

/// Prefix → namespace IRI bindings, in registration order
#[derive(Debug, Clone)]
pub struct NamespaceManager {
    prefixes: IndexMap<String, String>,
}

impl NamespaceManager {
    /// Bindings for rdf, rdfs, xsd, owl, foaf, dc and dcterms
    pub fn new() -> Self {
        let mut namespaces = Self::empty();
        for (prefix, iri) in WELL_KNOWN {
            namespaces.add_prefix(prefix, iri);
        }
        namespaces
    }

    pub fn empty() -> Self {
        Self {
            prefixes: IndexMap::new(),
        }
    }

    /// Bind `prefix`, replacing any previous binding
    pub fn add_prefix(&mut self, prefix: impl Into<String>, iri: impl Into<String>) {
        self.prefixes.insert(prefix.into(), iri.into());
    }

    pub fn get_iri(&self, prefix: &str) -> PrefixResult<&str> {
        self.prefixes
            .get(prefix)
            .map(String::as_str)
            .ok_or_else(|| PrefixError::UnknownPrefix(prefix.to_string()))
    }

    /// `prefix:local` → namespace IRI + `local`
    pub fn expand(&self, compact: &str) -> PrefixResult<String> {
        let (prefix, local) = compact
            .split_once(':')
            .ok_or_else(|| PrefixError::InvalidIri(compact.to_string()))?;

        Ok(format!("{}{}", self.get_iri(prefix)?, local))
    }

    /// Expand a compact IRI with a bound prefix, or accept an absolute IRI.
    ///
    /// `urn:example:p` has no `urn` binding and comes back unchanged.
    pub fn resolve(&self, iri_or_compact: &str) -> PrefixResult<String> {
        match self.expand(iri_or_compact) {
            Err(PrefixError::UnknownPrefix(prefix)) => Iri::parse(iri_or_compact)
                .map(|iri| iri.into_inner().to_string())
                .map_err(|_| PrefixError::UnknownPrefix(prefix)),
            other => other,
        }
    }

    /// Bindings in registration order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.prefixes
            .iter()
            .map(|(prefix, iri)| (prefix.as_str(), iri.as_str()))
    }

    pub fn len(&self) -> usize {
        self.prefixes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prefixes.is_empty()
    }
}

impl Default for NamespaceManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_well_known_prefixes() {
        let namespaces = NamespaceManager::new();

        assert_eq!(namespaces.len(), WELL_KNOWN.len());
        assert_eq!(namespaces.get_iri("xsd").unwrap(), "http://www.w3.org/2001/XMLSchema#");
        assert_eq!(namespaces.iter().next(), Some(WELL_KNOWN[0]));
        assert!(NamespaceManager::empty().is_empty());
    }

    #[test]
    fn test_expand() {
        let namespaces = NamespaceManager::new();

        assert_eq!(
            namespaces.expand("foaf:name").unwrap(),
            "http://xmlns.com/foaf/0.1/name"
        );
        assert_eq!(
            namespaces.expand("nope:x"),
            Err(PrefixError::UnknownPrefix("nope".to_string()))
        );
        assert!(matches!(namespaces.expand("name"), Err(PrefixError::InvalidIri(_))));
    }

    #[test]
    fn test_resolve_accepts_absolute_iris() {
        let mut namespaces = NamespaceManager::new();
        namespaces.add_prefix("ex", "http://example.org/");

        assert_eq!(namespaces.resolve("urn:example:p").unwrap(), "urn:example:p");
        assert_eq!(namespaces.resolve("ex:p").unwrap(), "http://example.org/p");
        assert!(namespaces.resolve("plain words").is_err());
    }
}
