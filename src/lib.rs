//! Samyama RDF Wrapping
//!
//! Typed, cardinality-aware property access over a schema-less RDF graph.
//! Calling code treats a subject node as an object with named properties
//! while storage stays an unordered set of statements.
//!
//! # Layers
//!
//! - [`rdf`]: terms, triples, an indexed in-memory store and prefixes
//! - [`mapping`]: value mappings (term → host value) and node mappings
//!   (host value → term)
//! - [`wrapper`]: resource wrappers with singular, plural and live
//!   accessors, node projection and graph/dataset views
//! - [`definition`]: data-driven resource kinds loaded from YAML or JSON
//!
//! ## Example Usage
//!
//! ```rust
//! use samyama_rdf_wrapping::mapping::{node, value};
//! use samyama_rdf_wrapping::rdf::RdfPredicate;
//! use samyama_rdf_wrapping::{Graph, Resource, WrapperResource};
//!
//! let graph = Graph::new();
//! graph.register::<Resource>();
//!
//! let alice: Resource = graph
//!     .project(graph.create_iri("http://example.org/alice").unwrap().term())
//!     .unwrap();
//! let nick = RdfPredicate::new("http://xmlns.com/foaf/0.1/nick").unwrap();
//!
//! alice.add(&nick, "al".to_string(), node::as_string_literal).unwrap();
//! alice.add(&nick, "ally".to_string(), node::as_string_literal).unwrap();
//!
//! // Snapshot
//! let nicks = alice.objects_read_only(&nick, value::literal_as_string).unwrap();
//! assert_eq!(nicks.len(), 2);
//!
//! // Live view
//! let live = alice
//!     .objects(&nick, node::as_string_literal, value::literal_as_string)
//!     .unwrap();
//! live.remove(&"al".to_string()).unwrap();
//! assert_eq!(live.len(), 1);
//! assert_eq!(nicks.len(), 2);
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]

pub mod dataset;
pub mod definition;
pub mod error;
pub mod graph;
pub mod mapping;
pub mod rdf;
pub mod wrapper;

// Re-export main types for convenience
pub use dataset::Dataset;

pub use definition::{
    Cardinality, DefinitionError, DefinitionResult, DefinitionSet, DynamicResource,
    NodeMappingKind, PropertySpec, PropertyValue, ResourceDefinition, ValidationError,
    ValueMappingKind,
};

pub use error::{WrapError, WrapResult};

pub use graph::{Graph, GraphNode};

pub use mapping::{IriValue, NodeMapping, TypedLiteral, ValueMapping};

pub use rdf::{
    BlankNode, Literal, NamedNode, NamespaceManager, Quad, RdfObject, RdfPredicate,
    RdfStore, RdfStoreError, RdfStoreResult, RdfSubject, RdfTerm, Triple, TriplePattern,
};

pub use wrapper::{
    ObjectIterator, ObjectSet, Personality, Resource, UriOrBlankFactory, WrapperDataset,
    WrapperGraph, WrapperResource,
};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get version string
pub fn version() -> &'static str {
    VERSION
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        let ver = version();
        assert!(!ver.is_empty());
        assert_eq!(ver, "0.1.0");
    }
}
