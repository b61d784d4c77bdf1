//! RDF (Resource Description Framework) primitives for the wrapping layer
//!
//! This module implements the statement model the wrappers operate on:
//! - RDF terms as closed enums (IRI, blank node, literal)
//! - RDF triples and quads
//! - An in-memory, indexed triple store
//! - Namespace prefixes for compact IRIs
//!
//! # Example
//!
//! ```rust
//! use samyama_rdf_wrapping::rdf::{RdfStore, Triple, NamedNode, Literal, RdfPredicate};
//!
//! let mut store = RdfStore::new();
//!
//! let subject = NamedNode::new("http://example.org/alice").unwrap();
//! let predicate = RdfPredicate::new("http://xmlns.com/foaf/0.1/name").unwrap();
//! let object = Literal::new_simple_literal("Alice");
//!
//! let triple = Triple::new(subject.clone().into(), predicate.clone(), object.into());
//! assert!(store.insert(triple.clone()));
//!
//! let results = store.objects(&subject.into(), &predicate);
//! assert_eq!(results.len(), 1);
//! ```

mod namespace;
mod store;
mod types;

pub use types::{
    BlankNode, Literal, NamedNode, Quad, RdfError, RdfObject, RdfPredicate, RdfResult, RdfSubject,
    RdfTerm, TermKind, Triple, TriplePattern,
};

pub use store::{RdfStore, RdfStoreError, RdfStoreResult};

pub use namespace::{NamespaceManager, PrefixError, PrefixResult};
