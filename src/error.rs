//! Errors raised by the wrapping runtime
//!
//! Every failure is scoped to the accessor call that raised it and is
//! returned to the caller; nothing here is logged instead of returned.

use crate::rdf::{RdfError, RdfStoreError, TermKind};
use thiserror::Error;

/// Wrapping errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WrapError {
    /// A value mapping received a term of the wrong kind
    #[error("Type mismatch: expected {expected}, found {found}")]
    TypeMismatch { expected: TermKind, found: TermKind },

    /// A required property has no statement
    #[error("No statement with subject [{subject}] and predicate [{predicate}]")]
    NotFound { subject: String, predicate: String },

    /// A single-valued property has more than one statement
    #[error("Multiple statements with subject [{subject}] and predicate [{predicate}]")]
    MultipleValues { subject: String, predicate: String },

    /// A write received an absent value where none is permitted
    #[error("Value must not be absent (predicate [{predicate}])")]
    NullValue { predicate: String },

    /// Dynamic set subject is not an IRI or blank node
    #[error("Subject is not IRI or blank node: {0}")]
    InvalidSubject(TermKind),

    /// Dynamic set predicate is not an IRI
    #[error("Predicate is not IRI node: {0}")]
    InvalidPredicate(TermKind),

    /// Node is not attached to any graph
    #[error("Node {0} has no graph")]
    NoGraphContext(String),

    /// Projection attempted on a literal
    #[error("Resource required, found literal {0}")]
    ResourceRequired(String),

    /// Projection into a kind the graph's personality does not know
    #[error("No implementation registered for {0}")]
    UnsupportedProjection(&'static str),

    /// Literal lexical form does not parse into the requested type
    #[error("Invalid lexical form {lexical:?} for {target}")]
    InvalidLexicalForm { lexical: String, target: &'static str },

    /// Literal lexical form is not an ISO-8601 instant
    #[error("Invalid instant {lexical:?}: {message}")]
    InvalidInstant { lexical: String, message: String },

    /// Term construction failed
    #[error(transparent)]
    Rdf(RdfError),

    /// Dataset lookup failed
    #[error(transparent)]
    Store(#[from] RdfStoreError),

    /// String is not a valid IRI
    #[error("Invalid IRI {iri:?}: {message}")]
    InvalidIri { iri: String, message: String },
}

pub type WrapResult<T> = Result<T, WrapError>;

impl From<RdfError> for WrapError {
    fn from(err: RdfError) -> Self {
        match err {
            RdfError::NotASubject(kind) => WrapError::InvalidSubject(kind),
            RdfError::NotAPredicate(kind) => WrapError::InvalidPredicate(kind),
            other => WrapError::Rdf(other),
        }
    }
}
