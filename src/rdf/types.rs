//! RDF terms, triples and quads
//!
//! Thin newtypes over oxrdf for the three node kinds, and closed enums for
//! the positions a node can take in a statement. Consumers match
//! exhaustively on the variant; nothing inspects the kind at runtime.

use oxrdf::{BlankNode as OxBlankNode, Literal as OxLiteral, NamedNode as OxNamedNode, NamedNodeRef};
use std::fmt;
use thiserror::Error;

/// RDF errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RdfError {
    #[error("Invalid IRI: {0}")]
    InvalidIri(String),

    #[error("Invalid blank node: {0}")]
    InvalidBlankNode(String),

    #[error("Invalid literal: {0}")]
    InvalidLiteral(String),

    /// Literals cannot be subjects
    #[error("Subject must be an IRI or blank node, found {0}")]
    NotASubject(TermKind),

    /// Only IRIs can be predicates
    #[error("Predicate must be an IRI, found {0}")]
    NotAPredicate(TermKind),
}

pub type RdfResult<T> = Result<T, RdfError>;

/// Node kind of a term
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TermKind {
    Iri,
    BlankNode,
    Literal,
}

impl fmt::Display for TermKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TermKind::Iri => "IRI",
            TermKind::BlankNode => "blank node",
            TermKind::Literal => "literal",
        })
    }
}

/// IRI node
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NamedNode(OxNamedNode);

impl NamedNode {
    /// Parse and validate an absolute IRI
    pub fn new(iri: &str) -> RdfResult<Self> {
        OxNamedNode::new(iri)
            .map(Self)
            .map_err(|e| RdfError::InvalidIri(format!("{iri}: {e}")))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl From<NamedNodeRef<'_>> for NamedNode {
    fn from(node: NamedNodeRef<'_>) -> Self {
        Self(node.into_owned())
    }
}

impl fmt::Display for NamedNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}>", self.as_str())
    }
}

/// Anonymous node
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BlankNode(OxBlankNode);

impl BlankNode {
    /// A blank node with a fresh random identifier
    pub fn new() -> Self {
        Self(OxBlankNode::default())
    }

    /// A blank node with the given identifier
    pub fn from_id(id: &str) -> RdfResult<Self> {
        OxBlankNode::new(id)
            .map(Self)
            .map_err(|e| RdfError::InvalidBlankNode(format!("{id}: {e}")))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Default for BlankNode {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for BlankNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "_:{}", self.as_str())
    }
}

/// Literal: a lexical form with either a datatype or a language tag
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Literal(OxLiteral);

impl Literal {
    /// xsd:string literal
    pub fn new_simple_literal(value: impl Into<String>) -> Self {
        Self(OxLiteral::new_simple_literal(value))
    }

    /// rdf:langString literal; fails on a malformed language tag
    pub fn new_language_tagged_literal(
        value: impl Into<String>,
        language: impl Into<String>,
    ) -> RdfResult<Self> {
        OxLiteral::new_language_tagged_literal(value, language)
            .map(Self)
            .map_err(|e| RdfError::InvalidLiteral(e.to_string()))
    }

    /// Literal of an arbitrary datatype. The lexical form is not checked.
    pub fn new_typed_literal(value: impl Into<String>, datatype: impl Into<NamedNode>) -> Self {
        Self(OxLiteral::new_typed_literal(value, datatype.into().0))
    }

    /// Lexical form
    pub fn value(&self) -> &str {
        self.0.value()
    }

    pub fn language(&self) -> Option<&str> {
        self.0.language()
    }

    pub fn datatype(&self) -> NamedNode {
        self.0.datatype().into()
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.language() {
            Some(language) => write!(f, "{:?}@{}", self.value(), language),
            None => write!(f, "{:?}^^{}", self.value(), self.datatype()),
        }
    }
}

/// Declares a closed term enum whose variants wrap the node type of the
/// same name, with `kind()`, `Display` and `From<node>`.
macro_rules! term_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $kind:ident),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant($variant),)+
        }

        impl $name {
            pub fn kind(&self) -> TermKind {
                match self {
                    $($name::$variant(_) => TermKind::$kind,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                match self {
                    $($name::$variant(node) => fmt::Display::fmt(node, f),)+
                }
            }
        }

        $(
            impl From<$variant> for $name {
                fn from(node: $variant) -> Self {
                    $name::$variant(node)
                }
            }
        )+
    };
}

term_enum! {
    /// Subject position: IRI or blank node
    RdfSubject { NamedNode => Iri, BlankNode => BlankNode }
}

term_enum! {
    /// Object position: any node
    RdfObject { NamedNode => Iri, BlankNode => BlankNode, Literal => Literal }
}

term_enum! {
    /// Any node, position unknown
    RdfTerm { NamedNode => Iri, BlankNode => BlankNode, Literal => Literal }
}

impl From<RdfSubject> for RdfTerm {
    fn from(subject: RdfSubject) -> Self {
        match subject {
            RdfSubject::NamedNode(n) => n.into(),
            RdfSubject::BlankNode(b) => b.into(),
        }
    }
}

impl From<RdfSubject> for RdfObject {
    fn from(subject: RdfSubject) -> Self {
        match subject {
            RdfSubject::NamedNode(n) => n.into(),
            RdfSubject::BlankNode(b) => b.into(),
        }
    }
}

impl From<RdfObject> for RdfTerm {
    fn from(object: RdfObject) -> Self {
        match object {
            RdfObject::NamedNode(n) => n.into(),
            RdfObject::BlankNode(b) => b.into(),
            RdfObject::Literal(l) => l.into(),
        }
    }
}

impl From<RdfTerm> for RdfObject {
    fn from(term: RdfTerm) -> Self {
        match term {
            RdfTerm::NamedNode(n) => n.into(),
            RdfTerm::BlankNode(b) => b.into(),
            RdfTerm::Literal(l) => l.into(),
        }
    }
}

impl TryFrom<RdfTerm> for RdfSubject {
    type Error = RdfError;

    fn try_from(term: RdfTerm) -> RdfResult<Self> {
        match term {
            RdfTerm::NamedNode(n) => Ok(n.into()),
            RdfTerm::BlankNode(b) => Ok(b.into()),
            RdfTerm::Literal(_) => Err(RdfError::NotASubject(TermKind::Literal)),
        }
    }
}

impl TryFrom<RdfObject> for RdfSubject {
    type Error = RdfError;

    fn try_from(object: RdfObject) -> RdfResult<Self> {
        RdfTerm::from(object).try_into()
    }
}

/// Predicate position: always an IRI
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RdfPredicate(NamedNode);

impl RdfPredicate {
    pub fn new(iri: &str) -> RdfResult<Self> {
        NamedNode::new(iri).map(Self)
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for RdfPredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl From<NamedNode> for RdfPredicate {
    fn from(node: NamedNode) -> Self {
        Self(node)
    }
}

impl From<NamedNodeRef<'_>> for RdfPredicate {
    fn from(node: NamedNodeRef<'_>) -> Self {
        Self(node.into())
    }
}

impl From<RdfPredicate> for RdfTerm {
    fn from(predicate: RdfPredicate) -> Self {
        RdfTerm::NamedNode(predicate.0)
    }
}

impl TryFrom<RdfTerm> for RdfPredicate {
    type Error = RdfError;

    fn try_from(term: RdfTerm) -> RdfResult<Self> {
        match term {
            RdfTerm::NamedNode(n) => Ok(Self(n)),
            other => Err(RdfError::NotAPredicate(other.kind())),
        }
    }
}

/// A statement
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Triple {
    pub subject: RdfSubject,
    pub predicate: RdfPredicate,
    pub object: RdfObject,
}

impl Triple {
    pub fn new(subject: RdfSubject, predicate: RdfPredicate, object: RdfObject) -> Self {
        Self {
            subject,
            predicate,
            object,
        }
    }
}

impl fmt::Display for Triple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} .", self.subject, self.predicate, self.object)
    }
}

/// A statement in a dataset; `graph: None` is the default graph
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Quad {
    pub subject: RdfSubject,
    pub predicate: RdfPredicate,
    pub object: RdfObject,
    pub graph: Option<NamedNode>,
}

impl Quad {
    pub fn new(
        subject: RdfSubject,
        predicate: RdfPredicate,
        object: RdfObject,
        graph: Option<NamedNode>,
    ) -> Self {
        Self {
            subject,
            predicate,
            object,
            graph,
        }
    }

    /// The statement without its graph name
    pub fn as_triple(&self) -> Triple {
        Triple::new(
            self.subject.clone(),
            self.predicate.clone(),
            self.object.clone(),
        )
    }
}

impl fmt::Display for Quad {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.subject, self.predicate, self.object)?;
        if let Some(graph) = &self.graph {
            write!(f, " {}", graph)?;
        }
        f.write_str(" .")
    }
}

/// Statement pattern; `None` positions match anything
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TriplePattern {
    pub subject: Option<RdfSubject>,
    pub predicate: Option<RdfPredicate>,
    pub object: Option<RdfObject>,
}

impl TriplePattern {
    pub fn new(
        subject: Option<RdfSubject>,
        predicate: Option<RdfPredicate>,
        object: Option<RdfObject>,
    ) -> Self {
        Self {
            subject,
            predicate,
            object,
        }
    }

    pub fn matches(&self, triple: &Triple) -> bool {
        fn bound<T: PartialEq>(position: &Option<T>, value: &T) -> bool {
            position.as_ref().map_or(true, |expected| expected == value)
        }

        bound(&self.subject, &triple.subject)
            && bound(&self.predicate, &triple.predicate)
            && bound(&self.object, &triple.object)
    }
}
