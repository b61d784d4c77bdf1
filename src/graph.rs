//! Shared graph handle
//!
//! A [`Graph`] is a cheap, cloneable handle to one in-memory [`RdfStore`] and
//! the [`Personality`] that says which wrapper kinds nodes of this graph can be
//! projected into. Wrappers and object sets hold a handle, never the store.
//!
//! Every call takes the store lock for its own duration only. That is the
//! whole isolation story: the wrapping layer adds no transactions, so
//! callers that interleave writers across threads must coordinate themselves.

use crate::error::{WrapError, WrapResult};
use crate::rdf::{
    BlankNode, NamedNode, RdfObject, RdfPredicate, RdfStore, RdfSubject, RdfTerm, Triple,
    TriplePattern,
};
use crate::wrapper::{Personality, UriOrBlankFactory, WrapperResource};
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::trace;

struct GraphInner {
    store: RwLock<RdfStore>,
    personality: RwLock<Personality>,
}

/// Handle to a shared, mutable RDF graph
#[derive(Clone)]
pub struct Graph {
    inner: Arc<GraphInner>,
}

impl Graph {
    /// Create a handle to a new empty graph
    pub fn new() -> Self {
        Self::from_store(RdfStore::new())
    }

    /// Create a handle owning an existing store
    pub fn from_store(store: RdfStore) -> Self {
        Self {
            inner: Arc::new(GraphInner {
                store: RwLock::new(store),
                personality: RwLock::new(Personality::new()),
            }),
        }
    }

    /// Whether two handles point at the same graph
    pub fn ptr_eq(&self, other: &Graph) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// Read access to the underlying store
    pub fn read(&self) -> RwLockReadGuard<'_, RdfStore> {
        self.inner
            .store
            .read()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Write access to the underlying store
    pub fn write(&self) -> RwLockWriteGuard<'_, RdfStore> {
        self.inner
            .store
            .write()
            .unwrap_or_else(PoisonError::into_inner)
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Assert a statement. Returns `false` if it was already asserted.
    pub fn insert(&self, triple: Triple) -> bool {
        self.write().insert(triple)
    }

    /// Retract a statement. Returns `false` if it was not asserted.
    pub fn remove(&self, triple: &Triple) -> bool {
        self.write().remove(triple)
    }

    pub fn contains(&self, triple: &Triple) -> bool {
        self.read().contains(triple)
    }

    pub fn contains_statement(
        &self,
        subject: &RdfSubject,
        predicate: &RdfPredicate,
        object: &RdfObject,
    ) -> bool {
        self.read().contains_statement(subject, predicate, object)
    }

    /// Snapshot of the objects of (subject, predicate) at call time
    pub fn objects(&self, subject: &RdfSubject, predicate: &RdfPredicate) -> Vec<RdfObject> {
        self.read().objects(subject, predicate)
    }

    pub fn object_count(&self, subject: &RdfSubject, predicate: &RdfPredicate) -> usize {
        self.read().object_count(subject, predicate)
    }

    /// Assert one statement per object. Returns how many were new.
    pub fn insert_objects(
        &self,
        subject: &RdfSubject,
        predicate: &RdfPredicate,
        objects: impl IntoIterator<Item = RdfObject>,
    ) -> usize {
        let mut store = self.write();
        objects
            .into_iter()
            .filter(|object| {
                store.insert(Triple::new(subject.clone(), predicate.clone(), object.clone()))
            })
            .count()
    }

    /// Retract every statement of (subject, predicate). Returns how many went.
    pub fn remove_objects(&self, subject: &RdfSubject, predicate: &RdfPredicate) -> usize {
        let removed = self.write().remove_objects(subject, predicate);
        trace!(%subject, %predicate, removed, "removed objects");
        removed
    }

    /// Replace the objects of (subject, predicate) under a single write lock
    pub fn replace_objects(
        &self,
        subject: &RdfSubject,
        predicate: &RdfPredicate,
        objects: impl IntoIterator<Item = RdfObject>,
    ) {
        let mut store = self.write();
        let removed = store.remove_objects(subject, predicate);
        let inserted = objects
            .into_iter()
            .filter(|object| {
                store.insert(Triple::new(subject.clone(), predicate.clone(), object.clone()))
            })
            .count();
        trace!(%subject, %predicate, removed, inserted, "replaced objects");
    }

    pub fn subjects_with(&self, predicate: &RdfPredicate, object: &RdfObject) -> Vec<RdfSubject> {
        self.read().subjects_with(predicate, object)
    }

    pub fn query(&self, pattern: &TriplePattern) -> Vec<Triple> {
        self.read().query(pattern)
    }

    /// An IRI node attached to this graph
    pub fn create_iri(&self, iri: &str) -> WrapResult<GraphNode> {
        let node = NamedNode::new(iri)?;
        Ok(self.node(node))
    }

    /// A fresh blank node attached to this graph
    pub fn create_blank_node(&self) -> GraphNode {
        self.node(BlankNode::new())
    }

    /// Attach a term to this graph
    pub fn node(&self, term: impl Into<RdfTerm>) -> GraphNode {
        GraphNode::attached(term, self.clone())
    }

    /// Read access to the wrapper registry of this graph
    pub fn personality(&self) -> RwLockReadGuard<'_, Personality> {
        self.inner
            .personality
            .read()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Write access to the wrapper registry of this graph
    pub fn personality_mut(&self) -> RwLockWriteGuard<'_, Personality> {
        self.inner
            .personality
            .write()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Register a wrapper kind with the standard IRI-or-blank factory
    pub fn register<W: WrapperResource>(&self) -> &Self {
        self.personality_mut().add(UriOrBlankFactory::new(W::wrap));
        self
    }

    /// Whether `node` can be projected into `W` in this graph
    pub fn can_project<W: WrapperResource>(&self, node: &RdfTerm) -> bool {
        self.personality()
            .implementation::<W>()
            .is_some_and(|factory| factory.can_wrap(node, self))
    }

    /// Project `node` into the wrapper kind `W`
    pub fn project<W: WrapperResource>(&self, node: &RdfTerm) -> WrapResult<W> {
        let factory = self
            .personality()
            .implementation::<W>()
            .ok_or(WrapError::UnsupportedProjection(std::any::type_name::<W>()))?;

        factory.wrap(node, self)
    }
}

impl Default for Graph {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Graph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Graph")
            .field("triples", &self.len())
            .field("kinds", &self.personality().len())
            .finish()
    }
}

/// A term, optionally attached to the graph it lives in
#[derive(Debug, Clone)]
pub struct GraphNode {
    term: RdfTerm,
    graph: Option<Graph>,
}

impl GraphNode {
    /// A term that knows its graph
    pub fn attached(term: impl Into<RdfTerm>, graph: Graph) -> Self {
        Self {
            term: term.into(),
            graph: Some(graph),
        }
    }

    /// A term without a graph
    pub fn detached(term: impl Into<RdfTerm>) -> Self {
        Self {
            term: term.into(),
            graph: None,
        }
    }

    pub fn term(&self) -> &RdfTerm {
        &self.term
    }

    pub fn graph(&self) -> Option<&Graph> {
        self.graph.as_ref()
    }

    /// The graph, or `NoGraphContext` for a detached term
    pub fn require_graph(&self) -> WrapResult<&Graph> {
        self.graph
            .as_ref()
            .ok_or_else(|| WrapError::NoGraphContext(self.term.to_string()))
    }
}

impl PartialEq for GraphNode {
    fn eq(&self, other: &Self) -> bool {
        self.term == other.term
    }
}

impl Eq for GraphNode {}

impl fmt::Display for GraphNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.term)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rdf::Literal;

    fn alice() -> RdfSubject {
        NamedNode::new("http://example.org/alice").unwrap().into()
    }

    fn nick() -> RdfPredicate {
        RdfPredicate::new("http://xmlns.com/foaf/0.1/nick").unwrap()
    }

    #[test]
    fn test_clones_share_the_store() {
        let graph = Graph::new();
        let other = graph.clone();

        graph.insert(Triple::new(
            alice(),
            nick(),
            Literal::new_simple_literal("al").into(),
        ));

        assert!(graph.ptr_eq(&other));
        assert_eq!(other.len(), 1);
        assert!(!graph.ptr_eq(&Graph::new()));
    }

    #[test]
    fn test_replace_objects() {
        let graph = Graph::new();
        let old: Vec<RdfObject> = vec![
            Literal::new_simple_literal("a").into(),
            Literal::new_simple_literal("b").into(),
        ];
        assert_eq!(graph.insert_objects(&alice(), &nick(), old), 2);

        graph.replace_objects(&alice(), &nick(), vec![Literal::new_simple_literal("c").into()]);

        assert_eq!(
            graph.objects(&alice(), &nick()),
            vec![RdfObject::from(Literal::new_simple_literal("c"))]
        );
    }

    #[test]
    fn test_nodes_know_their_graph() {
        let graph = Graph::new();
        let blank = graph.create_blank_node();
        assert!(blank.require_graph().unwrap().ptr_eq(&graph));

        let iri = graph.create_iri("urn:example:s").unwrap();
        assert_eq!(iri, GraphNode::detached(NamedNode::new("urn:example:s").unwrap()));

        let detached = GraphNode::detached(Literal::new_simple_literal("x"));
        assert!(matches!(
            detached.require_graph(),
            Err(WrapError::NoGraphContext(_))
        ));
    }
}
