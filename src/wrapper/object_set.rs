//! Live, graph-backed set view over the objects of one (subject, predicate)
//!
//! An [`ObjectSet`] owns no elements. Every call converts through the
//! mappings and goes straight to the graph, so two sets over the same key
//! always agree, and a set sees writes made through any other path.

use crate::error::WrapResult;
use crate::graph::{Graph, GraphNode};
use crate::mapping::{NodeMapping, ValueMapping};
use crate::rdf::{RdfObject, RdfPredicate, RdfSubject, RdfTerm, Triple};
use indexmap::IndexSet;
use rustc_hash::{FxHashSet, FxHasher};
use std::borrow::Borrow;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use tracing::debug;

/// Mutable set view over every object of (subject, predicate)
pub struct ObjectSet<T, VM, NM> {
    subject: RdfSubject,
    predicate: RdfPredicate,
    graph: Graph,
    value_mapping: VM,
    node_mapping: NM,
    _marker: PhantomData<fn() -> T>,
}

impl<T, VM, NM> ObjectSet<T, VM, NM>
where
    VM: ValueMapping<T>,
    NM: NodeMapping<T>,
{
    /// Bind a set to `subject` and `predicate` in the subject's graph.
    ///
    /// Fails with `InvalidSubject` for a literal subject, `InvalidPredicate`
    /// for a non-IRI predicate and `NoGraphContext` for a detached subject.
    pub fn new(
        subject: &GraphNode,
        predicate: &RdfTerm,
        value_mapping: VM,
        node_mapping: NM,
    ) -> WrapResult<Self> {
        let node = RdfSubject::try_from(subject.term().clone())?;
        let predicate = RdfPredicate::try_from(predicate.clone())?;
        let graph = subject.require_graph()?.clone();

        Ok(Self {
            subject: node,
            predicate,
            graph,
            value_mapping,
            node_mapping,
            _marker: PhantomData,
        })
    }

    pub fn subject(&self) -> &RdfSubject {
        &self.subject
    }

    pub fn predicate(&self) -> &RdfPredicate {
        &self.predicate
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// Current number of objects, saturating at `isize::MAX`
    pub fn len(&self) -> usize {
        self.graph
            .object_count(&self.subject, &self.predicate)
            .min(isize::MAX as usize)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, value: &T) -> WrapResult<bool> {
        let object = self.to_node(value)?;

        Ok(self
            .graph
            .contains_statement(&self.subject, &self.predicate, &object))
    }

    /// Every value yields `true` from [`contains`](ObjectSet::contains)
    pub fn contains_all<I>(&self, values: I) -> WrapResult<bool>
    where
        I: IntoIterator,
        I::Item: Borrow<T>,
    {
        let objects = self.to_nodes(values)?;
        let store = self.graph.read();

        Ok(objects
            .iter()
            .all(|object| store.contains_statement(&self.subject, &self.predicate, object)))
    }

    /// Mapped values over a snapshot of the objects taken now.
    ///
    /// There is no removal through the iterator; use
    /// [`remove`](ObjectSet::remove) instead.
    pub fn iter(&self) -> impl Iterator<Item = WrapResult<T>> + '_ {
        self.terms()
            .into_iter()
            .map(move |object| self.value_mapping.map_value(&object, &self.graph))
    }

    /// Copy of the current values, detached from the graph
    pub fn to_set(&self) -> WrapResult<IndexSet<T>>
    where
        T: Hash + Eq,
    {
        self.iter().collect()
    }

    /// Assert `value`. Returns `false` if an equal term was already there.
    pub fn insert(&self, value: &T) -> WrapResult<bool> {
        let object = self.to_node(value)?;
        let inserted = self.graph.insert(self.triple(object));

        debug!(subject = %self.subject, predicate = %self.predicate, inserted, "object set insert");
        Ok(inserted)
    }

    /// Assert every value. Returns whether the set changed.
    #[doc(alias = "extend")]
    pub fn insert_all<I>(&self, values: I) -> WrapResult<bool>
    where
        I: IntoIterator,
        I::Item: Borrow<T>,
    {
        let objects = self.to_nodes(values)?;
        let inserted = self
            .graph
            .insert_objects(&self.subject, &self.predicate, objects);

        debug!(subject = %self.subject, predicate = %self.predicate, inserted, "object set insert_all");
        Ok(inserted > 0)
    }

    /// Retract `value`. Returns whether anything was removed.
    pub fn remove(&self, value: &T) -> WrapResult<bool> {
        let object = self.to_node(value)?;
        let removed = self.graph.remove(&self.triple(object));

        debug!(subject = %self.subject, predicate = %self.predicate, removed, "object set remove");
        Ok(removed)
    }

    /// Retract every value. Returns whether the set changed.
    pub fn remove_all<I>(&self, values: I) -> WrapResult<bool>
    where
        I: IntoIterator,
        I::Item: Borrow<T>,
    {
        let objects = self.to_nodes(values)?;
        let mut store = self.graph.write();
        let removed = objects
            .into_iter()
            .filter(|object| store.remove(&self.triple(object.clone())))
            .count();

        debug!(subject = %self.subject, predicate = %self.predicate, removed, "object set remove_all");
        Ok(removed > 0)
    }

    /// Keep only the given values. Returns whether the set changed.
    pub fn retain_all<I>(&self, values: I) -> WrapResult<bool>
    where
        I: IntoIterator,
        I::Item: Borrow<T>,
    {
        let keep: FxHashSet<RdfObject> = self.to_nodes(values)?.into_iter().collect();
        let mut store = self.graph.write();
        let removed = store
            .objects(&self.subject, &self.predicate)
            .into_iter()
            .filter(|object| !keep.contains(object))
            .filter(|object| store.remove(&self.triple(object.clone())))
            .count();

        debug!(subject = %self.subject, predicate = %self.predicate, removed, "object set retain_all");
        Ok(removed > 0)
    }

    /// Retract every statement of (subject, predicate)
    pub fn clear(&self) {
        self.graph.remove_objects(&self.subject, &self.predicate);
    }

    fn to_node(&self, value: &T) -> WrapResult<RdfObject> {
        self.node_mapping.map_node(value, &self.graph)
    }

    fn to_nodes<I>(&self, values: I) -> WrapResult<Vec<RdfObject>>
    where
        I: IntoIterator,
        I::Item: Borrow<T>,
    {
        values
            .into_iter()
            .map(|value| self.to_node(value.borrow()))
            .collect()
    }
}

impl<T, VM, NM> ObjectSet<T, VM, NM> {
    fn terms(&self) -> Vec<RdfObject> {
        self.graph.objects(&self.subject, &self.predicate)
    }

    fn term_set(&self) -> FxHashSet<RdfObject> {
        self.terms().into_iter().collect()
    }

    fn triple(&self, object: RdfObject) -> Triple {
        Triple::new(self.subject.clone(), self.predicate.clone(), object)
    }
}

/// Current contents are compared, not the key.
impl<T, VM, NM> PartialEq for ObjectSet<T, VM, NM> {
    fn eq(&self, other: &Self) -> bool {
        self.term_set() == other.term_set()
    }
}

impl<T, VM, NM> Eq for ObjectSet<T, VM, NM> {}

impl<T, VM, NM> Hash for ObjectSet<T, VM, NM> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let terms = self.term_set();

        // Order-independent: sum of element hashes
        let sum = terms.iter().fold(0u64, |acc, term| {
            let mut hasher = FxHasher::default();
            term.hash(&mut hasher);
            acc.wrapping_add(hasher.finish())
        });

        state.write_usize(terms.len());
        state.write_u64(sum);
    }
}

impl<T, VM, NM> fmt::Debug for ObjectSet<T, VM, NM> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectSet")
            .field("subject", &self.subject)
            .field("predicate", &self.predicate)
            .field("objects", &self.terms())
            .finish()
    }
}
