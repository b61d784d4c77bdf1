//! In-memory triple store
//!
//! The store is a *set* of statements: asserting the same triple twice
//! leaves one statement behind. Two indices cover the access shapes of the
//! wrapping layer without scanning:
//! - subject → predicate → objects, for every property access
//! - predicate → object → subjects, for type membership lookups

use super::types::{RdfObject, RdfPredicate, RdfSubject, Triple, TriplePattern};
use indexmap::IndexSet;
use rustc_hash::FxHashMap;
use std::hash::Hash;
use thiserror::Error;

/// RDF store errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RdfStoreError {
    /// No named graph with that IRI
    #[error("Graph not found: {0}")]
    GraphNotFound(String),
}

pub type RdfStoreResult<T> = Result<T, RdfStoreError>;

/// Two-level index; inner sets keep insertion order
type Index<A, B, C> = FxHashMap<A, FxHashMap<B, IndexSet<C>>>;

fn index_insert<A, B, C>(index: &mut Index<A, B, C>, a: &A, b: &B, c: &C)
where
    A: Hash + Eq + Clone,
    B: Hash + Eq + Clone,
    C: Hash + Eq + Clone,
{
    index
        .entry(a.clone())
        .or_default()
        .entry(b.clone())
        .or_default()
        .insert(c.clone());
}

/// Remove `c` under (a, b), pruning levels left empty
fn index_remove<A, B, C>(index: &mut Index<A, B, C>, a: &A, b: &B, c: &C)
where
    A: Hash + Eq,
    B: Hash + Eq,
    C: Hash + Eq,
{
    let Some(level) = index.get_mut(a) else {
        return;
    };
    if let Some(leaves) = level.get_mut(b) {
        leaves.swap_remove(c);
        if leaves.is_empty() {
            level.remove(b);
        }
    }
    if level.is_empty() {
        index.remove(a);
    }
}

fn index_get<'a, A, B, C>(index: &'a Index<A, B, C>, a: &A, b: &B) -> Option<&'a IndexSet<C>>
where
    A: Hash + Eq,
    B: Hash + Eq,
{
    index.get(a).and_then(|level| level.get(b))
}

/// Indexed set of triples
#[derive(Debug, Clone, Default)]
pub struct RdfStore {
    /// Every statement, in insertion order
    triples: IndexSet<Triple>,
    by_subject: Index<RdfSubject, RdfPredicate, RdfObject>,
    by_predicate: Index<RdfPredicate, RdfObject, RdfSubject>,
}

impl RdfStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assert a statement. Returns `false` if it was already asserted.
    pub fn insert(&mut self, triple: Triple) -> bool {
        let Triple {
            subject,
            predicate,
            object,
        } = &triple;
        index_insert(&mut self.by_subject, subject, predicate, object);
        index_insert(&mut self.by_predicate, predicate, object, subject);

        self.triples.insert(triple)
    }

    /// Retract a statement. Returns `false` if it was not asserted.
    pub fn remove(&mut self, triple: &Triple) -> bool {
        if !self.triples.swap_remove(triple) {
            return false;
        }

        let Triple {
            subject,
            predicate,
            object,
        } = triple;
        index_remove(&mut self.by_subject, subject, predicate, object);
        index_remove(&mut self.by_predicate, predicate, object, subject);
        true
    }

    pub fn contains(&self, triple: &Triple) -> bool {
        self.triples.contains(triple)
    }

    /// Same as [`contains`](RdfStore::contains), without building a triple
    pub fn contains_statement(
        &self,
        subject: &RdfSubject,
        predicate: &RdfPredicate,
        object: &RdfObject,
    ) -> bool {
        index_get(&self.by_subject, subject, predicate).is_some_and(|objects| objects.contains(object))
    }

    pub fn len(&self) -> usize {
        self.triples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triples.is_empty()
    }

    /// Objects of (subject, predicate), in insertion order
    pub fn objects(&self, subject: &RdfSubject, predicate: &RdfPredicate) -> Vec<RdfObject> {
        index_get(&self.by_subject, subject, predicate)
            .map(|objects| objects.iter().cloned().collect())
            .unwrap_or_default()
    }

    pub fn object_count(&self, subject: &RdfSubject, predicate: &RdfPredicate) -> usize {
        index_get(&self.by_subject, subject, predicate).map_or(0, IndexSet::len)
    }

    /// Retract every statement of (subject, predicate). Returns how many went.
    pub fn remove_objects(&mut self, subject: &RdfSubject, predicate: &RdfPredicate) -> usize {
        self.objects(subject, predicate)
            .into_iter()
            .filter(|object| {
                self.remove(&Triple::new(subject.clone(), predicate.clone(), object.clone()))
            })
            .count()
    }

    /// Subjects of (predicate, object), in insertion order
    pub fn subjects_with(&self, predicate: &RdfPredicate, object: &RdfObject) -> Vec<RdfSubject> {
        index_get(&self.by_predicate, predicate, object)
            .map(|subjects| subjects.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Statements matching `pattern`. A bound subject and predicate use the
    /// index; anything else scans.
    pub fn query(&self, pattern: &TriplePattern) -> Vec<Triple> {
        match (&pattern.subject, &pattern.predicate) {
            (Some(subject), Some(predicate)) => self
                .objects(subject, predicate)
                .into_iter()
                .map(|object| Triple::new(subject.clone(), predicate.clone(), object))
                .filter(|triple| pattern.matches(triple))
                .collect(),
            _ => self
                .triples
                .iter()
                .filter(|triple| pattern.matches(triple))
                .cloned()
                .collect(),
        }
    }

    /// Every statement, in insertion order (removals may reorder)
    pub fn iter(&self) -> impl Iterator<Item = &Triple> {
        self.triples.iter()
    }
}
