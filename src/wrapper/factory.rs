//! Projection factories and the per-graph personality
//!
//! A [`Personality`] is the registry of wrapper kinds a graph knows how to
//! project nodes into. It belongs to one [`Graph`]; there is no process-wide
//! registry, so two graphs can give the same node different kinds.

use super::resource::{Resource, WrapperResource};
use crate::error::{WrapError, WrapResult};
use crate::graph::Graph;
use crate::rdf::{RdfSubject, RdfTerm};
use indexmap::IndexMap;
use rustc_hash::FxBuildHasher;
use std::any::{Any, TypeId};
use std::sync::Arc;
use tracing::debug;

/// Factory accepting IRI and blank nodes, rejecting literals
pub struct UriOrBlankFactory<W> {
    factory: fn(Resource) -> W,
}

impl<W> UriOrBlankFactory<W> {
    pub fn new(factory: fn(Resource) -> W) -> Self {
        Self { factory }
    }

    /// Only IRI and blank nodes can be wrapped
    pub fn can_wrap(&self, node: &RdfTerm, _graph: &Graph) -> bool {
        match node {
            RdfTerm::NamedNode(_) | RdfTerm::BlankNode(_) => true,
            RdfTerm::Literal(_) => false,
        }
    }

    /// Bind `node` in `graph` to a new wrapper
    pub fn wrap(&self, node: &RdfTerm, graph: &Graph) -> WrapResult<W> {
        if !self.can_wrap(node, graph) {
            return Err(WrapError::ResourceRequired(node.to_string()));
        }

        let subject = RdfSubject::try_from(node.clone())?;

        Ok((self.factory)(Resource::new(subject, graph.clone())))
    }
}

impl<W> Clone for UriOrBlankFactory<W> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<W> Copy for UriOrBlankFactory<W> {}

/// Type-erased view of a factory, used for dispatch
trait Implementation: Send + Sync {
    fn kind(&self) -> &'static str;

    fn can_wrap(&self, node: &RdfTerm, graph: &Graph) -> bool;

    fn as_any(&self) -> &dyn Any;
}

impl<W: 'static> Implementation for UriOrBlankFactory<W> {
    fn kind(&self) -> &'static str {
        std::any::type_name::<W>()
    }

    fn can_wrap(&self, node: &RdfTerm, graph: &Graph) -> bool {
        UriOrBlankFactory::can_wrap(self, node, graph)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Registry of wrapper kinds, in registration order
#[derive(Default)]
pub struct Personality {
    implementations: IndexMap<TypeId, Arc<dyn Implementation>, FxBuildHasher>,
}

impl Personality {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) the factory for `W`
    pub fn add<W: 'static>(&mut self, factory: UriOrBlankFactory<W>) -> &mut Self {
        let kind = std::any::type_name::<W>();
        if self
            .implementations
            .insert(TypeId::of::<W>(), Arc::new(factory))
            .is_some()
        {
            debug!(kind, "replaced wrapper implementation");
        } else {
            debug!(kind, "registered wrapper implementation");
        }
        self
    }

    /// The factory registered for `W`
    pub fn implementation<W: 'static>(&self) -> Option<UriOrBlankFactory<W>> {
        self.implementations
            .get(&TypeId::of::<W>())
            .and_then(|implementation| {
                implementation
                    .as_any()
                    .downcast_ref::<UriOrBlankFactory<W>>()
                    .copied()
            })
    }

    pub fn contains<W: 'static>(&self) -> bool {
        self.implementations.contains_key(&TypeId::of::<W>())
    }

    /// Names of every registered kind able to wrap `node`
    pub fn eligible_kinds(&self, node: &RdfTerm, graph: &Graph) -> Vec<&'static str> {
        self.implementations
            .values()
            .filter(|implementation| implementation.can_wrap(node, graph))
            .map(|implementation| implementation.kind())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.implementations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.implementations.is_empty()
    }
}
