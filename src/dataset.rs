//! Default graph plus named graphs
//!
//! Quads are routed by their graph name: `None` goes to the default graph,
//! a name goes to the named graph of that IRI, created on first use.
//! Lookups by name do not create anything.

use crate::graph::Graph;
use crate::rdf::{NamedNode, Quad, RdfStoreError, RdfStoreResult};
use indexmap::IndexMap;
use tracing::debug;

/// A collection of graphs: one default, any number named
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    default_graph: Graph,
    named_graphs: IndexMap<NamedNode, Graph>,
}

impl Dataset {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a dataset around an existing default graph
    pub fn with_default_graph(graph: Graph) -> Self {
        Self {
            default_graph: graph,
            named_graphs: IndexMap::new(),
        }
    }

    pub fn default_graph(&self) -> &Graph {
        &self.default_graph
    }

    /// The named graph `name`, or `GraphNotFound`
    pub fn named_graph(&self, name: &NamedNode) -> RdfStoreResult<&Graph> {
        self.named_graphs
            .get(name)
            .ok_or_else(|| RdfStoreError::GraphNotFound(name.to_string()))
    }

    /// The named graph `name`, created empty if missing
    pub fn named_graph_or_create(&mut self, name: NamedNode) -> &Graph {
        self.named_graphs.entry(name).or_insert_with_key(|name| {
            debug!(graph = %name, "created named graph");
            Graph::new()
        })
    }

    /// Attach an existing graph under `name`, returning the one it replaced
    pub fn insert_named_graph(&mut self, name: NamedNode, graph: Graph) -> Option<Graph> {
        self.named_graphs.insert(name, graph)
    }

    pub fn remove_named_graph(&mut self, name: &NamedNode) -> Option<Graph> {
        self.named_graphs.shift_remove(name)
    }

    /// Names of the named graphs, in creation order
    pub fn graph_names(&self) -> impl Iterator<Item = &NamedNode> {
        self.named_graphs.keys()
    }

    /// Assert a quad in the graph it names. Returns `false` if already asserted.
    pub fn insert_quad(&mut self, quad: Quad) -> bool {
        let triple = quad.as_triple();
        match quad.graph {
            Some(name) => self.named_graph_or_create(name).insert(triple),
            None => self.default_graph.insert(triple),
        }
    }

    /// Retract a quad. Returns `false` if it was not asserted.
    pub fn remove_quad(&self, quad: &Quad) -> bool {
        match &quad.graph {
            Some(name) => self
                .named_graphs
                .get(name)
                .is_some_and(|graph| graph.remove(&quad.as_triple())),
            None => self.default_graph.remove(&quad.as_triple()),
        }
    }

    pub fn contains_quad(&self, quad: &Quad) -> bool {
        match &quad.graph {
            Some(name) => self
                .named_graphs
                .get(name)
                .is_some_and(|graph| graph.contains(&quad.as_triple())),
            None => self.default_graph.contains(&quad.as_triple()),
        }
    }

    /// Total number of quads across every graph
    pub fn len(&self) -> usize {
        self.default_graph.len() + self.named_graphs.values().map(Graph::len).sum::<usize>()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
