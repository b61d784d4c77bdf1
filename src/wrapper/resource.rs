//! Resource wrappers and their cardinality-aware accessors
//!
//! A wrapper is bound to one (node, graph) pair and caches nothing: every
//! accessor call goes back to the graph. Types that want a typed view over a
//! node implement [`WrapperResource`] (two methods) and get all accessors.
//!
//! ```rust
//! use samyama_rdf_wrapping::mapping::{node, value};
//! use samyama_rdf_wrapping::rdf::{NamedNode, RdfPredicate};
//! use samyama_rdf_wrapping::{Graph, Resource, WrapResult, WrapperResource};
//!
//! #[derive(Debug, Clone, PartialEq, Eq, Hash)]
//! struct Person(Resource);
//!
//! impl WrapperResource for Person {
//!     fn wrap(resource: Resource) -> Self {
//!         Person(resource)
//!     }
//!
//!     fn resource(&self) -> &Resource {
//!         &self.0
//!     }
//! }
//!
//! impl Person {
//!     fn name(&self) -> WrapResult<Option<String>> {
//!         let p = RdfPredicate::new("http://xmlns.com/foaf/0.1/name")?;
//!         self.single_or_null(&p, value::literal_as_string)
//!     }
//!
//!     fn set_name(&self, name: String) -> WrapResult<()> {
//!         let p = RdfPredicate::new("http://xmlns.com/foaf/0.1/name")?;
//!         self.overwrite(&p, name, node::as_string_literal)
//!     }
//! }
//!
//! let graph = Graph::new();
//! graph.register::<Person>();
//!
//! let alice: Person = graph
//!     .project(&NamedNode::new("http://example.org/alice").unwrap().into())
//!     .unwrap();
//! alice.set_name("Alice".to_string()).unwrap();
//! assert_eq!(alice.name().unwrap().as_deref(), Some("Alice"));
//! ```

use super::object_set::ObjectSet;
use crate::error::{WrapError, WrapResult};
use crate::graph::{Graph, GraphNode};
use crate::mapping::{NodeMapping, ValueMapping};
use crate::rdf::{RdfObject, RdfPredicate, RdfSubject};
use indexmap::IndexSet;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use tracing::debug;

/// A node bound to the graph it is read from and written to.
///
/// Equality and hashing look at the node only: two resources built
/// independently over the same node are equal.
#[derive(Clone)]
pub struct Resource {
    node: RdfSubject,
    graph: Graph,
}

impl Resource {
    pub fn new(node: RdfSubject, graph: Graph) -> Self {
        Self { node, graph }
    }

    pub fn node(&self) -> &RdfSubject {
        &self.node
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// The node as a graph-attached term
    pub fn as_graph_node(&self) -> GraphNode {
        GraphNode::attached(self.node.clone(), self.graph.clone())
    }
}

impl PartialEq for Resource {
    fn eq(&self, other: &Self) -> bool {
        self.node == other.node
    }
}

impl Eq for Resource {}

impl Hash for Resource {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.node.hash(state);
    }
}

impl fmt::Debug for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Resource").field(&self.node).finish()
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.node)
    }
}

impl From<Resource> for RdfObject {
    fn from(resource: Resource) -> Self {
        resource.node.into()
    }
}

/// Lazy mapping over a call-time snapshot of objects
pub struct ObjectIterator<T, M> {
    objects: std::vec::IntoIter<RdfObject>,
    graph: Graph,
    mapping: M,
    _marker: PhantomData<fn() -> T>,
}

impl<T, M: ValueMapping<T>> ObjectIterator<T, M> {
    pub(crate) fn new(objects: Vec<RdfObject>, graph: Graph, mapping: M) -> Self {
        Self {
            objects: objects.into_iter(),
            graph,
            mapping,
            _marker: PhantomData,
        }
    }
}

impl<T, M: ValueMapping<T>> Iterator for ObjectIterator<T, M> {
    type Item = WrapResult<T>;

    fn next(&mut self) -> Option<Self::Item> {
        self.objects
            .next()
            .map(|object| self.mapping.map_value(&object, &self.graph))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.objects.size_hint()
    }
}

impl<T, M: ValueMapping<T>> ExactSizeIterator for ObjectIterator<T, M> {}

fn required<T>(value: impl Into<Option<T>>, predicate: &RdfPredicate) -> WrapResult<T> {
    value.into().ok_or_else(|| WrapError::NullValue {
        predicate: predicate.to_string(),
    })
}

fn all_required<T, V>(
    values: impl IntoIterator<Item = V>,
    predicate: &RdfPredicate,
) -> WrapResult<Vec<T>>
where
    V: Into<Option<T>>,
{
    values
        .into_iter()
        .map(|value| required(value, predicate))
        .collect()
}

/// Typed view over a node.
///
/// Implementors provide [`wrap`](WrapperResource::wrap) and
/// [`resource`](WrapperResource::resource); the accessors are provided.
///
/// Write methods accept anything convertible into `Option<T>`: a plain `T`,
/// or an `Option<T>` whose `None` is rejected as [`WrapError::NullValue`]
/// (or, for the `_nullable` variants, means "assert nothing").
pub trait WrapperResource: Sized + 'static {
    fn wrap(resource: Resource) -> Self;

    fn resource(&self) -> &Resource;

    /// Any one mapped object, `None` when there is none. Which one is picked
    /// among several is unspecified.
    fn any_or_null<T, M>(&self, p: &RdfPredicate, m: M) -> WrapResult<Option<T>>
    where
        M: ValueMapping<T>,
    {
        let resource = self.resource();
        let objects = resource.graph.objects(&resource.node, p);

        objects
            .first()
            .map(|object| m.map_value(object, &resource.graph))
            .transpose()
    }

    /// Any one mapped object, `NotFound` when there is none
    fn any_or_throw<T, M>(&self, p: &RdfPredicate, m: M) -> WrapResult<T>
    where
        M: ValueMapping<T>,
    {
        self.any_or_null(p, m)?
            .ok_or_else(|| not_found(self.resource(), p))
    }

    /// The only mapped object, `None` when there is none, `MultipleValues`
    /// when there are several
    fn single_or_null<T, M>(&self, p: &RdfPredicate, m: M) -> WrapResult<Option<T>>
    where
        M: ValueMapping<T>,
    {
        let resource = self.resource();
        let objects = resource.graph.objects(&resource.node, p);

        match objects.as_slice() {
            [] => Ok(None),
            [object] => m.map_value(object, &resource.graph).map(Some),
            _ => Err(WrapError::MultipleValues {
                subject: resource.node.to_string(),
                predicate: p.to_string(),
            }),
        }
    }

    /// The only mapped object, `NotFound` when there is none,
    /// `MultipleValues` when there are several
    fn single_or_throw<T, M>(&self, p: &RdfPredicate, m: M) -> WrapResult<T>
    where
        M: ValueMapping<T>,
    {
        self.single_or_null(p, m)?
            .ok_or_else(|| not_found(self.resource(), p))
    }

    /// Mapped objects, lazily, over a snapshot taken now
    fn object_iterator<T, M>(&self, p: &RdfPredicate, m: M) -> ObjectIterator<T, M>
    where
        M: ValueMapping<T>,
    {
        let resource = self.resource();
        let objects = resource.graph.objects(&resource.node, p);

        ObjectIterator::new(objects, resource.graph.clone(), m)
    }

    /// Same as [`object_iterator`](WrapperResource::object_iterator), as an
    /// opaque iterator for adaptor chains
    fn object_stream<T, M>(&self, p: &RdfPredicate, m: M) -> impl Iterator<Item = WrapResult<T>>
    where
        M: ValueMapping<T>,
    {
        self.object_iterator(p, m)
    }

    /// Deduplicated snapshot of the mapped objects. Later graph changes are
    /// not reflected.
    fn objects_read_only<T, M>(&self, p: &RdfPredicate, m: M) -> WrapResult<IndexSet<T>>
    where
        T: Hash + Eq,
        M: ValueMapping<T>,
    {
        self.object_iterator(p, m).collect()
    }

    /// Live set view over the objects of `p`
    fn objects<T, NM, VM>(
        &self,
        p: &RdfPredicate,
        node_mapping: NM,
        value_mapping: VM,
    ) -> WrapResult<ObjectSet<T, VM, NM>>
    where
        NM: NodeMapping<T>,
        VM: ValueMapping<T>,
    {
        ObjectSet::new(
            &self.resource().as_graph_node(),
            &p.clone().into(),
            value_mapping,
            node_mapping,
        )
    }

    /// Replace every object of `p` with `value`
    fn overwrite<T, V, M>(&self, p: &RdfPredicate, value: V, m: M) -> WrapResult<()>
    where
        V: Into<Option<T>>,
        M: NodeMapping<T>,
    {
        let value = required(value, p)?;
        replace(self.resource(), p, &[value], &m)
    }

    /// Replace every object of `p` with `values`. Nothing is removed if any
    /// element is absent.
    fn overwrite_all<T, I, V, M>(&self, p: &RdfPredicate, values: I, m: M) -> WrapResult<()>
    where
        I: IntoIterator<Item = V>,
        V: Into<Option<T>>,
        M: NodeMapping<T>,
    {
        let values = all_required(values, p)?;
        replace(self.resource(), p, &values, &m)
    }

    /// Like [`overwrite`](WrapperResource::overwrite), but an absent value
    /// only removes
    fn overwrite_nullable<T, V, M>(&self, p: &RdfPredicate, value: V, m: M) -> WrapResult<()>
    where
        V: Into<Option<T>>,
        M: NodeMapping<T>,
    {
        let values: Vec<T> = value.into().into_iter().collect();
        replace(self.resource(), p, &values, &m)
    }

    /// Like [`overwrite_all`](WrapperResource::overwrite_all), but an absent
    /// collection only removes. Absent elements are still rejected.
    fn overwrite_all_nullable<T, I, V, M>(
        &self,
        p: &RdfPredicate,
        values: Option<I>,
        m: M,
    ) -> WrapResult<()>
    where
        I: IntoIterator<Item = V>,
        V: Into<Option<T>>,
        M: NodeMapping<T>,
    {
        let values = match values {
            Some(values) => all_required(values, p)?,
            None => Vec::new(),
        };
        replace(self.resource(), p, &values, &m)
    }

    /// Assert `value` as an additional object of `p`
    fn add<T, V, M>(&self, p: &RdfPredicate, value: V, m: M) -> WrapResult<()>
    where
        V: Into<Option<T>>,
        M: NodeMapping<T>,
    {
        let value = required(value, p)?;
        append(self.resource(), p, &[value], &m)
    }

    /// Assert every element of `values` as additional objects of `p`
    fn add_all<T, I, V, M>(&self, p: &RdfPredicate, values: I, m: M) -> WrapResult<()>
    where
        I: IntoIterator<Item = V>,
        V: Into<Option<T>>,
        M: NodeMapping<T>,
    {
        let values = all_required(values, p)?;
        append(self.resource(), p, &values, &m)
    }
}

impl WrapperResource for Resource {
    fn wrap(resource: Resource) -> Self {
        resource
    }

    fn resource(&self) -> &Resource {
        self
    }
}

fn not_found(resource: &Resource, p: &RdfPredicate) -> WrapError {
    WrapError::NotFound {
        subject: resource.node.to_string(),
        predicate: p.to_string(),
    }
}

fn to_nodes<T, M: NodeMapping<T>>(
    resource: &Resource,
    values: &[T],
    m: &M,
) -> WrapResult<Vec<RdfObject>> {
    values
        .iter()
        .map(|value| m.map_node(value, &resource.graph))
        .collect()
}

fn replace<T, M: NodeMapping<T>>(
    resource: &Resource,
    p: &RdfPredicate,
    values: &[T],
    m: &M,
) -> WrapResult<()> {
    let objects = to_nodes(resource, values, m)?;
    debug!(subject = %resource.node, predicate = %p, count = objects.len(), "overwrite");
    resource.graph.replace_objects(&resource.node, p, objects);
    Ok(())
}

fn append<T, M: NodeMapping<T>>(
    resource: &Resource,
    p: &RdfPredicate,
    values: &[T],
    m: &M,
) -> WrapResult<()> {
    let objects = to_nodes(resource, values, m)?;
    let added = resource.graph.insert_objects(&resource.node, p, objects);
    debug!(subject = %resource.node, predicate = %p, added, "add");
    Ok(())
}
