//! Typed views over whole graphs
//!
//! A [`WrapperGraph`] is to a graph what a [`WrapperResource`] is to a node.
//! Implementors register the resource kinds they hand out when wrapping, and
//! use the `optional_first_*` lookups to find entry points.

use super::resource::WrapperResource;
use crate::error::WrapResult;
use crate::graph::Graph;
use crate::rdf::{NamedNode, RdfObject, RdfPredicate, RdfTerm, Triple};
use oxrdf::vocab::rdf;

/// Typed view over a graph
pub trait WrapperGraph: Sized {
    /// Bind a view to `graph`, registering the kinds it projects into
    fn wrap(graph: Graph) -> Self;

    fn graph(&self) -> &Graph;

    /// First subject typed (`rdf:type`) with any of `classes`, as `W`
    fn optional_first_instance_of_either<W: WrapperResource>(
        &self,
        classes: &[&str],
    ) -> WrapResult<Option<W>> {
        let rdf_type = RdfPredicate::from(rdf::TYPE);
        let classes = named_nodes(classes)?;

        let subject = first_match(self.graph(), |triple| {
            triple.predicate == rdf_type
                && matches!(&triple.object, RdfObject::NamedNode(class) if classes.contains(class))
        })
        .map(|triple| RdfTerm::from(triple.subject));

        project(self.graph(), subject)
    }

    /// First subject of a statement with any of `predicates`, as `W`
    fn optional_first_subject_of_either<W: WrapperResource>(
        &self,
        predicates: &[&str],
    ) -> WrapResult<Option<W>> {
        let predicates = predicates_of(predicates)?;

        let subject = first_match(self.graph(), |triple| predicates.contains(&triple.predicate))
            .map(|triple| RdfTerm::from(triple.subject));

        project(self.graph(), subject)
    }

    /// First object of a statement with any of `predicates`, as `W`.
    ///
    /// A literal object fails with `ResourceRequired`.
    fn optional_first_object_of_either<W: WrapperResource>(
        &self,
        predicates: &[&str],
    ) -> WrapResult<Option<W>> {
        let predicates = predicates_of(predicates)?;

        let object = first_match(self.graph(), |triple| predicates.contains(&triple.predicate))
            .map(|triple| RdfTerm::from(triple.object));

        project(self.graph(), object)
    }
}

impl WrapperGraph for Graph {
    fn wrap(graph: Graph) -> Self {
        graph
    }

    fn graph(&self) -> &Graph {
        self
    }
}

fn named_nodes(iris: &[&str]) -> WrapResult<Vec<NamedNode>> {
    iris.iter()
        .map(|iri| NamedNode::new(iri).map_err(Into::into))
        .collect()
}

fn predicates_of(iris: &[&str]) -> WrapResult<Vec<RdfPredicate>> {
    Ok(named_nodes(iris)?.into_iter().map(RdfPredicate::from).collect())
}

fn first_match(graph: &Graph, predicate: impl Fn(&Triple) -> bool) -> Option<Triple> {
    graph.read().iter().find(|triple| predicate(triple)).cloned()
}

fn project<W: WrapperResource>(graph: &Graph, node: Option<RdfTerm>) -> WrapResult<Option<W>> {
    node.map(|node| graph.project::<W>(&node)).transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::WrapError;
    use crate::rdf::{Literal, RdfSubject};
    use crate::wrapper::Resource;

    fn graph() -> Graph {
        let graph = Graph::new();
        graph.register::<Resource>();

        let s: RdfSubject = NamedNode::new("urn:example:s").unwrap().into();
        graph.insert(Triple::new(
            s.clone(),
            rdf::TYPE.into(),
            NamedNode::new("urn:example:C").unwrap().into(),
        ));
        graph.insert(Triple::new(
            s.clone(),
            RdfPredicate::new("urn:example:knows").unwrap(),
            NamedNode::new("urn:example:o").unwrap().into(),
        ));
        graph.insert(Triple::new(
            s,
            RdfPredicate::new("urn:example:name").unwrap(),
            Literal::new_simple_literal("s").into(),
        ));
        graph
    }

    fn iri_of(resource: &Resource) -> String {
        resource.node().to_string()
    }

    #[test]
    fn test_first_instance_of_either() {
        let graph = graph();

        let found: Option<Resource> = graph
            .optional_first_instance_of_either(&["urn:example:X", "urn:example:C"])
            .unwrap();
        assert_eq!(found.map(|r| iri_of(&r)).as_deref(), Some("<urn:example:s>"));

        let missing: Option<Resource> = graph
            .optional_first_instance_of_either(&["urn:example:X"])
            .unwrap();
        assert!(missing.is_none());
    }

    #[test]
    fn test_first_subject_and_object_of_either() {
        let graph = graph();

        let subject: Option<Resource> = graph
            .optional_first_subject_of_either(&["urn:example:knows"])
            .unwrap();
        assert_eq!(subject.map(|r| iri_of(&r)).as_deref(), Some("<urn:example:s>"));

        let object: Option<Resource> = graph
            .optional_first_object_of_either(&["urn:example:knows"])
            .unwrap();
        assert_eq!(object.map(|r| iri_of(&r)).as_deref(), Some("<urn:example:o>"));

        let literal = graph.optional_first_object_of_either::<Resource>(&["urn:example:name"]);
        assert!(matches!(literal, Err(WrapError::ResourceRequired(_))));
    }

    #[test]
    fn test_invalid_iris_are_reported() {
        let graph = graph();

        assert!(graph
            .optional_first_subject_of_either::<Resource>(&["not an iri"])
            .is_err());
    }
}
