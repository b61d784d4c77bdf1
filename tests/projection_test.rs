use samyama_rdf_wrapping::mapping::{node, value};
use samyama_rdf_wrapping::rdf::{BlankNode, Literal, NamedNode, Quad, RdfPredicate, RdfTerm};
use samyama_rdf_wrapping::{
    Dataset, Graph, Personality, Resource, UriOrBlankFactory, WrapError, WrapResult,
    WrapperDataset, WrapperGraph, WrapperResource,
};

const TYPE_PERSON: &str = "http://xmlns.com/foaf/0.1/Person";
const KNOWS: &str = "http://xmlns.com/foaf/0.1/knows";

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct Person(Resource);

impl WrapperResource for Person {
    fn wrap(resource: Resource) -> Self {
        Person(resource)
    }

    fn resource(&self) -> &Resource {
        &self.0
    }
}

impl Person {
    fn knows(&self) -> WrapResult<Vec<Person>> {
        let p = RdfPredicate::new(KNOWS)?;
        self.object_iterator(&p, value::as_resource::<Person>).collect()
    }

    fn add_knows(&self, other: &Person) -> WrapResult<()> {
        let p = RdfPredicate::new(KNOWS)?;
        self.add(&p, other.clone(), node::as_resource_node::<Person>)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct Document(Resource);

impl WrapperResource for Document {
    fn wrap(resource: Resource) -> Self {
        Document(resource)
    }

    fn resource(&self) -> &Resource {
        &self.0
    }
}

/// Typed graph registering the kinds it hands out
struct People(Graph);

impl WrapperGraph for People {
    fn wrap(graph: Graph) -> Self {
        graph.register::<Person>();
        People(graph)
    }

    fn graph(&self) -> &Graph {
        &self.0
    }
}

impl People {
    fn first_person(&self) -> WrapResult<Option<Person>> {
        self.optional_first_instance_of_either(&[TYPE_PERSON])
    }
}

#[test]
fn test_projecting_a_literal_requires_a_resource() {
    let graph = Graph::new();
    graph.register::<Person>();

    let literal = RdfTerm::from(Literal::new_simple_literal("alice"));
    assert!(!graph.can_project::<Person>(&literal));
    assert!(matches!(
        graph.project::<Person>(&literal),
        Err(WrapError::ResourceRequired(_))
    ));
}

#[test]
fn test_iri_and_blank_nodes_can_be_projected() {
    let graph = Graph::new();
    graph.register::<Person>();

    let iri = RdfTerm::from(NamedNode::new("urn:example:alice").unwrap());
    let blank = RdfTerm::from(BlankNode::new());

    assert!(graph.can_project::<Person>(&iri));
    assert!(graph.can_project::<Person>(&blank));

    let alice = graph.project::<Person>(&iri).unwrap();
    let anonymous = graph.project::<Person>(&blank).unwrap();
    assert!(alice.resource().graph().ptr_eq(&graph));
    assert_ne!(alice, anonymous);
}

#[test]
fn test_unregistered_kinds_are_unsupported() {
    let graph = Graph::new();
    graph.register::<Person>();

    let iri = RdfTerm::from(NamedNode::new("urn:example:doc").unwrap());
    assert!(!graph.can_project::<Document>(&iri));
    assert!(matches!(
        graph.project::<Document>(&iri),
        Err(WrapError::UnsupportedProjection(_))
    ));

    // Personalities are per graph
    let other = Graph::new();
    other.register::<Document>();
    assert!(other.project::<Document>(&iri).is_ok());
    assert!(graph.project::<Document>(&iri).is_err());
}

#[test]
fn test_personality_lists_eligible_kinds() {
    let graph = Graph::new();
    let mut personality = Personality::new();
    personality
        .add(UriOrBlankFactory::new(Person::wrap))
        .add(UriOrBlankFactory::new(Document::wrap));

    let iri = RdfTerm::from(NamedNode::new("urn:example:x").unwrap());
    let kinds = personality.eligible_kinds(&iri, &graph);
    assert_eq!(kinds.len(), 2);
    assert!(kinds[0].ends_with("Person"));
    assert!(kinds[1].ends_with("Document"));

    let literal = RdfTerm::from(Literal::new_simple_literal("x"));
    assert!(personality.eligible_kinds(&literal, &graph).is_empty());
}

#[test]
fn test_resource_valued_properties() {
    let graph = Graph::new();
    graph.register::<Person>();

    let alice: Person = graph.project(graph.create_iri("urn:example:alice").unwrap().term()).unwrap();
    let bob: Person = graph.project(graph.create_blank_node().term()).unwrap();

    alice.add_knows(&bob).unwrap();
    assert_eq!(alice.knows().unwrap(), vec![bob.clone()]);
    assert!(bob.knows().unwrap().is_empty());
}

#[test]
fn test_graph_wrapper_finds_entry_points() {
    let people = People::wrap(Graph::new());
    assert_eq!(people.first_person().unwrap(), None);

    let alice = people
        .graph()
        .project::<Person>(people.graph().create_iri("urn:example:alice").unwrap().term())
        .unwrap();
    alice
        .add(
            &RdfPredicate::from(oxrdf::vocab::rdf::TYPE),
            TYPE_PERSON.to_string(),
            node::as_iri::<String>,
        )
        .unwrap();

    assert_eq!(people.first_person().unwrap(), Some(alice));
}

#[test]
fn test_dataset_wrapper_hands_out_graph_wrappers() {
    let mut dataset = Dataset::new();
    let name = NamedNode::new("urn:example:people").unwrap();
    dataset.insert_quad(Quad::new(
        NamedNode::new("urn:example:alice").unwrap().into(),
        oxrdf::vocab::rdf::TYPE.into(),
        NamedNode::new(TYPE_PERSON).unwrap().into(),
        Some(name),
    ));

    let default: People = WrapperDataset::default_graph(&dataset);
    assert_eq!(default.first_person().unwrap(), None);

    let named: People = WrapperDataset::named_graph(&dataset, "urn:example:people").unwrap();
    assert!(named.first_person().unwrap().is_some());

    assert!(matches!(
        WrapperDataset::named_graph::<People>(&dataset, "urn:example:nobody"),
        Err(WrapError::Store(_))
    ));
}
