use anyhow::{Context, Result};
use samyama_rdf_wrapping::mapping::{node, value};
use samyama_rdf_wrapping::rdf::RdfPredicate;
use samyama_rdf_wrapping::{
    DefinitionSet, DynamicResource, Graph, PropertyValue, Resource, WrapResult, WrapperGraph,
    WrapperResource,
};
use std::sync::Arc;
use tracing::info;

const FOAF: &str = "http://xmlns.com/foaf/0.1/";

const PEOPLE: &str = r#"
prefixes:
  ex: "http://example.org/"
resources:
  person:
    properties:
      name:
        predicate: foaf:name
        cardinality: single_or_null
        value_mapping: literal_as_string
      set_name:
        predicate: foaf:name
        cardinality: overwrite
        node_mapping: as_string_literal
      knows:
        predicate: foaf:knows
        cardinality: objects_read_only
        resource: person
      add_knows:
        predicate: foaf:knows
        cardinality: add
"#;

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
    fn name(&self) -> WrapResult<Option<String>> {
        self.single_or_null(&foaf("name")?, value::literal_as_string)
    }

    fn set_name(&self, name: &str) -> WrapResult<()> {
        self.overwrite(&foaf("name")?, name.to_string(), node::as_string_literal)
    }

    fn nicks(&self) -> WrapResult<Vec<String>> {
        self.object_iterator(&foaf("nick")?, value::literal_as_string)
            .collect()
    }

    fn add_nick(&self, nick: &str) -> WrapResult<()> {
        self.add(&foaf("nick")?, nick.to_string(), node::as_string_literal)
    }

    fn add_friend(&self, friend: &Person) -> WrapResult<()> {
        self.add(&foaf("knows")?, friend.clone(), node::as_resource_node::<Person>)
    }
}

fn foaf(local: &str) -> WrapResult<RdfPredicate> {
    Ok(RdfPredicate::new(&format!("{FOAF}{local}"))?)
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    println!("Samyama RDF Wrapping v{}", samyama_rdf_wrapping::version());
    println!("==========================================");
    println!();

    demo_typed_wrappers()?;
    demo_definitions(std::env::args().nth(1))?;

    Ok(())
}

fn demo_typed_wrappers() -> Result<()> {
    println!("=== Demo 1: Typed wrappers ===");
    let graph = Graph::new();
    graph.register::<Person>();

    let alice: Person = graph.project(graph.create_iri("http://example.org/alice")?.term())?;
    let bob: Person = graph.project(graph.create_blank_node().term())?;

    alice.set_name("Alice")?;
    alice.add_nick("al")?;
    alice.add_nick("ally")?;
    bob.set_name("Bob")?;
    alice.add_friend(&bob)?;

    println!("✓ {} has nicks {:?}", alice.name()?.unwrap_or_default(), alice.nicks()?);

    let friends = alice.objects(
        &foaf("knows")?,
        node::as_resource_node::<Person>,
        value::as_resource::<Person>,
    )?;
    for friend in friends.iter() {
        println!("✓ Alice knows {}", friend?.name()?.unwrap_or_default());
    }

    let knows = format!("{FOAF}knows");
    let first: Option<Person> = graph.optional_first_subject_of_either(&[knows.as_str()])?;
    println!("✓ First subject with friends: {:?}", first.map(|p| p.0.to_string()));

    info!(triples = graph.len(), "typed wrapper demo finished");
    println!();
    Ok(())
}

fn demo_definitions(path: Option<String>) -> Result<()> {
    println!("=== Demo 2: Resource definitions ===");
    let definitions = match path {
        Some(path) => DefinitionSet::from_file(&path)
            .with_context(|| format!("Failed to load definitions from {path}"))?,
        None => DefinitionSet::from_yaml_str(PEOPLE)?,
    };
    let definitions = Arc::new(definitions);

    let graph = Graph::new();
    let carol = graph.create_iri("http://example.org/carol")?;
    let dave = graph.create_iri("http://example.org/dave")?;

    let carol = DynamicResource::new(
        Resource::new(carol.term().clone().try_into()?, graph.clone()),
        Arc::clone(&definitions),
        "person",
    )?;
    let dave = DynamicResource::new(
        Resource::new(dave.term().clone().try_into()?, graph.clone()),
        Arc::clone(&definitions),
        "person",
    )?;

    carol.set("set_name", [PropertyValue::String("Carol".to_string())])?;
    dave.set("set_name", [PropertyValue::String("Dave".to_string())])?;
    carol.set("add_knows", [PropertyValue::Resource(dave.clone())])?;

    for friend in carol.get("knows")? {
        if let PropertyValue::Resource(friend) = friend {
            println!("✓ Carol knows {:?}", friend.get("name")?);
        }
    }

    info!(
        kinds = definitions.len(),
        triples = graph.len(),
        "definition demo finished"
    );
    Ok(())
}
