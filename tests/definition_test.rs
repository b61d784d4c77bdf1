use samyama_rdf_wrapping::rdf::{NamedNode, RdfObject};
use samyama_rdf_wrapping::{
    Cardinality, DefinitionError, DefinitionSet, DynamicResource, Graph, PropertyValue, Resource,
    ValidationError, ValueMappingKind, WrapError,
};
use std::io::Write;
use std::sync::Arc;
use tempfile::NamedTempFile;

const PEOPLE_YAML: &str = r#"
prefixes:
  ex: "http://example.org/vocab#"
resources:
  person:
    properties:
      name:
        predicate: foaf:name
        cardinality: single_or_throw
        value_mapping: literal_as_string
      set_name:
        predicate: foaf:name
        cardinality: overwrite
        node_mapping: as_string_literal
      homepage:
        predicate: foaf:homepage
        cardinality: any_or_null
        value_mapping: iri_as_uri
      set_homepage:
        predicate: foaf:homepage
        cardinality: overwrite_nullable
        node_mapping: as_iri
      active:
        predicate: ex:active
        cardinality: single_or_null
        value_mapping: literal_as_boolean
      set_active:
        predicate: ex:active
        cardinality: overwrite
        node_mapping: as_typed_literal
      knows:
        predicate: foaf:knows
        cardinality: object_iterator
        resource: person
      add_knows:
        predicate: foaf:knows
        cardinality: add
"#;

const PEOPLE_JSON: &str = r#"{
  "resources": {
    "person": {
      "properties": {
        "name": {
          "predicate": "http://xmlns.com/foaf/0.1/name",
          "cardinality": "single_or_null",
          "value_mapping": "literal_as_string"
        }
      }
    }
  }
}"#;

fn person(definitions: &Arc<DefinitionSet>, graph: &Graph, iri: &str) -> DynamicResource {
    let node = NamedNode::new(iri).unwrap();
    DynamicResource::new(
        Resource::new(node.into(), graph.clone()),
        Arc::clone(definitions),
        "person",
    )
    .unwrap()
}

#[test]
fn test_load_from_yaml_and_json() {
    let yaml = DefinitionSet::from_yaml_str(PEOPLE_YAML).unwrap();
    let json = DefinitionSet::from_json_str(PEOPLE_JSON).unwrap();

    let name = &yaml.resource("person").unwrap().properties["name"];
    assert_eq!(name.predicate, "http://xmlns.com/foaf/0.1/name");
    assert_eq!(name.cardinality, Cardinality::SingleOrThrow);

    assert_eq!(
        json.resource("person").unwrap().properties["name"].value_mapping,
        ValueMappingKind::LiteralAsString
    );
    assert_eq!(yaml.prefixes()["ex"], "http://example.org/vocab#");
}

#[test]
fn test_load_from_file() {
    let mut yaml = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
    yaml.write_all(PEOPLE_YAML.as_bytes()).unwrap();
    assert_eq!(DefinitionSet::from_file(yaml.path()).unwrap().len(), 1);

    let mut json = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
    json.write_all(PEOPLE_JSON.as_bytes()).unwrap();
    assert_eq!(DefinitionSet::from_file(json.path()).unwrap().len(), 1);

    let mut text = NamedTempFile::new().unwrap();
    text.write_all(PEOPLE_YAML.as_bytes()).unwrap();
    assert!(matches!(
        DefinitionSet::from_file(text.path()),
        Err(DefinitionError::UnsupportedFormat(_))
    ));

    assert!(matches!(
        DefinitionSet::from_file("/nonexistent/definitions.yaml"),
        Err(DefinitionError::Io(_))
    ));
}

#[test]
fn test_validation_rejects_bad_definitions() {
    let err = DefinitionSet::from_yaml_str(
        r#"
resources:
  person:
    properties:
      friend:
        predicate: foaf:knows
      employer:
        predicate: foaf:member
        resource: organization
      nickname:
        predicate: foaf:nick
        value_mapping: literal_as_string
        resource: person
      broken:
        predicate: "not an iri"
        value_mapping: literal_as_string
"#,
    )
    .unwrap_err();

    let DefinitionError::Invalid(errors) = err else {
        panic!("expected validation errors, got {err}");
    };
    assert_eq!(errors.len(), 4);
    assert!(errors
        .iter()
        .any(|e| matches!(e, ValidationError::InvalidPredicate { property, .. } if property == "broken")));
    assert!(errors
        .iter()
        .any(|e| matches!(e, ValidationError::MissingResource { property, .. } if property == "friend")));
    assert!(errors
        .iter()
        .any(|e| matches!(e, ValidationError::UnknownResource { target, .. } if target == "organization")));
    assert!(errors
        .iter()
        .any(|e| matches!(e, ValidationError::UnexpectedResource { property, .. } if property == "nickname")));
}

#[test]
fn test_dynamic_reads_and_writes() {
    let definitions = Arc::new(DefinitionSet::from_yaml_str(PEOPLE_YAML).unwrap());
    let graph = Graph::new();
    let alice = person(&definitions, &graph, "http://example.org/alice");
    let bob = person(&definitions, &graph, "http://example.org/bob");

    assert!(matches!(
        alice.get("name"),
        Err(DefinitionError::Wrap(WrapError::NotFound { .. }))
    ));

    alice
        .set("set_name", [PropertyValue::String("Alice".to_string())])
        .unwrap();
    alice
        .set("set_homepage", [PropertyValue::String("http://alice.example/".to_string())])
        .unwrap();
    alice.set("set_active", [PropertyValue::Boolean(true)]).unwrap();
    bob.set("set_name", [PropertyValue::String("Bob".to_string())]).unwrap();
    alice
        .set("add_knows", [PropertyValue::Resource(bob.clone())])
        .unwrap();

    assert_eq!(
        alice.get("name").unwrap(),
        vec![PropertyValue::String("Alice".to_string())]
    );
    assert_eq!(alice.get("active").unwrap(), vec![PropertyValue::Boolean(true)]);

    let homepage = alice.get("homepage").unwrap();
    let [PropertyValue::Iri(homepage)] = homepage.as_slice() else {
        panic!("expected a single IRI, got {homepage:?}");
    };
    assert_eq!(homepage.as_str(), "http://alice.example/");

    let friends = alice.get("knows").unwrap();
    assert_eq!(friends, vec![PropertyValue::Resource(bob.clone())]);
    let PropertyValue::Resource(friend) = &friends[0] else {
        panic!("expected a resource");
    };
    assert_eq!(friend.kind(), "person");
    assert_eq!(
        friend.get("name").unwrap(),
        vec![PropertyValue::String("Bob".to_string())]
    );

    // overwrite_nullable with nothing clears
    alice.set("set_homepage", Vec::new()).unwrap();
    assert!(alice.get("homepage").unwrap().is_empty());
}

#[test]
fn test_getters_and_setters_are_not_interchangeable() {
    let definitions = Arc::new(DefinitionSet::from_yaml_str(PEOPLE_YAML).unwrap());
    let graph = Graph::new();
    let alice = person(&definitions, &graph, "http://example.org/alice");

    assert!(matches!(
        alice.set("name", [PropertyValue::String("Alice".to_string())]),
        Err(DefinitionError::WrongAccessor { operation: "set", .. })
    ));
    assert!(matches!(
        alice.get("set_name"),
        Err(DefinitionError::WrongAccessor { operation: "get", .. })
    ));
    assert!(matches!(
        alice.set("set_active", [PropertyValue::Term(RdfObject::from(NamedNode::new("urn:x").unwrap()))]),
        Err(DefinitionError::IncompatibleValue { .. })
    ));
    assert!(matches!(
        DynamicResource::new(alice.resource().clone(), Arc::clone(&definitions), "robot"),
        Err(DefinitionError::UnknownDefinition(_))
    ));
}
