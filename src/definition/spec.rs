//! Definition data model and loaders

use super::validate::{self, ValidationError};
use super::{DefinitionError, DefinitionResult};
use crate::rdf::{NamespaceManager, RdfPredicate, RdfResult};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use tracing::{debug, info};

/// Which accessor a property uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cardinality {
    #[default]
    AnyOrNull,
    AnyOrThrow,
    SingleOrNull,
    SingleOrThrow,
    ObjectIterator,
    ObjectsReadOnly,
    ObjectStream,
    Overwrite,
    OverwriteNullable,
    Add,
}

impl Cardinality {
    pub fn as_str(&self) -> &'static str {
        match self {
            Cardinality::AnyOrNull => "any_or_null",
            Cardinality::AnyOrThrow => "any_or_throw",
            Cardinality::SingleOrNull => "single_or_null",
            Cardinality::SingleOrThrow => "single_or_throw",
            Cardinality::ObjectIterator => "object_iterator",
            Cardinality::ObjectsReadOnly => "objects_read_only",
            Cardinality::ObjectStream => "object_stream",
            Cardinality::Overwrite => "overwrite",
            Cardinality::OverwriteNullable => "overwrite_nullable",
            Cardinality::Add => "add",
        }
    }

    /// Reads yielding any number of values
    pub fn is_plural(&self) -> bool {
        matches!(
            self,
            Cardinality::ObjectIterator | Cardinality::ObjectsReadOnly | Cardinality::ObjectStream
        )
    }

    /// Writes
    pub fn is_setter(&self) -> bool {
        matches!(
            self,
            Cardinality::Overwrite | Cardinality::OverwriteNullable | Cardinality::Add
        )
    }
}

impl fmt::Display for Cardinality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which value mapping a getter uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueMappingKind {
    /// Projection into another defined resource kind
    #[default]
    As,
    IriAsString,
    IriAsUri,
    LiteralAsBoolean,
    LiteralAsInstant,
    LiteralAsIntegerOrNull,
    LiteralAsString,
}

impl ValueMappingKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValueMappingKind::As => "as",
            ValueMappingKind::IriAsString => "iri_as_string",
            ValueMappingKind::IriAsUri => "iri_as_uri",
            ValueMappingKind::LiteralAsBoolean => "literal_as_boolean",
            ValueMappingKind::LiteralAsInstant => "literal_as_instant",
            ValueMappingKind::LiteralAsIntegerOrNull => "literal_as_integer_or_null",
            ValueMappingKind::LiteralAsString => "literal_as_string",
        }
    }

    /// Whether the mapping yields a resource rather than a plain value
    pub fn is_complex(&self) -> bool {
        matches!(self, ValueMappingKind::As)
    }
}

impl fmt::Display for ValueMappingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which node mapping a setter uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeMappingKind {
    AsStringLiteral,
    AsIri,
    AsTypedLiteral,
    #[default]
    Identity,
}

impl NodeMappingKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeMappingKind::AsStringLiteral => "as_string_literal",
            NodeMappingKind::AsIri => "as_iri",
            NodeMappingKind::AsTypedLiteral => "as_typed_literal",
            NodeMappingKind::Identity => "identity",
        }
    }
}

impl fmt::Display for NodeMappingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One property of a resource kind
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PropertySpec {
    /// Absolute IRI, or compact IRI with a known prefix; absolute once loaded
    pub predicate: String,

    #[serde(default)]
    pub cardinality: Cardinality,

    #[serde(default)]
    pub value_mapping: ValueMappingKind,

    #[serde(default)]
    pub node_mapping: NodeMappingKind,

    /// Target kind for the `as` value mapping
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource: Option<String>,
}

impl PropertySpec {
    pub fn new(predicate: impl Into<String>) -> Self {
        Self {
            predicate: predicate.into(),
            cardinality: Cardinality::default(),
            value_mapping: ValueMappingKind::default(),
            node_mapping: NodeMappingKind::default(),
            resource: None,
        }
    }

    pub fn with_cardinality(mut self, cardinality: Cardinality) -> Self {
        self.cardinality = cardinality;
        self
    }

    pub fn with_value_mapping(mut self, value_mapping: ValueMappingKind) -> Self {
        self.value_mapping = value_mapping;
        self
    }

    pub fn with_node_mapping(mut self, node_mapping: NodeMappingKind) -> Self {
        self.node_mapping = node_mapping;
        self
    }

    pub fn with_resource(mut self, resource: impl Into<String>) -> Self {
        self.resource = Some(resource.into());
        self
    }

    /// The predicate as a term
    pub fn predicate_term(&self) -> RdfResult<RdfPredicate> {
        RdfPredicate::new(&self.predicate)
    }
}

/// A resource kind: its properties by name, in declaration order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ResourceDefinition {
    #[serde(default)]
    pub properties: IndexMap<String, PropertySpec>,
}

impl ResourceDefinition {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_property(mut self, name: impl Into<String>, spec: PropertySpec) -> Self {
        self.properties.insert(name.into(), spec);
        self
    }

    pub fn property(&self, name: &str) -> Option<&PropertySpec> {
        self.properties.get(name)
    }
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawDefinitionSet {
    #[serde(default)]
    prefixes: IndexMap<String, String>,
    #[serde(default)]
    resources: IndexMap<String, ResourceDefinition>,
}

/// Validated set of resource kinds.
///
/// Only obtainable through the constructors below, which expand compact
/// predicates and reject the set unless every property is valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DefinitionSet {
    prefixes: IndexMap<String, String>,
    resources: IndexMap<String, ResourceDefinition>,
}

impl DefinitionSet {
    /// Build from in-memory definitions. Predicates may use the common
    /// prefixes or those given here.
    pub fn new(
        prefixes: IndexMap<String, String>,
        resources: IndexMap<String, ResourceDefinition>,
    ) -> DefinitionResult<Self> {
        let mut namespaces = NamespaceManager::new();
        for (prefix, iri) in &prefixes {
            namespaces.add_prefix(prefix.clone(), iri.clone());
        }

        let mut set = Self {
            prefixes,
            resources,
        };
        let errors: Vec<ValidationError> = validate::expand_predicates(&mut set.resources, &namespaces)
            .into_iter()
            .chain(validate::check_mappings(&set.resources))
            .collect();

        if !errors.is_empty() {
            debug!(errors = errors.len(), "rejected resource definitions");
            return Err(DefinitionError::Invalid(errors));
        }

        info!(
            resources = set.resources.len(),
            prefixes = set.prefixes.len(),
            "loaded resource definitions"
        );
        Ok(set)
    }

    pub fn from_yaml_str(yaml: &str) -> DefinitionResult<Self> {
        let raw: RawDefinitionSet = serde_yaml::from_str(yaml)?;
        Self::new(raw.prefixes, raw.resources)
    }

    pub fn from_json_str(json: &str) -> DefinitionResult<Self> {
        let raw: RawDefinitionSet = serde_json::from_str(json)?;
        Self::new(raw.prefixes, raw.resources)
    }

    /// Load a `.yaml`, `.yml` or `.json` definition file
    pub fn from_file<P: AsRef<Path>>(path: P) -> DefinitionResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;

        let set = match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml") | Some("yml") => Self::from_yaml_str(&content)?,
            Some("json") => Self::from_json_str(&content)?,
            _ => return Err(DefinitionError::UnsupportedFormat(path.display().to_string())),
        };

        debug!(path = %path.display(), "read resource definitions");
        Ok(set)
    }

    /// Prefixes declared by the definitions themselves
    pub fn prefixes(&self) -> &IndexMap<String, String> {
        &self.prefixes
    }

    pub fn resource(&self, name: &str) -> Option<&ResourceDefinition> {
        self.resources.get(name)
    }

    pub fn resources(&self) -> impl Iterator<Item = (&str, &ResourceDefinition)> {
        self.resources
            .iter()
            .map(|(name, definition)| (name.as_str(), definition))
    }

    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }
}
