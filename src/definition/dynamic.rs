//! Resources driven by a definition instead of a Rust type

use super::spec::{Cardinality, NodeMappingKind, PropertySpec, ResourceDefinition, ValueMappingKind};
use super::validate::ValidationError;
use super::{DefinitionError, DefinitionResult, DefinitionSet};
use crate::error::{WrapError, WrapResult};
use crate::graph::Graph;
use crate::mapping::{node, value};
use crate::rdf::{RdfObject, RdfTerm};
use crate::wrapper::{Resource, UriOrBlankFactory, WrapperResource};
use chrono::{DateTime, Utc};
use oxiri::Iri;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;
use tracing::trace;

/// A property value read or written through a [`DynamicResource`]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PropertyValue {
    /// `literal_as_string`, `iri_as_string`
    String(String),
    /// `iri_as_uri`
    Iri(Iri<String>),
    /// `literal_as_boolean`
    Boolean(bool),
    /// `literal_as_integer_or_null`; `None` for an unparsable lexical form
    Integer(Option<i32>),
    /// `literal_as_instant`
    Instant(DateTime<Utc>),
    /// `as`
    Resource(DynamicResource),
    /// Raw term, written with `identity`
    Term(RdfObject),
}

impl PropertyValue {
    fn variant(&self) -> &'static str {
        match self {
            PropertyValue::String(_) => "string",
            PropertyValue::Iri(_) => "IRI",
            PropertyValue::Boolean(_) => "boolean",
            PropertyValue::Integer(_) => "integer",
            PropertyValue::Instant(_) => "instant",
            PropertyValue::Resource(_) => "resource",
            PropertyValue::Term(_) => "term",
        }
    }
}

/// A node viewed through a named [`ResourceDefinition`]
#[derive(Clone)]
pub struct DynamicResource {
    resource: Resource,
    definitions: Arc<DefinitionSet>,
    kind: String,
}

impl DynamicResource {
    /// Bind `resource` to the kind `kind` of `definitions`
    pub fn new(
        resource: Resource,
        definitions: Arc<DefinitionSet>,
        kind: impl Into<String>,
    ) -> DefinitionResult<Self> {
        let kind = kind.into();
        if definitions.resource(&kind).is_none() {
            return Err(DefinitionError::UnknownDefinition(kind));
        }

        Ok(Self {
            resource,
            definitions,
            kind,
        })
    }

    pub fn resource(&self) -> &Resource {
        &self.resource
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn definitions(&self) -> &DefinitionSet {
        &self.definitions
    }

    pub fn definition(&self) -> DefinitionResult<&ResourceDefinition> {
        self.definitions
            .resource(&self.kind)
            .ok_or_else(|| DefinitionError::UnknownDefinition(self.kind.clone()))
    }

    /// Read a getter property.
    ///
    /// Singular cardinalities yield at most one value; `*_or_throw` failures
    /// and mapping failures are returned as errors.
    pub fn get(&self, name: &str) -> DefinitionResult<Vec<PropertyValue>> {
        let spec = self.spec(name)?;
        if spec.cardinality.is_setter() {
            return Err(wrong_accessor(name, spec, "get"));
        }

        let target = match (spec.value_mapping, &spec.resource) {
            (ValueMappingKind::As, Some(target)) => Some(target.as_str()),
            (ValueMappingKind::As, None) => {
                return Err(DefinitionError::Invalid(vec![
                    ValidationError::MissingResource {
                        resource: self.kind.clone(),
                        property: name.to_string(),
                    },
                ]))
            }
            _ => None,
        };

        let p = spec.predicate_term().map_err(WrapError::from)?;
        let m = |object: &RdfObject, graph: &Graph| self.to_value(spec.value_mapping, target, object, graph);
        let r = &self.resource;

        trace!(kind = %self.kind, property = name, cardinality = %spec.cardinality, "get");
        let values = match spec.cardinality {
            Cardinality::AnyOrNull => r.any_or_null(&p, m)?.into_iter().collect(),
            Cardinality::AnyOrThrow => vec![r.any_or_throw(&p, m)?],
            Cardinality::SingleOrNull => r.single_or_null(&p, m)?.into_iter().collect(),
            Cardinality::SingleOrThrow => vec![r.single_or_throw(&p, m)?],
            Cardinality::ObjectIterator => r.object_iterator(&p, m).collect::<WrapResult<_>>()?,
            Cardinality::ObjectStream => r.object_stream(&p, m).collect::<WrapResult<_>>()?,
            Cardinality::ObjectsReadOnly => r.objects_read_only(&p, m)?.into_iter().collect(),
            Cardinality::Overwrite | Cardinality::OverwriteNullable | Cardinality::Add => {
                return Err(wrong_accessor(name, spec, "get"))
            }
        };

        Ok(values)
    }

    /// Write a setter property.
    ///
    /// An empty `values` clears the property for `overwrite` and
    /// `overwrite_nullable`, and is a no-op for `add`. `Integer(None)` is an
    /// absent value and fails with `NullValue`.
    pub fn set<I>(&self, name: &str, values: I) -> DefinitionResult<()>
    where
        I: IntoIterator<Item = PropertyValue>,
    {
        let spec = self.spec(name)?;
        if !spec.cardinality.is_setter() {
            return Err(wrong_accessor(name, spec, "set"));
        }

        let p = spec.predicate_term().map_err(WrapError::from)?;
        let graph = self.resource.graph();
        let objects = values
            .into_iter()
            .map(|value| to_node(name, spec.node_mapping, &value, graph))
            .collect::<DefinitionResult<Vec<Option<RdfObject>>>>()?;

        trace!(kind = %self.kind, property = name, cardinality = %spec.cardinality, "set");
        let r = &self.resource;
        match spec.cardinality {
            Cardinality::Overwrite => r.overwrite_all(&p, objects, node::identity)?,
            Cardinality::OverwriteNullable => {
                let objects = (!objects.is_empty()).then_some(objects);
                r.overwrite_all_nullable(&p, objects, node::identity)?
            }
            Cardinality::Add => r.add_all(&p, objects, node::identity)?,
            _ => return Err(wrong_accessor(name, spec, "set")),
        }

        Ok(())
    }

    fn spec(&self, name: &str) -> DefinitionResult<&PropertySpec> {
        self.definition()?
            .property(name)
            .ok_or_else(|| DefinitionError::UnknownProperty {
                resource: self.kind.clone(),
                property: name.to_string(),
            })
    }

    fn to_value(
        &self,
        mapping: ValueMappingKind,
        target: Option<&str>,
        object: &RdfObject,
        graph: &Graph,
    ) -> WrapResult<PropertyValue> {
        Ok(match mapping {
            ValueMappingKind::As => {
                let resource =
                    UriOrBlankFactory::new(Resource::wrap).wrap(&RdfTerm::from(object.clone()), graph)?;

                PropertyValue::Resource(Self {
                    resource,
                    definitions: Arc::clone(&self.definitions),
                    kind: target.unwrap_or(self.kind.as_str()).to_string(),
                })
            }
            ValueMappingKind::IriAsString => PropertyValue::String(value::iri_as_string(object, graph)?),
            ValueMappingKind::IriAsUri => PropertyValue::Iri(value::iri_as_uri(object, graph)?),
            ValueMappingKind::LiteralAsBoolean => {
                PropertyValue::Boolean(value::literal_as_boolean(object, graph)?)
            }
            ValueMappingKind::LiteralAsInstant => {
                PropertyValue::Instant(value::literal_as_instant(object, graph)?)
            }
            ValueMappingKind::LiteralAsIntegerOrNull => {
                PropertyValue::Integer(value::literal_as_integer_or_null(object, graph)?)
            }
            ValueMappingKind::LiteralAsString => {
                PropertyValue::String(value::literal_as_string(object, graph)?)
            }
        })
    }
}

fn wrong_accessor(name: &str, spec: &PropertySpec, operation: &'static str) -> DefinitionError {
    DefinitionError::WrongAccessor {
        property: name.to_string(),
        cardinality: spec.cardinality,
        operation,
    }
}

/// `None` for an absent value, left for the accessor to reject
fn to_node(
    name: &str,
    mapping: NodeMappingKind,
    value: &PropertyValue,
    graph: &Graph,
) -> DefinitionResult<Option<RdfObject>> {
    let object = match (mapping, value) {
        (_, PropertyValue::Integer(None)) => return Ok(None),
        (NodeMappingKind::AsStringLiteral, PropertyValue::String(s)) => {
            node::as_string_literal(s, graph)?
        }
        (NodeMappingKind::AsIri, PropertyValue::String(s)) => node::as_iri(s, graph)?,
        (NodeMappingKind::AsIri, PropertyValue::Iri(iri)) => node::as_iri(iri, graph)?,
        (NodeMappingKind::AsTypedLiteral, PropertyValue::Boolean(b)) => {
            node::as_typed_literal(b, graph)?
        }
        (NodeMappingKind::AsTypedLiteral, PropertyValue::Integer(Some(i))) => {
            node::as_typed_literal(i, graph)?
        }
        (NodeMappingKind::AsTypedLiteral, PropertyValue::Instant(t)) => {
            node::as_typed_literal(t, graph)?
        }
        (NodeMappingKind::AsIri | NodeMappingKind::Identity, PropertyValue::Resource(r)) => {
            node::as_resource_node(&r.resource, graph)?
        }
        (NodeMappingKind::Identity, PropertyValue::Term(term)) => node::identity(term, graph)?,
        (mapping, value) => {
            return Err(DefinitionError::IncompatibleValue {
                property: name.to_string(),
                mapping,
                value: value.variant().to_string(),
            })
        }
    };

    Ok(Some(object))
}

impl PartialEq for DynamicResource {
    fn eq(&self, other: &Self) -> bool {
        self.resource == other.resource
    }
}

impl Eq for DynamicResource {}

impl Hash for DynamicResource {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.resource.hash(state);
    }
}

impl fmt::Debug for DynamicResource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DynamicResource")
            .field("node", self.resource.node())
            .field("kind", &self.kind)
            .finish()
    }
}
