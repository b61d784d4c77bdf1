//! Definition validation
//!
//! Every problem in a set is reported, not only the first one.

use super::spec::{ResourceDefinition, ValueMappingKind};
use crate::rdf::{NamedNode, NamespaceManager};
use indexmap::IndexMap;
use thiserror::Error;

/// A single invalid property
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{resource}.{property}: predicate {predicate:?} is not an IRI ({message})")]
    InvalidPredicate {
        resource: String,
        property: String,
        predicate: String,
        message: String,
    },

    #[error("{resource}.{property}: value mapping `as` requires a resource")]
    MissingResource { resource: String, property: String },

    #[error("{resource}.{property}: resource {target} is not defined")]
    UnknownResource {
        resource: String,
        property: String,
        target: String,
    },

    #[error("{resource}.{property}: resource {target} is only allowed with value mapping `as`, not `{mapping}`")]
    UnexpectedResource {
        resource: String,
        property: String,
        target: String,
        mapping: ValueMappingKind,
    },
}

/// Rewrite every predicate to an absolute IRI
pub(super) fn expand_predicates(
    resources: &mut IndexMap<String, ResourceDefinition>,
    namespaces: &NamespaceManager,
) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    for (resource, definition) in resources.iter_mut() {
        for (property, spec) in definition.properties.iter_mut() {
            let expanded = namespaces
                .resolve(&spec.predicate)
                .map_err(|e| e.to_string())
                .and_then(|iri| {
                    NamedNode::new(&iri)
                        .map(|_| iri)
                        .map_err(|e| e.to_string())
                });

            match expanded {
                Ok(iri) => spec.predicate = iri,
                Err(message) => errors.push(ValidationError::InvalidPredicate {
                    resource: resource.clone(),
                    property: property.clone(),
                    predicate: spec.predicate.clone(),
                    message,
                }),
            }
        }
    }

    errors
}

/// Check `as` and `resource` usage against the set of defined kinds
pub(super) fn check_mappings(
    resources: &IndexMap<String, ResourceDefinition>,
) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    for (resource, definition) in resources {
        for (property, spec) in &definition.properties {
            let getter = !spec.cardinality.is_setter();

            match (&spec.resource, spec.value_mapping) {
                (None, ValueMappingKind::As) if getter => {
                    errors.push(ValidationError::MissingResource {
                        resource: resource.clone(),
                        property: property.clone(),
                    })
                }
                (Some(target), ValueMappingKind::As) if !resources.contains_key(target) => {
                    errors.push(ValidationError::UnknownResource {
                        resource: resource.clone(),
                        property: property.clone(),
                        target: target.clone(),
                    })
                }
                (Some(target), mapping) if !mapping.is_complex() => {
                    errors.push(ValidationError::UnexpectedResource {
                        resource: resource.clone(),
                        property: property.clone(),
                        target: target.clone(),
                        mapping,
                    })
                }
                _ => {}
            }
        }
    }

    errors
}
