//! Runtime resource definitions
//!
//! A definition file names resource kinds and, for each, the properties they
//! expose: the predicate, the accessor cardinality and the mappings. A
//! [`DynamicResource`] binds one node to one kind and dispatches property
//! reads and writes to the matching accessor.
//!
//! ```yaml
//! prefixes:
//!   ex: "http://example.org/"
//! resources:
//!   person:
//!     properties:
//!       name:
//!         predicate: foaf:name
//!         cardinality: single_or_null
//!         value_mapping: literal_as_string
//!       knows:
//!         predicate: foaf:knows
//!         cardinality: objects_read_only
//!         resource: person
//!       set_name:
//!         predicate: foaf:name
//!         cardinality: overwrite
//!         node_mapping: as_string_literal
//! ```

mod dynamic;
mod spec;
mod validate;

pub use dynamic::{DynamicResource, PropertyValue};
pub use spec::{
    Cardinality, DefinitionSet, NodeMappingKind, PropertySpec, ResourceDefinition,
    ValueMappingKind,
};
pub use validate::ValidationError;

use crate::error::WrapError;
use thiserror::Error;

/// Definition errors
#[derive(Error, Debug)]
pub enum DefinitionError {
    /// Reading a definition file failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML parsing error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// File extension is neither YAML nor JSON
    #[error("Unsupported definition file format: {0}")]
    UnsupportedFormat(String),

    /// Definitions failed validation
    #[error("Invalid definitions: {}", join(.0))]
    Invalid(Vec<ValidationError>),

    /// No resource kind of that name
    #[error("Unknown resource definition: {0}")]
    UnknownDefinition(String),

    /// No property of that name on the kind
    #[error("Unknown property {property} on {resource}")]
    UnknownProperty { resource: String, property: String },

    /// Getter used to write, or setter used to read
    #[error("Property {property} has cardinality {cardinality} and cannot be used to {operation}")]
    WrongAccessor {
        property: String,
        cardinality: Cardinality,
        operation: &'static str,
    },

    /// Value variant not accepted by the property's node mapping
    #[error("Property {property} with node mapping {mapping} cannot write {value}")]
    IncompatibleValue {
        property: String,
        mapping: NodeMappingKind,
        value: String,
    },

    /// Accessor failure
    #[error(transparent)]
    Wrap(#[from] WrapError),
}

pub type DefinitionResult<T> = Result<T, DefinitionError>;

fn join(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
