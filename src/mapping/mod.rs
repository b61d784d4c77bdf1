//! Conversions between statement objects and host values
//!
//! A [`ValueMapping`] reads, a [`NodeMapping`] writes. The two halves of a
//! pair are supplied independently; keeping them inverse to each other is
//! up to whoever pairs them.
//!
//! | host type | value mapping | node mapping |
//! |---|---|---|
//! | `String` (literal) | [`value::literal_as_string`] | [`node::as_string_literal`] |
//! | `String` (IRI) | [`value::iri_as_string`] | [`node::as_iri`] |
//! | `oxiri::Iri<String>` | [`value::iri_as_uri`] | [`node::as_iri`] |
//! | `bool` | [`value::literal_as_boolean`] | [`node::as_typed_literal`] |
//! | `Option<i32>` / `i32` | [`value::literal_as_integer_or_null`] | [`node::as_typed_literal`] |
//! | `DateTime<Utc>` | [`value::literal_as_instant`] | [`node::as_typed_literal`] |
//! | `RdfObject` | [`value::identity`] | [`node::identity`] |
//! | wrapper `W` | [`value::as_resource`] | [`node::as_resource_node`] |

pub mod node;
pub mod value;

pub use node::{IriValue, NodeMapping, TypedLiteral};
pub use value::ValueMapping;
