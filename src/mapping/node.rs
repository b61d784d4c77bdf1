//! Node mappings: from a host value to a term that can be asserted
//!
//! Node mappings never see an absent value; the accessors reject those first.

use crate::error::{WrapError, WrapResult};
use crate::graph::Graph;
use crate::rdf::{Literal, NamedNode, RdfObject};
use crate::wrapper::WrapperResource;
use chrono::{DateTime, SecondsFormat, Utc};
use oxiri::Iri;
use oxrdf::vocab::xsd;
use oxrdf::NamedNodeRef;

/// Converts a value of type `T` into a term in the context of a graph.
///
/// Implemented for every `Fn(&T, &Graph) -> WrapResult<RdfObject>`.
pub trait NodeMapping<T> {
    fn map_node(&self, value: &T, graph: &Graph) -> WrapResult<RdfObject>;
}

impl<T, F> NodeMapping<T> for F
where
    F: Fn(&T, &Graph) -> WrapResult<RdfObject>,
{
    fn map_node(&self, value: &T, graph: &Graph) -> WrapResult<RdfObject> {
        self(value, graph)
    }
}

/// Host values with an XSD datatype
pub trait TypedLiteral {
    fn datatype() -> NamedNodeRef<'static>;

    fn lexical_form(&self) -> String;
}

impl TypedLiteral for bool {
    fn datatype() -> NamedNodeRef<'static> {
        xsd::BOOLEAN
    }

    fn lexical_form(&self) -> String {
        self.to_string()
    }
}

impl TypedLiteral for i32 {
    fn datatype() -> NamedNodeRef<'static> {
        xsd::INT
    }

    fn lexical_form(&self) -> String {
        self.to_string()
    }
}

impl TypedLiteral for DateTime<Utc> {
    fn datatype() -> NamedNodeRef<'static> {
        xsd::DATE_TIME
    }

    fn lexical_form(&self) -> String {
        self.to_rfc3339_opts(SecondsFormat::AutoSi, true)
    }
}

/// Host values that denote an IRI
pub trait IriValue {
    fn iri_str(&self) -> &str;
}

impl IriValue for String {
    fn iri_str(&self) -> &str {
        self
    }
}

impl IriValue for Iri<String> {
    fn iri_str(&self) -> &str {
        self.as_str()
    }
}

/// An xsd:string literal with the value as its lexical form
#[allow(clippy::ptr_arg)]
pub fn as_string_literal(value: &String, _graph: &Graph) -> WrapResult<RdfObject> {
    Ok(Literal::new_simple_literal(value.as_str()).into())
}

/// An IRI node identified by the value
pub fn as_iri<V: IriValue>(value: &V, _graph: &Graph) -> WrapResult<RdfObject> {
    let iri = value.iri_str();

    NamedNode::new(iri)
        .map(RdfObject::from)
        .map_err(|e| WrapError::InvalidIri {
            iri: iri.to_string(),
            message: e.to_string(),
        })
}

/// A literal typed with the value's XSD datatype
pub fn as_typed_literal<V: TypedLiteral>(value: &V, _graph: &Graph) -> WrapResult<RdfObject> {
    Ok(Literal::new_typed_literal(value.lexical_form(), V::datatype()).into())
}

/// The term itself
pub fn identity(value: &RdfObject, _graph: &Graph) -> WrapResult<RdfObject> {
    Ok(value.clone())
}

/// The node a wrapper is bound to
pub fn as_resource_node<W: WrapperResource>(value: &W, _graph: &Graph) -> WrapResult<RdfObject> {
    Ok(value.resource().node().clone().into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_typed_literals_carry_xsd_datatypes() {
        let graph = Graph::new();

        let RdfObject::Literal(boolean) = as_typed_literal(&true, &graph).unwrap() else {
            panic!("expected literal");
        };
        assert_eq!(boolean.value(), "true");
        assert_eq!(boolean.datatype().as_str(), xsd::BOOLEAN.as_str());

        let RdfObject::Literal(int) = as_typed_literal(&-42i32, &graph).unwrap() else {
            panic!("expected literal");
        };
        assert_eq!(int.value(), "-42");
        assert_eq!(int.datatype().as_str(), xsd::INT.as_str());
    }

    #[test]
    fn test_instant_lexical_form_uses_zulu() {
        let graph = Graph::new();
        let instant = DateTime::parse_from_rfc3339("2023-04-05T06:07:08.5+02:00")
            .unwrap()
            .with_timezone(&Utc);

        let RdfObject::Literal(literal) = as_typed_literal(&instant, &graph).unwrap() else {
            panic!("expected literal");
        };
        assert_eq!(literal.value(), "2023-04-05T04:07:08.500Z");
        assert_eq!(literal.datatype().as_str(), xsd::DATE_TIME.as_str());
    }

    #[test]
    fn test_as_iri_validates() {
        let graph = Graph::new();

        assert!(as_iri(&"urn:example:o".to_string(), &graph).unwrap().kind() == crate::rdf::TermKind::Iri);
        assert!(matches!(
            as_iri(&"not an iri".to_string(), &graph),
            Err(WrapError::InvalidIri { .. })
        ));
    }
}
