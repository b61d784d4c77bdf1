//! Value mappings: from the object of a statement to a host value
//!
//! Every built-in matches exhaustively on the term kind. Asking for a literal
//! when the term is an IRI (or the other way round) is a
//! [`WrapError::TypeMismatch`], never a silent coercion.
//!
//! [`literal_as_integer_or_null`] is the odd one out: an unparsable lexical
//! form yields `Ok(None)`, whereas [`literal_as_boolean`] and
//! [`literal_as_instant`] return a parse error for the same situation.

use crate::error::{WrapError, WrapResult};
use crate::graph::Graph;
use crate::rdf::{Literal, NamedNode, RdfObject, RdfTerm, TermKind};
use crate::wrapper::WrapperResource;
use chrono::{DateTime, Utc};
use oxiri::Iri;

/// Converts a term of a graph into a value of type `T`.
///
/// Implemented for every `Fn(&RdfObject, &Graph) -> WrapResult<T>`, so plain
/// functions such as [`literal_as_string`] and closures both qualify.
pub trait ValueMapping<T> {
    fn map_value(&self, object: &RdfObject, graph: &Graph) -> WrapResult<T>;
}

impl<T, F> ValueMapping<T> for F
where
    F: Fn(&RdfObject, &Graph) -> WrapResult<T>,
{
    fn map_value(&self, object: &RdfObject, graph: &Graph) -> WrapResult<T> {
        self(object, graph)
    }
}

fn expect_literal(object: &RdfObject) -> WrapResult<&Literal> {
    match object {
        RdfObject::Literal(literal) => Ok(literal),
        RdfObject::NamedNode(_) | RdfObject::BlankNode(_) => Err(WrapError::TypeMismatch {
            expected: TermKind::Literal,
            found: object.kind(),
        }),
    }
}

fn expect_iri(object: &RdfObject) -> WrapResult<&NamedNode> {
    match object {
        RdfObject::NamedNode(node) => Ok(node),
        RdfObject::BlankNode(_) | RdfObject::Literal(_) => Err(WrapError::TypeMismatch {
            expected: TermKind::Iri,
            found: object.kind(),
        }),
    }
}

/// Lexical form of any literal, language-tagged or typed
pub fn literal_as_string(object: &RdfObject, _graph: &Graph) -> WrapResult<String> {
    Ok(expect_literal(object)?.value().to_string())
}

/// The IRI of an IRI node
pub fn iri_as_string(object: &RdfObject, _graph: &Graph) -> WrapResult<String> {
    Ok(expect_iri(object)?.as_str().to_string())
}

/// The IRI of an IRI node, parsed
pub fn iri_as_uri(object: &RdfObject, _graph: &Graph) -> WrapResult<Iri<String>> {
    let iri = expect_iri(object)?.as_str();

    Iri::parse(iri.to_string()).map_err(|e| WrapError::InvalidIri {
        iri: iri.to_string(),
        message: e.to_string(),
    })
}

/// xsd:boolean lexical space: `true`, `false`, `1`, `0`
pub fn literal_as_boolean(object: &RdfObject, _graph: &Graph) -> WrapResult<bool> {
    let lexical = expect_literal(object)?.value();

    match lexical.trim() {
        "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        _ => Err(WrapError::InvalidLexicalForm {
            lexical: lexical.to_string(),
            target: "boolean",
        }),
    }
}

/// Signed 32-bit integer, or `None` when the lexical form does not parse
pub fn literal_as_integer_or_null(object: &RdfObject, _graph: &Graph) -> WrapResult<Option<i32>> {
    let lexical = expect_literal(object)?.value();

    Ok(lexical.trim().parse::<i32>().ok())
}

/// ISO-8601 point in time with an offset, normalized to UTC
pub fn literal_as_instant(object: &RdfObject, _graph: &Graph) -> WrapResult<DateTime<Utc>> {
    let lexical = expect_literal(object)?.value();

    DateTime::parse_from_rfc3339(lexical.trim())
        .map(|instant| instant.with_timezone(&Utc))
        .map_err(|e| WrapError::InvalidInstant {
            lexical: lexical.to_string(),
            message: e.to_string(),
        })
}

/// The term itself
pub fn identity(object: &RdfObject, _graph: &Graph) -> WrapResult<RdfObject> {
    Ok(object.clone())
}

/// Project the term into the wrapper kind `W` registered with the graph.
///
/// Literals fail with [`WrapError::ResourceRequired`].
pub fn as_resource<W: WrapperResource>(object: &RdfObject, graph: &Graph) -> WrapResult<W> {
    graph.project::<W>(&RdfTerm::from(object.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rdf::BlankNode;

    fn iri(value: &str) -> RdfObject {
        NamedNode::new(value).unwrap().into()
    }

    fn string(value: &str) -> RdfObject {
        Literal::new_simple_literal(value).into()
    }

    #[test]
    fn test_literal_as_string_requires_literal() {
        let graph = Graph::new();

        assert_eq!(literal_as_string(&string("x"), &graph).unwrap(), "x");

        let lang = Literal::new_language_tagged_literal("chat", "fr").unwrap();
        assert_eq!(literal_as_string(&lang.into(), &graph).unwrap(), "chat");

        assert_eq!(
            literal_as_string(&BlankNode::new().into(), &graph),
            Err(WrapError::TypeMismatch {
                expected: TermKind::Literal,
                found: TermKind::BlankNode,
            })
        );
    }

    #[test]
    fn test_iri_as_string_requires_iri() {
        let graph = Graph::new();

        assert_eq!(iri_as_string(&iri("urn:example:o"), &graph).unwrap(), "urn:example:o");
        assert!(matches!(
            iri_as_string(&string("urn:example:o"), &graph),
            Err(WrapError::TypeMismatch { found: TermKind::Literal, .. })
        ));
        assert!(iri_as_uri(&BlankNode::new().into(), &graph).is_err());
    }

    #[test]
    fn test_literal_as_boolean() {
        let graph = Graph::new();

        assert!(literal_as_boolean(&string("true"), &graph).unwrap());
        assert!(!literal_as_boolean(&string("0"), &graph).unwrap());
        assert!(matches!(
            literal_as_boolean(&string("yes"), &graph),
            Err(WrapError::InvalidLexicalForm { .. })
        ));
    }

    #[test]
    fn test_literal_as_integer_or_null_is_lenient() {
        let graph = Graph::new();

        assert_eq!(
            literal_as_integer_or_null(&string("2147483647"), &graph).unwrap(),
            Some(i32::MAX)
        );
        assert_eq!(literal_as_integer_or_null(&string("-7"), &graph).unwrap(), Some(-7));
        assert_eq!(literal_as_integer_or_null(&string("seven"), &graph).unwrap(), None);
        assert_eq!(literal_as_integer_or_null(&string("2147483648"), &graph).unwrap(), None);

        // Kind is still checked
        assert!(literal_as_integer_or_null(&iri("urn:example:o"), &graph).is_err());
    }

    #[test]
    fn test_literal_as_instant_is_strict() {
        let graph = Graph::new();

        let instant = literal_as_instant(&string("2023-04-05T06:07:08+02:00"), &graph).unwrap();
        assert_eq!(instant.to_rfc3339(), "2023-04-05T04:07:08+00:00");

        assert!(matches!(
            literal_as_instant(&string("yesterday"), &graph),
            Err(WrapError::InvalidInstant { .. })
        ));
    }

    #[test]
    fn test_identity() {
        let graph = Graph::new();
        let object = string("x");

        assert_eq!(identity(&object, &graph).unwrap(), object);
    }
}
