//! Typed views over datasets

use super::graph::WrapperGraph;
use crate::dataset::Dataset;
use crate::error::WrapResult;
use crate::rdf::NamedNode;

/// Typed view over a dataset, handing out typed graph views
pub trait WrapperDataset {
    fn dataset(&self) -> &Dataset;

    /// The default graph, as `G`
    fn default_graph<G: WrapperGraph>(&self) -> G {
        G::wrap(self.dataset().default_graph().clone())
    }

    /// The named graph `name`, as `G`. Fails if there is no such graph.
    fn named_graph<G: WrapperGraph>(&self, name: &str) -> WrapResult<G> {
        let name = NamedNode::new(name)?;
        let graph = self.dataset().named_graph(&name)?;

        Ok(G::wrap(graph.clone()))
    }
}

impl WrapperDataset for Dataset {
    fn dataset(&self) -> &Dataset {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::WrapError;
    use crate::graph::Graph;
    use crate::rdf::{Literal, Quad, RdfPredicate, RdfStoreError};

    #[test]
    fn test_graph_views_share_the_dataset_graphs() {
        let mut dataset = Dataset::new();
        dataset.insert_quad(Quad::new(
            NamedNode::new("urn:example:s").unwrap().into(),
            RdfPredicate::new("urn:example:p").unwrap(),
            Literal::new_simple_literal("o").into(),
            Some(NamedNode::new("urn:example:g").unwrap()),
        ));

        let default: Graph = WrapperDataset::default_graph(&dataset);
        assert!(default.ptr_eq(Dataset::default_graph(&dataset)));

        let named: Graph = WrapperDataset::named_graph(&dataset, "urn:example:g").unwrap();
        assert_eq!(named.len(), 1);

        let missing = WrapperDataset::named_graph::<Graph>(&dataset, "urn:example:none");
        assert!(matches!(
            missing,
            Err(WrapError::Store(RdfStoreError::GraphNotFound(_)))
        ));
    }
}
