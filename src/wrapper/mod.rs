//! Typed wrappers over nodes, graphs and datasets
//!
//! - [`Resource`] / [`WrapperResource`]: a node and the cardinality-aware
//!   accessors over its properties
//! - [`ObjectSet`]: live set view over one property
//! - [`UriOrBlankFactory`] / [`Personality`]: per-graph projection of nodes
//!   into wrapper kinds
//! - [`WrapperGraph`] / [`WrapperDataset`]: typed entry points

mod dataset;
mod factory;
mod graph;
mod object_set;
mod resource;

pub use dataset::WrapperDataset;
pub use factory::{Personality, UriOrBlankFactory};
pub use graph::WrapperGraph;
pub use object_set::ObjectSet;
pub use resource::{ObjectIterator, Resource, WrapperResource};
