//! Mention graph representation and traversal module

pub mod compressed;
pub mod builder;
pub mod algorithms;

pub use builder::{build_mention_graph, GraphBuilder};
pub use compressed::CompressedGraph;
