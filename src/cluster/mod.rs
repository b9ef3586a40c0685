//! Connected component analysis module

pub mod detection;

use serde::{Serialize, Deserialize};
use crate::data::AccountId;
use crate::graph::CompressedGraph;

/// Summary of one connected component of the full mention graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cluster {
    /// Discovery ordinal: components are numbered by their first node
    pub id: u32,

    /// Members of this component (node indices in the full graph)
    pub members: Vec<u32>,

    /// Size of the component
    pub size: usize,
}

/// A connected component lifted out of the full graph for analysis
///
/// The subgraph is re-indexed `0..n` in the full graph's insertion order
/// and holds exactly the edges induced by the member set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Component {
    /// Node indices of the members in the full graph
    members: Vec<u32>,

    /// Induced subgraph
    graph: CompressedGraph,
}

impl Component {
    pub(crate) fn new(members: Vec<u32>, graph: CompressedGraph) -> Self {
        Self { members, graph }
    }

    /// The induced subgraph
    pub fn graph(&self) -> &CompressedGraph {
        &self.graph
    }

    /// Indices of the members in the full graph
    pub fn members(&self) -> &[u32] {
        &self.members
    }

    /// Member identities in component order
    pub fn node_ids(&self) -> &[AccountId] {
        &self.graph.node_ids
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn contains(&self, id: &AccountId) -> bool {
        self.graph.node_ids.contains(id)
    }
}
