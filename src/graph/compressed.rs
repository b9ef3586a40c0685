//! Memory-efficient undirected graph representation

use std::mem;
use petgraph::graph::UnGraph;
use serde::{Serialize, Deserialize};
use crate::data::AccountId;

/// Per-node mention counts gathered during ingestion
///
/// Stored separately from the adjacency arrays; metrics never read it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeMetadata {
    /// Number of ingested posts written by each node
    pub posts_authored: Vec<u32>,

    /// Number of times each node was mentioned, repeats included
    pub times_mentioned: Vec<u32>,
}

impl NodeMetadata {
    /// Calculate the memory usage of the metadata
    pub fn memory_usage(&self) -> usize {
        let authored = self.posts_authored.capacity() * mem::size_of::<u32>();
        let mentioned = self.times_mentioned.capacity() * mem::size_of::<u32>();

        authored + mentioned
    }

    /// Metadata restricted to `members`, in that order
    pub fn subset(&self, members: &[u32]) -> Self {
        Self {
            posts_authored: members
                .iter()
                .map(|&m| self.posts_authored[m as usize])
                .collect(),
            times_mentioned: members
                .iter()
                .map(|&m| self.times_mentioned[m as usize])
                .collect(),
        }
    }
}

/// Compressed sparse row representation of an undirected simple graph
///
/// Every edge `{u, v}` appears twice: `v` in the neighbor list of `u` and
/// `u` in the neighbor list of `v`. Neighbor lists are sorted and contain
/// neither duplicates nor the node itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompressedGraph {
    /// Number of nodes in the graph
    pub node_count: usize,

    /// Offset array: index where each node's neighbors begin
    /// offsets[i] to offsets[i+1] defines the neighbor range for node i
    pub offsets: Vec<u32>,

    /// Neighbor array: concatenated sorted neighbor lists
    pub edges: Vec<u32>,

    /// Account identity of each node, in insertion order
    pub node_ids: Vec<AccountId>,

    /// Optional node metadata (stored separately for cache efficiency)
    pub metadata: Option<NodeMetadata>,
}

impl CompressedGraph {
    /// Create an empty graph with pre-allocated capacity
    pub fn with_capacity(node_count: usize, edge_count: usize) -> Self {
        Self {
            node_count: 0,
            offsets: Vec::with_capacity(node_count + 1),
            edges: Vec::with_capacity(edge_count * 2),
            node_ids: Vec::with_capacity(node_count),
            metadata: None,
        }
    }

    /// Get the neighbors of a node
    pub fn neighbors(&self, node: usize) -> &[u32] {
        let start = self.offsets[node] as usize;
        let end = self.offsets[node + 1] as usize;
        &self.edges[start..end]
    }

    /// Check if `a` and `b` are adjacent
    pub fn has_edge(&self, a: usize, b: u32) -> bool {
        self.neighbors(a).binary_search(&b).is_ok()
    }

    /// Number of neighbors of a node
    pub fn degree(&self, node: usize) -> usize {
        let start = self.offsets[node] as usize;
        let end = self.offsets[node + 1] as usize;
        end - start
    }

    /// Number of undirected edges
    pub fn edge_count(&self) -> usize {
        self.edges.len() / 2
    }

    pub fn is_empty(&self) -> bool {
        self.node_count == 0
    }

    /// Identity of the node at `node`
    pub fn node_id(&self, node: usize) -> &AccountId {
        &self.node_ids[node]
    }

    /// Index of the node with identity `id` (linear scan)
    pub fn node_index(&self, id: &AccountId) -> Option<usize> {
        self.node_ids.iter().position(|candidate| candidate == id)
    }

    /// Each undirected edge once, as `(lower index, higher index)`
    pub fn undirected_edges(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        (0..self.node_count).flat_map(move |src| {
            self.neighbors(src)
                .iter()
                .filter(move |&&dst| (dst as usize) > src)
                .map(move |&dst| (src as u32, dst))
        })
    }

    /// Convert to a petgraph graph carrying the account identities as weights
    pub fn to_petgraph(&self) -> UnGraph<AccountId, ()> {
        let mut graph = UnGraph::with_capacity(self.node_count, self.edge_count());
        let indices: Vec<_> = self
            .node_ids
            .iter()
            .map(|id| graph.add_node(id.clone()))
            .collect();

        for (src, dst) in self.undirected_edges() {
            graph.add_edge(indices[src as usize], indices[dst as usize], ());
        }

        graph
    }

    /// Estimate memory usage in bytes
    pub fn memory_usage(&self) -> usize {
        let base = mem::size_of::<Self>();
        let offsets = self.offsets.capacity() * mem::size_of::<u32>();
        let edges = self.edges.capacity() * mem::size_of::<u32>();

        let ids = self.node_ids.capacity() * mem::size_of::<AccountId>()
            + self
                .node_ids
                .iter()
                .map(|id| match id {
                    AccountId::Handle(handle) => handle.capacity(),
                    AccountId::Numeric(_) => 0,
                })
                .sum::<usize>();

        let metadata = self.metadata.as_ref()
            .map(|m| m.memory_usage())
            .unwrap_or(0);

        base + offsets + edges + ids + metadata
    }
}

#[cfg(test)]
mod tests {
    use crate::graph::builder::GraphBuilder;

    #[test]
    fn stores_each_edge_in_both_directions() {
        let mut builder = GraphBuilder::default();
        builder.add_edge(&"a".into(), &"b".into());
        builder.add_edge(&"b".into(), &"c".into());
        let graph = builder.build();

        assert_eq!(graph.node_count, 3);
        assert_eq!(graph.edge_count(), 2);
        assert_eq!(graph.neighbors(1), &[0, 2]);
        assert!(graph.has_edge(0, 1));
        assert!(graph.has_edge(1, 0));
        assert!(!graph.has_edge(0, 2));
        assert_eq!(graph.undirected_edges().collect::<Vec<_>>(), vec![(0, 1), (1, 2)]);
    }

    #[test]
    fn converts_to_petgraph() {
        let mut builder = GraphBuilder::default();
        builder.add_edge(&"a".into(), &"b".into());
        builder.get_or_create_node(&"c".into());
        let graph = builder.build();

        let pg = graph.to_petgraph();
        assert_eq!(pg.node_count(), 3);
        assert_eq!(pg.edge_count(), 1);
        assert_eq!(petgraph::algo::connected_components(&pg), 2);
    }

    #[test]
    fn looks_up_nodes_by_identity() {
        let mut builder = GraphBuilder::default();
        builder.add_edge(&"a".into(), &7u64.into());
        let graph = builder.build();

        assert_eq!(graph.node_index(&7u64.into()), Some(1));
        assert_eq!(graph.node_index(&"zed".into()), None);
        assert!(graph.memory_usage() > 0);
    }
}
