//! Subgraph extraction for the analysis stage

use crate::graph::CompressedGraph;

/// Extract the subgraph induced by `members`
///
/// Nodes are re-indexed `0..members.len()` in the order given; only edges
/// with both endpoints among the members are kept.
pub fn extract_subgraph(graph: &CompressedGraph, members: &[u32]) -> CompressedGraph {
    let subgraph_size = members.len();

    // Create mapping from original to subgraph indices
    let mut orig_to_sub = vec![u32::MAX; graph.node_count];
    for (i, &member) in members.iter().enumerate() {
        orig_to_sub[member as usize] = i as u32;
    }

    // Count adjacency entries in the subgraph
    let entry_count: usize = members
        .iter()
        .map(|&node| {
            graph.neighbors(node as usize)
                .iter()
                .filter(|&&target| orig_to_sub[target as usize] != u32::MAX)
                .count()
        })
        .sum();

    let mut subgraph = CompressedGraph::with_capacity(subgraph_size, entry_count / 2);

    // Fill offsets and edges
    subgraph.offsets.push(0);
    let mut offset = 0;

    for &node in members {
        let start = subgraph.edges.len();
        for &target in graph.neighbors(node as usize) {
            let mapped = orig_to_sub[target as usize];
            // Only include edges where both endpoints are in the subgraph
            if mapped != u32::MAX {
                subgraph.edges.push(mapped);
                offset += 1;
            }
        }
        subgraph.edges[start..].sort_unstable();
        subgraph.offsets.push(offset);
    }

    subgraph.node_count = subgraph_size;
    subgraph.node_ids = members
        .iter()
        .map(|&m| graph.node_ids[m as usize].clone())
        .collect();
    subgraph.metadata = graph.metadata.as_ref().map(|m| m.subset(members));

    subgraph
}
