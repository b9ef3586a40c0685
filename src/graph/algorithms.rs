//! Breadth-first traversal primitives shared by the centrality metrics

use std::collections::VecDeque;
use crate::graph::CompressedGraph;

/// Marker for nodes a BFS never reached
pub const UNREACHABLE: u32 = u32::MAX;

/// Hop distances from `source` to every node
///
/// Unreached nodes hold [`UNREACHABLE`].
pub fn bfs_distances(graph: &CompressedGraph, source: usize) -> Vec<u32> {
    let mut dist = vec![UNREACHABLE; graph.node_count];
    dist[source] = 0;

    let mut queue = VecDeque::with_capacity(graph.node_count);
    queue.push_back(source as u32);

    while let Some(v) = queue.pop_front() {
        let next = dist[v as usize] + 1;
        for &w in graph.neighbors(v as usize) {
            if dist[w as usize] == UNREACHABLE {
                dist[w as usize] = next;
                queue.push_back(w);
            }
        }
    }

    dist
}

/// Shortest-path structure rooted at one source, as Brandes' algorithm needs it
#[derive(Debug, Clone)]
pub struct ShortestPaths {
    /// Nodes in non-decreasing distance from the source
    pub order: Vec<u32>,

    /// Number of shortest paths from the source to each node
    pub sigma: Vec<f64>,

    /// Immediate predecessors of each node on shortest paths
    pub predecessors: Vec<Vec<u32>>,
}

impl ShortestPaths {
    /// Run a BFS from `source`, counting shortest paths
    pub fn from_source(graph: &CompressedGraph, source: usize) -> Self {
        let n = graph.node_count;
        let mut order = Vec::with_capacity(n);
        let mut predecessors: Vec<Vec<u32>> = vec![Vec::new(); n];
        let mut sigma = vec![0.0; n];
        let mut dist = vec![UNREACHABLE; n];

        sigma[source] = 1.0;
        dist[source] = 0;

        let mut queue = VecDeque::with_capacity(n);
        queue.push_back(source as u32);

        while let Some(v) = queue.pop_front() {
            let vi = v as usize;
            order.push(v);

            for &w in graph.neighbors(vi) {
                let wi = w as usize;

                // First visit to w?
                if dist[wi] == UNREACHABLE {
                    dist[wi] = dist[vi] + 1;
                    queue.push_back(w);
                }

                // Shortest path to w via v?
                if dist[wi] == dist[vi] + 1 {
                    sigma[wi] += sigma[vi];
                    predecessors[wi].push(v);
                }
            }
        }

        Self {
            order,
            sigma,
            predecessors,
        }
    }

    /// Pair dependencies of the source on every node, accumulated farthest first
    pub fn dependencies(&self, node_count: usize) -> Vec<f64> {
        let mut delta = vec![0.0; node_count];

        for &w in self.order.iter().rev() {
            let wi = w as usize;
            let coeff = (1.0 + delta[wi]) / self.sigma[wi];
            for &v in &self.predecessors[wi] {
                delta[v as usize] += self.sigma[v as usize] * coeff;
            }
        }

        delta
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::builder::GraphBuilder;

    fn graph_from(edges: &[(&str, &str)]) -> CompressedGraph {
        let mut builder = GraphBuilder::default();
        for (a, b) in edges {
            builder.add_edge(&(*a).into(), &(*b).into());
        }
        builder.build()
    }

    #[test]
    fn distances_along_a_path() {
        let graph = graph_from(&[("a", "b"), ("b", "c"), ("c", "d")]);
        assert_eq!(bfs_distances(&graph, 0), vec![0, 1, 2, 3]);
        assert_eq!(bfs_distances(&graph, 2), vec![2, 1, 0, 1]);
    }

    #[test]
    fn unreached_nodes_are_marked() {
        let graph = graph_from(&[("a", "b"), ("c", "d")]);
        let dist = bfs_distances(&graph, 0);
        assert_eq!(dist[1], 1);
        assert_eq!(dist[2], UNREACHABLE);
        assert_eq!(dist[3], UNREACHABLE);
    }

    #[test]
    fn counts_shortest_paths_in_a_square() {
        // a - b
        // |   |
        // c - d
        let graph = graph_from(&[("a", "b"), ("a", "c"), ("b", "d"), ("c", "d")]);
        let paths = ShortestPaths::from_source(&graph, 0);

        assert_eq!(paths.order[0], 0);
        assert_eq!(paths.sigma, vec![1.0, 1.0, 1.0, 2.0]);
        assert_eq!(paths.predecessors[3], vec![1, 2]);

        let delta = paths.dependencies(4);
        assert!((delta[1] - 0.5).abs() < 1e-12);
        assert!((delta[2] - 0.5).abs() < 1e-12);
        assert_eq!(delta[3], 0.0);
    }
}
