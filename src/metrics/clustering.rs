//! Local clustering coefficients and density

use rayon::prelude::*;
use crate::graph::CompressedGraph;

/// Density of an undirected simple graph: `2m / (n(n-1))`
///
/// Graphs with fewer than two nodes have density 0.
pub fn density(graph: &CompressedGraph) -> f64 {
    let n = graph.node_count;
    if n <= 1 {
        return 0.0;
    }

    // Ordered node pairs; each undirected edge covers two of them
    let potential_edges = (n * (n - 1)) as f64;
    (2 * graph.edge_count()) as f64 / potential_edges
}

/// Local clustering coefficient of every node
///
/// For a node with `k >= 2` neighbors of which `t` pairs are adjacent the
/// coefficient is `2t / (k(k-1))`; nodes with fewer neighbors get 0.
pub fn clustering_coefficients(graph: &CompressedGraph, parallel: bool) -> Vec<f64> {
    let n = graph.node_count;
    if parallel {
        (0..n).into_par_iter().map(|v| local_clustering(graph, v)).collect()
    } else {
        (0..n).map(|v| local_clustering(graph, v)).collect()
    }
}

/// Mean of the local clustering coefficients; 0 for an empty slice
pub fn average_clustering(coefficients: &[f64]) -> f64 {
    if coefficients.is_empty() {
        return 0.0;
    }
    coefficients.iter().sum::<f64>() / coefficients.len() as f64
}

fn local_clustering(graph: &CompressedGraph, node: usize) -> f64 {
    let neighbors = graph.neighbors(node);
    let k = neighbors.len();
    if k < 2 {
        return 0.0;
    }

    // Each linked neighbor pair is seen once from either end
    let twice_links: usize = neighbors
        .iter()
        .map(|&u| sorted_intersection_len(graph.neighbors(u as usize), neighbors))
        .sum();

    twice_links as f64 / (k * (k - 1)) as f64
}

/// Size of the intersection of two sorted, duplicate-free slices
fn sorted_intersection_len(a: &[u32], b: &[u32]) -> usize {
    let (mut i, mut j, mut count) = (0, 0, 0);
    while i < a.len() && j < b.len() {
        match a[i].cmp(&b[j]) {
            std::cmp::Ordering::Less => i += 1,
            std::cmp::Ordering::Greater => j += 1,
            std::cmp::Ordering::Equal => {
                count += 1;
                i += 1;
                j += 1;
            }
        }
    }
    count
}

#[cfg(test)]
mod clustering_coefficient_tests {
    use super::*;
    use crate::data::AccountId;
    use crate::graph::builder::GraphBuilder;
    use proptest::prelude::*;

    fn graph_from(nodes: &[&str], edges: &[(&str, &str)]) -> CompressedGraph {
        let mut builder = GraphBuilder::default();
        for node in nodes {
            builder.get_or_create_node(&AccountId::from(*node));
        }
        for (a, b) in edges {
            builder.add_edge(&AccountId::from(*a), &AccountId::from(*b));
        }
        builder.build()
    }

    fn complete(n: u64) -> CompressedGraph {
        let mut builder = GraphBuilder::default();
        for a in 0..n {
            for b in (a + 1)..n {
                builder.add_edge(&AccountId::from(a), &AccountId::from(b));
            }
        }
        builder.build()
    }

    #[test]
    fn clusters_of_triangles() {
        // triangle 1-2-3 with a tail 1-4-5
        let graph = graph_from(
            &[],
            &[("1", "2"), ("1", "3"), ("2", "3"), ("1", "4"), ("4", "5")],
        );

        let expected = vec![1.0 / 3.0, 1.0, 1.0, 0.0, 0.0];
        let actual = clustering_coefficients(&graph, false);

        for (a, e) in actual.iter().zip(&expected) {
            assert!((a - e).abs() < 1e-12, "expected {e}, got {a}");
        }
    }

    #[test]
    fn leaves_and_isolated_nodes_are_exactly_zero() {
        let graph = graph_from(&["lonely"], &[("hub", "a"), ("hub", "b")]);
        let coefficients = clustering_coefficients(&graph, false);
        assert_eq!(coefficients, vec![0.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn complete_graph_density_is_one() {
        for n in 2..8 {
            assert_eq!(density(&complete(n)), 1.0);
        }
        assert!(clustering_coefficients(&complete(5), false)
            .iter()
            .all(|&c| c == 1.0));
    }

    #[test]
    fn edgeless_graph_density_is_zero() {
        let graph = graph_from(&["a", "b", "c"], &[]);
        assert_eq!(density(&graph), 0.0);
        assert_eq!(density(&graph_from(&["a"], &[])), 0.0);
    }

    #[test]
    fn average_of_empty_is_zero() {
        assert_eq!(average_clustering(&[]), 0.0);
        assert!((average_clustering(&[1.0, 0.0, 0.5]) - 0.5).abs() < 1e-12);
    }

    proptest! {
        #[test]
        fn coefficients_are_bounded_and_agree_in_parallel(
            edges in proptest::collection::vec((0u8..15, 0u8..15), 0..60)
        ) {
            let mut builder = GraphBuilder::default();
            for (a, b) in &edges {
                builder.add_edge(&AccountId::from(u64::from(*a)), &AccountId::from(u64::from(*b)));
            }
            let graph = builder.build();

            let sequential = clustering_coefficients(&graph, false);
            prop_assert_eq!(&sequential, &clustering_coefficients(&graph, true));

            for (v, c) in sequential.iter().enumerate() {
                prop_assert!((0.0..=1.0).contains(c));
                if graph.degree(v) < 2 {
                    prop_assert_eq!(*c, 0.0);
                }
            }

            let mean = sequential.iter().sum::<f64>() / sequential.len().max(1) as f64;
            prop_assert!((average_clustering(&sequential) - mean).abs() < 1e-12);
        }
    }
}
