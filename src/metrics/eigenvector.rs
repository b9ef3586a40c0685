//! Eigenvector centrality via power iteration.
//!
//! # Algorithm
//!
//! Power iteration on `A + I` rather than the bare adjacency matrix `A`.
//! Both share their eigenvectors, but on bipartite graphs (stars, paths,
//! trees) the spectrum of `A` is symmetric and the iteration flips between
//! two vectors forever; the shift breaks that tie.
//!
//! 1. Start from `1/n` everywhere.
//! 2. `x' = x + A x`, then scale `x'` to unit L2 norm.
//! 3. Stop once no entry moved by `tolerance` or more.
//!
//! Reaching `max_iterations` without settling is an error, never a stale
//! estimate.

use ndarray::Array1;
use crate::error::{AnalysisError, AnalysisResult};
use crate::graph::CompressedGraph;

/// Converged eigenvector scores
#[derive(Debug, Clone)]
pub struct EigenvectorScores {
    /// Unit-norm scores, indexed like the graph
    pub scores: Vec<f64>,

    /// Iterations performed before convergence
    pub iterations: usize,
}

/// Compute eigenvector centrality for every node of a component
pub fn eigenvector_centrality(
    graph: &CompressedGraph,
    max_iterations: usize,
    tolerance: f64,
) -> AnalysisResult<EigenvectorScores> {
    let n = graph.node_count;
    if n == 0 {
        return Err(AnalysisError::EmptyGraph);
    }
    if graph.edge_count() == 0 {
        return Err(AnalysisError::DegenerateGraph {
            metric: "eigenvector centrality",
            reason: "component has no edges".to_string(),
        });
    }

    let mut x = Array1::from_elem(n, 1.0 / n as f64);
    let mut max_change = f64::INFINITY;

    for iteration in 1..=max_iterations {
        let mut next = x.clone();
        for v in 0..n {
            next[v] += graph.neighbors(v).iter().map(|&u| x[u as usize]).sum::<f64>();
        }

        // Entries stay positive, so the norm is never zero
        let norm = next.dot(&next).sqrt();
        next /= norm;

        max_change = (&next - &x).iter().fold(0.0_f64, |acc, d| acc.max(d.abs()));
        x = next;

        if max_change < tolerance {
            log::debug!(
                "Eigenvector centrality converged after {} iterations",
                iteration
            );
            return Ok(EigenvectorScores {
                scores: x.to_vec(),
                iterations: iteration,
            });
        }
    }

    Err(AnalysisError::Convergence {
        iterations: max_iterations,
        max_change,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::AccountId;
    use crate::graph::builder::GraphBuilder;

    fn graph_from(edges: &[(&str, &str)]) -> CompressedGraph {
        let mut builder = GraphBuilder::default();
        for (a, b) in edges {
            builder.add_edge(&AccountId::from(*a), &AccountId::from(*b));
        }
        builder.build()
    }

    fn l2_norm(scores: &[f64]) -> f64 {
        scores.iter().map(|s| s * s).sum::<f64>().sqrt()
    }

    #[test]
    fn star_center_scores_highest() {
        let graph = graph_from(&[("hub", "a"), ("hub", "b"), ("hub", "c")]);
        let result = eigenvector_centrality(&graph, 1000, 1e-9).unwrap();

        // Perron vector of a 3-leaf star: hub = 1/sqrt(2), leaves = 1/sqrt(6)
        assert!((result.scores[0] - 0.5_f64.sqrt()).abs() < 1e-6);
        for leaf in &result.scores[1..] {
            assert!((leaf - 1.0 / 6.0_f64.sqrt()).abs() < 1e-6);
        }
    }

    #[test]
    fn path_middle_nodes_score_higher() {
        let graph = graph_from(&[("a", "b"), ("b", "c"), ("c", "d")]);
        let result = eigenvector_centrality(&graph, 1000, 1e-6).unwrap();
        let s = &result.scores;

        assert!(s[1] > s[0], "b={} a={}", s[1], s[0]);
        assert!(s[2] > s[3], "c={} d={}", s[2], s[3]);
        assert!((s[1] - s[2]).abs() < 1e-5);
    }

    #[test]
    fn scores_have_unit_norm() {
        let graph = graph_from(&[("a", "b"), ("b", "c"), ("a", "c"), ("c", "d")]);
        let result = eigenvector_centrality(&graph, 1000, 1e-6).unwrap();

        assert!((l2_norm(&result.scores) - 1.0).abs() < 1e-6);
        assert!(result.scores.iter().all(|&s| s > 0.0));
        assert!(result.iterations >= 1);
    }

    #[test]
    fn edgeless_component_is_degenerate() {
        let mut builder = GraphBuilder::default();
        builder.get_or_create_node(&AccountId::from("alone"));
        let err = eigenvector_centrality(&builder.build(), 100, 1e-6).unwrap_err();
        assert!(matches!(err, AnalysisError::DegenerateGraph { .. }));
    }

    #[test]
    fn iteration_cap_surfaces_convergence_error() {
        let graph = graph_from(&[("a", "b"), ("b", "c"), ("c", "d"), ("d", "e")]);
        let err = eigenvector_centrality(&graph, 2, 1e-12).unwrap_err();

        match err {
            AnalysisError::Convergence { iterations, max_change } => {
                assert_eq!(iterations, 2);
                assert!(max_change > 1e-12);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn zero_iterations_never_converge() {
        let graph = graph_from(&[("a", "b")]);
        assert!(matches!(
            eigenvector_centrality(&graph, 0, 1e-6),
            Err(AnalysisError::Convergence { iterations: 0, .. })
        ));
    }
}
