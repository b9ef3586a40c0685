//! Structural metrics over the dominant component
//!
//! # Overview
//!
//! - **Degree centrality** (`centrality`): share of the other nodes a node
//!   is linked to.
//! - **Closeness centrality** (`centrality`): inverse mean hop distance.
//! - **Betweenness centrality** (`centrality`): share of shortest paths
//!   running through a node (Brandes).
//! - **Eigenvector centrality** (`eigenvector`): influence by being linked
//!   to influential nodes.
//! - **Clustering coefficient** and **density** (`clustering`).
//!
//! [`MetricsEngine`] runs all of them on one [`Component`] and packs the
//! outcome into a [`ResultBundle`]. Any failing metric fails the whole run.

pub mod centrality;
pub mod clustering;
pub mod eigenvector;

use std::collections::HashMap;
use serde::Serialize;
use crate::bundle::ResultBundle;
use crate::cluster::detection::select_dominant_component;
use crate::cluster::Component;
use crate::config::Config;
use crate::data::{AccountId, Post};
use crate::error::{AnalysisError, AnalysisResult};
use crate::graph::{build_mention_graph, CompressedGraph};
use eigenvector::EigenvectorScores;

/// Per-node values of one metric, keyed by account
///
/// Built only from a component's node list, so its key set is exactly the
/// component's node set.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct MetricMap {
    scores: HashMap<AccountId, f64>,
}

impl MetricMap {
    /// Pair `values` with `ids` position by position
    pub(crate) fn from_scores(ids: &[AccountId], values: Vec<f64>) -> Self {
        debug_assert_eq!(ids.len(), values.len());
        Self {
            scores: ids.iter().cloned().zip(values).collect(),
        }
    }

    pub fn get(&self, id: &AccountId) -> Option<f64> {
        self.scores.get(id).copied()
    }

    pub fn contains(&self, id: &AccountId) -> bool {
        self.scores.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// Entries in arbitrary order
    pub fn iter(&self) -> impl Iterator<Item = (&AccountId, f64)> + '_ {
        self.scores.iter().map(|(id, &score)| (id, score))
    }

    /// Values in arbitrary order
    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.scores.values().copied()
    }
}

/// Computes every metric for a component
///
/// Holds configuration only; each call is independent of the previous one.
#[derive(Debug, Clone, Default)]
pub struct MetricsEngine {
    config: Config,
}

/// Raw per-node outputs before they are keyed by account
struct MetricVectors {
    degree: Vec<f64>,
    betweenness: Vec<f64>,
    closeness: Vec<f64>,
    eigenvector: EigenvectorScores,
    clustering: Vec<f64>,
}

impl MetricsEngine {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Compute all metrics and assemble the result bundle
    pub fn analyze(&self, component: Component) -> AnalysisResult<ResultBundle> {
        let n = component.node_count();
        if n == 0 {
            return Err(AnalysisError::EmptyGraph);
        }

        let parallel = self.config.use_parallel(n);
        log::info!(
            "Computing metrics for {} nodes and {} edges ({})",
            n,
            component.edge_count(),
            if parallel { "parallel" } else { "sequential" }
        );

        let vectors = if parallel {
            self.compute_parallel(component.graph())?
        } else {
            self.compute_sequential(component.graph())?
        };

        let ids = component.node_ids();
        let degree = MetricMap::from_scores(ids, vectors.degree);
        let betweenness = MetricMap::from_scores(ids, vectors.betweenness);
        let closeness = MetricMap::from_scores(ids, vectors.closeness);
        let eigenvector = MetricMap::from_scores(ids, vectors.eigenvector.scores);
        let clustering = MetricMap::from_scores(ids, vectors.clustering);

        Ok(ResultBundle::new(
            component,
            degree,
            betweenness,
            closeness,
            eigenvector,
            clustering,
            vectors.eigenvector.iterations,
        ))
    }

    fn compute_sequential(&self, graph: &CompressedGraph) -> AnalysisResult<MetricVectors> {
        let degree = centrality::degree_centrality(graph)?;
        let betweenness =
            centrality::betweenness_centrality(graph, self.config.normalize_betweenness, false);
        let closeness = centrality::closeness_centrality(graph, false);
        let eigenvector = self.eigenvector(graph)?;
        let clustering = clustering::clustering_coefficients(graph, false);

        Ok(MetricVectors {
            degree,
            betweenness,
            closeness,
            eigenvector,
            clustering,
        })
    }

    fn compute_parallel(&self, graph: &CompressedGraph) -> AnalysisResult<MetricVectors> {
        let normalize = self.config.normalize_betweenness;

        let ((degree, closeness), ((betweenness, eigenvector), clustering)) = rayon::join(
            || {
                rayon::join(
                    || centrality::degree_centrality(graph),
                    || centrality::closeness_centrality(graph, true),
                )
            },
            || {
                rayon::join(
                    || {
                        rayon::join(
                            || centrality::betweenness_centrality(graph, normalize, true),
                            || self.eigenvector(graph),
                        )
                    },
                    || clustering::clustering_coefficients(graph, true),
                )
            },
        );

        // Report errors in the same order as the sequential path
        Ok(MetricVectors {
            degree: degree?,
            betweenness,
            closeness,
            eigenvector: eigenvector?,
            clustering,
        })
    }

    fn eigenvector(&self, graph: &CompressedGraph) -> AnalysisResult<EigenvectorScores> {
        eigenvector::eigenvector_centrality(
            graph,
            self.config.eigenvector_max_iterations,
            self.config.eigenvector_tolerance,
        )
    }
}

/// Select the dominant component of `graph` and analyze it
pub fn analyze_graph(graph: &CompressedGraph, config: &Config) -> AnalysisResult<ResultBundle> {
    let component = select_dominant_component(graph)?;
    MetricsEngine::new(config.clone()).analyze(component)
}

/// Run the whole pipeline on a post sequence
pub fn analyze_posts(posts: &[Post], config: &Config) -> AnalysisResult<ResultBundle> {
    let graph = build_mention_graph(posts);
    analyze_graph(&graph, config)
}
