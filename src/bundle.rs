//! Immutable analysis result handed to exporters and plotting

use itertools::Itertools;
use serde::Serialize;
use crate::cluster::Component;
use crate::data::AccountId;
use crate::metrics::clustering::{average_clustering, density};
use crate::metrics::MetricMap;

/// The per-node metrics carried by a [`ResultBundle`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Metric {
    Degree,
    Betweenness,
    Closeness,
    Eigenvector,
    Clustering,
}

impl Metric {
    pub const ALL: [Metric; 5] = [
        Metric::Degree,
        Metric::Betweenness,
        Metric::Closeness,
        Metric::Eigenvector,
        Metric::Clustering,
    ];

    /// Human-readable name, as used in column headers
    pub fn label(self) -> &'static str {
        match self {
            Metric::Degree => "Degree Centrality",
            Metric::Betweenness => "Betweenness Centrality",
            Metric::Closeness => "Closeness Centrality",
            Metric::Eigenvector => "Eigenvector Centrality",
            Metric::Clustering => "Clustering Coefficient",
        }
    }

    /// snake_case key, as used in JSON records and file names
    pub fn key(self) -> &'static str {
        match self {
            Metric::Degree => "degree_centrality",
            Metric::Betweenness => "betweenness_centrality",
            Metric::Closeness => "closeness_centrality",
            Metric::Eigenvector => "eigenvector_centrality",
            Metric::Clustering => "clustering_coefficient",
        }
    }
}

/// All metrics of one node
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeMetrics {
    pub id: AccountId,
    pub degree_centrality: f64,
    pub betweenness_centrality: f64,
    pub closeness_centrality: f64,
    pub eigenvector_centrality: f64,
    pub clustering_coefficient: f64,
}

/// Selected component plus every metric computed over it
///
/// Created once per run by the metrics engine; read-only afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultBundle {
    component: Component,
    degree: MetricMap,
    betweenness: MetricMap,
    closeness: MetricMap,
    eigenvector: MetricMap,
    clustering: MetricMap,
    density: f64,
    is_directed: bool,
    eigenvector_iterations: usize,
}

impl ResultBundle {
    pub(crate) fn new(
        component: Component,
        degree: MetricMap,
        betweenness: MetricMap,
        closeness: MetricMap,
        eigenvector: MetricMap,
        clustering: MetricMap,
        eigenvector_iterations: usize,
    ) -> Self {
        let density = density(component.graph());
        Self {
            component,
            degree,
            betweenness,
            closeness,
            eigenvector,
            clustering,
            density,
            is_directed: false,
            eigenvector_iterations,
        }
    }

    pub fn component(&self) -> &Component {
        &self.component
    }

    pub fn degree_centrality(&self) -> &MetricMap {
        &self.degree
    }

    pub fn betweenness_centrality(&self) -> &MetricMap {
        &self.betweenness
    }

    pub fn closeness_centrality(&self) -> &MetricMap {
        &self.closeness
    }

    pub fn eigenvector_centrality(&self) -> &MetricMap {
        &self.eigenvector
    }

    pub fn clustering(&self) -> &MetricMap {
        &self.clustering
    }

    pub fn metric(&self, metric: Metric) -> &MetricMap {
        match metric {
            Metric::Degree => &self.degree,
            Metric::Betweenness => &self.betweenness,
            Metric::Closeness => &self.closeness,
            Metric::Eigenvector => &self.eigenvector,
            Metric::Clustering => &self.clustering,
        }
    }

    pub fn density(&self) -> f64 {
        self.density
    }

    /// Mention graphs are undirected
    pub fn is_directed(&self) -> bool {
        self.is_directed
    }

    pub fn eigenvector_iterations(&self) -> usize {
        self.eigenvector_iterations
    }

    /// Mean local clustering coefficient over the component
    pub fn average_clustering(&self) -> f64 {
        let coefficients: Vec<f64> = self
            .component
            .node_ids()
            .iter()
            .map(|id| self.clustering.get(id).unwrap_or_default())
            .collect();
        average_clustering(&coefficients)
    }

    /// One row per node, in component order
    pub fn node_rows(&self) -> Vec<NodeMetrics> {
        // Every map shares the component's key set
        let value = |map: &MetricMap, id: &AccountId| map.get(id).unwrap_or_default();

        self.component
            .node_ids()
            .iter()
            .map(|id| NodeMetrics {
                id: id.clone(),
                degree_centrality: value(&self.degree, id),
                betweenness_centrality: value(&self.betweenness, id),
                closeness_centrality: value(&self.closeness, id),
                eigenvector_centrality: value(&self.eigenvector, id),
                clustering_coefficient: value(&self.clustering, id),
            })
            .collect()
    }

    /// Each edge of the component once
    pub fn edges(&self) -> Vec<(AccountId, AccountId)> {
        let graph = self.component.graph();
        graph
            .undirected_edges()
            .map(|(a, b)| {
                (
                    graph.node_id(a as usize).clone(),
                    graph.node_id(b as usize).clone(),
                )
            })
            .collect()
    }

    /// The `k` highest-scoring nodes for `metric`, ties by identity
    pub fn top_nodes(&self, metric: Metric, k: usize) -> Vec<(AccountId, f64)> {
        self.metric(metric)
            .iter()
            .sorted_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(b.0)))
            .take(k)
            .map(|(id, score)| (id.clone(), score))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::data::Post;
    use crate::metrics::analyze_posts;

    fn id(s: &str) -> AccountId {
        AccountId::from(s)
    }

    fn star_bundle() -> ResultBundle {
        let posts = vec![
            Post::new("hub", "@a @b"),
            Post::new("c", "hey @hub"),
        ];
        analyze_posts(&posts, &Config::default()).unwrap()
    }

    #[test]
    fn rows_follow_component_order() {
        let bundle = star_bundle();
        let rows = bundle.node_rows();

        let ids: Vec<String> = rows.iter().map(|r| r.id.to_string()).collect();
        assert_eq!(ids, vec!["hub", "a", "b", "c"]);
        assert_eq!(rows[0].degree_centrality, 1.0);
        assert!((rows[0].betweenness_centrality - 1.0).abs() < 1e-12);
        assert_eq!(rows[1].clustering_coefficient, 0.0);
    }

    #[test]
    fn lists_each_edge_once() {
        let bundle = star_bundle();
        assert_eq!(
            bundle.edges(),
            vec![(id("hub"), id("a")), (id("hub"), id("b")), (id("hub"), id("c"))]
        );
    }

    #[test]
    fn top_nodes_are_sorted_by_score() {
        let bundle = star_bundle();
        let top = bundle.top_nodes(Metric::Degree, 2);
        assert_eq!(top[0], (id("hub"), 1.0));
        assert_eq!(top[1].0, id("a"));
        assert_eq!(bundle.top_nodes(Metric::Clustering, 10).len(), 4);
    }

    #[test]
    fn reports_shape_of_the_component() {
        let bundle = star_bundle();
        assert!(!bundle.is_directed());
        assert!((bundle.density() - 0.5).abs() < 1e-12);
        assert_eq!(bundle.average_clustering(), 0.0);
        assert!(bundle.eigenvector_iterations() > 0);
    }

    #[test]
    fn serializes_metric_maps_by_account() {
        let bundle = star_bundle();
        let json = serde_json::to_value(&bundle).unwrap();
        assert_eq!(json["degree"]["hub"], 1.0);
        assert_eq!(json["is_directed"], false);
    }
}
