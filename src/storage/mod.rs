//! Results persistence module

use anyhow::Result;
use csv::WriterBuilder;
use itertools::Itertools;
use serde::Serialize;
use serde_json::{json, to_string_pretty};
use statrs::statistics::Statistics;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;
use crate::bundle::{Metric, ResultBundle};
use crate::cluster::Cluster;
use crate::graph::CompressedGraph;

/// Number of entries in the "top" lists of the summary
const TOP_N: usize = 10;

/// Save analysis results to the specified directory
pub fn save_results(
    bundle: &ResultBundle,
    graph: &CompressedGraph,
    clusters: &[Cluster],
    output_dir: &str,
) -> Result<()> {
    log::info!("Saving results to {}", output_dir);

    // Ensure output directory exists
    fs::create_dir_all(output_dir)?;
    let dir = Path::new(output_dir);

    save_nodes_csv(bundle, &dir.join("nodes.csv"))?;
    save_edges_csv(bundle, &dir.join("edges.csv"))?;
    save_nodes_json(bundle, &dir.join("nodes.json"))?;
    save_edges_json(bundle, &dir.join("edges.json"))?;
    save_summary(bundle, graph, clusters, &dir.join("summary.json"))?;

    log::info!("Results saved successfully");

    Ok(())
}

/// One row per component node with all five metrics
fn save_nodes_csv(bundle: &ResultBundle, path: &Path) -> Result<()> {
    log::info!("Writing {}", path.display());

    // Headers carry the display labels rather than the struct field names
    let mut writer = WriterBuilder::new().has_headers(false).from_path(path)?;
    writer.write_record(std::iter::once("Node").chain(Metric::ALL.iter().map(|m| m.label())))?;

    for row in bundle.node_rows() {
        writer.serialize(row)?;
    }

    writer.flush()?;
    Ok(())
}

fn save_edges_csv(bundle: &ResultBundle, path: &Path) -> Result<()> {
    log::info!("Writing {}", path.display());

    let mut writer = WriterBuilder::new().has_headers(false).from_path(path)?;
    writer.write_record(["Source", "Target"])?;

    for edge in bundle.edges() {
        writer.serialize(edge)?;
    }

    writer.flush()?;
    Ok(())
}

fn save_nodes_json(bundle: &ResultBundle, path: &Path) -> Result<()> {
    log::info!("Writing {}", path.display());

    let mut file = File::create(path)?;
    file.write_all(to_string_pretty(&bundle.node_rows())?.as_bytes())?;

    Ok(())
}

#[derive(Serialize)]
struct EdgeRecord<'a> {
    source: &'a crate::data::AccountId,
    target: &'a crate::data::AccountId,
}

fn save_edges_json(bundle: &ResultBundle, path: &Path) -> Result<()> {
    log::info!("Writing {}", path.display());

    let edges = bundle.edges();
    let records: Vec<EdgeRecord> = edges
        .iter()
        .map(|(source, target)| EdgeRecord { source, target })
        .collect();

    let mut file = File::create(path)?;
    file.write_all(to_string_pretty(&records)?.as_bytes())?;

    Ok(())
}

/// Save summary statistics for the full graph, its components and each metric
fn save_summary(
    bundle: &ResultBundle,
    graph: &CompressedGraph,
    clusters: &[Cluster],
    path: &Path,
) -> Result<()> {
    log::info!("Saving summary information");

    let component = bundle.component();

    let metrics: serde_json::Map<String, serde_json::Value> = Metric::ALL
        .iter()
        .map(|&metric| {
            let values: Vec<f64> = bundle.metric(metric).values().collect();
            let top: Vec<_> = bundle
                .top_nodes(metric, TOP_N)
                .into_iter()
                .map(|(id, value)| json!({ "id": id, "value": value }))
                .collect();

            let stats = json!({
                "mean": values.iter().mean(),
                "std_dev": values.iter().population_std_dev(),
                "max": Statistics::max(values.iter()),
                "top": top,
            });
            (metric.key().to_string(), stats)
        })
        .collect();

    let top_mentioned: Vec<_> = graph
        .metadata
        .as_ref()
        .map(|metadata| {
            metadata
                .times_mentioned
                .iter()
                .enumerate()
                .filter(|(_, &count)| count > 0)
                .sorted_by(|a, b| b.1.cmp(a.1).then(a.0.cmp(&b.0)))
                .take(TOP_N)
                .map(|(idx, &count)| json!({ "id": graph.node_id(idx), "times_mentioned": count }))
                .collect()
        })
        .unwrap_or_default();

    let summary = json!({
        "graph_stats": {
            "node_count": graph.node_count,
            "edge_count": graph.edge_count(),
            "component_count": clusters.len(),
            "isolated_nodes": clusters.iter().filter(|c| c.size == 1).count(),
            "component_sizes": clusters.iter().map(|c| c.size).take(20).collect::<Vec<_>>(),
        },
        "component_stats": {
            "node_count": component.node_count(),
            "edge_count": component.edge_count(),
            "node_share": component.node_count() as f64 / graph.node_count.max(1) as f64,
            "density": bundle.density(),
            "average_clustering": bundle.average_clustering(),
            "is_directed": bundle.is_directed(),
            "eigenvector_iterations": bundle.eigenvector_iterations(),
        },
        "metrics": metrics,
        "top_mentioned": top_mentioned,
    });

    let mut file = File::create(path)?;
    file.write_all(to_string_pretty(&summary)?.as_bytes())?;

    Ok(())
}
