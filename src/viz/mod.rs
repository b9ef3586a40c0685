//! Visualization generation module

use anyhow::Result;
use csv::Writer;
use petgraph::dot::{Config as DotConfig, Dot};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;
use crate::bundle::{Metric, ResultBundle};

/// Metrics drawn as bar charts
const CHARTED_METRICS: [Metric; 2] = [Metric::Betweenness, Metric::Degree];

const BAR_WIDTH: usize = 24;
const CHART_HEIGHT: usize = 240;
const LABEL_SPACE: usize = 120;

/// Generate visualizations from analysis results
pub fn generate_visualizations(bundle: &ResultBundle, output_dir: &str) -> Result<()> {
    log::info!(
        "Generating visualizations for component with {} nodes",
        bundle.component().node_count()
    );

    // Create visualizations directory
    let viz_dir = Path::new(output_dir).join("visualizations");
    fs::create_dir_all(&viz_dir)?;

    for metric in CHARTED_METRICS {
        generate_chart_data(bundle, metric, &viz_dir)?;
    }

    generate_html_charts(bundle, &viz_dir)?;
    generate_graph_layout(bundle, &viz_dir)?;

    log::info!("Visualizations generated successfully");

    Ok(())
}

/// Bar-chart data for one metric, in component order
fn generate_chart_data(bundle: &ResultBundle, metric: Metric, viz_dir: &Path) -> Result<()> {
    let path = viz_dir.join(format!("{}.csv", metric.key()));
    let mut writer = Writer::from_path(path)?;

    writer.write_record(["node", metric.key()])?;

    let map = bundle.metric(metric);
    for id in bundle.component().node_ids() {
        writer.serialize((id, map.get(id).unwrap_or_default()))?;
    }

    writer.flush()?;
    Ok(())
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Inline SVG bar chart, one bar per node with a vertical label under it
fn svg_bar_chart(bundle: &ResultBundle, metric: Metric) -> String {
    let map = bundle.metric(metric);
    let ids = bundle.component().node_ids();
    let max = map.values().fold(0.0_f64, f64::max);

    let width = ids.len().max(1) * BAR_WIDTH + 40;
    let height = CHART_HEIGHT + LABEL_SPACE;
    let mut svg = format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{}\" height=\"{}\">\n",
        width, height
    );

    for (i, id) in ids.iter().enumerate() {
        let value = map.get(id).unwrap_or_default();
        let bar = if max > 0.0 {
            (value / max * CHART_HEIGHT as f64).round() as usize
        } else {
            0
        };
        let x = 20 + i * BAR_WIDTH;
        let label = escape_html(&id.to_string());

        svg.push_str(&format!(
            "  <rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"#4878a8\"><title>{}: {:.6}</title></rect>\n",
            x + 2,
            CHART_HEIGHT - bar,
            BAR_WIDTH - 4,
            bar,
            label,
            value
        ));
        svg.push_str(&format!(
            "  <text x=\"{x}\" y=\"{y}\" font-size=\"11\" transform=\"rotate(90 {x} {y})\">{label}</text>\n",
            x = x + BAR_WIDTH / 2 - 4,
            y = CHART_HEIGHT + 6,
            label = label
        ));
    }

    svg.push_str("</svg>\n");
    svg
}

/// Generate an HTML page with bar charts of the charted metrics
fn generate_html_charts(bundle: &ResultBundle, viz_dir: &Path) -> Result<()> {
    log::info!("Generating HTML charts");

    let mut index_file = BufWriter::new(File::create(viz_dir.join("index.html"))?);

    writeln!(index_file, "<!DOCTYPE html>")?;
    writeln!(index_file, "<html lang=\"en\">")?;
    writeln!(index_file, "<head>")?;
    writeln!(index_file, "  <meta charset=\"UTF-8\">")?;
    writeln!(index_file, "  <title>Mention Network Analysis</title>")?;
    writeln!(index_file, "  <style>")?;
    writeln!(index_file, "    body {{ font-family: Arial, sans-serif; margin: 20px; }}")?;
    writeln!(index_file, "    h1, h2 {{ color: #333; }}")?;
    writeln!(index_file, "    .stats {{ margin-top: 20px; background-color: #f9f9f9; padding: 15px; border-radius: 5px; }}")?;
    writeln!(index_file, "    .chart {{ overflow-x: auto; }}")?;
    writeln!(index_file, "  </style>")?;
    writeln!(index_file, "</head>")?;
    writeln!(index_file, "<body>")?;
    writeln!(index_file, "  <h1>Mention Network Analysis</h1>")?;

    let component = bundle.component();
    writeln!(index_file, "  <div class=\"stats\">")?;
    writeln!(index_file, "    <h2>Summary Statistics</h2>")?;
    writeln!(index_file, "    <p>Nodes: {}</p>", component.node_count())?;
    writeln!(index_file, "    <p>Edges: {}</p>", component.edge_count())?;
    writeln!(index_file, "    <p>Density: {:.4}</p>", bundle.density())?;
    writeln!(index_file, "    <p>Average Clustering: {:.4}</p>", bundle.average_clustering())?;
    writeln!(index_file, "    <p>Directed: {}</p>", bundle.is_directed())?;
    writeln!(index_file, "  </div>")?;

    for metric in CHARTED_METRICS {
        writeln!(index_file, "  <h2>{}</h2>", metric.label())?;
        writeln!(index_file, "  <div class=\"chart\">")?;
        index_file.write_all(svg_bar_chart(bundle, metric).as_bytes())?;
        writeln!(index_file, "  </div>")?;
    }

    writeln!(index_file, "</body>")?;
    writeln!(index_file, "</html>")?;

    index_file.flush()?;
    Ok(())
}

/// Write the component as a Graphviz DOT file for layout tools
fn generate_graph_layout(bundle: &ResultBundle, viz_dir: &Path) -> Result<()> {
    log::info!("Generating graph layout file");

    let graph = bundle
        .component()
        .graph()
        .to_petgraph()
        .map(|_, id| id.to_string(), |_, _| String::new());

    let dot = Dot::with_config(&graph, &[DotConfig::EdgeNoLabel]);
    fs::write(viz_dir.join("component.dot"), format!("{}", dot))?;

    Ok(())
}
