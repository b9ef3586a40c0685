use anyhow::Result;
use clap::Parser;
use mention_network_analyzer::bundle::Metric;
use mention_network_analyzer::cluster::detection::{find_connected_components, select_dominant_component};
use mention_network_analyzer::config::Config;
use mention_network_analyzer::graph::GraphBuilder;
use mention_network_analyzer::metrics::MetricsEngine;
use mention_network_analyzer::{data, storage, viz};

#[derive(Parser, Debug)]
#[clap(
    name = "mention-network-analyzer",
    about = "Centrality and clustering analysis of social-media mention graphs"
)]
struct Cli {
    /// Path to input posts (.parquet, .json or .jsonl)
    #[clap(long)]
    input: String,

    /// Output directory for results
    #[clap(long, default_value = "analysis_results")]
    output_dir: String,

    /// Only analyze the first N posts
    #[clap(long)]
    max_posts: Option<usize>,

    /// Iteration cap for eigenvector centrality
    #[clap(long, default_value = "1000")]
    max_iterations: usize,

    /// Convergence tolerance for eigenvector centrality
    #[clap(long, default_value = "1e-6")]
    tolerance: f64,

    /// Report betweenness as raw pair counts instead of normalized values
    #[clap(long)]
    raw_betweenness: bool,

    /// Skip visualizations
    #[clap(long)]
    skip_viz: bool,

    /// Number of worker threads (0 = use all available cores)
    #[clap(long, default_value = "0")]
    threads: usize,

    /// Verbose logging
    #[clap(long, short)]
    verbose: bool,
}

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Cli::parse();

    // Configure logging
    let log_level = if args.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    env_logger::Builder::new()
        .filter_level(log_level)
        .format_timestamp_millis()
        .init();

    // Set number of threads
    let num_threads = if args.threads > 0 {
        args.threads
    } else {
        // If threads = 0, use all available cores
        num_cpus::get()
    };

    log::info!("Using {} worker threads", num_threads);
    rayon::ThreadPoolBuilder::new()
        .num_threads(num_threads)
        .build_global()?;

    log::info!("Starting mention network analysis");
    log::info!("Input: {}", args.input);
    log::info!("Output: {}", args.output_dir);

    let config = Config {
        eigenvector_max_iterations: args.max_iterations,
        eigenvector_tolerance: args.tolerance,
        normalize_betweenness: !args.raw_betweenness,
        ..Config::default()
    };

    // 1. Load posts
    let posts = data::load_posts(&args.input, args.max_posts)?;

    // 2. Build the mention graph
    let mut builder = GraphBuilder::with_capacity(posts.len());
    builder.ingest(&posts);
    let graph = builder.build();

    log::info!(
        "Built graph with {} nodes and {} edges ({} bytes)",
        graph.node_count,
        graph.edge_count(),
        graph.memory_usage()
    );

    // 3. Select the dominant component
    let clusters = find_connected_components(&graph);
    let component = select_dominant_component(&graph)?;

    // 4. Compute metrics
    let bundle = MetricsEngine::new(config).analyze(component)?;

    log::info!("Density: {:.6}", bundle.density());
    log::info!("Average clustering: {:.6}", bundle.average_clustering());
    log::info!("Directed: {}", bundle.is_directed());
    for metric in Metric::ALL {
        for (id, score) in bundle.top_nodes(metric, 5) {
            log::info!("{} top: {} = {:.6}", metric.label(), id, score);
        }
    }

    // 5. Save results
    std::fs::create_dir_all(&args.output_dir)?;
    storage::save_results(&bundle, &graph, &clusters, &args.output_dir)?;

    // 6. Generate visualizations if requested
    if !args.skip_viz {
        viz::generate_visualizations(&bundle, &args.output_dir)?;
    }

    log::info!("Analysis complete. Results saved to {}", args.output_dir);

    Ok(())
}
