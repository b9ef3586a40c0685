//! Core library functions for the mention network analyzer

pub mod config;
pub mod error;
pub mod data;
pub mod graph;
pub mod cluster;
pub mod metrics;
pub mod bundle;
pub mod storage;
pub mod viz;

pub use bundle::{Metric, NodeMetrics, ResultBundle};
pub use config::Config;
pub use data::{AccountId, Post};
pub use error::AnalysisError;
pub use metrics::{analyze_graph, analyze_posts, MetricMap, MetricsEngine};
