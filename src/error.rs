//! Error types surfaced by the analysis core

use thiserror::Error;

/// Terminal failures of an analysis run
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnalysisError {
    /// Ingestion produced no nodes at all
    #[error("graph has no nodes; nothing to analyze")]
    EmptyGraph,

    /// A metric is mathematically undefined on the selected component
    #[error("{metric} is undefined on this component: {reason}")]
    DegenerateGraph {
        metric: &'static str,
        reason: String,
    },

    /// Power iteration hit its iteration cap before settling
    #[error("eigenvector centrality did not converge after {iterations} iterations (last max change {max_change:.3e})")]
    Convergence { iterations: usize, max_change: f64 },
}

pub type AnalysisResult<T> = std::result::Result<T, AnalysisError>;
