//! Configuration management for the mention network analyzer

/// Settings for the metrics engine
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Iteration cap for eigenvector power iteration
    pub eigenvector_max_iterations: usize,

    /// Maximum per-entry change at which power iteration counts as converged
    pub eigenvector_tolerance: f64,

    /// Component size from which metrics run on the rayon pool
    pub parallel_threshold: usize,

    /// Divide betweenness by (n-1)(n-2); otherwise report pair counts
    pub normalize_betweenness: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            eigenvector_max_iterations: 1000,
            eigenvector_tolerance: 1e-6,
            parallel_threshold: 1000,
            normalize_betweenness: true,
        }
    }
}

impl Config {
    /// Create a new configuration with custom values
    pub fn new(
        eigenvector_max_iterations: usize,
        eigenvector_tolerance: f64,
        parallel_threshold: usize,
        normalize_betweenness: bool,
    ) -> Self {
        Self {
            eigenvector_max_iterations,
            eigenvector_tolerance,
            parallel_threshold,
            normalize_betweenness,
        }
    }

    /// Whether a component of `node_count` nodes should be processed in parallel
    pub fn use_parallel(&self, node_count: usize) -> bool {
        node_count >= self.parallel_threshold
    }
}
