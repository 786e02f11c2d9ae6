//! Precomputation settings for the route network.

/// Configuration for building a [`RouteNetwork`](super::RouteNetwork).
#[derive(Debug, Clone)]
pub struct PlannerConfig {
    /// Relax the rows of each Floyd–Warshall pass on the rayon pool.
    pub parallel_relaxation: bool,

    /// Graphs with fewer vertices than this are relaxed sequentially
    /// even when `parallel_relaxation` is set.
    pub min_parallel_vertices: usize,
}

impl PlannerConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(parallel_relaxation: bool, min_parallel_vertices: usize) -> Self {
        Self {
            parallel_relaxation,
            min_parallel_vertices,
        }
    }

    /// Whether a graph of `vertex_count` vertices gets parallel relaxation.
    pub fn use_parallel_relaxation(&self, vertex_count: usize) -> bool {
        self.parallel_relaxation && vertex_count >= self.min_parallel_vertices
    }
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            parallel_relaxation: true,
            min_parallel_vertices: 256,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = PlannerConfig::default();

        assert!(config.parallel_relaxation);
        assert_eq!(config.min_parallel_vertices, 256);
    }

    #[test]
    fn small_graphs_stay_sequential() {
        let config = PlannerConfig::default();

        assert!(!config.use_parallel_relaxation(10));
        assert!(config.use_parallel_relaxation(256));
        assert!(config.use_parallel_relaxation(5000));
    }

    #[test]
    fn custom_config() {
        let config = PlannerConfig::new(false, 0);

        assert!(!config.parallel_relaxation);
        assert_eq!(config.min_parallel_vertices, 0);
        assert!(!config.use_parallel_relaxation(1000));
    }
}
