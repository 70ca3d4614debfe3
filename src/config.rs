//! Configuration management for the cluster spacing analyzer

/// Number of nodes each parallel candidate-scan task covers
pub const PARALLEL_CHUNK_SIZE: usize = 10_000;

/// Settings shared by the analysis entry points
#[derive(Debug, Clone)]
pub struct Config {
    /// Target number of clusters for the spacing analysis
    pub target_clusters: usize,

    /// Smallest spacing the max-clusters analysis must preserve
    pub min_spacing: u32,

    /// Directory where result files are written
    pub output_dir: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            target_clusters: 4,
            min_spacing: 3,
            output_dir: "cluster_results".to_string(),
        }
    }
}

impl Config {
    /// Create a new configuration with custom values
    pub fn new(target_clusters: usize, min_spacing: u32, output_dir: String) -> Self {
        Self {
            target_clusters,
            min_spacing,
            output_dir,
        }
    }
}
