//! Summary statistics for a clustering invocation.

use crate::cluster::Cluster;

/// Statistics derived from a clustering result.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ClusteringStatistics {
    /// Hits presented to the algorithm.
    pub hits_processed: usize,
    /// Clusters in the output.
    pub clusters_found: usize,
    /// Hits that belong to some cluster.
    pub clustered_hits: usize,
    /// Hits in no cluster (noise, or members of dropped components).
    pub noise_hits: usize,
    /// Size of the largest cluster.
    pub largest_cluster_size: usize,
    /// Mean cluster size (0 when no clusters were found).
    pub mean_cluster_size: f64,
}

impl ClusteringStatistics {
    /// Summarizes a finished clustering result.
    #[must_use]
    pub fn from_clusters(hits_processed: usize, clusters: &[Cluster]) -> Self {
        let clustered_hits: usize = clusters.iter().map(|c| c.size).sum();
        let largest_cluster_size = clusters.iter().map(|c| c.size).max().unwrap_or(0);
        let mean_cluster_size = if clusters.is_empty() {
            0.0
        } else {
            clustered_hits as f64 / clusters.len() as f64
        };
        Self {
            hits_processed,
            clusters_found: clusters.len(),
            clustered_hits,
            noise_hits: hits_processed - clustered_hits,
            largest_cluster_size,
            mean_cluster_size,
        }
    }
}
