//! Clustering engine: algorithm selection and dispatch.

use crate::density::DensityClustering;
use crate::grid::GridClustering;
use crate::streaming::StreamingClustering;
use pixfuse_core::{Cluster, ClusteringConfig, ClusteringStatistics, Error, HitStore, Result};
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The closed set of clustering algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Algorithm {
    /// Exact connectivity via spatial index + union-find.
    Grid,
    /// Single-pass sliding window; requires time-sorted input.
    Streaming,
    /// DBSCAN-style core/border/noise clustering.
    Density,
}

impl Algorithm {
    /// Returns the selector name of the algorithm.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Grid => "grid",
            Self::Streaming => "streaming",
            Self::Density => "density",
        }
    }
}

impl FromStr for Algorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "grid" => Ok(Self::Grid),
            "streaming" => Ok(Self::Streaming),
            "density" => Ok(Self::Density),
            _ => Err(Error::UnknownAlgorithm(s.to_string())),
        }
    }
}

/// Internal strategy interface implemented by each algorithm.
///
/// A strategy discovers neighbor relations and assembles the member-index
/// components of the final clusters; the engine materializes [`Cluster`]
/// records from them uniformly.
pub trait ClusterStrategy {
    /// Returns the selector name of the strategy.
    fn name(&self) -> &'static str;

    /// Computes final components (size-filtered member-index lists).
    ///
    /// # Errors
    ///
    /// Strategy-specific input errors, e.g. the streaming strategy's
    /// ordering check.
    fn components(&self, store: &HitStore, config: &ClusteringConfig)
        -> Result<Vec<Vec<usize>>>;
}

/// Clusters a hit store with the selected algorithm.
///
/// Validates the configuration before touching data, never mutates the
/// store, and returns clusters referencing the store by hit index. Empty
/// input yields an empty result.
///
/// # Errors
///
/// Configuration errors from [`ClusteringConfig::validate`], or
/// [`Error::UnsortedInput`] from the streaming algorithm.
pub fn cluster(
    store: &HitStore,
    config: &ClusteringConfig,
    algorithm: Algorithm,
) -> Result<Vec<Cluster>> {
    config.validate()?;
    if store.is_empty() {
        return Ok(Vec::new());
    }

    let components = match algorithm {
        Algorithm::Grid => GridClustering::new().components(store, config),
        Algorithm::Streaming => StreamingClustering::new().components(store, config),
        Algorithm::Density => DensityClustering::new().components(store, config),
    }?;

    let clusters = components
        .into_iter()
        .map(|members| Cluster::from_members(store, members))
        .collect::<Result<Vec<_>>>()?;

    log::debug!(
        "{}: {} hits -> {} clusters",
        algorithm.name(),
        store.len(),
        clusters.len()
    );
    Ok(clusters)
}

/// Clusters a hit store and summarizes the result.
///
/// # Errors
///
/// Same as [`cluster`].
pub fn cluster_with_statistics(
    store: &HitStore,
    config: &ClusteringConfig,
    algorithm: Algorithm,
) -> Result<(Vec<Cluster>, ClusteringStatistics)> {
    let clusters = cluster(store, config, algorithm)?;
    let stats = ClusteringStatistics::from_clusters(store.len(), &clusters);
    Ok((clusters, stats))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pixfuse_core::HitData;

    fn store_of(hits: &[HitData]) -> HitStore {
        hits.iter().copied().collect()
    }

    const ALL: [Algorithm; 3] = [Algorithm::Grid, Algorithm::Streaming, Algorithm::Density];

    #[test]
    fn test_selector_parsing() {
        assert_eq!("grid".parse::<Algorithm>().unwrap(), Algorithm::Grid);
        assert_eq!(
            "Streaming".parse::<Algorithm>().unwrap(),
            Algorithm::Streaming
        );
        assert_eq!("density".parse::<Algorithm>().unwrap(), Algorithm::Density);
        assert!(matches!(
            "voronoi".parse::<Algorithm>(),
            Err(Error::UnknownAlgorithm(name)) if name == "voronoi"
        ));
    }

    #[test]
    fn test_invalid_config_rejected_before_processing() {
        let store = store_of(&[HitData::new(0, 0, 100, 1, 0, 0)]);
        let config = ClusteringConfig::new().with_radius(-1.0);
        for algorithm in ALL {
            assert!(matches!(
                cluster(&store, &config, algorithm),
                Err(Error::InvalidRadius(_))
            ));
        }
    }

    #[test]
    fn test_empty_input_yields_empty_output() {
        let store = HitStore::new();
        let config = ClusteringConfig::default();
        for algorithm in ALL {
            assert!(cluster(&store, &config, algorithm).unwrap().is_empty());
        }
    }

    #[test]
    fn test_cluster_references_store_indices() {
        let store = store_of(&[
            HitData::new(10, 10, 100, 50, 0, 0),
            HitData::new(10, 11, 150, 50, 0, 0),
        ]);
        let config = ClusteringConfig::new()
            .with_radius(5.0)
            .with_temporal_window(200.0);
        let clusters = cluster(&store, &config, Algorithm::Grid).unwrap();

        assert_eq!(clusters.len(), 1);
        assert_eq!(clusters[0].member_indices, vec![0, 1]);
        assert_eq!(clusters[0].size, 2);
    }

    #[test]
    fn test_statistics_consistent_with_result() {
        let store = store_of(&[
            HitData::new(10, 10, 100, 50, 0, 0),
            HitData::new(10, 11, 150, 50, 0, 0),
            HitData::new(200, 200, 900, 50, 0, 0),
        ]);
        let config = ClusteringConfig::new()
            .with_radius(5.0)
            .with_temporal_window(200.0)
            .with_min_cluster_size(2);
        let (clusters, stats) =
            cluster_with_statistics(&store, &config, Algorithm::Grid).unwrap();

        assert_eq!(clusters.len(), 1);
        assert_eq!(stats.hits_processed, 3);
        assert_eq!(stats.clusters_found, 1);
        assert_eq!(stats.clustered_hits, 2);
        assert_eq!(stats.noise_hits, 1);
    }
}
