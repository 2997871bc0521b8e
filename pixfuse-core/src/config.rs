//! Clustering configuration.

use crate::error::{Error, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Configuration shared by all clustering algorithms.
///
/// Two hits are neighbors iff their Euclidean pixel distance is at most
/// `radius` and their combined-time difference is at most `temporal_window`.
/// Components smaller than `min_cluster_size` are dropped from the output.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ClusteringConfig {
    /// Maximum spatial distance (pixels) between neighboring hits.
    pub radius: f64,
    /// Maximum time difference (clock ticks) between neighboring hits.
    pub temporal_window: f64,
    /// Minimum number of hits to form a valid cluster.
    pub min_cluster_size: usize,
}

impl Default for ClusteringConfig {
    fn default() -> Self {
        Self {
            radius: 5.0,
            temporal_window: 3.0,
            min_cluster_size: 1,
        }
    }
}

impl ClusteringConfig {
    /// Creates a configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the spatial radius.
    #[must_use]
    pub fn with_radius(mut self, radius: f64) -> Self {
        self.radius = radius;
        self
    }

    /// Sets the temporal window.
    #[must_use]
    pub fn with_temporal_window(mut self, window: f64) -> Self {
        self.temporal_window = window;
        self
    }

    /// Sets the minimum cluster size.
    #[must_use]
    pub fn with_min_cluster_size(mut self, size: usize) -> Self {
        self.min_cluster_size = size;
        self
    }

    /// Validates the configuration invariants.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if `radius` or `temporal_window` is
    /// non-positive or non-finite, or if `min_cluster_size` is zero.
    pub fn validate(&self) -> Result<()> {
        if !self.radius.is_finite() || self.radius <= 0.0 {
            return Err(Error::InvalidRadius(self.radius));
        }
        if !self.temporal_window.is_finite() || self.temporal_window <= 0.0 {
            return Err(Error::InvalidTemporalWindow(self.temporal_window));
        }
        if self.min_cluster_size == 0 {
            return Err(Error::InvalidMinClusterSize);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_builder() {
        let config = ClusteringConfig::new()
            .with_radius(2.0)
            .with_temporal_window(500.0)
            .with_min_cluster_size(2);

        assert!((config.radius - 2.0).abs() < f64::EPSILON);
        assert!((config.temporal_window - 500.0).abs() < f64::EPSILON);
        assert_eq!(config.min_cluster_size, 2);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_default_is_valid() {
        assert!(ClusteringConfig::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_bad_radius() {
        assert!(matches!(
            ClusteringConfig::default().with_radius(0.0).validate(),
            Err(Error::InvalidRadius(_))
        ));
        assert!(matches!(
            ClusteringConfig::default().with_radius(-1.5).validate(),
            Err(Error::InvalidRadius(_))
        ));
        assert!(matches!(
            ClusteringConfig::default()
                .with_radius(f64::NAN)
                .validate(),
            Err(Error::InvalidRadius(_))
        ));
    }

    #[test]
    fn test_rejects_bad_temporal_window() {
        assert!(matches!(
            ClusteringConfig::default()
                .with_temporal_window(0.0)
                .validate(),
            Err(Error::InvalidTemporalWindow(_))
        ));
        assert!(matches!(
            ClusteringConfig::default()
                .with_temporal_window(f64::INFINITY)
                .validate(),
            Err(Error::InvalidTemporalWindow(_))
        ));
    }

    #[test]
    fn test_rejects_zero_min_cluster_size() {
        assert!(matches!(
            ClusteringConfig::default()
                .with_min_cluster_size(0)
                .validate(),
            Err(Error::InvalidMinClusterSize)
        ));
    }
}
