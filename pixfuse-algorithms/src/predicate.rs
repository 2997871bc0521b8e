//! The shared spatiotemporal neighbor test.

use pixfuse_core::{ClusteringConfig, HitStore, PixelCoord};

/// Precomputed neighbor predicate for one clustering invocation.
///
/// Two hits are neighbors iff their Euclidean pixel distance is at most the
/// configured radius and their combined-time difference is at most the
/// temporal window. Every algorithm evaluates this same relation.
#[derive(Debug, Clone, Copy)]
pub struct NeighborPredicate {
    radius_squared: f64,
    temporal_window: f64,
}

impl NeighborPredicate {
    /// Builds the predicate from a validated configuration.
    #[must_use]
    pub fn new(config: &ClusteringConfig) -> Self {
        Self {
            radius_squared: config.radius * config.radius,
            temporal_window: config.temporal_window,
        }
    }

    /// Tests whether the hits at `a` and `b` are neighbors.
    #[inline]
    #[must_use]
    pub fn matches(&self, store: &HitStore, a: usize, b: usize) -> bool {
        let pa = PixelCoord::new(store.x()[a], store.y()[a]);
        let pb = PixelCoord::new(store.x()[b], store.y()[b]);
        if f64::from(pa.distance_squared(&pb)) > self.radius_squared {
            return false;
        }
        (store.time(a) - store.time(b)).abs() <= self.temporal_window
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pixfuse_core::HitData;

    fn store_of(hits: &[HitData]) -> HitStore {
        hits.iter().copied().collect()
    }

    #[test]
    fn test_spatial_and_temporal_bounds() {
        let store = store_of(&[
            HitData::new(10, 10, 100, 1, 0, 0),
            HitData::new(13, 14, 102, 1, 0, 0), // distance 5, dt 2
            HitData::new(14, 14, 102, 1, 0, 0), // distance sqrt(32) > 5
            HitData::new(10, 11, 200, 1, 0, 0), // dt 100
        ]);
        let config = ClusteringConfig::new()
            .with_radius(5.0)
            .with_temporal_window(10.0);
        let predicate = NeighborPredicate::new(&config);

        assert!(predicate.matches(&store, 0, 1));
        assert!(predicate.matches(&store, 1, 0));
        assert!(!predicate.matches(&store, 0, 2));
        assert!(!predicate.matches(&store, 0, 3));
    }

    #[test]
    fn test_ftoa_refinement_counts() {
        // Same toa tick, opposite ftoa extremes: dt = 15/16 tick.
        let store = store_of(&[
            HitData::new(0, 0, 100, 1, 0, 0),
            HitData::new(0, 1, 100, 1, 15, 0),
        ]);
        let tight = NeighborPredicate::new(
            &ClusteringConfig::new()
                .with_radius(2.0)
                .with_temporal_window(0.5),
        );
        let loose = NeighborPredicate::new(
            &ClusteringConfig::new()
                .with_radius(2.0)
                .with_temporal_window(1.0),
        );
        assert!(!tight.matches(&store, 0, 1));
        assert!(loose.matches(&store, 0, 1));
    }
}
