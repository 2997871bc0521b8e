//! Density-based clustering (DBSCAN over the spatiotemporal relation).
//!
//! The neighborhood of a hit is its spatial-index candidate set filtered by
//! the full neighbor predicate. A hit whose neighborhood (including itself)
//! reaches `min_cluster_size` is a core point; clusters grow from core
//! points by density reachability. Border points (non-core neighbors of a
//! core point) join exactly one cluster; points reachable from no core point
//! are noise and belong to no cluster.
//!
//! With `min_cluster_size = 1` every hit is core and the output partition
//! equals the grid algorithm's connected components.

use crate::engine::ClusterStrategy;
use crate::predicate::NeighborPredicate;
use crate::spatial::SpatialIndex;
use pixfuse_core::{ClusteringConfig, HitStore, PixelCoord, Result};

/// Density-based clustering instance.
#[derive(Debug, Clone, Default)]
pub struct DensityClustering;

impl DensityClustering {
    /// Creates a new density clustering instance.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

const UNCLAIMED: i64 = -1;

struct RegionQuery<'a> {
    store: &'a HitStore,
    index: SpatialIndex,
    predicate: NeighborPredicate,
    candidates: Vec<usize>,
}

impl<'a> RegionQuery<'a> {
    fn new(store: &'a HitStore, config: &ClusteringConfig) -> Self {
        let mut index = SpatialIndex::for_radius(config.radius);
        index.build(store);
        Self {
            store,
            index,
            predicate: NeighborPredicate::new(config),
            candidates: Vec::new(),
        }
    }

    /// Collects the neighborhood of `i` (including `i` itself) into `out`.
    fn neighborhood_into(&mut self, i: usize, out: &mut Vec<usize>) {
        out.clear();
        let coord = PixelCoord::new(self.store.x()[i], self.store.y()[i]);
        self.index.neighbors_into(coord, &mut self.candidates);
        for &j in &self.candidates {
            if j == i || self.predicate.matches(self.store, i, j) {
                out.push(j);
            }
        }
    }
}

impl ClusterStrategy for DensityClustering {
    fn name(&self) -> &'static str {
        "density"
    }

    #[allow(clippy::too_many_lines)]
    fn components(
        &self,
        store: &HitStore,
        config: &ClusteringConfig,
    ) -> Result<Vec<Vec<usize>>> {
        let n = store.len();
        let min_points = config.min_cluster_size;

        let mut query = RegionQuery::new(store, config);
        let mut labels: Vec<i64> = vec![UNCLAIMED; n];
        let mut visited = vec![false; n];
        let mut neighbors: Vec<usize> = Vec::new();
        let mut seeds: Vec<usize> = Vec::new();
        let mut next_cluster: i64 = 0;

        for i in 0..n {
            if visited[i] {
                continue;
            }
            visited[i] = true;

            query.neighborhood_into(i, &mut neighbors);
            if neighbors.len() < min_points {
                // Not core; stays noise unless a later cluster absorbs it
                // as a border point.
                continue;
            }

            labels[i] = next_cluster;
            seeds.clear();
            seeds.extend_from_slice(&neighbors);

            let mut cursor = 0;
            while cursor < seeds.len() {
                let q = seeds[cursor];
                cursor += 1;

                if labels[q] == UNCLAIMED {
                    labels[q] = next_cluster;
                }
                if visited[q] {
                    continue;
                }
                visited[q] = true;

                query.neighborhood_into(q, &mut neighbors);
                if neighbors.len() >= min_points {
                    // q is core: its neighborhood is density-reachable.
                    seeds.extend_from_slice(&neighbors);
                }
            }

            next_cluster += 1;
        }

        // Group members per cluster id, then drop clusters that fell below
        // the size threshold (border hits claimed elsewhere can shrink one).
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let mut components: Vec<Vec<usize>> = vec![Vec::new(); next_cluster as usize];
        for (i, &label) in labels.iter().enumerate() {
            if label != UNCLAIMED {
                #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
                components[label as usize].push(i);
            }
        }
        components.retain(|c| c.len() >= config.min_cluster_size);
        Ok(components)
    }
}
