//! Grid-based clustering algorithm.
//!
//! Exact connectivity computation: a spatial index provides 3x3-cell
//! candidate sets, the full neighbor predicate prunes them, and union-find
//! assembles connected components. The resulting partition depends only on
//! the neighbor relation, not on traversal order.

use crate::engine::ClusterStrategy;
use crate::predicate::NeighborPredicate;
use crate::spatial::SpatialIndex;
use crate::unionfind::{AtomicUnionFind, UnionFind};
use pixfuse_core::{ClusteringConfig, HitStore, PixelCoord, Result};
use rayon::prelude::*;

/// Grid-based clustering with spatial indexing.
#[derive(Debug, Clone)]
pub struct GridClustering {
    /// Whether edge discovery runs on the rayon pool.
    parallel: bool,
}

impl Default for GridClustering {
    fn default() -> Self {
        Self { parallel: true }
    }
}

impl GridClustering {
    /// Creates a new grid clustering instance.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets whether to use parallel edge discovery.
    #[must_use]
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }
}

impl ClusterStrategy for GridClustering {
    fn name(&self) -> &'static str {
        "grid"
    }

    fn components(
        &self,
        store: &HitStore,
        config: &ClusteringConfig,
    ) -> Result<Vec<Vec<usize>>> {
        let n = store.len();
        let predicate = NeighborPredicate::new(config);
        let mut index = SpatialIndex::for_radius(config.radius);
        index.build(store);

        let mut components = if self.parallel {
            let uf = AtomicUnionFind::new(n);
            (0..n)
                .into_par_iter()
                .for_each_init(Vec::new, |candidates, i| {
                    let coord = PixelCoord::new(store.x()[i], store.y()[i]);
                    index.neighbors_into(coord, candidates);
                    for &j in candidates.iter() {
                        // Each unordered pair is examined once.
                        if j <= i {
                            continue;
                        }
                        if predicate.matches(store, i, j) {
                            uf.union(i, j);
                        }
                    }
                });
            uf.components()
        } else {
            let mut uf = UnionFind::new(n);
            let mut candidates = Vec::new();
            for i in 0..n {
                let coord = PixelCoord::new(store.x()[i], store.y()[i]);
                index.neighbors_into(coord, &mut candidates);
                for &j in &candidates {
                    if j <= i {
                        continue;
                    }
                    if predicate.matches(store, i, j) {
                        uf.union(i, j);
                    }
                }
            }
            uf.components()
        };

        components.retain(|c| c.len() >= config.min_cluster_size);
        Ok(components)
    }
}

/// Connected components over a subset of store hits.
///
/// Returns components as global hit indices, unfiltered by cluster size: the
/// chunked driver merges slice-local components before applying the size
/// threshold.
pub(crate) fn subset_components(
    store: &HitStore,
    config: &ClusteringConfig,
    subset: &[usize],
) -> Vec<Vec<usize>> {
    let predicate = NeighborPredicate::new(config);
    let mut index = SpatialIndex::for_radius(config.radius);
    index.build_subset(store, subset);

    let mut uf = UnionFind::new(subset.len());
    let mut candidates = Vec::new();
    for (pos, &i) in subset.iter().enumerate() {
        let coord = PixelCoord::new(store.x()[i], store.y()[i]);
        index.neighbors_into(coord, &mut candidates);
        for &q in &candidates {
            if q <= pos {
                continue;
            }
            if predicate.matches(store, i, subset[q]) {
                uf.union(pos, q);
            }
        }
    }

    uf.components()
        .into_iter()
        .map(|component| component.into_iter().map(|pos| subset[pos]).collect())
        .collect()
}
