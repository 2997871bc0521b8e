//! Chunked parallel clustering driver.
//!
//! Large inputs are split into contiguous temporal slices, each clustered
//! independently on the rayon pool, then reconciled. Every slice is extended
//! by a guard band of one temporal window on each boundary, so any
//! cross-boundary neighbor pair appears complete in at least one slice; the
//! sequential merge pass unions slice-local components that share a
//! guard-band hit.
//!
//! The per-slice phase is read-only against the shared store and writes only
//! slice-local output, so no locking is needed until the merge.

use crate::engine::{cluster, Algorithm};
use crate::grid::subset_components;
use crate::unionfind::UnionFind;
use pixfuse_core::{Cluster, ClusteringConfig, HitStore, Result};
use rayon::prelude::*;

/// Parameters for the chunked driver.
#[derive(Clone, Debug, Default)]
pub struct ChunkingParams {
    /// Number of temporal slices; defaults to the rayon pool width.
    pub num_chunks: Option<usize>,
}

impl ChunkingParams {
    /// Creates default chunking parameters.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the number of temporal slices.
    #[must_use]
    pub fn with_num_chunks(mut self, num_chunks: usize) -> Self {
        self.num_chunks = Some(num_chunks);
        self
    }
}

/// Clusters a hit store in parallel temporal slices.
///
/// Produces exactly the sequential partition. The grid algorithm is sliced;
/// streaming depends on global temporal order and density's core/border
/// classification needs complete neighborhoods with single-owner border
/// assignment, so both delegate to the sequential engine.
///
/// # Errors
///
/// Same as [`cluster`].
pub fn cluster_chunked(
    store: &HitStore,
    config: &ClusteringConfig,
    algorithm: Algorithm,
    params: &ChunkingParams,
) -> Result<Vec<Cluster>> {
    config.validate()?;
    if store.is_empty() {
        return Ok(Vec::new());
    }
    if !matches!(algorithm, Algorithm::Grid) {
        return cluster(store, config, algorithm);
    }

    let n = store.len();
    let num_chunks = params
        .num_chunks
        .unwrap_or_else(rayon::current_num_threads)
        .clamp(1, n);
    if num_chunks == 1 {
        return cluster(store, config, algorithm);
    }

    // Temporal ordering of hit indices; ties broken by index so the slicing
    // is reproducible.
    let mut order: Vec<usize> = (0..n).collect();
    order.sort_unstable_by_key(|&i| (store.toa()[i], store.ftoa()[i], i));
    let times: Vec<f64> = order.iter().map(|&i| store.time(i)).collect();

    // Slice boundaries in the sorted order, extended by the guard band.
    let window = config.temporal_window;
    let mut slices: Vec<(usize, usize)> = Vec::with_capacity(num_chunks);
    let chunk_len = n / num_chunks;
    let remainder = n % num_chunks;
    let mut lo = 0;
    for c in 0..num_chunks {
        let hi = lo + chunk_len + usize::from(c < remainder);
        let t_first = times[lo];
        let t_last = times[hi - 1];
        let ext_lo = times.partition_point(|&t| t < t_first - window);
        let ext_hi = times.partition_point(|&t| t <= t_last + window);
        slices.push((ext_lo, ext_hi));
        lo = hi;
    }

    log::debug!(
        "chunked grid: {n} hits, {num_chunks} slices, guard band {window}"
    );

    // Parallel phase: cluster each slice against the shared store.
    let slice_components: Vec<Vec<Vec<usize>>> = slices
        .par_iter()
        .map(|&(ext_lo, ext_hi)| subset_components(store, config, &order[ext_lo..ext_hi]))
        .collect();

    // Merge phase: union slice-local components that share a hit. Only
    // guard-band hits appear in two slices, so the number of unions is
    // proportional to the guard-band size.
    let total: usize = slice_components.iter().map(Vec::len).sum();
    let mut component_uf = UnionFind::new(total);
    let mut first_owner: Vec<usize> = vec![usize::MAX; n];
    let mut cid = 0;
    for components in &slice_components {
        for component in components {
            for &hit in component {
                if first_owner[hit] == usize::MAX {
                    first_owner[hit] = cid;
                } else {
                    component_uf.union(first_owner[hit], cid);
                }
            }
            cid += 1;
        }
    }

    // Regroup hits under merged components, in store order.
    let mut slot_of_root = vec![usize::MAX; total];
    let mut merged: Vec<Vec<usize>> = Vec::new();
    for (hit, &owner) in first_owner.iter().enumerate() {
        let root = component_uf.find(owner);
        if slot_of_root[root] == usize::MAX {
            slot_of_root[root] = merged.len();
            merged.push(Vec::new());
        }
        merged[slot_of_root[root]].push(hit);
    }
    merged.retain(|c| c.len() >= config.min_cluster_size);

    merged
        .into_iter()
        .map(|members| Cluster::from_members(store, members))
        .collect()
}
