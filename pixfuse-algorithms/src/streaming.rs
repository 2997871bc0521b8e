//! Streaming clustering for time-sorted input.
//!
//! Single-pass, online variant of connectivity clustering. An active window
//! holds the hits whose time lies within the temporal window of the newest
//! arrival; each new hit is tested only against that window. A component
//! whose members have all left the window is finalized immediately, because
//! no later hit can satisfy the temporal predicate with any of them.
//!
//! Input must be sorted by `(toa, ftoa)`. A regression is detected during
//! the pass and aborts with an ordering error rather than degrading
//! silently.

use crate::engine::ClusterStrategy;
use crate::predicate::NeighborPredicate;
use crate::unionfind::UnionFind;
use pixfuse_core::{ClusteringConfig, Error, HitStore, Result};
use std::collections::VecDeque;

/// Streaming clustering over a temporally ordered store.
#[derive(Debug, Clone, Default)]
pub struct StreamingClustering;

impl StreamingClustering {
    /// Creates a new streaming clustering instance.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

/// Per-component bookkeeping during the pass.
///
/// `members` and `active` are only meaningful at a component's current
/// union-find root; unions move both to the surviving root.
struct WindowState {
    uf: UnionFind,
    members: Vec<Vec<usize>>,
    active: Vec<usize>,
}

impl WindowState {
    fn new(n: usize) -> Self {
        Self {
            uf: UnionFind::new(n),
            members: (0..n).map(|i| vec![i]).collect(),
            active: vec![0; n],
        }
    }

    fn merge(&mut self, a: usize, b: usize) {
        let ra = self.uf.find(a);
        let rb = self.uf.find(b);
        if ra == rb {
            return;
        }
        let winner = self.uf.union(ra, rb);
        let loser = if winner == ra { rb } else { ra };
        let moved = std::mem::take(&mut self.members[loser]);
        self.members[winner].extend(moved);
        self.active[winner] += self.active[loser];
        self.active[loser] = 0;
    }

    /// Marks `hit` as evicted; returns its component if none of the
    /// component's members remain active.
    fn deactivate(&mut self, hit: usize) -> Option<Vec<usize>> {
        let root = self.uf.find(hit);
        self.active[root] -= 1;
        if self.active[root] == 0 {
            Some(std::mem::take(&mut self.members[root]))
        } else {
            None
        }
    }

    fn activate(&mut self, hit: usize) {
        let root = self.uf.find(hit);
        self.active[root] += 1;
    }
}

impl ClusterStrategy for StreamingClustering {
    fn name(&self) -> &'static str {
        "streaming"
    }

    fn components(
        &self,
        store: &HitStore,
        config: &ClusteringConfig,
    ) -> Result<Vec<Vec<usize>>> {
        let n = store.len();
        let predicate = NeighborPredicate::new(config);
        let mut state = WindowState::new(n);
        let mut window: VecDeque<usize> = VecDeque::new();
        let mut finalized: Vec<Vec<usize>> = Vec::new();

        let mut prev_key = (0u32, 0u16);
        for i in 0..n {
            let key = (store.toa()[i], store.ftoa()[i]);
            if i > 0 && key < prev_key {
                return Err(Error::UnsortedInput {
                    index: i,
                    toa: key.0,
                    prev_toa: prev_key.0,
                });
            }
            prev_key = key;

            // Evict hits that can no longer join anything.
            let now = store.time(i);
            while let Some(&oldest) = window.front() {
                if now - store.time(oldest) <= config.temporal_window {
                    break;
                }
                window.pop_front();
                if let Some(mut component) = state.deactivate(oldest) {
                    if component.len() >= config.min_cluster_size {
                        component.sort_unstable();
                        finalized.push(component);
                    }
                }
            }

            for &j in &window {
                if predicate.matches(store, i, j) {
                    state.merge(i, j);
                }
            }

            state.activate(i);
            window.push_back(i);
        }

        // Flush the remaining window.
        while let Some(oldest) = window.pop_front() {
            if let Some(mut component) = state.deactivate(oldest) {
                if component.len() >= config.min_cluster_size {
                    component.sort_unstable();
                    finalized.push(component);
                }
            }
        }

        Ok(finalized)
    }
}
