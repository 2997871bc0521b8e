//! Union-find assemblers for connected-component construction.
//!
//! Components are kept as flat parent arrays over hit indices rather than
//! pointer-linked trees, for cache locality and a trivial merge pass in the
//! chunked parallel driver.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Sequential union-find with union by rank and path compression.
#[derive(Debug)]
pub struct UnionFind {
    parent: Vec<usize>,
    rank: Vec<u8>,
}

impl UnionFind {
    /// Creates `n` singleton sets.
    #[must_use]
    pub fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            rank: vec![0; n],
        }
    }

    /// Number of elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.parent.len()
    }

    /// True if the structure holds no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }

    /// Returns the representative of the set containing `x`.
    pub fn find(&mut self, x: usize) -> usize {
        let mut root = x;
        while self.parent[root] != root {
            root = self.parent[root];
        }
        // Second pass: point the chain at the root.
        let mut current = x;
        while self.parent[current] != root {
            let next = self.parent[current];
            self.parent[current] = root;
            current = next;
        }
        root
    }

    /// Merges the sets containing `x` and `y`, returning the surviving root.
    pub fn union(&mut self, x: usize, y: usize) -> usize {
        let px = self.find(x);
        let py = self.find(y);
        if px == py {
            return px;
        }
        match self.rank[px].cmp(&self.rank[py]) {
            std::cmp::Ordering::Less => {
                self.parent[px] = py;
                py
            }
            std::cmp::Ordering::Greater => {
                self.parent[py] = px;
                px
            }
            std::cmp::Ordering::Equal => {
                self.parent[py] = px;
                self.rank[px] += 1;
                px
            }
        }
    }

    /// Extracts the component partition.
    ///
    /// Components are ordered by their smallest member index and members are
    /// ascending, so repeated invocations on identical input produce
    /// identical output.
    pub fn components(&mut self) -> Vec<Vec<usize>> {
        let n = self.len();
        let mut slot_of_root: HashMap<usize, usize> = HashMap::new();
        let mut components: Vec<Vec<usize>> = Vec::new();
        for i in 0..n {
            let root = self.find(i);
            let slot = *slot_of_root.entry(root).or_insert_with(|| {
                components.push(Vec::new());
                components.len() - 1
            });
            components[slot].push(i);
        }
        components
    }
}

/// Lock-free union-find for parallel edge discovery.
///
/// Union links the larger root index under the smaller via compare-and-swap,
/// so concurrent unions converge without locks. Only eventual consistency is
/// needed: reads may observe a stale parent, but every chain still ends at
/// the true root.
#[derive(Debug)]
pub struct AtomicUnionFind {
    parent: Vec<AtomicUsize>,
}

impl AtomicUnionFind {
    /// Creates `n` singleton sets.
    #[must_use]
    pub fn new(n: usize) -> Self {
        Self {
            parent: (0..n).map(AtomicUsize::new).collect(),
        }
    }

    /// Returns the representative of the set containing `x`.
    pub fn find(&self, x: usize) -> usize {
        let mut current = x;
        loop {
            let p = self.parent[current].load(Ordering::Relaxed);
            if p == current {
                return current;
            }
            // Opportunistic path halving; a lost race is harmless.
            let gp = self.parent[p].load(Ordering::Relaxed);
            if gp != p {
                let _ = self.parent[current].compare_exchange_weak(
                    p,
                    gp,
                    Ordering::Relaxed,
                    Ordering::Relaxed,
                );
            }
            current = p;
        }
    }

    /// Merges the sets containing `x` and `y`.
    pub fn union(&self, x: usize, y: usize) {
        let mut px = self.find(x);
        let mut py = self.find(y);
        while px != py {
            if px < py {
                std::mem::swap(&mut px, &mut py);
            }
            match self.parent[px].compare_exchange(
                px,
                py,
                Ordering::Relaxed,
                Ordering::Relaxed,
            ) {
                Ok(_) => break,
                Err(_) => {
                    px = self.find(px);
                    py = self.find(py);
                }
            }
        }
    }

    /// Extracts the component partition, ordered as
    /// [`UnionFind::components`].
    pub fn components(&self) -> Vec<Vec<usize>> {
        let n = self.parent.len();
        let mut slot_of_root: HashMap<usize, usize> = HashMap::new();
        let mut components: Vec<Vec<usize>> = Vec::new();
        for i in 0..n {
            let root = self.find(i);
            let slot = *slot_of_root.entry(root).or_insert_with(|| {
                components.push(Vec::new());
                components.len() - 1
            });
            components[slot].push(i);
        }
        components
    }
}
