//! Spatial indexing for efficient neighbor lookup.

use pixfuse_core::{HitStore, PixelCoord};
use std::collections::HashMap;

/// Spatial index for efficient 2D neighbor queries.
///
/// Divides the pixel plane into square cells of side `cell_size` and maps
/// each cell to the hit indices that fall inside it. With `cell_size` at
/// least the query radius, the 3x3 cell neighborhood of a coordinate is
/// guaranteed to contain every hit within Euclidean distance `radius`.
///
/// Construction is O(N); a query costs the occupancy of nine cells. Dense
/// degenerate cells (many hits on one pixel region) degrade the downstream
/// pair tests to locally quadratic cost.
#[derive(Debug)]
pub struct SpatialIndex {
    /// Cell size (pixels).
    cell_size: u16,
    /// Map from cell coordinates to hit indices in that cell.
    cells: HashMap<(u16, u16), Vec<usize>>,
}

impl SpatialIndex {
    /// Creates an empty index with the given cell size.
    ///
    /// # Panics
    ///
    /// Panics if `cell_size` is zero.
    #[must_use]
    pub fn new(cell_size: u16) -> Self {
        assert!(cell_size > 0, "cell size must be positive");
        Self {
            cell_size,
            cells: HashMap::new(),
        }
    }

    /// Creates an empty index sized for a query radius.
    ///
    /// The cell side is `ceil(radius)` clamped to at least one pixel, so a
    /// 3x3 cell neighborhood covers the full L2 ball of the radius.
    #[must_use]
    pub fn for_radius(radius: f64) -> Self {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let cell_size = radius.ceil().max(1.0).min(f64::from(u16::MAX)) as u16;
        Self::new(cell_size)
    }

    /// Builds the index over every hit in the store.
    ///
    /// Stored values are hit indices into the store.
    pub fn build(&mut self, store: &HitStore) {
        self.cells.clear();
        for i in 0..store.len() {
            let cell = self.cell_of(store.x()[i], store.y()[i]);
            self.cells.entry(cell).or_default().push(i);
        }
    }

    /// Builds the index over a subset of store hits.
    ///
    /// Stored values are positions into `indices`, not store indices.
    pub fn build_subset(&mut self, store: &HitStore, indices: &[usize]) {
        self.cells.clear();
        for (pos, &i) in indices.iter().enumerate() {
            let cell = self.cell_of(store.x()[i], store.y()[i]);
            self.cells.entry(cell).or_default().push(pos);
        }
    }

    #[inline]
    fn cell_of(&self, x: u16, y: u16) -> (u16, u16) {
        (x / self.cell_size, y / self.cell_size)
    }

    /// Collects the candidate values in the 3x3 cell neighborhood of a
    /// coordinate into `out`, clearing it first.
    pub fn neighbors_into(&self, coord: PixelCoord, out: &mut Vec<usize>) {
        out.clear();
        let (cx, cy) = self.cell_of(coord.x, coord.y);
        for dx in -1..=1i32 {
            for dy in -1..=1i32 {
                let nx = i32::from(cx) + dx;
                let ny = i32::from(cy) + dy;
                if nx < 0 || ny < 0 {
                    continue;
                }
                #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
                if let Some(values) = self.cells.get(&(nx as u16, ny as u16)) {
                    out.extend_from_slice(values);
                }
            }
        }
    }

    /// Returns the candidate values in the 3x3 cell neighborhood of a
    /// coordinate.
    #[must_use]
    pub fn find_neighbors(&self, coord: PixelCoord) -> Vec<usize> {
        let mut out = Vec::new();
        self.neighbors_into(coord, &mut out);
        out
    }

    /// Returns the number of occupied cells.
    #[must_use]
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Returns the total number of indexed values.
    #[must_use]
    pub fn value_count(&self) -> usize {
        self.cells.values().map(Vec::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pixfuse_core::HitData;

    fn store_of(coords: &[(u16, u16)]) -> HitStore {
        coords
            .iter()
            .map(|&(x, y)| HitData::new(x, y, 0, 1, 0, 0))
            .collect()
    }

    #[test]
    fn test_build_and_query() {
        let store = store_of(&[(0, 0), (1, 0), (100, 100)]);
        let mut index = SpatialIndex::new(16);
        index.build(&store);

        assert_eq!(index.value_count(), 3);
        let neighbors = index.find_neighbors(PixelCoord::new(0, 0));
        assert!(neighbors.contains(&0));
        assert!(neighbors.contains(&1));
        assert!(!neighbors.contains(&2));
    }

    #[test]
    fn test_neighbors_cross_cell_boundary() {
        // (15,15) and (16,16) land in different cells but are adjacent.
        let store = store_of(&[(15, 15), (16, 16)]);
        let mut index = SpatialIndex::new(16);
        index.build(&store);

        let neighbors = index.find_neighbors(PixelCoord::new(15, 15));
        assert!(neighbors.contains(&0));
        assert!(neighbors.contains(&1));
    }

    #[test]
    fn test_for_radius_cell_size() {
        let store = store_of(&[(10, 10), (14, 13)]);
        let mut index = SpatialIndex::for_radius(5.0);
        index.build(&store);

        // Distance 5 exactly; must appear in the 3x3 neighborhood.
        let neighbors = index.find_neighbors(PixelCoord::new(10, 10));
        assert!(neighbors.contains(&1));
    }

    #[test]
    fn test_subset_positions() {
        let store = store_of(&[(0, 0), (200, 200), (1, 1)]);
        let mut index = SpatialIndex::new(8);
        index.build_subset(&store, &[2, 0]);

        let neighbors = index.find_neighbors(PixelCoord::new(0, 0));
        // Positions into the subset list, not store indices.
        assert!(neighbors.contains(&0));
        assert!(neighbors.contains(&1));
        assert_eq!(index.value_count(), 2);
    }
}
