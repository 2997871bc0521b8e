//! Columnar hit storage.
//!
//! [`HitStore`] keeps hit fields in parallel vectors (`SoA` layout) rather
//! than an array of structs. This layout works better with modern CPU caches
//! when the clustering algorithms sweep a single field at a time.
//!
//! A store is append-only during construction and read-only afterwards;
//! clusters reference it by hit index and never copy hit data out of it.

use crate::error::{Error, Result};
use crate::hit::{Hit, HitData, FTOA_SUBDIVISIONS};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An ordered sequence of immutable hit records in `SoA` layout.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct HitStore {
    x: Vec<u16>,
    y: Vec<u16>,
    toa: Vec<u32>,
    tot: Vec<u16>,
    ftoa: Vec<u16>,
    chip_index: Vec<u16>,
}

impl HitStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty store with pre-allocated capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            x: Vec::with_capacity(capacity),
            y: Vec::with_capacity(capacity),
            toa: Vec::with_capacity(capacity),
            tot: Vec::with_capacity(capacity),
            ftoa: Vec::with_capacity(capacity),
            chip_index: Vec::with_capacity(capacity),
        }
    }

    /// Builds a store from a slice of hit records.
    pub fn from_hits<H: Hit>(hits: &[H]) -> Self {
        let mut store = Self::with_capacity(hits.len());
        for hit in hits {
            store.push(HitData::new(
                hit.x(),
                hit.y(),
                hit.toa(),
                hit.tot(),
                hit.ftoa(),
                hit.chip_index(),
            ));
        }
        store
    }

    /// Builds a store from parallel field columns.
    ///
    /// Semantically identical to [`HitStore::from_hits`]; this is a calling
    /// convention convenience for callers that already hold columnar data.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ColumnLengthMismatch`] if any column's length differs
    /// from the `x` column's.
    pub fn from_columns(
        x: &[u16],
        y: &[u16],
        toa: &[u32],
        tot: &[u16],
        ftoa: &[u16],
        chip_index: &[u16],
    ) -> Result<Self> {
        let expected = x.len();
        let check = |field: &'static str, actual: usize| -> Result<()> {
            if actual == expected {
                Ok(())
            } else {
                Err(Error::ColumnLengthMismatch {
                    field,
                    expected,
                    actual,
                })
            }
        };
        check("y", y.len())?;
        check("toa", toa.len())?;
        check("tot", tot.len())?;
        check("ftoa", ftoa.len())?;
        check("chip_index", chip_index.len())?;

        Ok(Self {
            x: x.to_vec(),
            y: y.to_vec(),
            toa: toa.to_vec(),
            tot: tot.to_vec(),
            ftoa: ftoa.to_vec(),
            chip_index: chip_index.to_vec(),
        })
    }

    /// Appends a single hit.
    pub fn push(&mut self, hit: HitData) {
        self.x.push(hit.x);
        self.y.push(hit.y);
        self.toa.push(hit.toa);
        self.tot.push(hit.tot);
        self.ftoa.push(hit.ftoa);
        self.chip_index.push(hit.chip_index);
    }

    /// Returns the number of hits in the store.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.x.len()
    }

    /// Returns true if the store is empty.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// Returns the hit record at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len()`.
    #[inline]
    #[must_use]
    pub fn get(&self, index: usize) -> HitData {
        HitData {
            x: self.x[index],
            y: self.y[index],
            toa: self.toa[index],
            tot: self.tot[index],
            ftoa: self.ftoa[index],
            chip_index: self.chip_index[index],
        }
    }

    /// Combined time scalar of the hit at `index` (ticks).
    #[inline]
    #[must_use]
    pub fn time(&self, index: usize) -> f64 {
        f64::from(self.toa[index]) + f64::from(self.ftoa[index]) / FTOA_SUBDIVISIONS
    }

    /// X coordinate column.
    #[inline]
    #[must_use]
    pub fn x(&self) -> &[u16] {
        &self.x
    }

    /// Y coordinate column.
    #[inline]
    #[must_use]
    pub fn y(&self) -> &[u16] {
        &self.y
    }

    /// Coarse time-of-arrival column.
    #[inline]
    #[must_use]
    pub fn toa(&self) -> &[u32] {
        &self.toa
    }

    /// Time-over-threshold column.
    #[inline]
    #[must_use]
    pub fn tot(&self) -> &[u16] {
        &self.tot
    }

    /// Fine time-of-arrival column.
    #[inline]
    #[must_use]
    pub fn ftoa(&self) -> &[u16] {
        &self.ftoa
    }

    /// Chip index column.
    #[inline]
    #[must_use]
    pub fn chip_index(&self) -> &[u16] {
        &self.chip_index
    }

    /// Iterates over hit records in store order.
    pub fn iter(&self) -> impl Iterator<Item = HitData> + '_ {
        (0..self.len()).map(move |i| self.get(i))
    }
}

impl FromIterator<HitData> for HitStore {
    fn from_iter<I: IntoIterator<Item = HitData>>(iter: I) -> Self {
        let mut store = Self::new();
        for hit in iter {
            store.push(hit);
        }
        store
    }
}
