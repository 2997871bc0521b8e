//! Cluster records and centroid materialization.

use crate::error::{Error, Result};
use crate::store::HitStore;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A group of hits attributed to one physical detection event.
///
/// Clusters reference hits by index into the [`HitStore`] they were produced
/// from; the store must outlive the cluster. The centroid is the tot-weighted
/// mean of member pixel coordinates.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Cluster {
    /// Member hit indices into the source store, ascending.
    pub member_indices: Vec<usize>,
    /// Centroid X coordinate (sub-pixel precision).
    pub centroid_x: f64,
    /// Centroid Y coordinate (sub-pixel precision).
    pub centroid_y: f64,
    /// Sum of member time-over-threshold values.
    pub total_tot: u64,
    /// Smallest member time of arrival.
    pub time_min: u32,
    /// Largest member time of arrival.
    pub time_max: u32,
    /// Number of member hits.
    pub size: usize,
}

impl Cluster {
    /// Materializes a cluster from member hit indices.
    ///
    /// Member indices are sorted ascending. Positions are weighted by each
    /// hit's `tot`; when every member has zero `tot` the centroid falls back
    /// to the unweighted mean.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyCluster`] for an empty member list.
    pub fn from_members(store: &HitStore, mut members: Vec<usize>) -> Result<Self> {
        if members.is_empty() {
            return Err(Error::EmptyCluster);
        }
        members.sort_unstable();

        let mut sum_x = 0.0;
        let mut sum_y = 0.0;
        let mut weight_sum = 0.0;
        let mut total_tot: u64 = 0;
        let mut time_min = u32::MAX;
        let mut time_max = 0u32;

        for &i in &members {
            let hit = store.get(i);
            let weight = f64::from(hit.tot);
            sum_x += f64::from(hit.x) * weight;
            sum_y += f64::from(hit.y) * weight;
            weight_sum += weight;
            total_tot += u64::from(hit.tot);
            time_min = time_min.min(hit.toa);
            time_max = time_max.max(hit.toa);
        }

        let (centroid_x, centroid_y) = if weight_sum > 0.0 {
            (sum_x / weight_sum, sum_y / weight_sum)
        } else {
            // All-zero tot: unweighted mean.
            let n = members.len() as f64;
            let ux: f64 = members.iter().map(|&i| f64::from(store.get(i).x)).sum();
            let uy: f64 = members.iter().map(|&i| f64::from(store.get(i).y)).sum();
            (ux / n, uy / n)
        };

        let size = members.len();
        Ok(Self {
            member_indices: members,
            centroid_x,
            centroid_y,
            total_tot,
            time_min,
            time_max,
            size,
        })
    }
}
