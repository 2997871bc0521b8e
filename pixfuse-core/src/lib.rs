//! pixfuse-core: Core types for pixel detector event reconstruction.
//!
//! This crate provides the foundational abstractions shared by the pixfuse
//! clustering algorithms: hit records, the columnar hit store, clustering
//! configuration, cluster records with centroid materialization, and errors.
//!

pub mod cluster;
pub mod config;
pub mod error;
pub mod hit;
pub mod stats;
pub mod store;

pub use cluster::Cluster;
pub use config::ClusteringConfig;
pub use error::{Error, Result};
pub use hit::{Hit, HitData, PixelCoord};
pub use stats::ClusteringStatistics;
pub use store::HitStore;
