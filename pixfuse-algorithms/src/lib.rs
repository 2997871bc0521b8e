//! pixfuse-algorithms: clustering strategies for pixel detector hits.
//!
//! Three interchangeable algorithms reconstruct physical events from raw
//! hits under one shared spatiotemporal neighbor relation:
//!
//! - **grid** — exact connectivity via a spatial index and union-find;
//! - **streaming** — single-pass sliding window for time-sorted input;
//! - **density** — DBSCAN-style core/border/noise clustering.
//!
//! [`cluster`] dispatches one invocation; [`cluster_chunked`] drives
//! guard-banded temporal slices in parallel for large inputs.

pub mod density;
pub mod engine;
pub mod grid;
pub mod predicate;
pub mod processing;
pub mod spatial;
pub mod streaming;
pub mod unionfind;

pub use density::DensityClustering;
pub use engine::{cluster, cluster_with_statistics, Algorithm, ClusterStrategy};
pub use grid::GridClustering;
pub use predicate::NeighborPredicate;
pub use processing::{cluster_chunked, ChunkingParams};
pub use spatial::SpatialIndex;
pub use streaming::StreamingClustering;
pub use unionfind::{AtomicUnionFind, UnionFind};
