//! Error types for pixfuse-core.

use thiserror::Error;

/// Result type alias for pixfuse operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error types for pixfuse operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Spatial radius must be positive and finite.
    #[error("invalid spatial radius: {0}")]
    InvalidRadius(f64),

    /// Temporal window must be positive and finite.
    #[error("invalid temporal window: {0}")]
    InvalidTemporalWindow(f64),

    /// Minimum cluster size must be at least 1.
    #[error("invalid minimum cluster size: 0")]
    InvalidMinClusterSize,

    /// Algorithm selector outside the supported set.
    #[error("unknown clustering algorithm: {0:?}")]
    UnknownAlgorithm(String),

    /// Streaming input regressed in time.
    #[error("input not sorted by time: hit {index} has toa {toa} after toa {prev_toa}")]
    UnsortedInput {
        index: usize,
        toa: u32,
        prev_toa: u32,
    },

    /// Columnar ingestion received columns of different lengths.
    #[error("column length mismatch for {field}: expected {expected}, got {actual}")]
    ColumnLengthMismatch {
        field: &'static str,
        expected: usize,
        actual: usize,
    },

    /// Empty cluster error.
    #[error("cannot compute centroid of empty cluster")]
    EmptyCluster,
}
