//! Error types for clustering runs, data loading and rendering

use thiserror::Error;

/// Everything that can go wrong while building an engine, fitting it or
/// producing output from it
#[derive(Debug, Error)]
pub enum KMeansError {
    /// Raised at construction when `k` is not a positive integer
    #[error("The number of clusters (k) must be a positive integer.")]
    InvalidArgument,

    #[error("The dataset cannot be empty.")]
    EmptyDataset,

    #[error(
        "The number of points ({points}) must be greater than or equal to the number of clusters (k = {k})."
    )]
    InsufficientPoints { points: usize, k: usize },

    /// A recomputed centroid had a NaN or infinite coordinate
    #[error("Invalid centroid detected at index {index}. Calculation failed.")]
    InvalidCentroid { index: usize },

    #[error("failed to load points: {0}")]
    Data(#[from] polars::prelude::PolarsError),

    #[error("failed to render plot: {0}")]
    Render(String),
}

/// Common result type used throughout the library
pub type Result<T> = std::result::Result<T, KMeansError>;
