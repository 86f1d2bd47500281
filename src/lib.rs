//! planar-kmeans: Lloyd's k-means clustering for two-dimensional points
//!
//! The engine picks `k` random input points as starting centroids, then
//! alternates nearest-centroid assignment and mean updates until the centroids
//! stop moving or the iteration cap is hit. Results can be inspected as a text
//! grid or written out as a scatter plot.

pub mod cli;
pub mod data;
pub mod error;
pub mod model;
pub mod rng;
pub mod viz;

// Re-export public items for easier access
pub use cli::Args;
pub use data::{load_points, Point};
pub use error::{KMeansError, Result};
pub use model::{Clustering, KMeans, DEFAULT_MAX_ITERATIONS};
pub use rng::{IndexSequence, RandomSource, ThreadRandom};
pub use viz::{plot_clusters, render_grid};
