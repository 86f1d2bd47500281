//! K-Means clustering engine (Lloyd's algorithm) for planar points

use crate::data::Point;
use crate::error::{KMeansError, Result};
use crate::rng::{RandomSource, ThreadRandom};
use std::collections::HashSet;

/// Iteration cap used when none is given
pub const DEFAULT_MAX_ITERATIONS: usize = 100;

/// Outcome of a successful clustering run
#[derive(Debug, Clone, PartialEq)]
pub struct Clustering {
    /// One centroid per cluster, index-aligned with `clusters`
    pub centroids: Vec<Point>,
    /// Members of each cluster from the last assignment step
    pub clusters: Vec<Vec<Point>>,
    /// Number of assign/update cycles executed
    pub iterations: usize,
    /// Whether the centroids stopped moving before the iteration cap
    pub converged: bool,
}

impl Clustering {
    /// Number of points in each cluster
    pub fn cluster_sizes(&self) -> Vec<usize> {
        self.clusters.iter().map(Vec::len).collect()
    }

    /// Within-cluster sum of squared distances to the cluster centroid
    pub fn inertia(&self) -> f64 {
        self.clusters
            .iter()
            .zip(&self.centroids)
            .map(|(cluster, centroid)| {
                cluster
                    .iter()
                    .map(|point| point.distance(centroid).powi(2))
                    .sum::<f64>()
            })
            .sum()
    }

    /// Index of the centroid nearest to `point`
    pub fn predict(&self, point: &Point) -> usize {
        nearest_centroid(point, &self.centroids)
    }
}

/// K-Means engine with a fixed cluster count and iteration cap
#[derive(Debug, Clone)]
pub struct KMeans<R = ThreadRandom> {
    k: usize,
    max_iterations: usize,
    centroids: Vec<Point>,
    clusters: Vec<Vec<Point>>,
    source: R,
}

impl KMeans<ThreadRandom> {
    /// Create an engine for `k` clusters with the default iteration cap
    pub fn new(k: usize) -> Result<Self> {
        Self::with_max_iterations(k, DEFAULT_MAX_ITERATIONS)
    }

    pub fn with_max_iterations(k: usize, max_iterations: usize) -> Result<Self> {
        Self::with_random_source(k, max_iterations, ThreadRandom)
    }
}

impl<R: RandomSource> KMeans<R> {
    /// Create an engine that draws starting and reseeded centroids from `source`
    pub fn with_random_source(k: usize, max_iterations: usize, source: R) -> Result<Self> {
        if k == 0 {
            return Err(KMeansError::InvalidArgument);
        }

        Ok(Self {
            k,
            max_iterations,
            centroids: Vec::new(),
            clusters: Vec::new(),
            source,
        })
    }

    pub fn k(&self) -> usize {
        self.k
    }

    pub fn max_iterations(&self) -> usize {
        self.max_iterations
    }

    /// Centroids from the last successful run (empty before the first one)
    pub fn centroids(&self) -> &[Point] {
        &self.centroids
    }

    /// Clusters from the last successful run (empty before the first one)
    pub fn clusters(&self) -> &[Vec<Point>] {
        &self.clusters
    }

    /// Cluster `points` into `k` groups
    ///
    /// # Arguments
    /// * `points` - Input points, at least `k` of them
    ///
    /// # Returns
    /// * The final centroids and clusters. They are also kept in the engine
    ///   for `centroids()`/`clusters()`. On error the engine keeps the
    ///   state of the previous successful run.
    pub fn fit(&mut self, points: &[Point]) -> Result<Clustering> {
        if points.is_empty() {
            return Err(KMeansError::EmptyDataset);
        }

        if points.len() < self.k {
            return Err(KMeansError::InsufficientPoints {
                points: points.len(),
                k: self.k,
            });
        }

        let mut centroids = initialize_centroids(points, self.k, &mut self.source);
        let mut clusters = None;
        let mut iterations = 0;
        let mut converged = false;

        while iterations < self.max_iterations {
            let assigned = assign_clusters(points, &centroids);
            let mut candidates = update_centroids(&assigned, &centroids);
            let reseeded =
                reseed_empty_clusters(&assigned, &mut candidates, points, &mut self.source);

            if let Some(index) = candidates.iter().position(|c| !c.is_finite()) {
                return Err(KMeansError::InvalidCentroid { index });
            }

            iterations += 1;
            clusters = Some(assigned);

            if reseeded == 0 && candidates == centroids {
                converged = true;
                log::info!("k-means converged after {} iterations", iterations);
                break;
            }

            log::debug!(
                "iteration {}: max centroid shift {:.6}",
                iterations,
                max_shift(&centroids, &candidates)
            );
            centroids = candidates;
        }

        if !converged && self.max_iterations > 0 {
            log::warn!(
                "k-means stopped at the iteration cap ({}) without converging",
                self.max_iterations
            );
        }

        // With a zero cap nothing was assigned yet
        let clusters = clusters.unwrap_or_else(|| assign_clusters(points, &centroids));

        self.centroids = centroids.clone();
        self.clusters = clusters.clone();

        Ok(Clustering {
            centroids,
            clusters,
            iterations,
            converged,
        })
    }

    /// Print the last run as a text grid
    pub fn visualize(&self) {
        crate::viz::print_visualization(&self.centroids, &self.clusters);
    }
}

/// Euclidean distance between two points
pub fn distance(p1: &Point, p2: &Point) -> f64 {
    p1.distance(p2)
}

/// Pick `k` distinct input points as starting centroids
///
/// Indices are drawn from `source` until `k` distinct ones have been seen, so
/// `points.len()` must be at least `k`.
pub fn initialize_centroids<R: RandomSource + ?Sized>(
    points: &[Point],
    k: usize,
    source: &mut R,
) -> Vec<Point> {
    let mut centroids = Vec::with_capacity(k);
    let mut chosen = HashSet::with_capacity(k);

    while centroids.len() < k {
        let index = source.next_index(points.len());
        if chosen.insert(index) {
            centroids.push(points[index]);
        }
    }

    centroids
}

/// Group each point with its nearest centroid
///
/// Returns exactly `centroids.len()` clusters, some possibly empty. On equal
/// distances the lower centroid index wins.
pub fn assign_clusters(points: &[Point], centroids: &[Point]) -> Vec<Vec<Point>> {
    let mut clusters = vec![Vec::new(); centroids.len()];

    if centroids.is_empty() {
        return clusters;
    }

    for point in points {
        clusters[nearest_centroid(point, centroids)].push(*point);
    }

    clusters
}

/// Recompute each centroid as the mean of its cluster
///
/// An empty cluster keeps its previous centroid, so the output stays aligned
/// with `previous`. `fit` then reseeds those with `reseed_empty_clusters`.
pub fn update_centroids(clusters: &[Vec<Point>], previous: &[Point]) -> Vec<Point> {
    clusters
        .iter()
        .zip(previous)
        .map(|(cluster, &old)| {
            if cluster.is_empty() {
                return old;
            }

            let n = cluster.len() as f64;
            let sum_x: f64 = cluster.iter().map(|p| p.x).sum();
            let sum_y: f64 = cluster.iter().map(|p| p.y).sum();

            Point::new(sum_x / n, sum_y / n)
        })
        .collect()
}

/// Move the centroid of every empty cluster onto a random input point
///
/// Only points that no centroid sits on yet are candidates. When every point is
/// already taken the centroid stays where it is and is not counted.
/// Returns how many centroids were moved.
pub fn reseed_empty_clusters<R: RandomSource + ?Sized>(
    clusters: &[Vec<Point>],
    centroids: &mut [Point],
    points: &[Point],
    source: &mut R,
) -> usize {
    let mut reseeded = 0;

    for (index, cluster) in clusters.iter().enumerate().take(centroids.len()) {
        if !cluster.is_empty() {
            continue;
        }

        let free: Vec<&Point> = points.iter().filter(|p| !centroids.contains(*p)).collect();
        if free.is_empty() {
            log::debug!("cluster {} is empty and every point is taken", index);
            continue;
        }

        centroids[index] = *free[source.next_index(free.len())];
        log::debug!("cluster {} is empty, reseeded at {}", index, centroids[index]);
        reseeded += 1;
    }

    reseeded
}

fn nearest_centroid(point: &Point, centroids: &[Point]) -> usize {
    let mut closest_cluster = 0;
    let mut min_distance = f64::INFINITY;

    for (cluster_idx, centroid) in centroids.iter().enumerate() {
        let d = distance(point, centroid);
        if cluster_idx == 0 || d < min_distance {
            min_distance = d;
            closest_cluster = cluster_idx;
        }
    }

    closest_cluster
}

fn max_shift(old: &[Point], new: &[Point]) -> f64 {
    old.iter()
        .zip(new)
        .map(|(a, b)| a.distance(b))
        .fold(0.0, f64::max)
}
