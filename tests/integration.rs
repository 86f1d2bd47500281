//! Integration tests for planar-kmeans

use planar_kmeans::{
    load_points, plot_clusters, render_grid, IndexSequence, KMeans, KMeansError, Point,
};
use std::io::Write;
use tempfile::{tempdir, NamedTempFile};

fn points(coords: &[(f64, f64)]) -> Vec<Point> {
    coords.iter().copied().map(Point::from).collect()
}

fn assert_finite(centroids: &[Point]) {
    for centroid in centroids {
        assert!(
            centroid.x.is_finite() && centroid.y.is_finite(),
            "centroid {:?} is not finite",
            centroid
        );
    }
}

/// Create a test CSV file with two well separated groups
fn create_test_csv() -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "x,y").unwrap();
    for (x, y) in [(1, 2), (2, 2), (3, 3), (10, 10), (11, 10), (12, 11)] {
        writeln!(file, "{},{}", x, y).unwrap();
    }
    file
}

#[test]
fn test_end_to_end_pipeline() {
    let test_file = create_test_csv();

    let data = load_points(test_file.path()).unwrap();
    assert_eq!(data.len(), 6);

    let mut kmeans = KMeans::new(2).unwrap();
    let clustering = kmeans.fit(&data).unwrap();

    assert_eq!(clustering.clusters.len(), 2);
    assert_eq!(clustering.centroids.len(), 2);
    assert_eq!(clustering.cluster_sizes().iter().sum::<usize>(), 6);
    assert!(clustering.inertia().is_finite());

    let grid = render_grid(kmeans.centroids(), kmeans.clusters());
    assert_eq!(grid.lines().count(), 10); // y spans 2..=11
    assert!(grid.contains('⦿'));

    let temp_dir = tempdir().unwrap();
    let plot_path = temp_dir.path().join("clusters.png");
    plot_clusters(&clustering, &plot_path, Some("Two groups")).unwrap();
    assert!(plot_path.exists());
}

#[test]
fn test_invalid_k() {
    assert!(matches!(KMeans::new(0), Err(KMeansError::InvalidArgument)));
    assert!(matches!(
        KMeans::with_max_iterations(0, 10),
        Err(KMeansError::InvalidArgument)
    ));
}

#[test]
fn test_empty_dataset() {
    let mut kmeans = KMeans::new(1).unwrap();
    let err = kmeans.fit(&[]).unwrap_err();

    assert!(matches!(err, KMeansError::EmptyDataset));
    assert_eq!(err.to_string(), "The dataset cannot be empty.");
}

#[test]
fn test_fewer_points_than_k() {
    let mut kmeans = KMeans::new(3).unwrap();
    let result = kmeans.fit(&points(&[(1.0, 2.0)]));

    assert!(matches!(
        result,
        Err(KMeansError::InsufficientPoints { points: 1, k: 3 })
    ));
    assert!(kmeans.centroids().is_empty());
    assert!(kmeans.clusters().is_empty());
}

#[test]
fn test_identifies_grouped_points() {
    let data = points(&[
        (1.0, 2.0),
        (2.0, 2.0),
        (3.0, 3.0),
        (10.0, 10.0),
        (11.0, 10.0),
        (12.0, 11.0),
    ]);
    let low = data[..3].to_vec();
    let high = data[3..].to_vec();

    // Random initialization: membership is fixed, cluster order is not
    for _ in 0..20 {
        let mut kmeans = KMeans::new(2).unwrap();
        let clustering = kmeans.fit(&data).unwrap();

        assert!(clustering.converged);
        let clusters = kmeans.clusters();
        assert!(
            (clusters[0] == low && clusters[1] == high)
                || (clusters[0] == high && clusters[1] == low),
            "unexpected grouping: {:?}",
            clusters
        );
    }
}

#[test]
fn test_scattered_points_fill_both_clusters() {
    let data = points(&[
        (1.0, 1.0),
        (5.0, 5.0),
        (9.0, 9.0),
        (10.0, 2.0),
        (4.0, 4.0),
        (8.0, 8.0),
    ]);

    let mut kmeans = KMeans::new(2).unwrap();
    kmeans.fit(&data).unwrap();

    let clusters = kmeans.clusters();
    assert_eq!(clusters.len(), 2);
    assert_eq!(clusters.iter().map(Vec::len).sum::<usize>(), data.len());
    assert_finite(kmeans.centroids());
}

#[test]
fn test_k_equal_to_point_count() {
    let data = points(&[(1.0, 1.0), (2.0, 2.0), (3.0, 3.0)]);

    let mut kmeans = KMeans::new(3).unwrap();
    kmeans.fit(&data).unwrap();

    let clusters = kmeans.clusters();
    assert_eq!(clusters.len(), 3);
    assert!(clusters.iter().all(|cluster| cluster.len() == 1));
}

#[test]
fn test_two_points_two_clusters() {
    let data = points(&[(1.0, 1.0), (2.0, 2.0)]);

    let mut kmeans = KMeans::new(2).unwrap();
    kmeans.fit(&data).unwrap();

    let clusters = kmeans.clusters();
    assert_eq!(clusters[0].len(), 1);
    assert_eq!(clusters[1].len(), 1);
}

#[test]
fn test_duplicate_points() {
    let data = points(&[(1.0, 1.0), (2.0, 2.0), (2.0, 2.0), (3.0, 3.0)]);

    for _ in 0..20 {
        let mut kmeans = KMeans::new(2).unwrap();
        kmeans.fit(&data).unwrap();

        let clusters = kmeans.clusters();
        assert!(!clusters[0].is_empty());
        assert!(!clusters[1].is_empty());
        assert_eq!(kmeans.centroids().len(), 2);
        assert_finite(kmeans.centroids());
    }
}

#[test]
fn test_coincident_starting_centroids_are_reseeded() {
    let data = points(&[(2.0, 2.0), (2.0, 2.0), (9.0, 9.0)]);
    let mut kmeans =
        KMeans::with_random_source(2, 100, IndexSequence::new([0, 1, 2])).unwrap();

    let clustering = kmeans.fit(&data).unwrap();

    assert!(clustering.converged);
    assert_eq!(clustering.cluster_sizes(), vec![2, 1]);
    assert_eq!(
        kmeans.centroids(),
        &[Point::new(2.0, 2.0), Point::new(9.0, 9.0)]
    );
}

#[test]
fn test_stops_at_max_iterations() {
    let data: Vec<Point> = (0..21).map(|i| Point::new(i as f64, 0.0)).collect();

    let mut kmeans = KMeans::with_random_source(2, 3, IndexSequence::new([0, 1])).unwrap();
    let clustering = kmeans.fit(&data).unwrap();

    assert_eq!(kmeans.max_iterations(), 3);
    assert_eq!(clustering.iterations, 3);
    assert!(!clustering.converged);
    assert_eq!(kmeans.centroids().len(), 2);
}

#[test]
fn test_identical_points_with_spare_cluster() {
    let data = points(&[(1.0, 1.0), (1.0, 1.0), (1.0, 1.0)]);

    let mut kmeans = KMeans::new(2).unwrap();
    let clustering = kmeans.fit(&data).unwrap();

    assert!(clustering.converged);
    assert_eq!(clustering.iterations, 1);
    assert_eq!(clustering.cluster_sizes(), vec![3, 0]);
}

#[test]
fn test_wide_spread_points_do_not_break_visualization() {
    let data = points(&[(0.0, 0.0), (1.0, 0.0), (3e18, 0.0), (-3e18, 0.0)]);

    let mut kmeans = KMeans::new(2).unwrap();
    kmeans.fit(&data).unwrap();

    assert_eq!(render_grid(kmeans.centroids(), kmeans.clusters()), "");
}

#[test]
fn test_converged_run_reports_centroids() {
    let data = points(&[
        (1.0, 1.0),
        (2.0, 2.0),
        (3.0, 3.0),
        (8.0, 8.0),
        (9.0, 9.0),
        (10.0, 10.0),
    ]);

    let mut kmeans = KMeans::new(2).unwrap();
    let clustering = kmeans.fit(&data).unwrap();

    assert!(clustering.converged);
    assert!(clustering.iterations <= kmeans.max_iterations());
    assert_eq!(kmeans.centroids(), clustering.centroids.as_slice());
}

#[test]
fn test_no_invalid_centroids() {
    let data = points(&[(1.0, 1.0), (2.0, 2.0), (3.0, 3.0), (4.0, 4.0), (5.0, 5.0)]);

    let mut kmeans = KMeans::new(2).unwrap();
    kmeans.fit(&data).unwrap();

    assert_finite(kmeans.centroids());
}

#[test]
fn test_non_finite_input_is_rejected() {
    let data = points(&[(1.0, 1.0), (f64::INFINITY, 2.0), (3.0, 3.0)]);

    let mut kmeans = KMeans::new(2).unwrap();
    let result = kmeans.fit(&data);

    assert!(matches!(result, Err(KMeansError::InvalidCentroid { .. })));
    assert!(kmeans.centroids().is_empty());
}

#[test]
fn test_rerun_overwrites_state() {
    let mut kmeans = KMeans::new(2).unwrap();

    kmeans
        .fit(&points(&[(0.0, 0.0), (1.0, 0.0), (50.0, 50.0)]))
        .unwrap();
    let second = points(&[(-5.0, -5.0), (-6.0, -5.0), (5.0, 5.0), (6.0, 5.0)]);
    kmeans.fit(&second).unwrap();

    let total: usize = kmeans.clusters().iter().map(Vec::len).sum();
    assert_eq!(total, second.len());
    assert!(kmeans
        .clusters()
        .iter()
        .flatten()
        .all(|point| second.contains(point)));
}

#[test]
fn test_large_dataset() {
    let data: Vec<Point> = (0..1000)
        .map(|i| {
            let t = i as f64;
            Point::new((t * 37.0) % 100.0, (t * 61.0) % 100.0)
        })
        .collect();

    let mut kmeans = KMeans::new(5).unwrap();
    let clustering = kmeans.fit(&data).unwrap();

    assert_eq!(clustering.clusters.len(), 5);
    assert_eq!(clustering.cluster_sizes().iter().sum::<usize>(), 1000);
    assert_finite(&clustering.centroids);
}
