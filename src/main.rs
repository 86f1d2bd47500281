//! planar-kmeans: cluster points from a CSV file and show the result
//!
//! Loads points, fits K-Means, prints cluster statistics and the text-grid
//! visualization, and optionally writes a scatter plot.

use anyhow::{Context, Result};
use clap::Parser;
use env_logger::Env;
use planar_kmeans::{load_points, plot_clusters, Args, Clustering, KMeans};
use std::time::Instant;

fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::init_from_env(Env::default().filter_or("RUST_LOG", args.log_level()));

    let start_time = Instant::now();

    let points = load_points(&args.input)
        .with_context(|| format!("could not read points from {}", args.input))?;
    println!("✓ Data loaded: {} points", points.len());

    let mut kmeans = KMeans::with_max_iterations(args.clusters, args.max_iters)?;
    let clustering = kmeans.fit(&points)?;

    println!(
        "✓ Model fitted in {} iterations ({})",
        clustering.iterations,
        if clustering.converged {
            "converged"
        } else {
            "iteration cap reached"
        }
    );

    print_cluster_statistics(&clustering, points.len());

    println!();
    kmeans.visualize();

    if let Some(plot_path) = &args.plot {
        plot_clusters(&clustering, plot_path, None)?;
        println!("\nCluster plot saved to: {}", plot_path);
    }

    if args.verbose {
        println!(
            "\nTotal processing time: {:.2}s",
            start_time.elapsed().as_secs_f64()
        );
    }

    Ok(())
}

/// Print cluster statistics to console
fn print_cluster_statistics(clustering: &Clustering, total: usize) {
    println!("\n=== Cluster Statistics ===");
    println!("Within-cluster sum of squares (Inertia): {:.2}", clustering.inertia());

    println!("\nCluster | Size | Share  | Centroid");
    println!("--------|------|--------|---------");
    for (i, (size, centroid)) in clustering
        .cluster_sizes()
        .into_iter()
        .zip(&clustering.centroids)
        .enumerate()
    {
        let percentage = (size as f64 / total as f64) * 100.0;
        println!(
            "{:>7} | {:>4} | {:5.1}% | {}",
            planar_kmeans::viz::cluster_symbol(i),
            size,
            percentage,
            centroid
        );
    }
}
