//! Command-line interface definitions and argument parsing

use clap::Parser;

/// Cluster 2D points from a CSV file with K-Means
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to a CSV file with `x` and `y` columns
    #[arg(short, long, default_value = "points.csv")]
    pub input: String,

    /// Number of clusters for K-Means
    #[arg(short = 'k', long, default_value = "3")]
    pub clusters: usize,

    /// Maximum iterations for K-Means algorithm
    #[arg(long, default_value = "100")]
    pub max_iters: usize,

    /// Also write a scatter plot PNG to this path
    #[arg(short, long)]
    pub plot: Option<String>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Default log filter for the chosen verbosity
    pub fn log_level(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else {
            "info"
        }
    }
}
