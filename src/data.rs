//! Point type and CSV loading using Polars

use polars::prelude::*;
use std::fmt;
use std::path::Path;

/// A point in the plane
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point
    pub fn distance(&self, other: &Point) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.3}, {:.3})", self.x, self.y)
    }
}

/// Load points from a CSV file with `x` and `y` header columns
///
/// # Arguments
/// * `file_path` - Path to the CSV file
///
/// # Returns
/// * Points in file order; rows with a missing coordinate are skipped
pub fn load_points(file_path: impl AsRef<Path>) -> crate::Result<Vec<Point>> {
    let df = LazyCsvReader::new(file_path)
        .with_has_header(true)
        .finish()?
        .select([
            col("x").cast(DataType::Float64),
            col("y").cast(DataType::Float64),
        ])
        .drop_nulls(None)
        .collect()?;

    let xs: Vec<f64> = df.column("x")?.f64()?.into_no_null_iter().collect();
    let ys: Vec<f64> = df.column("y")?.f64()?.into_no_null_iter().collect();

    let points: Vec<Point> = xs
        .into_iter()
        .zip(ys)
        .map(|(x, y)| Point::new(x, y))
        .collect();

    log::debug!("loaded {} points", points.len());

    Ok(points)
}
