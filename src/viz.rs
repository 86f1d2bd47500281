//! Visualization of clustering results: a text grid and a Plotters scatter plot

use crate::data::Point;
use crate::error::KMeansError;
use crate::model::Clustering;
use plotters::prelude::*;
use std::path::Path;

/// Grid cell with nothing drawn on it
pub const BLANK: char = ' ';

/// Marker drawn at each centroid, on top of cluster symbols
pub const CENTROID_MARKER: char = '⦿';

/// Largest grid, in cells, that `render_grid` will build
pub const MAX_GRID_CELLS: usize = 1_000_000;

/// Color palette for different clusters
const CLUSTER_COLORS: [RGBColor; 6] = [RED, BLUE, GREEN, MAGENTA, CYAN, YELLOW];

/// Symbol used for the members of cluster `index`: 'A', 'B', ...
pub fn cluster_symbol(index: usize) -> char {
    u32::try_from(index)
        .ok()
        .and_then(|i| char::from_u32(u32::from('A') + i))
        .unwrap_or('?')
}

// Round half up, matching how the grid cells are laid out
fn round_half_up(v: f64) -> i64 {
    (v + 0.5).floor() as i64
}

// Number of cells between two inclusive bounds, None on overflow
fn grid_span(min: i64, max: i64) -> Option<usize> {
    let span = max.checked_sub(min)?.checked_add(1)?;
    usize::try_from(span).ok()
}

/// Render centroids and clusters onto a character grid
///
/// The first row is the smallest y. Returns an empty string when there is
/// nothing to draw.
pub fn render_grid(centroids: &[Point], clusters: &[Vec<Point>]) -> String {
    let all_points = || centroids.iter().chain(clusters.iter().flatten());

    if all_points().next().is_none() {
        return String::new();
    }

    let min_x = all_points().map(|p| p.x).fold(f64::INFINITY, f64::min).floor() as i64;
    let min_y = all_points().map(|p| p.y).fold(f64::INFINITY, f64::min).floor() as i64;
    let max_x = all_points().map(|p| p.x).fold(f64::NEG_INFINITY, f64::max).ceil() as i64;
    let max_y = all_points().map(|p| p.y).fold(f64::NEG_INFINITY, f64::max).ceil() as i64;

    let (Some(width), Some(height)) = (grid_span(min_x, max_x), grid_span(min_y, max_y)) else {
        log::warn!("points span too wide to draw as a grid");
        return String::new();
    };

    if width.checked_mul(height).map_or(true, |cells| cells > MAX_GRID_CELLS) {
        log::warn!(
            "a {}x{} grid exceeds {} cells, skipping visualization",
            width,
            height,
            MAX_GRID_CELLS
        );
        return String::new();
    }

    let mut grid = vec![vec![BLANK; width]; height];

    let mut plot = |point: &Point, symbol: char| {
        let col = round_half_up(point.x) - min_x;
        let row = round_half_up(point.y) - min_y;
        if (0..width as i64).contains(&col) && (0..height as i64).contains(&row) {
            grid[row as usize][col as usize] = symbol;
        }
    };

    for (cluster_index, cluster) in clusters.iter().enumerate() {
        let symbol = cluster_symbol(cluster_index);
        for point in cluster {
            plot(point, symbol);
        }
    }

    for centroid in centroids {
        plot(centroid, CENTROID_MARKER);
    }

    grid.iter()
        .map(|row| row.iter().collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Print the text grid to stdout
pub fn print_visualization(centroids: &[Point], clusters: &[Vec<Point>]) {
    println!("Visualization (ASCII Art):");
    println!("{}", render_grid(centroids, clusters));
}

/// Create scatter plot visualization of clusters
///
/// # Arguments
/// * `clustering` - Result of a clustering run
/// * `output_path` - Path to save the PNG plot
/// * `plot_title` - Title for the plot
pub fn plot_clusters(
    clustering: &Clustering,
    output_path: impl AsRef<Path>,
    plot_title: Option<&str>,
) -> crate::Result<()> {
    draw_scatter(clustering, output_path.as_ref(), plot_title.unwrap_or("K-Means Clusters"))
        .map_err(|e| KMeansError::Render(e.to_string()))?;

    log::info!("cluster plot saved to {}", output_path.as_ref().display());
    Ok(())
}

fn draw_scatter(
    clustering: &Clustering,
    output_path: &Path,
    title: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let all_points: Vec<&Point> = clustering
        .centroids
        .iter()
        .chain(clustering.clusters.iter().flatten())
        .collect();

    // Calculate plot bounds with some padding
    let x_min = all_points.iter().map(|p| p.x).fold(f64::INFINITY, f64::min) - 1.0;
    let x_max = all_points.iter().map(|p| p.x).fold(f64::NEG_INFINITY, f64::max) + 1.0;
    let y_min = all_points.iter().map(|p| p.y).fold(f64::INFINITY, f64::min) - 1.0;
    let y_max = all_points.iter().map(|p| p.y).fold(f64::NEG_INFINITY, f64::max) + 1.0;

    if !(x_min.is_finite() && x_max.is_finite() && y_min.is_finite() && y_max.is_finite()) {
        return Err("no finite points to plot".into());
    }

    let root = BitMapBackend::new(output_path, (800, 600)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 30))
        .margin(10)
        .x_label_area_size(50)
        .y_label_area_size(60)
        .build_cartesian_2d(x_min..x_max, y_min..y_max)?;

    chart
        .configure_mesh()
        .x_desc("x")
        .y_desc("y")
        .axis_desc_style(("sans-serif", 15))
        .draw()?;

    for (cluster_id, cluster) in clustering.clusters.iter().enumerate() {
        let color = CLUSTER_COLORS[cluster_id % CLUSTER_COLORS.len()];
        chart.draw_series(
            cluster
                .iter()
                .map(|p| Circle::new((p.x, p.y), 4, color.filled())),
        )?;
    }

    // Centroids as larger squares
    for (cluster_id, centroid) in clustering.centroids.iter().enumerate() {
        let color = CLUSTER_COLORS[cluster_id % CLUSTER_COLORS.len()];
        let (half_w, half_h) = ((x_max - x_min) * 0.01, (y_max - y_min) * 0.01);

        chart
            .draw_series(std::iter::once(Rectangle::new(
                [
                    (centroid.x - half_w, centroid.y - half_h),
                    (centroid.x + half_w, centroid.y + half_h),
                ],
                BLACK.filled(),
            )))?
            .label(format!("Cluster {} ({})", cluster_symbol(cluster_id), centroid))
            .legend(move |(x, y)| Rectangle::new([(x, y), (x + 10, y + 10)], color.filled()));
    }

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()?;

    root.present()?;

    Ok(())
}
