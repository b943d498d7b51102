//! Weighted Gaussian kernel density estimation
//!
//! Produces a relative-intensity surface from weighted event points: the
//! kernel contributions are summed per cell and the whole grid is divided
//! by its maximum. This is deliberately NOT a true probability density —
//! the standard `1/(2π·h²·N)` normalizer is omitted, matching the
//! [0, 1] max-normalized convention the heatmap and 3D-column renderers
//! are tuned to.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use snowmap_core::raster::GeoTransform;
use snowmap_core::{DensityGrid, Error, Grid, Result, WeightedPoint};

/// Parameters for density estimation
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DensityParams {
    /// Grid rows (cells along the y axis)
    pub rows: usize,
    /// Grid columns (cells along the x axis)
    pub cols: usize,
    /// Kernel spread, in the same units as the point coordinates
    pub bandwidth: f64,
}

impl DensityParams {
    /// Square grid of `resolution` cells per axis
    pub fn square(resolution: usize, bandwidth: f64) -> Self {
        Self {
            rows: resolution,
            cols: resolution,
            bandwidth,
        }
    }
}

impl Default for DensityParams {
    fn default() -> Self {
        Self::square(100, 1.0)
    }
}

/// Estimate event intensity over a regular grid.
///
/// # Algorithm
///
/// Sample locations are evenly spaced across the point extent, endpoints
/// included (row 0 is the northern edge). Each cell accumulates
///
/// ```text
/// value(gx, gy) = Σ wᵢ · exp(-((gx-xᵢ)² + (gy-yᵢ)²) / (2h²))
/// ```
///
/// and the full grid is then divided by its maximum, giving output in
/// [0, 1]. If every kernel sum is zero (all weights zero) the all-zero
/// grid is returned as-is.
///
/// Complexity is O(rows · cols · points); fine for the grid sizes and
/// point counts this library targets, and rows are computed in parallel.
/// Much larger point sets would want a spatial index or FFT approach.
pub fn estimate_density(points: &[WeightedPoint], params: &DensityParams) -> Result<DensityGrid> {
    if points.is_empty() {
        return Err(Error::EmptyInput("no points for density estimation"));
    }
    if params.rows == 0 || params.cols == 0 {
        return Err(Error::InvalidParameter {
            name: "resolution",
            value: format!("{}x{}", params.cols, params.rows),
            reason: "grid must have at least one cell per axis".to_string(),
        });
    }
    if !params.bandwidth.is_finite() || params.bandwidth <= 0.0 {
        return Err(Error::InvalidParameter {
            name: "bandwidth",
            value: params.bandwidth.to_string(),
            reason: "must be a positive finite number".to_string(),
        });
    }

    // Point extent, unpadded. A degenerate span (single point, collinear
    // points) is allowed: the step along that axis is simply 0.
    let mut min_x = f64::INFINITY;
    let mut min_y = f64::INFINITY;
    let mut max_x = f64::NEG_INFINITY;
    let mut max_y = f64::NEG_INFINITY;
    for p in points {
        min_x = min_x.min(p.x);
        min_y = min_y.min(p.y);
        max_x = max_x.max(p.x);
        max_y = max_y.max(p.y);
    }

    let step_x = if params.cols > 1 {
        (max_x - min_x) / (params.cols - 1) as f64
    } else {
        0.0
    };
    let step_y = if params.rows > 1 {
        (max_y - min_y) / (params.rows - 1) as f64
    } else {
        0.0
    };
    let transform = GeoTransform::new(min_x, max_y, step_x, -step_y);

    let two_h_sq = 2.0 * params.bandwidth * params.bandwidth;
    let cols = params.cols;

    let mut data: Vec<f64> = (0..params.rows)
        .into_par_iter()
        .flat_map(|row| {
            let gy = max_y - row as f64 * step_y;
            let mut row_data = vec![0.0; cols];

            for (col, cell) in row_data.iter_mut().enumerate() {
                let gx = min_x + col as f64 * step_x;
                *cell = points
                    .iter()
                    .map(|p| p.weight * (-p.dist_sq(gx, gy) / two_h_sq).exp())
                    .sum();
            }

            row_data
        })
        .collect();

    let peak = data.iter().copied().fold(0.0_f64, f64::max);
    if peak > 0.0 {
        for v in &mut data {
            *v /= peak;
        }
    }

    let mut grid = Grid::from_vec(data, params.rows, params.cols)?;
    grid.set_transform(transform);

    Ok(grid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn corner_points() -> Vec<WeightedPoint> {
        vec![
            WeightedPoint::new(0.0, 0.0, 1.0),
            WeightedPoint::new(10.0, 0.0, 1.0),
            WeightedPoint::new(0.0, 10.0, 5.0),
        ]
    }

    #[test]
    fn test_output_in_unit_range_with_max_exactly_one() {
        let grid =
            estimate_density(&corner_points(), &DensityParams::square(50, 2.0)).unwrap();

        let (min, max) = grid.min_max().unwrap();
        assert!(min >= 0.0);
        assert_relative_eq!(max, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_heavy_point_dominates() {
        // Weight 5 at (0, 10) outweighs the two weight-1 points despite
        // being isolated; the argmax lands on the cell nearest (0, 10),
        // which with a north-up grid is row 0, col 0.
        let grid =
            estimate_density(&corner_points(), &DensityParams::square(50, 2.0)).unwrap();

        assert_eq!(grid.max_cell(), Some((0, 0)));
        let (gx, gy) = grid.sample_to_geo(0, 0);
        assert_relative_eq!(gx, 0.0);
        assert_relative_eq!(gy, 10.0);
    }

    #[test]
    fn test_peak_tracks_heavier_of_two_points() {
        let points = vec![
            WeightedPoint::new(0.0, 0.0, 1.0),
            WeightedPoint::new(10.0, 10.0, 3.0),
        ];
        let grid = estimate_density(&points, &DensityParams::square(21, 2.0)).unwrap();

        // (10, 10) is the NE corner: row 0, last column
        assert_eq!(grid.max_cell(), Some((0, 20)));
    }

    #[test]
    fn test_single_point_degenerate_extent() {
        // One point collapses the extent; every sample location coincides
        // with the point, so the normalized surface is 1 everywhere.
        let points = vec![WeightedPoint::new(3.0, 7.0, 1.0)];
        let grid = estimate_density(&points, &DensityParams::square(10, 2.0)).unwrap();

        for row in 0..10 {
            for col in 0..10 {
                assert_relative_eq!(grid.get(row, col).unwrap(), 1.0);
            }
        }
    }

    #[test]
    fn test_grid_spans_point_extent_unpadded() {
        let grid =
            estimate_density(&corner_points(), &DensityParams::square(50, 2.0)).unwrap();

        let (x0, y0) = grid.sample_to_geo(0, 0);
        let (x1, y1) = grid.sample_to_geo(49, 49);
        assert_relative_eq!(x0, 0.0);
        assert_relative_eq!(y0, 10.0);
        assert_relative_eq!(x1, 10.0, epsilon = 1e-10);
        assert_relative_eq!(y1, 0.0, epsilon = 1e-10);
    }

    #[test]
    fn test_rectangular_grid() {
        let grid =
            estimate_density(&corner_points(), &DensityParams {
                rows: 30,
                cols: 60,
                bandwidth: 2.0,
            })
            .unwrap();

        assert_eq!(grid.shape(), (30, 60));
    }

    #[test]
    fn test_all_zero_weights_returns_zero_grid() {
        let points = vec![
            WeightedPoint::new(0.0, 0.0, 0.0),
            WeightedPoint::new(10.0, 10.0, 0.0),
        ];
        let grid = estimate_density(&points, &DensityParams::square(10, 2.0)).unwrap();

        let (min, max) = grid.min_max().unwrap();
        assert_eq!(min, 0.0);
        assert_eq!(max, 0.0);
    }

    #[test]
    fn test_empty_points_rejected() {
        let result = estimate_density(&[], &DensityParams::default());
        assert!(matches!(result, Err(Error::EmptyInput(_))));
    }

    #[test]
    fn test_invalid_parameters_rejected() {
        let points = corner_points();
        for params in [
            DensityParams::square(0, 2.0),
            DensityParams::square(50, 0.0),
            DensityParams::square(50, -1.0),
            DensityParams::square(50, f64::NAN),
        ] {
            assert!(matches!(
                estimate_density(&points, &params),
                Err(Error::InvalidParameter { .. })
            ));
        }
    }

    #[test]
    fn test_wider_bandwidth_flattens_surface() {
        let points = corner_points();
        let narrow = estimate_density(&points, &DensityParams::square(50, 1.0)).unwrap();
        let wide = estimate_density(&points, &DensityParams::square(50, 20.0)).unwrap();

        // With a wide kernel the normalized surface stays near 1
        // everywhere; with a narrow one, the center cell is near 0.
        let center_narrow = narrow.get(25, 25).unwrap();
        let center_wide = wide.get(25, 25).unwrap();
        assert!(center_wide > center_narrow);
        assert!(center_wide > 0.5);
        assert!(center_narrow < 0.1);
    }

    #[test]
    fn test_deterministic() {
        let points = corner_points();
        let params = DensityParams::square(40, 2.0);
        let a = estimate_density(&points, &params).unwrap();
        let b = estimate_density(&points, &params).unwrap();

        assert_eq!(a.data(), b.data());
    }
}
