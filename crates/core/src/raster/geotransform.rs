//! Affine geotransformation for grids

use crate::bounds::GeoBounds;
use serde::{Deserialize, Serialize};

/// Affine transformation coefficients for georeferencing grids.
///
/// Converts between pixel coordinates (col, row) and geographic coordinates (x, y):
/// ```text
/// x = origin_x + col * pixel_width + row * row_rotation
/// y = origin_y + col * col_rotation + row * pixel_height
/// ```
///
/// For north-up grids, `row_rotation` and `col_rotation` are 0 and
/// `pixel_height` is negative (row 0 is the northern edge).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoTransform {
    /// X coordinate of the upper-left corner
    pub origin_x: f64,
    /// Y coordinate of the upper-left corner
    pub origin_y: f64,
    /// Pixel width (cell size in X direction)
    pub pixel_width: f64,
    /// Pixel height (cell size in Y direction, usually negative)
    pub pixel_height: f64,
    /// Rotation about X axis (usually 0)
    pub row_rotation: f64,
    /// Rotation about Y axis (usually 0)
    pub col_rotation: f64,
}

impl GeoTransform {
    /// Create a new GeoTransform with no rotation (north-up grid)
    pub fn new(origin_x: f64, origin_y: f64, pixel_width: f64, pixel_height: f64) -> Self {
        Self {
            origin_x,
            origin_y,
            pixel_width,
            pixel_height,
            row_rotation: 0.0,
            col_rotation: 0.0,
        }
    }

    /// North-up transform whose corner samples span `bounds` exactly.
    ///
    /// Sample (0, 0) lands on the north-west corner and
    /// (cols - 1, rows - 1) on the south-east corner, matching the
    /// evenly-spaced "linspace" grid used by the density estimator.
    /// With a single row or column the step along that axis is 0.
    pub fn spanning(bounds: &GeoBounds, rows: usize, cols: usize) -> Self {
        let step_x = if cols > 1 {
            bounds.width() / (cols - 1) as f64
        } else {
            0.0
        };
        let step_y = if rows > 1 {
            bounds.height() / (rows - 1) as f64
        } else {
            0.0
        };
        Self::new(bounds.west, bounds.north, step_x, -step_y)
    }

    /// Geographic coordinates of sample (col, row)
    pub fn sample_to_geo(&self, col: usize, row: usize) -> (f64, f64) {
        let col_f = col as f64;
        let row_f = row as f64;

        let x = self.origin_x + col_f * self.pixel_width + row_f * self.row_rotation;
        let y = self.origin_y + col_f * self.col_rotation + row_f * self.pixel_height;

        (x, y)
    }

    /// Geographic coordinates of the center of pixel (col, row)
    pub fn pixel_center_to_geo(&self, col: usize, row: usize) -> (f64, f64) {
        let col_f = col as f64 + 0.5;
        let row_f = row as f64 + 0.5;

        let x = self.origin_x + col_f * self.pixel_width + row_f * self.row_rotation;
        let y = self.origin_y + col_f * self.col_rotation + row_f * self.pixel_height;

        (x, y)
    }

    /// Convert geographic coordinates to fractional pixel coordinates.
    ///
    /// Returns NaN coordinates for a degenerate (non-invertible) transform.
    pub fn geo_to_pixel(&self, x: f64, y: f64) -> (f64, f64) {
        let det = self.pixel_width * self.pixel_height - self.row_rotation * self.col_rotation;

        if det.abs() < 1e-10 {
            return (f64::NAN, f64::NAN);
        }

        let dx = x - self.origin_x;
        let dy = y - self.origin_y;

        let col = (self.pixel_height * dx - self.row_rotation * dy) / det;
        let row = (-self.col_rotation * dx + self.pixel_width * dy) / det;

        (col, row)
    }

    /// Check if this is a north-up transform (no rotation terms)
    pub fn is_north_up(&self) -> bool {
        self.row_rotation.abs() < 1e-10
            && self.col_rotation.abs() < 1e-10
            && self.pixel_height < 0.0
    }

    /// Envelope of a raster of `width` x `height` pixels, as
    /// (min_x, min_y, max_x, max_y).
    ///
    /// All four corners are transformed and bounded, so rotated
    /// transforms are handled correctly.
    pub fn extent(&self, width: usize, height: usize) -> (f64, f64, f64, f64) {
        let (x0, y0) = self.sample_to_geo(0, 0);
        let (x1, y1) = self.sample_to_geo(width, 0);
        let (x2, y2) = self.sample_to_geo(0, height);
        let (x3, y3) = self.sample_to_geo(width, height);

        let min_x = x0.min(x1).min(x2).min(x3);
        let max_x = x0.max(x1).max(x2).max(x3);
        let min_y = y0.min(y1).min(y2).min(y3);
        let max_y = y0.max(y1).max(y2).max(y3);

        (min_x, min_y, max_x, max_y)
    }
}

impl Default for GeoTransform {
    fn default() -> Self {
        Self::new(0.0, 0.0, 1.0, -1.0)
    }
}
