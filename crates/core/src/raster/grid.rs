//! Generic 2D grid with geographic metadata

use crate::error::{Error, Result};
use crate::raster::{GeoTransform, GridElement};
use ndarray::{Array2, ArrayView2};

/// A density surface: grid of values normalized to [0, 1]
pub type DensityGrid = Grid<f64>;

/// A georeferenced 2D grid of cell values.
///
/// Stores values of type `T` in row-major order with an associated
/// [`GeoTransform`] mapping (col, row) indices to (x, y) coordinates.
#[derive(Debug, Clone)]
pub struct Grid<T: GridElement> {
    /// Grid data stored as (row, col)
    data: Array2<T>,
    /// Affine transformation
    transform: GeoTransform,
}

impl<T: GridElement> Grid<T> {
    /// Create a new grid filled with zeros
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            data: Array2::zeros((rows, cols)),
            transform: GeoTransform::default(),
        }
    }

    /// Create a grid from a flat row-major vector
    pub fn from_vec(data: Vec<T>, rows: usize, cols: usize) -> Result<Self> {
        if data.len() != rows * cols {
            return Err(Error::InvalidDimensions {
                width: cols,
                height: rows,
            });
        }

        let array = Array2::from_shape_vec((rows, cols), data)
            .map_err(|e| Error::Other(e.to_string()))?;

        Ok(Self {
            data: array,
            transform: GeoTransform::default(),
        })
    }

    /// Create a grid from an ndarray
    pub fn from_array(data: Array2<T>) -> Self {
        Self {
            data,
            transform: GeoTransform::default(),
        }
    }

    /// Number of rows
    pub fn rows(&self) -> usize {
        self.data.nrows()
    }

    /// Number of columns
    pub fn cols(&self) -> usize {
        self.data.ncols()
    }

    /// Dimensions as (rows, cols)
    pub fn shape(&self) -> (usize, usize) {
        self.data.dim()
    }

    /// Total number of cells
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the grid has no cells
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Get value at (row, col)
    pub fn get(&self, row: usize, col: usize) -> Result<T> {
        self.data
            .get((row, col))
            .copied()
            .ok_or(Error::IndexOutOfBounds {
                row,
                col,
                rows: self.rows(),
                cols: self.cols(),
            })
    }

    /// Set value at (row, col)
    pub fn set(&mut self, row: usize, col: usize, value: T) -> Result<()> {
        if row >= self.rows() || col >= self.cols() {
            return Err(Error::IndexOutOfBounds {
                row,
                col,
                rows: self.rows(),
                cols: self.cols(),
            });
        }
        self.data[(row, col)] = value;
        Ok(())
    }

    /// Get a view of the underlying data
    pub fn view(&self) -> ArrayView2<'_, T> {
        self.data.view()
    }

    /// Get a reference to the underlying array
    pub fn data(&self) -> &Array2<T> {
        &self.data
    }

    /// Get a mutable reference to the underlying array
    pub fn data_mut(&mut self) -> &mut Array2<T> {
        &mut self.data
    }

    /// Consume the grid and return the underlying array
    pub fn into_array(self) -> Array2<T> {
        self.data
    }

    /// Get the geotransform
    pub fn transform(&self) -> &GeoTransform {
        &self.transform
    }

    /// Set the geotransform
    pub fn set_transform(&mut self, transform: GeoTransform) {
        self.transform = transform;
    }

    /// Geographic coordinates of sample (col, row)
    pub fn sample_to_geo(&self, col: usize, row: usize) -> (f64, f64) {
        self.transform.sample_to_geo(col, row)
    }

    /// Convert geographic coordinates to fractional pixel coordinates
    pub fn geo_to_pixel(&self, x: f64, y: f64) -> (f64, f64) {
        self.transform.geo_to_pixel(x, y)
    }

    /// Minimum and maximum cell values, as f64
    pub fn min_max(&self) -> Option<(f64, f64)> {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        let mut any = false;

        for &value in self.data.iter() {
            if let Some(v) = value.to_f64() {
                if v.is_nan() {
                    continue;
                }
                min = min.min(v);
                max = max.max(v);
                any = true;
            }
        }

        any.then_some((min, max))
    }

    /// (row, col) of the cell holding the maximum value.
    ///
    /// Ties resolve to the first cell in row-major order.
    pub fn max_cell(&self) -> Option<(usize, usize)> {
        let mut best: Option<((usize, usize), f64)> = None;

        for ((row, col), &value) in self.data.indexed_iter() {
            let Some(v) = value.to_f64() else { continue };
            if v.is_nan() {
                continue;
            }
            match best {
                Some((_, b)) if v <= b => {}
                _ => best = Some(((row, col), v)),
            }
        }

        best.map(|(idx, _)| idx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_creation() {
        let grid: Grid<f64> = Grid::new(100, 200);
        assert_eq!(grid.rows(), 100);
        assert_eq!(grid.cols(), 200);
        assert_eq!(grid.shape(), (100, 200));
    }

    #[test]
    fn test_grid_access() {
        let mut grid: Grid<f64> = Grid::new(10, 10);
        grid.set(5, 5, 42.0).unwrap();
        assert_eq!(grid.get(5, 5).unwrap(), 42.0);
        assert!(grid.get(10, 0).is_err());
    }

    #[test]
    fn test_from_vec_size_check() {
        assert!(Grid::<f64>::from_vec(vec![0.0; 9], 3, 3).is_ok());
        assert!(Grid::<f64>::from_vec(vec![0.0; 8], 3, 3).is_err());
    }

    #[test]
    fn test_min_max() {
        let grid = Grid::from_vec(vec![3.0, -1.0, 7.0, 0.5], 2, 2).unwrap();
        assert_eq!(grid.min_max(), Some((-1.0, 7.0)));
    }

    #[test]
    fn test_max_cell() {
        let grid = Grid::from_vec(vec![0.0, 0.2, 0.9, 0.1, 1.0, 0.3], 2, 3).unwrap();
        assert_eq!(grid.max_cell(), Some((1, 1)));
    }

    #[test]
    fn test_max_cell_tie_first_wins() {
        let grid = Grid::from_vec(vec![1.0, 1.0, 0.0, 0.0], 2, 2).unwrap();
        assert_eq!(grid.max_cell(), Some((0, 0)));
    }
}
