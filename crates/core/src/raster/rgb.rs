//! RGB image buffer for map overlays

use crate::error::{Error, Result};
use ndarray::Array3;

/// An 8-bit RGB image of shape (rows, cols, 3).
///
/// Produced by `normalize_to_rgb` in the alignment module; consumed by
/// the map-rendering collaborator as an overlay texture.
#[derive(Debug, Clone, PartialEq)]
pub struct RgbImage {
    data: Array3<u8>,
}

impl RgbImage {
    /// Create an all-black image.
    ///
    /// This is the documented caller fallback for degenerate rasters.
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            data: Array3::zeros((rows, cols, 3)),
        }
    }

    /// Wrap an existing (rows, cols, 3) array
    pub fn from_array(data: Array3<u8>) -> Result<Self> {
        let (rows, cols, channels) = data.dim();
        if channels != 3 {
            return Err(Error::InvalidDimensions {
                width: cols,
                height: rows,
            });
        }
        Ok(Self { data })
    }

    /// Number of rows (image height)
    pub fn rows(&self) -> usize {
        self.data.dim().0
    }

    /// Number of columns (image width)
    pub fn cols(&self) -> usize {
        self.data.dim().1
    }

    /// The [r, g, b] triple at (row, col)
    pub fn pixel(&self, row: usize, col: usize) -> Result<[u8; 3]> {
        if row >= self.rows() || col >= self.cols() {
            return Err(Error::IndexOutOfBounds {
                row,
                col,
                rows: self.rows(),
                cols: self.cols(),
            });
        }
        Ok([
            self.data[(row, col, 0)],
            self.data[(row, col, 1)],
            self.data[(row, col, 2)],
        ])
    }

    /// Get a reference to the underlying array
    pub fn data(&self) -> &Array3<u8> {
        &self.data
    }

    /// Consume the image and return the underlying array
    pub fn into_array(self) -> Array3<u8> {
        self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zeros() {
        let img = RgbImage::zeros(4, 6);
        assert_eq!(img.rows(), 4);
        assert_eq!(img.cols(), 6);
        assert_eq!(img.pixel(3, 5).unwrap(), [0, 0, 0]);
    }

    #[test]
    fn test_from_array_rejects_bad_channels() {
        let arr = Array3::<u8>::zeros((2, 2, 4));
        assert!(RgbImage::from_array(arr).is_err());
    }

    #[test]
    fn test_pixel_out_of_bounds() {
        let img = RgbImage::zeros(2, 2);
        assert!(img.pixel(2, 0).is_err());
    }
}
