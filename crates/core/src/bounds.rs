//! Axis-aligned geographic bounding rectangles

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle in geographic (or projected) coordinates.
///
/// Invariant: `south < north` and `west < east`, enforced at construction.
/// For geographic data, x is longitude (west/east) and y is latitude
/// (south/north); the same type is used for projected extents in metres.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoBounds {
    pub south: f64,
    pub west: f64,
    pub north: f64,
    pub east: f64,
}

impl GeoBounds {
    /// Create bounds, rejecting degenerate or inverted rectangles
    pub fn new(south: f64, west: f64, north: f64, east: f64) -> Result<Self> {
        if !(south.is_finite() && west.is_finite() && north.is_finite() && east.is_finite())
            || south >= north
            || west >= east
        {
            return Err(Error::InvalidBounds {
                south,
                west,
                north,
                east,
            });
        }
        Ok(Self {
            south,
            west,
            north,
            east,
        })
    }

    /// Bounds from two diagonal corner points, in any order
    pub fn from_corners(a: (f64, f64), b: (f64, f64)) -> Result<Self> {
        Self::new(a.1.min(b.1), a.0.min(b.0), a.1.max(b.1), a.0.max(b.0))
    }

    /// Smallest bounds enclosing a set of (x, y) points
    pub fn from_points(points: impl IntoIterator<Item = (f64, f64)>) -> Result<Self> {
        let mut min_x = f64::INFINITY;
        let mut min_y = f64::INFINITY;
        let mut max_x = f64::NEG_INFINITY;
        let mut max_y = f64::NEG_INFINITY;
        let mut any = false;

        for (x, y) in points {
            min_x = min_x.min(x);
            min_y = min_y.min(y);
            max_x = max_x.max(x);
            max_y = max_y.max(y);
            any = true;
        }

        if !any {
            return Err(Error::EmptyInput("no points to bound"));
        }
        Self::new(min_y, min_x, max_y, max_x)
    }

    /// Width of the rectangle (east - west)
    pub fn width(&self) -> f64 {
        self.east - self.west
    }

    /// Height of the rectangle (north - south)
    pub fn height(&self) -> f64 {
        self.north - self.south
    }

    /// Area of the rectangle
    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }

    /// Center point as (x, y)
    pub fn center(&self) -> (f64, f64) {
        (
            (self.west + self.east) / 2.0,
            (self.south + self.north) / 2.0,
        )
    }

    /// The four corners as (x, y), in SW, NW, SE, NE order
    pub fn corners(&self) -> [(f64, f64); 4] {
        [
            (self.west, self.south),
            (self.west, self.north),
            (self.east, self.south),
            (self.east, self.north),
        ]
    }

    /// Expand each axis symmetrically by `fraction` of its span.
    ///
    /// `padded(0.05)` grows the rectangle by 5% of its width on each of
    /// west/east and 5% of its height on each of south/north.
    pub fn padded(&self, fraction: f64) -> Result<Self> {
        if !fraction.is_finite() {
            return Err(Error::non_finite("pad_fraction", fraction));
        }
        let dx = self.width() * fraction;
        let dy = self.height() * fraction;
        Self::new(
            self.south - dy,
            self.west - dx,
            self.north + dy,
            self.east + dx,
        )
    }

    /// Whether a point lies inside the rectangle (inclusive edges)
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.west && x <= self.east && y >= self.south && y <= self.north
    }

    /// As (west, south, east, north), the common (min_x, min_y, max_x, max_y) order
    pub fn to_wsen(&self) -> (f64, f64, f64, f64) {
        (self.west, self.south, self.east, self.north)
    }
}
