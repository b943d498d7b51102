//! Weighted event points

use crate::bounds::GeoBounds;
use crate::crs::PointTransform;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// A 2D location with a non-negative event count used as a kernel weight.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightedPoint {
    pub x: f64,
    pub y: f64,
    pub weight: f64,
}

impl WeightedPoint {
    pub fn new(x: f64, y: f64, weight: f64) -> Self {
        Self { x, y, weight }
    }

    /// Squared Euclidean distance to (other_x, other_y)
    #[inline]
    pub fn dist_sq(&self, other_x: f64, other_y: f64) -> f64 {
        let dx = self.x - other_x;
        let dy = self.y - other_y;
        dx * dx + dy * dy
    }

    /// Euclidean distance to (other_x, other_y)
    #[inline]
    pub fn dist(&self, other_x: f64, other_y: f64) -> f64 {
        self.dist_sq(other_x, other_y).sqrt()
    }
}

/// A collection of weighted points with the summary operations the
/// dashboard layer needs: extent, mean center, and per-count filtering.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PointSet {
    points: Vec<WeightedPoint>,
}

impl PointSet {
    pub fn new() -> Self {
        Self { points: Vec::new() }
    }

    pub fn from_vec(points: Vec<WeightedPoint>) -> Self {
        Self { points }
    }

    pub fn push(&mut self, point: WeightedPoint) {
        self.points.push(point);
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &WeightedPoint> {
        self.points.iter()
    }

    pub fn as_slice(&self) -> &[WeightedPoint] {
        &self.points
    }

    /// Smallest bounds enclosing all points.
    ///
    /// Fails for an empty set, and for a set whose extent collapses to a
    /// line or a point (GeoBounds requires positive spans).
    pub fn bounds(&self) -> Result<GeoBounds> {
        GeoBounds::from_points(self.points.iter().map(|p| (p.x, p.y)))
    }

    /// Mean coordinate of all points, unweighted.
    ///
    /// This is the "map center" convention of the dashboard: the mean of
    /// the raw coordinates, not a weight-weighted centroid.
    pub fn centroid(&self) -> Result<(f64, f64)> {
        if self.points.is_empty() {
            return Err(Error::EmptyInput("cannot take centroid of no points"));
        }
        let n = self.points.len() as f64;
        let sum_x: f64 = self.points.iter().map(|p| p.x).sum();
        let sum_y: f64 = self.points.iter().map(|p| p.y).sum();
        Ok((sum_x / n, sum_y / n))
    }

    /// Sum of all weights
    pub fn total_weight(&self) -> f64 {
        self.points.iter().map(|p| p.weight).sum()
    }

    /// Distinct weight values, sorted ascending.
    ///
    /// Weights are event counts in practice, so exact comparison is fine.
    pub fn unique_weights(&self) -> Vec<f64> {
        let mut weights: Vec<f64> = self.points.iter().map(|p| p.weight).collect();
        weights.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
        weights.dedup();
        weights
    }

    /// Points whose weight equals `weight` (one "Deaths = N" layer)
    pub fn filter_weight(&self, weight: f64) -> PointSet {
        PointSet {
            points: self
                .points
                .iter()
                .copied()
                .filter(|p| p.weight == weight)
                .collect(),
        }
    }

    /// Transform every coordinate through `transform`, keeping weights.
    pub fn reprojected(&self, transform: &dyn PointTransform) -> Result<PointSet> {
        let mut points = Vec::with_capacity(self.points.len());
        for p in &self.points {
            let (x, y) = transform.transform(p.x, p.y)?;
            points.push(WeightedPoint::new(x, y, p.weight));
        }
        Ok(PointSet { points })
    }
}

impl FromIterator<WeightedPoint> for PointSet {
    fn from_iter<I: IntoIterator<Item = WeightedPoint>>(iter: I) -> Self {
        Self {
            points: iter.into_iter().collect(),
        }
    }
}
