//! Feature records crossing in from the vector-data reader.
//!
//! Shapefile/GeoJSON parsing itself is the reader collaborator's job;
//! this module only models the records it hands over (geometry plus an
//! attribute map) and the small amount of logic the dashboard applies to
//! them: finding the death-count column and turning point features into
//! a [`PointSet`].

use crate::error::{Error, Result};
use crate::points::{PointSet, WeightedPoint};
use geo_types::Geometry;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Attribute value types
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum AttributeValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
}

impl AttributeValue {
    /// Numeric view of the value, if it has one
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            AttributeValue::Int(v) => Some(*v as f64),
            AttributeValue::Float(v) => Some(*v),
            AttributeValue::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }
}

/// A geographic feature with geometry and attributes
#[derive(Debug, Clone)]
pub struct Feature {
    /// Feature geometry
    pub geometry: Option<Geometry<f64>>,
    /// Feature attributes
    pub properties: HashMap<String, AttributeValue>,
}

impl Feature {
    /// Create a new feature with geometry
    pub fn new(geometry: Geometry<f64>) -> Self {
        Self {
            geometry: Some(geometry),
            properties: HashMap::new(),
        }
    }

    /// Set an attribute
    pub fn set_property(&mut self, key: impl Into<String>, value: AttributeValue) {
        self.properties.insert(key.into(), value);
    }

    /// Get an attribute
    pub fn get_property(&self, key: &str) -> Option<&AttributeValue> {
        self.properties.get(key)
    }

    /// Representative (x, y) of the geometry: the point itself for
    /// points, the centroid of the coordinate envelope otherwise.
    pub fn location(&self) -> Option<(f64, f64)> {
        match self.geometry.as_ref()? {
            Geometry::Point(p) => Some((p.x(), p.y())),
            other => {
                use geo::CoordsIter;
                let mut min_x = f64::INFINITY;
                let mut min_y = f64::INFINITY;
                let mut max_x = f64::NEG_INFINITY;
                let mut max_y = f64::NEG_INFINITY;
                let mut any = false;
                for c in other.coords_iter() {
                    min_x = min_x.min(c.x);
                    min_y = min_y.min(c.y);
                    max_x = max_x.max(c.x);
                    max_y = max_y.max(c.y);
                    any = true;
                }
                any.then(|| ((min_x + max_x) / 2.0, (min_y + max_y) / 2.0))
            }
        }
    }
}

/// Collection of features
#[derive(Debug, Clone, Default)]
pub struct FeatureCollection {
    pub features: Vec<Feature>,
}

impl FeatureCollection {
    pub fn new() -> Self {
        Self {
            features: Vec::new(),
        }
    }

    pub fn push(&mut self, feature: Feature) {
        self.features.push(feature);
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Feature> {
        self.features.iter()
    }

    /// First of `candidates` that appears as a property on any feature.
    ///
    /// The cholera datasets in the wild name their count column either
    /// "deaths" or "Count"; pass those as candidates in that order.
    pub fn detect_count_column(&self, candidates: &[&str]) -> Result<String> {
        for &name in candidates {
            if self.features.iter().any(|f| f.properties.contains_key(name)) {
                return Ok(name.to_string());
            }
        }
        Err(Error::MissingColumn(
            candidates.iter().map(|s| s.to_string()).collect(),
        ))
    }

    /// Convert to a weighted point set using `count_column` as the weight.
    ///
    /// Features without geometry or without a numeric count are skipped.
    pub fn to_point_set(&self, count_column: &str) -> Result<PointSet> {
        let points: PointSet = self
            .features
            .iter()
            .filter_map(|f| {
                let (x, y) = f.location()?;
                let weight = f.get_property(count_column)?.as_f64()?;
                Some(WeightedPoint::new(x, y, weight))
            })
            .collect();

        if points.is_empty() {
            return Err(Error::EmptyInput("no features with geometry and count"));
        }
        Ok(points)
    }
}

impl IntoIterator for FeatureCollection {
    type Item = Feature;
    type IntoIter = std::vec::IntoIter<Feature>;

    fn into_iter(self) -> Self::IntoIter {
        self.features.into_iter()
    }
}
