//! # Snowmap Core
//!
//! Core types for the Snowmap historical-map alignment and density
//! estimation library.
//!
//! This crate provides:
//! - `GeoBounds`: validated axis-aligned geographic rectangles
//! - `Grid<T>` / `GeoTransform`: regular grids with affine georeferencing
//! - `RgbImage`: the 8-bit overlay buffer produced by raster alignment
//! - `Crs` + pure-Rust WGS84 <-> UTM reprojection
//! - `WeightedPoint` / `PointSet`: event points with count weights
//! - `Feature` / `FeatureCollection`: records from the vector reader

pub mod bounds;
pub mod crs;
pub mod error;
pub mod points;
pub mod raster;
pub mod vector;

pub use bounds::GeoBounds;
pub use crs::Crs;
pub use error::{Error, Result};
pub use points::{PointSet, WeightedPoint};
pub use raster::{DensityGrid, GeoTransform, Grid, GridElement, RgbImage};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::bounds::GeoBounds;
    pub use crate::crs::{Crs, PointTransform, UtmZone};
    pub use crate::error::{Error, Result};
    pub use crate::points::{PointSet, WeightedPoint};
    pub use crate::raster::{DensityGrid, GeoTransform, Grid, GridElement, RgbImage};
}
