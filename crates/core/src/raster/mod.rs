//! Grid and image data structures

mod element;
mod geotransform;
mod grid;
mod rgb;

pub use element::GridElement;
pub use geotransform::GeoTransform;
pub use grid::{DensityGrid, Grid};
pub use rgb::RgbImage;
