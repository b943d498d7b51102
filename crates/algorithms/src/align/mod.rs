//! Raster alignment for historical map overlays
//!
//! Three steps take a scanned map from raw multi-band pixels to a
//! renderable overlay: [`normalize_to_rgb`] builds the RGB buffer,
//! [`compute_bounds`] finds WGS84 bounds (georeferenced or approximate),
//! and [`apply_alignment`] folds in the user's manual corrections.

mod bounds;
mod rgb;
mod transform;

pub use bounds::{
    compute_bounds, reproject_extent, AlignedBounds, BoundsProvenance, ComputeBoundsParams,
};
pub use rgb::normalize_to_rgb;
pub use transform::{apply_alignment, AlignmentTransform};
