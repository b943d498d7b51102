//! # Snowmap Algorithms
//!
//! Numerical operations for the Snowmap library:
//!
//! - **align**: convert multi-band rasters to RGB overlays, compute
//!   their WGS84 bounds (with an explicit approximate fallback when the
//!   spatial reference is missing), and apply manual shift/scale/rotate
//!   corrections
//! - **density**: weighted Gaussian kernel density surfaces over event
//!   point sets, max-normalized to [0, 1]

pub mod align;
pub mod density;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::align::{
        apply_alignment, compute_bounds, normalize_to_rgb, AlignedBounds, AlignmentTransform,
        BoundsProvenance, ComputeBoundsParams,
    };
    pub use crate::density::{estimate_density, DensityParams};
    pub use snowmap_core::prelude::*;
}
