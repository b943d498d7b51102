//! Geographic bounds for raster overlays
//!
//! Historical map scans come with a spatial reference at best some of the
//! time. When one is present, the raster extent is reprojected corner by
//! corner into WGS84; when it is missing, the extent of a co-located
//! point dataset is padded and used as a best-effort stand-in. The two
//! outcomes are distinguished by [`BoundsProvenance`] so callers can
//! surface the approximation to the user instead of silently treating it
//! as georeferenced.

use snowmap_core::crs::PointTransform;
use snowmap_core::{Crs, Error, GeoBounds, Result};

/// How a set of overlay bounds was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundsProvenance {
    /// Reprojected from the raster's own spatial reference
    Georeferenced,
    /// Padded from a co-located point extent; approximate only
    Approximate,
}

/// WGS84 overlay bounds plus how trustworthy they are.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AlignedBounds {
    pub bounds: GeoBounds,
    pub provenance: BoundsProvenance,
}

impl AlignedBounds {
    /// Whether these bounds came from real georeferencing
    pub fn is_georeferenced(&self) -> bool {
        self.provenance == BoundsProvenance::Georeferenced
    }
}

/// Parameters for bounds computation
#[derive(Debug, Clone, Copy)]
pub struct ComputeBoundsParams {
    /// Fraction of each axis span added symmetrically on the fallback
    /// path (default: 0.05)
    pub pad_fraction: f64,
}

impl Default for ComputeBoundsParams {
    fn default() -> Self {
        Self { pad_fraction: 0.05 }
    }
}

/// Reproject an axis-aligned extent through `transform` and take the
/// envelope of the result.
///
/// All four corners are transformed, not just two: a reprojection that is
/// not a pure scale/translation turns the rectangle into a quadrilateral,
/// and a two-corner envelope would clip it.
pub fn reproject_extent(
    extent: &GeoBounds,
    transform: &dyn PointTransform,
) -> Result<GeoBounds> {
    let mut transformed = [(0.0, 0.0); 4];
    for (out, (x, y)) in transformed.iter_mut().zip(extent.corners()) {
        *out = transform.transform(x, y)?;
    }
    GeoBounds::from_points(transformed)
}

/// Compute WGS84 overlay bounds for a raster.
///
/// With a usable spatial reference the raw extent is reprojected and the
/// result tagged [`BoundsProvenance::Georeferenced`]. Without one — or
/// when the reference is one the built-in reprojection does not cover, or
/// the reprojection degenerates — the fallback extent is padded by
/// `pad_fraction` per axis and tagged [`BoundsProvenance::Approximate`].
/// No reference and no fallback is [`Error::NoReference`].
pub fn compute_bounds(
    spatial_reference: Option<&Crs>,
    raw_extent: Option<&GeoBounds>,
    fallback_extent: Option<&GeoBounds>,
    params: &ComputeBoundsParams,
) -> Result<AlignedBounds> {
    if let (Some(crs), Some(extent)) = (spatial_reference, raw_extent) {
        if crs.is_wgs84() {
            return Ok(AlignedBounds {
                bounds: *extent,
                provenance: BoundsProvenance::Georeferenced,
            });
        }

        if let Some(zone) = crs.utm_zone() {
            // A failed or degenerate reprojection drops to the fallback
            // path rather than propagating.
            if let Ok(bounds) = reproject_extent(extent, &zone) {
                return Ok(AlignedBounds {
                    bounds,
                    provenance: BoundsProvenance::Georeferenced,
                });
            }
        }
    }

    match fallback_extent {
        Some(fb) => Ok(AlignedBounds {
            bounds: fb.padded(params.pad_fraction)?,
            provenance: BoundsProvenance::Approximate,
        }),
        None => Err(Error::NoReference),
    }
}
