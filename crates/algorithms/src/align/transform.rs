//! Manual alignment of overlay bounds

use serde::{Deserialize, Serialize};
use snowmap_core::{Error, GeoBounds, Result};

/// User-supplied corrections for an imperfectly georeferenced overlay.
///
/// Applied in a fixed order — uniform scale about the rectangle's center,
/// then translation, then rotation about the (shifted) center — because
/// the steps do not commute and reproducibility requires one ordering.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AlignmentTransform {
    /// Translation along the x axis (degrees of longitude for WGS84)
    pub shift_x: f64,
    /// Translation along the y axis
    pub shift_y: f64,
    /// Uniform scale factor about the rectangle center (both axes)
    pub scale: f64,
    /// Counter-clockwise rotation in degrees
    pub rotation_degrees: f64,
}

impl AlignmentTransform {
    pub fn new(shift_x: f64, shift_y: f64, scale: f64, rotation_degrees: f64) -> Self {
        Self {
            shift_x,
            shift_y,
            scale,
            rotation_degrees,
        }
    }

    /// The do-nothing transform
    pub fn identity() -> Self {
        Self::new(0.0, 0.0, 1.0, 0.0)
    }

    pub fn is_identity(&self) -> bool {
        self.shift_x == 0.0
            && self.shift_y == 0.0
            && self.scale == 1.0
            && self.rotation_degrees == 0.0
    }

    fn validate(&self) -> Result<()> {
        if !self.shift_x.is_finite() {
            return Err(Error::non_finite("shift_x", self.shift_x));
        }
        if !self.shift_y.is_finite() {
            return Err(Error::non_finite("shift_y", self.shift_y));
        }
        if !self.scale.is_finite() {
            return Err(Error::non_finite("scale", self.scale));
        }
        if !self.rotation_degrees.is_finite() {
            return Err(Error::non_finite("rotation_degrees", self.rotation_degrees));
        }
        Ok(())
    }
}

impl Default for AlignmentTransform {
    fn default() -> Self {
        Self::identity()
    }
}

/// Apply manual alignment corrections to overlay bounds.
///
/// The four corners are scaled about the center, shifted, rotated CCW
/// about the shifted center, and re-boxed into the axis-aligned envelope
/// of the rotated corner set. Pure and deterministic; the identity
/// transform returns the input bounds.
pub fn apply_alignment(bounds: &GeoBounds, transform: &AlignmentTransform) -> Result<GeoBounds> {
    transform.validate()?;

    let (cx, cy) = bounds.center();
    let s = transform.scale;

    // Scale about center, then shift
    let shifted: Vec<(f64, f64)> = bounds
        .corners()
        .iter()
        .map(|&(x, y)| {
            (
                cx + s * (x - cx) + transform.shift_x,
                cy + s * (y - cy) + transform.shift_y,
            )
        })
        .collect();

    // Rotate about the shifted center, then take the envelope
    let rcx = cx + transform.shift_x;
    let rcy = cy + transform.shift_y;
    let theta = transform.rotation_degrees.to_radians();
    let (sin_t, cos_t) = theta.sin_cos();

    GeoBounds::from_points(shifted.into_iter().map(|(x, y)| {
        let dx = x - rcx;
        let dy = y - rcy;
        (
            rcx + dx * cos_t - dy * sin_t,
            rcy + dx * sin_t + dy * cos_t,
        )
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn bounds() -> GeoBounds {
        GeoBounds::new(51.508, -0.144, 51.518, -0.130).unwrap()
    }

    #[test]
    fn test_identity_returns_input() {
        let b = bounds();
        let out = apply_alignment(&b, &AlignmentTransform::identity()).unwrap();

        assert_relative_eq!(out.south, b.south, epsilon = 1e-12);
        assert_relative_eq!(out.west, b.west, epsilon = 1e-12);
        assert_relative_eq!(out.north, b.north, epsilon = 1e-12);
        assert_relative_eq!(out.east, b.east, epsilon = 1e-12);
    }

    #[test]
    fn test_scale_preserves_center() {
        let b = bounds();
        for scale in [0.5, 1.5, 3.0] {
            let t = AlignmentTransform::new(0.0, 0.0, scale, 0.0);
            let out = apply_alignment(&b, &t).unwrap();

            let (cx, cy) = b.center();
            let (ox, oy) = out.center();
            assert_relative_eq!(ox, cx, epsilon = 1e-12);
            assert_relative_eq!(oy, cy, epsilon = 1e-12);
            assert_relative_eq!(out.width(), b.width() * scale, epsilon = 1e-12);
            assert_relative_eq!(out.height(), b.height() * scale, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_shift_translates_both_edges() {
        let b = GeoBounds::new(0.0, 0.0, 1.0, 2.0).unwrap();
        let t = AlignmentTransform::new(0.5, -0.25, 1.0, 0.0);
        let out = apply_alignment(&b, &t).unwrap();

        assert_relative_eq!(out.west, 0.5);
        assert_relative_eq!(out.east, 2.5);
        assert_relative_eq!(out.south, -0.25);
        assert_relative_eq!(out.north, 0.75);
    }

    #[test]
    fn test_rotation_grows_non_square_envelope() {
        // Width 4, height 2: rotating 45° strictly grows the envelope area
        let b = GeoBounds::new(0.0, 0.0, 2.0, 4.0).unwrap();
        let t = AlignmentTransform::new(0.0, 0.0, 1.0, 45.0);
        let out = apply_alignment(&b, &t).unwrap();

        assert!(out.area() > b.area());
        // Both envelope spans become (w + h) / sqrt(2)
        let expected = 6.0 / std::f64::consts::SQRT_2;
        assert_relative_eq!(out.width(), expected, epsilon = 1e-12);
        assert_relative_eq!(out.height(), expected, epsilon = 1e-12);
    }

    #[test]
    fn test_rotation_90_swaps_spans() {
        let b = GeoBounds::new(0.0, 0.0, 2.0, 4.0).unwrap();
        let t = AlignmentTransform::new(0.0, 0.0, 1.0, 90.0);
        let out = apply_alignment(&b, &t).unwrap();

        assert_relative_eq!(out.width(), b.height(), epsilon = 1e-12);
        assert_relative_eq!(out.height(), b.width(), epsilon = 1e-12);
        let (cx, cy) = b.center();
        let (ox, oy) = out.center();
        assert_relative_eq!(ox, cx, epsilon = 1e-12);
        assert_relative_eq!(oy, cy, epsilon = 1e-12);
    }

    #[test]
    fn test_scale_then_shift_order() {
        // Scale about the original center, then shift: for a [0,2]x[0,2]
        // box with scale 2 and shift (10, 0), west = 1 + 2*(0-1) + 10 = 9.
        let b = GeoBounds::new(0.0, 0.0, 2.0, 2.0).unwrap();
        let t = AlignmentTransform::new(10.0, 0.0, 2.0, 0.0);
        let out = apply_alignment(&b, &t).unwrap();

        assert_relative_eq!(out.west, 9.0);
        assert_relative_eq!(out.east, 13.0);
        // Center moved by exactly the shift
        assert_relative_eq!(out.center().0, 11.0);
    }

    #[test]
    fn test_rotation_about_shifted_center() {
        // After a shift, rotation spins the rectangle in place rather
        // than swinging it around its old position.
        let b = GeoBounds::new(0.0, 0.0, 2.0, 2.0).unwrap();
        let t = AlignmentTransform::new(10.0, 5.0, 1.0, 33.0);
        let out = apply_alignment(&b, &t).unwrap();

        assert_relative_eq!(out.center().0, 11.0, epsilon = 1e-12);
        assert_relative_eq!(out.center().1, 6.0, epsilon = 1e-12);
    }

    #[test]
    fn test_non_finite_parameters_rejected() {
        let b = bounds();
        for t in [
            AlignmentTransform::new(f64::NAN, 0.0, 1.0, 0.0),
            AlignmentTransform::new(0.0, f64::INFINITY, 1.0, 0.0),
            AlignmentTransform::new(0.0, 0.0, f64::NAN, 0.0),
            AlignmentTransform::new(0.0, 0.0, 1.0, f64::NEG_INFINITY),
        ] {
            assert!(matches!(
                apply_alignment(&b, &t),
                Err(Error::InvalidParameter { .. })
            ));
        }
    }

    #[test]
    fn test_zero_scale_collapses_to_invalid_bounds() {
        let b = bounds();
        let t = AlignmentTransform::new(0.0, 0.0, 0.0, 0.0);
        assert!(matches!(
            apply_alignment(&b, &t),
            Err(Error::InvalidBounds { .. })
        ));
    }
}
