//! Multi-band raster to RGB conversion

use ndarray::{Array2, Array3};
use snowmap_core::{Error, Result, RgbImage};

/// Convert raw raster bands into an 8-bit RGB image.
///
/// Band selection:
/// - one band is triplicated into identical R, G, B channels;
/// - three or more bands contribute their first three in input order
///   (extra bands such as alpha are discarded);
/// - zero or exactly two bands have no defined RGB mapping and are
///   rejected.
///
/// Intensity is stretched with a single global min and max computed over
/// all retained samples together, not per channel:
/// `round(255 * (v - min) / (max - min))`, clamped to [0, 255]. A raster
/// with no dynamic range (max == min) is a [`Error::DegenerateImage`];
/// the documented caller fallback is [`RgbImage::zeros`].
pub fn normalize_to_rgb(bands: &[Array2<f64>]) -> Result<RgbImage> {
    let selected: [&Array2<f64>; 3] = match bands.len() {
        0 => return Err(Error::DegenerateImage("no bands".into())),
        1 => [&bands[0], &bands[0], &bands[0]],
        2 => {
            return Err(Error::DegenerateImage(
                "two bands have no RGB interpretation".into(),
            ))
        }
        _ => [&bands[0], &bands[1], &bands[2]],
    };

    let (rows, cols) = selected[0].dim();
    for band in &selected[1..] {
        if band.dim() != (rows, cols) {
            return Err(Error::InvalidDimensions {
                width: cols,
                height: rows,
            });
        }
    }

    // Single scalar min/max over the union of the retained channels.
    // NaN samples are ignored here and map to 0 below.
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for band in &selected {
        for &v in band.iter() {
            if v.is_nan() {
                continue;
            }
            min = min.min(v);
            max = max.max(v);
        }
    }

    if !min.is_finite() || !max.is_finite() || max == min {
        return Err(Error::DegenerateImage(format!(
            "no dynamic range (min = max = {min})"
        )));
    }

    let span = max - min;
    let mut data = Array3::<u8>::zeros((rows, cols, 3));
    for (channel, band) in selected.iter().enumerate() {
        for ((row, col), &v) in band.indexed_iter() {
            if v.is_nan() {
                continue;
            }
            let scaled = (255.0 * (v - min) / span).round().clamp(0.0, 255.0);
            data[(row, col, channel)] = scaled as u8;
        }
    }

    RgbImage::from_array(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_single_band_triplicated() {
        // Band [[0, 100], [200, 255]]: min 0, max 255, so values pass
        // through unchanged into all three channels.
        let band = array![[0.0, 100.0], [200.0, 255.0]];
        let img = normalize_to_rgb(&[band]).unwrap();

        assert_eq!(img.rows(), 2);
        assert_eq!(img.cols(), 2);
        assert_eq!(img.pixel(0, 0).unwrap(), [0, 0, 0]);
        assert_eq!(img.pixel(0, 1).unwrap(), [100, 100, 100]);
        assert_eq!(img.pixel(1, 0).unwrap(), [200, 200, 200]);
        assert_eq!(img.pixel(1, 1).unwrap(), [255, 255, 255]);
    }

    #[test]
    fn test_output_spans_full_range() {
        let band = array![[10.0, 20.0], [30.0, 50.0]];
        let img = normalize_to_rgb(&[band]).unwrap();

        // Extremes always map to 0 and 255
        assert_eq!(img.pixel(0, 0).unwrap()[0], 0);
        assert_eq!(img.pixel(1, 1).unwrap()[0], 255);
    }

    #[test]
    fn test_fourth_band_ignored() {
        let r = array![[0.0, 1.0]];
        let g = array![[2.0, 3.0]];
        let b = array![[4.0, 5.0]];
        let alpha = array![[5.0, 0.0]];

        let with_alpha = normalize_to_rgb(&[r.clone(), g.clone(), b.clone(), alpha]).unwrap();
        let without = normalize_to_rgb(&[r, g, b]).unwrap();

        assert_eq!(with_alpha, without);
    }

    #[test]
    fn test_global_not_per_channel_stretch() {
        let r = array![[0.0]];
        let g = array![[5.0]];
        let b = array![[10.0]];
        let img = normalize_to_rgb(&[r, g, b]).unwrap();

        // One shared min/max (0..10), so green is the midpoint
        assert_eq!(img.pixel(0, 0).unwrap(), [0, 128, 255]);
    }

    #[test]
    fn test_constant_image_rejected() {
        let band = array![[7.0, 7.0], [7.0, 7.0]];
        let err = normalize_to_rgb(&[band]);
        assert!(matches!(err, Err(Error::DegenerateImage(_))));
    }

    #[test]
    fn test_no_bands_rejected() {
        assert!(matches!(
            normalize_to_rgb(&[]),
            Err(Error::DegenerateImage(_))
        ));
    }

    #[test]
    fn test_two_bands_rejected() {
        let a = array![[0.0, 1.0]];
        let b = array![[1.0, 0.0]];
        assert!(matches!(
            normalize_to_rgb(&[a, b]),
            Err(Error::DegenerateImage(_))
        ));
    }

    #[test]
    fn test_shape_mismatch_rejected() {
        let a = array![[0.0, 1.0]];
        let b = array![[0.0], [1.0]];
        let c = array![[0.0, 1.0]];
        assert!(normalize_to_rgb(&[a, b, c]).is_err());
    }
}
