// src/data_analysis/rmse.rs

use ndarray::ArrayView1;

use crate::constants::{RAD_TO_DEG, TRANSLATIONAL_SUFFIXES};
use crate::error::{ComparisonError, Result};

/// Root-mean-square error between two sequences aligned by row index.
///
/// Sequences must share sampling; the time values are not consulted.
/// Returns NaN for empty sequences.
pub fn rmse(a: ArrayView1<f64>, b: ArrayView1<f64>) -> Result<f64> {
    if a.len() != b.len() {
        return Err(ComparisonError::LengthMismatch {
            left: a.len(),
            right: b.len(),
        });
    }
    let squared = (&a - &b).mapv(|d| d * d);
    Ok(squared.mean().map_or(f64::NAN, f64::sqrt))
}

/// Scale applied to filtered values so they share the reference units.
///
/// Translations (`*tx`, `*ty`, `*tz`) are in meters on both sides; every
/// other coordinate is filtered in radians and referenced in degrees.
pub fn channel_scale(channel: &str) -> f64 {
    if TRANSLATIONAL_SUFFIXES
        .iter()
        .any(|suffix| channel.ends_with(suffix))
    {
        1.0
    } else {
        RAD_TO_DEG
    }
}

/// RMSE of a channel after scaling the filtered values.
///
/// A reference that is identically zero carries no signal to compare
/// against (locked coordinates); the result is NaN in that case.
pub fn channel_rmse(reference: ArrayView1<f64>, filtered: ArrayView1<f64>, scale: f64) -> Result<f64> {
    let scaled = filtered.mapv(|v| scale * v);
    let error = rmse(reference, scaled.view())?;
    if reference.iter().all(|&v| v == 0.0) {
        return Ok(f64::NAN);
    }
    Ok(error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_rmse_of_identical_sequences_is_zero() {
        let x = array![1.5, -2.0, 3.25, 0.0, 7.0];
        assert_eq!(rmse(x.view(), x.view()).unwrap(), 0.0);
    }

    #[test]
    fn test_rmse_is_symmetric() {
        let a = array![0.3, 1.7, -4.2, 9.9];
        let b = array![1.0, 1.0, -3.0, 12.5];
        assert_eq!(
            rmse(a.view(), b.view()).unwrap(),
            rmse(b.view(), a.view()).unwrap()
        );
    }

    #[test]
    fn test_rmse_known_value() {
        let a = array![0.0, 0.0, 0.0, 0.0];
        let b = array![1.0, -1.0, 1.0, -1.0];
        assert!((rmse(a.view(), b.view()).unwrap() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_rmse_length_mismatch() {
        let a = array![1.0, 2.0];
        let b = array![1.0, 2.0, 3.0];
        assert!(matches!(
            rmse(a.view(), b.view()),
            Err(ComparisonError::LengthMismatch { left: 2, right: 3 })
        ));
    }

    #[test]
    fn test_rmse_empty_is_nan() {
        let empty = ndarray::Array1::<f64>::zeros(0);
        assert!(rmse(empty.view(), empty.view()).unwrap().is_nan());
    }

    #[test]
    fn test_channel_scale() {
        assert_eq!(channel_scale("pelvis_tx"), 1.0);
        assert_eq!(channel_scale("pelvis_ty"), 1.0);
        assert_eq!(channel_scale("pelvis_tz"), 1.0);
        assert_eq!(channel_scale("pelvis_tilt"), RAD_TO_DEG);
        assert_eq!(channel_scale("knee_angle_r"), RAD_TO_DEG);
        assert!((channel_scale("hip_flexion_l") - 57.29578).abs() < 1e-9);
    }

    #[test]
    fn test_zero_reference_is_nan() {
        let reference = array![0.0, 0.0, 0.0];
        let filtered = array![1.0, 2.0, 3.0];
        assert!(channel_rmse(reference.view(), filtered.view(), 1.0)
            .unwrap()
            .is_nan());
    }

    #[test]
    fn test_channel_rmse_applies_scale() {
        let reference = array![RAD_TO_DEG, 2.0 * RAD_TO_DEG];
        let filtered = array![1.0, 2.0];
        let error = channel_rmse(reference.view(), filtered.view(), RAD_TO_DEG).unwrap();
        assert!(error.abs() < 1e-12);
    }
}
