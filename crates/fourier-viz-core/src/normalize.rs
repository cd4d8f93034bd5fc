//! Min/max stretch of real-valued grids into the displayable 8-bit range.
//!
//! The output always spans `[0, 255]` exactly: the smallest input sample maps
//! to 0 and the largest to 255. A constant grid has no range to stretch; the
//! lenient [`normalize_to_u8`] renders it all black, while
//! [`try_normalize_to_u8`] reports it as [`NormalizeError::Degenerate`].

use crate::{GrayImage, RealImage};

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Reasons a grid cannot be stretched into `[0, 255]`.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq)]
pub enum NormalizeError {
    #[error("cannot normalize a constant array (every sample is {value})")]
    Degenerate { value: f64 },

    #[error("array contains a non-finite sample at index {index}")]
    NonFinite { index: usize },
}

/// `(min, max)` of the grid, or the index of the first NaN/inf sample.
pub fn value_range(values: &RealImage) -> Result<(f64, f64), NormalizeError> {
    let mut lo = f64::INFINITY;
    let mut hi = f64::NEG_INFINITY;
    for (index, &v) in values.data.iter().enumerate() {
        if !v.is_finite() {
            return Err(NormalizeError::NonFinite { index });
        }
        lo = lo.min(v);
        hi = hi.max(v);
    }
    Ok((lo, hi))
}

/// Stretch `values` so that min maps to 0 and max to 255.
///
/// Each sample becomes `round((v - min) / (max - min) * 255)`, clamped.
#[cfg_attr(
    feature = "tracing",
    instrument(level = "debug", skip(values), fields(width = values.width, height = values.height))
)]
pub fn try_normalize_to_u8(values: &RealImage) -> Result<GrayImage, NormalizeError> {
    let (lo, hi) = value_range(values)?;
    let span = hi - lo;
    if span <= 0.0 {
        return Err(NormalizeError::Degenerate { value: lo });
    }

    let scale = 255.0 / span;
    let data = values
        .data
        .iter()
        .map(|&v| ((v - lo) * scale).round().clamp(0.0, 255.0) as u8)
        .collect();
    Ok(GrayImage {
        width: values.width,
        height: values.height,
        data,
    })
}

/// Lenient variant of [`try_normalize_to_u8`]: degenerate or non-finite
/// input yields an all-zero image of the same shape.
pub fn normalize_to_u8(values: &RealImage) -> GrayImage {
    match try_normalize_to_u8(values) {
        Ok(img) => img,
        Err(err) => {
            log::debug!(
                "normalize {}x{}: {err}; rendering all zeros",
                values.width,
                values.height
            );
            GrayImage {
                width: values.width,
                height: values.height,
                data: vec![0; values.data.len()],
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn real(width: usize, height: usize, data: Vec<f64>) -> RealImage {
        RealImage::from_raw(width, height, data).expect("valid shape")
    }

    #[test]
    fn stretches_to_full_range() {
        let img = normalize_to_u8(&real(2, 2, vec![-3.0, 0.5, 1.25, 7.0]));
        assert_eq!(img.min_max(), (0, 255));
        assert_eq!((img.width, img.height), (2, 2));
    }

    #[test]
    fn rounds_to_nearest() {
        // (1 / 2) * 255 = 127.5 rounds away from zero.
        let img = normalize_to_u8(&real(3, 1, vec![0.0, 1.0, 2.0]));
        assert_eq!(img.data, vec![0, 128, 255]);
    }

    #[test]
    fn range_holds_for_arbitrary_grid() {
        let data: Vec<f64> = (0..64)
            .map(|i| ((i * 37 % 11) as f64).sin() * 1e6 + i as f64)
            .collect();
        let img = normalize_to_u8(&real(8, 8, data));
        assert_eq!(img.min_max(), (0, 255));
    }

    #[test]
    fn constant_input_is_all_zero() {
        let values = real(4, 3, vec![42.0; 12]);
        let img = normalize_to_u8(&values);
        assert!(img.data.iter().all(|&v| v == 0));
        assert_eq!((img.width, img.height), (4, 3));
        assert_eq!(
            try_normalize_to_u8(&values),
            Err(NormalizeError::Degenerate { value: 42.0 })
        );
    }

    #[test]
    fn non_finite_input_is_reported() {
        let values = real(3, 1, vec![1.0, f64::NAN, 2.0]);
        assert_eq!(
            try_normalize_to_u8(&values),
            Err(NormalizeError::NonFinite { index: 1 })
        );
        assert!(normalize_to_u8(&values).data.iter().all(|&v| v == 0));
        assert_eq!(value_range(&values), Err(NormalizeError::NonFinite { index: 1 }));
    }
}
