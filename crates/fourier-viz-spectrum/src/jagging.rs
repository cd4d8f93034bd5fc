//! Staircase (jagging) demonstration.
//!
//! The working image is shrunk 8x with a bilinear filter and enlarged back
//! with nearest-neighbour, so each source pixel of the 32 x 32 intermediate
//! becomes an 8 x 8 block. The blocky edges show up in the spectrum as
//! replicated high-frequency energy.

use crate::spectrum::Spectrum;
use fourier_viz_core::{
    normalize_to_u8, resize, GrayImage, GrayImageView, ImageError, ResizeFilter, WORKING_SIZE,
};

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Side length of the intermediate image.
pub const JAGGING_DOWN_SIZE: usize = 32;

#[derive(thiserror::Error, Debug)]
pub enum JaggingError {
    #[error("jagging expects a {expected}x{expected} image, got {width}x{height}")]
    UnexpectedSize {
        width: usize,
        height: usize,
        expected: usize,
    },

    #[error(transparent)]
    Image(#[from] ImageError),
}

/// Output of [`simulate_jagging`].
#[derive(Clone, Debug)]
pub struct JaggingResult {
    /// The down/up-sampled image, same size as the input.
    pub jagged: GrayImage,
    /// Normalized log-magnitude spectrum of `jagged`.
    pub magnitude: GrayImage,
}

#[cfg_attr(
    feature = "tracing",
    instrument(level = "debug", skip(img), fields(width = img.width, height = img.height))
)]
pub fn simulate_jagging(img: &GrayImageView<'_>) -> Result<JaggingResult, JaggingError> {
    if img.width != WORKING_SIZE || img.height != WORKING_SIZE {
        return Err(JaggingError::UnexpectedSize {
            width: img.width,
            height: img.height,
            expected: WORKING_SIZE,
        });
    }

    let small = resize(
        img,
        JAGGING_DOWN_SIZE,
        JAGGING_DOWN_SIZE,
        ResizeFilter::Bilinear,
    )?;
    let jagged = resize(
        &small.view(),
        WORKING_SIZE,
        WORKING_SIZE,
        ResizeFilter::Nearest,
    )?;
    log::debug!(
        "jagging: {}x{} -> {JAGGING_DOWN_SIZE}x{JAGGING_DOWN_SIZE} -> {}x{}",
        img.width,
        img.height,
        jagged.width,
        jagged.height
    );

    let magnitude = normalize_to_u8(&Spectrum::compute(&jagged.view())?.magnitude());
    Ok(JaggingResult { jagged, magnitude })
}

#[cfg(test)]
mod tests {
    use super::*;

    const BLOCK: usize = WORKING_SIZE / JAGGING_DOWN_SIZE;

    fn diagonal_edge() -> GrayImage {
        GrayImage::from_fn(WORKING_SIZE, WORKING_SIZE, |x, y| {
            if x + y / 2 > 150 {
                230
            } else {
                20
            }
        })
        .unwrap()
    }

    #[test]
    fn output_is_made_of_constant_blocks() {
        let res = simulate_jagging(&diagonal_edge().view()).unwrap();
        assert_eq!((res.jagged.width, res.jagged.height), (256, 256));
        for y in 0..WORKING_SIZE {
            for x in 0..WORKING_SIZE {
                let anchor = res.jagged.get(x / BLOCK * BLOCK, y / BLOCK * BLOCK);
                assert_eq!(res.jagged.get(x, y), anchor, "pixel ({x},{y})");
            }
        }
    }

    #[test]
    fn magnitude_is_normalized() {
        let res = simulate_jagging(&diagonal_edge().view()).unwrap();
        assert_eq!((res.magnitude.width, res.magnitude.height), (256, 256));
        assert_eq!(res.magnitude.min_max(), (0, 255));
    }

    #[test]
    fn wrong_size_is_rejected() {
        let img = GrayImage::filled(128, 256, 0).unwrap();
        assert!(matches!(
            simulate_jagging(&img.view()),
            Err(JaggingError::UnexpectedSize {
                width: 128,
                height: 256,
                ..
            })
        ));
    }
}
