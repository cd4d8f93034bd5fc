//! Resampling of grayscale images through `image::imageops::resize`.

use crate::{GrayImage, GrayImageView, ImageError};
use ::image::imageops::{self, FilterType};
use ::image::{ImageBuffer, Luma};
use serde::{Deserialize, Serialize};

#[cfg(feature = "tracing")]
use tracing::instrument;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResizeFilter {
    Nearest,
    /// Triangle kernel.
    Bilinear,
    /// Catmull-Rom cubic.
    Bicubic,
}

impl ResizeFilter {
    pub fn filter_type(self) -> FilterType {
        match self {
            ResizeFilter::Nearest => FilterType::Nearest,
            ResizeFilter::Bilinear => FilterType::Triangle,
            ResizeFilter::Bicubic => FilterType::CatmullRom,
        }
    }
}

fn to_u32(width: usize, height: usize) -> Result<(u32, u32), ImageError> {
    let invalid = ImageError::InvalidDimensions { width, height };
    if width == 0 || height == 0 {
        return Err(invalid);
    }
    let w = u32::try_from(width).map_err(|_| invalid.clone())?;
    let h = u32::try_from(height).map_err(|_| invalid)?;
    Ok((w, h))
}

/// Resize `src` to `width x height` with the given filter.
#[cfg_attr(
    feature = "tracing",
    instrument(level = "debug", skip(src), fields(src_w = src.width, src_h = src.height))
)]
pub fn resize(
    src: &GrayImageView<'_>,
    width: usize,
    height: usize,
    filter: ResizeFilter,
) -> Result<GrayImage, ImageError> {
    let (src_w, src_h) = to_u32(src.width, src.height)?;
    let (dst_w, dst_h) = to_u32(width, height)?;
    let bad_buffer = ImageError::InvalidBuffer {
        expected: src.width * src.height,
        got: src.data.len(),
    };
    if src.data.len() != src.width * src.height {
        return Err(bad_buffer);
    }
    let buffer =
        ImageBuffer::<Luma<u8>, &[u8]>::from_raw(src_w, src_h, src.data).ok_or(bad_buffer)?;

    let out = imageops::resize(&buffer, dst_w, dst_h, filter.filter_type());
    GrayImage::from_raw(width, height, out.into_raw())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nearest_upscale_produces_blocks() {
        let src = GrayImage::from_fn(4, 4, |x, y| (y * 4 + x) as u8 * 10).unwrap();
        let up = resize(&src.view(), 32, 32, ResizeFilter::Nearest).unwrap();
        for y in 0..32 {
            for x in 0..32 {
                assert_eq!(up.get(x, y), src.get(x / 8, y / 8), "pixel ({x},{y})");
            }
        }
    }

    #[test]
    fn bilinear_downscale_averages_blocks() {
        let src = GrayImage::from_raw(8, 1, vec![0, 0, 80, 80, 0, 0, 80, 80]).unwrap();
        let down = resize(&src.view(), 4, 1, ResizeFilter::Bilinear).unwrap();
        assert_eq!((down.width, down.height), (4, 1));
        assert!(down.data.iter().all(|&v| v > 0 && v < 80), "{:?}", down.data);
    }

    #[test]
    fn convolution_preserves_constant_images() {
        let src = GrayImage::filled(256, 256, 97).unwrap();
        for filter in [ResizeFilter::Bilinear, ResizeFilter::Bicubic] {
            let down = resize(&src.view(), 32, 32, filter).unwrap();
            assert!(down.data.iter().all(|&v| v == 97), "{filter:?}");
            let up = resize(&src.view(), 300, 200, filter).unwrap();
            assert!(up.data.iter().all(|&v| v == 97), "{filter:?}");
        }
    }

    #[test]
    fn matches_imageops_directly() {
        let src = GrayImage::from_fn(64, 48, |x, y| ((x * 7 + y * 13) % 256) as u8).unwrap();
        let reference = ::image::GrayImage::from_raw(64, 48, src.data.clone()).unwrap();
        for filter in [
            ResizeFilter::Nearest,
            ResizeFilter::Bilinear,
            ResizeFilter::Bicubic,
        ] {
            let ours = resize(&src.view(), 20, 30, filter).unwrap();
            let theirs = imageops::resize(&reference, 20, 30, filter.filter_type());
            assert_eq!(ours.data, theirs.into_raw(), "{filter:?}");
        }
    }

    #[test]
    fn zero_target_is_rejected() {
        let src = GrayImage::filled(4, 4, 0).unwrap();
        assert!(resize(&src.view(), 0, 4, ResizeFilter::Nearest).is_err());
    }

    #[test]
    fn short_buffer_is_rejected() {
        let data = [0u8; 10];
        let view = GrayImageView {
            width: 4,
            height: 4,
            data: &data,
        };
        assert_eq!(
            resize(&view, 2, 2, ResizeFilter::Bilinear),
            Err(ImageError::InvalidBuffer {
                expected: 16,
                got: 10
            })
        );
    }
}
