use crate::fft2d::{fft_2d, fftshift};
use fourier_viz_core::{normalize_to_u8, GrayImage, GrayImageView, ImageError, RealImage};
use rustfft::num_complex::Complex;
use std::f64::consts::PI;

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Centred 2D spectrum of a grayscale image.
///
/// `data` is row-major with the zero-frequency term at
/// [`Spectrum::dc_index`]; row `r` holds vertical frequency
/// `r - height / 2`, column `c` horizontal frequency `c - width / 2`.
#[derive(Clone, Debug)]
pub struct Spectrum {
    pub width: usize,
    pub height: usize,
    pub data: Vec<Complex<f64>>,
}

impl Spectrum {
    /// Forward DFT of `img` followed by [`fftshift`].
    #[cfg_attr(
        feature = "tracing",
        instrument(level = "debug", skip(img), fields(width = img.width, height = img.height))
    )]
    pub fn compute(img: &GrayImageView<'_>) -> Result<Self, ImageError> {
        let (width, height) = (img.width, img.height);
        if width == 0 || height == 0 {
            return Err(ImageError::InvalidDimensions { width, height });
        }
        if img.data.len() != width * height {
            return Err(ImageError::InvalidBuffer {
                expected: width * height,
                got: img.data.len(),
            });
        }

        let mut buffer: Vec<Complex<f64>> = img
            .data
            .iter()
            .map(|&v| Complex::new(v as f64, 0.0))
            .collect();
        fft_2d(width, height, &mut buffer);
        let data = fftshift(width, height, &buffer);

        log::debug!("spectrum {width}x{height}: dc={:.1}", buffer[0].re);
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// `(row, col)` of the zero-frequency term.
    pub fn dc_index(&self) -> (usize, usize) {
        (self.height / 2, self.width / 2)
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Complex<f64> {
        self.data[row * self.width + col]
    }

    /// `ln(1 + |F|)` per bin.
    pub fn magnitude(&self) -> RealImage {
        self.map(|c| c.norm().ln_1p())
    }

    /// `atan2(im, re)` per bin, in `(-pi, pi]`.
    ///
    /// Bins that are exactly zero get phase 0.
    pub fn phase(&self) -> RealImage {
        self.map(phase_of)
    }

    fn map(&self, f: impl Fn(Complex<f64>) -> f64) -> RealImage {
        RealImage {
            width: self.width,
            height: self.height,
            data: self.data.iter().map(|&c| f(c)).collect(),
        }
    }
}

fn phase_of(c: Complex<f64>) -> f64 {
    if c.re == 0.0 && c.im == 0.0 {
        return 0.0;
    }
    let p = c.im.atan2(c.re);
    if p <= -PI {
        PI
    } else {
        p
    }
}

/// Normalized log-magnitude spectrum, ready for display.
pub fn magnitude_spectrum(img: &GrayImageView<'_>) -> Result<GrayImage, ImageError> {
    let spectrum = Spectrum::compute(img)?;
    Ok(normalize_to_u8(&spectrum.magnitude()))
}

/// Normalized phase spectrum, ready for display.
pub fn phase_spectrum(img: &GrayImageView<'_>) -> Result<GrayImage, ImageError> {
    let spectrum = Spectrum::compute(img)?;
    Ok(normalize_to_u8(&spectrum.phase()))
}
