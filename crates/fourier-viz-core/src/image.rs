/// Errors produced when building image containers from raw buffers.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ImageError {
    #[error("invalid image dimensions (width={width}, height={height})")]
    InvalidDimensions { width: usize, height: usize },

    #[error("invalid image buffer length (expected {expected} samples, got {got})")]
    InvalidBuffer { expected: usize, got: usize },
}

fn checked_len(width: usize, height: usize) -> Result<usize, ImageError> {
    if width == 0 || height == 0 {
        return Err(ImageError::InvalidDimensions { width, height });
    }
    width
        .checked_mul(height)
        .ok_or(ImageError::InvalidDimensions { width, height })
}

#[derive(Clone, Copy, Debug)]
pub struct GrayImageView<'a> {
    pub width: usize,
    pub height: usize,
    pub data: &'a [u8], // row-major, len = w*h
}

/// Owned 8-bit grayscale image, row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GrayImage {
    pub width: usize,
    pub height: usize,
    pub data: Vec<u8>,
}

impl GrayImage {
    pub fn from_raw(width: usize, height: usize, data: Vec<u8>) -> Result<Self, ImageError> {
        let expected = checked_len(width, height)?;
        if data.len() != expected {
            return Err(ImageError::InvalidBuffer {
                expected,
                got: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Image filled with a single value.
    pub fn filled(width: usize, height: usize, value: u8) -> Result<Self, ImageError> {
        let len = checked_len(width, height)?;
        Ok(Self {
            width,
            height,
            data: vec![value; len],
        })
    }

    /// Build an image by evaluating `f(x, y)` for every pixel.
    pub fn from_fn(
        width: usize,
        height: usize,
        mut f: impl FnMut(usize, usize) -> u8,
    ) -> Result<Self, ImageError> {
        let len = checked_len(width, height)?;
        let mut data = Vec::with_capacity(len);
        for y in 0..height {
            for x in 0..width {
                data.push(f(x, y));
            }
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub fn view(&self) -> GrayImageView<'_> {
        GrayImageView {
            width: self.width,
            height: self.height,
            data: &self.data,
        }
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> u8 {
        self.data[y * self.width + x]
    }

    pub fn row(&self, y: usize) -> &[u8] {
        &self.data[y * self.width..(y + 1) * self.width]
    }

    pub fn min_max(&self) -> (u8, u8) {
        self.data
            .iter()
            .fold((u8::MAX, u8::MIN), |(lo, hi), &v| (lo.min(v), hi.max(v)))
    }

    pub fn is_square(&self, size: usize) -> bool {
        self.width == size && self.height == size
    }
}

/// Real-valued row-major grid used for every floating-point intermediate
/// (log-magnitude, phase, grating intensities).
#[derive(Clone, Debug, PartialEq)]
pub struct RealImage {
    pub width: usize,
    pub height: usize,
    pub data: Vec<f64>,
}

impl RealImage {
    pub fn from_raw(width: usize, height: usize, data: Vec<f64>) -> Result<Self, ImageError> {
        let expected = checked_len(width, height)?;
        if data.len() != expected {
            return Err(ImageError::InvalidBuffer {
                expected,
                got: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub fn from_fn(
        width: usize,
        height: usize,
        mut f: impl FnMut(usize, usize) -> f64,
    ) -> Result<Self, ImageError> {
        let len = checked_len(width, height)?;
        let mut data = Vec::with_capacity(len);
        for y in 0..height {
            for x in 0..width {
                data.push(f(x, y));
            }
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> f64 {
        self.data[y * self.width + x]
    }
}
