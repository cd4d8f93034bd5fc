use fourier_viz_core::{normalize_to_u8, GrayImage, ImageError, RealImage, WORKING_SIZE};
use std::f64::consts::PI;

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Cycles across the image width in the demo grating.
pub const GRATING_FREQUENCY: f64 = 10.0;
/// Mean intensity of the grating.
pub const GRATING_OFFSET: f64 = 128.0;
/// Peak deviation from [`GRATING_OFFSET`].
pub const GRATING_AMPLITUDE: f64 = 127.0;

fn grating_row(size: usize, frequency: f64) -> Vec<f64> {
    (0..size)
        .map(|x| {
            GRATING_OFFSET + GRATING_AMPLITUDE * (2.0 * PI * frequency * x as f64 / size as f64).sin()
        })
        .collect()
}

/// `size x size` vertical-bar grating with `frequency` cycles per width.
///
/// Intensity varies with `x` only; every row is identical.
pub fn grating_values_with(size: usize, frequency: f64) -> Result<RealImage, ImageError> {
    let row = grating_row(size, frequency);
    RealImage::from_fn(size, size, |x, _| row[x])
}

/// Raw intensities of the demo grating (256 x 256, 10 cycles).
pub fn grating_values() -> RealImage {
    let row = grating_row(WORKING_SIZE, GRATING_FREQUENCY);
    RealImage {
        width: WORKING_SIZE,
        height: WORKING_SIZE,
        data: row.repeat(WORKING_SIZE),
    }
}

/// The demo grating stretched to `[0, 255]`.
#[cfg_attr(feature = "tracing", instrument(level = "debug"))]
pub fn sinusoidal_grating() -> GrayImage {
    normalize_to_u8(&grating_values())
}
