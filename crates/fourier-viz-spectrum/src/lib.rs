//! Frequency-domain views of grayscale images.
//!
//! - [`Spectrum`]: forward 2D DFT with the DC term shifted to the centre,
//!   plus log-magnitude and phase planes.
//! - [`sinusoidal_grating`]: the fixed 10-cycle vertical-bar test pattern.
//! - [`simulate_jagging`]: 8x bilinear shrink, nearest-neighbour enlarge, and
//!   the spectrum of the result.
//!
//! All functions are pure; the same input always yields the same bytes.

mod fft2d;
mod grating;
mod jagging;
mod spectrum;

pub use fft2d::{fft_2d, fftshift, ifftshift};
pub use grating::{
    grating_values, grating_values_with, sinusoidal_grating, GRATING_AMPLITUDE,
    GRATING_FREQUENCY, GRATING_OFFSET,
};
pub use jagging::{simulate_jagging, JaggingError, JaggingResult, JAGGING_DOWN_SIZE};
pub use spectrum::{magnitude_spectrum, phase_spectrum, Spectrum};

/// Complex sample type used by [`Spectrum`].
pub use rustfft::num_complex::Complex;
