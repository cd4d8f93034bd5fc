//! Core containers and pixel utilities for `fourier-viz`.
//!
//! This crate knows nothing about Fourier transforms or file formats. It
//! provides the grids every stage exchanges ([`GrayImage`], [`RealImage`]),
//! the min/max stretch into displayable bytes, and resampling on top of
//! `image::imageops`.

mod image;
mod logger;
mod normalize;
mod resample;

pub use self::image::{GrayImage, GrayImageView, ImageError, RealImage};
pub use normalize::{normalize_to_u8, try_normalize_to_u8, value_range, NormalizeError};
pub use resample::{resize, ResizeFilter};

#[cfg(feature = "tracing")]
pub use logger::init_tracing;

pub use logger::{init_with_level, level_from_env, LOG_ENV_VAR};

/// Side length of the square working array every transform operates on.
pub const WORKING_SIZE: usize = 256;
