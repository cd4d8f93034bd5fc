//! Decoding uploads into the 256 x 256 grayscale working image, and PNG
//! output of rendered panels.

use fourier_viz_core::{resize, GrayImage, ImageError, ResizeFilter, WORKING_SIZE};
use image::{DynamicImage, ImageFormat, ImageReader};
use std::path::Path;

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Filter used to bring uploads to the working size.
pub const LOAD_FILTER: ResizeFilter = ResizeFilter::Bicubic;

#[derive(thiserror::Error, Debug)]
pub enum LoadError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("failed to decode image: {0}")]
    Decode(#[from] image::ImageError),

    #[error("unsupported image format {0:?} (expected PNG or JPEG)")]
    UnsupportedFormat(Option<ImageFormat>),

    #[error(transparent)]
    Image(#[from] ImageError),
}

fn check_format(format: Option<ImageFormat>) -> Result<ImageFormat, LoadError> {
    match format {
        Some(f @ (ImageFormat::Png | ImageFormat::Jpeg)) => Ok(f),
        other => Err(LoadError::UnsupportedFormat(other)),
    }
}

/// Convert any decoded image to luma and resize it to the working size.
pub fn working_image_from_dynamic(img: &DynamicImage) -> Result<GrayImage, ImageError> {
    let luma = img.to_luma8();
    let (width, height) = luma.dimensions();
    let src = GrayImage::from_raw(width as usize, height as usize, luma.into_raw())?;
    if src.is_square(WORKING_SIZE) {
        return Ok(src);
    }
    resize(&src.view(), WORKING_SIZE, WORKING_SIZE, LOAD_FILTER)
}

/// Decode a PNG/JPEG file into the working image.
#[cfg_attr(feature = "tracing", instrument(level = "info", skip(path)))]
pub fn load_working_image(path: impl AsRef<Path>) -> Result<GrayImage, LoadError> {
    let path = path.as_ref();
    let reader = ImageReader::open(path)?.with_guessed_format()?;
    let format = check_format(reader.format())?;
    let decoded = reader.decode()?;
    log::info!(
        "loaded {} ({format:?}, {}x{})",
        path.display(),
        decoded.width(),
        decoded.height()
    );
    Ok(working_image_from_dynamic(&decoded)?)
}

/// Decode an in-memory PNG/JPEG upload into the working image.
pub fn working_image_from_bytes(bytes: &[u8]) -> Result<GrayImage, LoadError> {
    let format = check_format(image::guess_format(bytes).ok())?;
    let decoded = image::load_from_memory_with_format(bytes, format)?;
    Ok(working_image_from_dynamic(&decoded)?)
}

/// Copy a [`GrayImage`] into an `image::GrayImage` buffer.
pub fn to_luma_buffer(img: &GrayImage) -> Result<image::GrayImage, ImageError> {
    let invalid = ImageError::InvalidDimensions {
        width: img.width,
        height: img.height,
    };
    let width = u32::try_from(img.width).map_err(|_| invalid.clone())?;
    let height = u32::try_from(img.height).map_err(|_| invalid.clone())?;
    image::GrayImage::from_raw(width, height, img.data.clone()).ok_or(invalid)
}

/// Write `img` as an 8-bit grayscale PNG.
pub fn save_png(img: &GrayImage, path: impl AsRef<Path>) -> Result<(), LoadError> {
    let path = path.as_ref();
    to_luma_buffer(img)?.save_with_format(path, ImageFormat::Png)?;
    log::debug!("wrote {} ({}x{})", path.display(), img.width, img.height);
    Ok(())
}
