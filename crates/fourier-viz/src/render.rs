//! Two-column layout of rendered panels at a fixed display width.

use crate::action::{Panel, Rendered};
use fourier_viz_core::{resize, GrayImage, ImageError, ResizeFilter};
use serde::{Deserialize, Serialize};

/// Display width of a single column, in pixels.
pub const DISPLAY_WIDTH: usize = 200;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayParams {
    /// Width every panel is scaled to.
    pub width: usize,
    /// Horizontal space between the two columns.
    pub gap: usize,
    /// Canvas fill for empty areas.
    pub background: u8,
    /// Filter used when scaling panels to `width`.
    pub filter: ResizeFilter,
}

impl Default for DisplayParams {
    fn default() -> Self {
        Self {
            width: DISPLAY_WIDTH,
            gap: 16,
            background: 255,
            filter: ResizeFilter::Bilinear,
        }
    }
}

/// Scale `img` to `params.width`, keeping its aspect ratio.
pub fn scale_to_display(img: &GrayImage, params: &DisplayParams) -> Result<GrayImage, ImageError> {
    if img.width == params.width {
        return Ok(img.clone());
    }
    let height = ((img.height * params.width) as f64 / img.width.max(1) as f64).round() as usize;
    resize(&img.view(), params.width, height.max(1), params.filter)
}

fn blit(canvas: &mut GrayImage, img: &GrayImage, x0: usize) {
    for y in 0..img.height.min(canvas.height) {
        let dst_start = y * canvas.width + x0;
        let len = img.width.min(canvas.width.saturating_sub(x0));
        canvas.data[dst_start..dst_start + len].copy_from_slice(&img.row(y)[..len]);
    }
}

/// Draw the panels of `rendered` side by side on one canvas.
///
/// The canvas is always two columns wide; an empty column stays background.
pub fn compose_layout(rendered: &Rendered, params: &DisplayParams) -> Result<GrayImage, ImageError> {
    compose_columns(&rendered.columns, params)
}

pub fn compose_columns(
    columns: &[Option<Panel>; 2],
    params: &DisplayParams,
) -> Result<GrayImage, ImageError> {
    let scaled = columns
        .iter()
        .map(|c| {
            c.as_ref()
                .map(|p| scale_to_display(&p.image, params))
                .transpose()
        })
        .collect::<Result<Vec<_>, _>>()?;

    let height = scaled
        .iter()
        .flatten()
        .map(|img| img.height)
        .max()
        .unwrap_or(params.width);
    let width = 2 * params.width + params.gap;
    let mut canvas = GrayImage::filled(width, height, params.background)?;

    for (i, img) in scaled.iter().enumerate() {
        if let Some(img) = img {
            blit(&mut canvas, img, i * (params.width + params.gap));
        }
    }
    Ok(canvas)
}
