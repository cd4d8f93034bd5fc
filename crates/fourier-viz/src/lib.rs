//! High-level facade of the `fourier-viz-*` workspace.
//!
//! This crate provides:
//! - re-exports of the core containers and the spectrum transforms
//! - an explicit request/dispatch API for the four demo actions
//! - two-column layout rendering at a fixed display width
//! - (feature `image`) decoding of PNG/JPEG uploads into the 256 x 256
//!   working image, PNG output, and an end-to-end runner
//!
//! ## Quickstart
//!
//! ```no_run
//! use fourier_viz::{dispatch, load, Action, Request};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let img = load::load_working_image("cameraman.png")?;
//! let rendered = dispatch(&Request::new(Action::Magnitude, Some(img)))?;
//! for panel in rendered.panels() {
//!     println!("{}: {}x{}", panel.caption, panel.image.width, panel.image.height);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## API map
//! - `fourier_viz::core`: grids, normalization, resampling, logging.
//! - `fourier_viz::spectrum`: FFT, fftshift, magnitude/phase, grating, jagging.
//! - `fourier_viz::render`: display scaling and layout composition.
//! - `fourier_viz::io`: JSON config and report types.
//! - `fourier_viz::load` / `fourier_viz::run` (feature `image`).

pub use fourier_viz_core as core;
pub use fourier_viz_spectrum as spectrum;

pub mod action;
pub mod io;
pub mod render;

#[cfg(feature = "image")]
pub mod load;
#[cfg(feature = "image")]
pub mod run;

pub use action::{
    dispatch, original_panel, Action, DispatchError, Panel, ParseActionError, Rendered, Request,
};
pub use fourier_viz_core::{GrayImage, RealImage, WORKING_SIZE};
pub use io::{VisualizerConfig, VisualizerReport, TITLE};
pub use render::{compose_layout, DisplayParams, DISPLAY_WIDTH};
