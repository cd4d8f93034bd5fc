//! Explicit request/dispatch for the four demo transforms.
//!
//! A [`Request`] names one [`Action`] and optionally carries the working
//! image; [`dispatch`] runs the matching transform and returns the panels to
//! show in a two-column layout. Nothing is cached between requests.

use fourier_viz_core::{GrayImage, ImageError, WORKING_SIZE};
use fourier_viz_spectrum::{
    magnitude_spectrum, phase_spectrum, simulate_jagging, sinusoidal_grating, JaggingError,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Caption of the preview panel shown next to every request.
pub const ORIGINAL_CAPTION: &str = "Original Image";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Magnitude,
    Phase,
    Grating,
    Jagging,
}

impl Action {
    pub const ALL: [Action; 4] = [
        Action::Magnitude,
        Action::Phase,
        Action::Grating,
        Action::Jagging,
    ];

    /// Button label of the action.
    pub fn label(self) -> &'static str {
        match self {
            Action::Magnitude => "Magnitude Spectrum",
            Action::Phase => "Phase Spectrum",
            Action::Grating => "Sinusoidal Grating",
            Action::Jagging => "Jagging Demo",
        }
    }

    /// Short machine name, used for file names and parsing.
    pub fn name(self) -> &'static str {
        match self {
            Action::Magnitude => "magnitude",
            Action::Phase => "phase",
            Action::Grating => "grating",
            Action::Jagging => "jagging",
        }
    }

    pub fn requires_image(self) -> bool {
        !matches!(self, Action::Grating)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown action '{0}' (expected magnitude, phase, grating or jagging)")]
pub struct ParseActionError(String);

impl FromStr for Action {
    type Err = ParseActionError;

    /// Accepts the short name or the button label, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Action::ALL
            .into_iter()
            .find(|a| a.name().eq_ignore_ascii_case(needle) || a.label().eq_ignore_ascii_case(needle))
            .ok_or_else(|| ParseActionError(s.to_string()))
    }
}

/// One user action against the (optional) working image.
#[derive(Clone, Debug)]
pub struct Request {
    pub action: Action,
    pub image: Option<GrayImage>,
}

impl Request {
    pub fn new(action: Action, image: Option<GrayImage>) -> Self {
        Self { action, image }
    }
}

/// A captioned image ready to be laid out.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Panel {
    pub caption: String,
    pub image: GrayImage,
}

impl Panel {
    pub fn new(caption: impl Into<String>, image: GrayImage) -> Self {
        Self {
            caption: caption.into(),
            image,
        }
    }
}

/// Result of a dispatched request: up to two panels, left to right.
#[derive(Clone, Debug)]
pub struct Rendered {
    pub action: Action,
    pub columns: [Option<Panel>; 2],
}

impl Rendered {
    pub fn panels(&self) -> impl Iterator<Item = &Panel> {
        self.columns.iter().flatten()
    }
}

#[derive(thiserror::Error, Debug)]
pub enum DispatchError {
    #[error("{action} requires an uploaded image")]
    MissingImage { action: Action },

    #[error("{action} expects a {expected}x{expected} working image, got {width}x{height}")]
    UnexpectedSize {
        action: Action,
        width: usize,
        height: usize,
        expected: usize,
    },

    #[error(transparent)]
    Image(#[from] ImageError),

    #[error(transparent)]
    Jagging(#[from] JaggingError),
}

fn working_image(request: &Request) -> Result<&GrayImage, DispatchError> {
    let action = request.action;
    let img = request
        .image
        .as_ref()
        .ok_or(DispatchError::MissingImage { action })?;
    if !img.is_square(WORKING_SIZE) {
        return Err(DispatchError::UnexpectedSize {
            action,
            width: img.width,
            height: img.height,
            expected: WORKING_SIZE,
        });
    }
    Ok(img)
}

/// Run the transform named by `request.action`.
#[cfg_attr(
    feature = "tracing",
    instrument(level = "info", skip(request), fields(action = request.action.name()))
)]
pub fn dispatch(request: &Request) -> Result<Rendered, DispatchError> {
    let action = request.action;
    let columns = match action {
        Action::Magnitude => {
            let img = working_image(request)?;
            [
                Some(Panel::new("Magnitude Spectrum", magnitude_spectrum(&img.view())?)),
                None,
            ]
        }
        Action::Phase => {
            let img = working_image(request)?;
            [
                Some(Panel::new("Phase Spectrum", phase_spectrum(&img.view())?)),
                None,
            ]
        }
        Action::Grating => [
            Some(Panel::new("Sinusoidal Grating", sinusoidal_grating())),
            None,
        ],
        Action::Jagging => {
            let img = working_image(request)?;
            let res = simulate_jagging(&img.view())?;
            [
                Some(Panel::new("Jagged Image", res.jagged)),
                Some(Panel::new("Magnitude Spectrum (Jagging)", res.magnitude)),
            ]
        }
    };
    log::info!("{action}: rendered {} panel(s)", columns.iter().flatten().count());
    Ok(Rendered { action, columns })
}

/// Preview panel of the working image itself.
pub fn original_panel(image: &GrayImage) -> Panel {
    Panel::new(ORIGINAL_CAPTION, image.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient() -> GrayImage {
        GrayImage::from_fn(WORKING_SIZE, WORKING_SIZE, |x, y| ((x + 2 * y) / 3) as u8).unwrap()
    }

    #[test]
    fn labels_match_buttons() {
        let labels: Vec<_> = Action::ALL.iter().map(|a| a.label()).collect();
        assert_eq!(
            labels,
            [
                "Magnitude Spectrum",
                "Phase Spectrum",
                "Sinusoidal Grating",
                "Jagging Demo"
            ]
        );
    }

    #[test]
    fn parses_names_and_labels() {
        assert_eq!("phase".parse::<Action>().unwrap(), Action::Phase);
        assert_eq!("Jagging Demo".parse::<Action>().unwrap(), Action::Jagging);
        assert_eq!(" GRATING ".parse::<Action>().unwrap(), Action::Grating);
        assert!("blur".parse::<Action>().is_err());
    }

    #[test]
    fn grating_needs_no_image() {
        let rendered = dispatch(&Request::new(Action::Grating, None)).unwrap();
        let captions: Vec<_> = rendered.panels().map(|p| p.caption.as_str()).collect();
        assert_eq!(captions, ["Sinusoidal Grating"]);
        assert!(rendered.columns[1].is_none());
    }

    #[test]
    fn spectrum_actions_need_an_image() {
        for action in [Action::Magnitude, Action::Phase, Action::Jagging] {
            let err = dispatch(&Request::new(action, None)).unwrap_err();
            assert!(matches!(err, DispatchError::MissingImage { action: a } if a == action));
        }
    }

    #[test]
    fn wrong_size_is_rejected() {
        let img = GrayImage::filled(100, 256, 7).unwrap();
        let err = dispatch(&Request::new(Action::Phase, Some(img))).unwrap_err();
        assert!(matches!(
            err,
            DispatchError::UnexpectedSize {
                width: 100,
                height: 256,
                ..
            }
        ));
    }

    #[test]
    fn jagging_fills_both_columns() {
        let rendered = dispatch(&Request::new(Action::Jagging, Some(gradient()))).unwrap();
        let captions: Vec<_> = rendered.panels().map(|p| p.caption.as_str()).collect();
        assert_eq!(captions, ["Jagged Image", "Magnitude Spectrum (Jagging)"]);
        for panel in rendered.panels() {
            assert_eq!((panel.image.width, panel.image.height), (256, 256));
        }
    }

    #[test]
    fn single_output_actions_leave_second_column_empty() {
        for action in [Action::Magnitude, Action::Phase] {
            let rendered = dispatch(&Request::new(action, Some(gradient()))).unwrap();
            assert_eq!(rendered.action, action);
            assert!(rendered.columns[0].is_some());
            assert!(rendered.columns[1].is_none());
            assert_eq!(rendered.panels().next().unwrap().caption, action.label());
        }
    }
}
