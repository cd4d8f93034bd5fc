//! JSON configuration and report helpers for the visualizer.

use crate::action::{Action, Panel, Rendered};
use crate::render::DisplayParams;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Page title of the visualizer.
pub const TITLE: &str = "2D Fourier Transform Visualizer for DIP Assignment";

#[derive(thiserror::Error, Debug)]
pub enum IoError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

fn default_actions() -> Vec<Action> {
    Action::ALL.to_vec()
}

fn default_output_dir() -> String {
    "fourier_viz_out".to_string()
}

/// Configuration of one visualizer run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisualizerConfig {
    /// Uploaded image; only the grating works without one.
    #[serde(default)]
    pub image_path: Option<String>,
    #[serde(default = "default_actions")]
    pub actions: Vec<Action>,
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
    #[serde(default)]
    pub display: DisplayParams,
    /// Also write every panel at working resolution.
    #[serde(default)]
    pub write_panels: bool,
    #[serde(default)]
    pub report_path: Option<String>,
}

impl Default for VisualizerConfig {
    fn default() -> Self {
        Self {
            image_path: None,
            actions: default_actions(),
            output_dir: default_output_dir(),
            display: DisplayParams::default(),
            write_panels: false,
            report_path: None,
        }
    }
}

impl VisualizerConfig {
    /// Load and validate a JSON config from disk.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, IoError> {
        let raw = fs::read_to_string(path)?;
        let cfg: Self = serde_json::from_str(&raw)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), IoError> {
        if self.display.width == 0 {
            return Err(IoError::InvalidConfig(
                "display.width must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// Write this config to disk as pretty JSON.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), IoError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    pub fn output_dir(&self) -> PathBuf {
        PathBuf::from(&self.output_dir)
    }

    /// Resolve the report path, defaulting to `report.json` in the output dir.
    pub fn report_path(&self) -> PathBuf {
        self.report_path
            .as_ref()
            .map(PathBuf::from)
            .unwrap_or_else(|| self.output_dir().join("report.json"))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PanelReport {
    pub caption: String,
    pub width: usize,
    pub height: usize,
    pub min: u8,
    pub max: u8,
    #[serde(default)]
    pub path: Option<String>,
}

impl PanelReport {
    pub fn from_panel(panel: &Panel, path: Option<&Path>) -> Self {
        let (min, max) = panel.image.min_max();
        Self {
            caption: panel.caption.clone(),
            width: panel.image.width,
            height: panel.image.height,
            min,
            max,
            path: path.map(|p| p.to_string_lossy().into_owned()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionReport {
    pub action: Action,
    pub label: String,
    #[serde(default)]
    pub layout_path: Option<String>,
    #[serde(default)]
    pub panels: Vec<PanelReport>,
    #[serde(default)]
    pub error: Option<String>,
}

impl ActionReport {
    pub fn new(action: Action) -> Self {
        Self {
            action,
            label: action.label().to_string(),
            layout_path: None,
            panels: Vec::new(),
            error: None,
        }
    }

    /// Populate panel entries from a successful dispatch.
    pub fn set_rendered(&mut self, rendered: &Rendered, panel_paths: &[Option<PathBuf>]) {
        self.panels = rendered
            .panels()
            .enumerate()
            .map(|(i, panel)| {
                let path = panel_paths.get(i).and_then(|path| path.as_deref());
                PanelReport::from_panel(panel, path)
            })
            .collect();
        self.error = None;
    }

    /// Record a failed action.
    pub fn set_error(&mut self, err: &dyn std::error::Error) {
        self.error = Some(err.to_string());
    }

    pub fn succeeded(&self) -> bool {
        self.error.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisualizerReport {
    pub title: String,
    #[serde(default)]
    pub image_path: Option<String>,
    #[serde(default)]
    pub original: Option<PanelReport>,
    #[serde(default)]
    pub actions: Vec<ActionReport>,
}

impl VisualizerReport {
    pub fn new(cfg: &VisualizerConfig) -> Self {
        Self {
            title: TITLE.to_string(),
            image_path: cfg.image_path.clone(),
            original: None,
            actions: Vec::new(),
        }
    }

    pub fn failed_actions(&self) -> impl Iterator<Item = &ActionReport> {
        self.actions.iter().filter(|a| !a.succeeded())
    }

    /// Load a report from JSON on disk.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, IoError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Write this report to disk as pretty JSON.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), IoError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }
}
