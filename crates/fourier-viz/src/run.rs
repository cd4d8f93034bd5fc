//! End-to-end run: load the upload, dispatch every requested action and write
//! the rendered layouts plus a JSON report.

use crate::action::{dispatch, original_panel, Action, Request};
use crate::io::{ActionReport, IoError, PanelReport, VisualizerConfig, VisualizerReport};
use crate::load::{load_working_image, save_png, LoadError};
use crate::render::{compose_layout, scale_to_display};
use fourier_viz_core::{GrayImage, ImageError};
use std::fs;
use std::path::{Path, PathBuf};

#[cfg(feature = "tracing")]
use tracing::instrument;

#[derive(thiserror::Error, Debug)]
pub enum RunError {
    #[error("failed to load {path}: {source}")]
    Load { path: String, source: LoadError },

    #[error("failed to write output: {0}")]
    Output(#[from] LoadError),

    #[error(transparent)]
    Image(#[from] ImageError),

    #[error(transparent)]
    Report(#[from] IoError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

fn layout_path(dir: &Path, action: Action) -> PathBuf {
    dir.join(format!("{}.png", action.name()))
}

fn panel_path(dir: &Path, action: Action, index: usize) -> PathBuf {
    dir.join(format!("{}_{index}.png", action.name()))
}

fn run_action(
    cfg: &VisualizerConfig,
    action: Action,
    image: Option<&GrayImage>,
) -> Result<ActionReport, RunError> {
    let dir = cfg.output_dir();
    let mut entry = ActionReport::new(action);

    let rendered = match dispatch(&Request::new(action, image.cloned())) {
        Ok(rendered) => rendered,
        Err(err) => {
            log::warn!("{action}: {err}");
            entry.set_error(&err);
            return Ok(entry);
        }
    };

    let layout = match compose_layout(&rendered, &cfg.display) {
        Ok(layout) => layout,
        Err(err) => {
            log::warn!("{action}: layout failed: {err}");
            entry.set_error(&err);
            return Ok(entry);
        }
    };
    let layout_file = layout_path(&dir, action);
    save_png(&layout, &layout_file)?;
    entry.layout_path = Some(layout_file.to_string_lossy().into_owned());

    let mut panel_paths = Vec::new();
    for (i, panel) in rendered.panels().enumerate() {
        if cfg.write_panels {
            let path = panel_path(&dir, action, i);
            save_png(&panel.image, &path)?;
            panel_paths.push(Some(path));
        } else {
            panel_paths.push(None);
        }
    }
    entry.set_rendered(&rendered, &panel_paths);
    Ok(entry)
}

/// Execute `cfg`, writing PNGs and the report into its output directory.
///
/// A failed action is recorded in the report and does not stop the others.
/// Only an invalid config, problems with the upload itself or failures to
/// write output are errors.
#[cfg_attr(feature = "tracing", instrument(level = "info", skip(cfg)))]
pub fn run_visualizer(cfg: &VisualizerConfig) -> Result<VisualizerReport, RunError> {
    cfg.validate()?;
    let dir = cfg.output_dir();
    fs::create_dir_all(&dir)?;
    let mut report = VisualizerReport::new(cfg);

    let image = match cfg.image_path.as_deref() {
        Some(path) => Some(load_working_image(path).map_err(|source| RunError::Load {
            path: path.to_string(),
            source,
        })?),
        None => None,
    };

    if let Some(img) = image.as_ref() {
        let mut panel = original_panel(img);
        panel.image = scale_to_display(&panel.image, &cfg.display)?;
        let path = dir.join("original.png");
        save_png(&panel.image, &path)?;
        report.original = Some(PanelReport::from_panel(&panel, Some(&path)));
    }

    for &action in &cfg.actions {
        report.actions.push(run_action(cfg, action, image.as_ref())?);
    }

    let report_path = cfg.report_path();
    report.write_json(&report_path)?;
    log::info!(
        "{} action(s), {} failed; report at {}",
        report.actions.len(),
        report.failed_actions().count(),
        report_path.display()
    );
    Ok(report)
}
