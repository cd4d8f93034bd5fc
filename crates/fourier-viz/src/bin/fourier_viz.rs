//! fourier-viz CLI: render magnitude/phase spectra, a sinusoidal grating and
//! the jagging demo for an uploaded image.

use clap::{Args, Parser, Subcommand};
use fourier_viz::run::run_visualizer;
use fourier_viz::{Action, VisualizerConfig, VisualizerReport, TITLE};
use log::LevelFilter;
use std::path::PathBuf;
use std::process::ExitCode;

type CliError = Box<dyn std::error::Error>;
type CliResult<T> = Result<T, CliError>;

#[derive(Parser)]
#[command(name = "fourier-viz")]
#[command(about = TITLE)]
#[command(version)]
struct Cli {
    /// Log level (off, error, warn, info, debug, trace). Overrides FOURIER_VIZ_LOG.
    #[arg(long, global = true)]
    log_level: Option<LevelFilter>,

    /// Emit JSON log lines (only with the `tracing` feature).
    #[arg(long, global = true)]
    json_log: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one or more actions on an image and write the rendered layouts.
    Run(RunArgs),

    /// Render the sinusoidal grating; no image needed.
    Grating {
        /// Output directory.
        #[arg(long, default_value = "fourier_viz_out")]
        out_dir: PathBuf,
    },

    /// Write a default JSON config to start from.
    InitConfig {
        /// Destination path.
        #[arg(long)]
        out: PathBuf,
    },

    /// List the available actions.
    Actions,
}

#[derive(Debug, Clone, Args)]
struct RunArgs {
    /// JSON config; flags below override its values.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Input image (PNG or JPEG).
    #[arg(long)]
    image: Option<PathBuf>,

    /// Action to run; repeat for several. Defaults to all four.
    #[arg(long = "action", value_enum)]
    actions: Vec<Action>,

    /// Output directory for PNGs and the report.
    #[arg(long)]
    out_dir: Option<PathBuf>,

    /// Display width of each column in pixels.
    #[arg(long)]
    display_width: Option<usize>,

    /// Also write each panel at working resolution.
    #[arg(long)]
    panels: bool,

    /// Report path (default: <out-dir>/report.json).
    #[arg(long)]
    report: Option<PathBuf>,
}

#[cfg(feature = "tracing")]
fn init_logging(cli: &Cli) -> CliResult<()> {
    fourier_viz::core::init_tracing(cli.json_log, cli.log_level);
    Ok(())
}

#[cfg(not(feature = "tracing"))]
fn init_logging(cli: &Cli) -> CliResult<()> {
    if cli.json_log {
        eprintln!("--json-log requires the `tracing` feature; using plain logs");
    }
    let level = cli
        .log_level
        .unwrap_or_else(|| fourier_viz::core::level_from_env(LevelFilter::Info));
    fourier_viz::core::init_with_level(level)?;
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match execute(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn execute(cli: Cli) -> CliResult<()> {
    init_logging(&cli)?;

    match cli.command {
        Commands::Run(args) => run(&args),
        Commands::Grating { out_dir } => {
            let cfg = VisualizerConfig {
                actions: vec![Action::Grating],
                output_dir: out_dir.to_string_lossy().into_owned(),
                ..VisualizerConfig::default()
            };
            finish(run_visualizer(&cfg)?)
        }
        Commands::InitConfig { out } => {
            VisualizerConfig::default().write_json(&out)?;
            println!("wrote {}", out.display());
            Ok(())
        }
        Commands::Actions => {
            for action in Action::ALL {
                let note = if action.requires_image() {
                    ""
                } else {
                    " (no image needed)"
                };
                println!("{:<10} {}{note}", action.name(), action.label());
            }
            Ok(())
        }
    }
}

fn build_config(args: &RunArgs) -> CliResult<VisualizerConfig> {
    let mut cfg = match &args.config {
        Some(path) => VisualizerConfig::load_json(path)?,
        None => VisualizerConfig::default(),
    };
    if let Some(image) = &args.image {
        cfg.image_path = Some(image.to_string_lossy().into_owned());
    }
    if !args.actions.is_empty() {
        cfg.actions = args.actions.clone();
    }
    if let Some(dir) = &args.out_dir {
        cfg.output_dir = dir.to_string_lossy().into_owned();
    }
    if let Some(width) = args.display_width {
        if width == 0 {
            return Err("--display-width must be positive".into());
        }
        cfg.display.width = width;
    }
    if args.panels {
        cfg.write_panels = true;
    }
    if let Some(report) = &args.report {
        cfg.report_path = Some(report.to_string_lossy().into_owned());
    }
    Ok(cfg)
}

fn run(args: &RunArgs) -> CliResult<()> {
    let cfg = build_config(args)?;
    finish(run_visualizer(&cfg)?)
}

fn finish(report: VisualizerReport) -> CliResult<()> {
    if let Some(original) = &report.original {
        if let Some(path) = &original.path {
            println!("{:<28} {path}", original.caption);
        }
    }
    for entry in &report.actions {
        match (&entry.layout_path, &entry.error) {
            (_, Some(err)) => println!("{:<28} FAILED: {err}", entry.label),
            (Some(path), None) => println!("{:<28} {path}", entry.label),
            (None, None) => println!("{:<28} (no output)", entry.label),
        }
    }

    let failed = report.failed_actions().count();
    if failed > 0 {
        return Err(format!("{failed} action(s) failed").into());
    }
    Ok(())
}
