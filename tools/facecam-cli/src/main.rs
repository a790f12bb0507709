//! FaceCam CLI: face-following virtual camera.
//!
//! Usage:
//!   facecam track <DETECTIONS>              Replay detections, print per-frame crops
//!   facecam render <FRAMES> <DETECTIONS>    Render cropped output frames
//!   facecam config                          Show (and optionally save) configuration

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use facecam_common::config::{config_file_path, AppConfig, LoggingConfig, PaddingMode};
use facecam_common::FacecamResult;

mod commands;

#[derive(Parser)]
#[command(
    name = "facecam",
    about = "Auto-framing virtual camera that follows detected faces",
    version,
    author
)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay recorded detections and emit one JSON frame decision per line
    Track {
        /// Detections file (JSONL, one frame per line)
        detections: PathBuf,

        /// Write decisions here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        tracking: TrackingArgs,
    },

    /// Render cropped output frames from a directory of still frames
    Render {
        /// Directory of input frames, processed in filename order
        frames: PathBuf,

        /// Detections file (JSONL, one frame per line)
        detections: PathBuf,

        /// Directory for cropped output frames
        #[arg(short, long)]
        output: PathBuf,

        /// Directory for debug frames with faces and camera drawn on
        #[arg(long)]
        debug: Option<PathBuf>,

        /// Output frame width
        #[arg(long)]
        output_width: Option<u32>,

        /// Output frame height
        #[arg(long)]
        output_height: Option<u32>,

        /// Do not mirror output frames
        #[arg(long)]
        no_mirror: bool,

        #[command(flatten)]
        tracking: TrackingArgs,
    },

    /// Print the effective configuration as JSON
    Config {
        /// Save the effective configuration to the config file
        #[arg(long)]
        save: bool,

        #[command(flatten)]
        tracking: TrackingArgs,
    },
}

/// Tracking overrides shared by every command.
#[derive(Args, Debug, Default)]
struct TrackingArgs {
    /// Frame width the tracker works in
    #[arg(long)]
    width: Option<u32>,

    /// Frame height the tracker works in
    #[arg(long)]
    height: Option<u32>,

    /// Per-frame easing coefficient (0, 1]
    #[arg(long)]
    easing: Option<f64>,

    /// Zoom padding in pixels
    #[arg(long)]
    padding: Option<f64>,

    /// How much slower panning is than zooming
    #[arg(long)]
    pan_ratio: Option<f64>,

    /// Camera radius at startup (pixels)
    #[arg(long)]
    initial_radius: Option<f64>,

    /// How padding enters the zoom update
    #[arg(long, value_enum)]
    padding_mode: Option<PaddingModeArg>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum PaddingModeArg {
    /// Add padding to the radius every frame
    Accumulate,
    /// Ease toward target radius plus padding
    Margin,
}

impl From<PaddingModeArg> for PaddingMode {
    fn from(arg: PaddingModeArg) -> Self {
        match arg {
            PaddingModeArg::Accumulate => PaddingMode::Accumulate,
            PaddingModeArg::Margin => PaddingMode::Margin,
        }
    }
}

impl TrackingArgs {
    fn apply(&self, config: &mut AppConfig) {
        if let Some(width) = self.width {
            config.capture.width = width;
        }
        if let Some(height) = self.height {
            config.capture.height = height;
        }
        if let Some(easing) = self.easing {
            config.tracking.easing = easing;
        }
        if let Some(padding) = self.padding {
            config.tracking.padding = padding;
        }
        if let Some(pan_ratio) = self.pan_ratio {
            config.tracking.pan_ratio = pan_ratio;
        }
        if let Some(radius) = self.initial_radius {
            config.tracking.initial_radius = radius;
        }
        if let Some(mode) = self.padding_mode {
            config.tracking.padding_mode = mode.into();
        }
    }
}

/// Fall back to defaults when the config file is missing or unreadable.
/// The warning is returned so it can be logged once logging is up.
fn config_or_default(loaded: FacecamResult<Option<AppConfig>>) -> (AppConfig, Option<String>) {
    match loaded {
        Ok(Some(config)) => (config, None),
        Ok(None) => (AppConfig::default(), None),
        Err(e) => (
            AppConfig::default(),
            Some(format!(
                "Failed to load config at {}, using defaults: {e}",
                config_file_path().display()
            )),
        ),
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Read config before logging so its logging section applies.
    let (mut config, load_warning) = config_or_default(AppConfig::try_load());

    let level = if cli.verbose {
        "debug".to_string()
    } else {
        config.logging.level.clone()
    };
    facecam_common::logging::init_logging(&LoggingConfig {
        level,
        json: config.logging.json,
    });

    if let Some(warning) = load_warning {
        tracing::warn!("{warning}");
    }

    match cli.command {
        Commands::Track {
            detections,
            output,
            tracking,
        } => {
            tracking.apply(&mut config);
            commands::track::run(detections, output, &config)
        }
        Commands::Render {
            frames,
            detections,
            output,
            debug,
            output_width,
            output_height,
            no_mirror,
            tracking,
        } => {
            tracking.apply(&mut config);
            if let Some(width) = output_width {
                config.output.width = width;
            }
            if let Some(height) = output_height {
                config.output.height = height;
            }
            if no_mirror {
                config.output.mirror = false;
            }
            commands::render::run(frames, detections, output, debug, &config)
        }
        Commands::Config { save, tracking } => {
            tracking.apply(&mut config);
            commands::config::run(&config, save)
        }
    }
}
