//! Handmouse CLI: control the mouse with hand gestures in front of a webcam.
//!
//! Usage:
//!   handmouse run [OPTIONS]      Start gesture control from the camera
//!   handmouse replay <PATH>      Re-run a landmark recording
//!   handmouse check              Check camera, detector, and pointer setup
//!   handmouse config [--write]   Show or write the configuration

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use handmouse_common::config::AppConfig;

mod commands;

#[derive(Parser)]
#[command(
    name = "handmouse",
    about = "Move and click the mouse with hand gestures",
    version,
    author
)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file to use instead of the standard location
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start gesture control from the camera
    Run {
        /// Camera device index
        #[arg(long)]
        camera: Option<i32>,

        /// Do not open the debug window
        #[arg(long)]
        no_display: bool,

        /// Log pointer actions instead of performing them
        #[arg(long)]
        dry_run: bool,

        /// Write detected landmarks to this JSONL file
        #[arg(long)]
        record: Option<PathBuf>,
    },

    /// Re-run a landmark recording through the gesture controller
    Replay {
        /// Path to the recording
        path: PathBuf,

        /// Show the debug window while replaying
        #[arg(long)]
        display: bool,

        /// Drive the real mouse instead of a stub
        #[arg(long)]
        live_pointer: bool,
    },

    /// Check camera, detector, and pointer setup
    Check,

    /// Print the effective configuration
    Config {
        /// Write it to the standard config location
        #[arg(long)]
        write: bool,
    },
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<AppConfig> {
    match path {
        Some(path) => AppConfig::load_from(path)
            .map_err(|e| anyhow::anyhow!("Failed to load config {}: {e}", path.display())),
        None => Ok(AppConfig::load()),
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = load_config(cli.config.as_ref())?;

    let mut logging = config.logging.clone();
    if cli.verbose {
        logging.level = "debug".to_string();
    }
    handmouse_common::logging::init_logging(&logging);

    match cli.command {
        Commands::Run {
            camera,
            no_display,
            dry_run,
            record,
        } => commands::run::run(
            config,
            commands::run::RunOptions {
                camera,
                no_display,
                dry_run,
                record,
            },
        ),
        Commands::Replay {
            path,
            display,
            live_pointer,
        } => commands::replay::run(config, path, display, live_pointer),
        Commands::Check => commands::check::run(&config),
        Commands::Config { write } => commands::config::run(&config, write),
    }
}
