//! overlay-bridge CLI
//!
//! Single binary for driving the overlay renderer:
//! - Supervised session (start the renderer, forward commands from stdin)
//! - One-shot draw commands against a running renderer
//! - Configuration management

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use overlay_bridge::commands::{self, PlacementArgs, ShapeArgs, TextArgs};
use ov_core::config::{self, ConfigFile};

#[derive(Parser)]
#[command(name = "overlayctl")]
#[command(author, version, about = "Overlay renderer supervisor and client")]
#[command(propagate_version = true)]
struct Cli {
    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the renderer and forward JSON draw commands from stdin
    Run {
        #[command(flatten)]
        placement: PlacementArgs,
    },

    /// Draw text on a running renderer
    Text(TextArgs),

    /// Draw a shape on a running renderer
    Shape(ShapeArgs),

    /// Remove an element from a running renderer
    Clear {
        /// Element id
        id: String,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Show the effective configuration
    Show,
    /// Show config file path
    Path,
    /// Write a default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    let log_level = match (cli.quiet, cli.verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "info",
        (false, 2) => "debug",
        (false, _) => "trace",
    };

    // stdout is left to command output
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| log_level.into()),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    match cli.command {
        Commands::Run { placement } => {
            let file = load(cli.config.as_ref())?;
            commands::run_command(file, placement).await?;
        }

        Commands::Text(args) => {
            let file = load(cli.config.as_ref())?;
            commands::text_command(&file.client, args).await?;
        }

        Commands::Shape(args) => {
            let file = load(cli.config.as_ref())?;
            commands::shape_command(&file.client, args).await?;
        }

        Commands::Clear { id } => {
            let file = load(cli.config.as_ref())?;
            commands::clear_command(&file.client, &id).await?;
        }

        Commands::Config { action } => match action {
            ConfigAction::Show => commands::config_show(cli.config.as_ref())?,
            ConfigAction::Path => commands::config_path(cli.config.as_ref()),
            ConfigAction::Init { force } => commands::config_init(cli.config.as_ref(), force)?,
        },
    }

    Ok(())
}

/// Load the config file, falling back to defaults when there is none
fn load(config_path: Option<&PathBuf>) -> Result<ConfigFile> {
    let path = config_path
        .cloned()
        .unwrap_or_else(config::default_config_path);

    config::load_or_default(&path).with_context(|| format!("Failed to load config from {:?}", path))
}
