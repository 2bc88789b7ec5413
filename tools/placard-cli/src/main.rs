//! Placard CLI: promotional images for conference talks.
//!
//! Usage:
//!   placard generate --config <FILE>   Render placards and post drafts
//!   placard fetch --config <FILE>      Save the event's talks to JSON
//!   placard layout --title <T> ...     Preview the text block for one talk
//!   placard check --config <FILE>      Check config, assets, and API token
//!   placard init                       Write a default config file

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use placard_common::config::EventConfig;

mod commands;

#[derive(Parser)]
#[command(
    name = "placard",
    about = "Promotional images and post drafts for conference talks",
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
    /// Render every talk and write the post drafts
    Generate {
        /// Event config file
        #[arg(short, long)]
        config: PathBuf,

        /// Output directory (overrides the config)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Read talks from a JSON file instead of the API
        #[arg(long)]
        talks: Option<PathBuf>,
    },

    /// Fetch talks from the API and save them as JSON
    Fetch {
        /// Event config file
        #[arg(short, long)]
        config: PathBuf,

        /// Destination JSON file
        #[arg(long, default_value = "talks.json")]
        out: PathBuf,
    },

    /// Show the text block and font size computed for one talk
    Layout {
        /// Talk title
        #[arg(long)]
        title: String,

        /// Speaker name
        #[arg(long)]
        name: String,

        /// Display time; `\n` starts a new line
        #[arg(long, default_value = "TBA")]
        time: String,

        /// Talk code, for per-talk overrides
        #[arg(long, default_value = "")]
        code: String,

        /// Event config file (defaults are used without one)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Check the config, its assets, and the API token
    Check {
        /// Event config file
        #[arg(short, long)]
        config: PathBuf,
    },

    /// Write a default config file
    Init {
        /// Destination file
        #[arg(long, default_value = "placard.json")]
        out: PathBuf,
    },
}

impl Commands {
    fn config_path(&self) -> Option<&Path> {
        match self {
            Commands::Generate { config, .. }
            | Commands::Fetch { config, .. }
            | Commands::Check { config } => Some(config.as_path()),
            Commands::Layout { config, .. } => config.as_deref(),
            Commands::Init { .. } => None,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = cli
        .command
        .config_path()
        .map(|path| {
            EventConfig::load(path)
                .with_context(|| format!("Failed to load config {}", path.display()))
        })
        .transpose()?;

    let mut logging = config
        .as_ref()
        .map(|c| c.logging.clone())
        .unwrap_or_default();
    if cli.verbose {
        logging.level = "debug".to_string();
    }
    placard_common::logging::init_logging(&logging);

    let config = config.unwrap_or_default();

    match cli.command {
        Commands::Generate { output, talks, .. } => commands::generate::run(config, output, talks),
        Commands::Fetch { out, .. } => commands::fetch::run(&config, out),
        Commands::Layout {
            title,
            name,
            time,
            code,
            ..
        } => commands::layout::run(&config, title, name, time, code),
        Commands::Check { .. } => commands::check::run(&config),
        Commands::Init { out } => commands::init::run(out),
    }
}
