//! galaxy: headless tool for the galaxy portfolio core.
//!
//! Usage:
//!   galaxy attrs 1 --title-length 16 --tag-count 4
//!   galaxy planets --file records.json
//!   galaxy simulate --x 100 --y 50 --ticks 120
//!   galaxy login --secret "$SECRET"
//!
//! Reads `config/galaxy.yaml` (or `--config` / `GALAXY_CONFIG`) and `.env`.
//! All output is JSON on stdout.

mod commands;
mod config;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use commands::SimulateArgs;
use config::GalaxyConfig;
use galaxy_attrs::EntityFeatures;
use serde::Serialize;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "galaxy")]
#[command(about = "Planet attributes, catalogs and parallax simulation")]
struct Cli {
    /// Path to the YAML config file
    #[arg(long, global = true, env = "GALAXY_CONFIG", default_value = "config/galaxy.yaml")]
    config: PathBuf,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pretty: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Derive colour and importance for an id
    Attrs {
        id: String,

        /// Title length in UTF-16 code units
        #[arg(long, default_value_t = 0)]
        title_length: usize,

        /// Number of tags / skills
        #[arg(long, default_value_t = 0)]
        tag_count: usize,

        /// The project has an external (GitHub) link
        #[arg(long)]
        external_link: bool,
    },

    /// Load project records and print their planets
    Planets {
        /// JSON array of project records (demo projects when omitted)
        #[arg(long)]
        file: Option<PathBuf>,
    },

    /// Feed one pointer sample and run the motion engine
    Simulate {
        #[arg(long)]
        x: f64,

        #[arg(long)]
        y: f64,

        #[arg(long, default_value_t = 1000.0)]
        width: f64,

        #[arg(long, default_value_t = 500.0)]
        height: f64,

        #[arg(long, default_value_t = 50)]
        ticks: u32,

        /// Run on the async driver at the configured frame rate
        #[arg(long)]
        realtime: bool,
    },

    /// Check a secret against the configured admin secret
    Login {
        #[arg(long)]
        secret: String,
    },
}

fn print<T: Serialize>(value: &T, pretty: bool) -> Result<()> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{json}");
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,galaxy=debug".into()),
        )
        .init();

    let cli = Cli::parse();
    let config = GalaxyConfig::load(&cli.config)
        .with_context(|| format!("Failed to load config from {}", cli.config.display()))?;
    tracing::debug!(?config, "config loaded");

    match cli.command {
        Command::Attrs {
            id,
            title_length,
            tag_count,
            external_link,
        } => {
            let features = EntityFeatures::new(title_length, tag_count, external_link);
            print(&commands::attrs(&id, features), cli.pretty)
        }
        Command::Planets { file } => {
            let records = commands::read_records(file.as_deref())?;
            print(&commands::planets(records).await, cli.pretty)
        }
        Command::Simulate {
            x,
            y,
            width,
            height,
            ticks,
            realtime,
        } => {
            let args = SimulateArgs {
                x,
                y,
                width,
                height,
                ticks,
            };
            let report = if realtime {
                tracing::info!(
                    ticks,
                    expected_ms = commands::expected_duration(&config, ticks).as_millis() as u64,
                    "running realtime simulation"
                );
                commands::simulate_realtime(&config, args).await?
            } else {
                commands::simulate(&config, args)?
            };
            print(&report, cli.pretty)
        }
        Command::Login { secret } => {
            print(&commands::login(&config, &secret, Utc::now())?, cli.pretty)
        }
    }
}
