//! # synclog
//!
//! CLI tool for recording and inspecting sync histories.
//!
//! ## Commands
//!
//! - `record`: Append the outcome of a sync attempt to a profile's log
//! - `show`: Show the retained results and the last successful sync
//! - `last-success`: Print when a profile last synced successfully
//! - `list`: List profiles that have a log
//!
//! ## Example
//!
//! ```bash
//! # Record a successful sync
//! synclog record calendar --major success
//!
//! # Record a failure with a minor code
//! synclog record calendar --major failed --minor 502
//!
//! # Inspect the log
//! synclog show calendar
//! synclog last-success calendar
//! ```

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use synclog_core::{MajorCode, MinorCode};
use tracing_subscriber::EnvFilter;

mod commands;
mod config;
mod store;

use commands::{last_success, list, record, show};
use config::Config;
use store::LogStore;

/// CLI tool for recording and inspecting sync histories.
#[derive(Parser, Debug)]
#[command(name = "synclog")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Configuration file (TOML)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory holding the sync log files
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Append the outcome of a sync attempt
    Record {
        /// Profile name
        profile: String,

        /// Overall outcome
        #[arg(long, value_enum)]
        major: Major,

        /// Detailed reason code
        #[arg(long, default_value_t = 0)]
        minor: u32,

        /// When the sync finished (RFC 3339, default: now)
        #[arg(long, value_parser = parse_time)]
        time: Option<DateTime<Utc>>,

        /// The sync was started by the scheduler
        #[arg(long)]
        scheduled: bool,
    },

    /// Show the sync log of a profile
    Show {
        /// Profile name
        profile: String,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print when a profile last synced successfully
    LastSuccess {
        /// Profile name
        profile: String,
    },

    /// List profiles with a sync log
    List,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Major {
    Success,
    Failed,
    Cancelled,
    Invalid,
}

impl From<Major> for MajorCode {
    fn from(major: Major) -> Self {
        match major {
            Major::Success => MajorCode::Success,
            Major::Failed => MajorCode::Failed,
            Major::Cancelled => MajorCode::Cancelled,
            Major::Invalid => MajorCode::Invalid,
        }
    }
}

fn parse_time(raw: &str) -> Result<DateTime<Utc>, String> {
    DateTime::parse_from_rfc3339(raw)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| format!("invalid RFC 3339 time: {}", e))
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = load_config(cli.config.as_deref())?;
    let log_config = config.log_config()?;
    let log_dir = match cli.log_dir.or_else(|| config.storage.log_dir.clone()) {
        Some(dir) => dir,
        None => default_log_dir()?,
    };
    tracing::debug!("Using log directory {}", log_dir.display());

    let store = LogStore::new(log_dir, log_config);

    match cli.command {
        Commands::Record {
            profile,
            major,
            minor,
            time,
            scheduled,
        } => {
            let outcome = record::Outcome {
                major: major.into(),
                minor: MinorCode::new(minor),
                time: time.unwrap_or_else(Utc::now),
                scheduled,
            };
            record::run(&store, &profile, outcome).await?;
        }
        Commands::Show { profile, json } => {
            show::run(&store, &profile, json).await?;
        }
        Commands::LastSuccess { profile } => {
            last_success::run(&store, &profile).await?;
        }
        Commands::List => {
            list::run(&store).await?;
        }
    }

    Ok(())
}

/// Load the configuration file, falling back to the platform default
/// location and then to built-in defaults.
fn load_config(explicit: Option<&Path>) -> Result<Config> {
    if let Some(path) = explicit {
        return Ok(Config::from_file(path)?);
    }

    if let Some(dirs) = project_dirs() {
        let path = dirs.config_dir().join("synclog.toml");
        if path.exists() {
            return Ok(Config::from_file(&path)?);
        }
    }

    Ok(Config::default())
}

/// Get the default log directory for synclog.
fn default_log_dir() -> Result<PathBuf> {
    let dirs = project_dirs().context("Could not determine home directory")?;
    Ok(dirs.data_dir().join("logs"))
}

fn project_dirs() -> Option<directories::ProjectDirs> {
    directories::ProjectDirs::from("org", "synclog", "synclog")
}
