//! buildmon CLI tool.

use anyhow::{Context, Result};
use buildmon_config::{DEFAULT_CONFIG_FILE, MonitorConfig, MonitorConfigBuilder, load_config_file};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::debug;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "buildmon")]
#[command(about = "Start branch builds and report when they finish", long_about = None)]
struct Cli {
    /// Application name
    #[arg(long, env = "BUILDMON_APP")]
    app: Option<String>,

    /// Application owner (user or organization)
    #[arg(long, env = "BUILDMON_OWNER")]
    owner: Option<String>,

    /// API token
    #[arg(long, env = "BUILDMON_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Delay between status checks in milliseconds
    #[arg(long, env = "BUILDMON_INTERVAL_MS", allow_negative_numbers = true)]
    interval_ms: Option<i64>,

    /// Build service API URL
    #[arg(long, env = "BUILDMON_API_URL")]
    api_url: Option<String>,

    /// Path to a KDL configuration file
    #[arg(long, env = "BUILDMON_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start builds and wait for them to finish
    Start {
        /// Build every branch, not only branches with CI configured
        #[arg(long)]
        all: bool,
    },
    /// Show build details
    Build {
        /// Build ID
        id: u64,
    },
    /// List branches and their CI configuration
    Branches,
}

impl Cli {
    /// Layer command-line and environment values over the configuration file.
    fn monitor_config(&self) -> Result<MonitorConfig> {
        let mut builder = match &self.config {
            Some(path) => load_config_file(path)
                .with_context(|| format!("Failed to load config file: {}", path.display()))?,
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => load_config_file(DEFAULT_CONFIG_FILE)
                .with_context(|| format!("Failed to load config file: {}", DEFAULT_CONFIG_FILE))?,
            None => MonitorConfigBuilder::new(),
        };

        if let Some(app) = &self.app {
            builder = builder.with_app_name(app);
        }
        if let Some(owner) = &self.owner {
            builder = builder.with_owner_name(owner);
        }
        if let Some(token) = &self.token {
            builder = builder.with_token(token);
        }
        if let Some(interval_ms) = self.interval_ms {
            builder = builder.with_update_status_interval_ms(interval_ms);
        }
        if let Some(api_url) = &self.api_url {
            builder = builder.with_api_url(api_url);
        }

        builder.build().context("Invalid configuration")
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Report lines go to stdout; keep diagnostics quiet unless asked for
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = cli.monitor_config()?;
    debug!(
        app = config.app_name(),
        owner = config.owner_name(),
        interval = ?config.update_status_interval(),
        "Resolved configuration"
    );

    match cli.command {
        Commands::Start { all } => {
            commands::start::run(config, all).await?;
        }
        Commands::Build { id } => {
            commands::builds::show(&config, id).await?;
        }
        Commands::Branches => {
            commands::branches::list(&config).await?;
        }
    }

    Ok(())
}
