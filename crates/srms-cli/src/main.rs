use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use srms_core::{Role, SrmsConfig};

mod commands;
mod console;

#[derive(Parser, Debug)]
#[command(
    name = "srms",
    version,
    about = "Secure Student Records Management System console"
)]
struct Cli {
    /// Log filter, e.g. `info` or `srms_gateway=debug`. Overrides SRMS_LOG and RUST_LOG.
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the interactive console.
    Run {
        /// Configuration file. Defaults apply when it does not exist.
        #[arg(long, short = 'c', default_value = "srms.yaml")]
        config: PathBuf,

        /// Database URL, overriding the upstream section of the config.
        #[arg(long)]
        database_url: Option<String>,
    },

    /// Load the configuration and verify the database is reachable.
    Check {
        #[arg(long, short = 'c', default_value = "srms.yaml")]
        config: PathBuf,

        #[arg(long)]
        database_url: Option<String>,
    },

    /// Print the views each role can open.
    Views {
        /// Only show this role (Admin, Instructor, TA, Student, Guest).
        #[arg(long)]
        role: Option<Role>,

        /// Print JSON instead of a table.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.cmd {
        Command::Run {
            config,
            database_url,
        } => {
            let config = load_config(&config, database_url)?;
            init_tracing(cli.log_level.as_deref(), &config.logging.level);
            commands::run::run(config).await
        }
        Command::Check {
            config,
            database_url,
        } => {
            let config = load_config(&config, database_url)?;
            init_tracing(cli.log_level.as_deref(), &config.logging.level);
            commands::check::check(&config).await
        }
        Command::Views { role, json } => {
            init_tracing(cli.log_level.as_deref(), "warn");
            commands::views::views(role, json)
        }
    }
}

/// Load `path` (defaults if missing) and apply the `--database-url` override.
fn load_config(path: &Path, database_url: Option<String>) -> anyhow::Result<SrmsConfig> {
    let mut config = SrmsConfig::load_or_default(path)
        .with_context(|| format!("failed to load {}", path.display()))?;
    if let Some(url) = database_url {
        config.upstream.database_url_env = None;
        config.upstream.database_url = Some(url);
    }
    Ok(config)
}

/// `--log-level`, then `SRMS_LOG`, then `RUST_LOG`, then the config level.
fn init_tracing(cli_level: Option<&str>, config_level: &str) {
    let filter = match cli_level {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::try_from_env("SRMS_LOG")
            .or_else(|_| EnvFilter::try_from_default_env())
            .unwrap_or_else(|_| EnvFilter::new(config_level)),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
