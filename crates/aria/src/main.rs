// SPDX-FileCopyrightText: 2026 Aria Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Aria - deviation-aware opening hours.
//!
//! This is the binary entry point for the Aria CLI.

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

mod migrate;
mod resolve;
mod show_config;

use std::path::PathBuf;

use aria_config::AriaConfig;
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};

/// Aria - deviation-aware opening hours.
#[derive(Parser, Debug)]
#[command(name = "aria", version, about, long_about = None)]
struct Cli {
    /// Read configuration from this file instead of the standard locations.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Resolve a schedule's opening hours, applying any active deviation.
    Resolve {
        /// Schedule id.
        schedule_id: i64,
        /// Resolve at this instant (RFC 3339) instead of now.
        #[arg(long)]
        at: Option<DateTime<Utc>>,
        /// Print the JSON response instead of a table.
        #[arg(long)]
        json: bool,
        /// Disable colors.
        #[arg(long)]
        plain: bool,
    },
    /// Create the database and apply pending migrations.
    Migrate,
    /// Print the effective configuration as TOML.
    Config,
}

fn load_config(path: Option<&PathBuf>) -> AriaConfig {
    let loaded = match path {
        Some(path) => aria_config::load_and_validate_path(path),
        None => aria_config::load_and_validate(),
    };
    match loaded {
        Ok(config) => config,
        Err(errors) => {
            aria_config::render_errors(&errors);
            std::process::exit(1);
        }
    }
}

/// Initialize tracing with an EnvFilter. Logs go to stderr so `--json`
/// output stays machine-readable.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("aria={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let config = load_config(cli.config.as_ref());
    init_tracing(&config.log.level);

    let result = match cli.command {
        Commands::Resolve {
            schedule_id,
            at,
            json,
            plain,
        } => {
            let at = at.unwrap_or_else(Utc::now);
            resolve::run_resolve(&config, schedule_id, at, json, plain).await
        }
        Commands::Migrate => migrate::run_migrate(&config).await,
        Commands::Config => show_config::run_config(&config),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
