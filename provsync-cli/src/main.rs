//! provsync — keep a Grist table synchronized with provider records.
//!
//! # Usage
//!
//! ```text
//! provsync sync        # one extraction-and-sync pass, then exit
//! provsync reset-db    # reseed the provider collections (dev/test only)
//! ```
//!
//! There are no flags: behavior is entirely driven by environment
//! configuration, and the process exits non-zero when a mandatory variable
//! is missing.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "provsync",
    version,
    about = "Synchronize identity/service provider records into Grist",
    long_about = None,
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the full extraction-and-sync pipeline once.
    Sync,

    /// Reset the provider collections to the fixture set (dev/test only).
    ResetDb,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Sync => commands::sync::run(),
        Commands::ResetDb => commands::reset_db::run(),
    }
}
