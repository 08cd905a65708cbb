//! `transfers-admin`: admin API server and backup tooling.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;

#[derive(Parser)]
#[command(name = "transfers-admin")]
#[command(version, about = "Admin backend for the Transfers platform")]
struct Cli {
    /// Config file (default: ~/.transfers-admin/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the admin API and the automatic backup scheduler
    Serve {
        /// Port to listen on (overrides config and PORT)
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Manage backups without a running server
    Backup {
        #[command(subcommand)]
        action: BackupAction,
    },
    /// Replace operational collections with the demo dataset
    Seed,
}

#[derive(Subcommand)]
pub enum BackupAction {
    /// Take a manual snapshot of every collection
    Create,
    /// List backups, newest first
    List,
    /// Delete a backup and its artifact
    Delete {
        /// Backup id
        id: String,
    },
    /// Replace live collections with a backup's contents
    Restore {
        /// Backup id
        id: String,
    },
    /// Show or change automatic backup settings
    Settings {
        /// Enable or disable automatic backups
        #[arg(long)]
        enabled: Option<bool>,
        /// Hours between automatic backups
        #[arg(long, allow_negative_numbers = true)]
        interval_hours: Option<i64>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = cli.config.as_deref();

    match cli.command {
        Commands::Serve { port } => commands::serve::execute(config, port).await,
        Commands::Backup { action } => commands::backup::execute(config, action).await,
        Commands::Seed => commands::seed::execute(config).await,
    }
}
