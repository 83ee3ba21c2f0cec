//! Command-line interface for docuscan.

pub mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::{load_settings_with_options, LoadOptions};

/// Document scan orchestration demo and diagnostics.
#[derive(Debug, Parser)]
#[command(name = "docuscan", version, about)]
pub struct Cli {
    /// Path to a JSON config file.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Resolve relative config paths against the current directory.
    #[arg(long, global = true)]
    pub cwd: bool,

    /// Override the output directory for captured pages.
    #[arg(long, global = true)]
    pub output_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run a scan against the simulated capability pair.
    Scan(commands::ScanArgs),
}

/// Parse CLI arguments and run the selected command.
pub async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let settings = load_settings_with_options(LoadOptions {
        config_path: cli.config.clone(),
        use_cwd: cli.cwd,
        output_dir: cli.output_dir.clone(),
    })
    .await;

    match cli.command {
        Command::Scan(args) => commands::cmd_scan(&settings, args).await,
    }
}
