//! Buzzer: Buzzheavier uploader entry point.

mod app;
mod config;
mod cookies;
mod render;

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

/// Uploads a file, or every file of a directory, to Buzzheavier.
#[derive(Debug, Parser)]
#[command(name = "buzzer", version, about)]
pub struct Cli {
    /// File or directory to upload.
    pub path: PathBuf,

    /// Cookies file path (Netscape format).
    #[arg(long)]
    pub cookies: Option<PathBuf>,

    /// Folder ID to upload into.
    #[arg(long)]
    pub folder: Option<String>,

    /// Service base URL.
    #[arg(long)]
    pub base_url: Option<String>,

    /// Configuration file (default: ~/.config/buzzer/buzzer.toml).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "starting buzzer");

    let config = config::Config::load(cli.config.as_deref())?;

    let rt = tokio::runtime::Runtime::new()?;
    if let Err(e) = rt.block_on(app::run(cli, config)) {
        tracing::error!(error = %format!("{e:#}"), "upload failed");
        std::process::exit(1);
    }

    Ok(())
}
