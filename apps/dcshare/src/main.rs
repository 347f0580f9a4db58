//! dcshare: data-channel file sharing over an in-process loopback link.

mod app;
mod config;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::config::Config;

#[derive(Debug, Parser)]
#[command(name = "dcshare", version, about = "Data-channel file sharing")]
struct Cli {
    /// Configuration file (defaults to the platform config directory).
    #[arg(long, env = "DCSHARE_CONFIG", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Send files through a loopback session and save what arrives.
    Send {
        /// Files to send.
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Stream to publish on; also pins the receiver to it.
        #[arg(long)]
        stream_id: Option<String>,

        /// Where received files are saved.
        #[arg(long)]
        download_dir: Option<PathBuf>,
    },
    /// Print the effective configuration.
    Config,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config_path = cli.config.unwrap_or_else(config::default_config_path);
    let mut config = Config::load(&config_path)?;
    tracing::debug!(path = %config_path.display(), "configuration loaded");

    match cli.command {
        Command::Send {
            files,
            stream_id,
            download_dir,
        } => {
            if let Some(id) = stream_id {
                config.file_share.stream_id = Some(id);
            }
            let stream_id = config
                .file_share
                .stream_id
                .clone()
                .unwrap_or_else(|| app::DEFAULT_STREAM_ID.to_string());
            let download_dir =
                download_dir.unwrap_or_else(|| config.file_share.download_dir.clone());

            tracing::info!(
                stream_id = %stream_id,
                files = files.len(),
                download_dir = %download_dir.display(),
                "starting loopback session"
            );

            let report = app::run(&config, stream_id, &files, download_dir).await?;
            for path in &report.saved {
                println!("{}", path.display());
            }
            tracing::info!(
                sent = report.sent,
                failed = report.failed,
                saved = report.saved.len(),
                "session finished"
            );
            if report.failed > 0 {
                anyhow::bail!("{} file(s) could not be sent", report.failed);
            }
        }
        Command::Config => {
            println!("# {}", config_path.display());
            print!("{}", toml::to_string_pretty(&config)?);
        }
    }

    Ok(())
}
