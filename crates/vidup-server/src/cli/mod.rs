//! CLI for the vidup upload service.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use vidup_core::config::{self, VidupConfig};

use commands::{run_serve, run_show_config};

/// Top-level CLI for the vidup upload service.
#[derive(Debug, Parser)]
#[command(name = "vidup")]
#[command(about = "vidup: streaming video upload server", long_about = None)]
pub struct Cli {
    /// Read configuration from this file instead of ~/.config/vidup/config.toml.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Run the HTTP upload server.
    Serve {
        /// Address to bind, e.g. 127.0.0.1:8000.
        #[arg(long, value_name = "ADDR")]
        listen: Option<String>,
        /// Directory uploads are stored in.
        #[arg(long, value_name = "DIR")]
        upload_dir: Option<PathBuf>,
        /// Maximum accepted upload size in bytes.
        #[arg(long, value_name = "BYTES")]
        max_file_size: Option<u64>,
    },

    /// Print the config file location and the effective configuration.
    Config,
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = match &cli.config {
            Some(path) => config::load_from_path(path)?,
            None => config::load_or_init()?,
        };
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Serve {
                listen,
                upload_dir,
                max_file_size,
            } => {
                let cfg = apply_overrides(cfg, listen, upload_dir, max_file_size)?;
                run_serve(&cfg).await?;
            }
            CliCommand::Config => run_show_config(cli.config.as_deref(), &cfg)?,
        }

        Ok(())
    }
}

/// Command-line flags win over file values.
fn apply_overrides(
    mut cfg: VidupConfig,
    listen: Option<String>,
    upload_dir: Option<PathBuf>,
    max_file_size: Option<u64>,
) -> Result<VidupConfig> {
    if let Some(addr) = listen {
        cfg.listen_addr = addr;
    }
    if let Some(dir) = upload_dir {
        cfg.upload_dir = dir;
    }
    if let Some(bytes) = max_file_size {
        cfg.max_file_size_bytes = bytes;
    }
    cfg.validate()?;
    Ok(cfg)
}

#[cfg(test)]
mod tests;
