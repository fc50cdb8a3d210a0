//! CLI for the urlharvest historical URL harvester.

mod commands;
mod input;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use urlharvest_core::config::{self, HarvestConfig};
use urlharvest_core::logging;

use commands::{run_fetch, run_show_config, FetchArgs};

/// Top-level CLI for urlharvest.
#[derive(Debug, Parser)]
#[command(name = "urlharvest")]
#[command(about = "urlharvest: collect historical URLs for domains from public archives", long_about = None)]
pub struct Cli {
    /// Use this config file instead of ~/.config/urlharvest/config.toml.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Fetch known URLs for domains (read from stdin, one per line, when none are given).
    Fetch {
        /// Domains to harvest.
        domains: Vec<String>,

        /// Show the capture date of each URL in the first column.
        #[arg(long)]
        dates: bool,

        /// Don't include subdomains of the target domain.
        #[arg(long)]
        no_subs: bool,

        /// List URLs for crawled versions of the input URL(s) instead.
        #[arg(long)]
        get_versions: bool,

        /// Log file (default: config `log_path`, else logs/urlharvest.log).
        #[arg(long, value_name = "PATH")]
        log_file: Option<PathBuf>,

        /// API key for the reputation service; that source is skipped without it.
        #[arg(long, env = "VT_API_KEY", hide_env_values = true, value_name = "KEY")]
        vt_api_key: Option<String>,
    },

    /// Show the config file path and the effective configuration.
    Config,
}

/// Loads the config named by `--config`, or the default one (created if missing).
fn load_config(path: Option<&PathBuf>) -> Result<HarvestConfig> {
    match path {
        Some(p) => config::load_from_path(p),
        None => config::load_or_init(),
    }
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        // The log file comes from the config, so config loading logs to stderr.
        let mut cfg = logging::with_stderr_logging(|| load_config(cli.config.as_ref()))?;

        match cli.command {
            CliCommand::Fetch {
                domains,
                dates,
                no_subs,
                get_versions,
                log_file,
                vt_api_key,
            } => {
                if let Some(path) = log_file {
                    cfg.log_path = Some(path);
                }
                let args = FetchArgs {
                    domains,
                    dates,
                    no_subs,
                    get_versions,
                    vt_api_key,
                };
                run_fetch(&cfg, args).await?;
            }
            CliCommand::Config => {
                logging::init_logging_stderr();
                run_show_config(cli.config.as_deref(), &cfg)?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
