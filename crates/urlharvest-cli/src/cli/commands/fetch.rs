//! `urlharvest fetch` – harvest URLs (or versions) and print one per line.

use anyhow::Result;
use std::io::{self, Write};
use urlharvest_core::config::HarvestConfig;
use urlharvest_core::{harvest, FetchOptions};

use crate::cli::input;

#[derive(Debug)]
pub struct FetchArgs {
    pub domains: Vec<String>,
    pub dates: bool,
    pub no_subs: bool,
    pub get_versions: bool,
    pub vt_api_key: Option<String>,
}

pub async fn run_fetch(cfg: &HarvestConfig, args: FetchArgs) -> Result<()> {
    let domains = if args.domains.is_empty() {
        input::read_domains(io::stdin().lock())?
    } else {
        args.domains
    };

    let options = FetchOptions::new(domains, args.dates, args.no_subs, args.get_versions);
    let output = harvest(&options, cfg, args.vt_api_key).await?;

    let lines = output.lines(options.include_dates);
    tracing::info!("printing {} lines", lines.len());

    let stdout = io::stdout();
    let mut out = stdout.lock();
    for line in lines {
        writeln!(out, "{}", line)?;
    }
    out.flush()?;
    Ok(())
}
