//! `urlharvest config` – print where the config lives and what it says.

use anyhow::Result;
use std::path::Path;
use urlharvest_core::config::{self, HarvestConfig};

pub fn run_show_config(explicit: Option<&Path>, cfg: &HarvestConfig) -> Result<()> {
    let path = match explicit {
        Some(p) => p.to_path_buf(),
        None => config::config_path()?,
    };
    println!("config: {}", path.display());
    println!("log file: {}", cfg.log_path().display());
    println!("archive index: {}", cfg.endpoints.archive_index);
    println!("crawl index: {}", cfg.endpoints.crawl_index);
    println!("reputation: {}", cfg.endpoints.reputation);
    println!("archive replay: {}", cfg.endpoints.archive_replay);
    Ok(())
}
