//! Harvest orchestration: domains in sequence, sources per domain in parallel.

mod fan_in;
mod options;
mod output;

use std::sync::Arc;

use anyhow::Result;

use crate::config::HarvestConfig;
use crate::dedup::dedupe_by;
use crate::logging;
use crate::source::{ArchiveIndexSource, CrawlIndexSource, ReputationSource, Source};
use crate::versions::VersionsFetcher;

pub use options::FetchOptions;
pub use output::{capture_date, render_line, HarvestedUrl};

/// Fans each domain out to a fixed set of sources.
#[derive(Clone)]
pub struct Harvester {
    sources: Vec<Arc<dyn Source>>,
}

impl Harvester {
    pub fn new(sources: Vec<Arc<dyn Source>>) -> Self {
        Self { sources }
    }

    /// The standard sources: archive index, crawl index, reputation service.
    ///
    /// `api_key` is the reputation service credential; without it that
    /// source returns nothing.
    pub fn from_config(cfg: &HarvestConfig, api_key: Option<String>) -> Self {
        let endpoints = &cfg.endpoints;
        Self::new(vec![
            Arc::new(ArchiveIndexSource::new(
                endpoints.archive_index.clone(),
                cfg.http.clone(),
            )),
            Arc::new(CrawlIndexSource::new(
                endpoints.crawl_index.clone(),
                cfg.http.clone(),
            )),
            Arc::new(ReputationSource::new(
                endpoints.reputation.clone(),
                api_key,
                cfg.http.clone(),
            )),
        ])
    }

    /// All normalized (and, if requested, host-filtered) URLs for one domain,
    /// before any deduplication.
    pub async fn harvest_domain(&self, domain: &str, exclude_subdomains: bool) -> Vec<HarvestedUrl> {
        fan_in::harvest_domain(&self.sources, domain, exclude_subdomains).await
    }

    /// Harvests every domain in order and returns the deduplicated result set.
    ///
    /// Duplicates keep their first occurrence (and its timestamp).
    pub async fn run(&self, options: &FetchOptions) -> Vec<HarvestedUrl> {
        let mut results: Vec<HarvestedUrl> = Vec::new();
        for domain in &options.domains {
            if domain.is_empty() {
                tracing::info!("no domain entered; skipping");
                continue;
            }
            let found = self
                .harvest_domain(domain, options.exclude_subdomains)
                .await;
            tracing::info!(domain = %domain, urls = found.len(), "domain harvested");
            results.extend(found);
        }
        let total = results.len();
        let unique = dedupe_by(results, |h| h.url.as_str());
        tracing::debug!(total, unique = unique.len(), "result set deduplicated");
        unique
    }
}

/// Result of [`harvest`]: harvested URLs, or version URLs in versions mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HarvestOutput {
    Urls(Vec<HarvestedUrl>),
    Versions(Vec<String>),
}

impl HarvestOutput {
    /// Printable lines, honoring `include_dates` for harvested URLs.
    pub fn lines(&self, include_dates: bool) -> Vec<String> {
        match self {
            HarvestOutput::Urls(urls) => urls
                .iter()
                .map(|u| render_line(u, include_dates))
                .collect(),
            HarvestOutput::Versions(versions) => versions.clone(),
        }
    }
}

/// Initializes logging at the configured path, then harvests.
///
/// The only error is a log sink that cannot be opened; every per-domain and
/// per-source failure is logged and degrades to fewer results.
pub async fn harvest(
    options: &FetchOptions,
    cfg: &HarvestConfig,
    api_key: Option<String>,
) -> Result<HarvestOutput> {
    logging::init_logging(&cfg.log_path())?;

    if options.versions_only {
        let fetcher = VersionsFetcher::from_config(cfg);
        return Ok(HarvestOutput::Versions(
            fetcher.collect(&options.domains).await,
        ));
    }

    let harvester = Harvester::from_config(cfg, api_key);
    Ok(HarvestOutput::Urls(harvester.run(options).await))
}
