//! Per-domain fan-out to every source and fan-in through one channel.
//!
//! Fetchers run on the blocking pool and push records onto an unbounded
//! channel. A supervisor task holds the last sender and drops it only after
//! every fetcher has been joined, which is what ends the drain loop.

use std::sync::Arc;

use tokio::sync::mpsc::{self, UnboundedSender};
use tokio::task::JoinSet;

use crate::source::{FetchError, FetchOutcome, RecordWarning, Source, SourceKind, WaybackRecord};
use crate::url_model::{is_subdomain, normalize, NormalizeError};

use super::HarvestedUrl;

/// What one fetcher did for one domain.
#[derive(Debug)]
pub(crate) struct FetchReport {
    pub kind: SourceKind,
    /// Number of records sent, plus per-record warnings; or the fetch error.
    pub result: Result<(usize, Vec<RecordWarning>), FetchError>,
}

impl FetchReport {
    fn log(&self, domain: &str) {
        let source = self.kind.to_string();
        match &self.result {
            Ok((records, warnings)) => {
                tracing::debug!(domain, source = %source, records, "fetch finished");
                for w in warnings {
                    tracing::warn!(
                        domain,
                        source = %source,
                        position = w.position,
                        "skipped record: {}",
                        w.reason
                    );
                }
            }
            Err(e) => tracing::warn!(domain, source = %source, "fetch failed: {}", e),
        }
    }
}

fn run_fetcher(
    source: &dyn Source,
    domain: &str,
    exclude_subdomains: bool,
    tx: &UnboundedSender<WaybackRecord>,
) -> FetchReport {
    let kind = source.kind();
    let result = source
        .fetch(domain, exclude_subdomains)
        .map(|FetchOutcome { records, warnings }| {
            let count = records.len();
            for record in records {
                if tx.send(record).is_err() {
                    break;
                }
            }
            (count, warnings)
        });
    FetchReport { kind, result }
}

async fn supervise(
    mut fetchers: JoinSet<FetchReport>,
    close: UnboundedSender<WaybackRecord>,
    domain: String,
) -> Vec<FetchReport> {
    let mut reports = Vec::with_capacity(fetchers.len());
    while let Some(joined) = fetchers.join_next().await {
        match joined {
            Ok(report) => {
                report.log(&domain);
                reports.push(report);
            }
            Err(e) => tracing::error!(domain = %domain, "fetcher task failed: {}", e),
        }
    }
    drop(close);
    reports
}

/// Runs every source for `domain` concurrently and returns the filtered,
/// normalized URLs in arrival order. Never fails: a failing source just
/// contributes nothing.
pub(crate) async fn harvest_domain(
    sources: &[Arc<dyn Source>],
    domain: &str,
    exclude_subdomains: bool,
) -> Vec<HarvestedUrl> {
    let (tx, mut rx) = mpsc::unbounded_channel::<WaybackRecord>();

    let mut fetchers = JoinSet::new();
    for source in sources {
        let source = Arc::clone(source);
        let tx = tx.clone();
        let domain = domain.to_string();
        fetchers.spawn_blocking(move || {
            run_fetcher(source.as_ref(), &domain, exclude_subdomains, &tx)
        });
    }
    let supervisor = tokio::spawn(supervise(fetchers, tx, domain.to_string()));

    let mut found = Vec::new();
    while let Some(record) = rx.recv().await {
        if exclude_subdomains && is_subdomain(&record.url, domain) {
            continue;
        }
        match normalize(&record.url) {
            Ok(url) => found.push(HarvestedUrl {
                url,
                timestamp: record.timestamp,
            }),
            Err(e @ NormalizeError::Parse { .. }) => tracing::info!(domain, "{}", e),
            Err(e) => tracing::error!(domain, "unexpected error: {}", e),
        }
    }

    match supervisor.await {
        Ok(reports) => {
            let failed = reports.iter().filter(|r| r.result.is_err()).count();
            tracing::debug!(domain, sources = reports.len(), failed, urls = found.len(), "domain drained");
        }
        Err(e) => tracing::error!(domain, "fetch supervisor failed: {}", e),
    }

    found
}
