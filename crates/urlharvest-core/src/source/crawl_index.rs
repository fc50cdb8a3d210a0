//! Crawl index source (newline-delimited JSON).

use serde::Deserialize;

use crate::config::HttpSettings;

use super::{domain_pattern, http, FetchError, FetchOutcome, Source, SourceKind, WaybackRecord};

#[derive(Debug, Deserialize)]
struct CrawlLine {
    url: String,
    #[serde(default)]
    timestamp: String,
}

/// Queries a crawl index collection for every capture under a domain.
#[derive(Debug, Clone)]
pub struct CrawlIndexSource {
    endpoint: String,
    http: HttpSettings,
}

impl CrawlIndexSource {
    pub fn new(endpoint: impl Into<String>, http: HttpSettings) -> Self {
        Self {
            endpoint: endpoint.into(),
            http,
        }
    }
}

impl Source for CrawlIndexSource {
    fn kind(&self) -> SourceKind {
        SourceKind::CrawlIndex
    }

    fn fetch(&self, domain: &str, exclude_subdomains: bool) -> Result<FetchOutcome, FetchError> {
        let pattern = domain_pattern(domain, exclude_subdomains);
        let url = http::build_url(
            &self.endpoint,
            &[("url", pattern.as_str()), ("output", "json")],
        )?;
        let body = http::get(&url, &self.http)?;
        Ok(parse_response(&body))
    }
}

/// Decodes each line on its own; a bad line is a warning (1-based line number).
fn parse_response(body: &[u8]) -> FetchOutcome {
    let mut outcome = FetchOutcome::default();
    for (index, line) in body.split(|b| *b == b'\n').enumerate() {
        if line.iter().all(u8::is_ascii_whitespace) {
            continue;
        }
        match serde_json::from_slice::<CrawlLine>(line) {
            Ok(entry) => outcome
                .records
                .push(WaybackRecord::new(entry.timestamp, entry.url)),
            Err(e) => outcome.warn(index + 1, e.to_string()),
        }
    }
    outcome
}
