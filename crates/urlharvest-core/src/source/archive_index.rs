//! Archive index (CDX server) source.

use crate::config::HttpSettings;

use super::{cdx, domain_pattern, http, FetchError, FetchOutcome, Source, SourceKind, WaybackRecord};

/// Queries a CDX search endpoint for every capture under a domain,
/// collapsed by URL key.
#[derive(Debug, Clone)]
pub struct ArchiveIndexSource {
    endpoint: String,
    http: HttpSettings,
}

impl ArchiveIndexSource {
    pub fn new(endpoint: impl Into<String>, http: HttpSettings) -> Self {
        Self {
            endpoint: endpoint.into(),
            http,
        }
    }
}

impl Source for ArchiveIndexSource {
    fn kind(&self) -> SourceKind {
        SourceKind::ArchiveIndex
    }

    fn fetch(&self, domain: &str, exclude_subdomains: bool) -> Result<FetchOutcome, FetchError> {
        let pattern = domain_pattern(domain, exclude_subdomains);
        let url = http::build_url(
            &self.endpoint,
            &[
                ("url", pattern.as_str()),
                ("output", "json"),
                ("collapse", "urlkey"),
            ],
        )?;
        let body = http::get(&url, &self.http)?;
        parse_response(&body)
    }
}

/// Maps CDX rows to records: field 1 is the timestamp, field 2 the original URL.
fn parse_response(body: &[u8]) -> Result<FetchOutcome, FetchError> {
    let parsed = cdx::parse_rows(body)?;
    let mut outcome = FetchOutcome {
        records: Vec::with_capacity(parsed.rows.len()),
        warnings: parsed.warnings,
    };
    for (position, fields) in parsed.rows {
        match fields.as_slice() {
            [_, timestamp, url, ..] => outcome
                .records
                .push(WaybackRecord::new(timestamp.as_str(), url.as_str())),
            short => outcome.warn(position, format!("row has {} fields, need 3", short.len())),
        }
    }
    Ok(outcome)
}
