//! Source fetchers: one per external archive/index service.
//!
//! Each source answers "which URLs have you seen under this domain" with a
//! single blocking request. Records that fail to decode individually are
//! returned as warnings next to the ones that did; only a failure of the
//! request or of the response as a whole is a [`FetchError`].

mod archive_index;
pub(crate) mod cdx;
mod crawl_index;
mod error;
pub(crate) mod http;
mod reputation;

use std::fmt;

pub use archive_index::ArchiveIndexSource;
pub use crawl_index::CrawlIndexSource;
pub use error::FetchError;
pub use reputation::ReputationSource;

/// One captured URL as reported by a source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WaybackRecord {
    /// Source-specific capture time; empty when the source has none.
    pub timestamp: String,
    /// Raw URL, scheme included.
    pub url: String,
}

impl WaybackRecord {
    pub fn new(timestamp: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            timestamp: timestamp.into(),
            url: url.into(),
        }
    }
}

/// A record that was skipped while decoding an otherwise valid response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordWarning {
    /// Row, line, or entry index within the response.
    pub position: usize,
    pub reason: String,
}

/// Successful fetch: decoded records plus anything skipped along the way.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchOutcome {
    pub records: Vec<WaybackRecord>,
    pub warnings: Vec<RecordWarning>,
}

impl FetchOutcome {
    pub(crate) fn warn(&mut self, position: usize, reason: impl Into<String>) {
        self.warnings.push(RecordWarning {
            position,
            reason: reason.into(),
        });
    }
}

/// Which service a source talks to (used in logs and reports).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceKind {
    ArchiveIndex,
    CrawlIndex,
    Reputation,
    /// Anything supplied by an embedding application.
    Custom(&'static str),
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceKind::ArchiveIndex => write!(f, "archive-index"),
            SourceKind::CrawlIndex => write!(f, "crawl-index"),
            SourceKind::Reputation => write!(f, "reputation"),
            SourceKind::Custom(name) => write!(f, "{}", name),
        }
    }
}

/// A single-attempt, blocking query against one data source.
pub trait Source: Send + Sync {
    fn kind(&self) -> SourceKind;

    /// Fetch every URL the source knows under `domain`. When
    /// `exclude_subdomains` is false the query also covers `*.domain`.
    fn fetch(&self, domain: &str, exclude_subdomains: bool) -> Result<FetchOutcome, FetchError>;
}

/// Query pattern for "everything under domain", with or without subdomains.
pub(crate) fn domain_pattern(domain: &str, exclude_subdomains: bool) -> String {
    if exclude_subdomains {
        format!("{}/*", domain)
    } else {
        format!("*.{}/*", domain)
    }
}
