//! Per-invocation harvest options.

/// Immutable options for one harvest run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchOptions {
    /// Targets in the order they are processed. Empty entries are skipped.
    pub domains: Vec<String>,
    /// Prefix each rendered URL with its capture date when one is known.
    pub include_dates: bool,
    /// Keep only URLs whose host is exactly the queried domain.
    pub exclude_subdomains: bool,
    /// Treat `domains` as URLs and list their archived versions instead.
    pub versions_only: bool,
}

impl FetchOptions {
    pub fn new(
        domains: Vec<String>,
        include_dates: bool,
        exclude_subdomains: bool,
        versions_only: bool,
    ) -> Self {
        Self {
            domains,
            include_dates,
            exclude_subdomains,
            versions_only,
        }
    }

    /// All flags off.
    pub fn with_domains(domains: Vec<String>) -> Self {
        Self::new(domains, false, false, false)
    }
}
