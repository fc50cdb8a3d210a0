//! Versions mode: list the archived captures of specific URLs.
//!
//! For each target the archive index returns every capture; captures with a
//! content digest already seen for that target are dropped, so each distinct
//! body is listed once as a replay URL.

use std::collections::HashSet;

use tokio::task::JoinSet;

use crate::config::{HarvestConfig, HttpSettings};
use crate::source::cdx;
use crate::source::http;
use crate::source::{FetchError, RecordWarning};

/// Field indexes in a default CDX row.
const TIMESTAMP: usize = 1;
const ORIGINAL: usize = 2;
const DIGEST: usize = 5;

/// Replay URLs for one target, plus rows that could not be used.
#[derive(Debug, Default)]
pub struct Versions {
    pub urls: Vec<String>,
    pub warnings: Vec<RecordWarning>,
}

#[derive(Debug, Clone)]
pub struct VersionsFetcher {
    index_endpoint: String,
    replay_prefix: String,
    http: HttpSettings,
}

impl VersionsFetcher {
    pub fn new(
        index_endpoint: impl Into<String>,
        replay_prefix: impl Into<String>,
        http: HttpSettings,
    ) -> Self {
        Self {
            index_endpoint: index_endpoint.into(),
            replay_prefix: replay_prefix.into(),
            http,
        }
    }

    pub fn from_config(cfg: &HarvestConfig) -> Self {
        Self::new(
            cfg.endpoints.archive_index.clone(),
            cfg.endpoints.archive_replay.clone(),
            cfg.http.clone(),
        )
    }

    /// One blocking request for the captures of `target`.
    pub fn fetch(&self, target: &str) -> Result<Versions, FetchError> {
        let url = http::build_url(&self.index_endpoint, &[("url", target), ("output", "json")])?;
        let body = http::get(&url, &self.http)?;
        parse_versions(&body, &self.replay_prefix)
    }

    /// Fetches all targets concurrently; output keeps target order.
    /// A failing or empty target is logged and contributes nothing.
    pub async fn collect(&self, targets: &[String]) -> Vec<String> {
        let mut tasks = JoinSet::new();
        for (index, target) in targets.iter().enumerate() {
            if target.is_empty() {
                tracing::info!("no URL entered; skipping");
                continue;
            }
            let fetcher = self.clone();
            let target = target.clone();
            tasks.spawn_blocking(move || {
                let result = fetcher.fetch(&target);
                (index, target, result)
            });
        }

        let mut per_target: Vec<Vec<String>> = vec![Vec::new(); targets.len()];
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((index, target, Ok(versions))) => {
                    for w in &versions.warnings {
                        tracing::warn!(url = %target, position = w.position, "skipped row: {}", w.reason);
                    }
                    per_target[index] = versions.urls;
                }
                Ok((_, target, Err(e))) => {
                    tracing::warn!(url = %target, "versions fetch failed: {}", e)
                }
                Err(e) => tracing::error!("versions task failed: {}", e),
            }
        }
        per_target.into_iter().flatten().collect()
    }
}

fn parse_versions(body: &[u8], replay_prefix: &str) -> Result<Versions, FetchError> {
    let parsed = cdx::parse_rows(body)?;
    let prefix = replay_prefix.trim_end_matches('/');
    let mut seen_digests: HashSet<String> = HashSet::new();
    let mut out = Versions {
        urls: Vec::new(),
        warnings: parsed.warnings,
    };
    for (position, fields) in parsed.rows {
        if fields.len() <= DIGEST {
            out.warnings.push(RecordWarning {
                position,
                reason: format!("row has {} fields, need {}", fields.len(), DIGEST + 1),
            });
            continue;
        }
        if !seen_digests.insert(fields[DIGEST].clone()) {
            continue;
        }
        out.urls.push(format!(
            "{}/{}if_/{}",
            prefix, fields[TIMESTAMP], fields[ORIGINAL]
        ));
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    const BODY: &str = r#"[
        ["urlkey","timestamp","original","mimetype","statuscode","digest","length"],
        ["com,example)/","20100101000000","http://example.com/","text/html","200","D1","10"],
        ["com,example)/","20110101000000","http://example.com/","text/html","200","D1","10"],
        ["com,example)/","20120101000000","http://example.com/","text/html","200","D2","11"]
    ]"#;

    #[test]
    fn one_replay_url_per_digest() {
        let v = parse_versions(BODY.as_bytes(), "https://web.archive.org/web").unwrap();
        assert_eq!(
            v.urls,
            vec![
                "https://web.archive.org/web/20100101000000if_/http://example.com/".to_string(),
                "https://web.archive.org/web/20120101000000if_/http://example.com/".to_string(),
            ]
        );
    }

    #[test]
    fn trailing_slash_on_prefix_is_ignored() {
        let v = parse_versions(BODY.as_bytes(), "https://web.archive.org/web/").unwrap();
        assert!(v.urls[0].starts_with("https://web.archive.org/web/2010"));
    }

    #[test]
    fn short_rows_are_warnings() {
        let body = r#"[["h"],["k","1","http://example.com/"],["k","2","http://example.com/","t","200","D","1"]]"#;
        let v = parse_versions(body.as_bytes(), "r").unwrap();
        assert_eq!(v.urls, vec!["r/2if_/http://example.com/".to_string()]);
        assert_eq!(v.warnings.len(), 1);
        assert_eq!(v.warnings[0].position, 1);
    }

    #[tokio::test]
    async fn collect_skips_empty_and_failing_targets() {
        let fetcher = VersionsFetcher::new("::bad endpoint::", "r", HttpSettings::default());
        let out = fetcher
            .collect(&["".to_string(), "http://example.com/".to_string()])
            .await;
        assert!(out.is_empty());
    }
}
