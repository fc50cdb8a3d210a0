//! Reputation service source (domain report with detected URLs).

use serde_json::{Map, Value};

use crate::config::HttpSettings;

use super::{http, FetchError, FetchOutcome, Source, SourceKind, WaybackRecord};

/// Queries a domain report and harvests its `detected_urls` list.
///
/// Without an API key the source is inert: every fetch returns an empty
/// outcome and no request is made.
#[derive(Clone)]
pub struct ReputationSource {
    endpoint: String,
    api_key: Option<String>,
    http: HttpSettings,
}

impl std::fmt::Debug for ReputationSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReputationSource")
            .field("endpoint", &self.endpoint)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl ReputationSource {
    pub fn new(endpoint: impl Into<String>, api_key: Option<String>, http: HttpSettings) -> Self {
        Self {
            endpoint: endpoint.into(),
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            http,
        }
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }
}

impl Source for ReputationSource {
    fn kind(&self) -> SourceKind {
        SourceKind::Reputation
    }

    fn fetch(&self, domain: &str, _exclude_subdomains: bool) -> Result<FetchOutcome, FetchError> {
        let Some(api_key) = self.api_key.as_deref() else {
            tracing::debug!(domain, "no reputation API key; skipping");
            return Ok(FetchOutcome::default());
        };
        let url = http::build_url(&self.endpoint, &[("apikey", api_key), ("domain", domain)])?;
        let body = http::get(&url, &self.http)?;
        parse_response(&body)
    }
}

/// Entry URL: `{"url": "..."}` objects, or `["url", ...]` rows.
fn entry_url(entry: &Value) -> Option<&str> {
    match entry {
        Value::Object(fields) => fields.get("url").and_then(Value::as_str),
        Value::Array(fields) => fields.first().and_then(Value::as_str),
        _ => None,
    }
}

fn parse_response(body: &[u8]) -> Result<FetchOutcome, FetchError> {
    let report: Map<String, Value> = serde_json::from_slice(body)?;
    let mut outcome = FetchOutcome::default();

    let entries = match report.get("detected_urls") {
        None | Some(Value::Null) => return Ok(outcome),
        Some(Value::Array(entries)) => entries,
        Some(_) => {
            outcome.warn(0, "detected_urls is not a list");
            return Ok(outcome);
        }
    };

    for (position, entry) in entries.iter().enumerate() {
        match entry_url(entry) {
            Some(url) => outcome.records.push(WaybackRecord::new("", url)),
            None => outcome.warn(position, "entry has no url"),
        }
    }
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_api_key_returns_empty_without_request() {
        // The endpoint is unroutable; reaching the network would fail the test.
        let source = ReputationSource::new("http://0.0.0.0:1/report", None, HttpSettings::default());
        assert!(!source.has_api_key());
        let outcome = source.fetch("example.com", false).unwrap();
        assert!(outcome.records.is_empty());
        assert!(outcome.warnings.is_empty());
    }

    #[test]
    fn blank_api_key_counts_as_absent() {
        let source = ReputationSource::new(
            "http://0.0.0.0:1/report",
            Some("   ".to_string()),
            HttpSettings::default(),
        );
        assert!(!source.has_api_key());
    }

    #[test]
    fn debug_hides_api_key() {
        let source = ReputationSource::new(
            "https://vt.example/report",
            Some("topsecret".to_string()),
            HttpSettings::default(),
        );
        assert!(!format!("{:?}", source).contains("topsecret"));
    }

    #[test]
    fn detected_urls_have_no_timestamp() {
        let body = br#"{
            "response_code": 1,
            "detected_urls": [
                {"url": "http://example.com/bad", "positives": 3, "total": 70, "scan_date": "2018-03-26 09:22:43"},
                {"url": "https://sub.example.com/worse", "positives": 9, "total": 70}
            ]
        }"#;
        let outcome = parse_response(body).unwrap();
        assert_eq!(
            outcome.records,
            vec![
                WaybackRecord::new("", "http://example.com/bad"),
                WaybackRecord::new("", "https://sub.example.com/worse"),
            ]
        );
    }

    #[test]
    fn entries_without_url_are_warnings() {
        let body = br#"{"detected_urls": [{"positives": 1}, ["http://example.com/row", 1, 70], 42]}"#;
        let outcome = parse_response(body).unwrap();
        assert_eq!(outcome.records.len(), 1);
        assert_eq!(outcome.records[0].url, "http://example.com/row");
        let positions: Vec<usize> = outcome.warnings.iter().map(|w| w.position).collect();
        assert_eq!(positions, vec![0, 2]);
    }

    #[test]
    fn missing_list_is_empty() {
        let outcome = parse_response(br#"{"response_code": 0, "verbose_msg": "Domain not found"}"#)
            .unwrap();
        assert!(outcome.records.is_empty());
    }

    #[test]
    fn non_object_body_is_an_error() {
        assert!(matches!(parse_response(b"[]"), Err(FetchError::Decode(_))));
        assert!(matches!(parse_response(b""), Err(FetchError::Decode(_))));
    }
}
