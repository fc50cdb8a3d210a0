//! Fetch error type for a single source request.

use thiserror::Error;

/// Why a source produced nothing for a domain.
///
/// Per-record problems are not errors; they are reported as
/// [`RecordWarning`](super::RecordWarning)s next to the records that did decode.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The configured endpoint is not a valid base URL.
    #[error("invalid endpoint: {0}")]
    InvalidEndpoint(#[from] url::ParseError),
    /// Curl reported an error (DNS, connect, TLS, read).
    #[error("transport: {0}")]
    Transport(#[from] curl::Error),
    /// Response had a non-2xx status. `endpoint` never includes the query string.
    #[error("{endpoint} returned HTTP {status}")]
    Http { status: u32, endpoint: String },
    /// The response body as a whole could not be decoded.
    #[error("malformed response: {0}")]
    Decode(#[from] serde_json::Error),
}
