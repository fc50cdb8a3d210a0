//! Scheme stripping.

use thiserror::Error;
use url::Url;

/// Why a raw URL could not be normalized.
#[derive(Debug, Error)]
pub enum NormalizeError {
    /// The input is not a syntactically valid absolute URL.
    #[error("invalid URL {raw:?}: {source}")]
    Parse {
        raw: String,
        #[source]
        source: url::ParseError,
    },
    /// The URL parsed but nothing is left once the scheme is removed.
    #[error("URL {raw:?} is empty without its scheme")]
    Empty { raw: String },
}

/// Strips the scheme from `raw` and the `//` left in front of the authority.
///
/// `raw` must parse as an absolute URL, but the result is cut from the input
/// text itself: host case, default ports, IDN labels and a missing root path
/// are kept as given.
///
/// # Examples
///
/// - `normalize("https://example.com/a")` → `"example.com/a"`
/// - `normalize("http://example.com")` → `"example.com"`
/// - `normalize("mailto:someone@example.com")` → `"someone@example.com"`
pub fn normalize(raw: &str) -> Result<String, NormalizeError> {
    let parsed = Url::parse(raw).map_err(|source| NormalizeError::Parse {
        raw: raw.to_string(),
        source,
    })?;

    let rest = after_scheme(raw, parsed.scheme()).unwrap_or_else(|| {
        // Input with tabs or newlines inside the scheme; the serialization
        // is always "<scheme>:<rest>".
        let serialized = parsed.as_str();
        &serialized[parsed.scheme().len() + 1..]
    });
    let rest = rest.strip_prefix("//").unwrap_or(rest);

    if rest.is_empty() {
        return Err(NormalizeError::Empty {
            raw: raw.to_string(),
        });
    }
    Ok(rest.to_string())
}

/// The input text after `<scheme>:`, ignoring the leading and trailing
/// control characters and spaces the parser also ignores.
fn after_scheme<'a>(raw: &'a str, scheme: &str) -> Option<&'a str> {
    let trimmed = raw.trim_matches(|c: char| c <= ' ');
    let prefix = trimmed.get(..scheme.len())?;
    let rest = trimmed.get(scheme.len()..)?.strip_prefix(':')?;
    prefix.eq_ignore_ascii_case(scheme).then_some(rest)
}
