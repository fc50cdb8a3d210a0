//! One-shot HTTP GET via the curl crate (libcurl).

use std::time::Duration;

use url::Url;

use crate::config::HttpSettings;

use super::FetchError;

/// Builds `<base>?k=v&...`, percent-encoding the values.
pub(crate) fn build_url(base: &str, params: &[(&str, &str)]) -> Result<Url, FetchError> {
    Ok(Url::parse_with_params(base, params)?)
}

/// Performs a single GET and returns the whole body.
///
/// Follows redirects. No retry. Timeouts apply only when configured.
/// Runs in the current thread; call from `spawn_blocking` if used from async code.
pub(crate) fn get(url: &Url, settings: &HttpSettings) -> Result<Vec<u8>, FetchError> {
    let mut body: Vec<u8> = Vec::new();

    let mut easy = curl::easy::Easy::new();
    easy.url(url.as_str())?;
    easy.follow_location(true)?;
    if let Some(secs) = settings.connect_timeout_secs {
        easy.connect_timeout(Duration::from_secs(secs))?;
    }
    if let Some(secs) = settings.timeout_secs {
        easy.timeout(Duration::from_secs(secs))?;
    }
    if let Some(agent) = settings.user_agent.as_deref() {
        easy.useragent(agent)?;
    }

    {
        let mut transfer = easy.transfer();
        transfer.write_function(|data| {
            body.extend_from_slice(data);
            Ok(data.len())
        })?;
        transfer.perform()?;
    }

    let code = easy.response_code()?;
    if !(200..300).contains(&code) {
        return Err(FetchError::Http {
            status: code,
            endpoint: redacted(url),
        });
    }

    Ok(body)
}

/// URL without query or fragment (the query may carry an API key).
fn redacted(url: &Url) -> String {
    let mut u = url.clone();
    u.set_query(None);
    u.set_fragment(None);
    u.to_string()
}
