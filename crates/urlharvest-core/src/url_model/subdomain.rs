//! Exact-host check used for subdomain exclusion.

use url::{Host, Url};

/// True when the host of `url` is not exactly `domain` (case-insensitive).
///
/// Unrelated hosts count as "subdomains" too. A URL that cannot be parsed
/// returns false so it is kept rather than silently dropped. `domain` goes
/// through the same IDNA mapping as the URL host, so `bücher.de` matches
/// `xn--bcher-kva.de`.
pub fn is_subdomain(url: &str, domain: &str) -> bool {
    let Ok(parsed) = Url::parse(url) else {
        return false;
    };
    let host = parsed.host().map(|h| host_text(&h)).unwrap_or_default();
    host != domain_text(domain)
}

fn host_text<S: AsRef<str>>(host: &Host<S>) -> String {
    match host {
        Host::Domain(d) => d.as_ref().to_lowercase(),
        Host::Ipv4(addr) => addr.to_string(),
        Host::Ipv6(addr) => addr.to_string(),
    }
}

/// The queried domain in host form; falls back to plain lower-casing when it
/// is not a valid host (e.g. a bare IPv6 address without brackets).
fn domain_text(domain: &str) -> String {
    match Host::parse(domain) {
        Ok(host) => host_text(&host),
        Err(_) => domain.to_lowercase(),
    }
}
