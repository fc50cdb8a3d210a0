//! Harvested URL values and their printable form.

use chrono::{NaiveDate, SecondsFormat};

/// A normalized URL plus the capture timestamp of the record it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HarvestedUrl {
    /// Scheme-less URL, e.g. `example.com/a`.
    pub url: String,
    /// Raw source timestamp; empty when the source has none.
    pub timestamp: String,
}

/// Converts a 14-digit `YYYYMMDDhhmmss` capture stamp to RFC 3339 (UTC).
///
/// Returns None for anything else, including the empty timestamp.
pub fn capture_date(timestamp: &str) -> Option<String> {
    if timestamp.len() != 14 || !timestamp.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let field = |range: std::ops::Range<usize>| timestamp[range].parse::<u32>().ok();
    let year = timestamp[0..4].parse::<i32>().ok()?;
    let date = NaiveDate::from_ymd_opt(year, field(4..6)?, field(6..8)?)?;
    let datetime = date.and_hms_opt(field(8..10)?, field(10..12)?, field(12..14)?)?;
    Some(datetime.and_utc().to_rfc3339_opts(SecondsFormat::Secs, true))
}

/// One output line: `<date> <url>` when dates are requested and known, else `<url>`.
pub fn render_line(item: &HarvestedUrl, include_dates: bool) -> String {
    if include_dates {
        if let Some(date) = capture_date(&item.timestamp) {
            return format!("{} {}", date, item.url);
        }
    }
    item.url.clone()
}
