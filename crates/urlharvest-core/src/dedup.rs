//! First-seen-wins deduplication of the aggregated result set.

use std::collections::HashSet;

/// Keeps the first occurrence of every distinct string, in input order.
///
/// Equality is exact: no case folding or further normalization.
pub fn dedupe(items: Vec<String>) -> Vec<String> {
    dedupe_by(items, |s| s.as_str())
}

/// Like [`dedupe`] but keyed on a string projection of each item.
pub fn dedupe_by<T, F>(items: Vec<T>, key: F) -> Vec<T>
where
    F: Fn(&T) -> &str,
{
    let mut seen: HashSet<String> = HashSet::with_capacity(items.len());
    let mut out = Vec::with_capacity(items.len());
    for item in items {
        if seen.insert(key(&item).to_string()) {
            out.push(item);
        }
    }
    out
}
