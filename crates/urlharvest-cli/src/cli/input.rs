//! Domain input from stdin.

use anyhow::{Context, Result};
use std::io::BufRead;

/// One domain per line, surrounding whitespace trimmed.
///
/// Blank lines are kept as empty domains so the harvest logs and skips them.
pub fn read_domains<R: BufRead>(reader: R) -> Result<Vec<String>> {
    reader
        .lines()
        .map(|line| {
            line.map(|l| l.trim().to_string())
                .context("read domain from stdin")
        })
        .collect()
}
