//! URL normalization and host checks for harvested records.
//!
//! Every URL that reaches the result set goes through [`normalize`]; the
//! subdomain check only runs when the caller asked to exclude subdomains.

mod normalize;
mod subdomain;

pub use normalize::{normalize, NormalizeError};
pub use subdomain::is_subdomain;
