pub mod config;
pub mod logging;

pub mod dedup;
pub mod harvest;
pub mod source;
pub mod url_model;
pub mod versions;

pub use harvest::{harvest, FetchOptions, HarvestOutput, HarvestedUrl, Harvester};
