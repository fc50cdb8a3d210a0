//! CLI command handlers. Each command is in its own file.

mod fetch;
mod show_config;

pub use fetch::{run_fetch, FetchArgs};
pub use show_config::run_show_config;
