//! Tests for global options and the config subcommand.

use super::parse;
use crate::cli::{Cli, CliCommand};
use clap::Parser;

#[test]
fn cli_parse_config() {
    match parse(&["urlharvest", "config"]) {
        CliCommand::Config => {}
        _ => panic!("expected Config"),
    }
}

#[test]
fn cli_parse_global_config_after_subcommand() {
    let cli = Cli::try_parse_from(["urlharvest", "fetch", "--config", "/etc/uh.toml", "a.example"])
        .unwrap();
    assert_eq!(
        cli.config.as_deref(),
        Some(std::path::Path::new("/etc/uh.toml"))
    );
    match cli.command {
        CliCommand::Fetch { domains, .. } => assert_eq!(domains, vec!["a.example"]),
        _ => panic!("expected Fetch"),
    }
}

#[test]
fn cli_rejects_unknown_subcommand() {
    assert!(Cli::try_parse_from(["urlharvest", "download"]).is_err());
}
