//! CLI help output specs
//!
//! Verify help text displays for all commands.

use crate::prelude::*;

#[test]
fn tandem_help_shows_usage() {
    cli().args(&["--help"]).passes().stdout_has("Usage:");
}

#[test]
fn tandem_help_lists_commands() {
    cli().args(&["--help"]).passes().stdout_has("watch").stdout_has("once").stdout_has("config");
}

#[test]
fn tandem_config_help_shows_subcommands() {
    cli()
        .args(&["config", "--help"])
        .passes()
        .stdout_has("check")
        .stdout_has("show")
        .stdout_has("init");
}

#[test]
fn tandem_once_help_shows_flags() {
    cli().args(&["once", "--help"]).passes().stdout_has("--path").stdout_has("--input");
}

#[test]
fn tandem_version_shows_package_version() {
    cli().args(&["--version"]).passes().stdout_has(env!("CARGO_PKG_VERSION"));
}

#[test]
fn unknown_command_fails() {
    cli().args(&["frobnicate"]).fails().stderr_has("unrecognized subcommand");
}
