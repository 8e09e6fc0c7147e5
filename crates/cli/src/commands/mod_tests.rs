// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use serial_test::serial;

#[test]
#[serial]
fn explicit_path_wins_over_environment() {
    std::env::set_var("TANDEM_CONFIG", "/from/env.toml");
    let path = config_path(Some(Path::new("/explicit.toml"))).unwrap();
    std::env::remove_var("TANDEM_CONFIG");

    assert_eq!(path, PathBuf::from("/explicit.toml"));
}

#[test]
#[serial]
fn environment_path_is_the_fallback() {
    std::env::set_var("TANDEM_CONFIG", "/from/env.toml");
    let path = config_path(None).unwrap();
    std::env::remove_var("TANDEM_CONFIG");

    assert_eq!(path, PathBuf::from("/from/env.toml"));
}

#[test]
fn missing_file_reports_path() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope.toml");

    let err = load_config(Some(&missing)).unwrap_err();
    assert!(err.to_string().contains("nope.toml"), "{err}");
}
