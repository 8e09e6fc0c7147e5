// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use std::fs;
use tempfile::TempDir;

const MINIMAL: &str = r#"
[locator]
method = "focused_window"

[input]
method = "clipboard"

[stages.generate]
command = ["gen", "${path}", "${input}"]

[stages.upload]
command = ["upload", "${path}"]
"#;

fn parse(text: &str) -> Config {
    Config::parse(text, Path::new("/base")).unwrap()
}

#[test]
fn minimal_config_uses_defaults() {
    let config = parse(MINIMAL);

    assert_eq!(
        config.locator,
        LocatorConfig::FocusedWindow { pattern: "factorio".to_string(), poll_interval_ms: 2000 }
    );
    assert_eq!(config.input.source, InputSource::Clipboard { command: None });
    assert_eq!(config.input.pattern, DEFAULT_INPUT_PATTERN);
    assert!(config.input.strip_whitespace);
    assert_eq!(config.input.poll_interval(), Duration::from_millis(500));
    assert_eq!(config.notify, NotifyConfig::Log);
    assert_eq!(config.pipeline.stop_timeout(), Duration::from_secs(1));
    config.validate().unwrap();
}

#[test]
fn example_config_parses_and_validates() {
    let config = parse(EXAMPLE_CONFIG);
    config.validate().unwrap();
}

#[test]
fn relative_paths_resolve_against_base_dir() {
    let config = parse(
        r#"
[locator]
method = "fixed_path"
path = "bin/game"

[input]
method = "file"
path = "input.txt"

[stages.generate]
command = ["gen"]
cwd = "work"

[stages.upload]
command = ["upload"]

[notify]
method = "sound"
start = "sounds/start.wav"
"#,
    );

    assert_eq!(config.locator, LocatorConfig::FixedPath { path: PathBuf::from("/base/bin/game") });
    assert_eq!(config.input.source, InputSource::File { path: PathBuf::from("/base/input.txt") });
    assert_eq!(config.stages.generate.cwd, Some(PathBuf::from("/base/work")));
    match &config.notify {
        NotifyConfig::Sound { start, success, player, .. } => {
            assert_eq!(start.as_deref(), Some(Path::new("/base/sounds/start.wav")));
            assert!(success.is_none());
            assert!(!player.is_empty());
        }
        other => panic!("expected sound notifier, got {other:?}"),
    }
    match &config.notify {
        NotifyConfig::Sound { start_volume, failure_volume, .. } => {
            assert_eq!((*start_volume, *failure_volume), (0.5, 0.5));
        }
        other => panic!("expected sound notifier, got {other:?}"),
    }
}

#[test]
fn absolute_paths_are_untouched() {
    let config = parse(&MINIMAL.replace(
        "method = \"focused_window\"",
        "method = \"fixed_path\"\npath = \"/opt/game\"",
    ));
    assert_eq!(config.locator, LocatorConfig::FixedPath { path: PathBuf::from("/opt/game") });
}

#[yare::parameterized(
    none    = { "none",    NotifyConfig::Silent },
    log     = { "log",     NotifyConfig::Log },
    desktop = { "desktop", NotifyConfig::Desktop },
)]
fn notify_methods(method: &str, expected: NotifyConfig) {
    let config = parse(&format!("{MINIMAL}\n[notify]\nmethod = \"{method}\"\n"));
    assert_eq!(config.notify, expected);
}

#[test]
fn unknown_top_level_key_is_rejected() {
    let text = format!("{MINIMAL}\n[extra]\nkey = 1\n");
    assert!(Config::parse(&text, Path::new("/base")).is_err());
}

#[test]
fn unknown_locator_method_is_rejected() {
    let text = MINIMAL.replace("focused_window", "telepathy");
    assert!(Config::parse(&text, Path::new("/base")).is_err());
}

#[yare::parameterized(
    zero_input_poll   = { "poll_interval_ms = 500",  "poll_interval_ms = 0",  "input.poll_interval_ms" },
    zero_stop_timeout = { "stop_timeout_ms = 1000",  "stop_timeout_ms = 0",   "pipeline.stop_timeout_ms" },
    zero_locator_poll = { "poll_interval_ms = 2000", "poll_interval_ms = 0",  "locator.poll_interval_ms" },
)]
fn zero_durations_are_rejected(from: &str, to: &str, field: &str) {
    let config = parse(&EXAMPLE_CONFIG.replace(from, to));
    match config.validate() {
        Err(ConfigError::ZeroDuration { field: f }) => assert_eq!(f, field),
        other => panic!("expected zero duration error, got {other:?}"),
    }
}

#[test]
fn empty_stage_command_is_rejected() {
    let config = parse(&MINIMAL.replace(r#"["upload", "${path}"]"#, "[]"));
    assert!(matches!(
        config.validate(),
        Err(ConfigError::EmptyCommand { stage: Stage::Upload })
    ));
}

#[test]
fn unknown_placeholder_is_rejected() {
    let config = parse(&MINIMAL.replace("${input}", "${planet}"));
    match config.validate() {
        Err(ConfigError::UnknownPlaceholder { stage, name }) => {
            assert_eq!(stage, Stage::Generate);
            assert_eq!(name, "planet");
        }
        other => panic!("expected unknown placeholder error, got {other:?}"),
    }
}

#[test]
fn invalid_pattern_is_rejected() {
    let config = parse(&MINIMAL.replace(
        "method = \"clipboard\"",
        "method = \"clipboard\"\npattern = \"(unclosed\"",
    ));
    assert!(matches!(config.validate(), Err(ConfigError::InvalidPattern(_))));
}

#[test]
fn missing_fixed_path_is_rejected() {
    let config = parse(&MINIMAL.replace(
        "method = \"focused_window\"",
        "method = \"fixed_path\"\npath = \"/definitely/not/here/game\"",
    ));
    assert!(matches!(
        config.validate(),
        Err(ConfigError::MissingPath { field: "locator.path", .. })
    ));
}

#[yare::parameterized(
    start_too_loud   = { "start_volume = 1.5",      "notify.start_volume" },
    success_negative = { "success_volume = -0.1",   "notify.success_volume" },
    failure_too_loud = { "failure_volume = 2.0",    "notify.failure_volume" },
)]
fn out_of_range_volumes_are_rejected(line: &str, field: &str) {
    let config = parse(&format!("{MINIMAL}\n[notify]\nmethod = \"sound\"\n{line}\n"));
    match config.validate() {
        Err(ConfigError::VolumeRange { field: f, .. }) => assert_eq!(f, field),
        other => panic!("expected volume range error, got {other:?}"),
    }
}

#[test]
fn volume_bounds_are_accepted() {
    let config = parse(&format!(
        "{MINIMAL}\n[notify]\nmethod = \"sound\"\nstart_volume = 0.0\nsuccess_volume = 1.0\n"
    ));
    config.validate().unwrap();
}

#[test]
fn empty_clipboard_command_is_rejected() {
    let config = parse(&MINIMAL.replace(
        "method = \"clipboard\"",
        "method = \"clipboard\"\ncommand = []",
    ));
    assert!(matches!(config.validate(), Err(ConfigError::Empty { field: "input.command" })));
}

#[test]
fn load_reads_file_and_resolves_relative_to_it() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("input.txt"), "").unwrap();
    fs::write(dir.path().join("game"), "").unwrap();
    let path = dir.path().join("config.toml");
    fs::write(
        &path,
        MINIMAL
            .replace("method = \"focused_window\"", "method = \"fixed_path\"\npath = \"game\"")
            .replace("method = \"clipboard\"", "method = \"file\"\npath = \"input.txt\""),
    )
    .unwrap();

    let config = Config::load(&path).unwrap();
    assert_eq!(config.locator, LocatorConfig::FixedPath { path: dir.path().join("game") });
}

#[test]
fn load_missing_file_is_read_error() {
    let err = Config::load(Path::new("/definitely/not/here.toml")).unwrap_err();
    assert!(matches!(err, ConfigError::Read { .. }));
    assert!(err.to_string().contains("/definitely/not/here.toml"));
}

#[test]
fn load_malformed_file_is_parse_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "[locator\n").unwrap();
    assert!(matches!(Config::load(&path), Err(ConfigError::Parse { .. })));
}

#[test]
fn rendered_toml_parses_back() {
    let config = parse(EXAMPLE_CONFIG);
    let rendered = config.to_toml_string().unwrap();
    let reparsed = Config::parse(&rendered, Path::new("/base")).unwrap();
    assert_eq!(reparsed, config);
}
