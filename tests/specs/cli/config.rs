//! `tandem config` specs

use crate::prelude::*;

#[test]
fn check_accepts_valid_config() {
    let project = Project::with_stages("");
    project.tandem().args(&["config", "check"]).passes().stdout_has("config ok");
}

#[test]
fn check_reports_validation_errors() {
    let project = Project::with_stages("");
    project.file(
        "tandem.toml",
        r#"
[locator]
method = "fixed_path"
path = "game/bin/game"

[input]
method = "clipboard"

[stages.generate]
command = []

[stages.upload]
command = ["true"]
"#,
    );

    project
        .tandem()
        .args(&["config", "check"])
        .exits_with(1)
        .stderr_has("stages.generate.command must not be empty");
}

#[test]
fn check_rejects_unknown_placeholders() {
    let project = Project::with_stages("");
    let config = project.read("tandem.toml").replace("${path}", "${target}");
    project.file("tandem.toml", &config);

    project.tandem().args(&["config", "check"]).fails().stderr_has("`target`");
}

#[test]
fn missing_config_fails() {
    cli().args(&["config", "check"]).fails().stderr_has("failed to read");
}

#[test]
fn explicit_config_flag_wins() {
    let project = Project::with_stages("");
    let config = project.path().join("tandem.toml");
    cli()
        .args(&["--config", &config.display().to_string(), "config", "path"])
        .passes()
        .stdout_has("tandem.toml");
}

#[test]
fn show_prints_resolved_paths() {
    let project = Project::with_stages("");
    let stdout = project.tandem().args(&["config", "show"]).passes().stdout();

    assert!(stdout.contains("method = \"fixed_path\""), "{stdout}");
    // Relative paths are resolved against the config file's directory
    assert!(stdout.contains(&project.path().join("game/bin/game").display().to_string()), "{stdout}");
}

#[test]
fn show_json() {
    let project = Project::with_stages("");
    project
        .tandem()
        .args(&["config", "show", "--format", "json"])
        .passes()
        .stdout_has("\"method\": \"none\"");
}

#[test]
fn init_writes_example_and_refuses_to_overwrite() {
    let project = Project::empty();
    let target = project.path().join("nested/tandem.toml");
    let target_arg = target.display().to_string();

    cli().args(&["--config", &target_arg, "config", "init"]).passes().stdout_has("wrote");
    assert!(project.read("nested/tandem.toml").contains("[stages.generate]"));

    cli()
        .args(&["--config", &target_arg, "config", "init"])
        .exits_with(1)
        .stderr_has("already exists");
    cli().args(&["--config", &target_arg, "config", "init", "--force"]).passes();
}
