//! `tandem once` specs

use crate::prelude::*;

const INPUT: &str = ">>>eNAAAABBBB<<<";

#[test]
fn successful_attempt_runs_both_stages() {
    let project = Project::with_stages("");

    project
        .tandem()
        .args(&["once", "--path", "/opt/game", "--input", INPUT])
        .passes()
        .stdout_has("attempt-1 succeeded");

    assert_eq!(project.read("generated.log"), format!("gen {INPUT}\n"));
    assert_eq!(project.read("uploaded.log"), "up /opt/game\n");
}

#[test]
fn whitespace_in_input_is_stripped() {
    let project = Project::with_stages("");

    project
        .tandem()
        .args(&["once", "--path", "/opt/game", "--input", " >>>eNAAAA\nBBBB<<< "])
        .passes();

    assert_eq!(project.read("generated.log"), format!("gen {INPUT}\n"));
}

#[test]
fn generate_failure_exits_one_and_skips_upload() {
    let project = Project::with_stages("exit 4;");

    project
        .tandem()
        .args(&["once", "--path", "/opt/game", "--input", INPUT])
        .exits_with(1)
        .stdout_has("failed at generate");

    assert_eq!(project.read("uploaded.log"), "");
}

#[test]
fn invalid_input_exits_two_without_running() {
    let project = Project::with_stages("");

    project
        .tandem()
        .args(&["once", "--path", "/opt/game", "--input", "not a map string"])
        .exits_with(2)
        .stderr_has("input does not match");

    assert_eq!(project.read("generated.log"), "");
}

#[test]
fn input_can_come_from_stdin() {
    let project = Project::with_stages("");

    project
        .tandem()
        .args(&["once", "--path", "/opt/game", "--input", "-"])
        .stdin(&format!("{INPUT}\n"))
        .passes();

    assert_eq!(project.read("generated.log"), format!("gen {INPUT}\n"));
}
