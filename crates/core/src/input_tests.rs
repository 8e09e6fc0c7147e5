// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[yare::parameterized(
    plain              = { ">>>eNq1VE1v2zAM/SuGzjn4M03=<<<",          Some(">>>eNq1VE1v2zAM/SuGzjn4M03=<<<") },
    line_breaks        = { ">>>eNq1VE1v\n2zAM/SuG\r\nzjn4M03=<<<",   Some(">>>eNq1VE1v2zAM/SuGzjn4M03=<<<") },
    surrounding_spaces = { "   >>>eNabc<<<  \n",                      Some(">>>eNabc<<<") },
    missing_prefix     = { ">>>abc<<<",                               None },
    missing_suffix     = { ">>>eNabc",                                None },
    bad_characters     = { ">>>eNab#c<<<",                            None },
    prose              = { "hello world",                             None },
    empty              = { "",                                        None },
    only_whitespace    = { " \t\n ",                                  None },
)]
fn default_format_sanitizes(raw: &str, expected: Option<&str>) {
    let format = InputFormat::default();
    assert_eq!(format.sanitize(raw).as_deref(), expected);
}

#[test]
fn keeps_inner_whitespace_when_not_stripping() {
    let format = InputFormat::new(r"^job [0-9]+$", false).unwrap();
    assert_eq!(format.sanitize("  job 42 \n").as_deref(), Some("job 42"));
    assert!(!format.is_valid("job42"));
}

#[test]
fn invalid_pattern_is_rejected() {
    assert!(InputFormat::new("(unclosed", true).is_err());
}

#[test]
fn default_pattern_is_exposed() {
    assert_eq!(InputFormat::default().pattern(), DEFAULT_INPUT_PATTERN);
}
