// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `${name}` placeholder expansion for stage argv templates

use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;

/// Regex pattern for ${variable_name}
// Allow expect here as the regex is compile-time verified to be valid
#[allow(clippy::expect_used)]
static VAR_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$\{([a-zA-Z_][a-zA-Z0-9_]*)\}").expect("constant regex pattern is valid")
});

// Regex pattern for ${VAR:-default} environment variable expansion
#[allow(clippy::expect_used)]
static ENV_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{(\w+):-([^}]*)\}").expect("constant regex pattern is valid"));

/// Expand placeholders in one argv element.
///
/// `${VAR:-default}` is expanded from the environment first, then `${name}`
/// from `vars`. Unknown names are left as-is. Substituted values are never
/// re-expanded, so input data containing `${...}` passes through verbatim.
pub fn interpolate(template: &str, vars: &HashMap<&str, &str>) -> String {
    let with_env = ENV_PATTERN.replace_all(template, |caps: &regex::Captures| {
        std::env::var(&caps[1]).unwrap_or_else(|_| caps[2].to_string())
    });

    VAR_PATTERN
        .replace_all(&with_env, |caps: &regex::Captures| match vars.get(&caps[1]) {
            Some(val) => (*val).to_string(),
            None => caps[0].to_string(),
        })
        .into_owned()
}

/// Names of `${name}` placeholders used in a template, in order.
pub fn placeholders(template: &str) -> Vec<&str> {
    VAR_PATTERN
        .captures_iter(template)
        .filter_map(|caps| caps.get(1).map(|m| m.as_str()))
        .collect()
}

#[cfg(test)]
#[path = "template_tests.rs"]
mod tests;
