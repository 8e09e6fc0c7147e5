// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Syntactic validation of input data before it reaches the controller.

use regex::Regex;

/// Default shape of a map exchange string: `>>>eN` base64 body `<<<`.
pub const DEFAULT_INPUT_PATTERN: &str = r"^>>>eN[\sA-Za-z0-9+/=]+<<<$";

/// Normalizes raw provider text and decides whether it is well-formed.
#[derive(Debug, Clone)]
pub struct InputFormat {
    pattern: Regex,
    strip_whitespace: bool,
}

impl InputFormat {
    pub fn new(pattern: &str, strip_whitespace: bool) -> Result<Self, regex::Error> {
        Ok(Self { pattern: Regex::new(pattern)?, strip_whitespace })
    }

    /// Normalized value if `raw` is well-formed, otherwise `None`.
    ///
    /// With `strip_whitespace` all whitespace is removed (exchange strings
    /// are often pasted with line breaks); otherwise only the ends are
    /// trimmed. Empty input is never valid.
    pub fn sanitize(&self, raw: &str) -> Option<String> {
        let cleaned: String = if self.strip_whitespace {
            raw.chars().filter(|c| !c.is_whitespace()).collect()
        } else {
            raw.trim().to_string()
        };
        if cleaned.is_empty() || !self.pattern.is_match(&cleaned) {
            return None;
        }
        Some(cleaned)
    }

    pub fn is_valid(&self, raw: &str) -> bool {
        self.sanitize(raw).is_some()
    }

    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }
}

impl Default for InputFormat {
    fn default() -> Self {
        Self { pattern: default_pattern(), strip_whitespace: true }
    }
}

// The default pattern is a checked-in constant covered by tests
#[allow(clippy::expect_used)]
fn default_pattern() -> Regex {
    Regex::new(DEFAULT_INPUT_PATTERN).expect("constant regex pattern is valid")
}

#[cfg(test)]
#[path = "input_tests.rs"]
mod tests;
