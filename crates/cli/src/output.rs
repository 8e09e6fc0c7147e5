// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use clap::ValueEnum;
use tandem_core::Config;

#[derive(Clone, Copy, Debug, Default, PartialEq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Toml,
    Json,
}

/// Render a resolved config in the requested format.
pub fn render_config(config: &Config, format: OutputFormat) -> anyhow::Result<String> {
    Ok(match format {
        OutputFormat::Toml => config.to_toml_string()?,
        OutputFormat::Json => serde_json::to_string_pretty(config)? + "\n",
    })
}

#[cfg(test)]
#[path = "output_tests.rs"]
mod tests;
