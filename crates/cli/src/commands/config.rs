// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `tandem config` - inspect and bootstrap configuration

use crate::color;
use crate::exit_error::ExitError;
use crate::output::{render_config, OutputFormat};
use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use std::path::Path;
use tandem_core::EXAMPLE_CONFIG;

#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Load and validate the config
    Check,
    /// Print the resolved config
    Show {
        #[arg(long, value_enum, default_value_t)]
        format: OutputFormat,
    },
    /// Print which config file would be used
    Path,
    /// Write a commented example config
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

pub fn config(args: ConfigArgs, explicit: Option<&Path>) -> Result<()> {
    match args.command {
        ConfigCommand::Check => {
            let path = super::config_path(explicit)?;
            super::load_config(Some(&path))?;
            println!("{} ({})", color::success("config ok"), path.display());
        }
        ConfigCommand::Show { format } => {
            let config = super::load_config(explicit)?;
            print!("{}", render_config(&config, format)?);
        }
        ConfigCommand::Path => println!("{}", super::config_path(explicit)?.display()),
        ConfigCommand::Init { force } => init(&super::config_path(explicit)?, force)?,
    }
    Ok(())
}

fn init(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        return Err(ExitError::failure(format!(
            "{} already exists (use --force to overwrite)",
            path.display()
        ))
        .into());
    }
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("creating {}", parent.display()))?;
    }
    std::fs::write(path, EXAMPLE_CONFIG).with_context(|| format!("writing {}", path.display()))?;
    println!("wrote {}", path.display());
    Ok(())
}
