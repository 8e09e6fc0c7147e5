// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! tandem - run a generate-then-upload job whenever new input arrives

mod color;
mod commands;
mod exit_error;
mod logging;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{config::ConfigArgs, once::OnceArgs};
use std::path::PathBuf;

const VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), " (", env!("BUILD_GIT_HASH"), ")");

#[derive(Parser)]
#[command(name = "tandem", version = VERSION, about, styles = color::styles())]
struct Cli {
    /// Config file (default: $TANDEM_CONFIG, then the user config dir)
    #[arg(long, short, global = true)]
    config: Option<PathBuf>,

    /// Also write daily-rolling logs here (default: $TANDEM_LOG_DIR)
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Watch for new input and run the job until interrupted (default)
    Watch,
    /// Run one attempt for the given path and input
    Once(OnceArgs),
    /// Inspect or create the config file
    Config(ConfigArgs),
}

fn main() {
    let cli = Cli::parse();
    if let Err(err) = run(cli) {
        let (code, message) = exit_error::exit_code(&err);
        if !message.is_empty() {
            eprintln!("error: {message}");
        }
        std::process::exit(code);
    }
}

fn run(cli: Cli) -> Result<()> {
    let log_dir = cli.log_dir.or_else(tandem_core::env::log_dir);
    let _guard = logging::init(log_dir.as_deref())?;
    let explicit = cli.config.as_deref();

    match cli.command.unwrap_or(Commands::Watch) {
        Commands::Config(args) => commands::config::config(args, explicit),
        Commands::Watch => {
            let config = commands::load_config(explicit)?;
            runtime()?.block_on(commands::watch::watch(&config))
        }
        Commands::Once(args) => {
            let config = commands::load_config(explicit)?;
            runtime()?.block_on(commands::once::once(&config, args))
        }
    }
}

fn runtime() -> Result<tokio::runtime::Runtime> {
    Ok(tokio::runtime::Builder::new_multi_thread().enable_all().build()?)
}
