// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `tandem once` - run a single attempt and report its outcome

use crate::color;
use crate::exit_error::ExitError;
use anyhow::{Context, Result};
use clap::Args;
use std::io::Read;
use std::path::PathBuf;
use tandem_adapters::factory;
use tandem_core::{AttemptOutcome, Config};
use tandem_engine::JobPipeline;

#[derive(Args)]
pub struct OnceArgs {
    /// Target executable path passed to the stages as `${path}`
    #[arg(long)]
    pub path: PathBuf,

    /// Input data passed as `${input}` (`-` reads stdin)
    #[arg(long)]
    pub input: String,
}

pub async fn once(config: &Config, args: OnceArgs) -> Result<()> {
    let raw = if args.input == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf).context("reading input from stdin")?;
        buf
    } else {
        args.input
    };

    let format = config.input.format()?;
    let Some(input) = format.sanitize(&raw) else {
        return Err(
            ExitError::invalid_input(format!("input does not match `{}`", format.pattern())).into()
        );
    };

    let notifier = factory::notifier(&config.notify);
    let mut pipeline = JobPipeline::new(config.stages.clone(), &config.pipeline, notifier);
    let attempt = pipeline.run(&args.path, &input).await?;

    match pipeline.wait().await {
        Some(AttemptOutcome::Succeeded) => {
            println!("{attempt} {}", color::success("succeeded"));
            Ok(())
        }
        Some(outcome) => {
            println!("{attempt} {}", color::failure(&outcome.to_string()));
            Err(ExitError::failure(format!("{attempt} {outcome}")).into())
        }
        None => Err(ExitError::failure(format!("{attempt} did not complete")).into()),
    }
}
