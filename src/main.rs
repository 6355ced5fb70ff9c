// Allow common clippy pedantic lints
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::unused_async)]

//! pagewalk CLI
//!
//! Runs paginated list and describe operations from YAML definitions

use anyhow::Context;
use clap::Parser;
use pagewalk::cli::{Cli, Runner};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr; stdout carries only output values
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::builder()
                .with_default_directive(cli.log_level().into())
                .from_env_lossy(),
        )
        .with_writer(std::io::stderr)
        .init();

    let command = cli.command.name();
    let runner = Runner::new(cli);

    runner
        .run()
        .await
        .with_context(|| format!("pagewalk {command} failed"))
}
