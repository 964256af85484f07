#![allow(clippy::print_stderr, clippy::print_stdout)]

mod args;
mod handlers;

use crate::args::{Cli, Commands};
use anyhow::{Context, Result};
use clap::Parser;
use plugkit_logger::{Logger, Verbosity};
use plugkit_scaffold::{Completion, OperationController, ProjectLayout};
use std::process::ExitCode;

const EXIT_PARTIAL: u8 = 1;
const EXIT_FATAL: u8 = 2;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let _logger = match init_logger(&cli) {
        Ok(logger) => logger,
        Err(e) => {
            eprintln!("❌ {e:#}");
            return ExitCode::from(EXIT_FATAL);
        },
    };

    match run(cli) {
        Ok(Completion::Success) => ExitCode::SUCCESS,
        Ok(Completion::Partial) => ExitCode::from(EXIT_PARTIAL),
        Err(e) => {
            eprintln!("❌ {e:#}");
            ExitCode::from(EXIT_FATAL)
        },
    }
}

fn init_logger(cli: &Cli) -> Result<Logger> {
    let mut builder =
        Logger::builder(env!("CARGO_BIN_NAME")).level(Verbosity::new(cli.verbose, cli.quiet).level());
    if let Some(path) = &cli.log_file {
        builder = builder.file(path);
        if cli.log_json {
            builder = builder.json();
        }
    }
    builder.init().context("Failed to initialize logging")
}

fn run(cli: Cli) -> Result<Completion> {
    let layout = ProjectLayout::load(&cli.root, cli.config.as_deref())
        .with_context(|| format!("Failed to open project at '{}'", cli.root.display()))?;
    let controller = OperationController::new(layout);
    tracing::debug!(
        root = %controller.layout().root().display(),
        command = ?cli.command,
        "Running command"
    );

    match cli.command {
        Commands::Create { name } => handlers::create_module(&controller, &name),
        Commands::Delete { name } => handlers::delete_module(&controller, &name),
        Commands::List {} => handlers::list_modules(&controller),
    }
}
