//! Startup and exit handling shared by the extractor binaries.

use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::Parser;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_appender::non_blocking::WorkerGuard;

use crate::config::Config;
use crate::logging;
use crate::pipeline::PipelineResult;

/// Parse positional arguments; usage errors exit with status 1, `--help` with 0.
pub fn parse_or_exit<T: Parser>() -> T {
    match T::try_parse() {
        Ok(args) => args,
        Err(e) => {
            let code = match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
                _ => 1,
            };
            let _ = e.print();
            std::process::exit(code);
        }
    }
}

/// Loaded config plus the log flush guard.
///
/// Hold it in `main` until after [`report`] so the final events reach the file log.
pub struct Runtime {
    pub config: Config,
    _log_guard: Option<WorkerGuard>,
}

impl Runtime {
    pub fn init() -> Result<Self> {
        let config = Config::load().context("Failed to load configuration")?;
        let log_guard = logging::init_logging(&config.logging);
        Ok(Self {
            config,
            _log_guard: log_guard,
        })
    }
}

/// Map a run outcome to the process exit status.
pub fn report(result: Result<PipelineResult>) -> ExitCode {
    match result {
        Ok(run) => {
            info!(
                extractor = %run.extractor,
                records = run.records_written,
                skipped = run.stats.rows_skipped,
                "Run complete"
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{:#}", e);
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

/// Like [`report`], but failures are only reported; the exit status stays 0.
pub fn report_lenient(result: Result<PipelineResult>) -> ExitCode {
    if let Err(e) = &result {
        error!("{:#}", e);
        println!("Error: {:#}", e);
    }
    ExitCode::SUCCESS
}
