use anyhow::Result;
use clap::Parser;
use conflict_preprocess::cli::{self, Runtime};
use conflict_preprocess::config::Config;
use conflict_preprocess::pipeline::ucdp::UcdpExtractor;
use conflict_preprocess::pipeline::{Pipeline, PipelineResult};
use std::path::PathBuf;
use std::process::ExitCode;

/// Monthly civilian and combatant deaths for the six chart regions.
#[derive(Parser, Debug)]
#[command(name = "extract-ucdp", version, about = "Aggregate UCDP events into monthly regional casualties")]
struct Cli {
    /// UCDP event CSV with deaths_a, deaths_b and deaths_civilians columns
    input: PathBuf,

    /// Destination JSON file
    output: PathBuf,
}

fn run(args: Cli, config: &Config) -> Result<PipelineResult> {
    let extractor = UcdpExtractor::from_config(&config.ucdp);
    let result = Pipeline::run(&extractor, &args.input, &args.output)?;
    Ok(result)
}

fn main() -> ExitCode {
    let args: Cli = cli::parse_or_exit();
    let runtime = match Runtime::init() {
        Ok(runtime) => runtime,
        Err(e) => return cli::report(Err(e)),
    };
    cli::report(run(args, &runtime.config))
}
