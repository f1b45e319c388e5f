use anyhow::Result;
use clap::Parser;
use conflict_preprocess::cli::{self, Runtime};
use conflict_preprocess::config::Config;
use conflict_preprocess::pipeline::gdp::GdpExtractor;
use conflict_preprocess::pipeline::{Pipeline, PipelineResult};
use std::path::PathBuf;
use std::process::ExitCode;

/// Extract a GDP (current US$) series from a World Bank wide CSV.
#[derive(Parser, Debug)]
#[command(name = "extract-gdp", version, about = "Extract GDP series from a World Bank CSV")]
struct Cli {
    /// World Bank indicators CSV (one row per country and indicator)
    input: PathBuf,

    /// Destination JSON file
    output: PathBuf,

    /// Country name to extract; defaults to `gdp.country` from the config
    country: Option<String>,
}

fn run(args: Cli, config: &Config) -> Result<PipelineResult> {
    let extractor = GdpExtractor::from_config(&config.gdp, args.country);
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
