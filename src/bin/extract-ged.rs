use anyhow::Result;
use clap::Parser;
use conflict_preprocess::cli::{self, Runtime};
use conflict_preprocess::config::Config;
use conflict_preprocess::pipeline::ged::GedExtractor;
use conflict_preprocess::pipeline::{Pipeline, PipelineResult};
use std::path::PathBuf;
use std::process::ExitCode;

/// Per-event fatalities by canonical governorate from a UCDP GED CSV.
#[derive(Parser, Debug)]
#[command(name = "extract-ged", version, about = "Extract per-event fatalities by governorate")]
struct Cli {
    /// UCDP GED event CSV
    input: PathBuf,

    /// Destination JSON file
    output: PathBuf,
}

fn run(args: Cli, config: &Config) -> Result<PipelineResult> {
    let extractor = GedExtractor::from_config(&config.ged);
    let result = Pipeline::run(&extractor, &args.input, &args.output)?;
    Ok(result)
}

fn main() -> ExitCode {
    let args: Cli = cli::parse_or_exit();
    let runtime = match Runtime::init() {
        Ok(runtime) => runtime,
        Err(e) => return cli::report_lenient(Err(e)),
    };
    // schema and data problems are reported without failing the build step
    cli::report_lenient(run(args, &runtime.config))
}
