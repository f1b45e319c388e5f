use anyhow::{Context, Result};
use clap::Parser;
use conflict_preprocess::cli::{self, Runtime};
use conflict_preprocess::config::Config;
use conflict_preprocess::pipeline::unhcr::UnhcrExtractor;
use conflict_preprocess::pipeline::{Pipeline, PipelineResult};
use conflict_preprocess::reference::CountryTable;
use std::path::PathBuf;
use std::process::ExitCode;

/// Yearly refugee, asylum-seeker and IDP breakdown for one country of origin.
#[derive(Parser, Debug)]
#[command(name = "extract-unhcr", version, about = "Summarize UNHCR displacement by host and continent")]
struct Cli {
    /// UNHCR population statistics CSV
    input: PathBuf,

    /// Destination JSON file
    output: PathBuf,

    /// ISO3 code of the country of origin, e.g. SYR
    origin: String,
}

fn run(args: Cli, config: &Config) -> Result<PipelineResult> {
    let unhcr = &config.unhcr;
    let countries = CountryTable::load(unhcr.countries_csv.as_deref())
        .context("Failed to load country reference table")?;
    let extractor = UnhcrExtractor::new(args.origin, unhcr.top_hosts, countries);
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
