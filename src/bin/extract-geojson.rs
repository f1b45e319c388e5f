use anyhow::Result;
use clap::Parser;
use conflict_preprocess::cli::{self, Runtime};
use conflict_preprocess::pipeline::geojson::GeoJsonExtractor;
use conflict_preprocess::pipeline::{Pipeline, PipelineResult};
use std::path::PathBuf;
use std::process::ExitCode;

/// Subset a GeoJSON FeatureCollection to the given ISO3 codes.
#[derive(Parser, Debug)]
#[command(name = "extract-geojson", version, about = "Keep GeoJSON features whose iso_a3 is listed")]
struct Cli {
    /// Source GeoJSON FeatureCollection
    input: PathBuf,

    /// Destination GeoJSON file
    output: PathBuf,

    /// Comma-separated iso_a3 codes, e.g. SYR,LBN,JOR
    ids: String,
}

fn run(args: Cli) -> Result<PipelineResult> {
    let extractor = GeoJsonExtractor::from_arg(&args.ids);
    let result = Pipeline::run(&extractor, &args.input, &args.output)?;
    Ok(result)
}

fn main() -> ExitCode {
    let args: Cli = cli::parse_or_exit();
    let _runtime = match Runtime::init() {
        Ok(runtime) => runtime,
        Err(e) => return cli::report(Err(e)),
    };
    cli::report(run(args))
}
