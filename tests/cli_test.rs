use anyhow::Result;
use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::tempdir;

const GDP: &str = env!("CARGO_BIN_EXE_extract-gdp");
const GED: &str = env!("CARGO_BIN_EXE_extract-ged");
const GEOJSON: &str = env!("CARGO_BIN_EXE_extract-geojson");

const WORLD_BANK_CSV: &str = "\
Country Name,Country Code,Indicator Name,Indicator Code,2000,2001,2002
Syrian Arab Republic,SYR,GDP (current US$),NY.GDP.MKTP.CD,100,,abc
";

/// Run a binary from `dir` with no ambient config or log settings.
fn run(bin: &str, dir: &Path, args: &[&str], env: &[(&str, &str)]) -> Result<Output> {
    let mut cmd = Command::new(bin);
    cmd.current_dir(dir)
        .args(args)
        .env_remove("PREPROCESS_CONFIG")
        .env_remove("PREPROCESS_LOG_DIR")
        .env_remove("RUST_LOG");
    for (key, value) in env {
        cmd.env(key, value);
    }
    Ok(cmd.output()?)
}

fn read_logs(dir: &Path) -> Result<String> {
    let mut logs = String::new();
    for entry in fs::read_dir(dir)? {
        logs.push_str(&fs::read_to_string(entry?.path())?);
    }
    Ok(logs)
}

#[test]
fn test_ged_reports_errors_with_exit_zero() -> Result<()> {
    let dir = tempdir()?;
    let output = run(GED, dir.path(), &["absent.csv", "out.json"], &[])?;

    assert_eq!(output.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&output.stdout).contains("Error:"));
    assert!(!dir.path().join("out.json").exists());
    Ok(())
}

#[test]
fn test_ged_usage_error_exits_one() -> Result<()> {
    let dir = tempdir()?;
    let output = run(GED, dir.path(), &["only-input.csv"], &[])?;

    assert_eq!(output.status.code(), Some(1));
    Ok(())
}

#[test]
fn test_geojson_requires_exactly_three_arguments() -> Result<()> {
    let dir = tempdir()?;
    fs::write(dir.path().join("world.geojson"), r#"{"type":"FeatureCollection","features":[]}"#)?;

    let too_few = run(GEOJSON, dir.path(), &["world.geojson", "out.geojson"], &[])?;
    assert_eq!(too_few.status.code(), Some(1));

    let too_many = run(GEOJSON, dir.path(), &["world.geojson", "out.geojson", "SYR", "extra"], &[])?;
    assert_eq!(too_many.status.code(), Some(1));

    assert!(!dir.path().join("out.geojson").exists());
    Ok(())
}

#[test]
fn test_gdp_unknown_country_exits_one() -> Result<()> {
    let dir = tempdir()?;
    fs::write(dir.path().join("gdp.csv"), WORLD_BANK_CSV)?;

    let output = run(GDP, dir.path(), &["gdp.csv", "out.json", "Narnia"], &[])?;

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Country 'Narnia' not found"));
    assert!(!dir.path().join("out.json").exists());
    Ok(())
}

#[test]
fn test_failure_reaches_file_log() -> Result<()> {
    let dir = tempdir()?;
    let log_dir = dir.path().join("logs");
    let log_dir_str = log_dir.to_string_lossy().to_string();

    let output = run(
        GDP,
        dir.path(),
        &["absent.csv", "out.json"],
        &[("PREPROCESS_LOG_DIR", log_dir_str.as_str())],
    )?;

    assert_eq!(output.status.code(), Some(1));
    let logs = read_logs(&log_dir)?;
    assert!(logs.contains("\"level\":\"ERROR\""), "no error record in: {logs}");
    assert!(logs.contains("not found"));
    Ok(())
}

#[test]
fn test_rust_log_enables_row_diagnostics() -> Result<()> {
    let dir = tempdir()?;
    fs::write(dir.path().join("gdp.csv"), WORLD_BANK_CSV)?;

    for directive in ["conflict_preprocess=debug", "debug"] {
        let output = run(
            GDP,
            dir.path(),
            &["gdp.csv", "out.json"],
            &[("RUST_LOG", directive)],
        )?;
        assert_eq!(output.status.code(), Some(0));
        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(
            stderr.contains("Skipping non-numeric GDP cell"),
            "{directive}: no row diagnostic in {stderr}"
        );
    }
    Ok(())
}
