use anyhow::Result;
use conflict_preprocess::pipeline::geojson::GeoJsonExtractor;
use conflict_preprocess::pipeline::Pipeline;
use serde_json::{json, Value};
use std::fs;
use tempfile::tempdir;

fn world() -> Value {
    let feature = |iso: &str, name: &str| {
        json!({
            "type": "Feature",
            "properties": {"name": name, "iso_a3": iso},
            "geometry": {"type": "Polygon", "coordinates": [[[35.0, 32.0], [36.0, 33.0], [35.0, 32.0]]]}
        })
    };
    json!({
        "type": "FeatureCollection",
        "features": [feature("SYR", "Syria"), feature("LBN", "Lebanon"), feature("JOR", "Jordan")]
    })
}

#[test]
fn test_subset_keeps_listed_features_in_order() -> Result<()> {
    let dir = tempdir()?;
    let input = dir.path().join("world.geojson");
    let output = dir.path().join("levant.geojson");
    fs::write(&input, serde_json::to_string(&world())?)?;

    let result = Pipeline::run(&GeoJsonExtractor::from_arg("SYR,JOR"), &input, &output)?;

    let written: Value = serde_json::from_str(&fs::read_to_string(&output)?)?;
    assert_eq!(written["type"], "FeatureCollection");
    let features = written["features"].as_array().unwrap();
    assert_eq!(features.len(), 2);
    assert_eq!(features[0], world()["features"][0]);
    assert_eq!(features[1], world()["features"][2]);
    assert_eq!(result.stats.rows_read, 3);
    Ok(())
}

#[test]
fn test_no_matches_still_writes_collection() -> Result<()> {
    let dir = tempdir()?;
    let input = dir.path().join("world.geojson");
    let output = dir.path().join("none.geojson");
    fs::write(&input, serde_json::to_string(&world())?)?;

    Pipeline::run(&GeoJsonExtractor::from_arg("FRA"), &input, &output)?;

    let written: Value = serde_json::from_str(&fs::read_to_string(&output)?)?;
    assert_eq!(written, json!({"type": "FeatureCollection", "features": []}));
    Ok(())
}
