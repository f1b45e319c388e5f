use anyhow::Result;
use conflict_preprocess::pipeline::unhcr::UnhcrExtractor;
use conflict_preprocess::pipeline::Pipeline;
use conflict_preprocess::reference::CountryTable;
use serde_json::{json, Value};
use std::fs;
use tempfile::tempdir;

const UNHCR_CSV: &str = "\
Year,Country of Origin,Country of Origin ISO,Country of Asylum,Country of Asylum ISO,Refugees,Asylum-seekers,IDPs,Stateless
2013,Syrian Arab Rep.,SYR,Syrian Arab Rep.,SYR,0,0,\"6,520,800\",0
2013,Syrian Arab Rep.,SYR,Turkiye,TUR,\"585,601\",\"1,000\",0,0
2013,Syrian Arab Rep.,SYR,Lebanon,LBN,\"851,284\",0,0,0
2013,Syrian Arab Rep.,SYR,Sweden,SWE,\"11,000\",\"3,000\",0,0
2014,Syrian Arab Rep.,SYR,Lebanon,LBN,\"1,154,040\",0,0,0
2014,Syrian Arab Rep.,SYR,Egypt,EGY,\"138,380\",-,0,0
2014,Syrian Arab Rep.,SYR,Brazil,BRA,\"1,000\",,0,0
2014,Afghanistan,AFG,Germany,DEU,\"50,000\",0,0,0
";

#[test]
fn test_yearly_records_with_embedded_country_table() -> Result<()> {
    let dir = tempdir()?;
    let input = dir.path().join("unhcr.csv");
    let output = dir.path().join("displacement.json");
    fs::write(&input, UNHCR_CSV)?;

    let extractor = UnhcrExtractor::new("SYR", 2, CountryTable::embedded()?);
    Pipeline::run(&extractor, &input, &output)?;

    let written: Value = serde_json::from_str(&fs::read_to_string(&output)?)?;
    assert_eq!(
        written,
        json!([
            {
                "date": "2013-01-01",
                "year": 2013,
                "idp": 6520800,
                "totalRefugees": 851284 + 586601 + 14000,
                "lebanon": 851284,
                "türkiye": 586601,
                "europe": 14000,
                "africa": 0,
                "other": 0
            },
            {
                "date": "2014-01-01",
                "year": 2014,
                "idp": 0,
                "totalRefugees": 1154040 + 138380 + 1000,
                "lebanon": 1154040,
                "türkiye": 0,
                "europe": 0,
                "africa": 138380,
                "other": 1000
            }
        ])
    );

    let text = fs::read_to_string(&output)?;
    let lebanon = text.find("\"lebanon\"").unwrap();
    let turkiye = text.find("\"türkiye\"").unwrap();
    assert!(lebanon < turkiye, "hosts are written in ranking order");
    Ok(())
}

#[test]
fn test_unmatched_origin_writes_empty_array() -> Result<()> {
    let dir = tempdir()?;
    let input = dir.path().join("unhcr.csv");
    let output = dir.path().join("displacement.json");
    fs::write(&input, UNHCR_CSV)?;

    let extractor = UnhcrExtractor::new("VEN", 5, CountryTable::embedded()?);
    Pipeline::run(&extractor, &input, &output)?;

    let written: Value = serde_json::from_str(&fs::read_to_string(&output)?)?;
    assert_eq!(written, json!([]));
    Ok(())
}

#[test]
fn test_reruns_are_byte_identical() -> Result<()> {
    let dir = tempdir()?;
    let input = dir.path().join("unhcr.csv");
    fs::write(&input, UNHCR_CSV)?;
    let first = dir.path().join("first.json");
    let second = dir.path().join("second.json");

    Pipeline::run(&UnhcrExtractor::new("SYR", 5, CountryTable::embedded()?), &input, &first)?;
    Pipeline::run(&UnhcrExtractor::new("SYR", 5, CountryTable::embedded()?), &input, &second)?;

    assert_eq!(fs::read(&first)?, fs::read(&second)?);
    Ok(())
}
