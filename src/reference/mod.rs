//! Country reference lookups (ISO3 → display name, ISO3 → continent).

use serde::Deserialize;
use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::{PreprocessError, Result};

/// ISO 3166-1 table shipped with the crate: `iso3,iso2,name,continent`.
/// A blank continent marks codes the continent mapping has no entry for.
const EMBEDDED_COUNTRIES: &str = include_str!("../../data/countries.csv");

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Continent {
    Africa,
    Antarctica,
    Asia,
    Europe,
    NorthAmerica,
    Oceania,
    SouthAmerica,
}

impl Continent {
    /// Two-letter continent code (`AF`, `AN`, `AS`, `EU`, `NA`, `OC`, `SA`).
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim() {
            "AF" => Some(Continent::Africa),
            "AN" => Some(Continent::Antarctica),
            "AS" => Some(Continent::Asia),
            "EU" => Some(Continent::Europe),
            "NA" => Some(Continent::NorthAmerica),
            "OC" => Some(Continent::Oceania),
            "SA" => Some(Continent::SouthAmerica),
            _ => None,
        }
    }
}

/// Country metadata the displacement extractor needs, injected so tests can stub it.
pub trait CountryLookup {
    fn name(&self, iso3: &str) -> Option<String>;
    fn continent(&self, iso3: &str) -> Option<Continent>;
}

#[derive(Debug, Clone, Deserialize)]
pub struct CountryRecord {
    pub iso3: String,
    pub iso2: String,
    pub name: String,
    #[serde(default)]
    pub continent: String,
}

/// Table-backed [`CountryLookup`].
#[derive(Debug, Clone, Default)]
pub struct CountryTable {
    by_iso3: HashMap<String, CountryRecord>,
}

impl CountryTable {
    pub fn embedded() -> Result<Self> {
        Self::from_reader(EMBEDDED_COUNTRIES.as_bytes())
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(PreprocessError::InputNotFound(path.to_path_buf()));
        }
        Self::from_reader(File::open(path)?)
    }

    /// Use the file when given, the embedded table otherwise.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::from_path(p),
            None => Self::embedded(),
        }
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut rdr = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut by_iso3 = HashMap::new();
        for record in rdr.deserialize() {
            let record: CountryRecord = record?;
            by_iso3.insert(record.iso3.to_uppercase(), record);
        }

        if by_iso3.is_empty() {
            return Err(PreprocessError::Config("country reference table is empty".to_string()));
        }
        Ok(Self { by_iso3 })
    }

    pub fn get(&self, iso3: &str) -> Option<&CountryRecord> {
        self.by_iso3.get(&iso3.trim().to_uppercase())
    }

    pub fn len(&self) -> usize {
        self.by_iso3.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_iso3.is_empty()
    }
}

impl CountryLookup for CountryTable {
    fn name(&self, iso3: &str) -> Option<String> {
        self.get(iso3).map(|c| c.name.clone())
    }

    fn continent(&self, iso3: &str) -> Option<Continent> {
        self.get(iso3).and_then(|c| Continent::from_code(&c.continent))
    }
}
