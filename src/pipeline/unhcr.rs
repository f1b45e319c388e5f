use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;
use tracing::{debug, info, warn};

use super::{ExtractStats, Extraction, Extractor};
use crate::constants::{
    ASYLUM_ISO_ALIASES, ASYLUM_SEEKERS_ALIASES, IDPS_ALIASES, ORIGIN_ISO_ALIASES, REFUGEES_ALIASES,
    YEAR_ALIASES,
};
use crate::error::Result;
use crate::output::Indent;
use crate::parse::parse_grouped;
use crate::reference::{Continent, CountryLookup};
use crate::table::{HeaderCase, HeaderRow, Table};

/// Per-host counts keyed by `lowercase_country_name`, kept in ranking order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HostCounts(Vec<(String, i64)>);

impl HostCounts {
    pub fn get(&self, key: &str) -> Option<i64> {
        self.0.iter().find(|(k, _)| k == key).map(|(_, v)| *v)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(k, _)| k.as_str())
    }

    pub fn total(&self) -> i64 {
        self.0.iter().map(|(_, v)| v).sum()
    }

    fn add(&mut self, key: &str, count: i64) {
        if let Some(entry) = self.0.iter_mut().find(|(k, _)| k == key) {
            entry.1 += count;
        }
    }
}

impl Serialize for HostCounts {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (key, count) in &self.0 {
            map.serialize_entry(key, count)?;
        }
        map.end()
    }
}

/// One year of the displacement chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplacementYear {
    pub date: String,
    pub year: i32,
    pub idp: i64,
    #[serde(rename = "totalRefugees")]
    pub total_refugees: i64,
    #[serde(flatten)]
    pub hosts: HostCounts,
    pub europe: i64,
    pub africa: i64,
    pub other: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ContinentBucket {
    Europe,
    Africa,
    Other,
}

impl From<Option<Continent>> for ContinentBucket {
    fn from(continent: Option<Continent>) -> Self {
        match continent {
            Some(Continent::Europe) => ContinentBucket::Europe,
            Some(Continent::Africa) => ContinentBucket::Africa,
            _ => ContinentBucket::Other,
        }
    }
}

#[derive(Debug, Clone)]
struct DisplacementRow {
    asylum: String,
    year: i32,
    total_external: f64,
    idps: f64,
}

/// Yearly refugee/IDP breakdown for one country of origin.
pub struct UnhcrExtractor<L: CountryLookup> {
    origin: String,
    top_hosts: usize,
    lookup: L,
}

impl<L: CountryLookup> UnhcrExtractor<L> {
    pub fn new(origin: impl Into<String>, top_hosts: usize, lookup: L) -> Self {
        Self {
            origin: origin.into().trim().to_string(),
            top_hosts,
            lookup,
        }
    }

    /// Output key for a host: its name lowercased with spaces as underscores.
    pub fn host_key(&self, iso3: &str) -> String {
        match self.lookup.name(iso3) {
            Some(name) => name.to_lowercase().replace(' ', "_"),
            None => {
                warn!("No country name for '{}', keying by ISO code", iso3);
                iso3.to_lowercase()
            }
        }
    }

    /// Largest cumulative external hosts across all years.
    ///
    /// Ties keep ascending ISO order, the order the per-host totals are grouped in.
    fn rank_hosts(&self, rows: &[DisplacementRow]) -> Vec<String> {
        let mut totals: BTreeMap<&str, f64> = BTreeMap::new();
        for row in rows.iter().filter(|r| r.asylum != self.origin) {
            *totals.entry(row.asylum.as_str()).or_default() += row.total_external;
        }

        let mut ranked: Vec<(&str, f64)> = totals.into_iter().collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
        ranked
            .into_iter()
            .take(self.top_hosts)
            .map(|(iso, _)| iso.to_string())
            .collect()
    }

    fn load_rows(&self, table: &Table) -> Result<Vec<DisplacementRow>> {
        let origin_col = table.require(ORIGIN_ISO_ALIASES)?;
        let asylum_col = table.require(ASYLUM_ISO_ALIASES)?;
        let year_col = table.require(YEAR_ALIASES)?;
        let refugees_col = table.require(REFUGEES_ALIASES)?;
        let seekers_col = table.require(ASYLUM_SEEKERS_ALIASES)?;
        let idps_col = table.require(IDPS_ALIASES)?;

        let rows = table
            .rows()
            .filter(|row| row.value(origin_col) == Some(self.origin.as_str()))
            .filter_map(|row| {
                let asylum = row.value(asylum_col)?;
                let year = row.value(year_col).and_then(parse_year);
                let Some(year) = year else {
                    debug!(value = row.raw(year_col), "Dropping row without a usable year");
                    return None;
                };
                Some(DisplacementRow {
                    asylum: asylum.to_string(),
                    year,
                    total_external: parse_grouped(row.raw(refugees_col)) + parse_grouped(row.raw(seekers_col)),
                    idps: parse_grouped(row.raw(idps_col)),
                })
            })
            .collect();
        Ok(rows)
    }

    pub fn extract_table(&self, table: &Table) -> Result<Extraction<Vec<DisplacementYear>>> {
        let rows = self.load_rows(table)?;
        if rows.is_empty() {
            warn!("No rows with origin '{}'", self.origin);
        }

        let top_isos = self.rank_hosts(&rows);
        let host_keys: Vec<(String, String)> = top_isos
            .iter()
            .map(|iso| (iso.clone(), self.host_key(iso)))
            .collect();
        info!("Top {} host countries: {:?}", host_keys.len(), top_isos);

        let years: BTreeSet<i32> = rows.iter().map(|r| r.year).collect();
        let mut output = Vec::with_capacity(years.len());

        for year in years {
            let mut hosts = HostCounts(host_keys.iter().map(|(_, key)| (key.clone(), 0)).collect());
            let mut idp = 0.0;
            let (mut europe, mut africa, mut other) = (0i64, 0i64, 0i64);

            for row in rows.iter().filter(|r| r.year == year) {
                if row.asylum == self.origin {
                    idp += row.idps;
                    continue;
                }
                let count = row.total_external.trunc() as i64;
                if let Some((_, key)) = host_keys.iter().find(|(iso, _)| *iso == row.asylum) {
                    hosts.add(key, count);
                } else {
                    match ContinentBucket::from(self.lookup.continent(&row.asylum)) {
                        ContinentBucket::Europe => europe += count,
                        ContinentBucket::Africa => africa += count,
                        ContinentBucket::Other => other += count,
                    }
                }
            }

            output.push(DisplacementYear {
                date: format!("{}-01-01", year),
                year,
                idp: idp.trunc() as i64,
                total_refugees: hosts.total() + europe + africa + other,
                hosts,
                europe,
                africa,
                other,
            });
        }

        let stats = ExtractStats::new(table.len(), rows.len());
        Ok(Extraction::Ready { output, stats })
    }
}

impl<L: CountryLookup> Extractor for UnhcrExtractor<L> {
    type Output = Vec<DisplacementYear>;

    fn name(&self) -> &'static str {
        "unhcr"
    }

    fn indent(&self) -> Indent {
        Indent::Four
    }

    fn extract(&self, input: &Path) -> Result<Extraction<Vec<DisplacementYear>>> {
        let table = Table::from_path(input, HeaderCase::Exact, HeaderRow::Containing(YEAR_ALIASES[0]))?;
        self.extract_table(&table)
    }

    fn record_count(&self, output: &Vec<DisplacementYear>) -> usize {
        output.len()
    }

    fn summary(&self, output: &Vec<DisplacementYear>) -> Vec<String> {
        vec![format!(
            "Successfully converted {} years for origin {}",
            output.len(),
            self.origin
        )]
    }
}

fn parse_year(raw: &str) -> Option<i32> {
    raw.parse::<i32>()
        .ok()
        .or_else(|| raw.parse::<f64>().ok().filter(|y| y.fract() == 0.0).map(|y| y as i32))
}
