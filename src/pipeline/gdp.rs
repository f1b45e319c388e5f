use serde::ser::{Serialize, SerializeMap, Serializer};
use std::path::Path;
use tracing::debug;

use super::{ExtractStats, Extraction, Extractor};
use crate::config::GdpConfig;
use crate::constants::{COUNTRY_NAME_COLUMN, INDICATOR_NAME_COLUMN};
use crate::error::{PreprocessError, Result};
use crate::parse::{is_year_column, parse_f64};
use crate::table::{Column, HeaderCase, HeaderRow, Table};

/// One observation: `{"year": "2000-01-01", "gdp": 100.0}`
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct GdpPoint {
    pub year: String,
    pub gdp: f64,
}

/// Country name to series, serialized in source row order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CountrySeries(Vec<(String, Vec<GdpPoint>)>);

impl CountrySeries {
    /// A repeated country replaces its earlier series but keeps its position.
    fn insert(&mut self, country: String, points: Vec<GdpPoint>) {
        match self.0.iter_mut().find(|(name, _)| *name == country) {
            Some(entry) => entry.1 = points,
            None => self.0.push((country, points)),
        }
    }

    pub fn get(&self, country: &str) -> Option<&[GdpPoint]> {
        self.0
            .iter()
            .find(|(name, _)| name == country)
            .map(|(_, points)| points.as_slice())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn point_count(&self) -> usize {
        self.0.iter().map(|(_, points)| points.len()).sum()
    }
}

impl Serialize for CountrySeries {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (country, points) in &self.0 {
            map.serialize_entry(country, points)?;
        }
        map.end()
    }
}

/// Bare array for a single requested country, otherwise a mapping of all countries.
#[derive(Debug, Clone, PartialEq)]
pub enum GdpOutput {
    Country { name: String, points: Vec<GdpPoint> },
    AllCountries(CountrySeries),
}

impl Serialize for GdpOutput {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            GdpOutput::Country { points, .. } => points.serialize(serializer),
            GdpOutput::AllCountries(series) => series.serialize(serializer),
        }
    }
}

/// Reshapes a World Bank wide table into per-country GDP series.
#[derive(Debug, Clone)]
pub struct GdpExtractor {
    indicator: String,
    country: Option<String>,
}

impl GdpExtractor {
    pub fn new(indicator: impl Into<String>, country: Option<String>) -> Self {
        Self {
            indicator: indicator.into(),
            country: country.filter(|c| !c.is_empty()),
        }
    }

    /// Positional country overrides the configured one; an empty configured country means all.
    pub fn from_config(config: &GdpConfig, country_arg: Option<String>) -> Self {
        let country = country_arg.or_else(|| Some(config.country.clone()));
        Self::new(config.indicator.clone(), country)
    }

    pub fn country(&self) -> Option<&str> {
        self.country.as_deref()
    }

    fn series_for_row(&self, row: crate::table::Row<'_>, years: &[(Column, &str)]) -> Vec<GdpPoint> {
        years
            .iter()
            .filter_map(|(column, year)| {
                let raw = row.raw(*column).trim();
                if raw.is_empty() {
                    return None;
                }
                match parse_f64(raw) {
                    Some(gdp) => Some(GdpPoint {
                        year: format!("{}-01-01", year),
                        gdp,
                    }),
                    None => {
                        debug!(year = *year, value = raw, "Skipping non-numeric GDP cell");
                        None
                    }
                }
            })
            .collect()
    }

    pub fn extract_table(&self, table: &Table) -> Result<Extraction<GdpOutput>> {
        let country_col = table.require(&[COUNTRY_NAME_COLUMN])?;
        let indicator_col = table.require(&[INDICATOR_NAME_COLUMN])?;

        let mut years: Vec<(Column, &str)> = table
            .headers()
            .iter()
            .filter(|h| is_year_column(h))
            .filter_map(|h| table.column(h).map(|c| (c, h.as_str())))
            .collect();
        years.sort_by(|a, b| a.1.cmp(b.1));
        years.dedup_by(|a, b| a.1 == b.1);

        let mut series = CountrySeries::default();
        let mut rows_used = 0;

        for row in table.rows() {
            if row.raw(indicator_col) != self.indicator {
                continue;
            }
            let Some(country) = row.value(country_col) else {
                continue;
            };
            if let Some(wanted) = &self.country {
                if country != wanted {
                    continue;
                }
            }

            let points = self.series_for_row(row, &years);
            if !points.is_empty() {
                rows_used += 1;
                series.insert(country.to_string(), points);
            }
        }

        let stats = ExtractStats::new(table.len(), rows_used);

        let output = match &self.country {
            Some(wanted) => {
                let points = series
                    .get(wanted)
                    .ok_or_else(|| PreprocessError::CountryNotFound(wanted.clone()))?;
                GdpOutput::Country {
                    name: wanted.clone(),
                    points: points.to_vec(),
                }
            }
            None => GdpOutput::AllCountries(series),
        };

        Ok(Extraction::Ready { output, stats })
    }
}

impl Extractor for GdpExtractor {
    type Output = GdpOutput;

    fn name(&self) -> &'static str {
        "gdp"
    }

    fn extract(&self, input: &Path) -> Result<Extraction<GdpOutput>> {
        let table = Table::from_path(input, HeaderCase::Exact, HeaderRow::Containing(COUNTRY_NAME_COLUMN))?;
        self.extract_table(&table)
    }

    fn record_count(&self, output: &GdpOutput) -> usize {
        match output {
            GdpOutput::Country { points, .. } => points.len(),
            GdpOutput::AllCountries(series) => series.len(),
        }
    }

    fn summary(&self, output: &GdpOutput) -> Vec<String> {
        match output {
            GdpOutput::Country { name, points } => {
                let mut lines = vec![format!(
                    "✓ Extracted {} GDP data points for {}",
                    points.len(),
                    name
                )];
                if let (Some(first), Some(last)) = (points.first(), points.last()) {
                    lines.push(format!("  Years: {} to {}", &first.year[..4], &last.year[..4]));
                }
                lines
            }
            GdpOutput::AllCountries(series) => vec![format!(
                "✓ Extracted {} countries with {} GDP data points",
                series.len(),
                series.point_count()
            )],
        }
    }
}
