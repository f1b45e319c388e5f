use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::debug;

use super::normalize::RegionBucket;
use super::{Bounds, DateWindow, ExtractStats, Extraction, Extractor};
use crate::config::UcdpConfig;
use crate::constants::{
    DATE_START_ALIASES, DEATHS_A_ALIASES, DEATHS_B_ALIASES, DEATHS_CIVILIANS_ALIASES, REGION_ALIASES,
};
use crate::error::Result;
use crate::parse::{parse_datetime, parse_f64};
use crate::table::{HeaderCase, HeaderRow, Table};

/// Death sums for one region in one month.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Casualties {
    #[serde(rename = "Civilian")]
    pub civilian: u64,
    #[serde(rename = "Combatant")]
    pub combatant: u64,
}

/// `{"date": "2012-03-01", "month": "March 2012", "Aleppo": {...}, ..., "Other": {...}}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlyCasualties {
    pub date: String,
    pub month: String,
    #[serde(flatten)]
    pub regions: BTreeMap<RegionBucket, Casualties>,
}

#[derive(Debug, Default, Clone, Copy)]
struct DeathSums {
    civilian: f64,
    combatant: f64,
}

/// Monthly civilian/combatant aggregation over the six chart regions.
#[derive(Debug, Clone)]
pub struct UcdpExtractor {
    window: DateWindow,
}

impl UcdpExtractor {
    pub fn new(window: DateWindow) -> Self {
        Self { window }
    }

    pub fn from_config(config: &UcdpConfig) -> Self {
        Self::new(DateWindow::new(config.window_start, config.window_end, Bounds::Inclusive))
    }

    pub fn extract_table(&self, table: &Table) -> Result<Extraction<Vec<MonthlyCasualties>>> {
        let date_col = table.require(DATE_START_ALIASES)?;
        let region_col = table.require(REGION_ALIASES)?;
        let civilians_col = table.require(DEATHS_CIVILIANS_ALIASES)?;
        let deaths_a_col = table.require(DEATHS_A_ALIASES)?;
        let deaths_b_col = table.require(DEATHS_B_ALIASES)?;

        let windowed: Vec<_> = table
            .rows()
            .filter_map(|row| {
                let date = parse_datetime(row.raw(date_col));
                if date.is_none() {
                    debug!(value = row.raw(date_col), "Dropping unparseable date");
                }
                date.map(|d| (row, d))
            })
            .filter(|(_, date)| self.window.contains(*date))
            .collect();

        if windowed.is_empty() {
            return Ok(Extraction::Empty {
                reason: "No data found.".to_string(),
                stats: ExtractStats::new(table.len(), 0),
            });
        }

        // null admin-1 rows are country-level yearly aggregates, not events
        let regional: Vec<_> = windowed
            .into_iter()
            .filter_map(|(row, date)| row.value(region_col).map(|region| (row, date, region)))
            .collect();

        if regional.is_empty() {
            return Ok(Extraction::Empty {
                reason: "No regional data found after filtering aggregations.".to_string(),
                stats: ExtractStats::new(table.len(), 0),
            });
        }

        let mut months: BTreeMap<NaiveDate, BTreeMap<RegionBucket, DeathSums>> = BTreeMap::new();
        for (row, date, region) in &regional {
            let bucket = RegionBucket::classify(region);
            debug!(region = *region, bucket = %bucket, "Classified region");
            let month = month_start(date.date());
            let sums = months
                .entry(month)
                .or_default()
                .entry(bucket)
                .or_default();
            sums.civilian += deaths(row.raw(civilians_col));
            sums.combatant += deaths(row.raw(deaths_a_col)) + deaths(row.raw(deaths_b_col));
        }

        let output: Vec<MonthlyCasualties> = months
            .into_iter()
            .map(|(month, buckets)| MonthlyCasualties {
                date: month.format("%Y-%m-%d").to_string(),
                month: month.format("%B %Y").to_string(),
                regions: RegionBucket::ALL
                    .iter()
                    .map(|bucket| {
                        let sums = buckets.get(bucket).copied().unwrap_or_default();
                        (
                            *bucket,
                            Casualties {
                                civilian: sums.civilian.trunc() as u64,
                                combatant: sums.combatant.trunc() as u64,
                            },
                        )
                    })
                    .collect(),
            })
            .collect();

        let stats = ExtractStats::new(table.len(), regional.len());
        Ok(Extraction::Ready { output, stats })
    }
}

impl Default for UcdpExtractor {
    fn default() -> Self {
        Self::from_config(&UcdpConfig::default())
    }
}

impl Extractor for UcdpExtractor {
    type Output = Vec<MonthlyCasualties>;

    fn name(&self) -> &'static str {
        "ucdp"
    }

    fn extract(&self, input: &Path) -> Result<Extraction<Vec<MonthlyCasualties>>> {
        let table = Table::from_path(input, HeaderCase::Insensitive, HeaderRow::First)?;
        self.extract_table(&table)
    }

    fn record_count(&self, output: &Vec<MonthlyCasualties>) -> usize {
        output.len()
    }

    fn summary(&self, output: &Vec<MonthlyCasualties>) -> Vec<String> {
        match (output.first(), output.last()) {
            (Some(first), Some(last)) => vec![format!(
                "Successfully processed {} monthly entries ({} to {}).",
                output.len(),
                first.month,
                last.month
            )],
            _ => Vec::new(),
        }
    }
}

fn month_start(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// Missing, non-numeric and negative death counts contribute nothing.
fn deaths(raw: &str) -> f64 {
    parse_f64(raw).filter(|v| *v > 0.0).unwrap_or(0.0)
}
