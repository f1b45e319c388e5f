use serde::Serialize;
use std::path::Path;
use tracing::{debug, info, warn};

use super::normalize::RegionTable;
use super::{Bounds, DateWindow, ExtractStats, Extraction, Extractor};
use crate::config::GedConfig;
use crate::constants::{COUNTRY_ALIASES, DATE_START_ALIASES, FATALITY_ALIASES, REGION_ALIASES};
use crate::error::Result;
use crate::output::Indent;
use crate::parse::{parse_count, parse_datetime};
use crate::table::{HeaderCase, HeaderRow, Table};

/// One georeferenced event as the regional conflict chart consumes it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConflictEvent {
    pub date: String,
    pub region: String,
    pub fatalities: u64,
}

/// Per-event extractor with exact-match governorate canonicalization.
#[derive(Debug, Clone)]
pub struct GedExtractor {
    regions: RegionTable,
    country_pattern: String,
    window: DateWindow,
}

impl GedExtractor {
    pub fn new(regions: RegionTable, country_pattern: &str, window: DateWindow) -> Self {
        Self {
            regions,
            country_pattern: country_pattern.to_lowercase(),
            window,
        }
    }

    pub fn from_config(config: &GedConfig) -> Self {
        Self::new(
            RegionTable::syria(),
            &config.country_pattern,
            DateWindow::new(config.window_start, config.window_end, Bounds::Exclusive),
        )
    }

    /// Regions in the output that are not canonical names, in first-seen order.
    pub fn unmapped_regions(&self, events: &[ConflictEvent]) -> Vec<String> {
        let mut unmapped: Vec<String> = Vec::new();
        for event in events {
            if !self.regions.is_canonical(&event.region) && !unmapped.contains(&event.region) {
                unmapped.push(event.region.clone());
            }
        }
        unmapped
    }

    pub fn extract_table(&self, table: &Table) -> Result<Extraction<Vec<ConflictEvent>>> {
        let fatality_col = table.require(FATALITY_ALIASES)?;
        let region_col = table.require(REGION_ALIASES)?;
        let date_col = table.require(DATE_START_ALIASES)?;
        let country_col = table.resolve(COUNTRY_ALIASES);

        debug!(
            fatality = table.header_name(fatality_col),
            region = table.header_name(region_col),
            "Resolved columns"
        );

        let mut in_window = Vec::new();
        for row in table.rows() {
            if let Some(col) = country_col {
                if !row.raw(col).to_lowercase().contains(&self.country_pattern) {
                    continue;
                }
            }
            let Some(date) = parse_datetime(row.raw(date_col)) else {
                debug!(value = row.raw(date_col), "Dropping unparseable date");
                continue;
            };
            if self.window.contains(date) {
                in_window.push((row, date));
            }
        }

        if in_window.is_empty() {
            return Ok(Extraction::Empty {
                reason: "No data found after filtering.".to_string(),
                stats: ExtractStats::new(table.len(), 0),
            });
        }

        let events: Vec<ConflictEvent> = in_window
            .into_iter()
            .filter_map(|(row, date)| {
                let region = row.value(region_col)?;
                Some(ConflictEvent {
                    date: date.format("%Y-%m-%d").to_string(),
                    region: self.regions.canonicalize(region),
                    fatalities: parse_count(row.raw(fatality_col)),
                })
            })
            .collect();

        let unmapped = self.unmapped_regions(&events);
        if unmapped.is_empty() {
            info!("All regions mapped to canonical names");
        }
        for region in &unmapped {
            warn!("Region '{}' not in target list", region);
        }

        let stats = ExtractStats::new(table.len(), events.len());
        Ok(Extraction::Ready { output: events, stats })
    }
}

impl Default for GedExtractor {
    fn default() -> Self {
        Self::from_config(&GedConfig::default())
    }
}

impl Extractor for GedExtractor {
    type Output = Vec<ConflictEvent>;

    fn name(&self) -> &'static str {
        "ged"
    }

    fn indent(&self) -> Indent {
        Indent::Four
    }

    fn extract(&self, input: &Path) -> Result<Extraction<Vec<ConflictEvent>>> {
        let table = Table::from_path(input, HeaderCase::Insensitive, HeaderRow::First)?;
        self.extract_table(&table)
    }

    fn record_count(&self, output: &Vec<ConflictEvent>) -> usize {
        output.len()
    }

    fn summary(&self, output: &Vec<ConflictEvent>) -> Vec<String> {
        vec![format!("Success! Saved {} events", output.len())]
    }
}
