//! Extract → filter → reshape → write driver shared by the extractor binaries.

pub mod gdp;
pub mod ged;
pub mod geojson;
pub mod normalize;
pub mod ucdp;
pub mod unhcr;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::Serialize;
use std::path::Path;
use tracing::{info, instrument, warn};

use crate::error::Result;
use crate::output::{self, Indent};

/// Row accounting for one extraction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ExtractStats {
    pub rows_read: usize,
    pub rows_used: usize,
    pub rows_skipped: usize,
}

impl ExtractStats {
    pub fn new(rows_read: usize, rows_used: usize) -> Self {
        Self {
            rows_read,
            rows_used,
            rows_skipped: rows_read.saturating_sub(rows_used),
        }
    }
}

/// Outcome of an extraction before anything is written.
#[derive(Debug)]
pub enum Extraction<T> {
    Ready { output: T, stats: ExtractStats },
    /// Filters left nothing worth writing; the reason is reported as a warning.
    Empty { reason: String, stats: ExtractStats },
}

/// One dataset-specific transformation.
pub trait Extractor {
    type Output: Serialize;

    /// Short identifier used in logs
    fn name(&self) -> &'static str;

    fn indent(&self) -> Indent {
        Indent::Two
    }

    /// Read and transform the whole input in memory.
    fn extract(&self, input: &Path) -> Result<Extraction<Self::Output>>;

    /// Number of top-level records in the output.
    fn record_count(&self, output: &Self::Output) -> usize;

    /// Human-readable lines printed after a successful write.
    fn summary(&self, _output: &Self::Output) -> Vec<String> {
        Vec::new()
    }
}

/// Result of a complete pipeline run
#[derive(Debug, Serialize)]
pub struct PipelineResult {
    pub extractor: String,
    pub stats: ExtractStats,
    pub records_written: usize,
    pub output_file: Option<String>,
    pub warning: Option<String>,
}

pub struct Pipeline;

impl Pipeline {
    /// Run an extractor and write its output only once it is fully assembled.
    #[instrument(skip(extractor, input, output), fields(extractor = extractor.name()))]
    pub fn run<E: Extractor>(extractor: &E, input: &Path, output: &Path) -> Result<PipelineResult> {
        info!("Loading {}", input.display());

        match extractor.extract(input)? {
            Extraction::Ready { output: data, stats } => {
                let records = extractor.record_count(&data);
                let bytes = output::write_json(output, &data, extractor.indent())?;
                info!(
                    rows_read = stats.rows_read,
                    rows_used = stats.rows_used,
                    rows_skipped = stats.rows_skipped,
                    records,
                    bytes,
                    "Wrote {}",
                    output.display()
                );

                for line in extractor.summary(&data) {
                    println!("{}", line);
                }
                println!("✓ Output saved to: {}", output.display());

                Ok(PipelineResult {
                    extractor: extractor.name().to_string(),
                    stats,
                    records_written: records,
                    output_file: Some(output.display().to_string()),
                    warning: None,
                })
            }
            Extraction::Empty { reason, stats } => {
                warn!(
                    rows_read = stats.rows_read,
                    "{}; nothing written to {}",
                    reason,
                    output.display()
                );
                println!("Warning: {}", reason);

                Ok(PipelineResult {
                    extractor: extractor.name().to_string(),
                    stats,
                    records_written: 0,
                    output_file: None,
                    warning: Some(reason),
                })
            }
        }
    }
}

/// Whether the window's end points themselves are inside it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bounds {
    Exclusive,
    Inclusive,
}

/// A date range compared at midnight precision against event timestamps.
#[derive(Debug, Clone, Copy)]
pub struct DateWindow {
    start: NaiveDateTime,
    end: NaiveDateTime,
    bounds: Bounds,
}

impl DateWindow {
    pub fn new(start: NaiveDate, end: NaiveDate, bounds: Bounds) -> Self {
        Self {
            start: start.and_time(NaiveTime::MIN),
            end: end.and_time(NaiveTime::MIN),
            bounds,
        }
    }

    pub fn contains(&self, at: NaiveDateTime) -> bool {
        match self.bounds {
            Bounds::Exclusive => at > self.start && at < self.end,
            Bounds::Inclusive => at >= self.start && at <= self.end,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_exclusive_window_drops_end_points() {
        let window = DateWindow::new(date(2010, 1, 1), date(2021, 1, 1), Bounds::Exclusive);
        assert!(!window.contains(date(2010, 1, 1).and_time(NaiveTime::MIN)));
        assert!(window.contains(date(2010, 1, 2).and_time(NaiveTime::MIN)));
        assert!(window.contains(date(2020, 12, 31).and_time(NaiveTime::MIN)));
        assert!(!window.contains(date(2021, 1, 1).and_time(NaiveTime::MIN)));
    }

    #[test]
    fn test_inclusive_window_keeps_end_points() {
        let window = DateWindow::new(date(2010, 7, 1), date(2021, 1, 1), Bounds::Inclusive);
        assert!(window.contains(date(2010, 7, 1).and_time(NaiveTime::MIN)));
        assert!(window.contains(date(2021, 1, 1).and_time(NaiveTime::MIN)));
        assert!(!window.contains(date(2010, 6, 30).and_time(NaiveTime::MIN)));
        assert!(!window.contains(date(2021, 1, 2).and_time(NaiveTime::MIN)));
    }

    #[test]
    fn test_stats_count_skipped_rows() {
        let stats = ExtractStats::new(10, 7);
        assert_eq!(stats.rows_skipped, 3);
    }
}
