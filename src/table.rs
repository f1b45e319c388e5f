use csv::{ReaderBuilder, StringRecord};
use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, warn};

use crate::error::{PreprocessError, Result};

/// Cell values treated as missing, matching the usual dataframe NA markers.
const NULL_MARKERS: [&str; 10] = [
    "NA", "N/A", "n/a", "NULL", "null", "NaN", "nan", "None", "#N/A", "<NA>",
];

/// How header names are compared when resolving columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderCase {
    Exact,
    /// Headers are trimmed and lowercased; aliases must be given in lowercase.
    Insensitive,
}

/// Where the header row sits in the file.
#[derive(Debug, Clone, Copy)]
pub enum HeaderRow<'a> {
    First,
    /// First record holding a cell equal to this name; earlier records are preamble.
    Containing(&'a str),
}

/// A resolved column position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column(usize);

impl Column {
    pub fn index(self) -> usize {
        self.0
    }
}

/// A whole CSV file held in memory.
#[derive(Debug)]
pub struct Table {
    headers: Vec<String>,
    index: HashMap<String, usize>,
    records: Vec<StringRecord>,
    case: HeaderCase,
    /// Records that failed CSV decoding and were dropped
    pub malformed: usize,
}

impl Table {
    pub fn from_path(path: &Path, case: HeaderCase, header_row: HeaderRow<'_>) -> Result<Self> {
        if !path.exists() {
            return Err(PreprocessError::InputNotFound(path.to_path_buf()));
        }
        let file = File::open(path)?;
        Self::from_reader(file, case, header_row)
    }

    pub fn from_reader<R: Read>(reader: R, case: HeaderCase, header_row: HeaderRow<'_>) -> Result<Self> {
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(reader);

        let mut header: Option<StringRecord> = None;
        let mut records = Vec::new();
        let mut malformed = 0;

        for (idx, result) in reader.records().enumerate() {
            let record = match result {
                Ok(r) => r,
                Err(e) => {
                    debug!("Skipping malformed CSV record {}: {}", idx + 1, e);
                    malformed += 1;
                    continue;
                }
            };

            if header.is_some() {
                records.push(record);
                continue;
            }

            let is_header = match header_row {
                HeaderRow::First => true,
                HeaderRow::Containing(name) => record.iter().any(|cell| clean_header(cell) == name),
            };
            if is_header {
                header = Some(record);
            } else {
                debug!("Skipping preamble line {}", idx + 1);
            }
        }

        if malformed > 0 {
            warn!(malformed, "Skipped {} malformed CSV records", malformed);
        }

        let header = header.ok_or_else(|| {
            PreprocessError::InvalidInput(match header_row {
                HeaderRow::First => "CSV input is empty".to_string(),
                HeaderRow::Containing(name) => format!("no header row containing '{}'", name),
            })
        })?;

        let headers: Vec<String> = header.iter().map(|h| clean_header(h).to_string()).collect();
        let mut index = HashMap::new();
        for (i, name) in headers.iter().enumerate() {
            // first occurrence wins on duplicate headers
            index.entry(header_key(name, case)).or_insert(i);
        }

        Ok(Self {
            headers,
            index,
            records,
            case,
            malformed,
        })
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn rows(&self) -> impl Iterator<Item = Row<'_>> {
        self.records.iter().map(|record| Row { record })
    }

    pub fn column(&self, name: &str) -> Option<Column> {
        self.index.get(&header_key(name, self.case)).copied().map(Column)
    }

    /// First alias present in the header wins.
    pub fn resolve(&self, aliases: &[&str]) -> Option<Column> {
        aliases.iter().find_map(|alias| self.column(alias))
    }

    /// Like [`Table::resolve`] but a missing column is a schema error.
    pub fn require(&self, aliases: &[&str]) -> Result<Column> {
        self.resolve(aliases).ok_or_else(|| {
            PreprocessError::missing_column(aliases.first().copied().unwrap_or_default(), aliases)
        })
    }

    /// Name of a resolved column as it appears in the file.
    pub fn header_name(&self, column: Column) -> &str {
        &self.headers[column.0]
    }
}

/// One data record; short rows read as empty cells.
#[derive(Debug, Clone, Copy)]
pub struct Row<'a> {
    record: &'a StringRecord,
}

impl<'a> Row<'a> {
    /// Raw cell text, empty when the row is short.
    pub fn raw(&self, column: Column) -> &'a str {
        self.record.get(column.0).unwrap_or("")
    }

    /// Trimmed cell text, or `None` for blank and NA-marker cells.
    pub fn value(&self, column: Column) -> Option<&'a str> {
        let v = self.raw(column).trim();
        if v.is_empty() || NULL_MARKERS.contains(&v) {
            None
        } else {
            Some(v)
        }
    }
}

fn clean_header(name: &str) -> &str {
    name.trim_start_matches('\u{feff}').trim()
}

fn header_key(name: &str, case: HeaderCase) -> String {
    match case {
        HeaderCase::Exact => name.to_string(),
        HeaderCase::Insensitive => name.trim().to_lowercase(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(csv: &str, case: HeaderCase) -> Table {
        Table::from_reader(csv.as_bytes(), case, HeaderRow::First).unwrap()
    }

    #[test]
    fn test_alias_resolution_prefers_first_candidate() {
        let t = table("region,adm_1,best\nA,B,1\n", HeaderCase::Insensitive);
        let region = t.resolve(&["adm_1", "region"]).unwrap();
        assert_eq!(t.header_name(region), "adm_1");
    }

    #[test]
    fn test_insensitive_headers_match_any_case() {
        let t = table(" Best_Est ,ADM_1\n5,Aleppo\n", HeaderCase::Insensitive);
        let fatality = t.resolve(&["best", "best_est"]).unwrap();
        let row = t.rows().next().unwrap();
        assert_eq!(row.value(fatality), Some("5"));
        assert!(t.column("adm_1").is_some());
    }

    #[test]
    fn test_exact_headers_are_case_sensitive() {
        let t = table("Year,IDPs\n2015,3\n", HeaderCase::Exact);
        assert!(t.column("year").is_none());
        assert!(t.column("Year").is_some());
    }

    #[test]
    fn test_require_reports_missing_column() {
        let t = table("date_start,best\n2015-01-01,3\n", HeaderCase::Insensitive);
        let err = t.require(&["adm_1", "region"]).unwrap_err();
        assert!(err.to_string().contains("adm_1 | region"));
    }

    #[test]
    fn test_preamble_is_skipped_until_header() {
        let csv = "\"Data Source\",\"World Development Indicators\"\n\n\"Last Updated Date\",\"2024-01-01\"\n\"Country Name\",\"Indicator Name\",\"2000\"\n\"Syria\",\"GDP (current US$)\",\"1\"\n";
        let t = Table::from_reader(csv.as_bytes(), HeaderCase::Exact, HeaderRow::Containing("Country Name")).unwrap();
        assert_eq!(t.headers(), &["Country Name", "Indicator Name", "2000"]);
        assert_eq!(t.len(), 1);
    }

    #[test]
    fn test_short_rows_and_null_markers_read_as_missing() {
        let t = table("a,b,c\n1,NA\n", HeaderCase::Exact);
        let row = t.rows().next().unwrap();
        assert_eq!(row.value(t.column("a").unwrap()), Some("1"));
        assert_eq!(row.value(t.column("b").unwrap()), None);
        assert_eq!(row.raw(t.column("c").unwrap()), "");
    }

    #[test]
    fn test_bom_is_stripped_from_first_header() {
        let t = table("\u{feff}Year,Refugees\n2015,1\n", HeaderCase::Exact);
        assert!(t.column("Year").is_some());
    }

    #[test]
    fn test_malformed_records_are_counted_and_skipped() {
        let bytes: &[u8] = b"a,b\n1,2\n\xff\xfe,3\n4,5\n";
        let t = Table::from_reader(bytes, HeaderCase::Exact, HeaderRow::First).unwrap();
        assert_eq!(t.malformed, 1);
        assert_eq!(t.len(), 2);
        let a = t.column("a").unwrap();
        let values: Vec<&str> = t.rows().map(|row| row.raw(a)).collect();
        assert_eq!(values, vec!["1", "4"]);
    }

    #[test]
    fn test_missing_file_is_distinct_error() {
        let err = Table::from_path(Path::new("/nonexistent/input.csv"), HeaderCase::Exact, HeaderRow::First)
            .unwrap_err();
        assert!(matches!(err, PreprocessError::InputNotFound(_)));
    }
}
