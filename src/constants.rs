/// Column names and fixed values shared by the extractors.
/// Conflict-event headers are matched case-insensitively, so their aliases are lowercase.

// World Bank wide table
pub const COUNTRY_NAME_COLUMN: &str = "Country Name";
pub const INDICATOR_NAME_COLUMN: &str = "Indicator Name";
pub const GDP_INDICATOR: &str = "GDP (current US$)";
pub const DEFAULT_GDP_COUNTRY: &str = "Syrian Arab Republic";

// Conflict events (UCDP GED and its yearly/monthly vintages)
pub const DATE_START_ALIASES: &[&str] = &["date_start"];
pub const FATALITY_ALIASES: &[&str] = &["best", "best_est"];
pub const REGION_ALIASES: &[&str] = &["adm_1", "region"];
pub const COUNTRY_ALIASES: &[&str] = &["country"];
pub const DEATHS_CIVILIANS_ALIASES: &[&str] = &["deaths_civilians"];
pub const DEATHS_A_ALIASES: &[&str] = &["deaths_a"];
pub const DEATHS_B_ALIASES: &[&str] = &["deaths_b"];

pub const DEFAULT_COUNTRY_PATTERN: &str = "Syria";
pub const GED_WINDOW_START: &str = "2010-01-01";
pub const GED_WINDOW_END: &str = "2021-01-01";
pub const UCDP_WINDOW_START: &str = "2010-07-01";
pub const UCDP_WINDOW_END: &str = "2021-01-01";

// UNHCR refugee population statistics
pub const ORIGIN_ISO_ALIASES: &[&str] = &["Country of Origin ISO"];
pub const ASYLUM_ISO_ALIASES: &[&str] = &["Country of Asylum ISO"];
pub const YEAR_ALIASES: &[&str] = &["Year"];
pub const REFUGEES_ALIASES: &[&str] = &["Refugees", "Refugees under UNHCR's mandate"];
pub const ASYLUM_SEEKERS_ALIASES: &[&str] = &["Asylum-seekers"];
pub const IDPS_ALIASES: &[&str] = &["IDPs", "IDPs of concern to UNHCR"];

pub const DEFAULT_TOP_HOSTS: usize = 5;

// GeoJSON
pub const FEATURE_COLLECTION: &str = "FeatureCollection";
pub const ISO_A3_PROPERTY: &str = "iso_a3";
