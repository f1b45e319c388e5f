use chrono::NaiveDate;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::constants;
use crate::error::{PreprocessError, Result};

/// Environment variable naming an explicit config file.
pub const CONFIG_PATH_ENV: &str = "PREPROCESS_CONFIG";
/// Environment variable enabling the JSON file log.
pub const LOG_DIR_ENV: &str = "PREPROCESS_LOG_DIR";
pub const DEFAULT_CONFIG_PATH: &str = "preprocess.toml";

/// Settings shared by all extractor binaries.
///
/// Every section is optional; a missing file or section yields the
/// defaults the extractors were written against. Dates must be quoted
/// strings (`window_start = "2010-01-01"`), not TOML date literals.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub logging: LoggingConfig,
    pub gdp: GdpConfig,
    pub ged: GedConfig,
    pub ucdp: UcdpConfig,
    pub unhcr: UnhcrConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Directory for the daily rolling JSON log; console only when unset
    pub dir: Option<PathBuf>,
    pub file_prefix: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            dir: None,
            file_prefix: "preprocess.log".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GdpConfig {
    pub indicator: String,
    /// Empty string selects every country
    pub country: String,
}

impl Default for GdpConfig {
    fn default() -> Self {
        Self {
            indicator: constants::GDP_INDICATOR.to_string(),
            country: constants::DEFAULT_GDP_COUNTRY.to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GedConfig {
    pub country_pattern: String,
    pub window_start: NaiveDate,
    pub window_end: NaiveDate,
}

impl Default for GedConfig {
    fn default() -> Self {
        Self {
            country_pattern: constants::DEFAULT_COUNTRY_PATTERN.to_string(),
            window_start: default_date(constants::GED_WINDOW_START),
            window_end: default_date(constants::GED_WINDOW_END),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UcdpConfig {
    pub window_start: NaiveDate,
    pub window_end: NaiveDate,
}

impl Default for UcdpConfig {
    fn default() -> Self {
        Self {
            window_start: default_date(constants::UCDP_WINDOW_START),
            window_end: default_date(constants::UCDP_WINDOW_END),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UnhcrConfig {
    pub top_hosts: usize,
    /// Replacement `iso3,iso2,name,continent` table for the embedded one
    pub countries_csv: Option<PathBuf>,
}

impl Default for UnhcrConfig {
    fn default() -> Self {
        Self {
            top_hosts: constants::DEFAULT_TOP_HOSTS,
            countries_csv: None,
        }
    }
}

// The constants are fixed ISO dates, so the fallback is never taken.
fn default_date(iso: &str) -> NaiveDate {
    NaiveDate::parse_from_str(iso, "%Y-%m-%d").unwrap_or_default()
}

impl Config {
    /// Load configuration from `PREPROCESS_CONFIG` or `preprocess.toml`.
    ///
    /// An explicitly named file must exist; the default file is optional.
    pub fn load() -> Result<Self> {
        dotenv::dotenv().ok();

        let (path, explicit) = match env::var(CONFIG_PATH_ENV) {
            Ok(p) if !p.trim().is_empty() => (PathBuf::from(p.trim()), true),
            _ => (PathBuf::from(DEFAULT_CONFIG_PATH), false),
        };

        let mut config = if path.exists() {
            Self::from_path(&path)?
        } else if explicit {
            return Err(PreprocessError::Config(format!(
                "Config file '{}' named by {} does not exist",
                path.display(),
                CONFIG_PATH_ENV
            )));
        } else {
            Self::default()
        };

        if let Ok(dir) = env::var(LOG_DIR_ENV) {
            if !dir.trim().is_empty() {
                config.logging.dir = Some(PathBuf::from(dir.trim()));
            }
        }

        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            PreprocessError::Config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.ged.window_start >= self.ged.window_end {
            return Err(PreprocessError::Config(
                "ged.window_start must be before ged.window_end".to_string(),
            ));
        }
        if self.ucdp.window_start > self.ucdp.window_end {
            return Err(PreprocessError::Config(
                "ucdp.window_start must not be after ucdp.window_end".to_string(),
            ));
        }
        if self.unhcr.top_hosts == 0 {
            return Err(PreprocessError::Config(
                "unhcr.top_hosts must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = Config::from_toml_str("").unwrap();
        assert_eq!(config.gdp.indicator, "GDP (current US$)");
        assert_eq!(config.gdp.country, "Syrian Arab Republic");
        assert_eq!(config.ged.window_start.to_string(), "2010-01-01");
        assert_eq!(config.ucdp.window_start.to_string(), "2010-07-01");
        assert_eq!(config.unhcr.top_hosts, 5);
        assert!(config.logging.dir.is_none());
    }

    #[test]
    fn test_partial_sections_keep_other_defaults() {
        let config = Config::from_toml_str(
            r#"
            [ged]
            country_pattern = "Iraq"

            [unhcr]
            top_hosts = 3
            "#,
        )
        .unwrap();
        assert_eq!(config.ged.country_pattern, "Iraq");
        assert_eq!(config.ged.window_end.to_string(), "2021-01-01");
        assert_eq!(config.unhcr.top_hosts, 3);
    }

    #[test]
    fn test_inverted_window_is_rejected() {
        let result = Config::from_toml_str(
            r#"
            [ged]
            window_start = "2021-01-01"
            window_end = "2010-01-01"
            "#,
        );
        assert!(matches!(result, Err(PreprocessError::Config(_))));
    }
}
