use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PreprocessError {
    #[error("Input file '{}' not found", .0.display())]
    InputNotFound(PathBuf),

    #[error("Missing required column: {column} (looked for {candidates})")]
    MissingColumn { column: String, candidates: String },

    #[error("Country '{0}' not found in CSV")]
    CountryNotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML deserialization failed: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl PreprocessError {
    pub fn missing_column(column: &str, candidates: &[&str]) -> Self {
        PreprocessError::MissingColumn {
            column: column.to_string(),
            candidates: candidates.join(" | "),
        }
    }
}

pub type Result<T> = std::result::Result<T, PreprocessError>;
