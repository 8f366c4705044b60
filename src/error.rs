//! Error types for price_scraper

use thiserror::Error;

/// Main error type for price_scraper
///
/// Field-level and record-level extraction problems never show up here; they
/// are absorbed where they happen. Only failures that stop a whole run (or a
/// single export sink) are represented.
#[derive(Error, Debug)]
pub enum ScraperError {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Invalid selector: {0}")]
    Selector(String),

    #[error("Invalid rate for {code}: {rate}")]
    InvalidRate { code: String, rate: f64 },

    #[error("Conversion error: {0}")]
    Conversion(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Export error: {0}")]
    Export(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl ScraperError {
    /// True for failures of the fetch collaborator
    pub fn is_transport(&self) -> bool {
        matches!(self, ScraperError::Transport(_))
    }
}

/// Result type alias for price_scraper operations
pub type Result<T> = std::result::Result<T, ScraperError>;
