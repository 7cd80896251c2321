use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by the metrics pipeline.
#[derive(Error, Debug)]
pub enum MetricsError {
    /// A file could not be opened or read from disk.
    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A JSON document could not be parsed.
    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// A CSV document could not be parsed.
    #[error("Failed to parse CSV: {0}")]
    CsvParse(String),

    /// A record lacks one of the required `name`/`date`/`value` keys.
    #[error("Record {index}: missing required field '{field}'")]
    MissingField { index: usize, field: &'static str },

    /// A record's `date` field is not a `YYYY-MM-DD` calendar date.
    #[error("Record {index}: invalid date '{value}' (expected YYYY-MM-DD)")]
    InvalidDate { index: usize, value: String },

    /// A record's `value` field does not parse as a number.
    #[error("Record {index}: non-numeric value '{value}'")]
    NonNumericValue { index: usize, value: String },

    /// A document element is not the object shape a record requires.
    #[error("Record {index}: expected an object")]
    InvalidRecord { index: usize },

    /// The search endpoint answered a page request with an unexpected status.
    #[error("Search request for page {page} failed with HTTP status {status}")]
    Fetch { page: u32, status: u16 },

    /// A transport-level failure while talking to the search endpoint.
    #[error("Transport error: {0}")]
    Transport(String),

    /// An error originating from the terminal / TUI layer.
    #[error("Terminal error: {0}")]
    Terminal(String),

    /// Pass-through for any raw I/O error that does not carry a path.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Catch-all for errors from third-party crates via `anyhow`.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Convenience alias used throughout the metrics crates.
pub type Result<T> = std::result::Result<T, MetricsError>;
