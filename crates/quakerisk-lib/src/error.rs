use std::path::PathBuf;

use thiserror::Error;

/// Convenient result alias for the quakerisk library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
///
/// The analysis pipeline itself never fails; these variants cover the parse
/// boundary and configuration.
#[derive(Debug, Error)]
pub enum Error {
    /// Input file could not be located at the resolved path.
    #[error("input file not found at {path}")]
    InputNotFound { path: PathBuf },

    /// Raised when a data file is structurally unusable (e.g. missing columns).
    #[error("invalid {source_name} data: {message}")]
    DataValidation {
        source_name: &'static str,
        message: String,
    },

    /// Raised when a time window cannot be constructed.
    #[error("invalid time window: {message}")]
    InvalidWindow { message: String },

    /// Raised when an analysis configuration value is out of range.
    #[error("invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Wrapper for CSV parsing errors.
    #[error(transparent)]
    Csv(#[from] csv::Error),

    /// Wrapper for JSON parsing errors.
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// Wrapper for GeoJSON parsing errors.
    #[error(transparent)]
    GeoJson(#[from] geojson::Error),
}
