//! Error types for the tabletscan library

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for tabletscan operations
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// The image handed to the extractor has no pixels
    #[error("Invalid image: {width}x{height} has no pixels")]
    InvalidImage { width: u32, height: u32 },

    /// Out-of-range configuration, rejected when an extractor or policy is built
    #[error("Invalid configuration: {parameter} = {value} ({reason})")]
    Config {
        parameter: String,
        value: String,
        reason: String,
    },

    #[error("Failed to read record file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed record file: {0}")]
    Csv(#[from] csv::Error),

    /// A record row was present but one of its required fields was blank
    #[error("Record on row {row} is missing required field '{field}'")]
    MissingField { row: usize, field: &'static str },

    #[error("Duplicate record name: {name}")]
    DuplicateRecord { name: String },

    #[error("Failed to load image: {0}")]
    ImageLoad(#[from] image::ImageError),

    #[error("Invalid JSON configuration: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Debug output error at {}: {reason}", .path.display())]
    DebugOutput { path: PathBuf, reason: String },
}

impl Error {
    /// Create a configuration error for a named parameter
    pub fn config(
        parameter: impl Into<String>,
        value: impl ToString,
        reason: impl Into<String>,
    ) -> Self {
        Error::Config {
            parameter: parameter.into(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }

    pub fn is_invalid_image(&self) -> bool {
        matches!(self, Error::InvalidImage { .. })
    }

    pub fn is_config(&self) -> bool {
        matches!(self, Error::Config { .. })
    }
}
