//! Error types for Flare

use thiserror::Error;

/// The main error type for Flare operations.
///
/// Only setup paths are fallible (configuration, fonts, image export);
/// per-frame engine calls never produce one.
#[derive(Debug, Error)]
pub enum FlareError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParseError(String),

    #[error("TOML serialization error: {0}")]
    TomlSerError(String),

    #[error("Invalid color: {0}")]
    InvalidColor(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Value out of range: {field} must be between {min} and {max}, got {value}")]
    ValueOutOfRange {
        field: String,
        min: f64,
        max: f64,
        value: f64,
    },

    #[error("Font load error: {0}")]
    FontLoadError(String),

    #[error("Image error: {0}")]
    ImageError(String),
}

/// Result type alias for Flare operations
pub type Result<T> = std::result::Result<T, FlareError>;

impl From<toml::de::Error> for FlareError {
    fn from(err: toml::de::Error) -> Self {
        FlareError::TomlParseError(err.to_string())
    }
}

impl From<toml::ser::Error> for FlareError {
    fn from(err: toml::ser::Error) -> Self {
        FlareError::TomlSerError(err.to_string())
    }
}
