//! Error types for voxcat
//!
//! Catalog operations never fail: capacity overflow and unknown locales are
//! logged and degrade to no-ops or `None`. These errors cover everything
//! around the catalog (configuration, locale parsing, engine setup).

use std::io;
use thiserror::Error;

/// Main error type for voxcat
#[derive(Error, Debug)]
pub enum VoxError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("INI parse error: {0}")]
    IniParse(String),

    #[error("Speech engine error: {0}")]
    Engine(String),

    #[error("Invalid locale: {0:?}")]
    InvalidLocale(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(String),

    #[error("{0}")]
    Other(String),
}

/// Result type alias for voxcat operations
pub type Result<T> = std::result::Result<T, VoxError>;

impl From<String> for VoxError {
    fn from(s: String) -> Self {
        VoxError::Other(s)
    }
}

impl From<&str> for VoxError {
    fn from(s: &str) -> Self {
        VoxError::Other(s.to_string())
    }
}

impl From<serde_json::Error> for VoxError {
    fn from(e: serde_json::Error) -> Self {
        VoxError::Json(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = VoxError::InvalidLocale("12_34".to_string());
        assert_eq!(err.to_string(), "Invalid locale: \"12_34\"");

        let err: VoxError = "boom".into();
        assert_eq!(err.to_string(), "boom");
    }

    #[test]
    fn test_io_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "missing");
        let err: VoxError = io_err.into();
        assert!(matches!(err, VoxError::Io(_)));
    }
}
