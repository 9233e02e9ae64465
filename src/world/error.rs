//! Error types for level data loading.

use thiserror::Error;

/// Errors that can occur when loading level data.
#[derive(Debug, Error)]
pub enum DataLoadError {
    /// File or directory could not be found.
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// File could not be read.
    #[error("Failed to read file '{path}': {details}")]
    ReadError { path: String, details: String },

    /// RON parsing failed.
    #[error("Parse error in '{path}': {details}")]
    ParseError { path: String, details: String },

    /// The level parsed but cannot be played.
    #[error("Invalid level '{name}': {reason}")]
    InvalidLevel { name: String, reason: String },

    /// A levels directory held no usable level.
    #[error("No levels found in '{0}'")]
    NoLevels(String),
}
