//! Error types for isbdm-mdx library.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for isbdm-mdx operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur during conversion.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The input file does not exist.
    #[error("Input file not found: {}", .0.display())]
    NotFound(PathBuf),

    /// The input file exists but contains no markup.
    #[error("Input file is empty: {}", .0.display())]
    EmptyInput(PathBuf),

    /// The page has no title heading, so it cannot be identified.
    #[error("No title heading found in {}", .0.display())]
    MissingTitle(PathBuf),

    /// The page matches none of the known document layouts.
    #[error("Unrecognized document layout: {0}")]
    UnknownKind(String),

    /// A file selection pattern could not be compiled.
    #[error("Invalid pattern '{pattern}': {reason}")]
    InvalidPattern {
        /// The pattern as given by the caller
        pattern: String,
        /// Why compilation failed
        reason: String,
    },

    /// Error reading or writing a YAML header block.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Error reading or writing JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Error during rendering.
    #[error("Rendering error: {0}")]
    Render(String),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Build an [`Error::InvalidPattern`] from a regex compilation failure.
    pub fn invalid_pattern(pattern: impl Into<String>, err: regex::Error) -> Self {
        Error::InvalidPattern {
            pattern: pattern.into(),
            reason: err.to_string(),
        }
    }
}
