//! Error types for the density converter.
//!
//! Provides a hierarchy of error types using `thiserror` for ergonomic error handling.

use serde::Serialize;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Validation errors for the run configuration.
#[derive(Error, Debug, Serialize)]
pub enum ValidationError {
    /// Path-related validation error
    #[error("Path error: {0}")]
    Path(#[from] PathError),
    /// Invalid settings error
    #[error("Settings error: {0}")]
    Settings(String),
}

/// File path errors.
#[derive(Error, Debug, Serialize)]
pub enum PathError {
    /// File does not exist
    #[error("File not found: {0}")]
    NotFound(PathBuf),
    /// Path exists but is not a file
    #[error("Not a file: {0}")]
    NotFile(PathBuf),
    /// IO error accessing the path
    #[error("IO error: {0}")]
    IO(String),
}

/// Main error type for the converter.
///
/// Configuration errors surface before any job runs; the remaining variants
/// are captured per job and reported through the finish report.
#[derive(Error, Debug, Serialize)]
pub enum ConvertError {
    /// Configuration or input validation failed
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Image decoding failed
    #[error("Decode error: {0}")]
    Decode(String),

    /// Unsupported or invalid image format
    #[error("Format error: {0}")]
    Format(String),

    /// File IO error
    #[error("IO error: {0}")]
    IO(String),

    /// Job execution failed outside of decode/encode
    #[error("Processing error: {0}")]
    Processing(String),
}

/// Convenience result type for converter operations.
pub type ConvertResult<T> = Result<T, ConvertError>;

// Helper methods for error creation
impl ConvertError {
    pub fn decode<T: Into<String>>(msg: T) -> Self {
        Self::Decode(msg.into())
    }

    pub fn format<T: Into<String>>(msg: T) -> Self {
        Self::Format(msg.into())
    }

    pub fn io<T: Into<String>>(msg: T) -> Self {
        Self::IO(msg.into())
    }

    pub fn processing<T: Into<String>>(msg: T) -> Self {
        Self::Processing(msg.into())
    }
}

// Helper methods for validation error creation
impl ValidationError {
    pub fn path_not_found(path: impl Into<PathBuf>) -> Self {
        Self::Path(PathError::NotFound(path.into()))
    }

    pub fn not_a_file(path: impl Into<PathBuf>) -> Self {
        Self::Path(PathError::NotFile(path.into()))
    }

    pub fn settings(msg: impl Into<String>) -> Self {
        Self::Settings(msg.into())
    }
}

// Convert std::io::Error to ConvertError
impl From<io::Error> for ConvertError {
    fn from(err: io::Error) -> Self {
        Self::IO(err.to_string())
    }
}

// Convert io::Error to PathError
impl From<io::Error> for PathError {
    fn from(err: io::Error) -> Self {
        Self::IO(err.to_string())
    }
}

// Convert PathError to ConvertError
impl From<PathError> for ConvertError {
    fn from(err: PathError) -> Self {
        Self::Validation(ValidationError::Path(err))
    }
}

// Map image crate errors onto the per-job taxonomy
impl From<image::ImageError> for ConvertError {
    fn from(err: image::ImageError) -> Self {
        match err {
            image::ImageError::IoError(e) => Self::IO(e.to_string()),
            image::ImageError::Unsupported(e) => Self::Format(e.to_string()),
            other => Self::Decode(other.to_string()),
        }
    }
}
