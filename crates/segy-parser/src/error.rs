//! Error types for SEG-Y parsing operations.

use seisviz_common::VizError;
use thiserror::Error;

/// Result type for SEG-Y parser operations.
pub type SegyResult<T> = Result<T, SegyError>;

/// Error types for SEG-Y parsing.
#[derive(Error, Debug)]
pub enum SegyError {
    /// File I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Structurally invalid file
    #[error("Invalid SEG-Y format: {0}")]
    InvalidFormat(String),

    /// Data sample format code this reader does not decode
    #[error("Unsupported data sample format code: {0}")]
    UnsupportedFormat(i16),

    /// Trace index outside the file
    #[error("Trace {index} out of range (file has {count} traces)")]
    TraceOutOfRange { index: usize, count: usize },
}

impl From<SegyError> for VizError {
    fn from(err: SegyError) -> Self {
        match err {
            SegyError::IoError(e) if e.kind() == std::io::ErrorKind::NotFound => {
                VizError::SourceNotFound(e.to_string())
            }
            other => VizError::DataReadError(other.to_string()),
        }
    }
}
