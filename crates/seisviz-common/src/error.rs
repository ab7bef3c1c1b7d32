//! Error types for seisviz services.

use thiserror::Error;

/// Result type alias using VizError.
pub type VizResult<T> = Result<T, VizError>;

/// Primary error type for gather, raster and transform operations.
#[derive(Debug, Error)]
pub enum VizError {
    // === Request Errors ===
    #[error("Invalid parameter value for '{param}': {message}")]
    InvalidParameter { param: String, message: String },

    #[error("Request exceeds limit: {0}")]
    LimitExceeded(String),

    // === Source Errors ===
    #[error("Source not found: {0}")]
    SourceNotFound(String),

    #[error("Empty source: {0}")]
    EmptySource(String),

    #[error("Failed to read data: {0}")]
    DataReadError(String),

    // === Transform Errors ===
    #[error("{what} must be 2D and non-empty, got shape={}", format_shape(.shape))]
    Shape { what: String, shape: Vec<usize> },

    #[error("Processing failed: {0}")]
    Processing(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl VizError {
    /// Build a shape error for a named array.
    pub fn shape(what: impl Into<String>, shape: &[usize]) -> Self {
        VizError::Shape {
            what: what.into(),
            shape: shape.to_vec(),
        }
    }

    /// Build an invalid parameter error.
    pub fn invalid(param: impl Into<String>, message: impl Into<String>) -> Self {
        VizError::InvalidParameter {
            param: param.into(),
            message: message.into(),
        }
    }

    /// Get the HTTP status code for this error.
    pub fn http_status_code(&self) -> u16 {
        match self {
            VizError::InvalidParameter { .. } => 400,
            VizError::SourceNotFound(_) => 404,
            VizError::LimitExceeded(_) => 413,
            _ => 500,
        }
    }

    /// Short machine-readable classification, used as a metrics label.
    pub fn kind(&self) -> &'static str {
        match self {
            VizError::InvalidParameter { .. } => "invalid_parameter",
            VizError::LimitExceeded(_) => "limit_exceeded",
            VizError::SourceNotFound(_) => "source_not_found",
            VizError::EmptySource(_) => "empty_source",
            VizError::DataReadError(_) => "data_read",
            VizError::Shape { .. } => "shape",
            VizError::Processing(_) => "processing",
            VizError::InternalError(_) => "internal",
        }
    }
}

fn format_shape(shape: &[usize]) -> String {
    let dims: Vec<String> = shape.iter().map(|d| d.to_string()).collect();
    if dims.len() == 1 {
        format!("({},)", dims[0])
    } else {
        format!("({})", dims.join(", "))
    }
}

// Conversion from common error types
impl From<std::io::Error> for VizError {
    fn from(err: std::io::Error) -> Self {
        VizError::DataReadError(err.to_string())
    }
}

impl From<serde_json::Error> for VizError {
    fn from(err: serde_json::Error) -> Self {
        VizError::InternalError(format!("JSON error: {}", err))
    }
}
