//! HTTP error responses.

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use seisviz_common::VizError;

/// Maximum characters of an error message sent to clients.
pub const MAX_MESSAGE_CHARS: usize = 400;

/// Body format of an error response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorFormat {
    /// `{"error": "..."}`
    Json,
    /// `"<operation> failed: ...\n"` as text/plain
    Text,
}

/// An operation failure, converted to a response at the handler boundary.
#[derive(Debug)]
pub struct ApiError {
    pub operation: &'static str,
    pub format: ErrorFormat,
    pub error: VizError,
}

impl ApiError {
    pub fn new(operation: &'static str, format: ErrorFormat, error: VizError) -> Self {
        Self {
            operation,
            format,
            error,
        }
    }

    pub fn status(&self) -> StatusCode {
        StatusCode::from_u16(self.error.http_status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// The client-facing message, at most [`MAX_MESSAGE_CHARS`] characters.
    pub fn message(&self) -> String {
        truncate_chars(&self.error.to_string(), MAX_MESSAGE_CHARS)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(
                operation = self.operation,
                kind = self.error.kind(),
                error = ?self.error,
                "Operation failed"
            );
        } else {
            tracing::debug!(
                operation = self.operation,
                kind = self.error.kind(),
                error = %self.error,
                "Request rejected"
            );
        }
        crate::metrics::record_error(self.operation, self.error.kind());

        let message = self.message();
        match self.format {
            ErrorFormat::Json => {
                (status, Json(serde_json::json!({ "error": message }))).into_response()
            }
            ErrorFormat::Text => (
                status,
                [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
                format!("{} failed: {}\n", self.operation, message),
            )
                .into_response(),
        }
    }
}

fn truncate_chars(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        Some((idx, _)) => s[..idx].to_string(),
        None => s.to_string(),
    }
}
