//! HTTP request handlers.

pub mod dem;
pub mod health;
pub mod segy;

use std::str::FromStr;
use std::time::Instant;

use seisviz_common::{VizError, VizResult};

use crate::error::{ApiError, ErrorFormat};
use crate::metrics;

/// Parse an optional query parameter, using `default` when absent or blank.
pub(crate) fn parse_param<T>(raw: Option<&str>, name: &str, default: T) -> VizResult<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match raw.map(str::trim) {
        None | Some("") => Ok(default),
        Some(s) => s
            .parse()
            .map_err(|e| VizError::invalid(name, format!("'{}': {}", s, e))),
    }
}

/// Run a blocking operation off the async runtime, recording metrics.
pub(crate) async fn run_blocking<T, F>(
    operation: &'static str,
    format: ErrorFormat,
    work: F,
) -> Result<T, ApiError>
where
    F: FnOnce() -> VizResult<T> + Send + 'static,
    T: Send + 'static,
{
    metrics::record_request(operation);
    let started = Instant::now();

    let result = match tokio::task::spawn_blocking(work).await {
        Ok(result) => result,
        Err(e) => Err(VizError::InternalError(format!("worker task failed: {}", e))),
    };

    let elapsed = started.elapsed();
    metrics::record_duration(operation, elapsed);
    tracing::debug!(
        operation,
        elapsed_ms = elapsed.as_millis() as u64,
        ok = result.is_ok(),
        "Operation finished"
    );

    result.map_err(|error| ApiError::new(operation, format, error))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_param() {
        assert_eq!(parse_param::<i64>(None, "start", 7).unwrap(), 7);
        assert_eq!(parse_param::<i64>(Some(" "), "start", 7).unwrap(), 7);
        assert_eq!(parse_param::<i64>(Some("-5"), "start", 0).unwrap(), -5);
        assert_eq!(parse_param::<f64>(Some("2.5"), "zScale", 1.0).unwrap(), 2.5);

        let err = parse_param::<i64>(Some("abc"), "count", 0).unwrap_err();
        assert!(matches!(err, VizError::InvalidParameter { .. }));
        assert!(err.to_string().contains("count"));
    }

    #[tokio::test]
    async fn test_run_blocking_maps_errors() {
        let err = run_blocking::<(), _>("info", ErrorFormat::Json, || {
            Err(VizError::SourceNotFound("gone".into()))
        })
        .await
        .unwrap_err();
        assert_eq!(err.operation, "info");
        assert_eq!(err.status(), axum::http::StatusCode::NOT_FOUND);

        let value = run_blocking("info", ErrorFormat::Json, || Ok(3)).await.unwrap();
        assert_eq!(value, 3);
    }
}
