//! Prometheus metrics for service operations.
//!
//! Recorded through the `metrics` facade; the binary installs the
//! Prometheus recorder and `/metrics` renders it.

use metrics::{counter, histogram};
use std::time::Duration;

pub const REQUESTS_TOTAL: &str = "seisviz_requests_total";
pub const ERRORS_TOTAL: &str = "seisviz_errors_total";
pub const OPERATION_DURATION: &str = "seisviz_operation_duration_seconds";

/// Count a request to `operation`.
pub fn record_request(operation: &'static str) {
    counter!(REQUESTS_TOTAL, "operation" => operation).increment(1);
}

/// Count a failed request, labelled with the error classification.
pub fn record_error(operation: &'static str, kind: &'static str) {
    counter!(ERRORS_TOTAL, "operation" => operation, "kind" => kind).increment(1);
}

/// Record how long an operation's blocking work took.
pub fn record_duration(operation: &'static str, elapsed: Duration) {
    histogram!(OPERATION_DURATION, "operation" => operation).record(elapsed.as_secs_f64());
}
