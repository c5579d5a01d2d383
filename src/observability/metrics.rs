//! Metrics collection.
//!
//! # Metrics
//! - `route_data_calls_total` (counter): loader/action calls by kind, outcome
//! - `route_data_call_duration_seconds` (histogram): handler latency by kind
//!
//! Only the `metrics` facade is used; the host application installs the
//! recorder (Prometheus or otherwise). Without one every call is a no-op.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

use crate::data::DataFunctionKind;

static ENABLED: AtomicBool = AtomicBool::new(true);

/// How a single loader/action call ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallOutcome {
    /// Handler returned data that was serialized to JSON.
    Data,
    /// Handler returned a response.
    Response,
    /// Handler failed with a non-redirect response.
    Caught,
    /// Handler failed with a redirect response.
    Redirect,
    /// Handler failed with an error.
    Error,
    /// Handler returned nothing.
    Undefined,
}

impl CallOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            CallOutcome::Data => "data",
            CallOutcome::Response => "response",
            CallOutcome::Caught => "caught",
            CallOutcome::Redirect => "redirect",
            CallOutcome::Error => "error",
            CallOutcome::Undefined => "undefined",
        }
    }
}

/// Toggle metric recording process wide.
pub fn set_enabled(enabled: bool) {
    ENABLED.store(enabled, Ordering::Relaxed);
}

pub fn is_enabled() -> bool {
    ENABLED.load(Ordering::Relaxed)
}

/// Record one finished data function call.
pub fn record_call(kind: DataFunctionKind, outcome: CallOutcome, start: Instant) {
    if !is_enabled() {
        return;
    }

    metrics::counter!(
        "route_data_calls_total",
        "kind" => kind.as_str(),
        "outcome" => outcome.as_str()
    )
    .increment(1);

    metrics::histogram!("route_data_call_duration_seconds", "kind" => kind.as_str())
        .record(start.elapsed().as_secs_f64());
}
