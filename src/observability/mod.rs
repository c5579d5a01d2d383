//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! data::call_route_loader / call_route_action produce:
//!     → logging.rs (structured log events)
//!     → metrics.rs (counters, histograms)
//! ```

pub mod logging;
pub mod metrics;

pub use logging::init_logging;

use crate::config::ObservabilityConfig;

/// Apply the observability section: metric toggle plus global subscriber.
pub fn init(config: &ObservabilityConfig) -> Result<(), logging::TryInitError> {
    metrics::set_enabled(config.metrics_enabled);
    init_logging(config)
}
