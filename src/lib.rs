//! In-process telemetry for the admin backend: a bounded window of timed
//! operations, aggregated on demand and served over HTTP.

use std::sync::Arc;

pub mod config;
pub mod error;
pub mod metrics;
pub mod middleware;
pub mod server;

pub use config::Config;
pub use metrics::{MetricsCollector, Sample, StartToken, Stats};

/// Shared application state available to every handler via `State<Arc<AppState>>`.
pub struct AppState {
    /// Rolling operation timings; constructed once by the composition root.
    pub metrics: Arc<MetricsCollector>,

    pub config: Config,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            metrics: Arc::new(MetricsCollector::new(config.metrics_enabled)),
            config,
        }
    }
}
