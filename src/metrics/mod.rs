pub mod collector;
pub mod percentiles;
pub mod stats;
pub mod stream;
pub mod track;

use std::time::Instant;

use serde::Serialize;

pub use collector::{classify, MetricsCollector, Severity};
pub use percentiles::PercentileSet;
pub use stats::Stats;

/// Maximum number of samples retained in the rolling window.
pub const CAPACITY: usize = 100;

/// Durations strictly above this are logged as slow operations (ms).
pub const SLOW_OPERATION_THRESHOLD_MS: f64 = 1000.0;

/// Suffix appended to an operation name when it settles with an error.
pub const ERROR_SUFFIX: &str = " (Error)";

/// One completed measurement.
/// Built by `MetricsCollector::end` and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sample {
    /// e.g. "GET /api/systems" or "GET /api/systems (Error)"
    pub name: String,
    /// Elapsed milliseconds, never negative
    pub duration: f64,
    /// Wall-clock completion time, RFC 3339 UTC
    pub timestamp: String,
}

impl Sample {
    pub fn new(name: impl Into<String>, duration: f64) -> Self {
        Self {
            name: name.into(),
            duration: duration.max(0.0),
            timestamp: now_iso(),
        }
    }
}

/// Opaque handle returned by `start` and consumed by `end`.
///
/// Holds a monotonic instant so wall-clock adjustments never leak into
/// durations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StartToken(pub(crate) Instant);

impl StartToken {
    pub(crate) fn now() -> Self {
        Self(Instant::now())
    }
}

/// Label under which a failed operation is recorded.
pub fn failure_name(name: &str) -> String {
    format!("{name}{ERROR_SUFFIX}")
}

fn now_iso() -> String {
    chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failure_name_appends_suffix() {
        assert_eq!(failure_name("load systems"), "load systems (Error)");
    }

    #[test]
    fn sample_clamps_negative_duration() {
        let s = Sample::new("x", -3.5);
        assert_eq!(s.duration, 0.0);
    }

    #[test]
    fn timestamp_is_rfc3339_utc() {
        let s = Sample::new("x", 1.0);
        assert!(s.timestamp.ends_with('Z'));
        assert!(chrono::DateTime::parse_from_rfc3339(&s.timestamp).is_ok());
    }
}
