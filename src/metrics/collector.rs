use std::collections::VecDeque;
use std::time::Instant;

use parking_lot::Mutex;

use super::percentiles::PercentileSet;
use super::stats::Stats;
use super::{Sample, StartToken, CAPACITY, SLOW_OPERATION_THRESHOLD_MS};

// ─── Public types ────────────────────────────────────────────────

/// Thread-safe metrics collector.
/// Call sites bracket work with `start()` / `end()`; readers call
/// `statistics()` or `snapshot()`.
pub struct MetricsCollector {
    enabled: bool,
    inner: Mutex<Inner>,
}

/// Log classification of a completed operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Normal,
    Slow,
}

/// Slow when strictly above the fixed threshold.
pub fn classify(duration_ms: f64) -> Severity {
    if duration_ms > SLOW_OPERATION_THRESHOLD_MS {
        Severity::Slow
    } else {
        Severity::Normal
    }
}

// ─── Internal state ──────────────────────────────────────────────

struct Inner {
    // Rolling window, oldest at the front
    samples: VecDeque<Sample>,
}

// ─── MetricsCollector impl ───────────────────────────────────────

impl MetricsCollector {
    /// `enabled` is fixed for the collector's lifetime.
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            inner: Mutex::new(Inner::new()),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Begin timing `name`. `None` when the collector is disabled.
    pub fn start(&self, name: &str) -> Option<StartToken> {
        if !self.enabled {
            return None;
        }
        tracing::trace!(operation = name, "timing started");
        Some(StartToken::now())
    }

    /// Finish timing `name`. Tolerates the `None` returned by a disabled
    /// `start()`, so call sites never need to branch.
    pub fn end(&self, name: &str, token: Option<StartToken>) {
        if let Some(token) = token {
            self.end_at(name, token, Instant::now());
        }
    }

    fn end_at(&self, name: &str, token: StartToken, now: Instant) {
        if !self.enabled {
            return;
        }

        // Clamp to zero if `now` somehow precedes the token
        let duration_ms =
            now.saturating_duration_since(token.0).as_secs_f64() * 1000.0;

        self.record(Sample::new(name, duration_ms));

        let shown = format!("{duration_ms:.2}");
        match classify(duration_ms) {
            Severity::Slow => tracing::warn!(
                operation = name,
                duration_ms = %shown,
                "slow operation"
            ),
            Severity::Normal => tracing::info!(
                operation = name,
                duration_ms = %shown,
                "operation completed"
            ),
        }
    }

    /// Append a sample, evicting the oldest one past `CAPACITY`.
    /// Negative or NaN durations are stored as 0.
    pub fn record(&self, mut sample: Sample) {
        sample.duration = sample.duration.max(0.0);
        self.inner.lock().record(sample);
    }

    /// Aggregate over samples named exactly `name`, or all samples.
    /// `None` means no data, never a zeroed `Stats`.
    pub fn statistics(&self, name: Option<&str>) -> Option<Stats> {
        let inner = self.inner.lock();
        Stats::from_durations(inner.durations(name))
    }

    /// Percentile view of the same filtered window (μs).
    pub fn percentiles(&self, name: Option<&str>) -> Option<PercentileSet> {
        let inner = self.inner.lock();
        PercentileSet::from_durations_ms(inner.durations(name))
    }

    /// Wipe the window.
    pub fn clear(&self) {
        *self.inner.lock() = Inner::new();
    }

    /// Independent copy of the window, oldest first.
    pub fn snapshot(&self) -> Vec<Sample> {
        self.inner.lock().samples.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// ─── Inner impl ──────────────────────────────────────────────────

impl Inner {
    fn new() -> Self {
        Self {
            samples: VecDeque::with_capacity(CAPACITY + 1),
        }
    }

    fn record(&mut self, sample: Sample) {
        self.samples.push_back(sample);
        if self.samples.len() > CAPACITY {
            self.samples.pop_front();
        }
    }

    fn durations<'a>(
        &'a self,
        name: Option<&'a str>,
    ) -> impl Iterator<Item = f64> + 'a {
        self.samples
            .iter()
            .filter(move |s| name.map_or(true, |n| s.name == n))
            .map(|s| s.duration)
    }
}
