use hdrhistogram::Histogram;
use serde::Serialize;

/// HdrHistogram range: 1 μs → 60 s, 3 significant figures
const HIST_LOW: u64 = 1;
const HIST_HIGH: u64 = 60_000_000;
const HIST_SIGFIG: u8 = 3;

/// Percentile breakdown of the retained window, in microseconds.
#[derive(Debug, Clone, Serialize)]
pub struct PercentileSet {
    pub min: u64,
    pub max: u64,
    pub mean: f64,
    pub p50: u64,
    pub p95: u64,
    pub p99: u64,
    pub p999: u64,
    pub count: u64,
}

impl PercentileSet {
    /// Build a percentile set from millisecond durations.
    /// Returns `None` when there is nothing to summarise.
    pub fn from_durations_ms<I>(durations: I) -> Option<Self>
    where
        I: IntoIterator<Item = f64>,
    {
        let mut hist =
            Histogram::<u64>::new_with_bounds(HIST_LOW, HIST_HIGH, HIST_SIGFIG)
                .ok()?;

        for ms in durations {
            // Clamp to ≥ 1 μs; values past the high bound saturate.
            let us = ((ms * 1000.0).round() as u64).max(HIST_LOW);
            hist.saturating_record(us);
        }

        Self::from_histogram(&hist)
    }

    fn from_histogram(hist: &Histogram<u64>) -> Option<Self> {
        if hist.len() == 0 {
            return None;
        }

        Some(Self {
            min: hist.min(),
            max: hist.max(),
            mean: hist.mean(),
            p50: hist.value_at_percentile(50.0),
            p95: hist.value_at_percentile(95.0),
            p99: hist.value_at_percentile(99.0),
            p999: hist.value_at_percentile(99.9),
            count: hist.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_window_has_no_percentiles() {
        assert!(PercentileSet::from_durations_ms(Vec::new()).is_none());
    }

    #[test]
    fn percentiles_are_reported_in_microseconds() {
        let durations: Vec<f64> = (1..=100).map(|i| i as f64).collect();
        let p = PercentileSet::from_durations_ms(durations).unwrap();

        assert_eq!(p.count, 100);
        assert!(hist_close(p.min, 1_000));
        assert!(hist_close(p.max, 100_000));
        assert!(hist_close(p.p50, 50_000));
        assert!(hist_close(p.p99, 99_000));
    }

    #[test]
    fn zero_duration_is_recorded_at_floor() {
        let p = PercentileSet::from_durations_ms([0.0]).unwrap();
        assert_eq!(p.count, 1);
        assert_eq!(p.min, 1);
    }

    // 3 significant figures → relative error below 0.1 %
    fn hist_close(actual: u64, expected: u64) -> bool {
        let diff = actual.abs_diff(expected) as f64;
        diff <= expected as f64 * 0.001
    }
}
