use std::fmt;

use serde::{Serialize, Serializer};

/// Aggregate over a filtered set of sample durations (milliseconds).
///
/// Fields hold full precision; serialization and `Display` round to two
/// decimals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Stats {
    pub count: usize,
    #[serde(serialize_with = "two_decimals")]
    pub average: f64,
    #[serde(serialize_with = "two_decimals")]
    pub min: f64,
    #[serde(serialize_with = "two_decimals")]
    pub max: f64,
    #[serde(serialize_with = "two_decimals")]
    pub total: f64,
}

impl Stats {
    /// Reduce durations into a `Stats`. `None` when there is nothing to reduce.
    pub fn from_durations<I>(durations: I) -> Option<Self>
    where
        I: IntoIterator<Item = f64>,
    {
        let mut count = 0usize;
        let mut total = 0.0;
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;

        for d in durations {
            count += 1;
            total += d;
            min = min.min(d);
            max = max.max(d);
        }

        if count == 0 {
            return None;
        }

        Some(Self {
            count,
            average: total / count as f64,
            min,
            max,
            total,
        })
    }
}

impl fmt::Display for Stats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "count={} avg={:.2}ms min={:.2}ms max={:.2}ms total={:.2}ms",
            self.count, self.average, self.min, self.max, self.total
        )
    }
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

fn two_decimals<S: Serializer>(v: &f64, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_f64(round2(*v))
}
