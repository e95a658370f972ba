//! Instrumentation wrappers around `start` / `end`.
//!
//! Successes are recorded under `name`, failures under `"<name> (Error)"`,
//! so the two latency populations never mix. The wrapped error is handed
//! back untouched.
//!
//! A future that is dropped before it settles records nothing.

use std::future::Future;

use super::{failure_name, MetricsCollector, StartToken};

impl MetricsCollector {
    /// Time an async operation and return its outcome unchanged.
    pub async fn track_operation<T, E, F>(&self, name: &str, operation: F) -> Result<T, E>
    where
        F: Future<Output = Result<T, E>>,
    {
        let token = self.start(name);
        let outcome = operation.await;
        self.settle(name, token, outcome.is_ok());
        outcome
    }

    /// Blocking counterpart of [`track_operation`](Self::track_operation).
    pub fn track<T, E, F>(&self, name: &str, operation: F) -> Result<T, E>
    where
        F: FnOnce() -> Result<T, E>,
    {
        let token = self.start(name);
        let outcome = operation();
        self.settle(name, token, outcome.is_ok());
        outcome
    }

    fn settle(&self, name: &str, token: Option<StartToken>, ok: bool) {
        if ok {
            self.end(name, token);
        } else {
            self.end(&failure_name(name), token);
        }
    }
}
