use std::net::SocketAddr;
use std::time::Duration;

use crate::error::ConfigError;

const DEFAULT_ENV: &str = "production";
const DEFAULT_LISTEN: &str = "0.0.0.0:3000";
const DEFAULT_STREAM_INTERVAL_MS: u64 = 500;
const STREAM_INTERVAL_RANGE_MS: std::ops::RangeInclusive<u64> = 50..=60_000;

/// Process configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Value of `APP_ENV`
    pub environment: String,
    /// true only when `APP_ENV=development`
    pub metrics_enabled: bool,
    pub listen: SocketAddr,
    /// Tick interval of the SSE stats stream
    pub stream_interval: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as `from_env`, against an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = match lookup("APP_ENV") {
            Some(v) if v.trim().is_empty() => {
                return Err(ConfigError::InvalidEnv("APP_ENV", v))
            }
            Some(v) => v.trim().to_owned(),
            None => DEFAULT_ENV.to_owned(),
        };

        let listen_raw =
            lookup("METRICS_LISTEN").unwrap_or_else(|| DEFAULT_LISTEN.into());
        let listen: SocketAddr = listen_raw
            .parse()
            .map_err(|_| ConfigError::InvalidAddr(listen_raw.clone()))?;

        let interval_ms = match lookup("METRICS_STREAM_INTERVAL_MS") {
            Some(raw) => raw
                .parse::<u64>()
                .ok()
                .filter(|ms| STREAM_INTERVAL_RANGE_MS.contains(ms))
                .ok_or(ConfigError::InvalidEnv("METRICS_STREAM_INTERVAL_MS", raw))?,
            None => DEFAULT_STREAM_INTERVAL_MS,
        };

        Ok(Self {
            metrics_enabled: environment == "development",
            environment,
            listen,
            stream_interval: Duration::from_millis(interval_ms),
        })
    }
}
