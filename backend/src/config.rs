use std::fmt::Display;
use std::str::FromStr;
use std::time::Duration;

use anyhow::anyhow;
use buffer::MAX_RECORDS;

#[derive(Clone, Debug)]
pub struct AppConfig {
    /// Interface the HTTP listener binds to.
    pub host: String,

    /// Listening port (`PORT`).
    pub port: u16,

    // =========================
    // Read path
    // =========================
    /// Window size served by `GET /api/temperature` when the client
    /// does not pass `?limit=`.
    pub default_recent_limit: usize,

    // =========================
    // Buffer
    // =========================
    /// Number of samples retained in memory. Oldest are evicted first.
    pub buffer_capacity: usize,

    // =========================
    // Observability
    // =========================
    /// Requests slower than this are logged at WARN.
    pub slow_request_ms: u64,

    /// Emit JSON logs (`APP_ENV=production`) instead of pretty output.
    pub json_logs: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            default_recent_limit: 100,
            buffer_capacity: MAX_RECORDS,
            slow_request_ms: 250,
            json_logs: false,
        }
    }
}

impl AppConfig {
    /// Reads configuration from the process environment once at startup.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds configuration from an arbitrary key lookup; unset keys keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        Ok(Self {
            host: lookup("HOST").unwrap_or(defaults.host),
            port: parse_or(&lookup, "PORT", defaults.port)?,
            default_recent_limit: parse_or(
                &lookup,
                "DEFAULT_RECENT_LIMIT",
                defaults.default_recent_limit,
            )?,
            buffer_capacity: parse_or(&lookup, "BUFFER_CAPACITY", defaults.buffer_capacity)?,
            slow_request_ms: parse_or(&lookup, "SLOW_REQUEST_MS", defaults.slow_request_ms)?,
            json_logs: lookup("APP_ENV").is_some_and(|env| env == "production"),
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn slow_request_threshold(&self) -> Duration {
        Duration::from_millis(self.slow_request_ms)
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> anyhow::Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: Display,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| anyhow!("invalid value for {key}: {raw:?} ({e})")),
    }
}
