use std::time::Duration;

use crate::error::ClientError;

const DEFAULT_API_URL: &str = "http://127.0.0.1:5000";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

/// Request timeout used when none is configured.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS);
const DEFAULT_POLL_INTERVAL_MS: u64 = 1000;

/// Client configuration loaded from environment variables.
///
/// All fields have defaults that match a simulation host running locally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL of the simulation host, without a trailing slash.
    pub api_url: String,
    /// Timeout applied to every control request.
    pub request_timeout: Duration,
    /// Interval used when a poll is started without an explicit one.
    pub poll_interval: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            poll_interval: Duration::from_millis(DEFAULT_POLL_INTERVAL_MS),
        }
    }
}

impl ClientConfig {
    /// Load configuration from the process environment.
    ///
    /// | Env Var                     | Default                 |
    /// |-----------------------------|-------------------------|
    /// | `SEAL_API_URL`              | `http://127.0.0.1:5000` |
    /// | `SEAL_REQUEST_TIMEOUT_SECS` | `10`                    |
    /// | `SEAL_POLL_INTERVAL_MS`     | `1000`                  |
    pub fn from_env() -> Result<Self, ClientError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ClientError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_url = lookup("SEAL_API_URL")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.into());
        reqwest::Url::parse(&api_url)
            .map_err(|e| ClientError::InvalidUrl(format!("{api_url}: {e}")))?;
        let api_url = api_url.trim_end_matches('/').to_string();

        let timeout_secs = parse_u64(
            &lookup,
            "SEAL_REQUEST_TIMEOUT_SECS",
            DEFAULT_REQUEST_TIMEOUT_SECS,
        )?;
        let interval_ms = parse_u64(&lookup, "SEAL_POLL_INTERVAL_MS", DEFAULT_POLL_INTERVAL_MS)?;
        if interval_ms == 0 {
            return Err(ClientError::Config(
                "SEAL_POLL_INTERVAL_MS must be greater than zero".into(),
            ));
        }

        Ok(Self {
            api_url,
            request_timeout: Duration::from_secs(timeout_secs),
            poll_interval: Duration::from_millis(interval_ms),
        })
    }
}

fn parse_u64<F>(lookup: &F, key: &str, default: u64) -> Result<u64, ClientError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ClientError::Config(format!("{key} must be a valid u64, got {raw:?}"))),
    }
}
