use std::str::FromStr;
use std::time::Duration;

use anyhow::{bail, Context, Result};

use crate::execution::executor::PollPolicy;

const DEFAULT_JUDGE0_BASE_URL: &str = "https://ce.judge0.com";

/// Application configuration loaded from environment variables.
/// Every variable has a default; malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub judge0_base_url: String,
    pub judge0_auth_token: Option<String>,
    pub judge0_request_timeout: Duration,
    pub poll_policy: PollPolicy,
    pub max_source_bytes: usize,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let max_attempts: u32 = parse_env("EXECUTION_MAX_POLL_ATTEMPTS", 40)?;
        if max_attempts == 0 {
            bail!("EXECUTION_MAX_POLL_ATTEMPTS must be at least 1");
        }

        Ok(Config {
            judge0_base_url: std::env::var("JUDGE0_BASE_URL")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .map(|v| normalize_base_url(&v))
                .unwrap_or_else(|| DEFAULT_JUDGE0_BASE_URL.to_string()),
            judge0_auth_token: std::env::var("JUDGE0_AUTH_TOKEN")
                .ok()
                .filter(|v| !v.is_empty()),
            judge0_request_timeout: Duration::from_secs(parse_env(
                "JUDGE0_REQUEST_TIMEOUT_SECS",
                30,
            )?),
            poll_policy: PollPolicy {
                interval: Duration::from_millis(parse_env("EXECUTION_POLL_INTERVAL_MS", 500)?),
                max_attempts,
            },
            max_source_bytes: parse_env("MAX_SOURCE_BYTES", 64 * 1024)?,
            port: parse_env("PORT", 8080)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid number, got '{raw}'")),
        Err(_) => Ok(default),
    }
}

fn normalize_base_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}
