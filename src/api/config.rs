//! Service configuration parsed from environment variables.

use super::types::ApiError;
use crate::consts::DEFAULT_HISTORY_LIMIT;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:5000/api";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApiTimeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

impl Default for ApiTimeouts {
    fn default() -> Self {
        Self { request_secs: DEFAULT_REQUEST_TIMEOUT_SECS, connect_secs: DEFAULT_CONNECT_TIMEOUT_SECS }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// Base URL without a trailing `/`.
    pub base_url: String,
    pub timeouts: ApiTimeouts,
    /// Undo history bound for editing sessions.
    pub history_limit: usize,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE_URL.to_owned(),
            timeouts: ApiTimeouts::default(),
            history_limit: DEFAULT_HISTORY_LIMIT,
        }
    }
}

impl ApiConfig {
    /// Build typed config from environment variables.
    ///
    /// Optional:
    /// - `LABEL_API_URL`: default `http://localhost:5000/api`
    /// - `LABEL_API_REQUEST_TIMEOUT_SECS`: default 30
    /// - `LABEL_API_CONNECT_TIMEOUT_SECS`: default 10
    /// - `LABEL_HISTORY_LIMIT`: default 50
    ///
    /// # Errors
    ///
    /// Returns `ConfigParse` when a numeric variable is set but unparseable.
    pub fn from_env() -> Result<Self, ApiError> {
        Self::from_lookup(env_var)
    }

    /// Build typed config from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// Returns `ConfigParse` when a numeric variable is set but unparseable.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ApiError> {
        let base_url = normalize_base_url(lookup("LABEL_API_URL").as_deref().unwrap_or(DEFAULT_API_BASE_URL));
        let timeouts = ApiTimeouts {
            request_secs: parse_u64(&lookup, "LABEL_API_REQUEST_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT_SECS)?,
            connect_secs: parse_u64(&lookup, "LABEL_API_CONNECT_TIMEOUT_SECS", DEFAULT_CONNECT_TIMEOUT_SECS)?,
        };
        let history_limit = parse_u64(&lookup, "LABEL_HISTORY_LIMIT", DEFAULT_HISTORY_LIMIT as u64)?;
        let history_limit = usize::try_from(history_limit)
            .map_err(|_| ApiError::ConfigParse(format!("LABEL_HISTORY_LIMIT out of range: {history_limit}")))?;
        if history_limit == 0 {
            return Err(ApiError::ConfigParse("LABEL_HISTORY_LIMIT must be at least 1".into()));
        }

        Ok(Self { base_url, timeouts, history_limit })
    }
}

fn env_var(key: &str) -> Option<String> {
    match std::env::var(key) {
        Ok(value) => Some(value),
        Err(std::env::VarError::NotPresent) => None,
        Err(e) => {
            tracing::warn!(key, error = %e, "ignoring environment variable");
            None
        }
    }
}

/// Trim whitespace and trailing `/` from a base URL.
#[must_use]
pub fn normalize_base_url(raw: &str) -> String {
    raw.trim().trim_end_matches('/').to_string()
}

fn parse_u64(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: u64) -> Result<u64, ApiError> {
    match lookup(key) {
        None => Ok(default),
        Some(raw) if raw.trim().is_empty() => Ok(default),
        Some(raw) => raw
            .trim()
            .parse::<u64>()
            .map_err(|e| ApiError::ConfigParse(format!("{key}={raw}: {e}"))),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
