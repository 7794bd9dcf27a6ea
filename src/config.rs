use crate::domain::{parse_amount, AmountBounds, Decimal};
use std::collections::HashMap;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    /// Base URL of the upstream exchange API, without trailing slash.
    pub api_base_url: String,
    pub upstream_timeout: Duration,
    /// Limits applied to `forexAmount` before a quote or order goes upstream.
    pub forex_amount_bounds: AmountBounds,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnv(String),
    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_map(std::env::vars().collect())
    }

    pub fn from_env_map(env_map: HashMap<String, String>) -> Result<Self, ConfigError> {
        let port = env_map
            .get("PORT")
            .map(|s| s.as_str())
            .unwrap_or("8080")
            .parse::<u16>()
            .map_err(|_| {
                ConfigError::InvalidValue("PORT".to_string(), "must be a valid u16".to_string())
            })?;

        let api_base_url = env_map
            .get("API_BASE_URL")
            .map(|s| s.trim().trim_end_matches('/').to_string())
            .filter(|s| !s.is_empty())
            .ok_or_else(|| ConfigError::MissingEnv("API_BASE_URL".to_string()))?;

        let timeout_ms = env_map
            .get("UPSTREAM_TIMEOUT_MS")
            .map(|s| s.as_str())
            .unwrap_or("10000")
            .parse::<u64>()
            .ok()
            .filter(|ms| *ms > 0)
            .ok_or_else(|| {
                ConfigError::InvalidValue(
                    "UPSTREAM_TIMEOUT_MS".to_string(),
                    "must be a positive integer".to_string(),
                )
            })?;

        let min = optional_amount(&env_map, "MIN_FOREX_AMOUNT")?;
        let max = optional_amount(&env_map, "MAX_FOREX_AMOUNT")?;
        if let (Some(min), Some(max)) = (min, max) {
            if min > max {
                return Err(ConfigError::InvalidValue(
                    "MIN_FOREX_AMOUNT".to_string(),
                    "must not exceed MAX_FOREX_AMOUNT".to_string(),
                ));
            }
        }

        Ok(Config {
            port,
            api_base_url,
            upstream_timeout: Duration::from_millis(timeout_ms),
            forex_amount_bounds: AmountBounds { min, max },
        })
    }
}

/// Unset or blank means no limit.
fn optional_amount(
    env_map: &HashMap<String, String>,
    key: &str,
) -> Result<Option<Decimal>, ConfigError> {
    match env_map.get(key).map(|s| s.trim()).filter(|s| !s.is_empty()) {
        None => Ok(None),
        Some(raw) => parse_amount(raw)
            .filter(Decimal::is_positive)
            .map(Some)
            .ok_or_else(|| {
                ConfigError::InvalidValue(key.to_string(), "must be a positive decimal".to_string())
            }),
    }
}
