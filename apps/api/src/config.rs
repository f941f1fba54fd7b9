use anyhow::{bail, Context, Result};
use std::time::Duration;

use crate::providers::{gemini, ProviderKind};
use crate::rate_limit::{RateLimitPolicy, DEFAULT_MAX_REQUESTS, MAX_WINDOW};

/// Application configuration loaded from environment variables.
/// Fails at startup if the selected provider's API key is missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub llm_provider: ProviderKind,
    pub llm_api_key: String,
    pub llm_base_url: Option<String>,
    pub gemini_model: String,
    /// When set, rate-limit counters live in Redis instead of process memory.
    pub redis_url: Option<String>,
    pub rate_limit: RateLimitPolicy,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let llm_provider: ProviderKind = optional_env("LLM_PROVIDER")
            .unwrap_or_else(|| "gemini".to_string())
            .parse()?;

        Ok(Config {
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            llm_api_key: require_env(llm_provider.api_key_var())?,
            llm_provider,
            llm_base_url: optional_env("LLM_BASE_URL"),
            gemini_model: optional_env("GEMINI_MODEL")
                .unwrap_or_else(|| gemini::DEFAULT_MODEL.to_string()),
            redis_url: optional_env("REDIS_URL"),
            rate_limit: rate_limit_policy(
                optional_env("RATE_LIMIT_MAX_REQUESTS"),
                optional_env("RATE_LIMIT_WINDOW_SECS"),
            )?,
        })
    }
}

/// Builds the rate-limit policy from its raw settings. Both must be positive,
/// and the window may not exceed `MAX_WINDOW`.
fn rate_limit_policy(
    max_requests: Option<String>,
    window_secs: Option<String>,
) -> Result<RateLimitPolicy> {
    let max_requests = match max_requests {
        Some(v) => v
            .parse::<u32>()
            .context("RATE_LIMIT_MAX_REQUESTS must be a positive integer")?,
        None => DEFAULT_MAX_REQUESTS,
    };
    if max_requests == 0 {
        bail!("RATE_LIMIT_MAX_REQUESTS must be a positive integer");
    }

    let window = match window_secs {
        Some(v) => Duration::from_secs(
            v.parse::<u64>()
                .context("RATE_LIMIT_WINDOW_SECS must be a number of seconds")?,
        ),
        None => RateLimitPolicy::default().window,
    };
    if window.is_zero() || window > MAX_WINDOW {
        bail!(
            "RATE_LIMIT_WINDOW_SECS must be between 1 and {}",
            MAX_WINDOW.as_secs()
        );
    }

    Ok(RateLimitPolicy {
        max_requests,
        window,
    })
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_limit_defaults() {
        assert_eq!(rate_limit_policy(None, None).unwrap(), RateLimitPolicy::default());
    }

    #[test]
    fn test_rate_limit_overrides() {
        let policy = rate_limit_policy(Some("1".into()), Some("60".into())).unwrap();
        assert_eq!(policy.max_requests, 1);
        assert_eq!(policy.window, Duration::from_secs(60));
    }

    #[test]
    fn test_zero_max_requests_rejected() {
        let err = rate_limit_policy(Some("0".into()), None).unwrap_err();
        assert!(err.to_string().contains("RATE_LIMIT_MAX_REQUESTS"));
        assert!(rate_limit_policy(Some("-3".into()), None).is_err());
    }

    #[test]
    fn test_window_bounds() {
        assert!(rate_limit_policy(None, Some("0".into())).is_err());
        assert!(rate_limit_policy(None, Some("10000000000000".into())).is_err());

        let max = MAX_WINDOW.as_secs().to_string();
        assert_eq!(rate_limit_policy(None, Some(max)).unwrap().window, MAX_WINDOW);
    }
}
