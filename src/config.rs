use serde::Deserialize;
use std::time::Duration;

use crate::classification::ClassificationMode;

pub const DEFAULT_PEOPLE_URL: &str = "https://bigboost.bigdatacorp.com.br/peoplev2";
pub const DEFAULT_COMPANIES_URL: &str = "https://bigboost.bigdatacorp.com.br/companies";
pub const DEFAULT_USAGE_URL: &str = "https://plataforma.bigdatacorp.com.br/usage";
pub const DEFAULT_MAX_ATTEMPTS: u32 = 5;
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub auth_token: String,
    pub people_url: String,
    pub companies_url: String,
    pub usage_url: String,
    pub max_attempts: u32,
    /// Pause between failed attempts. Zero means retry immediately.
    pub retry_delay: Duration,
    pub request_timeout: Duration,
    pub classification: ClassificationMode,
}

impl Config {
    /// Configuration with the production endpoints and default retry policy.
    pub fn new(auth_token: impl Into<String>) -> Self {
        Self {
            auth_token: auth_token.into(),
            people_url: DEFAULT_PEOPLE_URL.to_string(),
            companies_url: DEFAULT_COMPANIES_URL.to_string(),
            usage_url: DEFAULT_USAGE_URL.to_string(),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            retry_delay: Duration::ZERO,
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            classification: ClassificationMode::default(),
        }
    }

    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let auth_token = std::env::var("BIGDATA_AUTH_TOKEN")
            .map_err(|_| anyhow::anyhow!("BIGDATA_AUTH_TOKEN environment variable required"))
            .and_then(|token| {
                if token.trim().is_empty() {
                    anyhow::bail!("BIGDATA_AUTH_TOKEN cannot be empty");
                }
                Ok(token)
            })?;

        let mut config = Self::new(auth_token);

        if let Some(url) = optional_url("BIGDATA_PEOPLE_URL")? {
            config.people_url = url;
        }
        if let Some(url) = optional_url("BIGDATA_COMPANIES_URL")? {
            config.companies_url = url;
        }
        if let Some(url) = optional_url("BIGDATA_USAGE_URL")? {
            config.usage_url = url;
        }

        config.max_attempts = std::env::var("BIGDATA_MAX_ATTEMPTS")
            .unwrap_or_else(|_| DEFAULT_MAX_ATTEMPTS.to_string())
            .parse()
            .ok()
            .filter(|attempts: &u32| *attempts >= 1)
            .ok_or_else(|| anyhow::anyhow!("BIGDATA_MAX_ATTEMPTS must be a number >= 1"))?;

        config.retry_delay = std::env::var("BIGDATA_RETRY_DELAY_MS")
            .unwrap_or_else(|_| "0".to_string())
            .parse()
            .map(Duration::from_millis)
            .map_err(|_| anyhow::anyhow!("BIGDATA_RETRY_DELAY_MS must be a number"))?;

        config.request_timeout = std::env::var("BIGDATA_TIMEOUT_SECS")
            .unwrap_or_else(|_| DEFAULT_TIMEOUT_SECS.to_string())
            .parse()
            .map(Duration::from_secs)
            .map_err(|_| anyhow::anyhow!("BIGDATA_TIMEOUT_SECS must be a number"))?;

        config.classification = match std::env::var("BIGDATA_LEGACY_ERRORS") {
            Ok(flag) if parse_flag(&flag) => ClassificationMode::InvalidDocument,
            _ => ClassificationMode::RangeClassified,
        };

        // Token is intentionally left out of the logs
        tracing::info!("Configuration loaded successfully");
        tracing::debug!("People URL: {}", config.people_url);
        tracing::debug!("Companies URL: {}", config.companies_url);
        tracing::debug!("Usage URL: {}", config.usage_url);
        tracing::debug!(
            "Max attempts: {}, retry delay: {:?}, classification: {:?}",
            config.max_attempts,
            config.retry_delay,
            config.classification
        );

        Ok(config)
    }
}

fn optional_url(var: &str) -> anyhow::Result<Option<String>> {
    match std::env::var(var) {
        Ok(url) if url.trim().is_empty() => Ok(None),
        Ok(url) => {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                anyhow::bail!("{} must start with http:// or https://", var);
            }
            Ok(Some(url))
        }
        Err(_) => Ok(None),
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes"
    )
}
