//! Configuration management for the widget crates

use crate::error::AppError;
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "http://localhost:8000";
pub const DEFAULT_REDIRECT_DELAY_MS: u64 = 1200;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub backend: BackendConfig,
    pub widget: WidgetSettings,
    pub app: AppConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    pub api_url: String,
    pub request_timeout_seconds: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WidgetSettings {
    pub redirect_delay_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: String,
    pub log_level: String,
}

impl Default for WidgetSettings {
    fn default() -> Self {
        Self {
            redirect_delay_ms: DEFAULT_REDIRECT_DELAY_MS,
        }
    }
}

impl WidgetSettings {
    pub fn redirect_delay(&self) -> Duration {
        Duration::from_millis(self.redirect_delay_ms)
    }
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        let api_url = env::var("HISSABACK_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        url::Url::parse(&api_url)?;

        Ok(Config {
            backend: BackendConfig {
                api_url: api_url.trim_end_matches('/').to_string(),
                request_timeout_seconds: parse_var("REQUEST_TIMEOUT_SECONDS", 30)?,
            },
            widget: WidgetSettings {
                redirect_delay_ms: parse_var("REDIRECT_DELAY_MS", DEFAULT_REDIRECT_DELAY_MS)?,
            },
            app: AppConfig {
                environment: env::var("ENVIRONMENT")
                    .unwrap_or_else(|_| "development".to_string()),
                log_level: env::var("RUST_LOG")
                    .unwrap_or_else(|_| "info".to_string()),
            },
        })
    }
}

fn parse_var(name: &str, default: u64) -> Result<u64, AppError> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|e| AppError::configuration(format!("{} must be an integer: {}", name, e))),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_redirect_delay_is_1200ms() {
        assert_eq!(WidgetSettings::default().redirect_delay(), Duration::from_millis(1200));
    }

    #[test]
    fn malformed_numbers_are_configuration_errors() {
        env::set_var("HISSABACK_TEST_BAD_NUMBER", "soon");
        let err = parse_var("HISSABACK_TEST_BAD_NUMBER", 5).unwrap_err();
        assert_eq!(err.error_code(), "CONFIG_ERROR");
        env::remove_var("HISSABACK_TEST_BAD_NUMBER");

        assert_eq!(parse_var("HISSABACK_TEST_UNSET_NUMBER", 7).unwrap(), 7);
    }

    #[test]
    fn from_env_rejects_unparseable_api_url() {
        env::set_var("HISSABACK_API_URL", "not a url");
        let err = Config::from_env().unwrap_err();
        env::remove_var("HISSABACK_API_URL");

        assert_eq!(err.error_code(), "URL_ERROR");
    }
}
