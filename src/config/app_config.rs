use std::path::PathBuf;

use serde::Deserialize;

use crate::infrastructure::evaluation::JudgeConfig;
use crate::infrastructure::observability::MetricsConfig;

/// Environment variables consulted when the judge section leaves a field unset
const JUDGE_URL_FALLBACK_VAR: &str = "GEMINI_API_URL";
const JUDGE_KEY_FALLBACK_VAR: &str = "GEMINI_API_KEY";

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub judge: JudgeConfig,
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub metrics: MetricsConfig,
    #[serde(default)]
    pub store: StoreConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    #[serde(default)]
    pub format: LogFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Outbound HTTP settings
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HttpConfig {
    /// Per-request timeout; unset means no timeout
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

/// Record store settings
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StoreConfig {
    /// JSON file used to seed the in-memory store
    #[serde(default)]
    pub seed_file: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let mut app_config: Self = config.try_deserialize()?;
        app_config.apply_judge_fallbacks(|name| std::env::var(name).ok());

        Ok(app_config)
    }

    /// Fill unset judge endpoint fields from `GEMINI_API_URL` / `GEMINI_API_KEY`
    pub fn apply_judge_fallbacks<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let unset = |value: &Option<String>| value.as_deref().is_none_or(|v| v.trim().is_empty());

        if unset(&self.judge.api_url) {
            self.judge.api_url = lookup(JUDGE_URL_FALLBACK_VAR);
        }

        if unset(&self.judge.api_key) {
            self.judge.api_key = lookup(JUDGE_KEY_FALLBACK_VAR);
        }
    }
}
