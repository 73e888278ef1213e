//! Service configuration.
//!
//! Built in three layers: defaults, an optional TOML file, then environment
//! overrides. Every section tolerates missing keys.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::Level;
use venue_llm::LlmConfig;

use crate::role_orchestration::retry::DEFAULT_MAX_ATTEMPTS;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },
}

/// Where the reference and history files live.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrievalConfig {
    /// Documents retrieved per request
    pub top_k: usize,
    pub data_dir: PathBuf,
    pub venues_file: String,
    pub clients_file: String,
    pub history_file: String,
    pub requests_file: String,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            top_k: 10,
            data_dir: PathBuf::from("data/venue"),
            venues_file: "venues.json".to_string(),
            clients_file: "client_profiles.json".to_string(),
            history_file: "event_history.json".to_string(),
            requests_file: "current_requests.json".to_string(),
        }
    }
}

impl RetrievalConfig {
    pub fn venues_path(&self) -> PathBuf {
        self.data_dir.join(&self.venues_file)
    }

    pub fn clients_path(&self) -> PathBuf {
        self.data_dir.join(&self.clients_file)
    }

    pub fn history_path(&self) -> PathBuf {
        self.data_dir.join(&self.history_file)
    }

    pub fn requests_path(&self) -> PathBuf {
        self.data_dir.join(&self.requests_file)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrchestratorConfig {
    pub max_retry_attempts: u32,
    pub default_top_n: usize,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            max_retry_attempts: DEFAULT_MAX_ATTEMPTS,
            default_top_n: 3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    pub level: String,
    /// Emit JSON log lines
    pub json: bool,
    pub service_name: String,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            level: "INFO".to_string(),
            json: false,
            service_name: "venue-recommendation-service".to_string(),
        }
    }
}

impl LoggerConfig {
    pub fn tracing_level(&self) -> Result<Level, ConfigError> {
        self.level
            .parse::<Level>()
            .map_err(|_| ConfigError::InvalidValue {
                key: "logger.level".to_string(),
                value: self.level.clone(),
            })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    pub llm: LlmConfig,
    pub retrieval: RetrievalConfig,
    pub orchestrator: OrchestratorConfig,
    pub logger: LoggerConfig,
}

impl ServiceConfig {
    /// Defaults, then `path` if given, then the process environment.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let base = match path {
            Some(path) => Self::from_toml_file(path)?,
            None => Self::default(),
        };
        base.with_overrides(|key| std::env::var(key).ok())
    }

    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Apply `VENUE_*` / `OPENAI_API_KEY` overrides read through `lookup`.
    pub fn with_overrides(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        if let Some(model) = lookup("VENUE_LLM_MODEL") {
            self.llm.model = model;
        }
        if let Some(base_url) = lookup("VENUE_LLM_BASE_URL") {
            self.llm.base_url = base_url;
        }
        if let Some(key) = lookup("OPENAI_API_KEY") {
            self.llm.api_key = Some(key);
        }
        if let Some(dir) = lookup("VENUE_DATA_DIR") {
            self.retrieval.data_dir = PathBuf::from(dir);
        }
        if let Some(top_k) = lookup("VENUE_TOP_K") {
            self.retrieval.top_k = parse_number("VENUE_TOP_K", &top_k)?;
        }
        if let Some(retries) = lookup("VENUE_MAX_RETRIES") {
            self.orchestrator.max_retry_attempts = parse_number("VENUE_MAX_RETRIES", &retries)?;
        }
        if let Some(level) = lookup("VENUE_LOG_LEVEL") {
            self.logger.level = level;
        }
        if let Some(format) = lookup("VENUE_LOG_FORMAT") {
            self.logger.json = format.eq_ignore_ascii_case("json");
        }

        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.orchestrator.max_retry_attempts == 0 {
            return Err(ConfigError::InvalidValue {
                key: "orchestrator.max_retry_attempts".to_string(),
                value: "0".to_string(),
            });
        }
        if self.retrieval.top_k == 0 {
            return Err(ConfigError::InvalidValue {
                key: "retrieval.top_k".to_string(),
                value: "0".to_string(),
            });
        }
        self.logger.tracing_level()?;
        Ok(())
    }
}

fn parse_number<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ServiceConfig::default();
        assert_eq!(config.llm.model, "gpt-4o-mini");
        assert_eq!(config.retrieval.top_k, 10);
        assert_eq!(config.orchestrator.max_retry_attempts, 3);
        assert_eq!(config.logger.service_name, "venue-recommendation-service");
        assert_eq!(
            config.retrieval.history_path(),
            PathBuf::from("data/venue/event_history.json")
        );
    }

    #[test]
    fn test_env_overrides_apply() {
        let config = ServiceConfig::default()
            .with_overrides(env(&[
                ("VENUE_TOP_K", "4"),
                ("VENUE_MAX_RETRIES", "5"),
                ("VENUE_LOG_FORMAT", "JSON"),
                ("OPENAI_API_KEY", "sk-test"),
            ]))
            .unwrap();
        assert_eq!(config.retrieval.top_k, 4);
        assert_eq!(config.orchestrator.max_retry_attempts, 5);
        assert!(config.logger.json);
        assert_eq!(config.llm.api_key.as_deref(), Some("sk-test"));
    }

    #[test]
    fn test_non_numeric_override_is_rejected() {
        let err = ServiceConfig::default()
            .with_overrides(env(&[("VENUE_TOP_K", "many")]))
            .unwrap_err();
        assert!(err.to_string().contains("VENUE_TOP_K"));
    }

    #[test]
    fn test_zero_retries_is_invalid() {
        let err = ServiceConfig::default()
            .with_overrides(env(&[("VENUE_MAX_RETRIES", "0")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }

    #[test]
    fn test_log_level_parses_case_insensitively() {
        let logger = LoggerConfig {
            level: "debug".to_string(),
            ..Default::default()
        };
        assert_eq!(logger.tracing_level().unwrap(), Level::DEBUG);
    }
}
