pub mod detector_config;
pub mod logging_config;
pub mod server_config;
pub mod storage_config;

use std::path::Path;

use serde::{Deserialize, Serialize};

pub use detector_config::{DetectorConfig, VocabularyConfig};
pub use logging_config::LoggingConfig;
pub use server_config::ServerConfig;
pub use storage_config::StorageConfig;

use crate::constants::DEFAULT_CONFIG_FILE;
use crate::errors::ConfigError;

/// Top-level configuration aggregating all subsystem configs.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct VeritasConfig {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub detector: DetectorConfig,
    pub logging: LoggingConfig,
}

impl VeritasConfig {
    /// Load config from a TOML string, falling back to defaults for missing fields.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }

    /// Load config from `path`, or from `veritas.toml` in the working directory.
    ///
    /// An explicit path must exist. The implicit default file is optional:
    /// when it is absent, defaults are used.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let (path, required) = match path {
            Some(p) => (p.to_path_buf(), true),
            None => (Path::new(DEFAULT_CONFIG_FILE).to_path_buf(), false),
        };

        match std::fs::read_to_string(&path) {
            Ok(contents) => Self::from_toml(&contents),
            Err(e) if !required && e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "No config file found, using defaults");
                Ok(Self::default())
            }
            Err(e) => Err(ConfigError::Read {
                path: path.display().to_string(),
                source: e,
            }),
        }
    }

    /// Reject values that would make the service misbehave at runtime.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let vocab = &self.detector.vocabulary;
        check_keywords("detector.vocabulary.ai_keywords", &vocab.ai_keywords)?;
        check_keywords("detector.vocabulary.human_keywords", &vocab.human_keywords)?;

        if self.detector.primary_model.trim().is_empty() {
            return Err(invalid("detector.primary_model", "must not be empty"));
        }
        if self.detector.timeout_secs == 0 {
            return Err(invalid("detector.timeout_secs", "must be greater than zero"));
        }
        if self.server.max_upload_bytes == 0 {
            return Err(invalid("server.max_upload_bytes", "must be greater than zero"));
        }
        if self.storage.db_path.trim().is_empty() {
            return Err(invalid("storage.db_path", "must not be empty"));
        }
        Ok(())
    }
}

fn check_keywords(field: &str, keywords: &[String]) -> Result<(), ConfigError> {
    if keywords.is_empty() {
        return Err(invalid(field, "at least one keyword is required"));
    }
    if keywords.iter().any(|k| k.trim().is_empty()) {
        // An empty keyword would match every label.
        return Err(invalid(field, "keywords must not be blank"));
    }
    Ok(())
}

fn invalid(field: &str, reason: &str) -> ConfigError {
    ConfigError::InvalidValue {
        field: field.to_string(),
        reason: reason.to_string(),
    }
}
