//! Image detector configuration: inference backend, model ids and the
//! label vocabulary used to bucket raw classifier labels.

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_FALLBACK_MODEL, DEFAULT_PRIMARY_MODEL};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    /// Base URL of the inference service. Models are addressed as
    /// `{endpoint}/models/{model_id}`.
    pub endpoint: String,
    /// Environment variable holding the bearer token for the endpoint, if any.
    pub api_token_env: Option<String>,
    /// Model tried first.
    pub primary_model: String,
    /// Model tried when the primary fails to load. `None` disables fallback.
    pub fallback_model: Option<String>,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
    pub vocabulary: VocabularyConfig,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://api-inference.huggingface.co".to_string(),
            api_token_env: Some("HF_API_TOKEN".to_string()),
            primary_model: DEFAULT_PRIMARY_MODEL.to_string(),
            fallback_model: Some(DEFAULT_FALLBACK_MODEL.to_string()),
            timeout_secs: 30,
            vocabulary: VocabularyConfig::default(),
        }
    }
}

impl DetectorConfig {
    /// Model ids in load order.
    pub fn model_candidates(&self) -> Vec<String> {
        let mut models = vec![self.primary_model.clone()];
        if let Some(fallback) = &self.fallback_model {
            if fallback != &self.primary_model {
                models.push(fallback.clone());
            }
        }
        models
    }
}

/// Keyword sets that sort raw classifier labels into the AI and human buckets.
/// Matching is by substring against the lower-cased, trimmed label.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct VocabularyConfig {
    pub ai_keywords: Vec<String>,
    pub human_keywords: Vec<String>,
}

impl Default for VocabularyConfig {
    fn default() -> Self {
        Self {
            ai_keywords: ["ai", "fake", "synthetic", "generated"]
                .into_iter()
                .map(String::from)
                .collect(),
            human_keywords: ["real", "human", "authentic"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}
