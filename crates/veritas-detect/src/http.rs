//! Remote inference backend.
//!
//! Models are served over HTTP at `{endpoint}/models/{model_id}`:
//! - `GET` checks that the model exists and is reachable (used at load time);
//! - `POST` with PNG bytes runs image classification and returns either a
//!   JSON array of `{label, score}` or a single such object.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;
use veritas_core::config::DetectorConfig;
use veritas_core::errors::{DetectionError, DetectionResult};

use crate::classifier::ImageClassifier;
use crate::image_prep::PreparedImage;
use crate::model::ModelLoader;
use crate::normalizer::LabelScore;

/// Loads [`HttpClassifier`]s from one inference endpoint.
#[derive(Debug, Clone)]
pub struct HttpModelLoader {
    client: reqwest::Client,
    endpoint: String,
    token: Option<String>,
}

impl HttpModelLoader {
    pub fn new(endpoint: &str, token: Option<String>, timeout: Duration) -> DetectionResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| DetectionError::ModelUnavailable {
                last_error: format!("failed to build HTTP client: {e}"),
            })?;
        Ok(Self {
            client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            token,
        })
    }

    /// Build from config. The token is read from the configured environment
    /// variable; an unset or empty variable means unauthenticated requests.
    pub fn from_config(config: &DetectorConfig) -> DetectionResult<Self> {
        let token = config
            .api_token_env
            .as_deref()
            .and_then(|var| std::env::var(var).ok())
            .filter(|t| !t.trim().is_empty());
        Self::new(
            &config.endpoint,
            token,
            Duration::from_secs(config.timeout_secs),
        )
    }

    fn model_url(&self, model_id: &str) -> String {
        format!("{}/models/{}", self.endpoint, model_id)
    }
}

#[async_trait]
impl ModelLoader for HttpModelLoader {
    async fn load(&self, model_id: &str) -> DetectionResult<Arc<dyn ImageClassifier>> {
        let url = self.model_url(model_id);
        let unavailable = |e: reqwest::Error| DetectionError::ModelUnavailable {
            last_error: format!("{model_id}: {e}"),
        };

        let mut request = self.client.get(&url);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }
        request
            .send()
            .await
            .map_err(unavailable)?
            .error_for_status()
            .map_err(unavailable)?;

        debug!(model = model_id, url = %url, "Inference endpoint reachable");
        Ok(Arc::new(HttpClassifier {
            client: self.client.clone(),
            url,
            model_id: model_id.to_string(),
            token: self.token.clone(),
        }))
    }
}

/// A model served by a remote inference endpoint.
#[derive(Debug)]
pub struct HttpClassifier {
    client: reqwest::Client,
    url: String,
    model_id: String,
    token: Option<String>,
}

#[async_trait]
impl ImageClassifier for HttpClassifier {
    fn model_id(&self) -> &str {
        &self.model_id
    }

    async fn classify(&self, image: &PreparedImage) -> DetectionResult<Vec<LabelScore>> {
        let failed = |reason: String| DetectionError::InferenceFailed {
            model: self.model_id.clone(),
            reason,
        };

        let mut request = self
            .client
            .post(&self.url)
            .header(reqwest::header::CONTENT_TYPE, "image/png")
            .body(image.png.clone());
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| failed(e.to_string()))?
            .error_for_status()
            .map_err(|e| failed(e.to_string()))?;
        let body = response.bytes().await.map_err(|e| failed(e.to_string()))?;

        parse_predictions(&body).map_err(failed)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Predictions {
    Many(Vec<LabelScore>),
    One(LabelScore),
}

/// Parse an inference response body. A lone object is treated as a
/// one-element list.
pub(crate) fn parse_predictions(body: &[u8]) -> Result<Vec<LabelScore>, String> {
    match serde_json::from_slice::<Predictions>(body) {
        Ok(Predictions::Many(list)) => Ok(list),
        Ok(Predictions::One(single)) => Ok(vec![single]),
        Err(e) => Err(format!("unexpected inference response: {e}")),
    }
}
