//! ModelHandle: the process-wide classifier, loaded once on first use.
//!
//! Lifecycle: empty until the first `get()`, then initialized exactly once and
//! never torn down. Concurrent first callers wait on the same load instead of
//! racing to load twice. A failed load leaves the handle empty, so the next
//! caller retries.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::OnceCell;
use tracing::{info, warn};
use veritas_core::errors::{DetectionError, DetectionResult};

use crate::classifier::ImageClassifier;

/// Builds a classifier for a model id.
#[async_trait]
pub trait ModelLoader: Send + Sync {
    async fn load(&self, model_id: &str) -> DetectionResult<Arc<dyn ImageClassifier>>;
}

pub struct ModelHandle {
    loader: Arc<dyn ModelLoader>,
    /// Model ids in the order they are tried.
    candidates: Vec<String>,
    cell: OnceCell<Arc<dyn ImageClassifier>>,
}

impl ModelHandle {
    pub fn new(loader: Arc<dyn ModelLoader>, candidates: Vec<String>) -> Self {
        Self {
            loader,
            candidates,
            cell: OnceCell::new(),
        }
    }

    /// A handle whose classifier is already loaded. Never calls a loader.
    pub fn preloaded(classifier: Arc<dyn ImageClassifier>) -> Self {
        let candidates = vec![classifier.model_id().to_string()];
        Self {
            loader: Arc::new(NoopLoader),
            candidates,
            cell: OnceCell::new_with(Some(classifier)),
        }
    }

    /// The shared classifier, loading it if this is the first call.
    pub async fn get(&self) -> DetectionResult<Arc<dyn ImageClassifier>> {
        self.cell
            .get_or_try_init(|| self.load_first_available())
            .await
            .map(Arc::clone)
    }

    /// Id of the loaded model, if loading has happened.
    pub fn loaded_model(&self) -> Option<&str> {
        self.cell.get().map(|c| c.model_id())
    }

    pub fn candidates(&self) -> &[String] {
        &self.candidates
    }

    async fn load_first_available(&self) -> DetectionResult<Arc<dyn ImageClassifier>> {
        let mut last_error = "no model candidates configured".to_string();

        for model_id in &self.candidates {
            match self.loader.load(model_id).await {
                Ok(classifier) => {
                    info!(model = %model_id, "Image classifier loaded");
                    return Ok(classifier);
                }
                Err(e) => {
                    warn!(model = %model_id, error = %e, "Failed to load image classifier");
                    last_error = e.to_string();
                }
            }
        }

        Err(DetectionError::ModelUnavailable { last_error })
    }
}

impl std::fmt::Debug for ModelHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelHandle")
            .field("candidates", &self.candidates)
            .field("loaded", &self.loaded_model())
            .finish()
    }
}

struct NoopLoader;

#[async_trait]
impl ModelLoader for NoopLoader {
    async fn load(&self, model_id: &str) -> DetectionResult<Arc<dyn ImageClassifier>> {
        Err(DetectionError::ModelUnavailable {
            last_error: format!("no loader configured for {model_id}"),
        })
    }
}
