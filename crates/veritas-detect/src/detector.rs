//! ImageDetector: runs one image through the shared model and normalizes
//! the result.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::debug;
use veritas_core::config::DetectorConfig;
use veritas_core::errors::{DetectionError, DetectionResult};

use crate::http::HttpModelLoader;
use crate::image_prep::prepare_image;
use crate::model::ModelHandle;
use crate::normalizer::normalize;
use crate::verdict::DetectionReport;
use crate::vocabulary::LabelVocabulary;

#[derive(Debug, Clone)]
pub struct ImageDetector {
    model: Arc<ModelHandle>,
    vocabulary: LabelVocabulary,
}

impl ImageDetector {
    pub fn new(model: Arc<ModelHandle>, vocabulary: LabelVocabulary) -> Self {
        Self { model, vocabulary }
    }

    /// Detector backed by the configured HTTP inference endpoint. The model
    /// is not contacted until the first detection.
    pub fn from_config(config: &DetectorConfig) -> DetectionResult<Self> {
        let loader = HttpModelLoader::from_config(config)?;
        let model = ModelHandle::new(Arc::new(loader), config.model_candidates());
        Ok(Self::new(
            Arc::new(model),
            LabelVocabulary::from_config(&config.vocabulary),
        ))
    }

    pub fn model(&self) -> &ModelHandle {
        &self.model
    }

    /// Classify the image at `path`.
    ///
    /// Errors: `ModelUnavailable` if no model can be loaded, `InvalidImage`
    /// if the file does not decode, `InferenceFailed` if the model call fails.
    pub async fn detect(&self, path: &Path) -> DetectionResult<DetectionReport> {
        let classifier = self.model.get().await?;

        let owned: PathBuf = path.to_path_buf();
        let image = tokio::task::spawn_blocking(move || prepare_image(&owned))
            .await
            .map_err(|e| DetectionError::InferenceFailed {
                model: classifier.model_id().to_string(),
                reason: format!("image preparation task failed: {e}"),
            })??;

        let predictions = classifier.classify(&image).await?;
        debug!(
            model = classifier.model_id(),
            predictions = predictions.len(),
            "Classifier returned predictions"
        );

        let verdict = normalize(&predictions, &self.vocabulary)?;
        Ok(DetectionReport::new(verdict, classifier.model_id()))
    }
}
