//! The seam between detection and whatever runs the pretrained model.

use async_trait::async_trait;
use veritas_core::errors::DetectionResult;

use crate::image_prep::PreparedImage;
use crate::normalizer::LabelScore;

/// A loaded image-classification model.
///
/// Implementations must be cheap to share: the service holds exactly one
/// behind an `Arc` and calls it concurrently from every request handler.
#[async_trait]
pub trait ImageClassifier: Send + Sync {
    /// Id of the underlying model, e.g. `falconsai/image-detection-fake-vs-real`.
    fn model_id(&self) -> &str;

    /// Run the model on an RGB image and return its raw predictions.
    async fn classify(&self, image: &PreparedImage) -> DetectionResult<Vec<LabelScore>>;
}
