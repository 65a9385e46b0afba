//! End-to-end detection with an in-process classifier.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use image::{Rgb, RgbImage};
use veritas_core::errors::{DetectionError, DetectionResult};
use veritas_detect::{
    ImageClassifier, ImageDetector, LabelScore, LabelVocabulary, ModelHandle, PreparedImage,
    Verdict,
};

/// Returns canned predictions and remembers the image size it was given.
struct CannedClassifier {
    predictions: Vec<LabelScore>,
    seen: Mutex<Vec<(u32, u32)>>,
}

#[async_trait]
impl ImageClassifier for CannedClassifier {
    fn model_id(&self) -> &str {
        "test/canned"
    }

    async fn classify(&self, image: &PreparedImage) -> DetectionResult<Vec<LabelScore>> {
        self.seen.lock().unwrap().push((image.width, image.height));
        Ok(self.predictions.clone())
    }
}

fn detector_with(predictions: Vec<LabelScore>) -> (ImageDetector, Arc<CannedClassifier>) {
    let classifier = Arc::new(CannedClassifier {
        predictions,
        seen: Mutex::new(Vec::new()),
    });
    let handle = ModelHandle::preloaded(classifier.clone());
    (
        ImageDetector::new(Arc::new(handle), LabelVocabulary::default()),
        classifier,
    )
}

fn write_png(dir: &tempfile::TempDir, name: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    RgbImage::from_pixel(8, 6, Rgb([200, 100, 50])).save(&path).unwrap();
    path
}

#[tokio::test]
async fn detects_ai_generated_image() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_png(&dir, "render.png");
    let (detector, classifier) = detector_with(vec![
        LabelScore::new("fake", 0.9),
        LabelScore::new("real", 0.1),
    ]);

    let report = detector.detect(&path).await.unwrap();
    assert_eq!(report.ai_percent, 90);
    assert_eq!(report.human_percent, 10);
    assert_eq!(report.label, "AI-generated");
    assert_eq!(report.confidence, 0.9);
    assert_eq!(report.model, "test/canned");
    assert_eq!(report.verdict.verdict(), Verdict::AiGenerated);
    assert_eq!(*classifier.seen.lock().unwrap(), vec![(8, 6)]);
}

#[tokio::test]
async fn human_verdict_from_human_only_label() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_png(&dir, "photo.png");
    let (detector, _) = detector_with(vec![LabelScore::new("Human", 0.7)]);

    let report = detector.detect(&path).await.unwrap();
    assert_eq!(report.label, "Human");
    assert_eq!(report.ai_percent, 30);
    assert_eq!(report.confidence, 0.7);
}

#[tokio::test]
async fn empty_predictions_surface_invalid_input() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_png(&dir, "blank.png");
    let (detector, _) = detector_with(vec![]);

    let err = detector.detect(&path).await.unwrap_err();
    assert!(matches!(err, DetectionError::InvalidInput(_)));
}

#[tokio::test]
async fn undecodable_upload_never_reaches_classifier() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.jpg");
    std::fs::write(&path, b"\x00\x01\x02").unwrap();
    let (detector, classifier) = detector_with(vec![LabelScore::new("fake", 0.5)]);

    let err = detector.detect(&path).await.unwrap_err();
    assert!(matches!(err, DetectionError::InvalidImage { .. }));
    assert!(classifier.seen.lock().unwrap().is_empty());
}
