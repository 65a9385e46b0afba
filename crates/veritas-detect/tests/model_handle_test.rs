//! ModelHandle lifecycle: single load under concurrency, fallback, retry.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use veritas_core::errors::{DetectionError, DetectionResult};
use veritas_detect::{ImageClassifier, LabelScore, ModelHandle, ModelLoader, PreparedImage};

struct StaticClassifier {
    model_id: String,
}

#[async_trait]
impl ImageClassifier for StaticClassifier {
    fn model_id(&self) -> &str {
        &self.model_id
    }

    async fn classify(&self, _image: &PreparedImage) -> DetectionResult<Vec<LabelScore>> {
        Ok(vec![LabelScore::new("fake", 0.9)])
    }
}

/// Loader that counts calls and fails for ids listed in `broken`.
struct CountingLoader {
    calls: AtomicUsize,
    broken: Vec<&'static str>,
    delay: Duration,
}

impl CountingLoader {
    fn new(broken: Vec<&'static str>) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            broken,
            delay: Duration::from_millis(20),
        }
    }
}

#[async_trait]
impl ModelLoader for CountingLoader {
    async fn load(&self, model_id: &str) -> DetectionResult<Arc<dyn ImageClassifier>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(self.delay).await;
        if self.broken.contains(&model_id) {
            return Err(DetectionError::ModelUnavailable {
                last_error: format!("{model_id} is offline"),
            });
        }
        Ok(Arc::new(StaticClassifier {
            model_id: model_id.to_string(),
        }))
    }
}

fn candidates() -> Vec<String> {
    vec!["primary/model".to_string(), "fallback/model".to_string()]
}

#[tokio::test]
async fn concurrent_first_use_loads_once() {
    let loader = Arc::new(CountingLoader::new(vec![]));
    let handle = Arc::new(ModelHandle::new(loader.clone(), candidates()));

    let mut tasks = Vec::new();
    for _ in 0..16 {
        let handle = Arc::clone(&handle);
        tasks.push(tokio::spawn(async move {
            handle.get().await.map(|c| c.model_id().to_string())
        }));
    }
    for task in tasks {
        assert_eq!(task.await.unwrap().unwrap(), "primary/model");
    }

    assert_eq!(loader.calls.load(Ordering::SeqCst), 1);
    assert_eq!(handle.loaded_model(), Some("primary/model"));
}

#[tokio::test]
async fn falls_back_when_primary_fails() {
    let loader = Arc::new(CountingLoader::new(vec!["primary/model"]));
    let handle = ModelHandle::new(loader.clone(), candidates());

    let classifier = handle.get().await.unwrap();
    assert_eq!(classifier.model_id(), "fallback/model");
    assert_eq!(loader.calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn failed_load_reports_last_error_and_retries() {
    let loader = Arc::new(CountingLoader::new(vec!["primary/model", "fallback/model"]));
    let handle = ModelHandle::new(loader.clone(), candidates());

    let err = handle.get().await.err().unwrap();
    assert!(err.to_string().contains("fallback/model is offline"), "{err}");
    assert!(handle.loaded_model().is_none());

    // Nothing was cached, so the next caller tries again.
    let _ = handle.get().await;
    assert_eq!(loader.calls.load(Ordering::SeqCst), 4);
}

#[tokio::test]
async fn no_candidates_is_unavailable() {
    let handle = ModelHandle::new(Arc::new(CountingLoader::new(vec![])), vec![]);
    let err = handle.get().await.err().unwrap();
    assert!(matches!(err, DetectionError::ModelUnavailable { .. }));
}

#[tokio::test]
async fn preloaded_handle_never_loads() {
    let handle = ModelHandle::preloaded(Arc::new(StaticClassifier {
        model_id: "local/model".to_string(),
    }));
    assert_eq!(handle.loaded_model(), Some("local/model"));
    assert_eq!(handle.get().await.unwrap().model_id(), "local/model");
}
