//! Application state, route table and server startup.

use std::path::PathBuf;
use std::sync::Arc;

use actix_web::{web, App, HttpServer};
use tracing::info;
use veritas_core::{IVeritasStorage, VeritasConfig};
use veritas_detect::ImageDetector;

use crate::errors::AppError;
use crate::handlers::{detect, health, history};
use crate::middleware::LoggingMiddleware;

/// Shared state handed to every worker.
pub struct AppState {
    pub storage: Arc<dyn IVeritasStorage>,
    pub detector: Arc<ImageDetector>,
    pub upload_dir: PathBuf,
    pub max_upload_bytes: usize,
}

impl AppState {
    pub fn new(
        storage: Arc<dyn IVeritasStorage>,
        detector: Arc<ImageDetector>,
        config: &VeritasConfig,
    ) -> Self {
        Self {
            storage,
            detector,
            upload_dir: PathBuf::from(&config.server.upload_dir),
            max_upload_bytes: config.server.max_upload_bytes,
        }
    }
}

/// Register every route. The caller provides `web::Data<AppState>`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::JsonConfig::default()
            .error_handler(|err, _req| AppError::BadRequest(err.to_string()).into()),
    )
    .configure(health::configure)
    .configure(history::configure)
    .configure(detect::configure);
}

/// Serve until shutdown.
pub async fn run(config: VeritasConfig, state: AppState) -> std::io::Result<()> {
    let data = web::Data::new(state);
    let bind = config.server.bind.clone();

    info!(
        bind = %bind,
        upload_dir = %data.upload_dir.display(),
        models = ?data.detector.model().candidates(),
        "Starting HTTP server"
    );

    let mut server = HttpServer::new(move || {
        App::new()
            .app_data(data.clone())
            .wrap(LoggingMiddleware)
            .configure(configure)
    });
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }
    server.bind(&bind)?.run().await
}
