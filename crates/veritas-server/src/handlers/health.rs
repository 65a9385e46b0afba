//! Liveness and readiness.

use actix_web::{get, web, HttpResponse};
use tracing::error;

use crate::app::AppState;
use crate::errors::AppResult;
use crate::models::{DatabaseHealth, HealthResponse, ModelHealth};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(health);
}

/// Database reachability and model state. Does not trigger a model load.
#[get("/api/health")]
async fn health(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let storage = state.storage.clone();
    let db = web::block(move || storage.health_check()).await?;

    let model = state.detector.model();
    let model = ModelHealth {
        loaded: model.loaded_model().is_some(),
        id: model.loaded_model().map(str::to_owned),
        candidates: model.candidates().to_vec(),
    };

    let response = match db {
        Ok(h) => HealthResponse {
            status: "ok",
            database: DatabaseHealth {
                connected: h.connected,
                wal_mode: h.wal_mode,
                schema_version: h.schema_version,
            },
            model,
        },
        Err(e) => {
            error!(error = %e, "Database health check failed");
            return Ok(HttpResponse::ServiceUnavailable().json(HealthResponse {
                status: "degraded",
                database: DatabaseHealth {
                    connected: false,
                    wal_mode: false,
                    schema_version: 0,
                },
                model,
            }));
        }
    };
    Ok(HttpResponse::Ok().json(response))
}
