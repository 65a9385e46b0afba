//! History API: list, add, read, delete and clear the caller's entries.

use actix_web::{delete, get, post, web, HttpResponse};
use tracing::{debug, warn};

use crate::app::AppState;
use crate::errors::{AppError, AppResult};
use crate::middleware::{AuthMiddleware, AuthenticatedUser};
use crate::models::{NewHistoryRequest, StatusResponse};

const ENTRY_NOT_FOUND: &str = "Entry not found or unauthorized";

/// Configure history routes.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/history")
            .wrap(AuthMiddleware)
            .service(list_history)
            .service(add_history)
            .service(clear_history)
            .service(get_entry)
            .service(delete_entry),
    );
}

#[get("")]
async fn list_history(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
) -> AppResult<HttpResponse> {
    let storage = state.storage.clone();
    let entries = web::block(move || storage.list_history(user.id)).await??;
    debug!(user_id = user.id, count = entries.len(), "Fetched history");
    Ok(HttpResponse::Ok().json(entries))
}

#[post("")]
async fn add_history(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    body: web::Json<NewHistoryRequest>,
) -> AppResult<HttpResponse> {
    let entry = body.into_inner().into_entry(user.id)?;

    let storage = state.storage.clone();
    let id = web::block(move || storage.insert_history(&entry)).await??;
    debug!(user_id = user.id, entry_id = id, "Added history entry");

    Ok(HttpResponse::Ok().json(StatusResponse::success("History entry added").with_id(id)))
}

#[delete("")]
async fn clear_history(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
) -> AppResult<HttpResponse> {
    let storage = state.storage.clone();
    let removed = web::block(move || storage.clear_history(user.id)).await??;
    debug!(user_id = user.id, removed, "Cleared history");
    Ok(HttpResponse::Ok().json(StatusResponse::success("All history cleared")))
}

#[get("/{id}")]
async fn get_entry(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    path: web::Path<i64>,
) -> AppResult<HttpResponse> {
    let entry_id = path.into_inner();
    let storage = state.storage.clone();

    match web::block(move || storage.get_history(user.id, entry_id)).await?? {
        Some(entry) => Ok(HttpResponse::Ok().json(entry)),
        None => {
            warn!(user_id = user.id, entry_id, "Entry not found or not owned");
            Err(AppError::NotFound(ENTRY_NOT_FOUND.to_string()))
        }
    }
}

#[delete("/{id}")]
async fn delete_entry(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    path: web::Path<i64>,
) -> AppResult<HttpResponse> {
    let entry_id = path.into_inner();
    let storage = state.storage.clone();

    if !web::block(move || storage.delete_history(user.id, entry_id)).await?? {
        warn!(user_id = user.id, entry_id, "Delete refused: not found or not owned");
        return Err(AppError::NotFound(ENTRY_NOT_FOUND.to_string()));
    }
    debug!(user_id = user.id, entry_id, "Deleted history entry");
    Ok(HttpResponse::Ok().json(StatusResponse::success("History entry deleted")))
}
