//! Image upload + detection.

use actix_multipart::Multipart;
use actix_web::{post, web, HttpResponse};
use futures::TryStreamExt;
use tracing::{info, warn};
use veritas_core::types::history::{timestamp_now, ContentKind, NewHistoryEntry};

use crate::app::AppState;
use crate::errors::{AppError, AppResult};
use crate::middleware::{AuthMiddleware, AuthenticatedUser};
use crate::models::DetectImageResponse;
use crate::uploads::{discard_upload, sanitize_filename, save_upload};

/// Multipart field carrying the image.
const IMAGE_FIELD: &str = "image";

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/detect")
            .wrap(AuthMiddleware)
            .service(detect_image),
    );
}

/// An uploaded file read fully into memory.
struct ImageUpload {
    filename: String,
    bytes: Vec<u8>,
}

/// Find the `image` field and read it, enforcing the size limit.
async fn read_image_field(
    payload: &mut Multipart,
    max_bytes: usize,
) -> AppResult<Option<ImageUpload>> {
    while let Some(mut field) = payload
        .try_next()
        .await
        .map_err(|e| AppError::BadRequest(format!("Malformed upload: {e}")))?
    {
        let (name, filename) = match field.content_disposition() {
            Some(cd) => (
                cd.get_name().map(str::to_owned),
                cd.get_filename().map(str::to_owned),
            ),
            None => (None, None),
        };
        if name.as_deref() != Some(IMAGE_FIELD) {
            continue;
        }
        let Some(filename) = filename.filter(|f| !f.is_empty()) else {
            return Ok(None);
        };

        let mut bytes = Vec::new();
        while let Some(chunk) = field
            .try_next()
            .await
            .map_err(|e| AppError::BadRequest(format!("Malformed upload: {e}")))?
        {
            if bytes.len() + chunk.len() > max_bytes {
                return Err(AppError::BadRequest(format!(
                    "Image exceeds the {max_bytes} byte upload limit"
                )));
            }
            bytes.extend_from_slice(&chunk);
        }
        return Ok(Some(ImageUpload { filename, bytes }));
    }
    Ok(None)
}

#[post("/image")]
async fn detect_image(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    mut payload: Multipart,
) -> AppResult<HttpResponse> {
    let upload = read_image_field(&mut payload, state.max_upload_bytes)
        .await?
        .ok_or_else(|| AppError::BadRequest("No image uploaded".to_string()))?;

    let filename = sanitize_filename(&upload.filename);
    if filename.is_empty() {
        return Err(AppError::BadRequest(format!(
            "Invalid filename: {}",
            upload.filename
        )));
    }

    let stored = save_upload(&state.upload_dir, &filename, &upload.bytes)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to save file: {e}")))?;

    let report = match state.detector.detect(&stored.path).await {
        Ok(report) => report,
        Err(e) => {
            warn!(user_id = user.id, file = %stored.display_path, error = %e, "Image detection failed");
            discard_upload(&stored).await;
            return Err(e.into());
        }
    };

    let entry = NewHistoryEntry {
        user_id: user.id,
        kind: ContentKind::Image,
        content: stored.filename.clone(),
        score: i64::from(report.ai_percent),
        confidence: i64::from(report.verdict.confidence_percent()),
        date: timestamp_now(),
        full_content: stored.display_path.clone(),
        analysis: report.label.clone(),
    };

    let storage = state.storage.clone();
    let row = entry.clone();
    let inserted = match web::block(move || storage.insert_history(&row)).await {
        Ok(result) => result.map_err(|e| AppError::storage("Failed to save history", e)),
        Err(e) => Err(AppError::from(e)),
    };
    let id = match inserted {
        Ok(id) => id,
        Err(e) => {
            warn!(user_id = user.id, file = %stored.display_path, error = %e, "History insert failed");
            discard_upload(&stored).await;
            return Err(e);
        }
    };

    info!(
        user_id = user.id,
        entry_id = id,
        model = %report.model,
        score = entry.score,
        analysis = %entry.analysis,
        "Image classified"
    );

    Ok(HttpResponse::Ok().json(DetectImageResponse {
        status: "success",
        id,
        kind: ContentKind::Image,
        filename: entry.content,
        path: entry.full_content,
        score: entry.score,
        confidence: entry.confidence,
        analysis: entry.analysis,
        date: entry.date,
        model: report.model,
    }))
}
