//! Upload persistence.
//!
//! Client filenames are reduced to a safe basename and stored under the
//! upload directory with a unique prefix, so two uploads named `photo.jpg`
//! never overwrite each other.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

/// Reduce a client-supplied filename to `[A-Za-z0-9._-]`.
///
/// Directory components are dropped, whitespace becomes `_`, other
/// characters are removed, and leading dots are stripped so the result can
/// never be hidden or traverse upwards. May return an empty string.
pub fn sanitize_filename(raw: &str) -> String {
    let basename = raw.rsplit(['/', '\\']).next().unwrap_or_default();

    let cleaned: String = basename
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
        .collect();

    cleaned.trim_start_matches(['.', '_']).to_string()
}

/// A file written to the upload directory.
#[derive(Debug, Clone)]
pub struct StoredUpload {
    /// Sanitized client filename.
    pub filename: String,
    /// Location on disk.
    pub path: PathBuf,
    /// `path` rendered with forward slashes, as recorded in history.
    pub display_path: String,
}

/// Write `bytes` under `upload_dir`, creating the directory if needed.
pub async fn save_upload(
    upload_dir: &Path,
    filename: &str,
    bytes: &[u8],
) -> std::io::Result<StoredUpload> {
    tokio::fs::create_dir_all(upload_dir).await?;

    let stored_name = format!("{}_{filename}", uuid::Uuid::new_v4().simple());
    let path = upload_dir.join(&stored_name);
    tokio::fs::write(&path, bytes).await?;
    debug!(path = %path.display(), bytes = bytes.len(), "Upload saved");

    let display_path = path.to_string_lossy().replace('\\', "/");
    Ok(StoredUpload {
        filename: filename.to_string(),
        path,
        display_path,
    })
}

/// Remove an upload that no history row will reference. Failure is logged only.
pub async fn discard_upload(upload: &StoredUpload) {
    if let Err(e) = tokio::fs::remove_file(&upload.path).await {
        warn!(file = %upload.display_path, error = %e, "Failed to remove orphaned upload");
    }
}
