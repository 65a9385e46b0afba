//! HTTP server configuration.

use serde::{Deserialize, Serialize};

/// Configuration for the HTTP server and upload handling.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Socket address to bind. Default: "127.0.0.1:8080".
    pub bind: String,
    /// Directory uploaded files are written to.
    pub upload_dir: String,
    /// Largest accepted upload in bytes. Default: 20MB.
    pub max_upload_bytes: usize,
    /// Worker threads. 0 = actix default (one per core).
    pub workers: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:8080".to_string(),
            upload_dir: "static/uploads".to_string(),
            max_upload_bytes: 20 * 1024 * 1024,
            workers: 0,
        }
    }
}
