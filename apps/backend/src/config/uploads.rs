//! Profile-picture upload configuration.

use std::path::PathBuf;

/// Multipart field name the gateway accepts picture files under.
pub const UPLOAD_FIELD_NAME: &str = "profile_picture";

/// Default size cap for a single uploaded file (10 MiB).
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 << 20;

#[derive(Debug, Clone)]
pub struct UploadConfig {
    /// Directory uploaded files are stored under. Created on demand.
    pub dir: PathBuf,
    /// Per-file size cap in bytes.
    pub max_bytes: usize,
}

impl UploadConfig {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            max_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }

    /// Read the upload directory from `UPLOAD_DIR`, defaulting to `./uploads`.
    pub fn from_env() -> Self {
        let dir = std::env::var("UPLOAD_DIR").unwrap_or_else(|_| "uploads".to_string());
        Self::new(dir)
    }

    /// Full path of a stored file reference.
    pub fn path_for(&self, filename: &str) -> PathBuf {
        self.dir.join(filename)
    }
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self::new("uploads")
    }
}
