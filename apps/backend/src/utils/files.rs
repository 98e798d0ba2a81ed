//! Filesystem helpers for stored profile pictures.

use std::path::Path;

use tokio::fs;

use crate::error::AppError;

/// Write uploaded bytes to `path`, creating parent directories as needed.
/// An existing file at the same path is overwritten.
pub async fn save_bytes(path: &Path, bytes: &[u8]) -> Result<(), AppError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .await
            .map_err(|e| AppError::internal(format!("create upload dir: {e}")))?;
    }
    fs::write(path, bytes)
        .await
        .map_err(|e| AppError::internal(format!("write upload: {e}")))?;
    Ok(())
}

/// Remove a stored file if present. Missing files are not an error; the row
/// is already gone and the file is the best-effort part.
pub async fn remove_if_exists(path: &Path) {
    if let Err(e) = fs::remove_file(path).await {
        if e.kind() != std::io::ErrorKind::NotFound {
            tracing::warn!(path = %path.display(), error = %e, "failed to remove stored file");
        }
    }
}

/// Derive the stored filename for a user's picture: `{user_id}-{original}`,
/// with the original reduced to its final path component.
pub fn picture_filename(user_id: i64, original: &str) -> String {
    let base = Path::new(original)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("upload");
    format!("{user_id}-{base}")
}
