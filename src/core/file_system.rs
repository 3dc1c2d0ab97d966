//! File operations for uploads and the uploads directory

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use walkdir::WalkDir;

/// Location of the saved copy of an uploaded version
pub fn upload_path(uploads_dir: &Path, document_id: &str, version: &str, file_name: &str) -> PathBuf {
    uploads_dir.join(document_id).join(version).join(file_name)
}

/// File name component of `path`, if it has one
pub fn file_name(path: &Path) -> Option<String> {
    path.file_name().map(|s| s.to_string_lossy().to_string())
}

/// Copy an uploaded file's bytes into the uploads directory
pub fn save_upload(
    uploads_dir: &Path,
    document_id: &str,
    version: &str,
    file_name: &str,
    content: &[u8],
) -> Result<PathBuf> {
    let path = upload_path(uploads_dir, document_id, version, file_name);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&path, content)
        .with_context(|| format!("Failed to save upload: {}", path.display()))?;
    tracing::info!("Saved upload: {}", path.display());
    Ok(path)
}

/// Read a previously saved upload, if present
pub fn read_upload(
    uploads_dir: &Path,
    document_id: &str,
    version: &str,
    file_name: &str,
) -> Option<Vec<u8>> {
    let path = upload_path(uploads_dir, document_id, version, file_name);
    std::fs::read(&path).ok()
}

/// Get all importable files in a directory recursively
///
/// Hidden files and directories are skipped.
pub fn get_import_files(path: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(path)
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !e.file_name().to_string_lossy().starts_with('.'))
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.path().to_path_buf())
        .collect();
    files.sort();
    files
}
