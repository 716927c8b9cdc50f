//! Local blob store for resume files.
//!
//! Blobs are keyed by `{user_id}_{filename}` relative to a root directory
//! created at startup. Filenames are reduced to their final path component
//! so a client-supplied name can never escape the root.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tokio::fs;
use uuid::Uuid;

use crate::errors::AppError;

/// Fallback name when the uploaded filename has no usable component.
const DEFAULT_FILENAME: &str = "resume";

#[derive(Debug, Clone)]
pub struct ResumeStore {
    root: PathBuf,
}

impl ResumeStore {
    /// Create a store rooted at the given directory, creating it if absent.
    pub async fn new(root: &str) -> Result<Self, AppError> {
        let root = PathBuf::from(root);
        fs::create_dir_all(&root).await?;
        Ok(Self { root })
    }

    /// Relative key under which a user's resume is stored.
    pub fn key_for(user_id: Uuid, filename: &str) -> String {
        format!("{user_id}_{}", sanitize_filename(filename))
    }

    fn resolve(&self, key: &str) -> PathBuf {
        // Keys are produced by key_for, but re-sanitize on the way in.
        self.root.join(sanitize_filename(key))
    }

    /// Write a resume blob and return its storage key.
    pub async fn store(
        &self,
        user_id: Uuid,
        filename: &str,
        data: &[u8],
    ) -> Result<String, AppError> {
        let key = Self::key_for(user_id, filename);
        let path = self.resolve(&key);
        fs::write(&path, data).await?;
        tracing::debug!(key, bytes = data.len(), "Stored resume");
        Ok(key)
    }

    /// Open a stored resume for streaming. Missing blobs map to NotFound;
    /// any other I/O failure surfaces as a storage error.
    pub async fn open(&self, key: &str) -> Result<fs::File, AppError> {
        let path = self.resolve(key);
        fs::File::open(&path).await.map_err(|e| {
            if e.kind() == ErrorKind::NotFound {
                AppError::NotFound("Resume file missing".to_string())
            } else {
                AppError::Storage(e)
            }
        })
    }

    /// Best-effort removal, used to compensate when a DB write fails after
    /// the blob has landed.
    pub async fn remove(&self, key: &str) {
        let path = self.resolve(key);
        if let Err(e) = fs::remove_file(&path).await {
            if e.kind() != ErrorKind::NotFound {
                tracing::warn!(key, error = %e, "Failed to remove orphaned resume blob");
            }
        }
    }
}

/// Reduce a client-supplied filename to a safe final path component.
fn sanitize_filename(filename: &str) -> String {
    let name = Path::new(filename)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    if name.is_empty() || name == "." || name == ".." {
        DEFAULT_FILENAME.to_string()
    } else {
        name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_strips_directories() {
        assert_eq!(sanitize_filename("cv.pdf"), "cv.pdf");
        assert_eq!(sanitize_filename("/etc/passwd"), "passwd");
        assert_eq!(sanitize_filename("../../escape.pdf"), "escape.pdf");
        assert_eq!(sanitize_filename(""), "resume");
        assert_eq!(sanitize_filename(".."), "resume");
    }

    #[test]
    fn key_embeds_user_id() {
        let id = Uuid::nil();
        assert_eq!(
            ResumeStore::key_for(id, "cv.pdf"),
            format!("{id}_cv.pdf")
        );
    }

    #[tokio::test]
    async fn store_and_open_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let store = ResumeStore::new(dir.path().to_str().unwrap()).await.unwrap();

        let key = store
            .store(Uuid::new_v4(), "cv.pdf", b"resume body")
            .await
            .unwrap();

        let mut file = store.open(&key).await.unwrap();
        let mut contents = Vec::new();
        tokio::io::AsyncReadExt::read_to_end(&mut file, &mut contents)
            .await
            .unwrap();
        assert_eq!(contents, b"resume body");
    }

    #[tokio::test]
    async fn open_missing_blob_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let store = ResumeStore::new(dir.path().to_str().unwrap()).await.unwrap();

        let err = store.open("nope.pdf").await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn remove_is_silent_on_missing_blob() {
        let dir = tempfile::tempdir().unwrap();
        let store = ResumeStore::new(dir.path().to_str().unwrap()).await.unwrap();
        store.remove("nothing-here.pdf").await;
    }
}
