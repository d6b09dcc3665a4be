//! Media storage client.
//!
//! Uploads land in named buckets under a generated, collision-resistant name
//! that keeps the original extension. Every object gets a public URL. Removal
//! is by object path; callers that only hold a URL use [`MediaStorage::object_path`]
//! to recover it, which only works for URLs this storage issued.

pub mod local;

use async_trait::async_trait;
use bytes::Bytes;
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

use crate::media::{self, MediaKind};

pub use local::LocalMediaStorage;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid object path: {0}")]
    InvalidPath(String),

    #[error("object not found: {0}")]
    NotFound(String),
}

/// A file received from a multipart form.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadedFile {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

impl UploadedFile {
    pub fn new(file_name: impl Into<String>, content_type: Option<&str>, bytes: impl Into<Bytes>) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.map(str::to_string),
            bytes: bytes.into(),
        }
    }

    pub fn kind(&self) -> Option<MediaKind> {
        media::detect_kind(&self.file_name, self.content_type.as_deref(), &self.bytes)
    }

    pub fn size(&self) -> usize {
        self.bytes.len()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredObject {
    pub bucket: String,
    /// Path inside the bucket, `<folder>/<name>`.
    pub path: String,
    pub public_url: String,
    pub size: usize,
}

/// `<uuid>.<ext>`, with `bin` when the original name has no usable extension.
pub fn object_name(original_name: &str) -> String {
    let ext = media::extension(original_name).unwrap_or_else(|| "bin".to_string());
    format!("{}.{}", Uuid::new_v4(), ext)
}

/// Reject absolute paths, traversal and odd characters in each segment.
pub fn is_safe_path(path: &str) -> bool {
    !path.is_empty()
        && !path.starts_with('/')
        && path.split('/').all(|segment| {
            !segment.is_empty()
                && segment != "."
                && segment != ".."
                && !segment.contains('\\')
                && !segment.contains('\0')
        })
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MediaStorage: Send + Sync {
    async fn upload(
        &self,
        bucket: &str,
        folder: &str,
        file: &UploadedFile,
    ) -> Result<StoredObject, StorageError>;

    async fn remove(&self, bucket: &str, path: &str) -> Result<(), StorageError>;

    fn public_url(&self, bucket: &str, path: &str) -> String;

    /// Recover `<folder>/<trailing segment>` from a URL issued by this storage.
    fn object_path(&self, bucket: &str, url: &str, folder: &str) -> Option<String>;

    async fn health_check(&self) -> Result<(), StorageError>;
}
