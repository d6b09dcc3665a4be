//! Admin workflows behind the authenticated endpoints.
//!
//! Each workflow validates its whole input before touching storage or a
//! store, and returns the canonical state re-read after the write.

pub mod hero;
pub mod portfolio;
pub mod reviews;
pub mod settings;

use std::sync::Arc;

use crate::error::{AppError, BackendContext};
use crate::storage::{MediaStorage, StoredObject, UploadedFile};

/// Objects uploaded during one admin action.
///
/// If a later step fails, [`UploadBatch::rollback`] removes them again so the
/// bucket does not collect orphans.
pub struct UploadBatch {
    media: Arc<dyn MediaStorage>,
    bucket: String,
    uploaded: Vec<StoredObject>,
}

impl UploadBatch {
    pub fn new(media: Arc<dyn MediaStorage>, bucket: impl Into<String>) -> Self {
        Self {
            media,
            bucket: bucket.into(),
            uploaded: Vec::new(),
        }
    }

    /// Upload one file; on failure everything uploaded so far is removed.
    pub async fn upload(
        &mut self,
        folder: &str,
        file: &UploadedFile,
        action: &'static str,
    ) -> Result<StoredObject, AppError> {
        match self.media.upload(&self.bucket, folder, file).await {
            Ok(stored) => {
                self.uploaded.push(stored.clone());
                Ok(stored)
            }
            Err(e) => {
                self.rollback().await;
                Err::<StoredObject, _>(e).or_backend(action)
            }
        }
    }

    pub fn len(&self) -> usize {
        self.uploaded.len()
    }

    pub fn is_empty(&self) -> bool {
        self.uploaded.is_empty()
    }

    pub async fn rollback(&mut self) {
        for object in self.uploaded.drain(..) {
            if let Err(e) = self.media.remove(&object.bucket, &object.path).await {
                tracing::warn!(path = %object.path, error = %e, "failed to remove orphaned upload");
            }
        }
    }
}

/// Trim, mapping blank strings to `None`.
pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{MockMediaStorage, StorageError};
    use mockall::Sequence;

    fn stored(path: &str) -> StoredObject {
        StoredObject {
            bucket: "project-uploads".to_string(),
            path: path.to_string(),
            public_url: format!("http://localhost/storage/project-uploads/{}", path),
            size: 1,
        }
    }

    #[tokio::test]
    async fn test_failed_upload_removes_earlier_objects() {
        let mut media = MockMediaStorage::new();
        let mut seq = Sequence::new();
        media
            .expect_upload()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _, _| Ok(stored("reviews/avatars/a.png")));
        media
            .expect_upload()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _, _| Err(StorageError::InvalidPath("x".into())));
        media
            .expect_remove()
            .withf(|bucket, path| bucket == "project-uploads" && path == "reviews/avatars/a.png")
            .times(1)
            .returning(|_, _| Ok(()));

        let mut batch = UploadBatch::new(Arc::new(media), "project-uploads");
        let file = UploadedFile::new("a.png", Some("image/png"), vec![0u8; 4]);

        batch.upload("reviews/avatars", &file, "Failed to add review").await.unwrap();
        let err = batch
            .upload("reviews/gallery", &file, "Failed to add review")
            .await
            .unwrap_err();

        assert!(err.to_string().starts_with("Failed to add review: "));
        assert!(batch.is_empty());
    }

    #[test]
    fn test_non_blank() {
        assert_eq!(non_blank(Some("  ".into())), None);
        assert_eq!(non_blank(Some(" Asha ".into())).as_deref(), Some("Asha"));
        assert_eq!(non_blank(None), None);
    }
}
