use async_trait::async_trait;
use std::path::{Path, PathBuf};

use super::{is_safe_path, object_name, MediaStorage, StorageError, StoredObject, UploadedFile};

/// Buckets as directories under `root`, served at `public_base`.
#[derive(Debug, Clone)]
pub struct LocalMediaStorage {
    root: PathBuf,
    public_base: String,
}

impl LocalMediaStorage {
    pub fn new(root: impl Into<PathBuf>, public_base: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            public_base: public_base.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, bucket: &str, path: &str) -> Result<PathBuf, StorageError> {
        if !is_safe_path(bucket) || bucket.contains('/') || !is_safe_path(path) {
            return Err(StorageError::InvalidPath(format!("{}/{}", bucket, path)));
        }
        Ok(self.root.join(bucket).join(path))
    }
}

#[async_trait]
impl MediaStorage for LocalMediaStorage {
    async fn upload(
        &self,
        bucket: &str,
        folder: &str,
        file: &UploadedFile,
    ) -> Result<StoredObject, StorageError> {
        let path = format!("{}/{}", folder.trim_matches('/'), object_name(&file.file_name));
        let target = self.resolve(bucket, &path)?;

        if let Some(parent) = target.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&target, &file.bytes).await?;

        tracing::info!(bucket, path = %path, size = file.size(), "object uploaded");

        Ok(StoredObject {
            bucket: bucket.to_string(),
            public_url: self.public_url(bucket, &path),
            path,
            size: file.size(),
        })
    }

    async fn remove(&self, bucket: &str, path: &str) -> Result<(), StorageError> {
        let target = self.resolve(bucket, path)?;
        match tokio::fs::remove_file(&target).await {
            Ok(()) => {
                tracing::info!(bucket, path, "object removed");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(StorageError::NotFound(format!("{}/{}", bucket, path)))
            }
            Err(e) => Err(e.into()),
        }
    }

    fn public_url(&self, bucket: &str, path: &str) -> String {
        format!("{}/{}/{}", self.public_base, bucket, path)
    }

    fn object_path(&self, bucket: &str, url: &str, folder: &str) -> Option<String> {
        let prefix = format!("{}/{}/", self.public_base, bucket);
        let rest = url.strip_prefix(&prefix)?;
        let rest = rest.split(['?', '#']).next().unwrap_or(rest);
        let segment = rest.rsplit('/').next().filter(|s| !s.is_empty())?;
        Some(format!("{}/{}", folder.trim_matches('/'), segment))
    }

    async fn health_check(&self) -> Result<(), StorageError> {
        tokio::fs::create_dir_all(&self.root).await?;
        let metadata = tokio::fs::metadata(&self.root).await?;
        if metadata.permissions().readonly() {
            return Err(StorageError::Io(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "storage root is read-only",
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn storage(dir: &tempfile::TempDir) -> LocalMediaStorage {
        LocalMediaStorage::new(dir.path(), "http://localhost:3001/storage/")
    }

    #[tokio::test]
    async fn test_upload_writes_file_and_issues_url() {
        let dir = tempfile::tempdir().unwrap();
        let storage = storage(&dir);
        let file = UploadedFile::new("photo.png", Some("image/png"), b"pngdata".to_vec());

        let stored = storage.upload("portfolio", "portfolio", &file).await.unwrap();

        assert!(stored.path.starts_with("portfolio/"));
        assert!(stored.path.ends_with(".png"));
        assert_eq!(
            stored.public_url,
            format!("http://localhost:3001/storage/portfolio/{}", stored.path)
        );
        let on_disk = std::fs::read(dir.path().join("portfolio").join(&stored.path)).unwrap();
        assert_eq!(on_disk, b"pngdata");
    }

    #[tokio::test]
    async fn test_object_path_round_trips_issued_url() {
        let dir = tempfile::tempdir().unwrap();
        let storage = storage(&dir);
        let file = UploadedFile::new("clip.mp4", Some("video/mp4"), b"mp4".to_vec());
        let stored = storage.upload("portfolio", "portfolio", &file).await.unwrap();

        let path = storage
            .object_path("portfolio", &stored.public_url, "portfolio")
            .unwrap();
        assert_eq!(path, stored.path);

        storage.remove("portfolio", &path).await.unwrap();
        assert!(matches!(
            storage.remove("portfolio", &path).await,
            Err(StorageError::NotFound(_))
        ));
    }

    #[test]
    fn test_object_path_ignores_external_urls() {
        let dir = tempfile::tempdir().unwrap();
        let storage = storage(&dir);
        assert_eq!(
            storage.object_path(
                "portfolio",
                "https://www.youtube.com/watch?v=abc12345678",
                "portfolio"
            ),
            None
        );
        assert_eq!(
            storage.object_path(
                "portfolio",
                "http://localhost:3001/storage/portfolio/portfolio/a.jpg?v=2",
                "portfolio"
            )
            .as_deref(),
            Some("portfolio/a.jpg")
        );
    }

    #[tokio::test]
    async fn test_remove_rejects_traversal() {
        let dir = tempfile::tempdir().unwrap();
        let storage = storage(&dir);
        assert!(matches!(
            storage.remove("portfolio", "../secret").await,
            Err(StorageError::InvalidPath(_))
        ));
    }
}
