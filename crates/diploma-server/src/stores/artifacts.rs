//! Artifact store backends: S3 for deployments, local disk for offline runs.

use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::types::ObjectCannedAcl;
use tokio::fs;

use super::ArtifactStore;
use crate::error::AppError;

/// Artifact store writing public-read objects into an S3 bucket.
#[derive(Debug, Clone)]
pub struct S3ArtifactStore {
    client: aws_sdk_s3::Client,
    bucket: String,
}

impl S3ArtifactStore {
    pub fn new(client: aws_sdk_s3::Client, bucket: impl Into<String>) -> Self {
        Self {
            client,
            bucket: bucket.into(),
        }
    }

    /// Builds a client from the ambient AWS configuration (env, profile, IMDS).
    pub async fn from_env(bucket: impl Into<String>) -> Self {
        let config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
        Self::new(aws_sdk_s3::Client::new(&config), bucket)
    }
}

#[async_trait]
impl ArtifactStore for S3ArtifactStore {
    async fn put(&self, key: &str, body: Vec<u8>, content_type: &str) -> Result<(), AppError> {
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .acl(ObjectCannedAcl::PublicRead)
            .content_type(content_type)
            .body(ByteStream::from(body))
            .send()
            .await
            .map_err(|e| {
                AppError::Storage(format!(
                    "Failed to put '{}' into bucket '{}': {}",
                    key,
                    self.bucket,
                    aws_sdk_s3::error::DisplayErrorContext(&e)
                ))
            })?;

        tracing::info!(bucket = %self.bucket, key, "Uploaded certificate artifact");
        Ok(())
    }
}

/// Artifact store writing files under a local directory.
///
/// Used in offline mode so rendered documents can be inspected without
/// any remote upload.
#[derive(Debug, Clone)]
pub struct LocalArtifactStore {
    root_dir: PathBuf,
}

impl LocalArtifactStore {
    pub fn new(root_dir: impl AsRef<Path>) -> Self {
        Self {
            root_dir: root_dir.as_ref().to_path_buf(),
        }
    }

    /// Returns the path an artifact with `key` is written to.
    ///
    /// Keys must be a single plain file name so every artifact lands
    /// directly under the root directory.
    pub fn path_for(&self, key: &str) -> Result<PathBuf, AppError> {
        let has_separator = key.contains(|c: char| c == '/' || c == '\\');
        let mut components = Path::new(key).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(name)), None) if !has_separator => Ok(self.root_dir.join(name)),
            _ => Err(AppError::Storage(format!(
                "Artifact key '{}' is not a plain file name",
                key
            ))),
        }
    }
}

#[async_trait]
impl ArtifactStore for LocalArtifactStore {
    async fn put(&self, key: &str, body: Vec<u8>, _content_type: &str) -> Result<(), AppError> {
        let path = self.path_for(key)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await.map_err(|e| {
                AppError::Storage(format!("Failed to create '{}': {}", parent.display(), e))
            })?;
        }

        fs::write(&path, body)
            .await
            .map_err(|e| AppError::Storage(format!("Failed to write '{}': {}", path.display(), e)))?;

        tracing::info!(path = %path.display(), "Wrote certificate artifact to local disk");
        Ok(())
    }
}
