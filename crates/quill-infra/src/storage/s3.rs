//! S3 object store.
//!
//! Only the operations the reconciliation pipeline needs; uploads and
//! presigned-URL issuance live in a separate flow.

use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_s3::Client;

use quill_core::error::FileStoreError;
use quill_core::ports::ObjectStore;

/// S3 connection settings.
#[derive(Debug, Clone)]
pub struct S3Config {
    pub bucket: String,
    pub region: String,
}

/// S3-backed [`ObjectStore`].
#[derive(Debug, Clone)]
pub struct S3ObjectStore {
    client: Client,
    bucket: String,
}

impl S3ObjectStore {
    /// Build a client from the ambient AWS credential chain.
    pub async fn new(config: S3Config) -> Self {
        tracing::info!(bucket = %config.bucket, region = %config.region, "Initializing S3 object store");

        let sdk_config = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(config.region))
            .load()
            .await;

        Self {
            client: Client::new(&sdk_config),
            bucket: config.bucket,
        }
    }
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    async fn delete(&self, key: &str) -> Result<(), FileStoreError> {
        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| FileStoreError::ObjectStore {
                key: key.to_string(),
                reason: e.to_string(),
            })?;

        tracing::debug!(%key, "Object deleted");
        Ok(())
    }

    async fn exists(&self, key: &str) -> Result<bool, FileStoreError> {
        match self
            .client
            .head_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
        {
            Ok(_) => Ok(true),
            Err(err) => {
                let service_err = err.into_service_error();
                if service_err.is_not_found() {
                    Ok(false)
                } else {
                    Err(FileStoreError::ObjectStore {
                        key: key.to_string(),
                        reason: service_err.to_string(),
                    })
                }
            }
        }
    }
}
