//! Object storage for identity documents and export files.
//!
//! Backed by any S3-compatible store via `object_store`; custom endpoints
//! cover MinIO and Supabase storage in development.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use object_store::aws::{AmazonS3, AmazonS3Builder};
use object_store::path::Path;
use object_store::signer::Signer;
use object_store::{ObjectStore, PutPayload};
use reqwest::{Method, Url};
use thiserror::Error;
use uuid::Uuid;

use crate::config::StorageConfig;

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Storage not configured")]
    NotConfigured,

    #[error("Storage operation failed: {0}")]
    Backend(#[from] object_store::Error),
}

/// S3-backed store for uploaded documents and generated exports.
#[derive(Clone)]
pub struct StorageService {
    store: Arc<AmazonS3>,
    signed_url_expiry: Duration,
}

impl StorageService {
    /// Builds the store from configuration.
    pub fn new(config: &StorageConfig) -> Result<Self, StorageError> {
        let mut builder = AmazonS3Builder::new()
            .with_bucket_name(&config.bucket)
            .with_region(&config.region);

        if !config.access_key_id.is_empty() {
            builder = builder
                .with_access_key_id(&config.access_key_id)
                .with_secret_access_key(&config.secret_access_key);
        }

        if !config.endpoint.is_empty() {
            builder = builder
                .with_endpoint(&config.endpoint)
                .with_allow_http(config.allow_http);
        }

        Ok(Self {
            store: Arc::new(builder.build()?),
            signed_url_expiry: Duration::from_secs(config.signed_url_expiry_secs),
        })
    }

    /// Uploads a file.
    pub async fn put(&self, key: &str, bytes: Vec<u8>) -> Result<(), StorageError> {
        self.store
            .put(&Path::from(key), PutPayload::from(bytes))
            .await?;
        Ok(())
    }

    /// Deletes a file. Callers treat failures as best effort.
    pub async fn delete(&self, key: &str) -> Result<(), StorageError> {
        self.store.delete(&Path::from(key)).await?;
        Ok(())
    }

    /// Returns a short-lived presigned GET URL for a stored file.
    pub async fn signed_get_url(&self, key: &str) -> Result<Url, StorageError> {
        let url = self
            .store
            .signed_url(Method::GET, &Path::from(key), self.signed_url_expiry)
            .await?;
        Ok(url)
    }

    /// Lifetime of presigned URLs in seconds, for response bodies.
    pub fn signed_url_expiry_secs(&self) -> u64 {
        self.signed_url_expiry.as_secs()
    }
}

impl std::fmt::Debug for StorageService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StorageService")
            .field("signed_url_expiry", &self.signed_url_expiry)
            .finish()
    }
}

/// Storage key for an uploaded identity document.
pub fn document_key(prefix: &str, extension: &str) -> String {
    format!("{}/{}.{}", prefix, Uuid::new_v4(), extension)
}

/// Storage key for a generated roster export.
pub fn export_key(name: &str) -> String {
    format!("exports/{}-{}.pdf", name, Utc::now().format("%Y%m%d-%H%M%S"))
}
