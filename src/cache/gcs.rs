// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Cloud Storage-backed activity cache.
//!
//! One object per entity under a bucket and configurable key prefix. The
//! bucket and prefix are read-only after construction; concurrent writers
//! to the same key are last-writer-wins. If a write fails, the possibly
//! partial object is deleted so a later read never observes a corrupt
//! blob; a failed cleanup is reported as its own, more severe error.

use crate::cache::{codec, keys};
use crate::error::CacheError;
use crate::models::{ActivityList, ExtendedActivityInfo};
use google_cloud_storage::client::{Client, ClientConfig};
use google_cloud_storage::http::objects::delete::DeleteObjectRequest;
use google_cloud_storage::http::objects::download::Range;
use google_cloud_storage::http::objects::get::GetObjectRequest;
use google_cloud_storage::http::objects::upload::{Media, UploadObjectRequest, UploadType};
use google_cloud_storage::http::Error as GcsError;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Activity cache storing one Cloud Storage object per entity.
pub struct GcsActivityCache {
    client: Client,
    bucket: String,
    prefix: String,
}

impl GcsActivityCache {
    /// Create a new Cloud Storage-backed cache.
    ///
    /// For local development with an emulator, set STORAGE_EMULATOR_HOST.
    pub async fn new(bucket: &str, prefix: &str) -> Result<Self, CacheError> {
        let config = if std::env::var("STORAGE_EMULATOR_HOST").is_ok() {
            tracing::info!("Using anonymous connection for Cloud Storage emulator");
            ClientConfig::default().anonymous()
        } else {
            ClientConfig::default().with_auth().await.map_err(|e| {
                CacheError::Remote(format!("Failed to set up Cloud Storage auth: {}", e))
            })?
        };

        tracing::info!(bucket, prefix, "Connected to Cloud Storage");

        Ok(Self {
            client: Client::new(config),
            bucket: bucket.to_string(),
            prefix: prefix.to_string(),
        })
    }

    // ─── Generic Object Helpers ──────────────────────────────────

    /// Serialize and upload one object.
    async fn store_at_key<T: Serialize>(&self, key: &str, value: &T) -> Result<(), CacheError> {
        let data = codec::encode(value)?;

        let request = UploadObjectRequest {
            bucket: self.bucket.clone(),
            ..Default::default()
        };
        let media = Media::new(key.to_string());

        let write_err = match self
            .client
            .upload_object(&request, data.into_bytes(), &UploadType::Simple(media))
            .await
        {
            Ok(_) => return Ok(()),
            Err(e) => e,
        };

        // The object may have been partially written; delete it so a later
        // read sees a miss instead of a corrupt blob.
        let delete = DeleteObjectRequest {
            bucket: self.bucket.clone(),
            object: key.to_string(),
            ..Default::default()
        };
        match self.client.delete_object(&delete).await {
            Ok(()) => Err(CacheError::Remote(format!(
                "Failed to write object {} (partial object erased): {}",
                key, write_err
            ))),
            // Nothing was written, so there is nothing to clean up.
            Err(e) if is_not_found(&e) => Err(CacheError::Remote(format!(
                "Failed to write object {}: {}",
                key, write_err
            ))),
            Err(delete_err) => Err(CacheError::CleanupFailed {
                key: key.to_string(),
                reason: format!(
                    "write failed ({}), cleanup delete failed ({})",
                    write_err, delete_err
                ),
            }),
        }
    }

    /// Download and decode one object. A missing object is a miss; any
    /// other failure is surfaced.
    async fn get_at_key<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, CacheError> {
        let request = GetObjectRequest {
            bucket: self.bucket.clone(),
            object: key.to_string(),
            ..Default::default()
        };

        match self.client.download_object(&request, &Range::default()).await {
            Ok(data) => codec::decode(key, &data).map(Some),
            Err(e) if is_not_found(&e) => Ok(None),
            Err(e) => Err(CacheError::Remote(format!(
                "Failed to read object {}: {}",
                key, e
            ))),
        }
    }

    // ─── Cache Operations ────────────────────────────────────────

    /// Replace the activity list for an athlete.
    pub async fn store(&self, athlete_id: u64, activities: &ActivityList) -> Result<(), CacheError> {
        let key = keys::object_key(&self.prefix, &keys::activity_list_key(athlete_id));
        tracing::debug!(athlete_id, key = %key, "Storing activity list");
        self.store_at_key(&key, activities).await
    }

    /// Get the activity list for an athlete.
    pub async fn get(&self, athlete_id: u64) -> Result<Option<ActivityList>, CacheError> {
        let key = keys::object_key(&self.prefix, &keys::activity_list_key(athlete_id));
        self.get_at_key(&key).await
    }

    /// Replace the detail record for an activity.
    pub async fn store_activity(
        &self,
        activity_id: u64,
        activity: &ExtendedActivityInfo,
    ) -> Result<(), CacheError> {
        let key = keys::object_key(&self.prefix, &keys::activity_key(activity_id));
        tracing::debug!(activity_id, key = %key, "Storing activity detail");
        self.store_at_key(&key, activity).await
    }

    /// Get the detail record for an activity.
    pub async fn get_activity(
        &self,
        activity_id: u64,
    ) -> Result<Option<ExtendedActivityInfo>, CacheError> {
        let key = keys::object_key(&self.prefix, &keys::activity_key(activity_id));
        self.get_at_key(&key).await
    }
}

/// True absence of an object, as opposed to any other storage failure.
fn is_not_found(err: &GcsError) -> bool {
    match err {
        GcsError::Response(response) => response.code == 404,
        GcsError::HttpClient(e) => e.status().map(|s| s.as_u16()) == Some(404),
        _ => false,
    }
}
