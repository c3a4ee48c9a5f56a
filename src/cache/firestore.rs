// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Firestore-backed activity cache with paged activity lists.
//!
//! Firestore caps a document at about 1 MiB, which is smaller than a full
//! activity list for long-history athletes, so a list is split into
//! fixed-size pages stored as separate documents. A small metadata
//! document recording the page count is written only after every page
//! write has succeeded: metadata is the commit signal, so a crash
//! mid-store leaves stale pages that readers treat as a miss, never as a
//! corrupt hit.
//!
//! The two-phase write is not transactional across concurrent writers to
//! the same athlete; concurrent stores may interleave pages
//! (last-writer-wins, with the losing writer's pages overwritten).

use crate::cache::{codec, keys};
use crate::error::CacheError;
use crate::models::{ActivityList, ActivitySummary, ExtendedActivityInfo};
use futures_util::{stream, StreamExt};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Entries per page document.
pub const FIRESTORE_PAGE_SIZE: usize = 50;

const MAX_CONCURRENT_DB_OPS: usize = 50;

/// Collection names as constants.
mod collections {
    /// Page and metadata documents, keyed by athlete ID
    pub const ACTIVITY_LISTS: &str = "activity_lists";
    /// Detail documents, keyed by activity ID
    pub const ACTIVITIES: &str = "activities";
}

/// Document wrapper carrying the record as one opaque JSON string, keeping
/// record fields out of Firestore's indexing.
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonDocument {
    pub json_payload: String,
}

/// Metadata committed after all pages of an activity list are written.
#[derive(Debug, Serialize, Deserialize)]
pub struct PagedEntityMetadata {
    pub page_count: u32,
}

/// Activity cache backed by paged Firestore documents.
pub struct FirestoreActivityCache {
    client: firestore::FirestoreDb,
}

impl FirestoreActivityCache {
    /// Create a new Firestore-backed cache.
    ///
    /// For local development with the emulator, set FIRESTORE_EMULATOR_HOST.
    pub async fn new(project_id: &str) -> Result<Self, CacheError> {
        // If the emulator environment variable is set, use an unauthenticated
        // connection to avoid local credential warnings and leakage.
        if std::env::var("FIRESTORE_EMULATOR_HOST").is_ok() {
            return Self::create_emulator_client(project_id).await;
        }

        let client = firestore::FirestoreDb::new(project_id)
            .await
            .map_err(|e| CacheError::Remote(format!("Failed to connect to Firestore: {}", e)))?;

        tracing::info!(project = project_id, "Connected to Firestore");

        Ok(Self { client })
    }

    /// Create a Firestore client for the emulator with unauthenticated access.
    async fn create_emulator_client(project_id: &str) -> Result<Self, CacheError> {
        tracing::info!("Using unauthenticated connection for Firestore Emulator");

        let token_source = gcloud_sdk::ExternalJwtFunctionSource::new(|| async {
            Ok(gcloud_sdk::Token {
                token_type: "Bearer".to_string(),
                token: gcloud_sdk::SecretValue::new(
                    "eyJhbGciOiJub25lIn0.eyJ1aWQiOiJ0ZXN0In0."
                        .to_string()
                        .into(),
                ),
                expiry: chrono::Utc::now() + chrono::Duration::hours(1),
            })
        });

        let options = firestore::FirestoreDbOptions::new(project_id.to_string());

        let client = firestore::FirestoreDb::with_options_token_source(
            options,
            gcloud_sdk::GCP_DEFAULT_SCOPES.clone(),
            gcloud_sdk::TokenSourceType::ExternalSource(Box::new(token_source)),
        )
        .await
        .map_err(|e| {
            CacheError::Remote(format!("Failed to connect to Firestore Emulator: {}", e))
        })?;

        tracing::info!(
            project = project_id,
            "Connected to Firestore (Emulator/Unauthenticated)"
        );

        Ok(Self { client })
    }

    // ─── Generic Document Helpers ────────────────────────────────

    /// Serialize and write one document.
    async fn store_entity<T: Serialize>(
        &self,
        collection: &'static str,
        doc_id: &str,
        value: &T,
    ) -> Result<(), CacheError> {
        let doc = JsonDocument {
            json_payload: codec::encode(value)?,
        };

        let _: () = self
            .client
            .fluent()
            .update()
            .in_col(collection)
            .document_id(doc_id)
            .object(&doc)
            .execute()
            .await
            .map_err(|e| CacheError::Remote(e.to_string()))?;
        Ok(())
    }

    /// Read and decode one document. An absent document is a miss; an
    /// undecodable payload is corruption.
    async fn retrieve_entity<T: DeserializeOwned>(
        &self,
        collection: &'static str,
        doc_id: &str,
    ) -> Result<Option<T>, CacheError> {
        let doc: Option<JsonDocument> = self
            .client
            .fluent()
            .select()
            .by_id_in(collection)
            .obj()
            .one(doc_id)
            .await
            .map_err(|e| CacheError::Remote(e.to_string()))?;

        match doc {
            Some(doc) => codec::decode(doc_id, doc.json_payload.as_bytes()).map(Some),
            None => Ok(None),
        }
    }

    /// Delete one document.
    async fn delete_entity(
        &self,
        collection: &'static str,
        doc_id: &str,
    ) -> Result<(), CacheError> {
        self.client
            .fluent()
            .delete()
            .from(collection)
            .document_id(doc_id)
            .execute()
            .await
            .map_err(|e| CacheError::Remote(e.to_string()))?;
        Ok(())
    }

    // ─── Activity List Operations ────────────────────────────────

    /// Replace the activity list for an athlete.
    ///
    /// Pages are written first; the metadata document commits them. A
    /// failed page or metadata write fails the whole store, leaving the
    /// previous committed list (or a miss) visible to readers.
    pub async fn store(&self, athlete_id: u64, activities: &ActivityList) -> Result<(), CacheError> {
        let page_count = page_count(activities.len());

        // Prior metadata, so pages beyond the new count can be cleaned up
        // after the new list commits.
        let previous = match self
            .retrieve_entity::<PagedEntityMetadata>(
                collections::ACTIVITY_LISTS,
                &athlete_id.to_string(),
            )
            .await
        {
            Ok(metadata) => metadata,
            Err(e) => {
                tracing::warn!(
                    athlete_id,
                    error = %e,
                    "Ignoring unreadable page metadata on overwrite"
                );
                None
            }
        };

        stream::iter(1..=page_count)
            .map(|page| {
                let slice = page_slice(activities, page);
                async move {
                    let doc_id = keys::page_key(athlete_id, page as u32);
                    tracing::debug!(athlete_id, page, "Storing activity list page");
                    self.store_entity(collections::ACTIVITY_LISTS, &doc_id, &slice)
                        .await
                }
            })
            .buffer_unordered(MAX_CONCURRENT_DB_OPS)
            .collect::<Vec<Result<(), CacheError>>>()
            .await
            .into_iter()
            .collect::<Result<Vec<()>, CacheError>>()?;

        self.store_entity(
            collections::ACTIVITY_LISTS,
            &athlete_id.to_string(),
            &PagedEntityMetadata {
                page_count: page_count as u32,
            },
        )
        .await?;

        // The new list is committed; pages beyond the new count belong to a
        // previous, longer list. A failed delete leaves an orphan that no
        // reader will ever reference, so it is logged rather than surfaced.
        if let Some(previous) = previous {
            for page in (page_count as u32 + 1)..=previous.page_count {
                let doc_id = keys::page_key(athlete_id, page);
                if let Err(e) = self
                    .delete_entity(collections::ACTIVITY_LISTS, &doc_id)
                    .await
                {
                    tracing::warn!(
                        athlete_id,
                        page,
                        error = %e,
                        "Failed to delete orphaned activity list page"
                    );
                }
            }
        }

        Ok(())
    }

    /// Get the activity list for an athlete.
    ///
    /// Absent metadata is a miss. Metadata naming a page that does not
    /// exist is corruption and is surfaced, never returned as a silently
    /// truncated list.
    pub async fn get(&self, athlete_id: u64) -> Result<Option<ActivityList>, CacheError> {
        let metadata: Option<PagedEntityMetadata> = self
            .retrieve_entity(collections::ACTIVITY_LISTS, &athlete_id.to_string())
            .await?;

        let Some(metadata) = metadata else {
            return Ok(None);
        };

        let mut activities = ActivityList::new();
        for page in 1..=metadata.page_count {
            let doc_id = keys::page_key(athlete_id, page);
            tracing::debug!(athlete_id, page, "Loading activity list page");

            match self
                .retrieve_entity::<Vec<ActivitySummary>>(collections::ACTIVITY_LISTS, &doc_id)
                .await?
            {
                Some(page_activities) => activities.extend(page_activities),
                None => {
                    tracing::warn!(
                        athlete_id,
                        page,
                        page_count = metadata.page_count,
                        "Broken paged activity list: expected page is missing"
                    );
                    return Err(CacheError::Corrupt {
                        key: doc_id,
                        reason: format!(
                            "metadata promises {} pages but page {} is absent",
                            metadata.page_count, page
                        ),
                    });
                }
            }
        }

        Ok(Some(activities))
    }

    // ─── Activity Detail Operations ──────────────────────────────

    /// Replace the detail record for an activity. A detail record always
    /// fits in one document, so no paging is involved.
    pub async fn store_activity(
        &self,
        activity_id: u64,
        activity: &ExtendedActivityInfo,
    ) -> Result<(), CacheError> {
        self.store_entity(
            collections::ACTIVITIES,
            &activity_id.to_string(),
            activity,
        )
        .await
    }

    /// Get the detail record for an activity.
    pub async fn get_activity(
        &self,
        activity_id: u64,
    ) -> Result<Option<ExtendedActivityInfo>, CacheError> {
        self.retrieve_entity(collections::ACTIVITIES, &activity_id.to_string())
            .await
    }
}

/// Number of pages needed for a list of `len` entries, at least 1 so an
/// empty list still commits a metadata document.
fn page_count(len: usize) -> usize {
    std::cmp::max(1, len.div_ceil(FIRESTORE_PAGE_SIZE))
}

fn page_slice(activities: &[ActivitySummary], page: usize) -> Vec<ActivitySummary> {
    let start = usize::min(FIRESTORE_PAGE_SIZE * (page - 1), activities.len());
    let end = usize::min(FIRESTORE_PAGE_SIZE * page, activities.len());
    activities[start..end].to_vec()
}
