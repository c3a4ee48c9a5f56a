// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Pluggable activity cache.
//!
//! One uniform contract over four interchangeable backends: in-process
//! maps, the local filesystem, paged Firestore documents, and Cloud
//! Storage objects. The backend is selected once at startup from
//! configuration and held by callers as an injected dependency; nothing
//! outside this module knows that more than one backend exists.
//!
//! Contract, identical across backends:
//! - a miss is `Ok(None)`, never an error
//! - every store is a wholesale replacement of the prior value
//! - entry order inside a list survives a store/get round trip
//! - writing one ID never affects any other ID

pub mod codec;
pub mod file;
pub mod firestore;
pub mod gcs;
pub mod keys;
pub mod memory;

pub use file::FileActivityCache;
pub use firestore::{FirestoreActivityCache, FIRESTORE_PAGE_SIZE};
pub use gcs::GcsActivityCache;
pub use memory::MemoryActivityCache;

use crate::config::{CacheBackendKind, Config};
use crate::error::CacheError;
use crate::models::{ActivityList, ExtendedActivityInfo};

/// Activity cache over the closed set of backends.
pub enum ActivityCache {
    Memory(MemoryActivityCache),
    File(FileActivityCache),
    Firestore(FirestoreActivityCache),
    Gcs(GcsActivityCache),
}

impl ActivityCache {
    /// Construct the backend selected by configuration.
    pub async fn from_config(config: &Config) -> Result<Self, CacheError> {
        match config.cache_backend {
            CacheBackendKind::Memory => {
                tracing::info!("Using in-memory activity cache");
                Ok(Self::Memory(MemoryActivityCache::new()))
            }
            CacheBackendKind::File => {
                tracing::info!(root = %config.cache_root, "Using file activity cache");
                Ok(Self::File(FileActivityCache::new(&config.cache_root)))
            }
            CacheBackendKind::Firestore => Ok(Self::Firestore(
                FirestoreActivityCache::new(&config.gcp_project_id).await?,
            )),
            CacheBackendKind::Gcs => Ok(Self::Gcs(
                GcsActivityCache::new(&config.cache_bucket, &config.cache_prefix).await?,
            )),
        }
    }

    /// Replace the cached activity list for an athlete.
    pub async fn store(
        &self,
        athlete_id: u64,
        activities: &ActivityList,
    ) -> Result<(), CacheError> {
        match self {
            Self::Memory(cache) => {
                cache.store(athlete_id, activities.clone());
                Ok(())
            }
            Self::File(cache) => cache.store(athlete_id, activities).await,
            Self::Firestore(cache) => cache.store(athlete_id, activities).await,
            Self::Gcs(cache) => cache.store(athlete_id, activities).await,
        }
    }

    /// Get the cached activity list for an athlete, `None` on a miss.
    pub async fn get(&self, athlete_id: u64) -> Result<Option<ActivityList>, CacheError> {
        match self {
            Self::Memory(cache) => Ok(cache.get(athlete_id)),
            Self::File(cache) => cache.get(athlete_id).await,
            Self::Firestore(cache) => cache.get(athlete_id).await,
            Self::Gcs(cache) => cache.get(athlete_id).await,
        }
    }

    /// Replace the cached detail record for an activity.
    pub async fn store_activity(
        &self,
        activity_id: u64,
        activity: &ExtendedActivityInfo,
    ) -> Result<(), CacheError> {
        match self {
            Self::Memory(cache) => {
                cache.store_activity(activity_id, activity.clone());
                Ok(())
            }
            Self::File(cache) => cache.store_activity(activity_id, activity).await,
            Self::Firestore(cache) => cache.store_activity(activity_id, activity).await,
            Self::Gcs(cache) => cache.store_activity(activity_id, activity).await,
        }
    }

    /// Get the cached detail record for an activity, `None` on a miss.
    pub async fn get_activity(
        &self,
        activity_id: u64,
    ) -> Result<Option<ExtendedActivityInfo>, CacheError> {
        match self {
            Self::Memory(cache) => Ok(cache.get_activity(activity_id)),
            Self::File(cache) => cache.get_activity(activity_id).await,
            Self::Firestore(cache) => cache.get_activity(activity_id).await,
            Self::Gcs(cache) => cache.get_activity(activity_id).await,
        }
    }
}
