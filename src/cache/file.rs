// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! File-based activity cache.
//!
//! One JSON file per entity under a configured root directory, at the
//! paths derived by the key scheme. Parent directories are created on
//! demand. Writes go through a temp file and a rename so a concurrent
//! reader never observes a half-written file; concurrent writers to the
//! same key are last-writer-wins.

use crate::cache::{codec, keys};
use crate::error::CacheError;
use crate::models::{ActivityList, ExtendedActivityInfo};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Activity cache storing one file per entity under `root`.
pub struct FileActivityCache {
    root: PathBuf,
}

impl FileActivityCache {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn entity_path(&self, key: &str) -> PathBuf {
        self.root.join(key)
    }

    /// Serialize and write an entity, creating parent directories as needed.
    async fn write_entity<T: Serialize>(&self, key: &str, value: &T) -> Result<(), CacheError> {
        let path = self.entity_path(key);
        let data = codec::encode(value)?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }

        // Temp-file-then-rename keeps readers from seeing partial content.
        let tmp = tmp_path(&path);
        fs::write(&tmp, data.as_bytes()).await?;
        fs::rename(&tmp, &path).await?;
        Ok(())
    }

    /// Read and decode an entity. A missing file is a miss; an unreadable
    /// or unparseable file is surfaced, never swallowed.
    async fn read_entity<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, CacheError> {
        match fs::read(self.entity_path(key)).await {
            Ok(data) => codec::decode(key, &data).map(Some),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Replace the activity list for an athlete.
    pub async fn store(&self, athlete_id: u64, activities: &ActivityList) -> Result<(), CacheError> {
        let key = keys::activity_list_key(athlete_id);
        tracing::debug!(athlete_id, key = %key, "Storing activity list");
        self.write_entity(&key, activities).await
    }

    /// Get the activity list for an athlete.
    pub async fn get(&self, athlete_id: u64) -> Result<Option<ActivityList>, CacheError> {
        self.read_entity(&keys::activity_list_key(athlete_id)).await
    }

    /// Replace the detail record for an activity.
    pub async fn store_activity(
        &self,
        activity_id: u64,
        activity: &ExtendedActivityInfo,
    ) -> Result<(), CacheError> {
        let key = keys::activity_key(activity_id);
        tracing::debug!(activity_id, key = %key, "Storing activity detail");
        self.write_entity(&key, activity).await
    }

    /// Get the detail record for an activity.
    pub async fn get_activity(
        &self,
        activity_id: u64,
    ) -> Result<Option<ExtendedActivityInfo>, CacheError> {
        self.read_entity(&keys::activity_key(activity_id)).await
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
