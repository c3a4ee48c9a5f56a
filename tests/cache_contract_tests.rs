// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Cache contract tests for the memory and file backends.
//!
//! The same semantics must hold for every backend: misses are `Ok(None)`,
//! stores replace wholesale, round trips preserve entry order and
//! optional fields, and IDs never interfere with each other.

use strava_analysis::cache::{ActivityCache, FileActivityCache, MemoryActivityCache};
use strava_analysis::config::{CacheBackendKind, Config};
use strava_analysis::error::CacheError;

mod common;
use common::{activity_list, extended, summary};

// ═══════════════════════════════════════════════════════════════════════════
// MEMORY BACKEND
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_memory_miss_on_fresh_cache() {
    let cache = MemoryActivityCache::new();
    assert!(cache.get(12345).is_none());
    assert!(cache.get_activity(12345).is_none());
}

#[test]
fn test_memory_round_trip_preserves_order() {
    let cache = MemoryActivityCache::new();
    let activities = activity_list(5, 100);

    cache.store(1234, activities.clone());
    assert_eq!(cache.get(1234), Some(activities));
}

#[test]
fn test_memory_overwrite_leaves_latest() {
    let cache = MemoryActivityCache::new();
    cache.store(1234, activity_list(5, 100));
    cache.store(1234, activity_list(2, 900));

    let loaded = cache.get(1234).unwrap();
    assert_eq!(loaded.len(), 2);
    assert_eq!(loaded[0].id, 900);
}

#[test]
fn test_memory_cross_id_isolation() {
    let cache = MemoryActivityCache::new();
    let list_a = activity_list(3, 100);
    let list_b = activity_list(4, 500);

    cache.store(1, list_a.clone());
    cache.store(2, list_b);
    assert_eq!(cache.get(1), Some(list_a));
}

#[test]
fn test_memory_detail_round_trip() {
    let cache = MemoryActivityCache::new();
    let with_zones = extended(42, true);
    let without_zones = extended(43, false);

    cache.store_activity(42, with_zones.clone());
    cache.store_activity(43, without_zones.clone());

    assert_eq!(cache.get_activity(42), Some(with_zones));
    let loaded = cache.get_activity(43).unwrap();
    assert!(loaded.zones_summary.is_none());
    assert_eq!(loaded, without_zones);
}

// ═══════════════════════════════════════════════════════════════════════════
// FILE BACKEND
// ═══════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn test_file_miss_on_fresh_cache() {
    let root = tempfile::tempdir().unwrap();
    let cache = FileActivityCache::new(root.path());

    assert!(cache.get(12345).await.unwrap().is_none());
    assert!(cache.get_activity(12345).await.unwrap().is_none());
}

#[tokio::test]
async fn test_file_round_trip_preserves_order() {
    let root = tempfile::tempdir().unwrap();
    let cache = FileActivityCache::new(root.path());
    let activities = activity_list(7, 100);

    cache.store(1234, &activities).await.unwrap();
    assert_eq!(cache.get(1234).await.unwrap(), Some(activities));
}

#[tokio::test]
async fn test_file_empty_list_round_trip() {
    let root = tempfile::tempdir().unwrap();
    let cache = FileActivityCache::new(root.path());

    cache.store(1234, &vec![]).await.unwrap();
    assert_eq!(cache.get(1234).await.unwrap(), Some(vec![]));
}

#[tokio::test]
async fn test_file_overwrite_leaves_latest() {
    let root = tempfile::tempdir().unwrap();
    let cache = FileActivityCache::new(root.path());

    cache.store(1234, &activity_list(5, 100)).await.unwrap();
    cache.store(1234, &vec![summary(999, "Replacement")]).await.unwrap();

    let loaded = cache.get(1234).await.unwrap().unwrap();
    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded[0].id, 999);
    assert_eq!(loaded[0].name, "Replacement");
}

#[tokio::test]
async fn test_file_cross_id_isolation() {
    let root = tempfile::tempdir().unwrap();
    let cache = FileActivityCache::new(root.path());
    let list_a = activity_list(3, 100);

    cache.store(1, &list_a).await.unwrap();
    cache.store(2, &activity_list(4, 500)).await.unwrap();

    assert_eq!(cache.get(1).await.unwrap(), Some(list_a));
}

#[tokio::test]
async fn test_file_detail_round_trip_with_and_without_zones() {
    let root = tempfile::tempdir().unwrap();
    let cache = FileActivityCache::new(root.path());
    let with_zones = extended(42, true);
    let without_zones = extended(43, false);

    cache.store_activity(42, &with_zones).await.unwrap();
    cache.store_activity(43, &without_zones).await.unwrap();

    assert_eq!(cache.get_activity(42).await.unwrap(), Some(with_zones));
    let loaded = cache.get_activity(43).await.unwrap().unwrap();
    assert!(loaded.zones_summary.is_none(), "absent zones must stay absent");
    assert_eq!(loaded, without_zones);
}

#[tokio::test]
async fn test_file_unparseable_entry_is_corruption_not_miss() {
    let root = tempfile::tempdir().unwrap();
    let cache = FileActivityCache::new(root.path());

    let path = root.path().join("users/77/activity_list.json");
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(&path, b"{definitely not json").unwrap();

    let err = cache.get(77).await.unwrap_err();
    assert!(matches!(err, CacheError::Corrupt { .. }), "got {:?}", err);
}

// ═══════════════════════════════════════════════════════════════════════════
// FACADE SELECTION
// ═══════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn test_facade_selects_memory_backend() {
    let config = Config::default();
    let cache = ActivityCache::from_config(&config).await.unwrap();

    assert!(cache.get(1).await.unwrap().is_none());
    let activities = activity_list(3, 100);
    cache.store(1, &activities).await.unwrap();
    assert_eq!(cache.get(1).await.unwrap(), Some(activities));
}

#[tokio::test]
async fn test_facade_selects_file_backend() {
    let root = tempfile::tempdir().unwrap();
    let config = Config {
        cache_backend: CacheBackendKind::File,
        cache_root: root.path().to_string_lossy().into_owned(),
        ..Config::default()
    };
    let cache = ActivityCache::from_config(&config).await.unwrap();

    let info = extended(7, true);
    cache.store_activity(7, &info).await.unwrap();
    assert_eq!(cache.get_activity(7).await.unwrap(), Some(info));

    // Written through the file backend at the derived path
    assert!(root.path().join("activities/7/activity.json").exists());
}
