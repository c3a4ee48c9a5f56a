// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-memory activity cache.
//!
//! Two keyed maps held for the lifetime of the process. DashMap provides
//! the concurrent access the cache contract requires without a lock at
//! the facade. No I/O, no failure modes.

use crate::models::{ActivityList, ExtendedActivityInfo};
use dashmap::DashMap;

/// Process-lifetime activity cache backed by concurrent maps.
#[derive(Default)]
pub struct MemoryActivityCache {
    activity_lists: DashMap<u64, ActivityList>,
    activity_details: DashMap<u64, ExtendedActivityInfo>,
}

impl MemoryActivityCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the activity list for an athlete.
    pub fn store(&self, athlete_id: u64, activities: ActivityList) {
        self.activity_lists.insert(athlete_id, activities);
    }

    /// Get the activity list for an athlete, `None` if never stored.
    pub fn get(&self, athlete_id: u64) -> Option<ActivityList> {
        self.activity_lists
            .get(&athlete_id)
            .map(|entry| entry.clone())
    }

    /// Replace the detail record for an activity.
    pub fn store_activity(&self, activity_id: u64, activity: ExtendedActivityInfo) {
        self.activity_details.insert(activity_id, activity);
    }

    /// Get the detail record for an activity, `None` if never stored.
    pub fn get_activity(&self, activity_id: u64) -> Option<ExtendedActivityInfo> {
        self.activity_details
            .get(&activity_id)
            .map(|entry| entry.clone())
    }
}
