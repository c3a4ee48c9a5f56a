// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Activity retrieval service.
//!
//! The fetch/merge logic in front of the cache:
//! 1. Return the cached value when present
//! 2. Otherwise page through the Strava API until an empty page
//! 3. Store the result, exactly once per miss
//!
//! Cache failures are surfaced to the caller, which decides whether to
//! fall back to re-fetching or fail the request.

use crate::cache::ActivityCache;
use crate::error::Result;
use crate::models::{ActivityList, ExtendedActivityInfo, ZonesSummary};
use crate::services::StravaClient;
use std::sync::Arc;

/// Page size used when backfilling an athlete's history from Strava.
const STRAVA_FETCH_PAGE_SIZE: u32 = 200;

/// Retrieves activity data, preferring the cache over the Strava API.
pub struct ActivityRetriever {
    strava: StravaClient,
    cache: Arc<ActivityCache>,
}

impl ActivityRetriever {
    pub fn new(strava: StravaClient, cache: Arc<ActivityCache>) -> Self {
        Self { strava, cache }
    }

    /// Get the full activity history for an athlete.
    ///
    /// On a cache miss, pages through the Strava list endpoint until an
    /// empty page signals end-of-data, then caches the whole list.
    pub async fn retrieve_activities(
        &self,
        access_token: &str,
        athlete_id: u64,
    ) -> Result<ActivityList> {
        if let Some(cached) = self.cache.get(athlete_id).await? {
            tracing::debug!(athlete_id, count = cached.len(), "Using cached activity list");
            return Ok(cached);
        }

        let mut full_activities = ActivityList::new();
        let mut page = 1u32;
        loop {
            tracing::debug!(athlete_id, page, "Loading athlete activity page");
            let activities = self
                .strava
                .list_activities(access_token, page, STRAVA_FETCH_PAGE_SIZE)
                .await?;
            if activities.is_empty() {
                break;
            }
            full_activities.extend(activities);
            page += 1;
        }

        self.cache.store(athlete_id, &full_activities).await?;

        tracing::info!(
            athlete_id,
            count = full_activities.len(),
            "Fetched and cached activity list"
        );
        Ok(full_activities)
    }

    /// Get the detail record for an activity.
    ///
    /// On a cache miss, fetches the detailed activity and its zone
    /// summaries, keeps the heart-rate summary, and caches the result.
    pub async fn retrieve_activity(
        &self,
        access_token: &str,
        activity_id: u64,
    ) -> Result<ExtendedActivityInfo> {
        if let Some(cached) = self.cache.get_activity(activity_id).await? {
            tracing::debug!(activity_id, "Using cached activity detail");
            return Ok(cached);
        }

        tracing::debug!(activity_id, "Activity not in cache, downloading");
        let activity = self.strava.get_activity(access_token, activity_id).await?;
        let zones = self
            .strava
            .get_activity_zones(access_token, activity_id)
            .await?;

        let info = ExtendedActivityInfo {
            activity,
            zones_summary: heart_rate_zone(zones),
        };

        self.cache.store_activity(activity_id, &info).await?;

        Ok(info)
    }
}

/// Pick the heart-rate zone summary out of the per-activity zone list.
fn heart_rate_zone(zones: Vec<ZonesSummary>) -> Option<ZonesSummary> {
    zones.into_iter().find(|zone| zone.zone_type == "heartrate")
}
