// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Strava activity models for caching and analysis.
//!
//! Cached records are immutable: the cache never mutates a stored entry,
//! only replaces the whole list or the whole detail record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One workout summary from the athlete's activity feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivitySummary {
    /// Strava activity ID
    pub id: u64,
    /// Activity name/title
    pub name: String,
    /// Sport type (Ride, Run, Hike, etc.)
    pub sport_type: String,
    /// Start date/time
    pub start_date: DateTime<Utc>,
    /// Distance in meters
    pub distance: f64,
    /// Moving time in seconds
    pub moving_time: u64,
    /// Elapsed time in seconds
    pub elapsed_time: u64,
    /// Total elevation gain in meters
    pub total_elevation_gain: f64,
    /// Average heart rate, if recorded
    pub average_heartrate: Option<f64>,
    /// Average power in watts, if recorded
    pub average_watts: Option<f64>,
    /// Strava suffer score, if available
    pub suffer_score: Option<f64>,
    /// Whether the activity is private
    pub private: bool,
}

/// Ordered activity history for one athlete.
///
/// Order is insertion order from Strava and is preserved across a cache
/// store/retrieve round trip.
pub type ActivityList = Vec<ActivitySummary>;

/// Detailed activity record from the per-activity endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityDetailed {
    /// Strava activity ID
    pub id: u64,
    /// Activity name/title
    pub name: String,
    /// Sport type (Ride, Run, Hike, etc.)
    pub sport_type: String,
    /// Start date/time
    pub start_date: DateTime<Utc>,
    /// Distance in meters
    pub distance: f64,
    /// Moving time in seconds
    pub moving_time: u64,
    /// Elapsed time in seconds
    pub elapsed_time: u64,
    /// Total elevation gain in meters
    pub total_elevation_gain: f64,
    /// Calories burned, if available
    pub calories: Option<f64>,
    /// Free-form description
    pub description: Option<String>,
    /// Device name (e.g. "Garmin Edge 530")
    pub device_name: Option<String>,
}

/// Heart-rate zone summary for one activity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZonesSummary {
    /// Zone type as reported by Strava ("heartrate", "power", ...)
    #[serde(rename = "type")]
    pub zone_type: String,
    /// Whether the zones came from a sensor
    pub sensor_based: bool,
    /// Whether the athlete configured custom zones
    pub custom_zones: bool,
    /// Zone score, if computed
    pub score: Option<f64>,
    /// Time spent in each zone bucket
    pub distribution_buckets: Vec<ZoneBucket>,
}

/// One bucket of a zone distribution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneBucket {
    /// Lower bound of the bucket
    pub min: f64,
    /// Upper bound of the bucket
    pub max: f64,
    /// Seconds spent in the bucket
    pub time: u64,
}

/// Detail record cached per activity: the detailed activity body plus the
/// heart-rate zone summary, which Strava may not have for every activity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtendedActivityInfo {
    pub activity: ActivityDetailed,
    pub zones_summary: Option<ZonesSummary>,
}
