// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use chrono::TimeZone;
use strava_analysis::models::{
    ActivityDetailed, ActivityList, ActivitySummary, ExtendedActivityInfo, ZoneBucket,
    ZonesSummary,
};

/// Check if the Firestore emulator is available via environment variable.
#[allow(dead_code)]
pub fn emulator_available() -> bool {
    std::env::var("FIRESTORE_EMULATOR_HOST").is_ok()
}

/// Skip test with message if emulator not available.
#[macro_export]
macro_rules! require_emulator {
    () => {
        if !crate::common::emulator_available() {
            eprintln!("⚠️  Skipping: FIRESTORE_EMULATOR_HOST not set");
            return;
        }
    };
}

/// Check if a Cloud Storage emulator (e.g. fake-gcs-server) is available.
#[allow(dead_code)]
pub fn gcs_emulator_available() -> bool {
    std::env::var("STORAGE_EMULATOR_HOST").is_ok()
}

/// Skip test with message if no Cloud Storage emulator is available.
#[macro_export]
macro_rules! require_gcs_emulator {
    () => {
        if !crate::common::gcs_emulator_available() {
            eprintln!("⚠️  Skipping: STORAGE_EMULATOR_HOST not set");
            return;
        }
    };
}

/// Generate a unique ID for test isolation.
#[allow(dead_code)]
pub fn unique_id() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos() as u64
}

/// One activity summary with a deterministic start date.
#[allow(dead_code)]
pub fn summary(id: u64, name: &str) -> ActivitySummary {
    ActivitySummary {
        id,
        name: name.to_string(),
        sport_type: "Ride".to_string(),
        start_date: chrono::Utc.with_ymd_and_hms(2024, 1, 15, 10, 0, 0).unwrap(),
        distance: 25_000.0,
        moving_time: 3600,
        elapsed_time: 3900,
        total_elevation_gain: 512.5,
        average_heartrate: Some(142.0),
        average_watts: None,
        suffer_score: Some(55.0),
        private: false,
    }
}

/// An activity list of `len` entries with sequential IDs starting at `first_id`.
#[allow(dead_code)]
pub fn activity_list(len: usize, first_id: u64) -> ActivityList {
    (0..len as u64)
        .map(|i| summary(first_id + i, &format!("Activity {}", first_id + i)))
        .collect()
}

/// A detailed activity record.
#[allow(dead_code)]
pub fn detail(id: u64) -> ActivityDetailed {
    ActivityDetailed {
        id,
        name: "Morning Ride".to_string(),
        sport_type: "Ride".to_string(),
        start_date: chrono::Utc.with_ymd_and_hms(2024, 1, 15, 10, 0, 0).unwrap(),
        distance: 25_000.0,
        moving_time: 3600,
        elapsed_time: 3900,
        total_elevation_gain: 512.5,
        calories: Some(850.0),
        description: Some("Great ride today!".to_string()),
        device_name: Some("Garmin Edge 530".to_string()),
    }
}

/// A detail record, with or without a heart-rate zone summary.
#[allow(dead_code)]
pub fn extended(id: u64, with_zones: bool) -> ExtendedActivityInfo {
    ExtendedActivityInfo {
        activity: detail(id),
        zones_summary: with_zones.then(|| ZonesSummary {
            zone_type: "heartrate".to_string(),
            sensor_based: true,
            custom_zones: false,
            score: Some(123.0),
            distribution_buckets: vec![
                ZoneBucket {
                    min: 0.0,
                    max: 120.0,
                    time: 600,
                },
                ZoneBucket {
                    min: 120.0,
                    max: 150.0,
                    time: 2400,
                },
                ZoneBucket {
                    min: 150.0,
                    max: 180.0,
                    time: 600,
                },
            ],
        }),
    }
}
