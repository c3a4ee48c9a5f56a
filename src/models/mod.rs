// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Data models for the application.

pub mod activity;

pub use activity::{
    ActivityDetailed, ActivityList, ActivitySummary, ExtendedActivityInfo, ZoneBucket,
    ZonesSummary,
};
