// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod activity;
pub mod strava;

pub use activity::ActivityRetriever;
pub use strava::StravaClient;
