// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Strava-Analysis: fetch and analyze a user's Strava workout history.
//!
//! This crate provides the backend library for retrieving activity data
//! from the Strava API and caching it behind a pluggable storage layer,
//! so that expensive, rate-limited, paginated API calls happen at most
//! once per athlete or activity.

pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod services;
