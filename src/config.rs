// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application configuration loaded from environment variables.
//!
//! Configuration is read once at startup and passed into constructors
//! explicitly, so tests can instantiate arbitrary backend/config
//! combinations without touching process-wide state.

use std::env;
use std::str::FromStr;

/// Which cache backend to use, selected once at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheBackendKind {
    /// Process-lifetime in-memory maps. The default.
    Memory,
    /// One JSON file per entity under `cache_root`.
    File,
    /// Paged Firestore documents.
    Firestore,
    /// One Cloud Storage object per entity.
    Gcs,
}

impl FromStr for CacheBackendKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, ConfigError> {
        match s {
            "memory" => Ok(Self::Memory),
            "file" => Ok(Self::File),
            "firestore" => Ok(Self::Firestore),
            "gcs" => Ok(Self::Gcs),
            other => Err(ConfigError::UnknownCacheBackend(other.to_string())),
        }
    }
}

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Strava OAuth client ID (public)
    pub strava_client_id: String,
    /// Strava OAuth client secret
    pub strava_client_secret: String,
    /// Selected cache backend
    pub cache_backend: CacheBackendKind,
    /// Root directory for the file backend
    pub cache_root: String,
    /// GCP project ID (Firestore backend)
    pub gcp_project_id: String,
    /// Bucket name (Cloud Storage backend)
    pub cache_bucket: String,
    /// Object key prefix inside the bucket, with or without a trailing slash
    pub cache_prefix: String,
}

impl Default for Config {
    /// Default config for testing only.
    fn default() -> Self {
        Self {
            strava_client_id: "test_client_id".to_string(),
            strava_client_secret: "test_secret".to_string(),
            cache_backend: CacheBackendKind::Memory,
            cache_root: ".".to_string(),
            gcp_project_id: "test-project".to_string(),
            cache_bucket: "test-bucket".to_string(),
            cache_prefix: String::new(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        Ok(Self {
            strava_client_id: env::var("STRAVA_CLIENT_ID")
                .map_err(|_| ConfigError::Missing("STRAVA_CLIENT_ID"))?,
            strava_client_secret: env::var("STRAVA_CLIENT_SECRET")
                .map(|v| v.trim().to_string())
                .map_err(|_| ConfigError::Missing("STRAVA_CLIENT_SECRET"))?,
            cache_backend: env::var("STRAVA_CACHE_IMPL")
                .unwrap_or_else(|_| "memory".to_string())
                .parse()?,
            cache_root: env::var("STRAVA_CACHE_ROOT").unwrap_or_else(|_| ".".to_string()),
            gcp_project_id: env::var("GCP_PROJECT_ID").unwrap_or_else(|_| "local-dev".to_string()),
            cache_bucket: env::var("STRAVA_CACHE_BUCKET").unwrap_or_default(),
            cache_prefix: env::var("STRAVA_CACHE_PREFIX").unwrap_or_default(),
        })
    }
}

/// Configuration errors detected at startup.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Unknown cache backend: {0} (expected memory|file|firestore|gcs)")]
    UnknownCacheBackend(String),
}
