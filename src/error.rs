// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application error types.
//!
//! The cache layer distinguishes three outcomes for a lookup:
//! - a miss (key never written) is `Ok(None)`, never an error
//! - corruption (record exists but cannot be decoded, or paged metadata
//!   names a page that is absent) is `CacheError::Corrupt`
//! - every other storage failure is surfaced as-is; the caller decides
//!   whether to re-fetch from Strava or fail the request

/// Errors surfaced by the activity cache.
///
/// The cache never retries and never logs-and-continues past corruption;
/// only true "key absent" is absorbed and turned into a normal miss.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    /// A record exists but its contents cannot be trusted.
    #[error("Corrupt cache entry {key}: {reason}")]
    Corrupt { key: String, reason: String },

    /// Filesystem failure other than "file not found".
    #[error("Cache I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Firestore or Cloud Storage failure other than true absence.
    #[error("Remote store error: {0}")]
    Remote(String),

    /// A value could not be serialized for storage.
    #[error("Failed to serialize cache entry: {0}")]
    Serialization(String),

    /// A partially written object could not be deleted after a failed
    /// write. Storage is left in an inconsistent state; this is more
    /// severe than the write failure that triggered the cleanup.
    #[error("Failed to delete object {key} after unsuccessful write: {reason}")]
    CleanupFailed { key: String, reason: String },
}

/// Application error type for the service layer.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Strava API error: {0}")]
    StravaApi(String),

    #[error("Cache error: {0}")]
    Cache(#[from] CacheError),
}

/// Result type alias for the service layer.
pub type Result<T> = std::result::Result<T, AppError>;
