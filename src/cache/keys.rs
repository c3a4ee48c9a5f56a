// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Key scheme shared by the cache backends.
//!
//! Every cached record is addressed by its entity kind and a numeric
//! identifier. Identifiers are `u64` by type, so derived keys are always
//! pure numeric path segments and cannot escape the configured root.

/// Relative key for an athlete's activity list.
pub fn activity_list_key(athlete_id: u64) -> String {
    format!("users/{}/activity_list.json", athlete_id)
}

/// Relative key for one activity's detail record.
pub fn activity_key(activity_id: u64) -> String {
    format!("activities/{}/activity.json", activity_id)
}

/// Document ID for one page of a paged activity list. Pages start at 1.
pub fn page_key(athlete_id: u64, page: u32) -> String {
    format!("{}_page{}", athlete_id, page)
}

/// Join a configured object prefix with a relative key.
///
/// A prefix with and without a trailing slash produces the same key, and
/// an empty prefix yields the relative key unchanged.
pub fn object_key(prefix: &str, relative: &str) -> String {
    let prefix = prefix.trim_end_matches('/');
    if prefix.is_empty() {
        relative.to_string()
    } else {
        format!("{}/{}", prefix, relative)
    }
}
