// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! JSON record codec shared by the persistent cache backends.
//!
//! Encoding failures are serialization errors; decoding failures always
//! mean the stored record is corrupt and carry the offending key so the
//! caller can report it.

use crate::error::CacheError;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Serialize a value to its stored JSON form.
pub fn encode<T: Serialize>(value: &T) -> Result<String, CacheError> {
    serde_json::to_string(value).map_err(|e| CacheError::Serialization(e.to_string()))
}

/// Deserialize a stored record, mapping any failure to `Corrupt`.
pub fn decode<T: DeserializeOwned>(key: &str, bytes: &[u8]) -> Result<T, CacheError> {
    serde_json::from_slice(bytes).map_err(|e| CacheError::Corrupt {
        key: key.to_string(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_failure_is_corrupt_and_names_key() {
        let err = decode::<Vec<u64>>("users/7/activity_list.json", b"{not json").unwrap_err();
        match err {
            CacheError::Corrupt { key, .. } => assert_eq!(key, "users/7/activity_list.json"),
            other => panic!("expected Corrupt, got {:?}", other),
        }
    }

    #[test]
    fn test_encode_decode_round_trip() {
        let value = vec![1u64, 2, 3];
        let encoded = encode(&value).unwrap();
        let decoded: Vec<u64> = decode("k", encoded.as_bytes()).unwrap();
        assert_eq!(decoded, value);
    }
}
