//! Serde helpers for byte fields
//!
//! Byte vectors travel as standard base64 strings (the encoding every JSON
//! client already produces for binary data). Public-key keyed maps use hex
//! strings as object keys so they remain valid JSON.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;

/// Encode bytes as standard base64 (RFC 4648, padded)
pub fn encode_base64(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

/// Serialize/deserialize `Vec<u8>` as base64 string
pub mod base64_vec {
    use super::*;

    pub fn serialize<S>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&STANDARD.encode(bytes))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<u8>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        STANDARD.decode(s.as_bytes()).map_err(serde::de::Error::custom)
    }
}

/// Serialize/deserialize `BTreeMap<Vec<u8>, u64>` with hex-encoded keys
pub mod hex_key_map {
    use super::*;

    pub fn serialize<S>(map: &BTreeMap<Vec<u8>, u64>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let encoded: BTreeMap<String, u64> =
            map.iter().map(|(k, v)| (hex::encode(k), *v)).collect();
        encoded.serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<BTreeMap<Vec<u8>, u64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let encoded = BTreeMap::<String, u64>::deserialize(deserializer)?;
        encoded
            .into_iter()
            .map(|(k, v)| {
                hex::decode(&k)
                    .map(|bytes| (bytes, v))
                    .map_err(serde::de::Error::custom)
            })
            .collect()
    }
}
