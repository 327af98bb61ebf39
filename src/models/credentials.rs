//! Credential Record
//!
//! The two-field credential record persisted between runs. Existing files may
//! carry `api_id` as either a JSON string or an integer, so the decoder
//! accepts both.

use serde::{Deserialize, Deserializer, Serialize};

/// Stored API credentials; existence implies a previous successful login
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    #[serde(deserialize_with = "deserialize_api_id")]
    pub api_id: i64,
    pub api_hash: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ApiIdRepr {
    Int(i64),
    Str(String),
}

fn deserialize_api_id<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    match ApiIdRepr::deserialize(deserializer)? {
        ApiIdRepr::Int(id) => Ok(id),
        ApiIdRepr::Str(s) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}
