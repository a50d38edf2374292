//! Binary fields as text
//!
//! Row bytes are arbitrary, so they are carried through JSON as URL-safe
//! base64 (with padding).

use base64::{engine::general_purpose::URL_SAFE, Engine as _};

use crate::error::{BulkError, Result};

/// Encode bytes as URL-safe base64
pub fn encode(bytes: &[u8]) -> String {
    URL_SAFE.encode(bytes)
}

/// Decode URL-safe base64 back into bytes
pub fn decode(text: &str) -> Result<Vec<u8>> {
    URL_SAFE
        .decode(text)
        .map_err(|e| BulkError::Malformed(format!("invalid base64 {:?}: {}", text, e)))
}

/// Serde adapter for `Option<Vec<u8>>` fields
pub(crate) mod optional {
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Option<Vec<u8>>, serializer: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(bytes) => serializer.serialize_str(&super::encode(bytes)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Vec<u8>>, D::Error> {
        Option::<String>::deserialize(deserializer)?
            .map(|text| super::decode(&text).map_err(de::Error::custom))
            .transpose()
    }
}
