//! # Value Codecs
//!
//! Externalized values are `serde_json::Value` payloads encoded to bytes
//! before the storage write and decoded on read. Two wire formats are
//! supported: JSON (default) and CBOR.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{FieldError, FieldResult};

/// Serialization format for a stored blob
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    /// JSON text encoding
    #[default]
    Json,
    /// CBOR binary encoding
    Cbor,
}

impl Format {
    /// Encode a value to its stored byte representation
    pub fn encode(&self, value: &Value) -> FieldResult<Vec<u8>> {
        match self {
            Format::Json => serde_json::to_vec(value).map_err(|e| FieldError::Codec(e.to_string())),
            Format::Cbor => {
                let mut buf = Vec::new();
                ciborium::into_writer(value, &mut buf)
                    .map_err(|e| FieldError::Codec(e.to_string()))?;
                Ok(buf)
            }
        }
    }

    /// Decode stored bytes back into a value
    pub fn decode(&self, bytes: &[u8]) -> FieldResult<Value> {
        match self {
            Format::Json => {
                serde_json::from_slice(bytes).map_err(|e| FieldError::Codec(e.to_string()))
            }
            Format::Cbor => {
                ciborium::from_reader(bytes).map_err(|e| FieldError::Codec(e.to_string()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_json_round_trip() {
        let value = json!({"a": 1, "b": ["x", null]});
        let bytes = Format::Json.encode(&value).unwrap();
        assert_eq!(Format::Json.decode(&bytes).unwrap(), value);
    }

    #[test]
    fn test_cbor_round_trip() {
        let value = json!({"a": 1, "b": ["x", null]});
        let bytes = Format::Cbor.encode(&value).unwrap();
        assert_eq!(Format::Cbor.decode(&bytes).unwrap(), value);
    }

    #[test]
    fn test_decode_garbage_is_codec_error() {
        let result = Format::Json.decode(b"not json at all{{");
        assert!(matches!(result, Err(FieldError::Codec(_))));
    }
}
