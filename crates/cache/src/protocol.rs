//! Request and response shapes exchanged between peers

use serde::{Deserialize, Serialize};

/// Ask a peer for `key` in the named group
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Request {
    pub group: String,
    pub key: String,
}

/// A peer's answer: the raw value bytes
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Response {
    pub value: Vec<u8>,
}

impl Request {
    pub fn new(group: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            key: key.into(),
        }
    }
}

impl Response {
    /// Encode for the wire
    pub fn encode(&self) -> peercache_core::Result<Vec<u8>> {
        bincode::serialize(self).map_err(|e| peercache_core::Error::serialization(e.to_string()))
    }

    /// Decode from the wire
    pub fn decode(data: &[u8]) -> peercache_core::Result<Self> {
        bincode::deserialize(data).map_err(|e| peercache_core::Error::serialization(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_wire_format() {
        let response = Response {
            value: vec![0, 159, 146, 150, 255],
        };
        let encoded = response.encode().unwrap();
        assert_eq!(Response::decode(&encoded).unwrap(), response);
    }

    #[test]
    fn test_decode_rejects_garbage() {
        let err = Response::decode(&[0xff]).unwrap_err();
        assert!(matches!(err, peercache_core::Error::Serialization { .. }));
    }
}
