use std::collections::BTreeMap;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;

use crate::errors::PaginationError;

/// An opaque pagination cursor: the sort-key column values of a boundary row,
/// base64-encoded as canonical JSON.
///
/// The backing map is ordered, so encoding is deterministic: the same key
/// tuple always produces the same cursor string.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Cursor(BTreeMap<String, serde_json::Value>);

impl Cursor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.0.insert(key.into(), value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&serde_json::Value> {
        self.0.get(key)
    }

    pub fn encode(&self) -> String {
        let object: serde_json::Map<String, serde_json::Value> =
            self.0.iter().map(|(k, v)| (k.clone(), v.clone())).collect();
        BASE64.encode(serde_json::Value::Object(object).to_string())
    }

    /// Decode an opaque cursor string. Anything that is not base64 of a JSON
    /// object fails with `InvalidCursor`; callers surface that as a request
    /// validation error, not a crash.
    pub fn decode(raw: &str) -> Result<Self, PaginationError> {
        let bytes = BASE64
            .decode(raw)
            .map_err(|_| PaginationError::InvalidCursor)?;
        let value: serde_json::Value =
            serde_json::from_slice(&bytes).map_err(|_| PaginationError::InvalidCursor)?;
        let object = value.as_object().ok_or(PaginationError::InvalidCursor)?;

        let mut keys = BTreeMap::new();
        for (k, v) in object {
            keys.insert(k.clone(), v.clone());
        }
        Ok(Self(keys))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn round_trips_single_key() {
        let cursor = Cursor::new().with("id", json!("7f6b6e52-9f68-4b2c-a517-b6fb3d6327cb"));
        let decoded = Cursor::decode(&cursor.encode()).unwrap();
        assert_eq!(decoded, cursor);
    }

    #[test]
    fn round_trips_multiple_keys() {
        let cursor = Cursor::new()
            .with("name", json!("Mathematics"))
            .with("id", json!("e9b1c5a0-0000-4000-8000-000000000001"));
        let decoded = Cursor::decode(&cursor.encode()).unwrap();
        assert_eq!(decoded.get("name"), Some(&json!("Mathematics")));
        assert_eq!(decoded, cursor);
    }

    #[test]
    fn encoding_is_deterministic_regardless_of_insertion_order() {
        let a = Cursor::new().with("a", json!(1)).with("b", json!(2));
        let b = Cursor::new().with("b", json!(2)).with("a", json!(1));
        assert_eq!(a.encode(), b.encode());
    }

    #[test]
    fn rejects_garbage() {
        assert!(Cursor::decode("not base64!!").is_err());
    }

    #[test]
    fn rejects_non_object_json() {
        let raw = BASE64.encode("[1,2,3]");
        assert!(Cursor::decode(&raw).is_err());
    }

    #[test]
    fn rejects_tampered_base64() {
        let mut encoded = Cursor::new().with("id", json!(1)).encode();
        encoded.insert(0, '@');
        assert!(Cursor::decode(&encoded).is_err());
    }
}
