//! The `{"data": ...}` wrapper Asana puts around every request and response body.

use serde::{Deserialize, Serialize};

/// Asana request/response envelope.
///
/// A response without a `data` member deserializes to `T::default()`
/// (`null` for `serde_json::Value`).
#[derive(Debug, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de> + Default"))]
pub struct DataEnvelope<T> {
    #[serde(default)]
    pub data: T,
}

impl<T> DataEnvelope<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}
