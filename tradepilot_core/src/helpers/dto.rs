use serde::Deserialize;

/// Envelope every REST endpoint wraps its payload in. On success the
/// server sends `error` as an empty string, and `payload` may be absent
/// entirely, so both fields are tolerant of either encoding.
#[derive(Debug, Clone, Deserialize)]
pub struct RestResponse<T = serde_json::Value> {
    #[serde(default)]
    pub error: String,
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub payload: Option<T>,
}

impl<T> RestResponse<T> {
    /// The payload, if the server reported success.
    pub fn into_payload(self) -> Option<T> {
        if self.success {
            self.payload
        } else {
            None
        }
    }
}
