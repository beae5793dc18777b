//! Response formatting.
//!
//! Turns a [`FetchResult`] into the JSON payload the front-end consumes:
//!
//! - success: `{"status": 200, "contentType": "text/html", "response": "..."}`
//! - failure: `{"error": "..."}`

use serde::Serialize;

use crate::FetchResult;

/// Wire payload returned to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum SerializedResponse {
    Success {
        status: u16,
        #[serde(rename = "contentType")]
        content_type: Option<String>,
        response: String,
    },
    Error {
        error: String,
    },
}

impl SerializedResponse {
    /// Serialize to a compact JSON string.
    pub fn to_json(&self) -> String {
        // Plain strings and integers only; serialization cannot fail.
        serde_json::to_string(self).unwrap_or_else(|_| r#"{"error":"serialization failed"}"#.to_string())
    }
}

/// Map a fetch outcome to its wire payload. Every result maps to exactly one payload.
pub fn format(result: &FetchResult) -> SerializedResponse {
    match result.error() {
        Some(error) => SerializedResponse::Error { error: error.to_string() },
        None => SerializedResponse::Success {
            status: result.http_status().unwrap_or_default(),
            content_type: result.content_type().map(str::to_string),
            response: result.body().unwrap_or_default().to_string(),
        },
    }
}
