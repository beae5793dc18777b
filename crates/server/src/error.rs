//! Unstructured errors for the command-style endpoint.
//!
//! The library-style endpoint never fails at the HTTP level; it always answers
//! with a JSON envelope. Command-style failures are plain text.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use fetchgate_core::Error;

/// Plain-text error response for the command-style endpoint.
#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct ServerError(#[from] pub Error);

impl ServerError {
    /// Map error to HTTP status code
    pub fn status_code(&self) -> StatusCode {
        match &self.0 {
            Error::MissingInput(_) | Error::BlockedScheme(_) => StatusCode::BAD_REQUEST,
            Error::Transport(_) => StatusCode::BAD_GATEWAY,
            Error::ExternalProcess(_) | Error::ClientBuild(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn body(&self) -> String {
        match &self.0 {
            Error::MissingInput(_) => "empty url querystring".to_string(),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self.0, "command request failed");
        } else {
            tracing::debug!(error = %self.0, "command request rejected");
        }
        (status, self.body()).into_response()
    }
}
