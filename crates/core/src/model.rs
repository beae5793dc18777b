//! Request and result types shared by the fetchers and the formatter.

use crate::Error;

/// A single inbound fetch request.
///
/// Built at the HTTP/CLI boundary from typed form or query fields and dropped
/// once the response has been sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    /// The user-supplied address to fetch.
    pub target_url: String,
    /// Extra argument for the external fetch command (command-style only).
    pub option: Option<String>,
}

impl FetchRequest {
    /// Build a request from optional boundary fields.
    ///
    /// Fails with [`Error::MissingInput`] when the URL is absent or blank.
    /// An empty `option` is treated as absent.
    pub fn from_parts(target_url: Option<String>, option: Option<String>) -> Result<Self, Error> {
        let target_url = target_url
            .filter(|u| !u.trim().is_empty())
            .ok_or_else(|| Error::MissingInput("empty url".into()))?;

        let option = option.filter(|o| !o.is_empty());

        Ok(Self { target_url, option })
    }
}

/// Outcome of one fetch attempt.
///
/// Exactly one of `body` or `error` is set. Fields are only reachable through
/// accessors so a constructed result cannot be mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchResult {
    http_status: Option<u16>,
    content_type: Option<String>,
    body: Option<String>,
    error: Option<String>,
}

impl FetchResult {
    /// A completed transfer, whatever its HTTP status.
    pub fn success(http_status: u16, content_type: Option<String>, body: String) -> Self {
        Self { http_status: Some(http_status), content_type, body: Some(body), error: None }
    }

    /// A failed attempt carrying only a message.
    pub fn failure(message: impl Into<String>) -> Self {
        Self { http_status: None, content_type: None, body: None, error: Some(message.into()) }
    }

    /// A failed attempt from a typed error; the code prefix is dropped.
    pub fn from_error(err: &Error) -> Self {
        Self::failure(err.message())
    }

    pub fn http_status(&self) -> Option<u16> {
        self.http_status
    }

    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}
