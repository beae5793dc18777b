//! Target URL denylist.
//!
//! The raw URL string is matched, case-insensitively, against a fixed
//! alternation of forbidden tokens. This is a substring match over the whole
//! URL, not a parsed-scheme check: `https://example.com/file` is rejected
//! just like `file:///etc/passwd`.
use std::sync::LazyLock;

use fetchgate_core::Error;
use regex::Regex;

/// Denied tokens, matched anywhere in the URL.
const DENIED_TOKENS: &[&str] = &["dict", "file", "ftp", "netdoc"];

/// Error message returned for any denylist hit. The matched token is only logged.
pub const BLOCKED_MESSAGE: &str = "no hack!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!!";

static DENYLIST: LazyLock<Regex> = LazyLock::new(|| {
    let pattern = format!("(?i){}", DENIED_TOKENS.join("|"));
    Regex::new(&pattern).expect("invalid denylist pattern")
});

/// Check a target URL before any network call is made.
///
/// Returns the URL unchanged when it passes.
///
/// # Errors
///
/// - [`Error::MissingInput`] when the URL is empty or whitespace.
/// - [`Error::BlockedScheme`] when a denied token appears anywhere in it.
pub fn validate(target_url: &str) -> Result<&str, Error> {
    if target_url.trim().is_empty() {
        return Err(Error::MissingInput("empty url".into()));
    }

    if let Some(hit) = DENYLIST.find(target_url) {
        tracing::warn!(token = %hit.as_str().to_lowercase(), "rejected target url");
        return Err(Error::BlockedScheme(BLOCKED_MESSAGE.to_string()));
    }

    Ok(target_url)
}
