//! Outbound fetchers guarded by the URL denylist.
//!
//! ### Library-style fetch
//! - Single HTTP GET, one attempt, no retries
//! - Connect and total timeout (default: 10s)
//! - Redirects followed automatically (default limit: 30, as libcurl)
//! - No User-Agent and no compression negotiation unless configured
//! - Body captured in memory; any HTTP status counts as a completed transfer
//!
//! ### Command-style fetch
//! - Runs an external fetch program (default: `curl`) with the URL and an optional extra argument
//! - See [`command`]
//!
//! ### Denylist
//! - Case-insensitive substring match on `dict|file|ftp|netdoc`
//! - See [`denylist`]

pub mod command;
pub mod denylist;

use std::time::{Duration, Instant};

use reqwest::{Client, header};

pub use command::{CommandConfig, CommandFetcher, CommandOutput};
pub use denylist::{BLOCKED_MESSAGE, validate};

use fetchgate_core::{AppConfig, Error, FetchResult};

/// Configuration for the fetch client.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// User agent string (default: none, no header is sent)
    pub user_agent: Option<String>,

    /// Connect and total request timeout (default: 10s)
    pub timeout: Duration,

    /// Maximum number of redirects to follow (default: 30)
    pub max_redirects: usize,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self { user_agent: None, timeout: Duration::from_secs(10), max_redirects: 30 }
    }
}

impl From<&AppConfig> for FetchConfig {
    fn from(config: &AppConfig) -> Self {
        Self { user_agent: config.user_agent.clone(), timeout: config.timeout(), max_redirects: config.max_redirects }
    }
}

/// HTTP fetch client for the library-style endpoint.
///
/// Holds no per-request state; one instance can serve any number of
/// concurrent requests.
#[derive(Debug, Clone)]
pub struct FetchClient {
    http: Client,
    config: FetchConfig,
}

impl FetchClient {
    /// Create a new fetch client with the given configuration.
    pub fn new(config: FetchConfig) -> Result<Self, Error> {
        let mut builder = Client::builder()
            .connect_timeout(config.timeout)
            .timeout(config.timeout)
            .redirect(reqwest::redirect::Policy::limited(config.max_redirects))
            .use_rustls_tls();

        if let Some(user_agent) = &config.user_agent {
            builder = builder.user_agent(user_agent);
        }

        let http = builder
            .build()
            .map_err(|e| Error::ClientBuild(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self { http, config })
    }

    /// Validate the URL against the denylist, then fetch it.
    ///
    /// Rejections and transport failures come back as a failed [`FetchResult`].
    pub async fn fetch_guarded(&self, target_url: &str) -> FetchResult {
        match validate(target_url) {
            Ok(url) => self.fetch(url).await,
            Err(e) => FetchResult::from_error(&e),
        }
    }

    /// Fetch a URL, folding transport failures into the result.
    pub async fn fetch(&self, target_url: &str) -> FetchResult {
        self.try_fetch(target_url).await.unwrap_or_else(|e| {
            tracing::warn!(url = %target_url, error = %e, "fetch failed");
            FetchResult::from_error(&e)
        })
    }

    /// Fetch a URL, returning the body and metadata of the final response.
    ///
    /// Non-2xx statuses are not errors: the transfer completed and the status is reported as-is.
    pub async fn try_fetch(&self, target_url: &str) -> Result<FetchResult, Error> {
        let start = Instant::now();

        let response = self
            .http
            .get(target_url)
            .header(header::ACCEPT, "*/*")
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        let final_url = response.url().clone();
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned());

        let bytes = response.bytes().await.map_err(|e| self.transport_error(e))?;

        let fetch_ms = start.elapsed().as_millis() as u64;

        tracing::debug!(
            "fetched {} -> {} in {}ms ({} bytes, status {})",
            target_url,
            final_url,
            fetch_ms,
            bytes.len(),
            status.as_u16()
        );

        Ok(FetchResult::success(status.as_u16(), content_type, String::from_utf8_lossy(&bytes).into_owned()))
    }

    fn transport_error(&self, err: reqwest::Error) -> Error {
        if err.is_timeout() {
            Error::Transport(format!("operation timed out after {} ms", self.config.timeout.as_millis()))
        } else {
            Error::Transport(error_chain(&err))
        }
    }
}

/// Render an error with its sources, e.g. `error sending request: connection refused`.
fn error_chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;

    use axum::{
        Router,
        extract::Path,
        http::{HeaderMap, HeaderValue, StatusCode},
        response::{IntoResponse, Redirect, Response},
        routing::get,
    };
    use std::net::SocketAddr;

    async fn spawn_fixture() -> SocketAddr {
        let app = Router::new()
            .route("/ok", get(|| async { ([("content-type", "text/plain")], "ok") }))
            .route("/missing", get(|| async { (StatusCode::NOT_FOUND, [("content-type", "text/html")], "gone") }))
            .route("/redirect", get(|| async { Redirect::temporary("/ok") }))
            .route("/r/:n", get(redirect_chain))
            .route("/headers", get(echo_headers))
            .route(
                "/latin1",
                get(|| async {
                    let value = HeaderValue::from_bytes(b"text/plain; name=caf\xe9").unwrap();
                    ([(header::CONTENT_TYPE, value)], "x")
                }),
            )
            .route(
                "/slow",
                get(|| async {
                    tokio::time::sleep(Duration::from_secs(5)).await;
                    "late"
                }),
            );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("axum serve");
        });
        addr
    }

    async fn redirect_chain(Path(n): Path<u32>) -> Response {
        if n == 0 { "done".into_response() } else { Redirect::temporary(&format!("/r/{}", n - 1)).into_response() }
    }

    async fn echo_headers(headers: HeaderMap) -> String {
        format!("ua={:?} ae={:?}", headers.get(header::USER_AGENT), headers.get(header::ACCEPT_ENCODING))
    }

    fn client_with_timeout(timeout: Duration) -> FetchClient {
        FetchClient::new(FetchConfig { timeout, ..Default::default() }).unwrap()
    }

    #[test]
    fn test_fetch_config_default() {
        let config = FetchConfig::default();
        assert_eq!(config.user_agent, None);
        assert_eq!(config.timeout, Duration::from_secs(10));
        assert_eq!(config.max_redirects, 30);
    }

    #[test]
    fn test_fetch_config_from_app_config() {
        let app = AppConfig { timeout_ms: 2500, max_redirects: 3, user_agent: Some("ua/1".into()), ..Default::default() };
        let config = FetchConfig::from(&app);
        assert_eq!(config.timeout, Duration::from_millis(2500));
        assert_eq!(config.max_redirects, 3);
        assert_eq!(config.user_agent.as_deref(), Some("ua/1"));
    }

    #[tokio::test]
    async fn test_fetch_client_new() {
        let client = FetchClient::new(FetchConfig::default());
        assert!(client.is_ok());
    }

    #[tokio::test]
    async fn test_fetch_ok_formats_as_expected() {
        let addr = spawn_fixture().await;
        let client = FetchClient::new(FetchConfig::default()).unwrap();

        let result = client.fetch(&format!("http://{addr}/ok")).await;
        let value = serde_json::to_value(fetchgate_core::format(&result)).unwrap();
        assert_eq!(value, serde_json::json!({"status": 200, "contentType": "text/plain", "response": "ok"}));
    }

    #[tokio::test]
    async fn test_fetch_non_success_status_is_reported() {
        let addr = spawn_fixture().await;
        let client = FetchClient::new(FetchConfig::default()).unwrap();

        let result = client.fetch(&format!("http://{addr}/missing")).await;
        assert!(result.is_success());
        assert_eq!(result.http_status(), Some(404));
        assert_eq!(result.content_type(), Some("text/html"));
        assert_eq!(result.body(), Some("gone"));
    }

    #[tokio::test]
    async fn test_fetch_follows_redirects() {
        let addr = spawn_fixture().await;
        let client = FetchClient::new(FetchConfig::default()).unwrap();

        let result = client.fetch(&format!("http://{addr}/redirect")).await;
        assert_eq!(result.http_status(), Some(200));
        assert_eq!(result.body(), Some("ok"));
    }

    #[tokio::test]
    async fn test_fetch_follows_long_redirect_chain() {
        let addr = spawn_fixture().await;
        let client = FetchClient::new(FetchConfig::default()).unwrap();

        let result = client.fetch(&format!("http://{addr}/r/15")).await;
        assert_eq!(result.error(), None);
        assert_eq!(result.http_status(), Some(200));
        assert_eq!(result.body(), Some("done"));
    }

    #[tokio::test]
    async fn test_fetch_redirect_chain_past_limit_fails() {
        let addr = spawn_fixture().await;
        let client = FetchClient::new(FetchConfig::default()).unwrap();

        let result = client.fetch(&format!("http://{addr}/r/31")).await;
        assert!(!result.is_success());
    }

    #[tokio::test]
    async fn test_fetch_sends_no_user_agent_or_encoding_by_default() {
        let addr = spawn_fixture().await;
        let client = FetchClient::new(FetchConfig::default()).unwrap();

        let result = client.fetch(&format!("http://{addr}/headers")).await;
        assert_eq!(result.body(), Some("ua=None ae=None"));
    }

    #[tokio::test]
    async fn test_fetch_sends_configured_user_agent() {
        let addr = spawn_fixture().await;
        let client = FetchClient::new(FetchConfig { user_agent: Some("ua/1".into()), ..Default::default() }).unwrap();

        let result = client.fetch(&format!("http://{addr}/headers")).await;
        assert_eq!(result.body(), Some("ua=Some(\"ua/1\") ae=None"));
    }

    #[tokio::test]
    async fn test_fetch_non_ascii_content_type_is_kept() {
        let addr = spawn_fixture().await;
        let client = FetchClient::new(FetchConfig::default()).unwrap();

        let result = client.fetch(&format!("http://{addr}/latin1")).await;
        assert_eq!(result.content_type(), Some("text/plain; name=caf\u{fffd}"));
    }

    #[tokio::test]
    async fn test_fetch_redirect_limit_zero_reports_redirect_error() {
        let addr = spawn_fixture().await;
        let client = FetchClient::new(FetchConfig { max_redirects: 0, ..Default::default() }).unwrap();

        let result = client.fetch(&format!("http://{addr}/redirect")).await;
        assert!(!result.is_success());
    }

    #[tokio::test]
    async fn test_fetch_timeout_is_bounded() {
        let addr = spawn_fixture().await;
        let client = client_with_timeout(Duration::from_millis(300));

        let start = Instant::now();
        let result = client.fetch(&format!("http://{addr}/slow")).await;
        assert!(start.elapsed() < Duration::from_secs(3));
        assert_eq!(result.error(), Some("operation timed out after 300 ms"));
        assert_eq!(result.body(), None);
    }

    #[tokio::test]
    async fn test_fetch_connection_refused_is_transport_error() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = FetchClient::new(FetchConfig::default()).unwrap();
        let result = client.try_fetch(&format!("http://{addr}/")).await;
        assert!(matches!(result, Err(Error::Transport(_))));
    }

    #[tokio::test]
    async fn test_fetch_unsupported_scheme_is_transport_error() {
        let client = FetchClient::new(FetchConfig::default()).unwrap();
        let result = client.try_fetch("gopher://127.0.0.1:70/_x").await;
        assert!(matches!(result, Err(Error::Transport(_))));
    }

    #[tokio::test]
    async fn test_fetch_twice_independent() {
        let addr = spawn_fixture().await;
        let client = FetchClient::new(FetchConfig::default()).unwrap();
        let url = format!("http://{addr}/ok");

        let first = client.fetch(&url).await;
        let second = client.fetch(&url).await;
        assert!(first.is_success());
        assert!(second.is_success());
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_fetch_guarded_blocks_before_network() {
        let client = FetchClient::new(FetchConfig::default()).unwrap();

        let result = client.fetch_guarded("FILE:///etc/passwd").await;
        assert_eq!(result.error(), Some(BLOCKED_MESSAGE));

        let result = client.fetch_guarded("").await;
        assert_eq!(result.error(), Some("empty url"));
    }
}
