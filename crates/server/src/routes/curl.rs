//! Library-style fetch endpoint: POST /curl
//!
//! Takes a form-encoded `url`, checks it against the denylist, fetches it with
//! the HTTP client and answers with a JSON envelope. Every outcome, including
//! a malformed form body, is a `200` with either the success or error shape.

use std::sync::Arc;

use axum::{
    Form, Json,
    extract::{State, rejection::FormRejection},
};
use fetchgate_core::{FetchRequest, FetchResult, SerializedResponse, format};
use serde::Deserialize;

use crate::handler::AppState;

/// Form body for the library-style endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct CurlForm {
    #[serde(default)]
    pub url: Option<String>,
}

/// POST /curl
pub async fn curl(
    State(state): State<Arc<AppState>>, form: Result<Form<CurlForm>, FormRejection>,
) -> Json<SerializedResponse> {
    let result = match form {
        Ok(Form(form)) => match FetchRequest::from_parts(form.url, None) {
            Ok(request) => state.fetch_client.fetch_guarded(&request.target_url).await,
            Err(e) => FetchResult::from_error(&e),
        },
        Err(rejection) => FetchResult::failure(rejection.body_text()),
    };

    Json(format(&result))
}

#[cfg(test)]
mod tests {
    use crate::handler::test_support::{app, body_string, spawn_upstream};

    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use fetchgate_client::BLOCKED_MESSAGE;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    fn form_request(body: String) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/curl")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body))
            .unwrap()
    }

    async fn call(request: Request<Body>) -> (StatusCode, Value) {
        let resp = app().oneshot(request).await.unwrap();
        let status = resp.status();
        assert_eq!(resp.headers()[header::CONTENT_TYPE], "application/json");
        let body = serde_json::from_str(&body_string(resp.into_body()).await).unwrap();
        (status, body)
    }

    #[tokio::test]
    async fn test_curl_success() {
        let addr = spawn_upstream().await;
        let (status, body) = call(form_request(format!("url=http%3A%2F%2F{addr}%2Fok"))).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"status": 200, "contentType": "text/plain", "response": "ok"}));
    }

    #[tokio::test]
    async fn test_curl_blocked_scheme() {
        let (status, body) = call(form_request("url=file%3A%2F%2F%2Fetc%2Fpasswd".into())).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"error": BLOCKED_MESSAGE}));
    }

    #[tokio::test]
    async fn test_curl_blocked_anywhere_in_url() {
        let (_, body) = call(form_request("url=https%3A%2F%2Fexample.com%2FFile".into())).await;
        assert_eq!(body, json!({"error": BLOCKED_MESSAGE}));
    }

    #[tokio::test]
    async fn test_curl_missing_url() {
        let (status, body) = call(form_request(String::new())).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"error": "empty url"}));
    }

    #[tokio::test]
    async fn test_curl_transport_error_is_json() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let (status, body) = call(form_request(format!("url=http%3A%2F%2F{addr}%2F"))).await;

        assert_eq!(status, StatusCode::OK);
        let obj = body.as_object().unwrap();
        assert_eq!(obj.len(), 1);
        assert!(obj["error"].is_string());
    }

    #[tokio::test]
    async fn test_curl_wrong_content_type_is_json_error() {
        let request = Request::builder()
            .method("POST")
            .uri("/curl")
            .header(header::CONTENT_TYPE, "text/plain")
            .body(Body::from("url=http://example.com"))
            .unwrap();
        let (status, body) = call(request).await;

        assert_eq!(status, StatusCode::OK);
        assert!(body["error"].is_string());
    }
}
