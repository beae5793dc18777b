//! Command-style fetch endpoint: GET /command?url=...&option=...
//!
//! Runs the external fetch program and echoes its raw output inside `<pre>`.
//! Failures are plain text, not JSON.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    response::Html,
};
use fetchgate_core::FetchRequest;
use serde::Deserialize;

use crate::error::ServerError;
use crate::handler::AppState;

/// Query string for the command-style endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct CommandQuery {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub option: Option<String>,
}

/// GET /command
pub async fn command(
    State(state): State<Arc<AppState>>, Query(query): Query<CommandQuery>,
) -> Result<Html<String>, ServerError> {
    let request = FetchRequest::from_parts(query.url, query.option)?;

    let output = state
        .command_fetcher
        .run(&request.target_url, request.option.as_deref())
        .await?;

    Ok(Html(output.to_html()))
}
