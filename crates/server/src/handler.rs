//! Router and shared application state.
//!
//! The state is immutable after startup; handlers only read from it.
use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use fetchgate_client::{CommandConfig, CommandFetcher, FetchClient, FetchConfig};
use fetchgate_core::{AppConfig, Error};
use tower_http::trace::TraceLayer;

use crate::routes::{command, curl, health};

/// Fetchers shared by every request.
#[derive(Debug, Clone)]
pub struct AppState {
    pub fetch_client: FetchClient,
    pub command_fetcher: CommandFetcher,
}

impl AppState {
    pub fn new(fetch_config: FetchConfig, command_config: CommandConfig) -> Result<Self, Error> {
        Ok(Self { fetch_client: FetchClient::new(fetch_config)?, command_fetcher: CommandFetcher::new(command_config) })
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, Error> {
        Self::new(FetchConfig::from(config), CommandConfig::from(config))
    }
}

/// Build the application router.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route("/curl", post(curl::curl))
        .route("/command", get(command::command))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
