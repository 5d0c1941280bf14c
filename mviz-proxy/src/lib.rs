//! mviz-proxy library interface
//!
//! Relays a third-party API response verbatim as JSON so the map pages
//! can fetch the world outline without a cross-origin request. An
//! upstream failure yields a fixed 500 payload; there is no retry.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;
use std::time::Duration;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

/// Error payload returned when the upstream fetch fails.
pub const UPSTREAM_ERROR_MESSAGE: &str = "Failed to fetch data from external API.";

/// Upstream request timeout.
const UPSTREAM_TIMEOUT: Duration = Duration::from_secs(30);

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub client: reqwest::Client,
    pub upstream_url: String,
    pub port: u16,
}

impl AppState {
    pub fn new(upstream_url: String, port: u16) -> reqwest::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(UPSTREAM_TIMEOUT)
            .build()?;
        Ok(Self {
            client,
            upstream_url,
            port,
        })
    }
}

/// Build the application router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route("/api/data", get(proxy_data))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// GET / - minimal landing page
async fn index() -> Html<&'static str> {
    Html("<html><body><p>mviz-proxy: <a href=\"/api/data\">/api/data</a></p></body></html>")
}

/// GET /health - health check endpoint
async fn health(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "module": "mviz-proxy",
        "version": env!("CARGO_PKG_VERSION"),
        "port": state.port,
        "upstream": state.upstream_url,
    }))
}

/// GET /api/data - relay the upstream response as JSON
///
/// The upstream body passes through verbatim; any failure (connect,
/// status, parse) collapses to one fixed 500 payload.
pub async fn proxy_data(State(state): State<AppState>) -> Response {
    match fetch_upstream(&state).await {
        Ok(value) => {
            info!("Relayed upstream response from {}", state.upstream_url);
            (StatusCode::OK, Json(value)).into_response()
        }
        Err(e) => {
            error!("Upstream fetch from {} failed: {}", state.upstream_url, e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": UPSTREAM_ERROR_MESSAGE })),
            )
                .into_response()
        }
    }
}

async fn fetch_upstream(state: &AppState) -> anyhow::Result<serde_json::Value> {
    let response = state
        .client
        .get(&state.upstream_url)
        .send()
        .await?
        .error_for_status()?;
    Ok(response.json().await?)
}
