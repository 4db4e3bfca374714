//! `GET /health` endpoint handler.
//!
//! Returns a [`HealthResponse`] payload inside the standard envelope,
//! containing the server version, uptime, and the active source label.

use std::sync::Arc;

use axum::extract::State;
use axum::response::Response;
use serde::{Deserialize, Serialize};

use crate::middleware::Responder;
use crate::server::AppState;

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
    pub source: String,
}

pub async fn health_handler(State(state): State<Arc<AppState>>, res: Responder) -> Response {
    let health = HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
        source: res.source().to_string(),
    };
    res.ok(health)
}
