//! Axum server setup, shared application state, and graceful shutdown.
//!
//! Contains [`AppState`] (the `Arc`-shared, read-only state holding the
//! config and uptime), [`build_router`] for constructing the demo router
//! with the envelope and guard layers, and [`shutdown_signal`] for
//! SIGTERM / Ctrl+C handling.

use std::sync::Arc;
use std::time::Instant;

use axum::middleware::from_fn_with_state;
use axum::routing::{get, post};
use axum::Router;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::config::model::Config;
use crate::envelope::StandardEnvelope;
use crate::health::health_handler;
use crate::items;
use crate::middleware::{
    app_response, require_headers, require_params, AppResponse, RequiredHeaders, RequiredParams,
};

#[derive(Debug)]
pub struct AppState {
    pub config: Config,
    pub start_time: Instant,
}

impl AppState {
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            config,
            start_time: Instant::now(),
        }
    }
}

#[must_use]
pub fn envelope_layer_config(config: &Config) -> AppResponse {
    AppResponse::new(config.source.as_str()).with_builder(Arc::new(
        StandardEnvelope::with_default_language(config.default_language.as_str()),
    ))
}

pub fn build_router(state: Arc<AppState>) -> Router {
    let app_response_config = envelope_layer_config(&state.config);
    let required_params =
        RequiredParams::new(["id", "name"]).with_body_limit(state.config.body_limit);

    // Guards cover POST only. The last route layer added runs first, so
    // headers are checked before parameters.
    let create = post(items::create_item)
        .route_layer(from_fn_with_state(required_params, require_params))
        .route_layer(from_fn_with_state(
            RequiredHeaders::new(items::API_KEY_HEADER),
            require_headers,
        ));

    Router::new()
        .route("/health", get(health_handler))
        .route(
            "/items/{id}",
            create.get(items::get_item).delete(items::delete_item),
        )
        .fallback(items::route_not_found)
        .method_not_allowed_fallback(items::method_not_allowed)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(from_fn_with_state(app_response_config, app_response)),
        )
        .with_state(state)
}

pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::info!("received Ctrl+C"),
        () = terminate => tracing::info!("received SIGTERM"),
    }
}
