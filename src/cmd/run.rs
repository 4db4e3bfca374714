//! `envelope run` — start the demo service.
//!
//! Loads the optional config file, applies CLI overrides, and serves the
//! demo router with graceful shutdown.

use std::net::SocketAddr;
use std::sync::Arc;

use crate::cli::RunArgs;
use crate::config::model::Config;
use crate::config::{self, validation};
use crate::error::EnvelopeError;
use crate::logging;
use crate::server::{self, AppState};

pub async fn execute(args: RunArgs) -> Result<(), EnvelopeError> {
    let log_format = logging::resolve_format(args.pretty, args.json);
    logging::init(&args.log_level, log_format);

    let mut config = match args.config.as_deref() {
        Some(path) => {
            let config = config::load(path).await?;
            tracing::info!(path = %path.display(), "loaded config file");
            config
        }
        None => Config::default(),
    };

    if let Some(source) = args.source {
        config.source = source;
    }
    validation::validate(&config).map_err(|errors| EnvelopeError::ConfigValidation { errors })?;

    let source = config.source.clone();
    let state = Arc::new(AppState::new(config));
    let router = server::build_router(state);

    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!(addr = %addr, source = %source, "envelope started");

    axum::serve(listener, router)
        .with_graceful_shutdown(server::shutdown_signal())
        .await?;

    tracing::info!("envelope stopped");
    Ok(())
}
