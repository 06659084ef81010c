mod config;
mod errors;
mod execution;
mod routes;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::execution::executor::CodeExecutor;
use crate::execution::judge0::Judge0Client;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Bazaar API v{}", env!("CARGO_PKG_VERSION"));

    let judge0 = Judge0Client::new(
        config.judge0_base_url.clone(),
        config.judge0_auth_token.clone(),
        config.judge0_request_timeout,
    )
    .context("Failed to build Judge0 HTTP client")?;
    info!(
        "Judge0 client initialized (base_url: {}, auth: {})",
        judge0.base_url(),
        config.judge0_auth_token.is_some()
    );

    let executor = CodeExecutor::new(Arc::new(judge0), config.poll_policy);
    let policy = executor.policy();
    info!(
        "Execution poll policy: every {}ms, at most {} attempts",
        policy.interval.as_millis(),
        policy.max_attempts
    );

    let state = AppState {
        executor,
        config: config.clone(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict CORS to the marketplace origin

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
