mod config;
mod errors;
mod generation;
mod models;
mod providers;
mod rate_limit;
mod routes;
mod state;
mod templates;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::providers::build_provider;
use crate::rate_limit::{RateLimiter, RedisRateLimitStore};
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on a missing provider API key)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting JobPitch API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize the provider adapter (exactly one per deployment)
    let provider = build_provider(&config)?;
    info!(
        "LLM provider initialized: {} (model: {})",
        provider.name(),
        provider.model()
    );

    // Initialize rate limiting (Redis when configured, otherwise process memory)
    let rate_limiter = build_rate_limiter(&config).await?;
    info!(
        "Rate limiter initialized: {} store, {} requests per {}s",
        rate_limiter.backend(),
        config.rate_limit.max_requests,
        config.rate_limit.window.as_secs()
    );

    // Build app state
    let state = AppState {
        provider,
        rate_limiter,
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins once the web client's domain is fixed

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}

/// Picks the rate-limit store for this deployment.
async fn build_rate_limiter(config: &Config) -> Result<RateLimiter> {
    match &config.redis_url {
        Some(url) => {
            let client = redis::Client::open(url.as_str()).context("Invalid REDIS_URL")?;
            let store = RedisRateLimitStore::connect(&client)
                .await
                .context("Failed to connect to Redis for rate limiting")?;
            Ok(RateLimiter::new(Arc::new(store), config.rate_limit))
        }
        None => Ok(RateLimiter::in_memory(config.rate_limit)),
    }
}
