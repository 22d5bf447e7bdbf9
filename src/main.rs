use anyhow::Context;
use axum::{extract::Extension, middleware, Router};
use dotenv::dotenv;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

// ============================================================================
// MODULE IMPORTS
// ============================================================================

mod common;
mod logging_middleware;
mod reservations;
mod static_files;

// ============================================================================
// COMMON IMPORTS
// ============================================================================

use common::{AppConfig, AppState, SystemClock};
use static_files::StaticRoot;

// ============================================================================
// ROUTER COMPOSITION
// ============================================================================

/// Builds the full application router around already-constructed state.
pub fn app(state: Arc<AppState>) -> Router {
    Router::new()
        // ====================================================================
        // RESERVATION API
        // ====================================================================
        .merge(reservations::reservations_routes())
        // ====================================================================
        // STATIC SITE (everything that is not an API route)
        // ====================================================================
        .fallback(static_files::serve_static)
        // ====================================================================
        // MIDDLEWARE AND LAYERS
        // ====================================================================
        .layer(middleware::from_fn(logging_middleware::log_request_response))
        .layer(Extension(state))
        .layer(TraceLayer::new_for_http())
}

// ============================================================================
// MAIN APPLICATION ENTRY POINT
// ============================================================================

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    // ========================================================================
    // ENVIRONMENT CONFIGURATION
    // ========================================================================

    let config = AppConfig::from_env();
    info!(
        site_root = %config.site_root.display(),
        reservations_log = %config.reservations_log.display(),
        min_lead_days = config.min_lead_days,
        max_body_bytes = config.max_body_bytes,
        "Configuration loaded"
    );

    // ========================================================================
    // APPLICATION STATE
    // ========================================================================

    let site = StaticRoot::open(&config.site_root).with_context(|| {
        format!("site root {} is not accessible", config.site_root.display())
    })?;

    info!(root = %site.root().display(), "Serving static site");

    let addr = config.socket_addr();
    let state = AppState::new(config, Arc::new(SystemClock), site);
    state
        .reservation_log
        .prepare()
        .await
        .context("could not create reservation log directory")?;

    // ========================================================================
    // SERVER STARTUP
    // ========================================================================

    let app = app(Arc::new(state));

    info!("Listening on http://{}", addr);
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app.into_make_service()).await?;

    Ok(())
}
