pub mod api;
pub mod dashboard;

use crate::services::ticker_source::TickerSource;
use axum::{routing::get, Router};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;
use tower_http::cors::{Any, CorsLayer};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    /// Ticker source the screen endpoint draws its universe from
    pub source: Arc<TickerSource>,
    pub started_at: Instant,
}

/// Start the axum server
pub async fn serve(source: TickerSource, port: u16) -> Result<(), Box<dyn std::error::Error>> {
    tracing::info!("Starting sectorscan server");

    let app_state = AppState {
        source: Arc::new(source),
        started_at: Instant::now(),
    };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([axum::http::Method::GET])
        .allow_headers(Any);

    tracing::info!("Registering routes:");
    tracing::info!("  GET /              (dashboard)");
    tracing::info!("  GET /api/screen");
    tracing::info!("  GET /api/chart/{{symbol}}");
    tracing::info!("  GET /api/health");

    let app = Router::new()
        .route("/", get(dashboard::dashboard_handler))
        .route("/api/screen", get(api::screen_handler))
        .route("/api/chart/{symbol}", get(api::chart_handler))
        .route("/api/health", get(api::health_handler))
        .layer(cors)
        .with_state(app_state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!(%addr, "Server listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
