//! JSON API handlers for the dashboard

use crate::constants::{CHART_MA_FAST, CHART_MA_SLOW};
use crate::error::AppError;
use crate::models::indicators::sma;
use crate::models::Ohlcv;
use crate::server::AppState;
use crate::services::market_data::{HistoryWindow, QuoteClient, QuoteSource};
use crate::services::screener::run_screening;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde::Serialize;
use tracing::{error, info};

/// Chart payload: candles plus the two overlay series, index-aligned
#[derive(Debug, Serialize)]
pub struct ChartResponse {
    pub symbol: String,
    pub candles: Vec<Ohlcv>,
    pub ma_slow: Vec<Option<f64>>,
    pub ma_fast: Vec<Option<f64>>,
    pub ma_slow_window: usize,
    pub ma_fast_window: usize,
}

/// GET /api/screen - run the full screen and return survivors by sector
///
/// The universe is re-downloaded and every symbol re-evaluated on each
/// call; nothing is cached across requests.
pub async fn screen_handler(State(app_state): State<AppState>) -> impl IntoResponse {
    let source = app_state.source.clone();

    let result = tokio::task::spawn_blocking(move || run_screening(&source)).await;

    match result {
        Ok(Ok(report)) => {
            info!(
                evaluated = report.evaluated,
                passed = report.passed,
                diagnostics = report.diagnostics.len(),
                elapsed_ms = report.elapsed_ms,
                "Screen completed"
            );
            (StatusCode::OK, Json(report)).into_response()
        }
        Ok(Err(e)) => {
            error!(error = %e, "Screen failed");
            (
                StatusCode::BAD_GATEWAY,
                Json(serde_json::json!({ "error": e.to_string() })),
            )
                .into_response()
        }
        Err(e) => {
            error!(error = %e, "Screening task panicked");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({ "error": "screening task failed" })),
            )
                .into_response()
        }
    }
}

/// GET /api/chart/{symbol} - 3-month candles with the two moving-average
/// overlays. Always a fresh fetch; chart renders are never cached.
pub async fn chart_handler(Path(symbol): Path<String>) -> impl IntoResponse {
    let requested = symbol.clone();

    let result = tokio::task::spawn_blocking(move || -> crate::error::Result<ChartResponse> {
        let client = QuoteClient::new()?;
        let candles = client.daily_history(&symbol, HistoryWindow::Chart)?;
        let closes: Vec<f64> = candles.iter().map(|bar| bar.close).collect();

        Ok(ChartResponse {
            symbol,
            ma_slow: sma(&closes, CHART_MA_SLOW),
            ma_fast: sma(&closes, CHART_MA_FAST),
            ma_slow_window: CHART_MA_SLOW,
            ma_fast_window: CHART_MA_FAST,
            candles,
        })
    })
    .await;

    match result {
        Ok(Ok(chart)) => (StatusCode::OK, Json(chart)).into_response(),
        Ok(Err(e)) => {
            error!(symbol = %requested, error = %e, "Chart fetch failed");
            let status = match e {
                AppError::NotFound(_) => StatusCode::NOT_FOUND,
                _ => StatusCode::BAD_GATEWAY,
            };
            (status, Json(serde_json::json!({ "error": e.to_string() }))).into_response()
        }
        Err(e) => {
            error!(symbol = %requested, error = %e, "Chart task panicked");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({ "error": "chart task failed" })),
            )
                .into_response()
        }
    }
}

/// GET /api/health - liveness plus uptime
pub async fn health_handler(State(app_state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "uptime_secs": app_state.started_at.elapsed().as_secs(),
    }))
}
