//! Daily price history from a Yahoo-compatible chart endpoint
//!
//! The provider is treated as opaque: symbol + period + interval in, OHLCV
//! rows out. Rows with missing fields are skipped; an empty series is an
//! error rather than an empty success.

use crate::constants::{
    CHART_LOOKBACK_DAYS, HTTP_TIMEOUT_SECS, SCREEN_LOOKBACK_DAYS, SCREEN_WINDOW_BARS, USER_AGENT,
};
use crate::error::{AppError, Result};
use crate::models::Ohlcv;
use crate::utils::quote_api_url;
use chrono::{Duration, TimeZone, Utc};
use isahc::{config::Configurable, prelude::*, HttpClient};
use serde::Deserialize;
use std::time::Duration as StdDuration;
use tracing::debug;

/// Trailing history window requested from the provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HistoryWindow {
    /// 100 trading days, the screening input
    Screening,
    /// 3 months, the charting input
    Chart,
}

impl HistoryWindow {
    /// Calendar days to request so the window is fully covered.
    fn lookback_days(self) -> i64 {
        match self {
            HistoryWindow::Screening => SCREEN_LOOKBACK_DAYS,
            HistoryWindow::Chart => CHART_LOOKBACK_DAYS,
        }
    }

    /// Trailing-bar cap applied after the fetch; `None` keeps every bar.
    fn max_bars(self) -> Option<usize> {
        match self {
            HistoryWindow::Screening => Some(SCREEN_WINDOW_BARS),
            HistoryWindow::Chart => None,
        }
    }
}

/// Anything that can produce a daily series for a symbol. The screener is
/// written against this seam so tests can substitute canned data.
pub trait QuoteSource {
    fn daily_history(&self, symbol: &str, window: HistoryWindow) -> Result<Vec<Ohlcv>>;
}

/// Blocking market-data client
pub struct QuoteClient {
    http: HttpClient,
    base_url: String,
}

impl QuoteClient {
    pub fn new() -> Result<Self> {
        let http = HttpClient::builder()
            .timeout(StdDuration::from_secs(HTTP_TIMEOUT_SECS))
            .default_header("user-agent", USER_AGENT)
            .build()
            .map_err(|e| AppError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url: quote_api_url(),
        })
    }

    fn build_url(&self, symbol: &str, period1: i64, period2: i64) -> String {
        format!(
            "{}/{}?period1={}&period2={}&interval=1d",
            self.base_url, symbol, period1, period2
        )
    }
}

impl QuoteSource for QuoteClient {
    fn daily_history(&self, symbol: &str, window: HistoryWindow) -> Result<Vec<Ohlcv>> {
        let now = Utc::now();
        let start = now - Duration::days(window.lookback_days());
        let url = self.build_url(symbol, start.timestamp(), now.timestamp());

        debug!(symbol = symbol, window = ?window, "Fetching daily history");

        let mut response = self.http.get(url.as_str())?;
        if !response.status().is_success() {
            return Err(AppError::Network(format!(
                "Quote request for {} returned {}",
                symbol,
                response.status()
            )));
        }

        let body = response.text()?;
        let mut bars = parse_chart_response(symbol, &body)?;

        if let Some(cap) = window.max_bars() {
            if bars.len() > cap {
                bars.drain(..bars.len() - cap);
            }
        }

        Ok(bars)
    }
}

#[derive(Debug, Deserialize)]
struct ChartEnvelope {
    chart: ChartBody,
}

#[derive(Debug, Deserialize)]
struct ChartBody {
    result: Option<Vec<ChartSeries>>,
    error: Option<ProviderError>,
}

#[derive(Debug, Deserialize)]
struct ProviderError {
    code: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct ChartSeries {
    timestamp: Option<Vec<i64>>,
    indicators: SeriesIndicators,
}

#[derive(Debug, Deserialize)]
struct SeriesIndicators {
    quote: Vec<QuoteColumns>,
}

#[derive(Debug, Deserialize)]
struct QuoteColumns {
    open: Vec<Option<f64>>,
    high: Vec<Option<f64>>,
    low: Vec<Option<f64>>,
    close: Vec<Option<f64>>,
    volume: Vec<Option<u64>>,
}

/// Decode the provider's column-oriented payload into bars, dropping rows
/// with any missing field.
fn parse_chart_response(symbol: &str, body: &str) -> Result<Vec<Ohlcv>> {
    let envelope: ChartEnvelope = serde_json::from_str(body)?;

    if let Some(err) = envelope.chart.error {
        return Err(AppError::Network(format!(
            "Provider error for {}: {} ({})",
            symbol, err.description, err.code
        )));
    }

    let series = envelope
        .chart
        .result
        .and_then(|mut result| {
            if result.is_empty() {
                None
            } else {
                Some(result.remove(0))
            }
        })
        .ok_or_else(|| AppError::NotFound(format!("No price data for {}", symbol)))?;

    let timestamps = series.timestamp.unwrap_or_default();
    let columns = series
        .indicators
        .quote
        .into_iter()
        .next()
        .ok_or_else(|| AppError::NotFound(format!("No quote columns for {}", symbol)))?;

    let mut bars = Vec::with_capacity(timestamps.len());
    for (i, ts) in timestamps.iter().enumerate() {
        let open = columns.open.get(i).copied().flatten();
        let high = columns.high.get(i).copied().flatten();
        let low = columns.low.get(i).copied().flatten();
        let close = columns.close.get(i).copied().flatten();
        let volume = columns.volume.get(i).copied().flatten();

        if let (Some(open), Some(high), Some(low), Some(close), Some(volume)) =
            (open, high, low, close, volume)
        {
            let time = Utc
                .timestamp_opt(*ts, 0)
                .single()
                .ok_or_else(|| AppError::Parse(format!("Bad timestamp {} for {}", ts, symbol)))?;
            bars.push(Ohlcv::new(time, open, high, low, close, volume));
        }
    }

    if bars.is_empty() {
        return Err(AppError::NotFound(format!("No price data for {}", symbol)));
    }

    Ok(bars)
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID_BODY: &str = r#"{"chart":{"result":[{"timestamp":[1704067200,1704153600,1704240000],"indicators":{"quote":[{"open":[185.0,186.0,187.0],"high":[186.0,187.0,188.0],"low":[184.0,185.0,186.0],"close":[185.5,186.5,187.5],"volume":[1000000,1100000,1200000]}]}}],"error":null}}"#;

    #[test]
    fn test_parse_valid_response() {
        let bars = parse_chart_response("AAA", VALID_BODY).unwrap();

        assert_eq!(bars.len(), 3);
        assert_eq!(bars[0].close, 185.5);
        assert_eq!(bars[2].volume, 1_200_000);
        assert_eq!(bars[0].time.format("%Y-%m-%d").to_string(), "2024-01-01");
    }

    #[test]
    fn test_parse_skips_null_rows() {
        let body = r#"{"chart":{"result":[{"timestamp":[1704067200,1704153600,1704240000],"indicators":{"quote":[{"open":[185.0,null,187.0],"high":[186.0,null,188.0],"low":[184.0,null,186.0],"close":[185.5,null,187.5],"volume":[1000000,null,1200000]}]}}],"error":null}}"#;
        let bars = parse_chart_response("AAA", body).unwrap();

        assert_eq!(bars.len(), 2);
        assert_eq!(bars[1].close, 187.5);
    }

    #[test]
    fn test_parse_provider_error() {
        let body = r#"{"chart":{"result":null,"error":{"code":"Not Found","description":"No data found"}}}"#;
        let err = parse_chart_response("ZZZ", body).unwrap_err();

        assert!(matches!(err, AppError::Network(_)));
        assert!(err.to_string().contains("ZZZ"));
    }

    #[test]
    fn test_parse_empty_result() {
        let body = r#"{"chart":{"result":[],"error":null}}"#;
        assert!(matches!(
            parse_chart_response("ZZZ", body),
            Err(AppError::NotFound(_))
        ));
    }

    #[test]
    fn test_parse_invalid_json() {
        assert!(matches!(
            parse_chart_response("ZZZ", "not json"),
            Err(AppError::Parse(_))
        ));
    }

    #[test]
    fn test_build_url() {
        let client = QuoteClient::new().unwrap();
        let url = client.build_url("AAPL", 1_704_067_200, 1_733_011_200);

        assert!(url.contains("/AAPL?"));
        assert!(url.contains("period1=1704067200"));
        assert!(url.contains("period2=1733011200"));
        assert!(url.contains("interval=1d"));
    }
}
