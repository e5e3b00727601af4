//! The per-symbol screen and its aggregation
//!
//! Symbols are evaluated sequentially in universe order, one blocking
//! fetch per symbol. A failing symbol is recorded as a diagnostic and the
//! batch continues; the whole run never aborts on a symbol.

use crate::error::Result;
use crate::models::{IndicatorFrame, PassingSymbol, ScreeningReport, TickerRecord};
use crate::services::market_data::{HistoryWindow, QuoteClient, QuoteSource};
use crate::services::quote_cache::CachedQuotes;
use crate::services::ticker_source::TickerSource;
use std::time::Instant;
use tracing::{debug, warn};

/// Explicit outcome of one symbol's evaluation
#[derive(Debug)]
pub enum SymbolVerdict {
    /// The latest row satisfied the screen
    Pass(PassingSymbol),
    /// Evaluated cleanly but the condition did not hold
    Fail,
}

pub struct Screener<'a, S> {
    quotes: &'a S,
}

impl<'a, S: QuoteSource> Screener<'a, S> {
    pub fn new(quotes: &'a S) -> Self {
        Self { quotes }
    }

    /// Evaluate one record against the screen. Fetch or computation errors
    /// propagate to the caller; pass/fail is a value, not an error.
    pub fn evaluate(&self, record: &TickerRecord) -> Result<SymbolVerdict> {
        let bars = self
            .quotes
            .daily_history(&record.symbol, HistoryWindow::Screening)?;
        let frame = IndicatorFrame::from_bars(bars);

        let verdict = match frame.screen_row() {
            Some(row) if frame.passes_screen() => SymbolVerdict::Pass(PassingSymbol {
                symbol: record.symbol.clone(),
                name: record.name.clone(),
                close: row.close,
                ma: row.ma,
                macd: row.macd,
                macd_trigger: row.macd_trigger,
            }),
            _ => SymbolVerdict::Fail,
        };

        Ok(verdict)
    }

    /// Run the screen over the whole universe, order-preserving.
    pub fn run(&self, universe: &[TickerRecord]) -> ScreeningReport {
        let started = Instant::now();
        let mut report = ScreeningReport::default();

        for record in universe {
            report.evaluated += 1;
            match self.evaluate(record) {
                Ok(SymbolVerdict::Pass(pass)) => {
                    debug!(symbol = %record.symbol, sector = %record.sector, "Symbol passed the screen");
                    report.push_pass(&record.sector, pass);
                }
                Ok(SymbolVerdict::Fail) => {
                    debug!(symbol = %record.symbol, "Symbol failed the screen");
                }
                Err(e) => {
                    warn!(symbol = %record.symbol, error = %e, "Error processing stock");
                    report
                        .diagnostics
                        .push(format!("Error processing stock {}: {}", record.symbol, e));
                }
            }
        }

        report.elapsed_ms = started.elapsed().as_millis() as u64;
        report
    }
}

/// Load the universe and run a full screen against the live provider, with
/// a fresh per-run quote cache.
pub fn run_screening(source: &TickerSource) -> Result<ScreeningReport> {
    let universe = source.load()?;
    let quotes = CachedQuotes::new(QuoteClient::new()?);
    let screener = Screener::new(&quotes);
    Ok(screener.run(&universe))
}
