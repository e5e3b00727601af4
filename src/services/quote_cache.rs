//! Per-run memoization of provider fetches

use crate::error::Result;
use crate::models::Ohlcv;
use crate::services::market_data::{HistoryWindow, QuoteSource};
use std::cell::RefCell;
use std::collections::HashMap;
use tracing::debug;

/// Memoizes `(symbol, window)` fetches for the lifetime of one screening
/// run. The screener constructs a fresh cache per run and drops it with
/// the run, so nothing survives across runs. Errors are not cached; a
/// failed symbol would hit the provider again if asked twice.
///
/// The pipeline is single-threaded, so a `RefCell` is all the interior
/// mutability needed.
pub struct CachedQuotes<S> {
    inner: S,
    cache: RefCell<HashMap<(String, HistoryWindow), Vec<Ohlcv>>>,
}

impl<S: QuoteSource> CachedQuotes<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            cache: RefCell::new(HashMap::new()),
        }
    }
}

impl<S: QuoteSource> QuoteSource for CachedQuotes<S> {
    fn daily_history(&self, symbol: &str, window: HistoryWindow) -> Result<Vec<Ohlcv>> {
        let key = (symbol.to_string(), window);

        if let Some(hit) = self.cache.borrow().get(&key) {
            debug!(symbol = symbol, "Quote cache hit");
            return Ok(hit.clone());
        }

        let bars = self.inner.daily_history(symbol, window)?;
        self.cache.borrow_mut().insert(key, bars.clone());
        Ok(bars)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use chrono::{TimeZone, Utc};
    use std::cell::Cell;

    struct CountingSource {
        calls: Cell<usize>,
    }

    impl QuoteSource for CountingSource {
        fn daily_history(&self, symbol: &str, _window: HistoryWindow) -> Result<Vec<Ohlcv>> {
            self.calls.set(self.calls.get() + 1);
            if symbol == "BAD" {
                return Err(AppError::Network("fetch failed".to_string()));
            }
            let time = Utc.timestamp_opt(1_700_000_000, 0).unwrap();
            Ok(vec![Ohlcv::new(time, 1.0, 2.0, 0.5, 1.5, 100)])
        }
    }

    #[test]
    fn test_repeated_fetch_hits_cache() {
        let cached = CachedQuotes::new(CountingSource { calls: Cell::new(0) });

        let first = cached.daily_history("AAA", HistoryWindow::Screening).unwrap();
        let second = cached.daily_history("AAA", HistoryWindow::Screening).unwrap();

        assert_eq!(first, second);
        assert_eq!(cached.inner.calls.get(), 1);
    }

    #[test]
    fn test_windows_are_distinct_keys() {
        let cached = CachedQuotes::new(CountingSource { calls: Cell::new(0) });

        cached.daily_history("AAA", HistoryWindow::Screening).unwrap();
        cached.daily_history("AAA", HistoryWindow::Chart).unwrap();

        assert_eq!(cached.inner.calls.get(), 2);
    }

    #[test]
    fn test_errors_are_not_cached() {
        let cached = CachedQuotes::new(CountingSource { calls: Cell::new(0) });

        assert!(cached.daily_history("BAD", HistoryWindow::Screening).is_err());
        assert!(cached.daily_history("BAD", HistoryWindow::Screening).is_err());

        assert_eq!(cached.inner.calls.get(), 2);
    }
}
