use crate::constants::{MACD_FAST, MACD_SLOW, MACD_TRIGGER_WINDOW, SCREEN_MA_WINDOW};
use crate::models::indicators::{macd_line, sma, sma_of};
use crate::models::Ohlcv;

/// Price series augmented with the derived screening columns
///
/// Columns are index-aligned with `bars` and `None` wherever the trailing
/// window is not yet covered. The frame is derived deterministically from
/// the bars it was built from; refetching the series means rebuilding the
/// frame.
#[derive(Debug, Clone)]
pub struct IndicatorFrame {
    /// The underlying daily bars, oldest first
    pub bars: Vec<Ohlcv>,

    /// Trailing close moving average over [`SCREEN_MA_WINDOW`] bars
    pub ma: Vec<Option<f64>>,

    /// MACD line (fast EMA minus slow EMA of the close)
    pub macd: Vec<Option<f64>>,

    /// Simple moving average of the MACD line over [`MACD_TRIGGER_WINDOW`] bars
    pub macd_trigger: Vec<Option<f64>>,
}

/// Latest-row values the screen compares, present only when every column
/// is defined at the last bar.
#[derive(Debug, Clone, Copy)]
pub struct ScreenRow {
    pub close: f64,
    pub ma: f64,
    pub macd: f64,
    pub macd_trigger: f64,
}

impl IndicatorFrame {
    /// Derive the screening columns from a daily series.
    pub fn from_bars(bars: Vec<Ohlcv>) -> Self {
        let closes: Vec<f64> = bars.iter().map(|bar| bar.close).collect();
        let ma = sma(&closes, SCREEN_MA_WINDOW);
        let macd = macd_line(&closes, MACD_FAST, MACD_SLOW);
        let macd_trigger = sma_of(&macd, MACD_TRIGGER_WINDOW);

        Self {
            bars,
            ma,
            macd,
            macd_trigger,
        }
    }

    /// The last row of the frame, if every screening column is defined there.
    pub fn screen_row(&self) -> Option<ScreenRow> {
        let last = self.bars.len().checked_sub(1)?;
        Some(ScreenRow {
            close: self.bars[last].close,
            ma: self.ma[last]?,
            macd: self.macd[last]?,
            macd_trigger: self.macd_trigger[last]?,
        })
    }

    /// The screening condition on the latest row: close above the moving
    /// average and the MACD trigger above the MACD line. A missing value in
    /// any column fails the condition; it is never an error.
    pub fn passes_screen(&self) -> bool {
        self.screen_row()
            .map_or(false, |row| row.close > row.ma && row.macd_trigger > row.macd)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn make_bars(closes: &[f64]) -> Vec<Ohlcv> {
        closes
            .iter()
            .enumerate()
            .map(|(i, &close)| {
                let time = Utc.timestamp_opt(1_700_000_000 + i as i64 * 86_400, 0).unwrap();
                Ohlcv::new(time, close, close + 1.0, close - 1.0, close, 1_000)
            })
            .collect()
    }

    #[test]
    fn test_short_series_has_no_screen_row() {
        // 10 bars cannot cover the 20-bar moving average
        let closes: Vec<f64> = (0..10).map(|i| 100.0 + i as f64).collect();
        let frame = IndicatorFrame::from_bars(make_bars(&closes));

        assert!(frame.screen_row().is_none());
        assert!(!frame.passes_screen());
    }

    #[test]
    fn test_empty_series_fails_screen() {
        let frame = IndicatorFrame::from_bars(Vec::new());
        assert!(!frame.passes_screen());
    }

    #[test]
    fn test_uptrend_with_flat_tail_passes() {
        // 40 bars climbing one point per day, then 5 flat bars: the close
        // stays above its 20-bar mean while the MACD line rolls over, so
        // the 5-bar MACD average sits above the line.
        let mut closes: Vec<f64> = (0..40).map(|i| 100.0 + i as f64).collect();
        closes.extend([140.0, 140.0, 140.0, 140.0, 140.0]);
        let frame = IndicatorFrame::from_bars(make_bars(&closes));

        let row = frame.screen_row().expect("all columns defined");
        assert!(row.close > row.ma);
        assert!(row.macd_trigger > row.macd);
        assert!(frame.passes_screen());
    }

    #[test]
    fn test_downtrend_fails_close_condition() {
        let closes: Vec<f64> = (0..45).map(|i| 200.0 - i as f64).collect();
        let frame = IndicatorFrame::from_bars(make_bars(&closes));

        let row = frame.screen_row().expect("all columns defined");
        assert!(row.close < row.ma);
        assert!(!frame.passes_screen());
    }

    #[test]
    fn test_predicate_is_idempotent() {
        let mut closes: Vec<f64> = (0..40).map(|i| 100.0 + i as f64).collect();
        closes.extend([140.0, 140.0, 140.0, 140.0, 140.0]);
        let frame = IndicatorFrame::from_bars(make_bars(&closes));

        let first = frame.passes_screen();
        let second = frame.passes_screen();
        assert_eq!(first, second);
    }
}
