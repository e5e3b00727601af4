//! Moving-average and MACD calculations for the screen
//!
//! All functions are pure and index-aligned with their input: position `i`
//! of the output describes bar `i`, and is `None` until the trailing
//! window is covered. NaN inputs propagate into the affected windows and
//! fail any later comparison, which is the intended reading of
//! "condition not satisfied".

/// Calculate the simple moving average for a given window
///
/// # Arguments
/// * `values` - Input series (typically closing prices)
/// * `window` - Trailing window size
///
/// # Returns
/// * Vector aligned with `values`; `None` for the first `window - 1`
///   positions and for a zero window
pub fn sma(values: &[f64], window: usize) -> Vec<Option<f64>> {
    let mut out = vec![None; values.len()];

    if window == 0 || values.len() < window {
        return out;
    }

    for i in (window - 1)..values.len() {
        let start = i + 1 - window;
        let sum: f64 = values[start..=i].iter().sum();
        out[i] = Some(sum / window as f64);
    }

    out
}

/// Simple moving average over a series that is already partial. A window
/// touching any missing position stays missing.
pub fn sma_of(values: &[Option<f64>], window: usize) -> Vec<Option<f64>> {
    let mut out = vec![None; values.len()];

    if window == 0 {
        return out;
    }

    for i in 0..values.len() {
        if i + 1 < window {
            continue;
        }
        let trailing = &values[i + 1 - window..=i];
        let present: Vec<f64> = trailing.iter().flatten().copied().collect();
        if present.len() == window {
            out[i] = Some(present.iter().sum::<f64>() / window as f64);
        }
    }

    out
}

/// Calculate the exponential moving average for a given period
///
/// Seeded with the simple mean of the first `period` values, so the first
/// defined position is `period - 1`.
pub fn ema(values: &[f64], period: usize) -> Vec<Option<f64>> {
    let mut out = vec![None; values.len()];

    if period == 0 || values.len() < period {
        return out;
    }

    let multiplier = 2.0 / (period as f64 + 1.0);
    let seed: f64 = values[..period].iter().sum::<f64>() / period as f64;
    out[period - 1] = Some(seed);

    let mut prev = seed;
    for i in period..values.len() {
        let next = (values[i] - prev) * multiplier + prev;
        out[i] = Some(next);
        prev = next;
    }

    out
}

/// MACD line: fast EMA minus slow EMA of the input, defined from index
/// `slow - 1` on (the fast EMA is always defined by then).
pub fn macd_line(closes: &[f64], fast: usize, slow: usize) -> Vec<Option<f64>> {
    let fast_ema = ema(closes, fast);
    let slow_ema = ema(closes, slow);

    fast_ema
        .iter()
        .zip(slow_ema.iter())
        .map(|(f, s)| match (f, s) {
            (Some(f), Some(s)) => Some(f - s),
            _ => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sma() {
        let closes = vec![10.0, 11.0, 12.0, 13.0, 14.0, 15.0];
        let ma3 = sma(&closes, 3);

        assert_eq!(ma3[0], None); // Not enough data
        assert_eq!(ma3[1], None); // Not enough data
        assert_eq!(ma3[2], Some(11.0)); // (10+11+12)/3
        assert_eq!(ma3[3], Some(12.0)); // (11+12+13)/3
        assert_eq!(ma3[4], Some(13.0)); // (12+13+14)/3
        assert_eq!(ma3[5], Some(14.0)); // (13+14+15)/3
    }

    #[test]
    fn test_sma_short_series() {
        let closes = vec![10.0, 11.0];
        assert_eq!(sma(&closes, 3), vec![None, None]);
        assert_eq!(sma(&closes, 0), vec![None, None]);
    }

    #[test]
    fn test_sma_window_equals_index_mean() {
        // sma(w) at index i is the mean of [i-w+1, i]
        let closes: Vec<f64> = (1..=30).map(|i| i as f64).collect();
        let ma20 = sma(&closes, 20);

        let expected: f64 = closes[10..=29].iter().sum::<f64>() / 20.0;
        assert!((ma20[29].unwrap() - expected).abs() < 1e-9);
        assert_eq!(ma20[18], None);
        assert!(ma20[19].is_some());
    }

    #[test]
    fn test_sma_of_skips_missing_windows() {
        let partial = vec![None, Some(2.0), Some(4.0), Some(6.0)];
        let out = sma_of(&partial, 2);

        assert_eq!(out[0], None);
        assert_eq!(out[1], None); // window touches the missing head
        assert_eq!(out[2], Some(3.0));
        assert_eq!(out[3], Some(5.0));
    }

    #[test]
    fn test_ema_seeded_with_sma() {
        let values: Vec<f64> = (1..=10).map(|i| i as f64).collect();
        let ema3 = ema(&values, 3);

        assert_eq!(ema3[0], None);
        assert_eq!(ema3[1], None);
        assert!((ema3[2].unwrap() - 2.0).abs() < 1e-9); // mean of 1,2,3

        // next value: (4 - 2) * 0.5 + 2 = 3
        assert!((ema3[3].unwrap() - 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_macd_line_start_offset() {
        let closes: Vec<f64> = (1..=50).map(|i| 100.0 + i as f64).collect();
        let macd = macd_line(&closes, 5, 26);

        assert_eq!(macd[24], None);
        assert!(macd[25].is_some()); // slow - 1
        // A steady uptrend keeps the fast EMA above the slow one
        assert!(macd[49].unwrap() > 0.0);
    }

    #[test]
    fn test_macd_trigger_is_mean_of_line() {
        let closes: Vec<f64> = (1..=40).map(|i| 100.0 + (i as f64).sin() * 5.0).collect();
        let macd = macd_line(&closes, 5, 26);
        let trigger = sma_of(&macd, 5);

        // First defined trigger position: slow - 1 + window - 1
        assert_eq!(trigger[28], None);
        assert!(trigger[29].is_some());

        let expected: f64 = (30..=34).map(|i| macd[i].unwrap()).sum::<f64>() / 5.0;
        assert!((trigger[34].unwrap() - expected).abs() < 1e-9);
    }

    #[test]
    fn test_nan_propagates_and_fails_comparison() {
        let mut closes: Vec<f64> = (1..=10).map(|i| i as f64).collect();
        closes[9] = f64::NAN;
        let ma3 = sma(&closes, 3);

        let tainted = ma3[9].unwrap();
        assert!(tainted.is_nan());
        assert!(!(5.0 > tainted)); // NaN never satisfies a screen comparison
    }
}
