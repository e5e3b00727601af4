use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};

/// Daily OHLCV (Open, High, Low, Close, Volume) bar for one symbol
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Ohlcv {
    /// Bar date, serialized as YYYY-MM-DD
    #[serde(serialize_with = "serialize_time_as_date")]
    pub time: DateTime<Utc>,

    /// Opening price
    pub open: f64,

    /// Highest price
    pub high: f64,

    /// Lowest price
    pub low: f64,

    /// Closing price
    pub close: f64,

    /// Trading volume
    pub volume: u64,
}

impl Ohlcv {
    /// Create a new OHLCV bar
    pub fn new(
        time: DateTime<Utc>,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: u64,
    ) -> Self {
        Self {
            time,
            open,
            high,
            low,
            close,
            volume,
        }
    }
}

fn serialize_time_as_date<S>(time: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let date_string = time.format("%Y-%m-%d").to_string();
    serializer.serialize_str(&date_string)
}
