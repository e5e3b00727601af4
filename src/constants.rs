//! Fixed data-source endpoints and screen parameters.
//!
//! The screen itself is not configurable at runtime: the windows below are
//! the contract. Source URLs can be overridden through the environment
//! (see `utils`), everything else is compile-time.

/// Default spreadsheet ticker source (xlsx workbook, one worksheet).
pub const DEFAULT_SPREADSHEET_URL: &str =
    "https://raw.githubusercontent.com/tomzcn123/china_stock/main/A.xlsx";

/// Default index-membership ticker source (first HTML table on the page).
pub const DEFAULT_INDEX_MEMBERSHIP_URL: &str =
    "https://en.wikipedia.org/wiki/List_of_S%26P_500_companies";

/// Default market-data endpoint, `{base}/{symbol}?period1=..&period2=..&interval=1d`.
pub const DEFAULT_QUOTE_API_URL: &str = "https://query1.finance.yahoo.com/v8/finance/chart";

/// Worksheet holding the ticker table in the spreadsheet source.
pub const SPREADSHEET_SHEET_NAME: &str = "Sheet";

/// Spreadsheet column headers (matched case-insensitively).
pub const SHEET_SYMBOL_COLUMN: &str = "tickers";
pub const SHEET_SECTOR_COLUMN: &str = "sector";
pub const SHEET_NAME_COLUMN: &str = "name";

/// Index-membership column headers (matched case-insensitively).
pub const MEMBERSHIP_SYMBOL_COLUMN: &str = "Symbol";
pub const MEMBERSHIP_SECTOR_COLUMN: &str = "GICS Sector";
pub const MEMBERSHIP_NAME_COLUMN: &str = "Security";

/// Close moving average compared against the latest close.
pub const SCREEN_MA_WINDOW: usize = 20;

/// MACD fast EMA period.
pub const MACD_FAST: usize = 5;

/// MACD slow EMA period.
pub const MACD_SLOW: usize = 26;

/// Simple moving average of the MACD line used as the screen trigger.
pub const MACD_TRIGGER_WINDOW: usize = 5;

/// Trailing bars the screen evaluates per symbol.
pub const SCREEN_WINDOW_BARS: usize = 100;

/// Calendar days requested from the provider to cover
/// [`SCREEN_WINDOW_BARS`] trading days (weekends and holidays included).
pub const SCREEN_LOOKBACK_DAYS: i64 = 160;

/// Calendar days shown on the chart (3 months).
pub const CHART_LOOKBACK_DAYS: i64 = 92;

/// Chart overlays: slow and fast close moving averages.
pub const CHART_MA_SLOW: usize = 20;
pub const CHART_MA_FAST: usize = 5;

/// Request timeout for every outbound HTTP call.
pub const HTTP_TIMEOUT_SECS: u64 = 30;

/// Desktop browser user-agent; both ticker sources and the quote provider
/// reject default library agents.
pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";
