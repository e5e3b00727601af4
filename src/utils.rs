use crate::constants::{
    DEFAULT_INDEX_MEMBERSHIP_URL, DEFAULT_QUOTE_API_URL, DEFAULT_SPREADSHEET_URL,
};

/// Get the spreadsheet ticker-source URL from the environment or use the default
pub fn spreadsheet_url() -> String {
    std::env::var("TICKER_SHEET_URL").unwrap_or_else(|_| DEFAULT_SPREADSHEET_URL.to_string())
}

/// Get the index-membership ticker-source URL from the environment or use the default
pub fn index_membership_url() -> String {
    std::env::var("INDEX_MEMBERSHIP_URL")
        .unwrap_or_else(|_| DEFAULT_INDEX_MEMBERSHIP_URL.to_string())
}

/// Get the market-data endpoint from the environment or use the default
pub fn quote_api_url() -> String {
    std::env::var("QUOTE_API_URL").unwrap_or_else(|_| DEFAULT_QUOTE_API_URL.to_string())
}
