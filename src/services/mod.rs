pub mod market_data;
pub mod quote_cache;
pub mod screener;
pub mod ticker_source;
