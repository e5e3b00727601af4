pub mod screen;
pub mod serve;
pub mod tickers;
