mod frame;
mod ohlcv;
mod screening;
mod ticker;
pub mod indicators;

pub use frame::{IndicatorFrame, ScreenRow};
pub use ohlcv::Ohlcv;
pub use screening::{PassingSymbol, ScreeningReport, SectorGroup};
pub use ticker::{dedupe_symbols, TickerRecord};
