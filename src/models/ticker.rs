use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Canonical ticker record, normalized from any source
///
/// Both ticker sources are mapped into this shape at the loader boundary:
/// the spreadsheet's `tickers`/`sector`/`name` columns and the membership
/// page's `Symbol`/`GICS Sector`/`Security` columns land here identically.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickerRecord {
    /// Ticker symbol, unique within a loaded universe
    pub symbol: String,

    /// Sector the symbol is grouped under
    pub sector: String,

    /// Company name, when the source carries one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl TickerRecord {
    pub fn new(symbol: impl Into<String>, sector: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            sector: sector.into(),
            name: None,
        }
    }

    pub fn with_name(
        symbol: impl Into<String>,
        sector: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            sector: sector.into(),
            name: Some(name.into()),
        }
    }
}

/// Drop records whose symbol already appeared, keeping the first occurrence
/// and the original order of everything else.
pub fn dedupe_symbols(records: Vec<TickerRecord>) -> Vec<TickerRecord> {
    let mut seen = HashSet::new();
    records
        .into_iter()
        .filter(|record| seen.insert(record.symbol.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dedupe_keeps_first_occurrence() {
        let records = vec![
            TickerRecord::new("AAA", "Tech"),
            TickerRecord::with_name("BBB", "Health", "Bravo Corp"),
            TickerRecord::new("AAA", "Energy"),
        ];

        let deduped = dedupe_symbols(records);

        assert_eq!(deduped.len(), 2);
        assert_eq!(deduped[0].symbol, "AAA");
        assert_eq!(deduped[0].sector, "Tech"); // first occurrence wins
        assert_eq!(deduped[1].symbol, "BBB");
    }

    #[test]
    fn test_dedupe_preserves_order() {
        let records = vec![
            TickerRecord::new("CCC", "Health"),
            TickerRecord::new("AAA", "Tech"),
            TickerRecord::new("BBB", "Tech"),
        ];

        let deduped = dedupe_symbols(records);
        let symbols: Vec<&str> = deduped.iter().map(|r| r.symbol.as_str()).collect();

        assert_eq!(symbols, vec!["CCC", "AAA", "BBB"]);
    }
}
