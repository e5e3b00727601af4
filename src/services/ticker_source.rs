//! Ticker universe loading and normalization
//!
//! Two source kinds feed the screen: an xlsx workbook downloaded from a
//! fixed URL, and an index-membership page whose first HTML table lists
//! symbols with their GICS sector. Both are normalized into
//! [`TickerRecord`] at this boundary. A fetch or schema failure aborts the
//! run; an empty universe is never silently substituted.

use crate::constants::{
    HTTP_TIMEOUT_SECS, MEMBERSHIP_NAME_COLUMN, MEMBERSHIP_SECTOR_COLUMN, MEMBERSHIP_SYMBOL_COLUMN,
    SHEET_NAME_COLUMN, SHEET_SECTOR_COLUMN, SHEET_SYMBOL_COLUMN, SPREADSHEET_SHEET_NAME,
    USER_AGENT,
};
use crate::error::{Error, Result};
use crate::models::{dedupe_symbols, TickerRecord};
use crate::utils::{index_membership_url, spreadsheet_url};
use calamine::{Data, DataType, Reader, Xlsx};
use isahc::{config::Configurable, prelude::*, HttpClient};
use scraper::{ElementRef, Html, Selector};
use std::io::Cursor;
use std::time::Duration as StdDuration;
use tracing::info;

/// Where the ticker universe comes from
#[derive(Debug, Clone)]
pub enum TickerSource {
    /// xlsx workbook with `tickers`/`sector` (and optionally `name`) columns
    Spreadsheet { url: String },
    /// Web page whose first HTML table carries `Symbol`/`GICS Sector` columns
    IndexMembership { url: String },
}

impl TickerSource {
    /// Spreadsheet source at the configured URL.
    pub fn spreadsheet() -> Self {
        Self::Spreadsheet {
            url: spreadsheet_url(),
        }
    }

    /// Index-membership source at the configured URL.
    pub fn index_membership() -> Self {
        Self::IndexMembership {
            url: index_membership_url(),
        }
    }

    pub fn describe(&self) -> &'static str {
        match self {
            Self::Spreadsheet { .. } => "spreadsheet",
            Self::IndexMembership { .. } => "index membership",
        }
    }

    /// Download and normalize the universe. One attempt, no retries.
    pub fn load(&self) -> Result<Vec<TickerRecord>> {
        let http = HttpClient::builder()
            .timeout(StdDuration::from_secs(HTTP_TIMEOUT_SECS))
            .default_header("user-agent", USER_AGENT)
            .build()
            .map_err(|e| Error::Config(format!("Failed to build HTTP client: {}", e)))?;

        let records = match self {
            Self::Spreadsheet { url } => parse_workbook(&fetch_bytes(&http, url)?)?,
            Self::IndexMembership { url } => parse_membership_table(&fetch_text(&http, url)?)?,
        };

        let records = dedupe_symbols(records);
        if records.is_empty() {
            return Err(Error::Source(format!(
                "{} source produced no ticker records",
                self.describe()
            )));
        }

        info!(
            count = records.len(),
            source = self.describe(),
            "Loaded ticker universe"
        );
        Ok(records)
    }
}

fn fetch_bytes(http: &HttpClient, url: &str) -> Result<Vec<u8>> {
    let mut response = http.get(url)?;
    if !response.status().is_success() {
        return Err(Error::Source(format!(
            "Ticker source {} returned {}",
            url,
            response.status()
        )));
    }

    let mut buf = Vec::new();
    response.copy_to(&mut buf)?;
    Ok(buf)
}

fn fetch_text(http: &HttpClient, url: &str) -> Result<String> {
    let mut response = http.get(url)?;
    if !response.status().is_success() {
        return Err(Error::Source(format!(
            "Ticker source {} returned {}",
            url,
            response.status()
        )));
    }

    Ok(response.text()?)
}

/// Column positions resolved from the spreadsheet header row
struct SheetColumns {
    symbol: usize,
    sector: usize,
    name: Option<usize>,
}

impl SheetColumns {
    fn resolve(header: &[String]) -> Result<Self> {
        let find = |want: &str| {
            header
                .iter()
                .position(|cell| cell.eq_ignore_ascii_case(want))
        };

        let symbol = find(SHEET_SYMBOL_COLUMN).ok_or_else(|| {
            Error::Parse(format!(
                "Ticker sheet has no '{}' column",
                SHEET_SYMBOL_COLUMN
            ))
        })?;
        let sector = find(SHEET_SECTOR_COLUMN).ok_or_else(|| {
            Error::Parse(format!(
                "Ticker sheet has no '{}' column",
                SHEET_SECTOR_COLUMN
            ))
        })?;
        let name = find(SHEET_NAME_COLUMN);

        Ok(Self {
            symbol,
            sector,
            name,
        })
    }
}

fn cell_text(cell: &Data) -> String {
    cell.as_string()
        .map(|s| s.trim().to_string())
        .unwrap_or_default()
}

fn parse_workbook(bytes: &[u8]) -> Result<Vec<TickerRecord>> {
    let mut workbook = Xlsx::new(Cursor::new(bytes))
        .map_err(|e| Error::Parse(format!("Unreadable workbook: {}", e)))?;

    let range = workbook
        .worksheet_range(SPREADSHEET_SHEET_NAME)
        .map_err(|e| {
            Error::Parse(format!(
                "Missing worksheet '{}': {}",
                SPREADSHEET_SHEET_NAME, e
            ))
        })?;

    let mut rows = range.rows();
    let header: Vec<String> = rows
        .next()
        .ok_or_else(|| Error::Parse("Ticker sheet is empty".to_string()))?
        .iter()
        .map(cell_text)
        .collect();
    let columns = SheetColumns::resolve(&header)?;

    let mut records = Vec::new();
    for row in rows {
        let symbol = row.get(columns.symbol).map(cell_text).unwrap_or_default();
        if symbol.is_empty() {
            continue;
        }
        let sector = row.get(columns.sector).map(cell_text).unwrap_or_default();
        let name = columns
            .name
            .and_then(|idx| row.get(idx).map(cell_text))
            .filter(|name| !name.is_empty());

        records.push(TickerRecord {
            symbol,
            sector,
            name,
        });
    }

    Ok(records)
}

/// Column positions resolved from the membership table header row
struct MembershipColumns {
    symbol: usize,
    sector: usize,
    name: Option<usize>,
}

impl MembershipColumns {
    fn resolve(header: &[String]) -> Result<Self> {
        let find = |want: &str| {
            header
                .iter()
                .position(|cell| cell.eq_ignore_ascii_case(want))
        };

        let symbol = find(MEMBERSHIP_SYMBOL_COLUMN).ok_or_else(|| {
            Error::Parse(format!(
                "Membership table has no '{}' column",
                MEMBERSHIP_SYMBOL_COLUMN
            ))
        })?;
        let sector = find(MEMBERSHIP_SECTOR_COLUMN).ok_or_else(|| {
            Error::Parse(format!(
                "Membership table has no '{}' column",
                MEMBERSHIP_SECTOR_COLUMN
            ))
        })?;
        let name = find(MEMBERSHIP_NAME_COLUMN);

        Ok(Self {
            symbol,
            sector,
            name,
        })
    }
}

fn element_text(element: ElementRef) -> String {
    element.text().collect::<String>().trim().to_string()
}

fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| Error::Parse(format!("Bad selector '{}': {:?}", css, e)))
}

fn parse_membership_table(html: &str) -> Result<Vec<TickerRecord>> {
    let document = Html::parse_document(html);
    let table_sel = selector("table")?;
    let row_sel = selector("tr")?;
    let header_sel = selector("th")?;
    let cell_sel = selector("td")?;

    let table = document
        .select(&table_sel)
        .next()
        .ok_or_else(|| Error::Parse("Membership page has no table".to_string()))?;

    let mut rows = table.select(&row_sel);
    let header: Vec<String> = rows
        .next()
        .ok_or_else(|| Error::Parse("Membership table is empty".to_string()))?
        .select(&header_sel)
        .map(element_text)
        .collect();
    let columns = MembershipColumns::resolve(&header)?;

    let mut records = Vec::new();
    for row in rows {
        let cells: Vec<String> = row.select(&cell_sel).map(element_text).collect();

        let symbol = match cells.get(columns.symbol) {
            Some(symbol) if !symbol.is_empty() => symbol.clone(),
            _ => continue,
        };
        let sector = cells.get(columns.sector).cloned().unwrap_or_default();
        let name = columns
            .name
            .and_then(|idx| cells.get(idx).cloned())
            .filter(|name| !name.is_empty());

        records.push(TickerRecord {
            symbol,
            sector,
            name,
        });
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sheet_columns_resolve_case_insensitive() {
        let header = vec![
            "Tickers".to_string(),
            "Sector".to_string(),
            "Name".to_string(),
        ];
        let columns = SheetColumns::resolve(&header).unwrap();

        assert_eq!(columns.symbol, 0);
        assert_eq!(columns.sector, 1);
        assert_eq!(columns.name, Some(2));
    }

    #[test]
    fn test_sheet_columns_name_is_optional() {
        let header = vec!["tickers".to_string(), "sector".to_string()];
        let columns = SheetColumns::resolve(&header).unwrap();

        assert!(columns.name.is_none());
    }

    #[test]
    fn test_sheet_columns_missing_symbol_is_error() {
        let header = vec!["code".to_string(), "sector".to_string()];
        assert!(matches!(
            SheetColumns::resolve(&header),
            Err(Error::Parse(_))
        ));
    }

    #[test]
    fn test_parse_membership_table() {
        let html = r#"
            <html><body>
            <table>
              <tr><th>Symbol</th><th>Security</th><th>GICS Sector</th></tr>
              <tr><td><a>AAA</a></td><td>Alpha Corp</td><td>Tech</td></tr>
              <tr><td>BBB</td><td>Bravo Inc</td><td>Health</td></tr>
            </table>
            </body></html>
        "#;

        let records = parse_membership_table(html).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].symbol, "AAA");
        assert_eq!(records[0].sector, "Tech");
        assert_eq!(records[0].name.as_deref(), Some("Alpha Corp"));
        assert_eq!(records[1].symbol, "BBB");
        assert_eq!(records[1].sector, "Health");
    }

    #[test]
    fn test_parse_membership_table_skips_short_rows() {
        let html = r#"
            <table>
              <tr><th>Symbol</th><th>GICS Sector</th></tr>
              <tr><td>AAA</td><td>Tech</td></tr>
              <tr><td></td></tr>
            </table>
        "#;

        let records = parse_membership_table(html).unwrap();

        assert_eq!(records.len(), 1);
        assert!(records[0].name.is_none());
    }

    #[test]
    fn test_parse_membership_table_without_table() {
        let err = parse_membership_table("<html><body><p>nothing</p></body></html>").unwrap_err();
        assert!(matches!(err, Error::Parse(_)));
    }

    #[test]
    fn test_parse_membership_table_missing_sector_column() {
        let html = r#"
            <table>
              <tr><th>Symbol</th><th>Security</th></tr>
              <tr><td>AAA</td><td>Alpha Corp</td></tr>
            </table>
        "#;

        assert!(matches!(
            parse_membership_table(html),
            Err(Error::Parse(_))
        ));
    }
}
