use serde::Serialize;

/// One symbol that satisfied the screen, with the values it passed on
#[derive(Debug, Clone, Serialize)]
pub struct PassingSymbol {
    pub symbol: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Latest close
    pub close: f64,

    /// Latest 20-bar close moving average
    pub ma: f64,

    /// Latest MACD line value
    pub macd: f64,

    /// Latest 5-bar moving average of the MACD line
    pub macd_trigger: f64,
}

/// Passing symbols of one sector, in input iteration order
#[derive(Debug, Clone, Serialize)]
pub struct SectorGroup {
    pub sector: String,
    pub symbols: Vec<PassingSymbol>,
}

/// Outcome of one screening run
///
/// Sectors appear in first-appearance order of the input universe and only
/// when at least one of their symbols passed; symbols keep input order
/// within each sector. Reports are recomputed on every run and never
/// persisted.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ScreeningReport {
    pub sectors: Vec<SectorGroup>,

    /// One entry per failed symbol: "Error processing stock {symbol}: {cause}"
    pub diagnostics: Vec<String>,

    /// Symbols evaluated, including failures
    pub evaluated: usize,

    /// Symbols that passed the screen
    pub passed: usize,

    /// Wall-clock duration of the run
    pub elapsed_ms: u64,
}

impl ScreeningReport {
    /// Append a passing symbol to its sector, creating the sector group on
    /// first appearance.
    pub fn push_pass(&mut self, sector: &str, symbol: PassingSymbol) {
        match self.sectors.iter_mut().find(|group| group.sector == sector) {
            Some(group) => group.symbols.push(symbol),
            None => self.sectors.push(SectorGroup {
                sector: sector.to_string(),
                symbols: vec![symbol],
            }),
        }
        self.passed += 1;
    }

    /// Look up a sector group by name.
    pub fn sector(&self, name: &str) -> Option<&SectorGroup> {
        self.sectors.iter().find(|group| group.sector == name)
    }
}
