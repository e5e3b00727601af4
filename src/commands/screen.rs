use crate::error::Result;
use crate::models::ScreeningReport;
use crate::services::screener::run_screening;
use crate::services::ticker_source::TickerSource;
use std::path::{Path, PathBuf};

pub fn run(source: TickerSource, export: Option<PathBuf>) {
    println!("🔎 Screening the {} universe...", source.describe());

    match run_and_report(&source, export.as_deref()) {
        Ok(()) => {}
        Err(e) => {
            eprintln!("❌ Error: {}", e);
            std::process::exit(1);
        }
    }
}

fn run_and_report(source: &TickerSource, export: Option<&Path>) -> Result<()> {
    let report = run_screening(source)?;

    println!(
        "📊 Evaluated {} symbols, {} passed ({} ms)\n",
        report.evaluated, report.passed, report.elapsed_ms
    );

    for group in &report.sectors {
        println!("🔹 {}", group.sector);
        for pass in &group.symbols {
            match &pass.name {
                Some(name) => println!(
                    "   {:<8} {:<24} close {:>10.2}  ma20 {:>10.2}",
                    pass.symbol, name, pass.close, pass.ma
                ),
                None => println!(
                    "   {:<8} close {:>10.2}  ma20 {:>10.2}",
                    pass.symbol, pass.close, pass.ma
                ),
            }
        }
    }

    if report.sectors.is_empty() {
        println!("   (no symbols passed the screen)");
    }

    if !report.diagnostics.is_empty() {
        println!();
        for diag in &report.diagnostics {
            eprintln!("⚠️  {}", diag);
        }
    }

    if let Some(path) = export {
        export_csv(&report, path)?;
        println!("\n💾 Exported survivors to {}", path.display());
    }

    Ok(())
}

fn export_csv(report: &ScreeningReport, path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;

    writer.write_record(["sector", "symbol", "name", "close", "ma", "macd", "macd_trigger"])?;
    for group in &report.sectors {
        for pass in &group.symbols {
            let close = format!("{:.4}", pass.close);
            let ma = format!("{:.4}", pass.ma);
            let macd = format!("{:.4}", pass.macd);
            let macd_trigger = format!("{:.4}", pass.macd_trigger);
            writer.write_record([
                group.sector.as_str(),
                pass.symbol.as_str(),
                pass.name.as_deref().unwrap_or(""),
                close.as_str(),
                ma.as_str(),
                macd.as_str(),
                macd_trigger.as_str(),
            ])?;
        }
    }
    writer.flush()?;

    Ok(())
}
