use crate::error::Result;
use crate::models::TickerRecord;
use crate::services::ticker_source::TickerSource;

pub fn run(source: TickerSource) {
    match show_universe(&source) {
        Ok(()) => {}
        Err(e) => {
            eprintln!("❌ Error: {}", e);
            std::process::exit(1);
        }
    }
}

fn show_universe(source: &TickerSource) -> Result<()> {
    let universe = source.load()?;

    println!(
        "📈 {} tickers from the {} source\n",
        universe.len(),
        source.describe()
    );

    for (sector, records) in group_by_sector(&universe) {
        println!("🔹 {} ({})", sector, records.len());
        for record in records {
            match &record.name {
                Some(name) => println!("   {:<8} {}", record.symbol, name),
                None => println!("   {}", record.symbol),
            }
        }
    }

    Ok(())
}

/// Group records by sector, keeping first-appearance sector order and
/// input order within each sector.
fn group_by_sector(universe: &[TickerRecord]) -> Vec<(String, Vec<&TickerRecord>)> {
    let mut sectors: Vec<(String, Vec<&TickerRecord>)> = Vec::new();
    for record in universe {
        match sectors.iter_mut().find(|(sector, _)| sector == &record.sector) {
            Some((_, records)) => records.push(record),
            None => sectors.push((record.sector.clone(), vec![record])),
        }
    }
    sectors
}
