use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::commands;
use crate::services::ticker_source::TickerSource;

#[derive(Parser)]
#[command(name = "sectorscan")]
#[command(about = "Sector screening dashboard CLI", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Which source feeds the ticker universe
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum SourceArg {
    /// Spreadsheet download (tickers/sector/name columns)
    Sheet,
    /// Index-membership page scrape (Symbol/GICS Sector columns)
    Index,
}

impl SourceArg {
    fn to_source(self) -> TickerSource {
        match self {
            SourceArg::Sheet => TickerSource::spreadsheet(),
            SourceArg::Index => TickerSource::index_membership(),
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the screen and print survivors per sector
    Screen {
        #[arg(short, long, value_enum, default_value = "sheet")]
        source: SourceArg,

        /// Write passing symbols to a CSV file
        #[arg(long)]
        export: Option<PathBuf>,
    },
    /// Start the dashboard server
    Serve {
        #[arg(short, long, default_value_t = 9876)]
        port: u16,

        #[arg(short, long, value_enum, default_value = "sheet")]
        source: SourceArg,
    },
    /// Show the ticker universe
    Tickers {
        #[arg(short, long, value_enum, default_value = "sheet")]
        source: SourceArg,
    },
}

pub fn run() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Screen { source, export } => {
            commands::screen::run(source.to_source(), export);
        }
        Commands::Serve { port, source } => {
            commands::serve::run(source.to_source(), port);
        }
        Commands::Tickers { source } => {
            commands::tickers::run(source.to_source());
        }
    }
}
