use crate::server;
use crate::services::ticker_source::TickerSource;

pub fn run(source: TickerSource, port: u16) {
    println!("🚀 Starting sectorscan server on port {}", port);
    println!("📋 Ticker source: {}", source.describe());

    let runtime = match tokio::runtime::Builder::new_multi_thread().enable_all().build() {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("❌ Failed to create runtime: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = runtime.block_on(server::serve(source, port)) {
        eprintln!("❌ Server error: {}", e);
        std::process::exit(1);
    }
}
