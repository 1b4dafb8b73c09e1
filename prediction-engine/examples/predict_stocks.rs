//! Example usage of the prediction engines

use common::{by_symbol, universe, StockDescriptor};
use prediction_engine::{
    showcase_price_path, EngineMode, EngineSettings, PredictionConfig, PredictionReport,
    PredictionService,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_max_level(tracing::Level::INFO).init();

    println!("=== Prediction Engine Example ===\n");

    let settings = EngineSettings {
        prediction: PredictionConfig::default().with_seed(2024),
        ..Default::default()
    };

    let stocks: Vec<StockDescriptor> = ["2222", "1120", "7010"]
        .iter()
        .filter_map(|symbol| by_symbol(universe(), symbol))
        .map(StockDescriptor::from)
        .collect();

    for mode in EngineMode::available() {
        let mut service = PredictionService::new(mode, &settings)?;
        let info = service.describe();
        println!("{} v{}\n", info.name, info.version);

        for bundle in service.batch_predict(&stocks).await? {
            println!("{}\n", PredictionReport::from(&bundle));
        }
    }

    println!("Showcase path for 2222 (last 7 days):");
    if let Some(aramco) = by_symbol(universe(), "2222") {
        for point in showcase_price_path(aramco.price, 7, chrono::Utc::now()) {
            println!("  {}  {:.2}", point.date.format("%Y-%m-%d"), point.price);
        }
    }

    Ok(())
}
