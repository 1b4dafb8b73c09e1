// Example: Market Scan
// Runs the three detectors over the reference universe and prints the ranked lists

use common::{seeded, universe};
use market_scanner::{
    apply_filter, available_sectors, CompositeFilter, MarketScanner, RiskBand, RiskBandFilter,
    ScannerConfig, SectorFilter, SignalKind,
};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_max_level(tracing::Level::INFO).init();

    println!("=== Market Scanner - Reference Universe ===\n");

    let scanner = MarketScanner::with_default_detectors(ScannerConfig::default());
    let mut rng = seeded(2024);
    let result = scanner.scan(universe(), &mut rng);

    for kind in SignalKind::ALL {
        println!("{} signals:", kind);
        for signal in result.signals(kind) {
            println!(
                "  {:<6} {:<24} {:<9} {:<14} score {:>5.1}",
                signal.symbol(),
                signal.quote.name,
                signal.strength,
                signal.value,
                signal.score
            );
        }
        println!();
    }

    println!("Top combined:");
    for (rank, signal) in result.all_signals.iter().enumerate() {
        println!("  {:>2}. {} [{}] {:.1}", rank + 1, signal.symbol(), signal.kind, signal.score);
    }

    let summary = result.summary();
    println!("\nFlagged symbols: {}", summary.total_flagged);
    println!("Market heat: {:.0}%", summary.market_heat);

    println!("\nSectors with volume alerts: {:?}", available_sectors(&result.volume_signals));

    let band: RiskBand = "High".parse()?;
    let filter = CompositeFilter::new()
        .add_filter(Box::new(SectorFilter::sector("Banking")))
        .add_filter(Box::new(RiskBandFilter::new(Some(band))));
    let banking_high = apply_filter(&result.volatility_signals, &filter);
    println!("High-band banking volatility alerts: {}", banking_high.len());

    Ok(())
}
