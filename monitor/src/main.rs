use anyhow::Result;
use market_scanner::SignalKind;
use monitor::{load_settings, quote_source, run_once, MonitorReport, OutputFormat};
use prediction_engine::PredictionReport;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    // Optional settings file as the first argument
    let path = std::env::args().nth(1).map(PathBuf::from);
    let settings = load_settings(path.as_deref())?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.log_level));
    fmt().with_env_filter(filter).init();

    info!("Market Monitor");
    info!("==============");

    let source = quote_source(&settings);
    let report = run_once(&settings, source.as_ref()).await?;

    match settings.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Text => print_text(&report),
    }

    Ok(())
}

fn print_text(report: &MonitorReport) {
    let summary = &report.summary;
    info!("\n=== Scan ===");
    info!("  Flagged symbols: {}", summary.total_flagged);
    info!(
        "  Alerts: {} volume, {} sentiment, {} volatility",
        summary.volume_alerts, summary.sentiment_alerts, summary.volatility_alerts
    );
    info!("  Market heat: {:.0}%", summary.market_heat);

    for kind in SignalKind::ALL {
        for signal in report.scan.signals(kind) {
            info!(
                "  [{}] {} {} {} (score {:.1})",
                kind,
                signal.symbol(),
                signal.strength,
                signal.value,
                signal.score
            );
        }
    }

    info!("\n=== Highlighted ({}) ===", report.highlighted.len());
    for (rank, signal) in report.highlighted.iter().enumerate() {
        info!("  {:>2}. {} [{}] {:.1}", rank + 1, signal.symbol(), signal.kind, signal.score);
    }

    info!("\n=== Predictions: {} v{} ===", report.engine.name, report.engine.version);
    for bundle in &report.predictions {
        println!("{}\n", PredictionReport::from(bundle));
    }
}
