// Monitor Runner
// One pass: fetch quotes, scan, filter the combined ranking, predict the chosen symbols

use crate::settings::MonitorSettings;
use crate::source::{FileQuoteSource, QuoteSource, StaticQuoteSource};
use common::{entropy, seeded, Quote, StockDescriptor};
use market_scanner::{
    apply_filter, CompositeFilter, MarketScanner, RiskBand, RiskBandFilter, ScanResult, ScanSummary,
    ScannerConfig, SectorFilter, Signal,
};
use prediction_engine::{
    load_config, EngineInfo, EngineSettings, PredictionBundle, PredictionService,
};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::{info, warn};

/// Everything one pass produced
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitorReport {
    pub engine: EngineInfo,
    pub summary: ScanSummary,
    pub scan: ScanResult,
    /// Combined ranking after the sector and band filters
    pub highlighted: Vec<Signal>,
    pub predictions: Vec<PredictionBundle>,
}

/// Quote source named by the settings
pub fn quote_source(settings: &MonitorSettings) -> Box<dyn QuoteSource> {
    match &settings.quotes_file {
        Some(path) => Box::new(FileQuoteSource::new(path)),
        None => Box::new(StaticQuoteSource::universe()),
    }
}

/// Engine settings from the configured file, seeded from the runner seed when the file has none
pub fn engine_settings(settings: &MonitorSettings) -> anyhow::Result<EngineSettings> {
    let mut engine = match &settings.engine_config {
        Some(path) => load_config(path)?,
        None => EngineSettings::default(),
    };
    if engine.prediction.randomness_seed.is_none() {
        engine.prediction.randomness_seed = settings.seed;
    }
    Ok(engine)
}

fn signal_filter(settings: &MonitorSettings) -> anyhow::Result<CompositeFilter> {
    let band = settings.band.as_deref().map(str::parse::<RiskBand>).transpose()?;
    Ok(CompositeFilter::new()
        .add_filter(Box::new(SectorFilter::new(settings.sector.clone())))
        .add_filter(Box::new(RiskBandFilter::new(band))))
}

/// Stocks to predict: the configured symbols, or the first distinct flagged symbols
pub fn prediction_targets(
    settings: &MonitorSettings,
    quotes: &[Quote],
    flagged: &[Signal],
) -> Vec<StockDescriptor> {
    if !settings.symbols.is_empty() {
        return settings
            .symbols
            .iter()
            .filter_map(|symbol| {
                let quote = quotes.iter().find(|q| &q.symbol == symbol);
                if quote.is_none() {
                    warn!("Symbol {} not in quote snapshot, skipping", symbol);
                }
                quote.map(StockDescriptor::from)
            })
            .collect();
    }

    let mut seen = HashSet::new();
    flagged
        .iter()
        .filter(|signal| seen.insert(signal.symbol().to_string()))
        .take(settings.predict_limit)
        .map(|signal| StockDescriptor::from(&signal.quote))
        .collect()
}

/// Run one monitoring pass
pub async fn run_once(
    settings: &MonitorSettings,
    source: &dyn QuoteSource,
) -> anyhow::Result<MonitorReport> {
    let quotes = source.fetch_quotes().await?;
    info!(source = source.name(), quotes = quotes.len(), "Fetched quotes");

    let scanner = MarketScanner::with_default_detectors(ScannerConfig::default());
    let scan = match settings.seed {
        Some(seed) => scanner.scan(&quotes, &mut seeded(seed)),
        None => scanner.scan(&quotes, &mut entropy()),
    };
    let summary = scan.summary();

    let highlighted = apply_filter(&scan.all_signals, &signal_filter(settings)?);
    let targets = prediction_targets(settings, &quotes, &highlighted);

    let mut service = PredictionService::new(settings.mode, &engine_settings(settings)?)?;
    let predictions = service.batch_predict(&targets).await?;

    info!(
        flagged = summary.total_flagged,
        heat = summary.market_heat,
        highlighted = highlighted.len(),
        predictions = predictions.len(),
        mode = %settings.mode,
        "Monitor pass complete"
    );

    Ok(MonitorReport {
        engine: service.describe(),
        summary,
        scan,
        highlighted,
        predictions,
    })
}
