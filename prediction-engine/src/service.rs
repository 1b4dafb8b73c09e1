// Prediction Service
// Async front for an engine: owns the RNG, optional simulated latency, bounded batch fan-out

use crate::config::{ConfigError, EngineSettings, PredictionConfig, ServiceConfig};
use crate::engine::{EngineInfo, EngineMode, PredictionEngine};
use crate::prediction::PredictionBundle;
use common::{entropy, seeded, StockDescriptor};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use tracing::{debug, info};

pub struct PredictionService {
    engine: Arc<dyn PredictionEngine>,
    config: Arc<PredictionConfig>,
    service: ServiceConfig,
    rng: fastrand::Rng,
    latency_rng: fastrand::Rng,
}

impl PredictionService {
    /// Service over the engine for `mode`, seeded from the settings when a seed is set
    pub fn new(mode: EngineMode, settings: &EngineSettings) -> Result<Self, ConfigError> {
        settings.validate()?;
        let engine = mode.engine(settings.sectors.clone());
        Ok(Self::with_engine(engine, settings.prediction.clone(), settings.service.clone()))
    }

    pub fn with_engine(
        engine: Arc<dyn PredictionEngine>,
        config: PredictionConfig,
        service: ServiceConfig,
    ) -> Self {
        let rng = match config.randomness_seed {
            Some(seed) => seeded(seed),
            None => entropy(),
        };

        Self {
            engine,
            config: Arc::new(config),
            service,
            rng,
            latency_rng: entropy(),
        }
    }

    pub fn describe(&self) -> EngineInfo {
        self.engine.describe()
    }

    pub fn mode(&self) -> EngineMode {
        self.engine.mode()
    }

    pub fn config(&self) -> &PredictionConfig {
        &self.config
    }

    /// Forecast one stock
    pub async fn predict(&mut self, stock: &StockDescriptor) -> PredictionBundle {
        if let Some(delay) = self.processing_delay() {
            tokio::time::sleep(delay).await;
        }
        self.engine.predict(stock, &self.config, &mut self.rng)
    }

    /// Forecast every stock concurrently; results keep input order.
    ///
    /// Each task gets its own RNG forked from the service RNG in input order,
    /// so a seeded service replays the same batch regardless of scheduling.
    pub async fn batch_predict(
        &mut self,
        stocks: &[StockDescriptor],
    ) -> anyhow::Result<Vec<PredictionBundle>> {
        if stocks.is_empty() {
            return Ok(Vec::new());
        }

        let permits = self.service.max_concurrency.clamp(1, Semaphore::MAX_PERMITS);
        let semaphore = Arc::new(Semaphore::new(permits));
        let mut tasks = Vec::with_capacity(stocks.len());

        for stock in stocks {
            let semaphore = semaphore.clone();
            let engine = self.engine.clone();
            let config = self.config.clone();
            let stock = stock.clone();
            let mut rng = self.rng.fork();
            let delay = self.processing_delay();

            let task = tokio::spawn(async move {
                let _permit = semaphore.acquire_owned().await?;
                if let Some(delay) = delay {
                    tokio::time::sleep(delay).await;
                }
                debug!("Predicting {}", stock.symbol);
                anyhow::Ok(engine.predict(&stock, &config, &mut rng))
            });

            tasks.push(task);
        }

        let mut bundles = Vec::with_capacity(tasks.len());
        for task in tasks {
            bundles.push(task.await??);
        }

        info!(
            mode = %self.mode(),
            count = bundles.len(),
            "Batch prediction complete"
        );

        Ok(bundles)
    }

    fn processing_delay(&mut self) -> Option<Duration> {
        if !self.service.simulate_latency {
            return None;
        }
        let range = self.mode().latency(&self.service);
        Some(Duration::from_millis(self.latency_rng.u64(range.min_ms..=range.max_ms)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{LatencyRange, SectorTables};
    use crate::risk::{Direction, RiskLevel};
    use common::universe;

    fn stocks() -> Vec<StockDescriptor> {
        universe().iter().map(StockDescriptor::from).collect()
    }

    fn seeded_settings(seed: u64) -> EngineSettings {
        EngineSettings {
            prediction: PredictionConfig::default().with_seed(seed),
            ..Default::default()
        }
    }

    type Fingerprint = (Vec<(f64, f64, Direction, f64)>, f64, RiskLevel, f64);

    /// Bundle contents without timestamps
    fn fingerprint(bundle: &PredictionBundle) -> Fingerprint {
        let horizons = bundle
            .timeframes
            .iter()
            .map(|t| (t.predicted_price, t.change_percent, t.direction, t.confidence))
            .collect();
        (horizons, bundle.confidence_score, bundle.risk_level, bundle.sentiment_score)
    }

    #[tokio::test]
    async fn test_batch_keeps_input_order() {
        let stocks = stocks();
        let mut service =
            PredictionService::new(EngineMode::Standard, &seeded_settings(1)).unwrap();
        let bundles = service.batch_predict(&stocks).await.unwrap();

        assert_eq!(bundles.len(), stocks.len());
        for (bundle, stock) in bundles.iter().zip(&stocks) {
            assert_eq!(bundle.symbol, stock.symbol);
            assert_eq!(bundle.mode, EngineMode::Standard);
        }
    }

    #[tokio::test]
    async fn test_seeded_batch_is_reproducible() {
        let stocks = stocks();
        for mode in EngineMode::available() {
            let mut first = PredictionService::new(mode, &seeded_settings(11)).unwrap();
            let mut second = PredictionService::new(mode, &seeded_settings(11)).unwrap();

            let a = first.batch_predict(&stocks).await.unwrap();
            let b = second.batch_predict(&stocks).await.unwrap();

            let a: Vec<_> = a.iter().map(fingerprint).collect();
            let b: Vec<_> = b.iter().map(fingerprint).collect();
            assert_eq!(a, b);
        }
    }

    #[tokio::test]
    async fn test_seeded_single_prediction_is_reproducible() {
        let stock = StockDescriptor::new("2222", "Energy", 28.5);
        let mut first = PredictionService::new(EngineMode::Standard, &seeded_settings(5)).unwrap();
        let mut second = PredictionService::new(EngineMode::Standard, &seeded_settings(5)).unwrap();

        assert_eq!(
            fingerprint(&first.predict(&stock).await),
            fingerprint(&second.predict(&stock).await)
        );
    }

    #[tokio::test]
    async fn test_empty_batch() {
        let mut service =
            PredictionService::new(EngineMode::Demo, &EngineSettings::default()).unwrap();
        assert!(service.batch_predict(&[]).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_simulated_latency_still_completes() {
        let mut settings = seeded_settings(2);
        settings.service.simulate_latency = true;
        settings.service.max_concurrency = 2;
        settings.service.demo_latency = LatencyRange { min_ms: 1, max_ms: 3 };

        let mut service = PredictionService::new(EngineMode::Demo, &settings).unwrap();
        let bundles = service.batch_predict(&stocks()[..5]).await.unwrap();
        assert_eq!(bundles.len(), 5);
        assert!(bundles.iter().all(|b| b.is_demo()));
    }

    #[tokio::test]
    async fn test_unvalidated_concurrency_is_capped() {
        let service = ServiceConfig {
            max_concurrency: usize::MAX,
            ..Default::default()
        };
        let engine = EngineMode::Standard.engine(SectorTables::default());
        let config = PredictionConfig::default().with_seed(4);
        let mut service = PredictionService::with_engine(engine, config, service);

        let bundles = service.batch_predict(&stocks()[..3]).await.unwrap();
        assert_eq!(bundles.len(), 3);
    }

    #[test]
    fn test_invalid_settings_rejected() {
        let settings = EngineSettings {
            prediction: PredictionConfig::default().with_confidence_range(90.0, 10.0),
            ..Default::default()
        };
        assert!(PredictionService::new(EngineMode::Standard, &settings).is_err());

        let mut settings = EngineSettings::default();
        settings.service.max_concurrency = usize::MAX;
        assert!(PredictionService::new(EngineMode::Standard, &settings).is_err());
    }

    #[test]
    fn test_describe_reports_mode() {
        let service = PredictionService::new(EngineMode::Demo, &EngineSettings::default()).unwrap();
        assert_eq!(service.describe().mode, EngineMode::Demo);
        assert_eq!(service.mode(), EngineMode::Demo);
    }
}
