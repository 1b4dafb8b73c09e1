// Market Scanner
// Runs every detector over the tracked universe, then ranks and truncates the results

use super::signals::{
    SentimentSpikeDetector, Signal, SignalDetector, SignalKind, VolatilityDetector,
    VolumeSpikeDetector,
};
use super::summary::{ScanSummary, SignalTally};
use chrono::{DateTime, Utc};
use common::{Quote, RandomSource};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Configuration for the market scanner
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScannerConfig {
    /// Signals kept per kind after ranking
    #[serde(default = "default_per_kind_limit")]
    pub per_kind_limit: usize,
    /// Signals kept in the combined ranking
    #[serde(default = "default_combined_limit")]
    pub combined_limit: usize,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            per_kind_limit: default_per_kind_limit(),
            combined_limit: default_combined_limit(),
        }
    }
}

fn default_per_kind_limit() -> usize {
    6
}

fn default_combined_limit() -> usize {
    12
}

/// Ranked output of one scan
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanResult {
    pub volume_signals: Vec<Signal>,
    pub sentiment_signals: Vec<Signal>,
    pub volatility_signals: Vec<Signal>,
    /// Merge of the three ranked lists, re-ranked and truncated
    pub all_signals: Vec<Signal>,
    /// Every signal the detectors emitted, before truncation
    pub tally: SignalTally,
    pub scanned_at: DateTime<Utc>,
}

impl ScanResult {
    /// Ranked list for one kind
    pub fn signals(&self, kind: SignalKind) -> &[Signal] {
        match kind {
            SignalKind::Volume => &self.volume_signals,
            SignalKind::Sentiment => &self.sentiment_signals,
            SignalKind::Volatility => &self.volatility_signals,
        }
    }

    /// Strength-weighted heat over every emitted signal, 0-100
    pub fn market_heat(&self) -> f64 {
        self.tally.market_heat()
    }

    pub fn summary(&self) -> ScanSummary {
        ScanSummary::from_result(self)
    }
}

/// Market scanner
pub struct MarketScanner {
    detectors: Vec<Box<dyn SignalDetector + Send + Sync>>,
    config: ScannerConfig,
}

impl MarketScanner {
    /// Create a scanner with no detectors
    pub fn new(config: ScannerConfig) -> Self {
        Self {
            detectors: Vec::new(),
            config,
        }
    }

    /// Scanner with the volume, sentiment and volatility detectors, in that order
    pub fn with_default_detectors(config: ScannerConfig) -> Self {
        Self::new(config)
            .add_detector(Box::new(VolumeSpikeDetector::default()))
            .add_detector(Box::new(SentimentSpikeDetector::default()))
            .add_detector(Box::new(VolatilityDetector::default()))
    }

    /// Add a signal detector
    pub fn add_detector(mut self, detector: Box<dyn SignalDetector + Send + Sync>) -> Self {
        debug!("Adding signal detector: {}", detector.kind());
        self.detectors.push(detector);
        self
    }

    pub fn config(&self) -> &ScannerConfig {
        &self.config
    }

    /// Get the number of registered detectors
    pub fn detector_count(&self) -> usize {
        self.detectors.len()
    }

    /// Scan the universe.
    ///
    /// Each kind is ranked by score and cut to `per_kind_limit`; the combined
    /// list is built from those already-cut lists, so a signal dropped from its
    /// own kind never reaches the combined ranking even if it outscores
    /// everything there. Ties keep input order.
    pub fn scan(&self, quotes: &[Quote], rng: &mut dyn RandomSource) -> ScanResult {
        let mut volume_signals = Vec::new();
        let mut sentiment_signals = Vec::new();
        let mut volatility_signals = Vec::new();
        let mut tally = SignalTally::default();

        for quote in quotes {
            for detector in &self.detectors {
                if let Some(signal) = detector.detect(quote, rng) {
                    debug!(
                        "Flagged {} [{}] {} score={:.1}",
                        quote.symbol, signal.kind, signal.strength, signal.score
                    );
                    tally.record(&signal);
                    match signal.kind {
                        SignalKind::Volume => volume_signals.push(signal),
                        SignalKind::Sentiment => sentiment_signals.push(signal),
                        SignalKind::Volatility => volatility_signals.push(signal),
                    }
                }
            }
        }

        for list in [&mut volume_signals, &mut sentiment_signals, &mut volatility_signals] {
            rank(list);
            list.truncate(self.config.per_kind_limit);
        }

        let mut all_signals: Vec<Signal> = volume_signals
            .iter()
            .chain(sentiment_signals.iter())
            .chain(volatility_signals.iter())
            .cloned()
            .collect();
        rank(&mut all_signals);
        all_signals.truncate(self.config.combined_limit);

        info!(
            quotes = quotes.len(),
            emitted = tally.total(),
            volume = volume_signals.len(),
            sentiment = sentiment_signals.len(),
            volatility = volatility_signals.len(),
            heat = tally.market_heat(),
            "Market scan complete"
        );

        ScanResult {
            volume_signals,
            sentiment_signals,
            volatility_signals,
            all_signals,
            tally,
            scanned_at: Utc::now(),
        }
    }
}

impl Default for MarketScanner {
    fn default() -> Self {
        Self::with_default_detectors(ScannerConfig::default())
    }
}

/// Scan with the default detectors and limits
pub fn scan_market(quotes: &[Quote], rng: &mut dyn RandomSource) -> ScanResult {
    MarketScanner::default().scan(quotes, rng)
}

/// Stable sort, highest score first
fn rank(signals: &mut [Signal]) {
    signals.sort_by(|a, b| b.score.total_cmp(&a.score));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signals::{SignalMetadata, SignalStrength};
    use common::{seeded, universe, FixedSequence};

    /// Emits a signal of a fixed kind whose score is read from the quote price
    struct PriceScoreDetector(SignalKind);

    impl SignalDetector for PriceScoreDetector {
        fn detect(&self, quote: &Quote, _rng: &mut dyn RandomSource) -> Option<Signal> {
            if quote.sector != self.0.as_str() {
                return None;
            }
            Some(Signal {
                quote: quote.clone(),
                kind: self.0,
                strength: SignalStrength::Weak,
                value: String::new(),
                score: quote.price,
                metadata: SignalMetadata::Volatility { volatility_score: 0.0 },
            })
        }

        fn kind(&self) -> SignalKind {
            self.0
        }
    }

    fn scored(symbol: &str, kind: SignalKind, score: f64) -> Quote {
        Quote::new(symbol, symbol, kind.as_str(), score, 0.0, 0.0, "0", "")
    }

    fn stub_scanner() -> MarketScanner {
        MarketScanner::new(ScannerConfig::default())
            .add_detector(Box::new(PriceScoreDetector(SignalKind::Volume)))
            .add_detector(Box::new(PriceScoreDetector(SignalKind::Sentiment)))
            .add_detector(Box::new(PriceScoreDetector(SignalKind::Volatility)))
    }

    #[test]
    fn test_default_config() {
        let config = ScannerConfig::default();
        assert_eq!(config.per_kind_limit, 6);
        assert_eq!(config.combined_limit, 12);
        assert_eq!(MarketScanner::default().detector_count(), 3);
    }

    #[test]
    fn test_limits_hold_for_large_universe() {
        let quotes: Vec<Quote> = universe().iter().cycle().take(200).cloned().collect();
        let mut rng = seeded(11);
        let result = scan_market(&quotes, &mut rng);

        for kind in SignalKind::ALL {
            assert!(result.signals(kind).len() <= 6);
        }
        assert!(result.all_signals.len() <= 12);
        assert!(result.tally.total() >= result.all_signals.len());
    }

    #[test]
    fn test_lists_are_ranked_descending() {
        let mut rng = seeded(3);
        let result = scan_market(universe(), &mut rng);

        for list in [
            &result.volume_signals,
            &result.sentiment_signals,
            &result.volatility_signals,
            &result.all_signals,
        ] {
            assert!(list.windows(2).all(|w| w[0].score >= w[1].score));
        }
    }

    #[test]
    fn test_combined_ranking_merges_truncated_lists() {
        // Seven strong volume signals and one weak sentiment signal
        let mut quotes: Vec<Quote> = (0..7)
            .map(|i| scored(&format!("V{}", i), SignalKind::Volume, 90.0 - i as f64))
            .collect();
        quotes.push(scored("S0", SignalKind::Sentiment, 10.0));

        let mut rng = FixedSequence::constant(0.0);
        let result = stub_scanner().scan(&quotes, &mut rng);

        assert_eq!(result.volume_signals.len(), 6);
        assert_eq!(result.tally.total(), 8);
        // V6 (score 84) outranks S0 but was cut from the volume list first
        let combined: Vec<&str> = result.all_signals.iter().map(|s| s.symbol()).collect();
        assert_eq!(combined, vec!["V0", "V1", "V2", "V3", "V4", "V5", "S0"]);
    }

    #[test]
    fn test_ties_keep_input_order() {
        let quotes = vec![
            scored("A", SignalKind::Sentiment, 50.0),
            scored("B", SignalKind::Volume, 50.0),
            scored("C", SignalKind::Sentiment, 50.0),
        ];

        let mut rng = FixedSequence::constant(0.0);
        let result = stub_scanner().scan(&quotes, &mut rng);

        // Combined order is volume list first, then sentiment
        let combined: Vec<&str> = result.all_signals.iter().map(|s| s.symbol()).collect();
        assert_eq!(combined, vec!["B", "A", "C"]);
    }

    #[test]
    fn test_scan_is_reproducible_with_seed() {
        let first = scan_market(universe(), &mut seeded(99));
        let second = scan_market(universe(), &mut seeded(99));

        assert_eq!(first.volume_signals, second.volume_signals);
        assert_eq!(first.sentiment_signals, second.sentiment_signals);
        assert_eq!(first.volatility_signals, second.volatility_signals);
        assert_eq!(first.all_signals, second.all_signals);
        assert_eq!(first.tally, second.tally);
    }

    #[test]
    fn test_empty_universe() {
        let mut rng = seeded(1);
        let result = scan_market(&[], &mut rng);
        assert!(result.all_signals.is_empty());
        assert_eq!(result.market_heat(), 0.0);
    }

    #[test]
    fn test_draw_order_per_quote() {
        // Volume draw then volatility draw, sentiment draws nothing
        let quotes = &universe()[..4];
        let mut rng = FixedSequence::constant(0.3);
        scan_market(quotes, &mut rng);
        assert_eq!(rng.draws(), 8);
    }
}
