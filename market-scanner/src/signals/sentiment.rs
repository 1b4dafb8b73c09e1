use crate::signals::{Signal, SignalDetector, SignalKind, SignalMetadata, SignalStrength};
use common::{format_fixed, symbol_checksum, Quote, RandomSource};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Configuration for the sentiment spike detector
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SentimentDetectorConfig {
    /// Minimum |delta| in points to emit a signal
    pub min_delta: f64,
    pub strong_delta: f64,
    pub moderate_delta: f64,
    /// Points of expected sentiment per percent of price change
    pub momentum_weight: f64,
}

impl Default for SentimentDetectorConfig {
    fn default() -> Self {
        Self {
            min_delta: 15.0,
            strong_delta: 25.0,
            moderate_delta: 20.0,
            momentum_weight: 2.0,
        }
    }
}

/// Pseudo-sentiment in [50, 80) derived from the symbol checksum
pub fn pseudo_sentiment(symbol: &str) -> f64 {
    (symbol_checksum(symbol) % 30 + 50) as f64
}

/// Sentiment Spike Detector
///
/// Flags quotes whose symbol-derived sentiment diverges from what the day's
/// price momentum would suggest. Draws no randomness.
#[derive(Debug, Clone, Default)]
pub struct SentimentSpikeDetector {
    config: SentimentDetectorConfig,
}

impl SentimentSpikeDetector {
    pub fn new(config: SentimentDetectorConfig) -> Self {
        Self { config }
    }

    /// Sentiment implied by today's move: 50 points neutral
    fn baseline(&self, quote: &Quote) -> f64 {
        let change = if quote.change_percent.is_finite() {
            quote.change_percent
        } else {
            0.0
        };
        50.0 + change * self.config.momentum_weight
    }
}

impl SignalDetector for SentimentSpikeDetector {
    fn detect(&self, quote: &Quote, _rng: &mut dyn RandomSource) -> Option<Signal> {
        let delta = pseudo_sentiment(&quote.symbol) - self.baseline(quote);
        let magnitude = delta.abs();

        if magnitude < self.config.min_delta {
            debug!(
                "Sentiment signal rejected for {}: |delta| {:.2} < {:.2}",
                quote.symbol, magnitude, self.config.min_delta
            );
            return None;
        }

        let strength = SignalStrength::classify(
            magnitude,
            self.config.strong_delta,
            self.config.moderate_delta,
        );
        let value = if delta > 0.0 { "Bullish Surge" } else { "Bearish Surge" };
        let sign = if delta > 0.0 { "+" } else { "" };

        Some(Signal {
            quote: quote.clone(),
            kind: SignalKind::Sentiment,
            strength,
            value: value.to_string(),
            score: (magnitude * 2.0).min(100.0),
            metadata: SignalMetadata::Sentiment {
                sentiment_change: format!("{}{} pts", sign, format_fixed(delta, 0)),
                delta,
            },
        })
    }

    fn kind(&self) -> SignalKind {
        SignalKind::Sentiment
    }
}
