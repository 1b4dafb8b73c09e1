use crate::signals::{Signal, SignalDetector, SignalKind, SignalMetadata, SignalStrength};
use common::{parse_volume, round_to, Quote, RandomSource};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Configuration for the volatility detector
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VolatilityDetectorConfig {
    /// Bounds of the amplification draw applied to the combined reading
    pub amplifier_min: f64,
    pub amplifier_max: f64,
    pub price_weight: f64,
    pub volume_weight: f64,
    /// Shares per unit of price that count as "normal" turnover
    pub volume_scale: f64,
    /// Minimum raw score to emit a signal
    pub min_raw: f64,
    pub strong_raw: f64,
    pub moderate_raw: f64,
    /// Raw score above which the signal reads "Extreme"
    pub extreme_raw: f64,
    /// Cap applied to the score carried in metadata
    pub metadata_cap: f64,
}

impl Default for VolatilityDetectorConfig {
    fn default() -> Self {
        Self {
            amplifier_min: 1.0,
            amplifier_max: 1.5,
            price_weight: 0.6,
            volume_weight: 40.0,
            volume_scale: 100_000.0,
            min_raw: 2.0,
            strong_raw: 5.0,
            moderate_raw: 3.0,
            extreme_raw: 4.0,
            metadata_cap: 10.0,
        }
    }
}

/// Volatility Detector
///
/// Combines the day's absolute percent move with turnover relative to price.
#[derive(Debug, Clone, Default)]
pub struct VolatilityDetector {
    config: VolatilityDetectorConfig,
}

impl VolatilityDetector {
    pub fn new(config: VolatilityDetectorConfig) -> Self {
        Self { config }
    }

    /// Unamplified reading. A non-positive price contributes no volume term.
    fn base_reading(&self, quote: &Quote) -> f64 {
        let price_volatility = if quote.change_percent.is_finite() {
            quote.change_percent.abs()
        } else {
            0.0
        };

        let volume_volatility = if quote.price.is_finite() && quote.price > 0.0 {
            parse_volume(&quote.volume) / (quote.price * self.config.volume_scale)
        } else {
            0.0
        };

        price_volatility * self.config.price_weight + volume_volatility * self.config.volume_weight
    }
}

impl SignalDetector for VolatilityDetector {
    fn detect(&self, quote: &Quote, rng: &mut dyn RandomSource) -> Option<Signal> {
        let amplifier = rng.uniform(self.config.amplifier_min, self.config.amplifier_max);
        let raw = self.base_reading(quote) * amplifier;

        if raw < self.config.min_raw {
            debug!(
                "Volatility signal rejected for {}: raw {:.2} < {:.2}",
                quote.symbol, raw, self.config.min_raw
            );
            return None;
        }

        let strength =
            SignalStrength::classify(raw, self.config.strong_raw, self.config.moderate_raw);
        let value = if raw > self.config.extreme_raw { "Extreme" } else { "High" };

        Some(Signal {
            quote: quote.clone(),
            kind: SignalKind::Volatility,
            strength,
            value: value.to_string(),
            score: (raw * 10.0).min(100.0),
            metadata: SignalMetadata::Volatility {
                volatility_score: round_to(raw.min(self.config.metadata_cap), 1),
            },
        })
    }

    fn kind(&self) -> SignalKind {
        SignalKind::Volatility
    }
}
