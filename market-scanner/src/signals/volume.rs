use crate::signals::{Signal, SignalDetector, SignalKind, SignalMetadata, SignalStrength};
use common::{format_fixed, format_volume, parse_volume, Quote, RandomSource};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Configuration for the unusual-volume detector
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VolumeDetectorConfig {
    /// Lower bound of the baseline multiplier draw
    pub baseline_min: f64,
    /// Upper bound of the baseline multiplier draw (exclusive)
    pub baseline_max: f64,
    /// Minimum current/average ratio to emit a signal
    pub min_ratio: f64,
    pub strong_ratio: f64,
    pub moderate_ratio: f64,
}

impl Default for VolumeDetectorConfig {
    fn default() -> Self {
        Self {
            baseline_min: 0.6,
            baseline_max: 0.9,
            min_ratio: 1.5,
            strong_ratio: 3.0,
            moderate_ratio: 2.0,
        }
    }
}

/// Unusual Volume Detector
///
/// There is no trading history behind a quote, so the "average" volume is
/// synthesized as a random fraction of today's volume. The ratio of the two
/// then behaves like a realistic relative-volume reading.
#[derive(Debug, Clone, Default)]
pub struct VolumeSpikeDetector {
    config: VolumeDetectorConfig,
}

impl VolumeSpikeDetector {
    pub fn new(config: VolumeDetectorConfig) -> Self {
        Self { config }
    }
}

impl SignalDetector for VolumeSpikeDetector {
    fn detect(&self, quote: &Quote, rng: &mut dyn RandomSource) -> Option<Signal> {
        let current_volume = parse_volume(&quote.volume);
        // Always draw, so every quote consumes the same number of draws
        let baseline_factor = rng.uniform(self.config.baseline_min, self.config.baseline_max);
        let avg_volume = current_volume * baseline_factor;

        if avg_volume <= 0.0 {
            debug!("No usable volume for {} ({:?})", quote.symbol, quote.volume);
            return None;
        }

        let ratio = current_volume / avg_volume;
        if ratio < self.config.min_ratio {
            debug!(
                "Volume signal rejected for {}: ratio {:.2} < {:.2}",
                quote.symbol, ratio, self.config.min_ratio
            );
            return None;
        }

        let strength =
            SignalStrength::classify(ratio, self.config.strong_ratio, self.config.moderate_ratio);

        Some(Signal {
            quote: quote.clone(),
            kind: SignalKind::Volume,
            strength,
            value: format!("{}x avg", format_fixed(ratio, 1)),
            score: (ratio * 10.0).min(100.0),
            metadata: SignalMetadata::Volume {
                avg_volume: format_volume(avg_volume),
            },
        })
    }

    fn kind(&self) -> SignalKind {
        SignalKind::Volume
    }
}
