use common::{Quote, RandomSource};
use serde::{Deserialize, Serialize};
use std::fmt;

pub mod sentiment;
pub mod volatility;
pub mod volume;

pub use sentiment::{SentimentDetectorConfig, SentimentSpikeDetector};
pub use volatility::{VolatilityDetector, VolatilityDetectorConfig};
pub use volume::{VolumeDetectorConfig, VolumeSpikeDetector};

/// Signal kind enumeration
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum SignalKind {
    Volume,
    Sentiment,
    Volatility,
}

impl SignalKind {
    pub const ALL: [SignalKind; 3] =
        [SignalKind::Volume, SignalKind::Sentiment, SignalKind::Volatility];

    pub fn as_str(&self) -> &'static str {
        match self {
            SignalKind::Volume => "volume",
            SignalKind::Sentiment => "sentiment",
            SignalKind::Volatility => "volatility",
        }
    }
}

impl fmt::Display for SignalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Strength class, ordered weakest first
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum SignalStrength {
    Weak,
    Moderate,
    Strong,
}

impl SignalStrength {
    /// Step function over a continuous metric: strong above `strong_above`,
    /// moderate above `moderate_above`, weak otherwise
    pub fn classify(metric: f64, strong_above: f64, moderate_above: f64) -> Self {
        if metric > strong_above {
            SignalStrength::Strong
        } else if metric > moderate_above {
            SignalStrength::Moderate
        } else {
            SignalStrength::Weak
        }
    }

    /// Weight used by the market heat aggregate
    pub fn weight(&self) -> u32 {
        match self {
            SignalStrength::Strong => 3,
            SignalStrength::Moderate => 2,
            SignalStrength::Weak => 1,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SignalStrength::Strong => "strong",
            SignalStrength::Moderate => "moderate",
            SignalStrength::Weak => "weak",
        }
    }
}

impl fmt::Display for SignalStrength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Kind-specific detail attached to a signal
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SignalMetadata {
    Volume {
        /// Synthesized baseline in display form, e.g. "27.1M"
        avg_volume: String,
    },
    Sentiment {
        /// Signed whole-point delta, e.g. "+18 pts"
        sentiment_change: String,
        delta: f64,
    },
    Volatility {
        /// Raw score capped at 10, one decimal
        volatility_score: f64,
    },
}

/// A flagged anomaly for one instrument
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Signal {
    pub quote: Quote,
    pub kind: SignalKind,
    pub strength: SignalStrength,
    /// Human-readable value, e.g. "2.3x avg", "Bullish Surge", "Extreme"
    pub value: String,
    /// Ranking score in [0, 100]
    pub score: f64,
    pub metadata: SignalMetadata,
}

impl Signal {
    pub fn symbol(&self) -> &str {
        &self.quote.symbol
    }

    pub fn sector(&self) -> &str {
        &self.quote.sector
    }
}

/// A detector inspects one quote and emits at most one signal
pub trait SignalDetector {
    fn detect(&self, quote: &Quote, rng: &mut dyn RandomSource) -> Option<Signal>;
    fn kind(&self) -> SignalKind;
}
