//! Prediction engine configuration
//!
//! Everything tunable lives here: per-call prediction options, the
//! sector-keyed constant tables both engines read, and the async service
//! options. Settings load from and save to TOML.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use thiserror::Error;
use tokio::sync::Semaphore;
use tracing::{debug, info};

/// Invalid configuration values
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("confidence range is inverted: min {min} > max {max}")]
    InvertedConfidenceRange { min: f64, max: f64 },

    #[error("confidence bound {0} is outside 0..=100")]
    ConfidenceOutOfBounds(f64),

    #[error("volatility factor must be positive and finite, got {0}")]
    InvalidVolatilityFactor(f64),

    #[error("latency range is inverted: min {min}ms > max {max}ms")]
    InvertedLatencyRange { min: u64, max: u64 },

    #[error("max_concurrency must be at least 1")]
    ZeroConcurrency,

    #[error("max_concurrency {0} exceeds the permit limit {max}", max = Semaphore::MAX_PERMITS)]
    ExcessiveConcurrency(usize),
}

/// Top-level settings file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EngineSettings {
    #[serde(default)]
    pub prediction: PredictionConfig,

    #[serde(default)]
    pub service: ServiceConfig,

    #[serde(default)]
    pub sectors: SectorTables,
}

impl EngineSettings {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.prediction.validate()?;
        self.service.validate()
    }
}

/// Per-call prediction options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionConfig {
    /// Scales the volatility score and the per-horizon jitter
    #[serde(default = "default_volatility_factor")]
    pub volatility_factor: f64,

    /// Seeds the service RNG; unseeded when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub randomness_seed: Option<u64>,

    /// Bounds for the aggregate confidence of the standard engine
    #[serde(default)]
    pub confidence_range: ConfidenceRange,
}

impl Default for PredictionConfig {
    fn default() -> Self {
        Self {
            volatility_factor: default_volatility_factor(),
            randomness_seed: None,
            confidence_range: ConfidenceRange::default(),
        }
    }
}

impl PredictionConfig {
    pub fn with_volatility_factor(mut self, factor: f64) -> Self {
        self.volatility_factor = factor;
        self
    }

    pub fn with_confidence_range(mut self, min: f64, max: f64) -> Self {
        self.confidence_range = ConfidenceRange { min, max };
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.randomness_seed = Some(seed);
        self
    }

    /// Factor actually applied; anything not positive and finite counts as 1
    pub fn effective_volatility_factor(&self) -> f64 {
        if self.volatility_factor.is_finite() && self.volatility_factor > 0.0 {
            self.volatility_factor
        } else {
            debug!("Ignoring volatility factor {}", self.volatility_factor);
            1.0
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.volatility_factor.is_finite() && self.volatility_factor > 0.0) {
            return Err(ConfigError::InvalidVolatilityFactor(self.volatility_factor));
        }
        self.confidence_range.validate()
    }
}

fn default_volatility_factor() -> f64 {
    1.0
}

/// Inclusive bounds on aggregate confidence, in percent
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceRange {
    #[serde(default = "default_confidence_min")]
    pub min: f64,

    #[serde(default = "default_confidence_max")]
    pub max: f64,
}

impl Default for ConfidenceRange {
    fn default() -> Self {
        Self {
            min: default_confidence_min(),
            max: default_confidence_max(),
        }
    }
}

impl ConfidenceRange {
    /// Clamp into the range. Never panics, even on an inverted range.
    pub fn clamp(&self, value: f64) -> f64 {
        value.max(self.min).min(self.max)
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for bound in [self.min, self.max] {
            if !(0.0..=100.0).contains(&bound) {
                return Err(ConfigError::ConfidenceOutOfBounds(bound));
            }
        }
        if self.min > self.max {
            return Err(ConfigError::InvertedConfidenceRange {
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }
}

fn default_confidence_min() -> f64 {
    45.0
}

fn default_confidence_max() -> f64 {
    95.0
}

/// Sector-keyed constant with a fallback for unlisted sectors
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectorTable<T> {
    pub fallback: T,

    #[serde(default)]
    pub entries: BTreeMap<String, T>,
}

impl<T> SectorTable<T> {
    pub fn new(fallback: T) -> Self {
        Self {
            fallback,
            entries: BTreeMap::new(),
        }
    }

    pub fn with(mut self, sector: impl Into<String>, value: T) -> Self {
        self.entries.insert(sector.into(), value);
        self
    }

    /// Value for `sector`, or the fallback
    pub fn get(&self, sector: &str) -> &T {
        self.entries.get(sector).unwrap_or(&self.fallback)
    }

    /// Listed value only, without falling back
    pub fn lookup(&self, sector: &str) -> Option<&T> {
        self.entries.get(sector)
    }

    pub fn contains(&self, sector: &str) -> bool {
        self.entries.contains_key(sector)
    }
}

/// Constant tables read by the engines
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectorTables {
    /// Generic bullish factors the demo engine draws from
    #[serde(default = "default_positive_factors")]
    pub positive_factors: Vec<String>,

    /// Base volatility score per sector
    #[serde(default = "default_sector_volatility")]
    pub volatility: SectorTable<f64>,

    /// Sentiment bias per sector, blended 30% into the symbol score
    #[serde(default = "default_sentiment_bias")]
    pub sentiment_bias: SectorTable<f64>,

    /// Narrative factors for the standard engine
    #[serde(default = "default_sector_factors")]
    pub factors: SectorTable<Vec<String>>,

    /// Narrative factors for the demo engine
    #[serde(default = "default_showcase_factors")]
    pub showcase_factors: SectorTable<Vec<String>>,
}

impl Default for SectorTables {
    fn default() -> Self {
        Self {
            positive_factors: default_positive_factors(),
            volatility: default_sector_volatility(),
            sentiment_bias: default_sentiment_bias(),
            factors: default_sector_factors(),
            showcase_factors: default_showcase_factors(),
        }
    }
}

fn default_sector_volatility() -> SectorTable<f64> {
    SectorTable::new(5.0)
        .with("Energy", 8.5)
        .with("Banking", 4.5)
        .with("Chemicals", 6.0)
        .with("Telecommunications", 3.5)
        .with("Construction", 7.0)
        .with("Food & Beverages", 3.0)
        .with("Retail", 5.5)
        .with("Transportation", 6.5)
        .with("Healthcare", 4.0)
        .with("Investment", 7.5)
}

fn default_sentiment_bias() -> SectorTable<f64> {
    SectorTable::new(0.0)
        .with("Energy", 0.15)
        .with("Banking", 0.05)
        .with("Chemicals", -0.05)
        .with("Telecommunications", 0.20)
        .with("Construction", 0.10)
        .with("Food & Beverages", 0.08)
        .with("Retail", -0.10)
        .with("Transportation", 0.05)
        .with("Healthcare", 0.25)
        .with("Investment", 0.0)
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn default_sector_factors() -> SectorTable<Vec<String>> {
    SectorTable::new(Vec::new())
        .with("Energy", strings(&["Oil price trends", "OPEC production levels"]))
        .with("Banking", strings(&["Interest rate environment", "Credit growth"]))
        .with("Chemicals", strings(&["Commodity prices", "Industrial demand"]))
        .with("Telecommunications", strings(&["5G rollout", "Competition dynamics"]))
        .with("Construction", strings(&["Government spending", "Real estate market"]))
        .with("Healthcare", strings(&["Demographics", "Healthcare spending"]))
        .with("Retail", strings(&["Consumer confidence", "E-commerce growth"]))
}

fn default_showcase_factors() -> SectorTable<Vec<String>> {
    SectorTable::new(Vec::new())
        .with(
            "Energy",
            strings(&[
                "Oil demand recovery",
                "OPEC+ production optimization",
                "Green energy transition leadership",
            ]),
        )
        .with(
            "Banking",
            strings(&[
                "Credit expansion",
                "Digital transformation success",
                "Strong capital ratios",
            ]),
        )
        .with(
            "Chemicals",
            strings(&["Global demand surge", "Capacity expansion", "Export market growth"]),
        )
        .with(
            "Telecommunications",
            strings(&[
                "5G infrastructure rollout",
                "Growing subscriber base",
                "Digital services expansion",
            ]),
        )
        .with(
            "Construction",
            strings(&[
                "Major project wins",
                "Government infrastructure spending",
                "Smart city initiatives",
            ]),
        )
        .with(
            "Healthcare",
            strings(&[
                "Population growth",
                "Medical tourism expansion",
                "Advanced treatment capabilities",
            ]),
        )
        .with(
            "Retail",
            strings(&[
                "E-commerce integration",
                "Consumer spending growth",
                "Market expansion strategy",
            ]),
        )
}

fn default_positive_factors() -> Vec<String> {
    strings(&[
        "Strong institutional buying pressure",
        "Positive earnings momentum",
        "Favorable regulatory environment",
        "Sector outperformance trend",
        "Technical breakout pattern confirmed",
        "Increasing market share",
        "Strategic partnerships announced",
        "Improved financial metrics",
        "Growing investor confidence",
        "Bullish analyst upgrades",
    ])
}

/// Options for the async prediction service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Sleep before each prediction to mimic model inference
    #[serde(default)]
    pub simulate_latency: bool,

    /// Concurrent batch tasks
    #[serde(default = "default_max_concurrency")]
    pub max_concurrency: usize,

    #[serde(default = "default_standard_latency")]
    pub standard_latency: LatencyRange,

    #[serde(default = "default_demo_latency")]
    pub demo_latency: LatencyRange,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            simulate_latency: false,
            max_concurrency: default_max_concurrency(),
            standard_latency: default_standard_latency(),
            demo_latency: default_demo_latency(),
        }
    }
}

impl ServiceConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_concurrency == 0 {
            return Err(ConfigError::ZeroConcurrency);
        }
        if self.max_concurrency > Semaphore::MAX_PERMITS {
            return Err(ConfigError::ExcessiveConcurrency(self.max_concurrency));
        }
        self.standard_latency.validate()?;
        self.demo_latency.validate()
    }
}

fn default_max_concurrency() -> usize {
    8
}

fn default_standard_latency() -> LatencyRange {
    LatencyRange { min_ms: 100, max_ms: 300 }
}

fn default_demo_latency() -> LatencyRange {
    LatencyRange { min_ms: 300, max_ms: 700 }
}

/// Simulated latency bounds in milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LatencyRange {
    pub min_ms: u64,
    pub max_ms: u64,
}

impl LatencyRange {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_ms > self.max_ms {
            return Err(ConfigError::InvertedLatencyRange {
                min: self.min_ms,
                max: self.max_ms,
            });
        }
        Ok(())
    }
}

/// Load and validate settings from a TOML file
pub fn load_config(path: impl AsRef<Path>) -> anyhow::Result<EngineSettings> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)?;
    let settings: EngineSettings = toml::from_str(&content)?;
    settings.validate()?;
    info!("Loaded engine settings from {}", path.display());
    Ok(settings)
}

/// Save settings to a TOML file
pub fn save_config(settings: &EngineSettings, path: impl AsRef<Path>) -> anyhow::Result<()> {
    let content = toml::to_string_pretty(settings)?;
    std::fs::write(path, content)?;
    Ok(())
}

/// Commented starting point for a settings file
pub const CONFIG_TEMPLATE: &str = r#"# Prediction Engine Configuration
# Unlisted keys fall back to built-in defaults

[prediction]
# Scales volatility and per-horizon jitter
volatility_factor = 1.0

# Uncomment for reproducible output
# randomness_seed = 42

[prediction.confidence_range]
# Bounds on aggregate confidence (percent)
min = 45.0
max = 95.0

[service]
# Sleep before each prediction to mimic inference time
simulate_latency = false

# Concurrent batch tasks
max_concurrency = 8

[service.standard_latency]
min_ms = 100
max_ms = 300

[service.demo_latency]
min_ms = 300
max_ms = 700

# Sector base volatility; unlisted sectors use the fallback
[sectors.volatility]
fallback = 5.0

[sectors.volatility.entries]
"Energy" = 8.5
"Banking" = 4.5
"Chemicals" = 6.0
"Telecommunications" = 3.5
"Construction" = 7.0
"Food & Beverages" = 3.0
"Retail" = 5.5
"Transportation" = 6.5
"Healthcare" = 4.0
"Investment" = 7.5
"#;

/// Write [`CONFIG_TEMPLATE`] to `path`
pub fn create_config_template(path: impl AsRef<Path>) -> anyhow::Result<()> {
    std::fs::write(path, CONFIG_TEMPLATE)?;
    Ok(())
}
