//! Heuristic Prediction Engine
//!
//! Synthesizes 1, 7 and 30 day price forecasts for a stock from sector
//! tables, a symbol checksum sentiment and bounded random jitter. Two
//! engines implement [`PredictionEngine`]:
//!
//! - [`StandardEngine`]: sentiment and volatility driven, can be bearish
//! - [`DemoEngine`]: always-bullish presentation output, labelled as such
//!
//! [`PredictionService`] wraps either engine for async callers.

pub mod config;
pub mod demo;
pub mod engine;
pub mod prediction;
pub mod report;
pub mod risk;
pub mod service;
pub mod standard;

pub use config::{
    create_config_template, load_config, save_config, ConfidenceRange, ConfigError, EngineSettings,
    LatencyRange, PredictionConfig, SectorTable, SectorTables, ServiceConfig, CONFIG_TEMPLATE,
};
pub use demo::{showcase_price_path, DemoEngine, PricePoint};
pub use engine::{EngineInfo, EngineMode, EngineStatus, PredictionEngine};
pub use prediction::{
    PredictionBundle, PredictionMetadata, PredictionTimeframe, Timeframes, HORIZONS,
    MAX_KEY_FACTORS,
};
pub use report::{
    confidence_level, signed_percent, HorizonLine, OverallLine, PredictionReport, DEFAULT_CURRENCY,
};
pub use risk::{Direction, RiskLevel, SentimentDirection};
pub use service::PredictionService;
pub use standard::{base_change, market_condition, MarketReading, StandardEngine};
