// Market Scanner (signal layer)
// Derives volume, sentiment and volatility signals from quote snapshots and ranks them

pub mod filters;
pub mod scanner;
pub mod signals;
pub mod summary;

pub use filters::{
    apply_filter, available_sectors, CompositeFilter, RiskBand, RiskBandFilter, SectorFilter,
    SignalFilter,
};
pub use scanner::{scan_market, MarketScanner, ScanResult, ScannerConfig};
pub use signals::{
    SentimentDetectorConfig, SentimentSpikeDetector, Signal, SignalDetector, SignalKind,
    SignalMetadata, SignalStrength, VolatilityDetector, VolatilityDetectorConfig,
    VolumeDetectorConfig, VolumeSpikeDetector,
};
pub use summary::{calculate_market_heat, ScanSummary, SignalTally};
