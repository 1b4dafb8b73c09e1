// Signal Filters
// Narrow a ranked signal list by sector or alert band before display

use super::signals::{Signal, SignalStrength};
use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::str::FromStr;
use tracing::debug;

/// Trait for signal filters
pub trait SignalFilter: Send + Sync {
    fn accepts(&self, signal: &Signal) -> bool;
}

/// Keeps signals from one sector; `None` keeps everything
#[derive(Debug, Clone, Default)]
pub struct SectorFilter {
    sector: Option<String>,
}

impl SectorFilter {
    pub fn new(sector: Option<String>) -> Self {
        Self { sector }
    }

    pub fn sector(sector: impl Into<String>) -> Self {
        Self::new(Some(sector.into()))
    }

    /// Accepts everything
    pub fn all() -> Self {
        Self::new(None)
    }
}

impl SignalFilter for SectorFilter {
    fn accepts(&self, signal: &Signal) -> bool {
        match &self.sector {
            Some(sector) => signal.sector() == sector,
            None => true,
        }
    }
}

/// Alert band shown to users, one per strength class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskBand {
    High,
    Medium,
    Low,
}

impl RiskBand {
    /// Strength class covered by this band
    pub fn strength(&self) -> SignalStrength {
        match self {
            RiskBand::High => SignalStrength::Strong,
            RiskBand::Medium => SignalStrength::Moderate,
            RiskBand::Low => SignalStrength::Weak,
        }
    }
}

impl FromStr for RiskBand {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "high" => Ok(RiskBand::High),
            "medium" => Ok(RiskBand::Medium),
            "low" => Ok(RiskBand::Low),
            other => Err(anyhow!("Unknown risk band: {}", other)),
        }
    }
}

/// Keeps signals whose strength matches the band; `None` keeps everything
#[derive(Debug, Clone, Default)]
pub struct RiskBandFilter {
    band: Option<RiskBand>,
}

impl RiskBandFilter {
    pub fn new(band: Option<RiskBand>) -> Self {
        Self { band }
    }
}

impl SignalFilter for RiskBandFilter {
    fn accepts(&self, signal: &Signal) -> bool {
        match self.band {
            Some(band) => signal.strength == band.strength(),
            None => true,
        }
    }
}

/// Combines multiple filters with AND logic
#[derive(Default)]
pub struct CompositeFilter {
    filters: Vec<Box<dyn SignalFilter>>,
}

impl CompositeFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_filter(mut self, filter: Box<dyn SignalFilter>) -> Self {
        self.filters.push(filter);
        self
    }
}

impl SignalFilter for CompositeFilter {
    fn accepts(&self, signal: &Signal) -> bool {
        self.filters.iter().all(|f| f.accepts(signal))
    }
}

/// Signals accepted by `filter`, order preserved
pub fn apply_filter(signals: &[Signal], filter: &dyn SignalFilter) -> Vec<Signal> {
    let kept: Vec<Signal> = signals.iter().filter(|s| filter.accepts(s)).cloned().collect();
    debug!("Filter kept {} of {} signals", kept.len(), signals.len());
    kept
}

/// Sorted distinct sectors present in `signals`
pub fn available_sectors(signals: &[Signal]) -> Vec<String> {
    signals
        .iter()
        .map(|s| s.sector().to_string())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
