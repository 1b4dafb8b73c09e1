// Prediction Engine contract
// Standard and demo engines share one interface, selected by an explicit mode

use crate::config::{LatencyRange, PredictionConfig, SectorTables, ServiceConfig};
use crate::demo::DemoEngine;
use crate::prediction::PredictionBundle;
use crate::standard::StandardEngine;
use anyhow::{anyhow, Result};
use common::{RandomSource, StockDescriptor};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Which engine produced a bundle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EngineMode {
    #[default]
    Standard,
    /// Always-bullish presentation output
    Demo,
}

impl EngineMode {
    pub fn available() -> [EngineMode; 2] {
        [EngineMode::Standard, EngineMode::Demo]
    }

    /// Engine for this mode over the given tables
    pub fn engine(&self, tables: SectorTables) -> Arc<dyn PredictionEngine> {
        match self {
            EngineMode::Standard => Arc::new(StandardEngine::new(tables)),
            EngineMode::Demo => Arc::new(DemoEngine::new(tables)),
        }
    }

    /// Simulated processing time bounds for this mode
    pub fn latency(&self, service: &ServiceConfig) -> LatencyRange {
        match self {
            EngineMode::Standard => service.standard_latency,
            EngineMode::Demo => service.demo_latency,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EngineMode::Standard => "standard",
            EngineMode::Demo => "demo",
        }
    }
}

impl fmt::Display for EngineMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for EngineMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "standard" => Ok(EngineMode::Standard),
            "demo" => Ok(EngineMode::Demo),
            other => Err(anyhow!("Unknown engine mode: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EngineStatus {
    Ready,
    Loading,
    Error,
}

/// Engine descriptor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineInfo {
    pub name: String,
    pub version: String,
    pub mode: EngineMode,
    pub status: EngineStatus,
}

/// Trait for prediction engines
pub trait PredictionEngine: Send + Sync {
    /// Forecast one stock. Every jitter term is drawn from `rng`.
    fn predict(
        &self,
        stock: &StockDescriptor,
        config: &PredictionConfig,
        rng: &mut dyn RandomSource,
    ) -> PredictionBundle;

    fn describe(&self) -> EngineInfo;

    fn mode(&self) -> EngineMode {
        self.describe().mode
    }

    /// Forecast each stock independently, in input order
    fn batch_predict(
        &self,
        stocks: &[StockDescriptor],
        config: &PredictionConfig,
        rng: &mut dyn RandomSource,
    ) -> Vec<PredictionBundle> {
        stocks.iter().map(|stock| self.predict(stock, config, &mut *rng)).collect()
    }
}
