//! Prediction output types

use crate::engine::EngineMode;
use crate::risk::{Direction, RiskLevel, SentimentDirection};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Days ahead for each forecast horizon
pub const HORIZONS: [u32; 3] = [1, 7, 30];

/// Forecast for one horizon
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionTimeframe {
    pub days_ahead: u32,
    pub target_date: DateTime<Utc>,
    pub predicted_price: f64,
    pub change_percent: f64,
    pub direction: Direction,
    pub confidence: f64,
}

/// The three horizons of a bundle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Timeframes {
    pub one_day: PredictionTimeframe,
    pub seven_day: PredictionTimeframe,
    pub thirty_day: PredictionTimeframe,
}

impl Timeframes {
    /// Build from per-horizon forecasts in [`HORIZONS`] order
    pub fn from_array([one_day, seven_day, thirty_day]: [PredictionTimeframe; 3]) -> Self {
        Self {
            one_day,
            seven_day,
            thirty_day,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &PredictionTimeframe> {
        [&self.one_day, &self.seven_day, &self.thirty_day].into_iter()
    }

    pub fn mean_confidence(&self) -> f64 {
        self.iter().map(|t| t.confidence).sum::<f64>() / 3.0
    }
}

/// Narrative and intermediate scores behind a bundle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionMetadata {
    pub volatility_score: f64,
    pub trend_strength: f64,
    pub market_condition: String,
    /// At most five entries
    pub key_factors: Vec<String>,
}

/// Multi-horizon forecast for one stock
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionBundle {
    pub symbol: String,
    pub current_price: f64,
    pub generated_at: DateTime<Utc>,
    /// Engine that produced this bundle; demo output is always labelled
    pub mode: EngineMode,
    pub timeframes: Timeframes,
    pub confidence_score: f64,
    pub risk_level: RiskLevel,
    pub sentiment_score: f64,
    pub sentiment_direction: SentimentDirection,
    pub metadata: PredictionMetadata,
}

impl PredictionBundle {
    pub fn is_demo(&self) -> bool {
        self.mode == EngineMode::Demo
    }
}

/// Maximum key factors on a bundle
pub const MAX_KEY_FACTORS: usize = 5;
