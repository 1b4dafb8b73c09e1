//! Demo engine
//!
//! Presentation mode: every horizon is bullish, confidence stays within
//! 85-98, risk is Low or occasionally Medium, and key factors come only from
//! the positive pools. Bundles are labelled [`EngineMode::Demo`].
//!
//! Draw order per stock: a growth draw and a confidence draw for each
//! horizon, then aggregate confidence, sentiment, risk, volatility and trend,
//! then the sector factor shuffle (known sectors only) and the generic shuffle.

use crate::config::{PredictionConfig, SectorTables};
use crate::engine::{EngineInfo, EngineMode, EngineStatus, PredictionEngine};
use crate::prediction::{
    PredictionBundle, PredictionMetadata, PredictionTimeframe, Timeframes, HORIZONS,
    MAX_KEY_FACTORS,
};
use crate::risk::{Direction, RiskLevel, SentimentDirection};
use chrono::{DateTime, Duration, Utc};
use common::{finite_or_zero, round_to, shuffle, RandomSource, StockDescriptor};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use tracing::debug;

const MARKET_CONDITION: &str = "Strong Bullish Momentum";

pub struct DemoEngine {
    tables: SectorTables,
}

impl DemoEngine {
    pub fn new(tables: SectorTables) -> Self {
        Self { tables }
    }

    /// Bullish forecast for one horizon
    pub fn project(
        &self,
        current_price: f64,
        days_ahead: u32,
        now: DateTime<Utc>,
        rng: &mut dyn RandomSource,
    ) -> PredictionTimeframe {
        let days = days_ahead as f64;
        let growth = rng.uniform(1.5, 4.5) * days.sqrt() * 0.8;
        let confidence = (92.0 - days * 0.15 + rng.uniform(-1.0, 2.0)).clamp(85.0, 98.0);

        PredictionTimeframe {
            days_ahead,
            target_date: now + Duration::days(days_ahead as i64),
            predicted_price: round_to(current_price * (1.0 + growth / 100.0), 2),
            change_percent: round_to(growth, 2),
            direction: Direction::Up,
            confidence: round_to(confidence, 1),
        }
    }

    fn key_factors(&self, stock: &StockDescriptor, rng: &mut dyn RandomSource) -> Vec<String> {
        let mut factors = Vec::new();

        if let Some(sector_factors) = self.tables.showcase_factors.lookup(&stock.sector) {
            let mut pool = sector_factors.clone();
            shuffle(rng, &mut pool);
            factors.extend(pool.into_iter().take(2));
        }

        let mut pool = self.tables.positive_factors.clone();
        shuffle(rng, &mut pool);
        factors.extend(pool.into_iter().take(3));

        factors.truncate(MAX_KEY_FACTORS);
        factors
    }
}

impl PredictionEngine for DemoEngine {
    /// Ignores `config`: demo output is fixed-shape regardless of tuning
    fn predict(
        &self,
        stock: &StockDescriptor,
        _config: &PredictionConfig,
        rng: &mut dyn RandomSource,
    ) -> PredictionBundle {
        let now = Utc::now();
        let timeframes = Timeframes::from_array(
            HORIZONS.map(|days| self.project(stock.current_price, days, now, &mut *rng)),
        );

        let confidence_score = round_to(rng.uniform(88.0, 96.0), 0);
        let sentiment_score = round_to(rng.uniform(0.65, 0.95), 2);
        let risk_level = if rng.uniform(0.0, 100.0) > 85.0 {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        };
        let volatility_score = round_to(rng.uniform(2.5, 4.5), 2);
        let trend_strength = round_to(rng.uniform(0.75, 0.95), 2);
        let key_factors = self.key_factors(stock, rng);

        debug!(
            symbol = %stock.symbol,
            confidence = confidence_score,
            risk = %risk_level,
            "Demo prediction"
        );

        PredictionBundle {
            symbol: stock.symbol.clone(),
            current_price: finite_or_zero(stock.current_price),
            generated_at: now,
            mode: EngineMode::Demo,
            timeframes,
            confidence_score,
            risk_level,
            sentiment_score,
            sentiment_direction: SentimentDirection::Bullish,
            metadata: PredictionMetadata {
                volatility_score,
                trend_strength,
                market_condition: MARKET_CONDITION.to_string(),
                key_factors,
            },
        }
    }

    fn describe(&self) -> EngineInfo {
        EngineInfo {
            name: "Heuristic Prediction Engine - Demo Mode".to_string(),
            version: "2.0.0-demo".to_string(),
            mode: EngineMode::Demo,
            status: EngineStatus::Ready,
        }
    }
}

/// One point of a chart series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: DateTime<Utc>,
    pub price: f64,
}

/// Smooth rising history ending `days` after `now - days`.
///
/// Starts at 85% of `current_price` and compounds towards 125%, with a
/// small sine wave and linear lift on top. One point per day, `days + 1`
/// points in total. `days == 0` yields the current price alone; a span
/// reaching past the representable date range yields no points.
pub fn showcase_price_path(current_price: f64, days: u32, now: DateTime<Utc>) -> Vec<PricePoint> {
    if days == 0 {
        return vec![PricePoint {
            date: now,
            price: round_to(current_price, 2),
        }];
    }

    let Some(start) = now.checked_sub_signed(Duration::days(i64::from(days))) else {
        debug!(days, "Showcase span out of date range");
        return Vec::new();
    };
    let floor = current_price * 0.85;
    let target = current_price * 1.25;
    let growth_rate = (target / floor).powf(1.0 / days as f64);

    (0..=days)
        .map(|i| {
            let progress = i as f64 / days as f64;
            let base = floor * growth_rate.powf(i as f64);
            let wave = (progress * PI * 4.0).sin() * current_price * 0.01;
            let lift = progress * current_price * 0.02;

            PricePoint {
                date: start + Duration::days(i64::from(i)),
                price: round_to(base + wave + lift, 2),
            }
        })
        .collect()
}
