//! Standard heuristic engine
//!
//! Scores volatility from the sector table and price level, sentiment from
//! the symbol checksum blended with the sector bias, and trend strength from
//! the price's position within its ten-unit band. Each horizon then adds a
//! volatility-scaled jitter to a sentiment and trend driven drift.
//!
//! Draw order per stock: volatility, trend, then a jitter draw and a
//! confidence draw for each horizon in [`HORIZONS`] order.

use crate::config::{PredictionConfig, SectorTables};
use crate::engine::{EngineInfo, EngineMode, EngineStatus, PredictionEngine};
use crate::prediction::{
    PredictionBundle, PredictionMetadata, PredictionTimeframe, Timeframes, HORIZONS,
    MAX_KEY_FACTORS,
};
use crate::risk::{Direction, RiskLevel, SentimentDirection};
use chrono::{DateTime, Duration, Utc};
use common::{finite_or_zero, round_to, symbol_checksum_sentiment, RandomSource, StockDescriptor};
use tracing::debug;

/// Scores that drive every horizon of one stock
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarketReading {
    pub volatility: f64,
    pub sentiment: f64,
    pub trend_strength: f64,
}

pub struct StandardEngine {
    tables: SectorTables,
}

impl StandardEngine {
    pub fn new(tables: SectorTables) -> Self {
        Self { tables }
    }

    pub fn tables(&self) -> &SectorTables {
        &self.tables
    }

    /// Sector base plus a price term, jittered by U(0.8, 1.2) and scaled
    pub fn volatility(
        &self,
        stock: &StockDescriptor,
        factor: f64,
        rng: &mut dyn RandomSource,
    ) -> f64 {
        let base = *self.tables.volatility.get(&stock.sector);
        let price_term = usable_price(stock.current_price) / 100.0 * 0.5;
        round_to((base + price_term) * rng.uniform(0.8, 1.2) * factor, 2)
    }

    /// Symbol score in [-1, 1) blended 70/30 with the sector bias
    pub fn sentiment(&self, stock: &StockDescriptor) -> f64 {
        let base = symbol_checksum_sentiment(&stock.symbol) * 2.0 - 1.0;
        let bias = *self.tables.sentiment_bias.get(&stock.sector);
        round_to((base * 0.7 + bias * 0.3).clamp(-1.0, 1.0), 2)
    }

    pub fn trend_strength(&self, stock: &StockDescriptor, rng: &mut dyn RandomSource) -> f64 {
        let position = (usable_price(stock.current_price) % 10.0) / 10.0;
        round_to(position * 0.8 + rng.uniform(0.2, 0.4), 2)
    }

    pub fn read_market(
        &self,
        stock: &StockDescriptor,
        factor: f64,
        rng: &mut dyn RandomSource,
    ) -> MarketReading {
        let volatility = self.volatility(stock, factor, rng);
        let sentiment = self.sentiment(stock);
        let trend_strength = self.trend_strength(stock, rng);
        MarketReading {
            volatility,
            sentiment,
            trend_strength,
        }
    }

    /// Forecast one horizon
    pub fn project(
        &self,
        current_price: f64,
        days_ahead: u32,
        reading: &MarketReading,
        factor: f64,
        now: DateTime<Utc>,
        rng: &mut dyn RandomSource,
    ) -> PredictionTimeframe {
        let drift = base_change(days_ahead, reading.sentiment, reading.trend_strength);
        let jitter = rng.uniform(-reading.volatility, reading.volatility) * factor;
        let change_percent = drift + jitter;

        let base_confidence = 85.0 - reading.volatility * 5.0 - days_ahead as f64 * 0.5;
        let sentiment_boost = reading.sentiment.abs() * 10.0;
        let jitter = rng.uniform(-5.0, 5.0);
        let confidence = (base_confidence + sentiment_boost + jitter).clamp(45.0, 95.0);

        PredictionTimeframe {
            days_ahead,
            target_date: now + Duration::days(days_ahead as i64),
            predicted_price: round_to(current_price * (1.0 + change_percent / 100.0), 2),
            change_percent: round_to(change_percent, 2),
            direction: Direction::from_change(change_percent),
            confidence: round_to(confidence, 1),
        }
    }

    fn key_factors(&self, stock: &StockDescriptor, reading: &MarketReading) -> Vec<String> {
        let mut factors = Vec::new();

        if reading.sentiment > 0.2 {
            factors.push("Strong positive market sentiment".to_string());
        } else if reading.sentiment < -0.2 {
            factors.push("Negative market sentiment".to_string());
        }

        if reading.volatility > 7.0 {
            factors.push("High sector volatility".to_string());
        } else if reading.volatility < 4.0 {
            factors.push("Low volatility environment".to_string());
        }

        factors.extend(self.tables.factors.get(&stock.sector).iter().take(2).cloned());
        factors.push("Historical price patterns".to_string());
        factors.push("Technical indicators".to_string());

        factors.truncate(MAX_KEY_FACTORS);
        factors
    }
}

impl PredictionEngine for StandardEngine {
    fn predict(
        &self,
        stock: &StockDescriptor,
        config: &PredictionConfig,
        rng: &mut dyn RandomSource,
    ) -> PredictionBundle {
        let now = Utc::now();
        let factor = config.effective_volatility_factor();
        let reading = self.read_market(stock, factor, rng);

        let timeframes = Timeframes::from_array(
            HORIZONS.map(|days| {
                self.project(stock.current_price, days, &reading, factor, now, &mut *rng)
            }),
        );

        let range = config.confidence_range;
        let confidence_score = range.clamp(round_to(range.clamp(timeframes.mean_confidence()), 0));
        let risk_level = RiskLevel::assess(reading.volatility, confidence_score);

        debug!(
            symbol = %stock.symbol,
            volatility = reading.volatility,
            sentiment = reading.sentiment,
            confidence = confidence_score,
            risk = %risk_level,
            "Standard prediction"
        );

        PredictionBundle {
            symbol: stock.symbol.clone(),
            current_price: finite_or_zero(stock.current_price),
            generated_at: now,
            mode: EngineMode::Standard,
            timeframes,
            confidence_score,
            risk_level,
            sentiment_score: reading.sentiment,
            sentiment_direction: SentimentDirection::from_score(reading.sentiment),
            metadata: PredictionMetadata {
                volatility_score: reading.volatility,
                trend_strength: reading.trend_strength,
                market_condition: market_condition(reading.sentiment, reading.volatility)
                    .to_string(),
                key_factors: self.key_factors(stock, &reading),
            },
        }
    }

    fn describe(&self) -> EngineInfo {
        EngineInfo {
            name: "Heuristic Prediction Engine".to_string(),
            version: "1.0.0".to_string(),
            mode: EngineMode::Standard,
            status: EngineStatus::Ready,
        }
    }
}

/// Drift in percent before jitter
pub fn base_change(days_ahead: u32, sentiment: f64, trend_strength: f64) -> f64 {
    let sentiment_impact = sentiment * 2.0;
    let trend_impact = (trend_strength - 0.5) * 1.5;
    (sentiment_impact + trend_impact) * (days_ahead as f64).sqrt() * 0.3
}

pub fn market_condition(sentiment: f64, volatility: f64) -> &'static str {
    if volatility > 7.0 {
        if sentiment > 0.0 {
            "Volatile Bullish"
        } else {
            "Volatile Bearish"
        }
    } else if volatility < 4.0 {
        "Stable"
    } else if sentiment > 0.0 {
        "Moderately Bullish"
    } else {
        "Moderately Bearish"
    }
}

// Non-positive and non-finite prices contribute nothing to volatility or trend
fn usable_price(price: f64) -> f64 {
    if price.is_finite() && price > 0.0 {
        price
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::PredictionReport;
    use common::{seeded, FixedSequence};

    fn engine() -> StandardEngine {
        StandardEngine::new(SectorTables::default())
    }

    fn aramco() -> StockDescriptor {
        StockDescriptor::new("2222", "Energy", 28.5).with_name("Saudi Aramco")
    }

    #[test]
    fn test_volatility_uses_sector_table() {
        // (8.5 + 0.1425) * 1.0
        let mut rng = FixedSequence::constant(0.5);
        assert_eq!(engine().volatility(&aramco(), 1.0, &mut rng), 8.64);

        // Unknown sector falls back to 5.0: (5.0 + 0.05) * 0.8
        let mut rng = FixedSequence::constant(0.0);
        let unknown = StockDescriptor::new("X", "Space Mining", 10.0);
        assert_eq!(engine().volatility(&unknown, 1.0, &mut rng), 4.04);
    }

    #[test]
    fn test_volatility_factor_scales() {
        let mut a = FixedSequence::constant(0.5);
        let mut b = FixedSequence::constant(0.5);
        let single = engine().volatility(&aramco(), 1.0, &mut a);
        let double = engine().volatility(&aramco(), 2.0, &mut b);
        assert!((double - single * 2.0).abs() < 0.011);
    }

    #[test]
    fn test_sentiment_blend() {
        // "1120" checksum sentiment 0.98 -> base 0.96; 0.96 * 0.7 + 0.05 * 0.3 = 0.687
        let stock = StockDescriptor::new("1120", "Banking", 85.2);
        assert_eq!(engine().sentiment(&stock), 0.69);
    }

    #[test]
    fn test_sentiment_stays_in_range() {
        for symbol in ["2222", "1120", "7010", "AAAAAAAA", ""] {
            let s = engine().sentiment(&StockDescriptor::new(symbol, "Healthcare", 40.0));
            assert!((-1.0..=1.0).contains(&s));
        }
    }

    #[test]
    fn test_trend_strength() {
        // 28.5 % 10 = 8.5 -> 0.68 + 0.3
        let mut rng = FixedSequence::constant(0.5);
        assert_eq!(engine().trend_strength(&aramco(), &mut rng), 0.98);
    }

    #[test]
    fn test_banking_one_day_is_neutral_with_centred_jitter() {
        let reading = MarketReading {
            volatility: 4.5,
            sentiment: 0.05,
            trend_strength: 0.72,
        };
        // Jitter draw 0.5 is the midpoint of U(-4.5, 4.5)
        let mut rng = FixedSequence::constant(0.5);
        let timeframe = engine().project(85.2, 1, &reading, 1.0, Utc::now(), &mut rng);

        assert_eq!(timeframe.direction, Direction::Neutral);
        assert!(timeframe.change_percent.abs() < 0.5);
        assert!((timeframe.predicted_price - 85.2).abs() < 0.5);
    }

    #[test]
    fn test_projection_target_date() {
        let reading = MarketReading {
            volatility: 5.0,
            sentiment: 0.0,
            trend_strength: 0.5,
        };
        let now = Utc::now();
        let mut rng = FixedSequence::constant(0.5);
        let timeframe = engine().project(50.0, 7, &reading, 1.0, now, &mut rng);

        assert_eq!(timeframe.target_date, now + Duration::days(7));
        assert_eq!(timeframe.change_percent, 0.0);
        // 85 - 25 - 3.5
        assert_eq!(timeframe.confidence, 56.5);
    }

    #[test]
    fn test_draw_count_per_prediction() {
        let mut rng = FixedSequence::constant(0.5);
        engine().predict(&aramco(), &PredictionConfig::default(), &mut rng);
        // volatility + trend + 2 per horizon
        assert_eq!(rng.draws(), 8);
    }

    #[test]
    fn test_confidence_within_configured_range() {
        let stocks = [
            aramco(),
            StockDescriptor::new("1120", "Banking", 85.2),
            StockDescriptor::new("7010", "Telecommunications", 42.1),
            StockDescriptor::new("4190", "Retail", 150.0),
        ];
        let configs = [
            PredictionConfig::default(),
            PredictionConfig::default().with_confidence_range(60.0, 70.0),
            PredictionConfig::default().with_volatility_factor(3.0),
        ];

        let mut rng = seeded(21);
        for config in &configs {
            for stock in &stocks {
                let bundle = engine().predict(stock, config, &mut rng);
                assert!(config.confidence_range.contains(bundle.confidence_score));
                assert!(bundle.timeframes.iter().all(|t| (45.0..=95.0).contains(&t.confidence)));
            }
        }
    }

    #[test]
    fn test_predict_is_reproducible_with_seed() {
        let first = engine().predict(&aramco(), &PredictionConfig::default(), &mut seeded(4));
        let second = engine().predict(&aramco(), &PredictionConfig::default(), &mut seeded(4));

        assert_eq!(first.metadata, second.metadata);
        assert_eq!(first.confidence_score, second.confidence_score);
        let prices = |b: &PredictionBundle| {
            b.timeframes.iter().map(|t| t.predicted_price).collect::<Vec<_>>()
        };
        assert_eq!(prices(&first), prices(&second));
    }

    #[test]
    fn test_key_factors_capped_and_ordered() {
        // Energy at 28.5 with centred draws: volatility 8.64, sentiment from "2222"
        let mut rng = FixedSequence::constant(0.5);
        let bundle = engine().predict(&aramco(), &PredictionConfig::default(), &mut rng);
        let factors = &bundle.metadata.key_factors;

        assert!(factors.len() <= MAX_KEY_FACTORS);
        assert!(factors.contains(&"High sector volatility".to_string()));
        assert!(factors.contains(&"Oil price trends".to_string()));
        assert!(bundle.metadata.market_condition.starts_with("Volatile"));
    }

    #[test]
    fn test_key_factors_unknown_sector() {
        let stock = StockDescriptor::new("1120", "Investment", 5.0);
        let mut rng = FixedSequence::constant(0.5);
        let bundle = engine().predict(&stock, &PredictionConfig::default(), &mut rng);

        // No sector factors for Investment, generic pair always present
        let factors = &bundle.metadata.key_factors;
        assert_eq!(factors.last().map(String::as_str), Some("Technical indicators"));
        assert!(factors.contains(&"Historical price patterns".to_string()));
    }

    #[test]
    fn test_market_condition_bands() {
        assert_eq!(market_condition(0.3, 8.0), "Volatile Bullish");
        assert_eq!(market_condition(-0.3, 8.0), "Volatile Bearish");
        assert_eq!(market_condition(0.3, 3.0), "Stable");
        assert_eq!(market_condition(0.0, 5.0), "Moderately Bearish");
        assert_eq!(market_condition(0.1, 5.0), "Moderately Bullish");
    }

    #[test]
    fn test_non_positive_price_is_volatility_neutral() {
        for price in [0.0, -10.0, f64::NAN] {
            let stock = StockDescriptor::new("2222", "Energy", price);
            let mut rng = FixedSequence::constant(0.5);
            let bundle = engine().predict(&stock, &PredictionConfig::default(), &mut rng);

            assert_eq!(bundle.metadata.volatility_score, 8.5);
            assert_eq!(bundle.metadata.trend_strength, 0.3);
            assert!(bundle.timeframes.iter().all(|t| t.predicted_price.is_finite()));
            assert!(bundle.confidence_score.is_finite());
            assert!(bundle.current_price.is_finite());
        }
    }

    #[test]
    fn test_nan_price_reported_as_zero() {
        let stock = StockDescriptor::new("2222", "Energy", f64::NAN);
        let mut rng = FixedSequence::constant(0.5);
        let bundle = engine().predict(&stock, &PredictionConfig::default(), &mut rng);

        assert_eq!(bundle.current_price, 0.0);
        assert!(!PredictionReport::from(&bundle).to_string().contains("NaN"));
    }

    #[test]
    fn test_describe() {
        let info = engine().describe();
        assert_eq!(info.version, "1.0.0");
        assert_eq!(info.mode, EngineMode::Standard);
    }
}
