// Prediction Report
// Display-ready strings for a bundle: currency-suffixed prices, signed percentages, labels

use crate::prediction::{PredictionBundle, PredictionTimeframe};
use crate::risk::{Direction, RiskLevel};
use common::format_fixed;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const DEFAULT_CURRENCY: &str = "SAR";

/// Label for a confidence percentage
pub fn confidence_level(score: f64) -> &'static str {
    match score {
        s if s >= 80.0 => "Very High",
        s if s >= 70.0 => "High",
        s if s >= 60.0 => "Moderate",
        s if s >= 50.0 => "Low",
        _ => "Very Low",
    }
}

/// "+1.23%", "-0.40%", "0.00%"
pub fn signed_percent(value: f64) -> String {
    let sign = if value > 0.0 { "+" } else { "" };
    format!("{}{}%", sign, format_fixed(value, 2))
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HorizonLine {
    pub label: String,
    pub price: String,
    pub change: String,
    pub direction: Direction,
    pub confidence: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverallLine {
    pub confidence: String,
    pub confidence_level: String,
    pub risk: RiskLevel,
    pub sentiment: String,
    pub condition: String,
}

/// Formatted view of one bundle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionReport {
    pub stock: String,
    pub current: String,
    pub horizons: Vec<HorizonLine>,
    pub overall: OverallLine,
    pub key_factors: Vec<String>,
    pub demo: bool,
}

impl PredictionReport {
    pub fn new(bundle: &PredictionBundle, currency: &str) -> Self {
        let price = |value: f64| format!("{} {}", format_fixed(value, 2), currency);
        let horizon = |timeframe: &PredictionTimeframe| HorizonLine {
            label: format!("{}D", timeframe.days_ahead),
            price: price(timeframe.predicted_price),
            change: signed_percent(timeframe.change_percent),
            direction: timeframe.direction,
            confidence: format!("{}%", timeframe.confidence),
        };

        let condition = if bundle.metadata.market_condition.is_empty() {
            "Unknown".to_string()
        } else {
            bundle.metadata.market_condition.clone()
        };

        Self {
            stock: bundle.symbol.clone(),
            current: price(bundle.current_price),
            horizons: bundle.timeframes.iter().map(horizon).collect(),
            overall: OverallLine {
                confidence: format!("{}%", bundle.confidence_score),
                confidence_level: confidence_level(bundle.confidence_score).to_string(),
                risk: bundle.risk_level,
                sentiment: format!(
                    "{} ({})",
                    bundle.sentiment_direction,
                    format_fixed(bundle.sentiment_score, 2)
                ),
                condition,
            },
            key_factors: bundle.metadata.key_factors.clone(),
            demo: bundle.is_demo(),
        }
    }
}

impl From<&PredictionBundle> for PredictionReport {
    fn from(bundle: &PredictionBundle) -> Self {
        Self::new(bundle, DEFAULT_CURRENCY)
    }
}

impl fmt::Display for PredictionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = if self.demo { " [demo]" } else { "" };
        writeln!(f, "{} @ {}{}", self.stock, self.current, tag)?;
        for line in &self.horizons {
            writeln!(
                f,
                "  {:>3}  {:>12}  {:>8}  {:<7}  {}",
                line.label, line.price, line.change, line.direction, line.confidence
            )?;
        }
        writeln!(
            f,
            "  confidence {} ({}), risk {}, sentiment {}, {}",
            self.overall.confidence,
            self.overall.confidence_level,
            self.overall.risk,
            self.overall.sentiment,
            self.overall.condition
        )?;
        if !self.key_factors.is_empty() {
            write!(f, "  factors: {}", self.key_factors.join("; "))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{PredictionConfig, SectorTables};
    use crate::engine::{EngineMode, PredictionEngine};
    use crate::standard::StandardEngine;
    use common::{FixedSequence, StockDescriptor};

    #[test]
    fn test_confidence_levels() {
        assert_eq!(confidence_level(92.0), "Very High");
        assert_eq!(confidence_level(80.0), "Very High");
        assert_eq!(confidence_level(79.9), "High");
        assert_eq!(confidence_level(60.0), "Moderate");
        assert_eq!(confidence_level(55.0), "Low");
        assert_eq!(confidence_level(49.0), "Very Low");
    }

    #[test]
    fn test_signed_percent() {
        assert_eq!(signed_percent(1.234), "+1.23%");
        assert_eq!(signed_percent(-0.4), "-0.40%");
        assert_eq!(signed_percent(0.0), "0.00%");
    }

    #[test]
    fn test_report_from_bundle() {
        let engine = StandardEngine::new(SectorTables::default());
        let stock = StockDescriptor::new("1120", "Banking", 85.2);
        let mut rng = FixedSequence::constant(0.5);
        let bundle = engine.predict(&stock, &PredictionConfig::default(), &mut rng);
        let report = PredictionReport::from(&bundle);

        assert_eq!(report.stock, "1120");
        assert_eq!(report.current, "85.20 SAR");
        let labels: Vec<&str> = report.horizons.iter().map(|h| h.label.as_str()).collect();
        assert_eq!(labels, vec!["1D", "7D", "30D"]);
        assert!(report.horizons.iter().all(|h| h.price.ends_with(" SAR")));
        assert_eq!(report.overall.sentiment, "Bullish (0.69)");
        assert!(!report.demo);
        assert_eq!(bundle.mode, EngineMode::Standard);

        let text = report.to_string();
        assert!(text.starts_with("1120 @ 85.20 SAR\n"));
        assert!(text.contains("30D"));
    }

    #[test]
    fn test_report_currency_override() {
        let engine = EngineMode::Demo.engine(SectorTables::default());
        let stock = StockDescriptor::new("AAPL", "Technology", 190.0);
        let mut rng = FixedSequence::constant(0.5);
        let bundle = engine.predict(&stock, &PredictionConfig::default(), &mut rng);
        let report = PredictionReport::new(&bundle, "USD");

        assert_eq!(report.current, "190.00 USD");
        assert!(report.demo);
        assert!(report.to_string().contains("[demo]"));
        assert!(report.horizons.iter().all(|h| h.change.starts_with('+')));
    }
}
