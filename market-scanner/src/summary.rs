//! Scan aggregates: strength tally, market heat, and the dashboard summary

use crate::scanner::ScanResult;
use crate::signals::{Signal, SignalKind, SignalStrength};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Counts of emitted signals by kind and strength
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignalTally {
    pub volume: usize,
    pub sentiment: usize,
    pub volatility: usize,
    pub strong: usize,
    pub moderate: usize,
    pub weak: usize,
}

impl SignalTally {
    pub fn record(&mut self, signal: &Signal) {
        match signal.kind {
            SignalKind::Volume => self.volume += 1,
            SignalKind::Sentiment => self.sentiment += 1,
            SignalKind::Volatility => self.volatility += 1,
        }
        match signal.strength {
            SignalStrength::Strong => self.strong += 1,
            SignalStrength::Moderate => self.moderate += 1,
            SignalStrength::Weak => self.weak += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.strong + self.moderate + self.weak
    }

    /// 100 * sum(weights) / (3 * count); 0 with no signals
    pub fn market_heat(&self) -> f64 {
        let count = self.total();
        if count == 0 {
            return 0.0;
        }

        let weights = self.strong * 3 + self.moderate * 2 + self.weak;
        100.0 * weights as f64 / (3 * count) as f64
    }
}

impl<'a> FromIterator<&'a Signal> for SignalTally {
    fn from_iter<I: IntoIterator<Item = &'a Signal>>(iter: I) -> Self {
        let mut tally = SignalTally::default();
        for signal in iter {
            tally.record(signal);
        }
        tally
    }
}

/// Market heat over an arbitrary signal list
pub fn calculate_market_heat(signals: &[Signal]) -> f64 {
    signals.iter().collect::<SignalTally>().market_heat()
}

/// Dashboard summary of a scan
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanSummary {
    /// Distinct symbols across the three ranked lists
    pub total_flagged: usize,
    pub volume_alerts: usize,
    pub volatility_alerts: usize,
    pub sentiment_alerts: usize,
    pub market_heat: f64,
    pub last_updated: DateTime<Utc>,
}

impl ScanSummary {
    pub fn from_result(result: &ScanResult) -> Self {
        let flagged: HashSet<&str> = result
            .volume_signals
            .iter()
            .chain(result.volatility_signals.iter())
            .chain(result.sentiment_signals.iter())
            .map(|s| s.symbol())
            .collect();

        Self {
            total_flagged: flagged.len(),
            volume_alerts: result.volume_signals.len(),
            volatility_alerts: result.volatility_signals.len(),
            sentiment_alerts: result.sentiment_signals.len(),
            market_heat: result.market_heat(),
            last_updated: result.scanned_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scanner::scan_market;
    use crate::signals::SignalMetadata;
    use common::{seeded, universe, Quote};

    fn signal(symbol: &str, kind: SignalKind, strength: SignalStrength) -> Signal {
        Signal {
            quote: Quote::new(symbol, symbol, "Energy", 10.0, 0.0, 0.0, "1M", ""),
            kind,
            strength,
            value: String::new(),
            score: 50.0,
            metadata: SignalMetadata::Volatility { volatility_score: 0.0 },
        }
    }

    #[test]
    fn test_heat_is_zero_without_signals() {
        assert_eq!(calculate_market_heat(&[]), 0.0);
        assert_eq!(SignalTally::default().market_heat(), 0.0);
    }

    #[test]
    fn test_heat_is_hundred_when_all_strong() {
        let signals = vec![
            signal("A", SignalKind::Volume, SignalStrength::Strong),
            signal("B", SignalKind::Sentiment, SignalStrength::Strong),
            signal("C", SignalKind::Volatility, SignalStrength::Strong),
        ];
        assert_eq!(calculate_market_heat(&signals), 100.0);
    }

    #[test]
    fn test_heat_weights() {
        let signals = vec![
            signal("A", SignalKind::Volume, SignalStrength::Strong),
            signal("B", SignalKind::Volume, SignalStrength::Weak),
        ];
        // (3 + 1) / 6
        assert!((calculate_market_heat(&signals) - 66.666_666).abs() < 1e-3);
    }

    #[test]
    fn test_tally_counts_by_kind() {
        let tally: SignalTally = [
            signal("A", SignalKind::Volume, SignalStrength::Strong),
            signal("B", SignalKind::Volatility, SignalStrength::Moderate),
            signal("C", SignalKind::Volatility, SignalStrength::Weak),
        ]
        .iter()
        .collect();

        assert_eq!(tally.volume, 1);
        assert_eq!(tally.volatility, 2);
        assert_eq!(tally.sentiment, 0);
        assert_eq!(tally.total(), 3);
    }

    #[test]
    fn test_summary_counts_distinct_symbols() {
        let mut rng = seeded(5);
        let result = scan_market(universe(), &mut rng);
        let summary = result.summary();

        assert_eq!(summary.volume_alerts, result.volume_signals.len());
        let alerts = summary.volume_alerts + summary.sentiment_alerts + summary.volatility_alerts;
        assert!(summary.total_flagged <= alerts);
        assert!(summary.total_flagged <= universe().len());
        assert_eq!(summary.last_updated, result.scanned_at);
        assert!((0.0..=100.0).contains(&summary.market_heat));
    }
}
