//! Classification bands for predictions

use serde::{Deserialize, Serialize};
use std::fmt;

/// Overall risk of a prediction
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    /// Band for `volatility * 10 - confidence / 10`
    pub fn from_score(score: f64) -> Self {
        match score {
            s if s > 50.0 => RiskLevel::High,
            s if s > 25.0 => RiskLevel::Medium,
            _ => RiskLevel::Low,
        }
    }

    pub fn assess(volatility: f64, confidence: f64) -> Self {
        Self::from_score(volatility * 10.0 - confidence / 10.0)
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
        };
        f.pad(label)
    }
}

/// Price direction over one horizon
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Neutral,
}

impl Direction {
    /// Moves within half a percent either way are Neutral
    pub fn from_change(change_percent: f64) -> Self {
        if change_percent > 0.5 {
            Direction::Up
        } else if change_percent < -0.5 {
            Direction::Down
        } else {
            Direction::Neutral
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Direction::Up => "Up",
            Direction::Down => "Down",
            Direction::Neutral => "Neutral",
        };
        f.pad(label)
    }
}

/// Sentiment label for a score in [-1, 1]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SentimentDirection {
    Bullish,
    Bearish,
    Neutral,
}

impl SentimentDirection {
    pub fn from_score(score: f64) -> Self {
        if score > 0.15 {
            SentimentDirection::Bullish
        } else if score < -0.15 {
            SentimentDirection::Bearish
        } else {
            SentimentDirection::Neutral
        }
    }
}

impl fmt::Display for SentimentDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SentimentDirection::Bullish => "Bullish",
            SentimentDirection::Bearish => "Bearish",
            SentimentDirection::Neutral => "Neutral",
        };
        f.pad(label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_risk_bands() {
        assert_eq!(RiskLevel::from_score(50.1), RiskLevel::High);
        assert_eq!(RiskLevel::from_score(50.0), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_score(25.0), RiskLevel::Low);
        assert_eq!(RiskLevel::from_score(-3.0), RiskLevel::Low);
    }

    #[test]
    fn test_risk_assess() {
        // 8.5 * 10 - 60 / 10 = 79
        assert_eq!(RiskLevel::assess(8.5, 60.0), RiskLevel::High);
        // 4.5 * 10 - 75 / 10 = 37.5
        assert_eq!(RiskLevel::assess(4.5, 75.0), RiskLevel::Medium);
        assert_eq!(RiskLevel::assess(2.0, 90.0), RiskLevel::Low);
    }

    #[test]
    fn test_direction_threshold() {
        assert_eq!(Direction::from_change(0.51), Direction::Up);
        assert_eq!(Direction::from_change(0.5), Direction::Neutral);
        assert_eq!(Direction::from_change(-0.5), Direction::Neutral);
        assert_eq!(Direction::from_change(-0.51), Direction::Down);
    }

    #[test]
    fn test_sentiment_direction() {
        assert_eq!(SentimentDirection::from_score(0.16), SentimentDirection::Bullish);
        assert_eq!(SentimentDirection::from_score(0.15), SentimentDirection::Neutral);
        assert_eq!(SentimentDirection::from_score(-0.2), SentimentDirection::Bearish);
    }

    #[test]
    fn test_risk_ordering() {
        assert!(RiskLevel::Low < RiskLevel::Medium);
        assert!(RiskLevel::Medium < RiskLevel::High);
    }
}
