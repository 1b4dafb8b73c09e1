//! Market data snapshots

use serde::{Deserialize, Serialize};

/// Immutable snapshot of one instrument's market data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub symbol: String,
    pub name: String,
    pub sector: String,
    pub price: f64,
    pub change: f64,
    pub change_percent: f64,
    /// Display magnitude, e.g. "45.2M" or "620K"
    pub volume: String,
    /// Display string, e.g. "2.1T SAR"
    pub market_cap: String,
}

impl Quote {
    pub fn new(
        symbol: impl Into<String>,
        name: impl Into<String>,
        sector: impl Into<String>,
        price: f64,
        change: f64,
        change_percent: f64,
        volume: impl Into<String>,
        market_cap: impl Into<String>,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            name: name.into(),
            sector: sector.into(),
            price,
            change,
            change_percent,
            volume: volume.into(),
            market_cap: market_cap.into(),
        }
    }
}

/// Input to the prediction engines
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockDescriptor {
    pub symbol: String,
    pub name: String,
    pub sector: String,
    pub current_price: f64,
    #[serde(default)]
    pub volume: Option<String>,
    #[serde(default)]
    pub market_cap: Option<String>,
}

impl StockDescriptor {
    pub fn new(symbol: impl Into<String>, sector: impl Into<String>, current_price: f64) -> Self {
        let symbol = symbol.into();
        Self {
            name: symbol.clone(),
            symbol,
            sector: sector.into(),
            current_price,
            volume: None,
            market_cap: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}

impl From<&Quote> for StockDescriptor {
    fn from(quote: &Quote) -> Self {
        Self {
            symbol: quote.symbol.clone(),
            name: quote.name.clone(),
            sector: quote.sector.clone(),
            current_price: quote.price,
            volume: Some(quote.volume.clone()),
            market_cap: Some(quote.market_cap.clone()),
        }
    }
}
