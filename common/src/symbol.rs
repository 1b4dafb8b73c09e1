//! Symbol checksum scoring
//!
//! Stand-in for a real sentiment feed: a symbol's character codes are summed
//! into a checksum that is stable across calls. Callers go through these
//! functions so a real data source can replace them without touching the
//! detectors or engines.

/// Sum of the symbol's UTF-16 code units
pub fn symbol_checksum(symbol: &str) -> u64 {
    symbol.encode_utf16().map(u64::from).sum()
}

/// Deterministic pseudo-sentiment in `[0, 1)` with 200 buckets
pub fn symbol_checksum_sentiment(symbol: &str) -> f64 {
    (symbol_checksum(symbol) % 200) as f64 / 200.0
}
