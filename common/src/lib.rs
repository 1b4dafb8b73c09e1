//! Shared types for the market scanner and prediction engine.
//!
//! This crate holds everything both computation crates consume:
//! - Quote and StockDescriptor snapshots
//! - The injectable random source used for every jitter draw
//! - Volume display-string parsing and formatting
//! - Symbol checksum helpers
//! - Display rounding
//! - The reference instrument universe

pub mod catalog;
pub mod numeric;
pub mod quote;
pub mod random;
pub mod symbol;
pub mod volume;

pub use catalog::{by_symbol, search, universe};
pub use numeric::{finite_or_zero, format_fixed, round_to};
pub use quote::{Quote, StockDescriptor};
pub use random::{entropy, seeded, shuffle, FixedSequence, RandomSource};
pub use symbol::{symbol_checksum, symbol_checksum_sentiment};
pub use volume::{format_volume, parse_volume};
