//! Monitor runner
//!
//! Wires a quote source, the market scanner and the prediction service
//! into a single pass driven by layered settings.

pub mod runner;
pub mod settings;
pub mod source;

pub use runner::{engine_settings, prediction_targets, quote_source, run_once, MonitorReport};
pub use settings::{
    load_settings, load_settings_with_prefix, MonitorSettings, OutputFormat, ENV_PREFIX,
};
pub use source::{FileQuoteSource, QuoteSource, StaticQuoteSource};
