//! Runner settings
//!
//! Layered with the `config` crate: built-in defaults, then an optional TOML
//! file, then `MONITOR_*` environment variables (`MONITOR_MODE=demo`,
//! `MONITOR_SYMBOLS=2222,1120`).

use config::{Config, Environment, File};
use prediction_engine::EngineMode;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const ENV_PREFIX: &str = "MONITOR";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonitorSettings {
    /// Default tracing filter; `RUST_LOG` takes precedence
    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub mode: EngineMode,

    /// Seeds the scan and, unless the engine file sets one, the predictions
    #[serde(default)]
    pub seed: Option<u64>,

    #[serde(default)]
    pub format: OutputFormat,

    /// Keep only combined signals from this sector
    #[serde(default)]
    pub sector: Option<String>,

    /// Keep only combined signals in this band (High, Medium, Low)
    #[serde(default)]
    pub band: Option<String>,

    /// Symbols to predict; empty predicts the top flagged symbols
    #[serde(default)]
    pub symbols: Vec<String>,

    /// Flagged symbols to predict when `symbols` is empty
    #[serde(default = "default_predict_limit")]
    pub predict_limit: usize,

    /// JSON array of quotes; the built-in universe when absent
    #[serde(default)]
    pub quotes_file: Option<PathBuf>,

    /// Prediction engine TOML settings; engine defaults when absent
    #[serde(default)]
    pub engine_config: Option<PathBuf>,
}

impl Default for MonitorSettings {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            mode: EngineMode::default(),
            seed: None,
            format: OutputFormat::default(),
            sector: None,
            band: None,
            symbols: Vec::new(),
            predict_limit: default_predict_limit(),
            quotes_file: None,
            engine_config: None,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_predict_limit() -> usize {
    5
}

/// Load settings from an optional file plus `MONITOR_*` variables
pub fn load_settings(path: Option<&Path>) -> anyhow::Result<MonitorSettings> {
    load_settings_with_prefix(path, ENV_PREFIX)
}

pub fn load_settings_with_prefix(
    path: Option<&Path>,
    prefix: &str,
) -> anyhow::Result<MonitorSettings> {
    let mut builder = Config::builder();

    if let Some(path) = path {
        builder = builder.add_source(File::from(path).required(true));
    }

    let settings = builder
        .add_source(
            Environment::with_prefix(prefix)
                .prefix_separator("_")
                .try_parsing(true)
                .list_separator(",")
                .with_list_parse_key("symbols"),
        )
        .build()?
        .try_deserialize::<MonitorSettings>()?;

    Ok(settings)
}
