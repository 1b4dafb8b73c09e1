//! Quote sources for the runner

use async_trait::async_trait;
use common::{universe, Quote};
use std::path::PathBuf;
use tracing::info;

/// Supplies the quote snapshot a scan runs over
#[async_trait]
pub trait QuoteSource: Send + Sync {
    fn name(&self) -> &str;

    async fn fetch_quotes(&self) -> anyhow::Result<Vec<Quote>>;
}

/// Fixed in-memory quotes
pub struct StaticQuoteSource {
    quotes: Vec<Quote>,
}

impl StaticQuoteSource {
    pub fn new(quotes: Vec<Quote>) -> Self {
        Self { quotes }
    }

    /// The built-in reference universe
    pub fn universe() -> Self {
        Self::new(universe().to_vec())
    }
}

#[async_trait]
impl QuoteSource for StaticQuoteSource {
    fn name(&self) -> &str {
        "static"
    }

    async fn fetch_quotes(&self) -> anyhow::Result<Vec<Quote>> {
        Ok(self.quotes.clone())
    }
}

/// Quotes read from a JSON array on disk
pub struct FileQuoteSource {
    path: PathBuf,
}

impl FileQuoteSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl QuoteSource for FileQuoteSource {
    fn name(&self) -> &str {
        "file"
    }

    async fn fetch_quotes(&self) -> anyhow::Result<Vec<Quote>> {
        let content = tokio::fs::read_to_string(&self.path).await?;
        let quotes: Vec<Quote> = serde_json::from_str(&content)?;
        info!("Loaded {} quotes from {}", quotes.len(), self.path.display());
        Ok(quotes)
    }
}
