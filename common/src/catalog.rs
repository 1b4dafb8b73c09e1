//! Reference instrument universe (Tadawul large caps) and lookups

use crate::quote::Quote;
use lazy_static::lazy_static;

lazy_static! {
    static ref SAUDI_UNIVERSE: Vec<Quote> = vec![
        quote("2222", "Saudi Aramco", "Energy", 28.50, 0.35, 1.24, "45.2M", "2.1T SAR"),
        quote("1120", "Al Rajhi Bank", "Banking", 85.20, -0.80, -0.93, "12.5M", "255B SAR"),
        quote("2010", "SABIC", "Chemicals", 94.60, 1.20, 1.28, "8.3M", "252B SAR"),
        quote("1180", "Riyad Bank", "Banking", 32.40, 0.15, 0.46, "5.7M", "64.8B SAR"),
        quote("1010", "Saudi National Bank", "Banking", 32.80, -0.25, -0.76, "18.9M", "98.4B SAR"),
        quote("7010", "STC", "Telecommunications", 52.30, 0.60, 1.16, "3.2M", "104.6B SAR"),
        quote("2030", "Saudi Kayan", "Chemicals", 14.82, -0.18, -1.20, "11.4M", "29.6B SAR"),
        quote("2290", "Yanbu Cement", "Construction", 53.70, 0.90, 1.70, "1.8M", "6.4B SAR"),
        quote("2380", "Almarai", "Food & Beverages", 58.20, 0.40, 0.69, "2.1M", "58.2B SAR"),
        quote("4031", "Jarir Marketing", "Retail", 168.40, -2.10, -1.23, "620K", "33.7B SAR"),
        quote("4230", "Red Sea International", "Transportation", 67.50, 1.50, 2.27, "890K", "4.1B SAR"),
        quote("1140", "Bank Albilad", "Banking", 42.35, 0.55, 1.32, "4.8M", "42.4B SAR"),
        quote("2020", "SABIC Agri-Nutrients", "Chemicals", 132.60, -1.40, -1.04, "1.5M", "132.6B SAR"),
        quote("4081", "Dr. Sulaiman Al Habib", "Healthcare", 214.80, 3.20, 1.51, "1.2M", "107.4B SAR"),
        quote("4280", "Kingdom Holding", "Investment", 11.26, -0.14, -1.23, "7.6M", "42.2B SAR"),
        quote("2060", "Advanced Petrochemical", "Chemicals", 56.40, 0.70, 1.26, "2.3M", "33.8B SAR"),
        quote("1182", "Alinma Bank", "Banking", 28.95, 0.25, 0.87, "6.4M", "28.9B SAR"),
        quote("2040", "Petro Rabigh", "Energy", 21.34, -0.46, -2.11, "9.8M", "21.3B SAR"),
        quote("4006", "Etihad Etisalat", "Telecommunications", 38.70, 0.50, 1.31, "3.9M", "38.7B SAR"),
        quote("4002", "Mouwasat Medical", "Healthcare", 156.20, 2.40, 1.56, "450K", "31.2B SAR"),
    ];
}

fn quote(
    symbol: &str,
    name: &str,
    sector: &str,
    price: f64,
    change: f64,
    change_percent: f64,
    volume: &str,
    market_cap: &str,
) -> Quote {
    Quote::new(symbol, name, sector, price, change, change_percent, volume, market_cap)
}

/// The full tracked universe
pub fn universe() -> &'static [Quote] {
    &SAUDI_UNIVERSE
}

/// Case-insensitive match on symbol, name or sector; a blank query returns everything
pub fn search<'a>(quotes: &'a [Quote], query: &str) -> Vec<&'a Quote> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return quotes.iter().collect();
    }

    quotes
        .iter()
        .filter(|q| {
            q.symbol.to_lowercase().contains(&needle)
                || q.name.to_lowercase().contains(&needle)
                || q.sector.to_lowercase().contains(&needle)
        })
        .collect()
}

/// Exact symbol lookup
pub fn by_symbol<'a>(quotes: &'a [Quote], symbol: &str) -> Option<&'a Quote> {
    quotes.iter().find(|q| q.symbol == symbol)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_universe_size_and_unique_symbols() {
        let quotes = universe();
        assert_eq!(quotes.len(), 20);

        let mut symbols: Vec<&str> = quotes.iter().map(|q| q.symbol.as_str()).collect();
        symbols.sort();
        symbols.dedup();
        assert_eq!(symbols.len(), 20);
    }

    #[test]
    fn test_search_matches_sector_and_name() {
        let banks = search(universe(), "banking");
        assert_eq!(banks.len(), 5);

        let sabic = search(universe(), "SABIC");
        assert_eq!(sabic.len(), 2);

        assert_eq!(search(universe(), "   ").len(), 20);
        assert!(search(universe(), "nonexistent").is_empty());
    }

    #[test]
    fn test_by_symbol() {
        let aramco = by_symbol(universe(), "2222").unwrap();
        assert_eq!(aramco.name, "Saudi Aramco");
        assert_eq!(aramco.volume, "45.2M");
        assert!(by_symbol(universe(), "9999").is_none());
    }
}
