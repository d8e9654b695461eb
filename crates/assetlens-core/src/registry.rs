//! Canonical registry of known symbols.
//!
//! The table is immutable once built. Lookups are exact, case-insensitive
//! and O(1); a miss is the normal trigger for the fallback synthesizer.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::AssetType;

/// Static description of an asset, independent of its price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetDescriptor {
    pub name: String,
    #[serde(rename = "type")]
    pub asset_type: AssetType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sector: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub market_cap: Option<f64>,
}

impl AssetDescriptor {
    pub fn new(
        name: impl Into<String>,
        asset_type: AssetType,
        sector: Option<&str>,
        market_cap: Option<f64>,
    ) -> Self {
        Self {
            name: name.into(),
            asset_type,
            sector: sector.map(str::to_owned),
            market_cap,
        }
    }
}

/// One registry row: descriptor plus its separately stored base price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegistryEntry {
    pub symbol: String,
    pub descriptor: AssetDescriptor,
    pub base_price: f64,
}

/// Owned symbol → descriptor table.
#[derive(Debug, Clone, PartialEq)]
pub struct Registry {
    entries: Vec<RegistryEntry>,
    index: HashMap<String, usize>,
}

impl Default for Registry {
    fn default() -> Self {
        Self::canonical()
    }
}

impl Registry {
    /// Builds a registry from rows; later duplicates replace earlier ones.
    pub fn from_entries(entries: impl IntoIterator<Item = RegistryEntry>) -> Self {
        let mut rows: Vec<RegistryEntry> = Vec::new();
        let mut index = HashMap::new();

        for mut entry in entries {
            entry.symbol = entry.symbol.trim().to_ascii_uppercase();
            match index.get(&entry.symbol) {
                Some(&position) => rows[position] = entry,
                None => {
                    index.insert(entry.symbol.clone(), rows.len());
                    rows.push(entry);
                }
            }
        }

        Self {
            entries: rows,
            index,
        }
    }

    /// The curated stock, crypto and forex table.
    pub fn canonical() -> Self {
        use AssetType::{Crypto, Forex, Stock};

        let rows: [(&str, &str, AssetType, &str, Option<f64>, f64); 28] = [
            ("AAPL", "Apple Inc.", Stock, "Technology", Some(2.8e12), 175.84),
            ("TSLA", "Tesla Inc.", Stock, "Electric Vehicles", Some(7.892e11), 248.50),
            ("MSFT", "Microsoft Corporation", Stock, "Technology", Some(2.9e12), 378.85),
            ("GOOGL", "Alphabet Inc.", Stock, "Technology", Some(1.7e12), 142.56),
            ("AMZN", "Amazon.com Inc.", Stock, "E-commerce", Some(1.5e12), 155.89),
            ("META", "Meta Platforms Inc.", Stock, "Social Media", Some(8.0e11), 485.22),
            ("NVDA", "NVIDIA Corporation", Stock, "Semiconductors", Some(1.8e12), 875.28),
            ("NFLX", "Netflix Inc.", Stock, "Streaming", Some(1.8e11), 425.67),
            ("AMD", "Advanced Micro Devices", Stock, "Semiconductors", Some(2.4e11), 145.23),
            ("INTC", "Intel Corporation", Stock, "Semiconductors", Some(2.0e11), 48.92),
            ("BTC", "Bitcoin", Crypto, "Digital Currency", Some(8.472e11), 43_250.00),
            ("ETH", "Ethereum", Crypto, "Smart Contracts", Some(3.185e11), 2_650.00),
            ("BNB", "Binance Coin", Crypto, "Exchange Token", Some(8.5e10), 315.45),
            ("ADA", "Cardano", Crypto, "Smart Contracts", Some(4.5e10), 0.52),
            ("SOL", "Solana", Crypto, "Smart Contracts", Some(7.8e10), 98.75),
            ("XRP", "Ripple", Crypto, "Payment Protocol", Some(3.5e10), 0.63),
            ("DOT", "Polkadot", Crypto, "Interoperability", Some(1.2e10), 7.85),
            ("AVAX", "Avalanche", Crypto, "Smart Contracts", Some(1.5e10), 38.92),
            ("MATIC", "Polygon", Crypto, "Layer 2", Some(8.0e9), 0.89),
            ("LINK", "Chainlink", Crypto, "Oracle Network", Some(9.0e9), 15.67),
            ("EURUSD", "Euro / US Dollar", Forex, "Major Pairs", None, 1.0875),
            ("GBPUSD", "British Pound / US Dollar", Forex, "Major Pairs", None, 1.2654),
            ("USDJPY", "US Dollar / Japanese Yen", Forex, "Major Pairs", None, 149.85),
            ("USDCHF", "US Dollar / Swiss Franc", Forex, "Major Pairs", None, 0.8756),
            ("AUDUSD", "Australian Dollar / US Dollar", Forex, "Major Pairs", None, 0.6589),
            ("USDCAD", "US Dollar / Canadian Dollar", Forex, "Major Pairs", None, 1.3456),
            ("NZDUSD", "New Zealand Dollar / US Dollar", Forex, "Major Pairs", None, 0.6123),
            ("EURGBP", "Euro / British Pound", Forex, "Cross Pairs", None, 0.8598),
        ];

        Self::from_entries(rows.into_iter().map(
            |(symbol, name, asset_type, sector, market_cap, base_price)| RegistryEntry {
                symbol: symbol.to_owned(),
                descriptor: AssetDescriptor::new(name, asset_type, Some(sector), market_cap),
                base_price,
            },
        ))
    }

    pub fn lookup(&self, symbol: &str) -> Option<&RegistryEntry> {
        let key = symbol.trim().to_ascii_uppercase();
        self.index.get(&key).map(|&position| &self.entries[position])
    }

    /// Rows whose symbol or name contains `query`, in table order.
    pub fn search(&self, query: &str) -> Vec<&RegistryEntry> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }

        self.entries
            .iter()
            .filter(|entry| {
                entry.symbol.to_lowercase().contains(&needle)
                    || entry.descriptor.name.to_lowercase().contains(&needle)
            })
            .collect()
    }

    pub fn entries(&self) -> &[RegistryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn looks_up_case_insensitively() {
        let registry = Registry::canonical();
        let entry = registry.lookup(" aapl ").expect("AAPL is curated");
        assert_eq!(entry.descriptor.sector.as_deref(), Some("Technology"));
        assert_eq!(entry.descriptor.asset_type, AssetType::Stock);
        assert_eq!(entry.base_price, 175.84);
    }

    #[test]
    fn unknown_symbol_is_a_miss_not_an_error() {
        assert!(Registry::canonical().lookup("ZZZQ123").is_none());
    }

    #[test]
    fn search_matches_symbol_or_name_in_table_order() {
        let registry = Registry::canonical();
        let symbols: Vec<&str> = registry
            .search("micro")
            .iter()
            .map(|entry| entry.symbol.as_str())
            .collect();
        assert_eq!(symbols, vec!["MSFT", "AMD"]);
        assert!(registry.search("   ").is_empty());
    }

    #[test]
    fn later_duplicates_replace_earlier_rows() {
        let row = |price| RegistryEntry {
            symbol: String::from("abc"),
            descriptor: AssetDescriptor::new("Abc", AssetType::Stock, None, None),
            base_price: price,
        };
        let registry = Registry::from_entries([row(1.0), row(2.0)]);
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.lookup("ABC").map(|entry| entry.base_price), Some(2.0));
    }
}
