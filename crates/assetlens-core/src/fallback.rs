//! Fallback descriptor synthesis for symbols outside the registry.
//!
//! [`FallbackTable::synthesize`] is total: any string, empty or not, yields
//! a usable descriptor and a positive base price.

use crate::random::RandomSource;
use crate::registry::AssetDescriptor;
use crate::{AssetSymbol, AssetType};

/// Per-category defaults for synthesized assets.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryProfile {
    pub key: &'static str,
    pub base_price: f64,
    pub market_cap: Option<f64>,
    /// Lowercase substrings of the free-text name that select this category.
    pub keywords: &'static [&'static str],
}

impl CategoryProfile {
    const fn new(
        key: &'static str,
        base_price: f64,
        market_cap: Option<f64>,
        keywords: &'static [&'static str],
    ) -> Self {
        Self {
            key,
            base_price,
            market_cap,
            keywords,
        }
    }

    /// Sector label shown on synthesized records, e.g. `Layer1`.
    pub fn sector_label(&self) -> String {
        let mut chars = self.key.chars();
        match chars.next() {
            Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
            None => String::new(),
        }
    }
}

/// Descriptor produced for an unknown symbol.
#[derive(Debug, Clone, PartialEq)]
pub struct SynthesizedDescriptor {
    pub descriptor: AssetDescriptor,
    pub base_price: f64,
    pub category: &'static str,
}

/// Owned category → profile table, grouped by asset type.
///
/// Within a type, categories are tried in order and the first keyword hit
/// wins; the default applies when nothing matches.
#[derive(Debug, Clone, PartialEq)]
pub struct FallbackTable {
    stock: Vec<CategoryProfile>,
    stock_default: CategoryProfile,
    crypto: Vec<CategoryProfile>,
    crypto_default: CategoryProfile,
    forex_major: CategoryProfile,
    forex_minor: CategoryProfile,
}

impl Default for FallbackTable {
    fn default() -> Self {
        Self {
            stock: vec![
                CategoryProfile::new("energy", 90.0, Some(1.5e11), &["energy", "oil"]),
                CategoryProfile::new("finance", 80.0, Some(2.0e11), &["bank", "finance"]),
                CategoryProfile::new("healthcare", 120.0, Some(3.0e11), &["health", "pharma"]),
                CategoryProfile::new("retail", 60.0, Some(1.0e11), &["retail", "store", "shop"]),
            ],
            stock_default: CategoryProfile::new("technology", 150.0, Some(5.0e11), &[]),
            crypto: vec![
                CategoryProfile::new(
                    "layer2",
                    15.0,
                    Some(1.5e9),
                    &["layer 2", "layer2", "rollup"],
                ),
                CategoryProfile::new("layer1", 45.0, Some(5.0e9), &["layer", "chain"]),
                CategoryProfile::new("meme", 0.05, Some(5.0e8), &["meme", "dog"]),
                CategoryProfile::new("gaming", 8.0, Some(8.0e8), &["game", "nft"]),
            ],
            crypto_default: CategoryProfile::new("defi", 25.0, Some(2.0e9), &[]),
            forex_major: CategoryProfile::new("major", 1.1, None, &[]),
            forex_minor: CategoryProfile::new("minor", 0.85, None, &[]),
        }
    }
}

impl FallbackTable {
    /// Picks the category profile for an unknown asset.
    pub fn category_for(
        &self,
        symbol: &AssetSymbol,
        name: Option<&str>,
        asset_type: AssetType,
    ) -> &CategoryProfile {
        let haystack = name.map(str::to_lowercase).unwrap_or_default();
        let by_keyword = |profiles: &[CategoryProfile]| -> Option<usize> {
            profiles.iter().position(|profile| {
                profile
                    .keywords
                    .iter()
                    .any(|keyword| haystack.contains(keyword))
            })
        };

        match asset_type {
            AssetType::Stock => match by_keyword(self.stock.as_slice()) {
                Some(position) => &self.stock[position],
                None => &self.stock_default,
            },
            AssetType::Crypto => match by_keyword(self.crypto.as_slice()) {
                Some(position) => &self.crypto[position],
                None => &self.crypto_default,
            },
            AssetType::Forex if symbol.as_str().contains("USD") => &self.forex_major,
            AssetType::Forex => &self.forex_minor,
        }
    }

    /// Synthesizes a descriptor and base price. Never fails.
    ///
    /// The base price is the category price scaled by `uniform(0.8, 1.2)`.
    pub fn synthesize<R: RandomSource>(
        &self,
        symbol: &AssetSymbol,
        name: Option<&str>,
        asset_type: AssetType,
        rng: &mut R,
    ) -> SynthesizedDescriptor {
        let name = name.map(str::trim).filter(|name| !name.is_empty());
        let profile = self.category_for(symbol, name, asset_type);

        let display_name = match name {
            Some(name) => name.to_owned(),
            None => {
                let suffix = match asset_type {
                    AssetType::Forex => "Currency Pair",
                    AssetType::Crypto => "Token",
                    AssetType::Stock => "Corporation",
                };
                format!("{symbol} {suffix}").trim().to_owned()
            }
        };

        SynthesizedDescriptor {
            descriptor: AssetDescriptor {
                name: display_name,
                asset_type,
                sector: Some(profile.sector_label()),
                market_cap: profile.market_cap,
            },
            base_price: profile.base_price * rng.uniform(0.8, 1.2),
            category: profile.key,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::ScriptedRandom;

    fn synth(symbol: &str, name: Option<&str>, asset_type: AssetType) -> SynthesizedDescriptor {
        FallbackTable::default().synthesize(
            &AssetSymbol::new(symbol),
            name,
            asset_type,
            &mut ScriptedRandom::constant(0.5),
        )
    }

    #[test]
    fn defaults_per_type_without_keywords() {
        let stock = synth("ZZZQ123", None, AssetType::Stock);
        assert_eq!(stock.category, "technology");
        assert_eq!(stock.descriptor.name, "ZZZQ123 Corporation");
        assert_eq!(stock.descriptor.sector.as_deref(), Some("Technology"));
        assert!((stock.base_price - 150.0).abs() < 1e-9);

        assert_eq!(synth("NEWCOIN", None, AssetType::Crypto).category, "defi");
    }

    #[test]
    fn keywords_in_name_select_category() {
        assert_eq!(
            synth("XOM2", Some("Big Oil Holdings"), AssetType::Stock).category,
            "energy"
        );
        assert_eq!(
            synth("PHX", Some("Phoenix Pharma"), AssetType::Stock).category,
            "healthcare"
        );
        assert_eq!(
            synth("SHOPZ", Some("Corner Store Group"), AssetType::Stock).category,
            "retail"
        );
        assert_eq!(
            synth("WOOF", Some("Dog Meme Token"), AssetType::Crypto).category,
            "meme"
        );
        assert_eq!(
            synth("ROLL", Some("Fast Rollup Network"), AssetType::Crypto).category,
            "layer2"
        );
        assert_eq!(
            synth("NEWL", Some("New Chain"), AssetType::Crypto).category,
            "layer1"
        );
    }

    #[test]
    fn forex_category_depends_on_usd_presence() {
        let major = synth("USDXYZ", None, AssetType::Forex);
        assert_eq!(major.category, "major");
        assert_eq!(major.descriptor.name, "USDXYZ Currency Pair");
        assert!(major.descriptor.market_cap.is_none());
        assert_eq!(synth("CHFJPY", None, AssetType::Forex).category, "minor");
    }

    #[test]
    fn base_price_is_scaled_within_band() {
        let table = FallbackTable::default();
        let symbol = AssetSymbol::new("ANY");
        let low = table.synthesize(&symbol, None, AssetType::Stock, &mut ScriptedRandom::constant(0.0));
        let high =
            table.synthesize(&symbol, None, AssetType::Stock, &mut ScriptedRandom::constant(0.999));
        assert!((low.base_price - 120.0).abs() < 1e-9);
        assert!(high.base_price < 180.0 && high.base_price > 179.0);
    }

    #[test]
    fn empty_input_still_yields_descriptor() {
        let empty = synth("", Some("   "), AssetType::Stock);
        assert_eq!(empty.descriptor.name, "Corporation");
        assert!(empty.base_price > 0.0);
    }
}
