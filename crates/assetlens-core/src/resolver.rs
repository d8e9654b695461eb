//! Registry-or-fallback resolution of a free-form identifier.

use serde::Serialize;
use tracing::debug;

use crate::classifier::classify;
use crate::fallback::FallbackTable;
use crate::random::RandomSource;
use crate::registry::{AssetDescriptor, Registry, RegistryEntry};
use crate::{AssetSymbol, AssetType, DataQuality};

/// Descriptor, base price and provenance for one request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedAsset {
    pub symbol: String,
    pub descriptor: AssetDescriptor,
    pub base_price: f64,
    pub data_quality: DataQuality,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimation_note: Option<String>,
}

impl ResolvedAsset {
    /// Live resolution backed by a registry row.
    pub fn from_entry(entry: &RegistryEntry) -> Self {
        Self {
            symbol: entry.symbol.clone(),
            descriptor: entry.descriptor.clone(),
            base_price: entry.base_price,
            data_quality: DataQuality::Live,
            estimation_note: None,
        }
    }

    pub fn asset_type(&self) -> AssetType {
        self.descriptor.asset_type
    }

    /// True when the descriptor came from the fallback synthesizer.
    pub fn is_estimated(&self) -> bool {
        self.data_quality == DataQuality::Estimated
    }
}

/// Resolves `symbol` against the registry, synthesizing a descriptor on a
/// miss. Total over all inputs.
pub fn resolve<R: RandomSource>(
    registry: &Registry,
    fallback: &FallbackTable,
    symbol: &AssetSymbol,
    name: Option<&str>,
    rng: &mut R,
) -> ResolvedAsset {
    if let Some(entry) = registry.lookup(symbol.as_str()) {
        debug!(symbol = %symbol, "resolved from registry");
        return ResolvedAsset::from_entry(entry);
    }

    let asset_type = classify(symbol.raw());
    let synthesized = fallback.synthesize(symbol, name, asset_type, rng);
    debug!(
        symbol = %symbol,
        asset_type = %asset_type,
        category = synthesized.category,
        "registry miss, synthesized fallback descriptor"
    );

    let basis = match asset_type {
        AssetType::Forex => String::from("currency pair"),
        AssetType::Crypto | AssetType::Stock => {
            format!("{} sector", synthesized.category)
        }
    };

    ResolvedAsset {
        symbol: symbol.as_str().to_owned(),
        descriptor: synthesized.descriptor,
        base_price: synthesized.base_price,
        data_quality: DataQuality::Estimated,
        estimation_note: Some(format!(
            "Live data limited; using {basis} averages and model estimation"
        )),
    }
}
