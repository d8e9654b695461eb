use crate::random::RandomSource;
use crate::resolver::ResolvedAsset;
use crate::{DataQuality, MarketRecord, UtcDateTime};

use super::positive;

const VOLUME_RANGE: (f64, f64) = (10_000_000.0, 110_000_000.0);

/// Fractional jitter bounds applied to the base price.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VolatilityProfile {
    pub current: f64,
    pub previous: f64,
}

impl VolatilityProfile {
    pub const LIVE: Self = Self {
        current: 0.01,
        previous: 0.02,
    };
    pub const ESTIMATED: Self = Self {
        current: 0.05,
        previous: 0.06,
    };

    pub const fn for_quality(quality: DataQuality) -> Self {
        match quality {
            DataQuality::Estimated => Self::ESTIMATED,
            DataQuality::Live | DataQuality::Historical => Self::LIVE,
        }
    }
}

/// Builds the current snapshot from independent perturbations of the base
/// price. `change_percent_24h` is always derived from the same previous
/// price as `change_24h`.
pub fn synthesize<R: RandomSource>(
    asset: &ResolvedAsset,
    rng: &mut R,
    now: UtcDateTime,
) -> MarketRecord {
    let profile = VolatilityProfile::for_quality(asset.data_quality);
    let price = positive(rng.jitter(asset.base_price, profile.current));
    let previous = positive(rng.jitter(asset.base_price, profile.previous));
    let change_24h = price - previous;

    MarketRecord {
        symbol: asset.symbol.clone(),
        name: asset.descriptor.name.clone(),
        asset_type: asset.descriptor.asset_type,
        price,
        change_24h,
        change_percent_24h: change_24h / previous * 100.0,
        market_cap: asset.descriptor.market_cap,
        volume_24h: rng.uniform(VOLUME_RANGE.0, VOLUME_RANGE.1),
        sector: asset.descriptor.sector.clone(),
        last_updated: now,
        data_quality: asset.data_quality,
        estimation_note: asset.estimation_note.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::ScriptedRandom;
    use crate::registry::AssetDescriptor;
    use crate::AssetType;

    fn asset(quality: DataQuality) -> ResolvedAsset {
        ResolvedAsset {
            symbol: String::from("TEST"),
            descriptor: AssetDescriptor::new("Test Corp", AssetType::Stock, Some("Technology"), None),
            base_price: 100.0,
            data_quality: quality,
            estimation_note: None,
        }
    }

    #[test]
    fn change_fields_are_consistent() {
        let mut rng = ScriptedRandom::new(vec![0.9, 0.2, 0.5]);
        let record = synthesize(&asset(DataQuality::Live), &mut rng, UtcDateTime::now());

        let previous = record.price - record.change_24h;
        assert!((record.change_percent_24h - record.change_24h / previous * 100.0).abs() < 1e-9);
        assert!((record.price - 100.8).abs() < 1e-9);
        assert!((previous - 98.8).abs() < 1e-9);
        assert!((record.volume_24h - 60_000_000.0).abs() < 1e-6);
    }

    #[test]
    fn estimated_quality_widens_the_band() {
        let mut rng = ScriptedRandom::constant(0.0);
        let record = synthesize(&asset(DataQuality::Estimated), &mut rng, UtcDateTime::now());
        assert!((record.price - 95.0).abs() < 1e-9);
        assert_eq!(record.data_quality, DataQuality::Estimated);
    }

    #[test]
    fn prices_stay_positive_for_tiny_bases() {
        let mut tiny = asset(DataQuality::Estimated);
        tiny.base_price = 0.0;
        let mut rng = fastrand::Rng::with_seed(3);
        let record = synthesize(&tiny, &mut rng, UtcDateTime::now());
        assert!(record.price > 0.0);
        assert!(record.change_percent_24h.is_finite());
    }
}
