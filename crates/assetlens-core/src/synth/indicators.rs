//! Placeholder technical indicators.
//!
//! No price history is retained, so the values are draws around the base
//! price rather than computations over a series.

use crate::random::RandomSource;
use crate::{AssetType, Bollinger, TechnicalIndicatorSet};

use super::positive;

pub fn synthesize<R: RandomSource>(
    base_price: f64,
    asset_type: AssetType,
    estimated: bool,
    rng: &mut R,
) -> TechnicalIndicatorSet {
    let base_price = positive(base_price);

    TechnicalIndicatorSet {
        rsi: rng.uniform(0.0, 100.0),
        sma20: base_price * rng.uniform(0.95, 1.05),
        sma50: base_price * rng.uniform(0.90, 1.10),
        macd: rng.uniform(-5.0, 5.0),
        bollinger: Bollinger::around(base_price),
        is_estimated: estimated,
        estimation_note: estimated
            .then(|| format!("Indicators estimated from similar {asset_type} assets")),
    }
}
