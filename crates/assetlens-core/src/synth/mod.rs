//! Synthetic data producers.
//!
//! Each producer reads only its inputs and its own random source, so the
//! analyzer can run all four concurrently and join on the results.
//!
//! | Producer | Output |
//! |----------|--------|
//! | [`market`] | [`MarketRecord`](crate::MarketRecord) |
//! | [`indicators`] | [`TechnicalIndicatorSet`](crate::TechnicalIndicatorSet) |
//! | [`news`] | [`NewsItem`](crate::NewsItem) list |
//! | [`chart`] | [`ChartPoint`](crate::ChartPoint) series |

pub mod chart;
pub mod indicators;
pub mod market;
pub mod news;

/// Floor applied to every synthesized price.
pub const MIN_PRICE: f64 = 1e-8;

pub(crate) fn positive(price: f64) -> f64 {
    if price.is_finite() {
        price.max(MIN_PRICE)
    } else {
        MIN_PRICE
    }
}
