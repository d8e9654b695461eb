//! # Domain Models
//!
//! Canonical domain types shared by every stage of an analysis.
//!
//! Every entity is built fresh per request and never mutated afterwards.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`AssetSymbol`] | Normalized free-form identifier |
//! | [`MarketRecord`] | Price, change, volume snapshot |
//! | [`NewsItem`] | Polarity-tagged headline |
//! | [`ChartPoint`] | One point of the synthesized price history |
//! | [`TechnicalIndicatorSet`] | RSI / SMA / MACD / Bollinger values |
//! | [`AnalysisResult`] | Aggregate returned by the analyzer |
//! | [`UtcDateTime`] | UTC timestamp |
//!
//! ## Closed enums
//!
//! [`AssetType`], [`Sentiment`], [`Recommendation`], [`RiskTier`],
//! [`RiskTolerance`], [`DataQuality`], [`AnalysisQuality`], [`ChartPeriod`].

mod models;
mod symbol;
mod timestamp;

pub use models::{
    AnalysisQuality, AnalysisResult, AssetType, Bollinger, ChartPeriod, ChartPoint, DataQuality,
    MarketRecord, NewsItem, Recommendation, RiskTier, RiskTolerance, Sentiment,
    TechnicalIndicatorSet,
};
pub use symbol::AssetSymbol;
pub use timestamp::UtcDateTime;
