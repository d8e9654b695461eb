//! Recommendation engine.
//!
//! Combines the market snapshot, news and indicators into a buy/hold/sell
//! call, a confidence score, a risk tier, three reasons and, for fallback
//! data, a list of similar canonical assets. The engine has no error path.
//!
//! # Decision rule
//!
//! | Bullish signal | Bearish signal |
//! |----------------|----------------|
//! | 24h change > 2% | 24h change < -2% |
//! | more positive than negative news | more negative than positive news |
//! | RSI < 30 | RSI > 70 |
//! | price > SMA20 | price < SMA50 |
//!
//! Three or more bullish signals is a buy, three or more bearish a sell,
//! anything else a hold. Split tallies are not tie-broken.

use std::collections::HashMap;

use tracing::debug;

use crate::random::RandomSource;
use crate::synth::news::polarity_counts;
use crate::{
    AnalysisQuality, AnalysisResult, AssetType, ChartPoint, DataQuality, MarketRecord, NewsItem,
    Recommendation, RiskTier, TechnicalIndicatorSet,
};

/// Signals of one polarity needed for a directional call.
pub const DECISION_THRESHOLD: u8 = 3;
/// Percent move that counts as momentum.
pub const MOMENTUM_THRESHOLD_PCT: f64 = 2.0;
pub const RSI_OVERSOLD: f64 = 30.0;
pub const RSI_OVERBOUGHT: f64 = 70.0;
/// Percent move above which the risk tier is high.
pub const HIGH_RISK_MOVE_PCT: f64 = 5.0;
/// Points removed from the confidence of fallback-backed results.
pub const FALLBACK_CONFIDENCE_PENALTY: f64 = 10.0;
pub const CONFIDENCE_FLOOR: f64 = 50.0;

/// Count of bullish and bearish conditions, each out of four.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SignalTally {
    pub bullish: u8,
    pub bearish: u8,
}

impl SignalTally {
    pub fn from_inputs(
        market: &MarketRecord,
        news: &[NewsItem],
        indicators: &TechnicalIndicatorSet,
    ) -> Self {
        let (positive, negative) = polarity_counts(news);
        let change = market.change_percent_24h;

        let bullish = [
            change > MOMENTUM_THRESHOLD_PCT,
            positive > negative,
            indicators.rsi < RSI_OVERSOLD,
            market.price > indicators.sma20,
        ];
        let bearish = [
            change < -MOMENTUM_THRESHOLD_PCT,
            negative > positive,
            indicators.rsi > RSI_OVERBOUGHT,
            market.price < indicators.sma50,
        ];

        Self {
            bullish: count(&bullish),
            bearish: count(&bearish),
        }
    }

    pub fn decide(self) -> Recommendation {
        if self.bullish >= DECISION_THRESHOLD {
            Recommendation::Buy
        } else if self.bearish >= DECISION_THRESHOLD {
            Recommendation::Sell
        } else {
            Recommendation::Hold
        }
    }
}

fn count(signals: &[bool]) -> u8 {
    signals.iter().filter(|&&signal| signal).count() as u8
}

/// Uniform draw range for the raw confidence, before the fallback penalty.
pub fn confidence_band(recommendation: Recommendation, fallback_used: bool) -> (f64, f64) {
    match (recommendation, fallback_used) {
        (Recommendation::Buy, false) => (75.0, 95.0),
        (Recommendation::Buy, true) => (65.0, 80.0),
        (Recommendation::Sell, false) => (70.0, 95.0),
        (Recommendation::Sell, true) => (60.0, 80.0),
        (Recommendation::Hold, false) => (60.0, 80.0),
        (Recommendation::Hold, true) => (55.0, 70.0),
    }
}

/// Draws a confidence in `[0, 100]`, penalized and floored for fallback data.
pub fn confidence<R: RandomSource>(
    recommendation: Recommendation,
    fallback_used: bool,
    rng: &mut R,
) -> u8 {
    let (lo, hi) = confidence_band(recommendation, fallback_used);
    let mut value = rng.uniform(lo, hi);
    if fallback_used {
        value = (value - FALLBACK_CONFIDENCE_PENALTY).max(CONFIDENCE_FLOOR);
    }
    value.round().clamp(0.0, 100.0) as u8
}

pub fn risk_tier(asset_type: AssetType, change_percent_24h: f64) -> RiskTier {
    let magnitude = change_percent_24h.abs();
    if asset_type == AssetType::Crypto || magnitude > HIGH_RISK_MOVE_PCT {
        RiskTier::High
    } else if magnitude > MOMENTUM_THRESHOLD_PCT {
        RiskTier::Medium
    } else {
        RiskTier::Low
    }
}

pub fn reasons(recommendation: Recommendation, fallback_used: bool) -> [String; 3] {
    let texts = match (recommendation, fallback_used) {
        (Recommendation::Buy, false) => [
            "Strong positive price momentum",
            "Favorable news sentiment",
            "Technical indicators suggest potential upside",
        ],
        (Recommendation::Buy, true) => [
            "Estimated positive price momentum based on sector trends",
            "Favorable market sentiment for similar assets",
            "Technical indicators suggest potential upside",
        ],
        (Recommendation::Sell, false) => [
            "Negative price trend",
            "Concerning news developments",
            "Technical indicators suggest potential downside",
        ],
        (Recommendation::Sell, true) => [
            "Estimated negative price trend based on market conditions",
            "Market uncertainty affecting similar assets",
            "Technical indicators suggest potential downside",
        ],
        (Recommendation::Hold, false) => [
            "Mixed market signals",
            "Balanced sentiment and technical indicators",
            "Neutral market conditions suggest patience",
        ],
        (Recommendation::Hold, true) => [
            "Mixed signals based on sector analysis",
            "Balanced sentiment and technical indicators",
            "Neutral market conditions suggest patience",
        ],
    };
    texts.map(str::to_owned)
}

/// Owned (type, sector) → canonical suggestions table.
#[derive(Debug, Clone, PartialEq)]
pub struct SimilarAssetTable {
    by_sector: HashMap<(AssetType, String), Vec<String>>,
    generic: Vec<String>,
}

impl Default for SimilarAssetTable {
    fn default() -> Self {
        let rows: [(AssetType, &str, [&str; 4]); 6] = [
            (AssetType::Stock, "technology", ["AAPL", "MSFT", "GOOGL", "NVDA"]),
            (AssetType::Stock, "healthcare", ["JNJ", "PFE", "UNH", "ABBV"]),
            (AssetType::Stock, "finance", ["JPM", "BAC", "WFC", "GS"]),
            (AssetType::Crypto, "defi", ["UNI", "AAVE", "COMP", "MKR"]),
            (AssetType::Crypto, "layer1", ["ETH", "SOL", "ADA", "DOT"]),
            (AssetType::Forex, "major", ["EURUSD", "GBPUSD", "USDJPY", "USDCHF"]),
        ];

        let by_sector = rows
            .into_iter()
            .map(|(asset_type, sector, symbols)| {
                (
                    (asset_type, sector.to_owned()),
                    symbols.iter().map(|&symbol| symbol.to_owned()).collect::<Vec<_>>(),
                )
            })
            .collect();

        Self {
            by_sector,
            generic: ["BTC", "ETH", "AAPL", "MSFT"]
                .iter()
                .map(|&symbol| symbol.to_owned())
                .collect(),
        }
    }
}

impl SimilarAssetTable {
    /// Suggestions for the sector, or the generic cross-type list.
    pub fn suggest(&self, asset_type: AssetType, sector: Option<&str>) -> Vec<String> {
        sector
            .map(|sector| (asset_type, sector.to_lowercase()))
            .and_then(|key| self.by_sector.get(&key))
            .unwrap_or(&self.generic)
            .clone()
    }
}

/// Stateless combiner over the four producer outputs.
#[derive(Debug, Clone, Default)]
pub struct Engine {
    similar: SimilarAssetTable,
}

impl Engine {
    pub fn new(similar: SimilarAssetTable) -> Self {
        Self { similar }
    }

    /// Combines producer outputs into the final result.
    ///
    /// Depends only on its arguments, so the order in which the producers
    /// finished has no effect.
    pub fn recommend<R: RandomSource>(
        &self,
        market: MarketRecord,
        news: Vec<NewsItem>,
        chart: Vec<ChartPoint>,
        indicators: TechnicalIndicatorSet,
        rng: &mut R,
    ) -> AnalysisResult {
        let fallback_used = market.data_quality == DataQuality::Estimated;
        let tally = SignalTally::from_inputs(&market, &news, &indicators);
        let recommendation = tally.decide();
        let confidence = confidence(recommendation, fallback_used, rng);
        let risk_score = risk_tier(market.asset_type, market.change_percent_24h);
        let similar_assets = fallback_used
            .then(|| self.similar.suggest(market.asset_type, market.sector.as_deref()));

        debug!(
            symbol = %market.symbol,
            recommendation = %recommendation,
            confidence,
            bullish = tally.bullish,
            bearish = tally.bearish,
            fallback_used,
            "recommendation computed"
        );

        AnalysisResult {
            recommendation,
            confidence,
            risk_score,
            reasons: reasons(recommendation, fallback_used),
            data_quality: if fallback_used {
                AnalysisQuality::Estimated
            } else {
                AnalysisQuality::Complete
            },
            fallback_used,
            similar_assets,
            market,
            news,
            chart,
            indicators,
        }
    }
}
