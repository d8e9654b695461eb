//! Advisory views derived from finished analyses.
//!
//! None of these helpers feed back into the recommendation. Portfolio fit and
//! the tolerance match are the only consumers of the caller's
//! [`RiskTolerance`]; volatility and sentiment read the produced chart and
//! news; the comparison verdict only reads two completed results.

use serde::{Deserialize, Serialize};

use crate::{
    AnalysisQuality, AnalysisResult, AssetType, ChartPoint, NewsItem, Recommendation, RiskTier,
    RiskTolerance, Sentiment,
};

const BASE_DIVERSIFICATION: u8 = 50;
const BASE_WEIGHT_PCT: i32 = 10;
const CRYPTO_WEIGHT_CAP_PCT: i32 = 15;
const MIN_WEIGHT_PCT: i32 = 3;
const MAX_WEIGHT_PCT: i32 = 25;

/// Trailing window, in daily returns, for current volatility.
pub const RECENT_WINDOW: usize = 7;
const TREND_BAND: f64 = 0.2;
const LOW_VOLATILITY_PCT: f64 = 2.0;
const HIGH_VOLATILITY_PCT: f64 = 5.0;

const NEUTRAL_SENTIMENT: f64 = 50.0;
const MOMENTUM_NUDGE: f64 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Suitability {
    Excellent,
    Good,
    Moderate,
    Poor,
}

impl Suitability {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Excellent => "excellent",
            Self::Good => "good",
            Self::Moderate => "moderate",
            Self::Poor => "poor",
        }
    }
}

/// How an analyzed asset would sit in a portfolio of the given tolerance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortfolioFit {
    pub risk_tolerance: RiskTolerance,
    /// 0..=100; higher means the asset adds more diversification.
    pub diversification_score: u8,
    pub recommended_weight_pct: u8,
    pub suitability: Suitability,
    pub guidance: String,
}

pub fn portfolio_fit(result: &AnalysisResult, risk_tolerance: RiskTolerance) -> PortfolioFit {
    let asset_type = result.market.asset_type;
    let tier = result.risk_score;
    let weight = recommended_weight(asset_type, tier, risk_tolerance);

    let (suitability, guidance) = match risk_tolerance {
        RiskTolerance::Conservative => {
            let suitability = match tier {
                RiskTier::Low => Suitability::Excellent,
                RiskTier::Medium => Suitability::Moderate,
                RiskTier::High => Suitability::Poor,
            };
            let holding = if tier == RiskTier::Low { "core" } else { "small" };
            (
                suitability,
                format!("Consider as a {holding} holding with {weight}% allocation"),
            )
        }
        RiskTolerance::Moderate => (
            Suitability::Good,
            format!("Suitable for balanced portfolio with {weight}% allocation"),
        ),
        RiskTolerance::Aggressive => (
            if tier == RiskTier::High {
                Suitability::Excellent
            } else {
                Suitability::Good
            },
            format!("Can be part of growth allocation with up to {weight}% maximum"),
        ),
    };

    PortfolioFit {
        risk_tolerance,
        diversification_score: diversification_score(asset_type, result.market.market_cap),
        recommended_weight_pct: weight,
        suitability,
        guidance,
    }
}

pub fn diversification_score(asset_type: AssetType, market_cap: Option<f64>) -> u8 {
    let type_bonus = match asset_type {
        AssetType::Crypto => 20,
        AssetType::Forex => 15,
        AssetType::Stock => 10,
    };
    let cap_bonus = match market_cap {
        Some(cap) if cap > 1e12 => 15,
        Some(cap) if cap > 1e11 => 10,
        _ => 5,
    };
    (BASE_DIVERSIFICATION + type_bonus + cap_bonus).min(100)
}

pub fn recommended_weight(asset_type: AssetType, tier: RiskTier, tolerance: RiskTolerance) -> u8 {
    let mut weight = BASE_WEIGHT_PCT;
    weight += match tolerance {
        RiskTolerance::Aggressive => 10,
        RiskTolerance::Conservative => -5,
        RiskTolerance::Moderate => 0,
    };
    weight += match tier {
        RiskTier::Low => 5,
        RiskTier::High => -5,
        RiskTier::Medium => 0,
    };
    if asset_type == AssetType::Crypto {
        weight = weight.min(CRYPTO_WEIGHT_CAP_PCT);
    }
    weight.clamp(MIN_WEIGHT_PCT, MAX_WEIGHT_PCT) as u8
}

/// How well a risk tier suits an investor's tolerance.
pub fn tolerance_match(tier: RiskTier, tolerance: RiskTolerance) -> Suitability {
    match (tolerance, tier) {
        (RiskTolerance::Conservative, RiskTier::Low) => Suitability::Excellent,
        (RiskTolerance::Conservative, RiskTier::Medium) => Suitability::Moderate,
        (RiskTolerance::Conservative, RiskTier::High) => Suitability::Poor,
        (RiskTolerance::Moderate, RiskTier::Medium) => Suitability::Excellent,
        (RiskTolerance::Moderate, _) => Suitability::Good,
        (RiskTolerance::Aggressive, RiskTier::High) => Suitability::Excellent,
        (RiskTolerance::Aggressive, RiskTier::Medium) => Suitability::Good,
        (RiskTolerance::Aggressive, RiskTier::Low) => Suitability::Moderate,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VolatilityTrend {
    Increasing,
    Decreasing,
    Stable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VolatilityLevel {
    Low,
    Medium,
    High,
}

impl VolatilityLevel {
    pub fn from_pct(volatility_pct: f64) -> Self {
        if volatility_pct < LOW_VOLATILITY_PCT {
            Self::Low
        } else if volatility_pct < HIGH_VOLATILITY_PCT {
            Self::Medium
        } else {
            Self::High
        }
    }
}

/// Standard deviation of daily returns, in percent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VolatilityProfile {
    /// Over the last [`RECENT_WINDOW`] returns.
    pub current_pct: f64,
    /// Over the whole series.
    pub baseline_pct: f64,
    pub trend: VolatilityTrend,
    pub level: VolatilityLevel,
}

/// Measures a chart series. Fewer than `RECENT_WINDOW` points reads as flat.
pub fn volatility_profile(chart: &[ChartPoint]) -> VolatilityProfile {
    if chart.len() < RECENT_WINDOW {
        return VolatilityProfile {
            current_pct: 0.0,
            baseline_pct: 0.0,
            trend: VolatilityTrend::Stable,
            level: VolatilityLevel::Low,
        };
    }

    let returns: Vec<f64> = chart
        .windows(2)
        .filter(|pair| pair[0].price > 0.0)
        .map(|pair| (pair[1].price - pair[0].price) / pair[0].price)
        .collect();

    let baseline_pct = std_dev(&returns) * 100.0;
    let recent = &returns[returns.len().saturating_sub(RECENT_WINDOW)..];
    let current_pct = std_dev(recent) * 100.0;

    let trend = if current_pct > baseline_pct * (1.0 + TREND_BAND) {
        VolatilityTrend::Increasing
    } else if current_pct < baseline_pct * (1.0 - TREND_BAND) {
        VolatilityTrend::Decreasing
    } else {
        VolatilityTrend::Stable
    };

    VolatilityProfile {
        current_pct,
        baseline_pct,
        trend,
        level: VolatilityLevel::from_pct(current_pct),
    }
}

fn std_dev(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let count = values.len() as f64;
    let mean = values.iter().sum::<f64>() / count;
    let variance = values.iter().map(|value| (value - mean).powi(2)).sum::<f64>() / count;
    variance.sqrt()
}

/// News mood on a 0..=100 scale with its bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentimentScore {
    pub score: u8,
    pub label: Sentiment,
}

/// Positive news scores 80, negative 20 and neutral 50; the mean is nudged
/// five points toward the 24h move. No news is a flat 50.
pub fn sentiment_score(news: &[NewsItem], change_percent_24h: f64) -> SentimentScore {
    let value = if news.is_empty() {
        NEUTRAL_SENTIMENT
    } else {
        let total: f64 = news
            .iter()
            .map(|item| match item.sentiment {
                Sentiment::Positive => 80.0,
                Sentiment::Negative => 20.0,
                Sentiment::Neutral => NEUTRAL_SENTIMENT,
            })
            .sum();
        let nudge = if change_percent_24h > 0.0 {
            MOMENTUM_NUDGE
        } else {
            -MOMENTUM_NUDGE
        };
        total / news.len() as f64 + nudge
    };

    let score = value.round().clamp(0.0, 100.0) as u8;
    let label = match score {
        0..=40 => Sentiment::Negative,
        41..=60 => Sentiment::Neutral,
        _ => Sentiment::Positive,
    };

    SentimentScore { score, label }
}

/// Read-only summaries shown next to an analysis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Insights {
    pub volatility: VolatilityProfile,
    pub sentiment: SentimentScore,
    pub tolerance_match: Suitability,
}

pub fn insights(result: &AnalysisResult, risk_tolerance: RiskTolerance) -> Insights {
    Insights {
        volatility: volatility_profile(&result.chart),
        sentiment: sentiment_score(&result.news, result.market.change_percent_24h),
        tolerance_match: tolerance_match(result.risk_score, risk_tolerance),
    }
}

/// Which side of a comparison a verdict points to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    First,
    Second,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonVerdict {
    /// `None` when both sides carry the same risk tier.
    pub safer: Option<Side>,
    pub higher_growth: Side,
    pub better_overall: Side,
}

impl ComparisonVerdict {
    /// Ties on growth and overall score go to the second side.
    pub fn between(first: &AnalysisResult, second: &AnalysisResult) -> Self {
        let safer = match first.risk_score.cmp(&second.risk_score) {
            std::cmp::Ordering::Less => Some(Side::First),
            std::cmp::Ordering::Greater => Some(Side::Second),
            std::cmp::Ordering::Equal => None,
        };

        let higher_growth =
            if first.market.change_percent_24h > second.market.change_percent_24h {
                Side::First
            } else {
                Side::Second
            };

        Self {
            safer,
            higher_growth,
            better_overall: better_overall(first, second),
        }
    }
}

fn better_overall(first: &AnalysisResult, second: &AnalysisResult) -> Side {
    let complete = |result: &AnalysisResult| result.data_quality == AnalysisQuality::Complete;
    let buy = |result: &AnalysisResult| result.recommendation == Recommendation::Buy;

    if complete(first) != complete(second) {
        return if complete(first) { Side::First } else { Side::Second };
    }
    if buy(first) != buy(second) {
        return if buy(first) { Side::First } else { Side::Second };
    }
    if first.confidence > second.confidence {
        Side::First
    } else {
        Side::Second
    }
}

/// Two analyses side by side with their verdict.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comparison {
    pub first: AnalysisResult,
    pub second: AnalysisResult,
    pub verdict: ComparisonVerdict,
}
