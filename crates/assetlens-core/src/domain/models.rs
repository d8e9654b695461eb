use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{UtcDateTime, ValidationError};

/// Coarse asset class produced by the classifier or the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetType {
    Stock,
    Crypto,
    Forex,
}

impl AssetType {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Stock => "stock",
            Self::Crypto => "crypto",
            Self::Forex => "forex",
        }
    }
}

impl Display for AssetType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AssetType {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "stock" => Ok(Self::Stock),
            "crypto" => Ok(Self::Crypto),
            "forex" => Ok(Self::Forex),
            _ => Err(ValidationError::InvalidAssetType {
                value: value.to_owned(),
            }),
        }
    }
}

/// Provenance of a market record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataQuality {
    /// Backed by the canonical registry.
    Live,
    /// Synthesized by the fallback descriptor synthesizer.
    Estimated,
    Historical,
}

/// Aggregate quality tier of an analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisQuality {
    Complete,
    Estimated,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Recommendation {
    Buy,
    Hold,
    Sell,
}

impl Recommendation {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Buy => "buy",
            Self::Hold => "hold",
            Self::Sell => "sell",
        }
    }
}

impl Display for Recommendation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Volatility / asset-class risk classification computed by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskTier {
    Low,
    Medium,
    High,
}

/// User-supplied risk appetite. Distinct from [`RiskTier`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskTolerance {
    Conservative,
    #[default]
    Moderate,
    Aggressive,
}

impl RiskTolerance {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Conservative => "conservative",
            Self::Moderate => "moderate",
            Self::Aggressive => "aggressive",
        }
    }
}

impl Display for RiskTolerance {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RiskTolerance {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "conservative" => Ok(Self::Conservative),
            "moderate" => Ok(Self::Moderate),
            "aggressive" => Ok(Self::Aggressive),
            _ => Err(ValidationError::InvalidRiskTolerance {
                value: value.to_owned(),
            }),
        }
    }
}

/// Length of the synthesized price history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ChartPeriod {
    #[serde(rename = "7d")]
    SevenDays,
    #[default]
    #[serde(rename = "30d")]
    ThirtyDays,
}

impl ChartPeriod {
    pub const fn days(self) -> u32 {
        match self {
            Self::SevenDays => 7,
            Self::ThirtyDays => 30,
        }
    }
}

impl FromStr for ChartPeriod {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "7d" => Ok(Self::SevenDays),
            "30d" => Ok(Self::ThirtyDays),
            _ => Err(ValidationError::InvalidChartPeriod {
                value: value.to_owned(),
            }),
        }
    }
}

/// Current market snapshot for one asset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketRecord {
    pub symbol: String,
    pub name: String,
    #[serde(rename = "type")]
    pub asset_type: AssetType,
    pub price: f64,
    pub change_24h: f64,
    pub change_percent_24h: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub market_cap: Option<f64>,
    pub volume_24h: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sector: Option<String>,
    pub last_updated: UtcDateTime,
    pub data_quality: DataQuality,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimation_note: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsItem {
    pub headline: String,
    pub summary: String,
    pub sentiment: Sentiment,
    pub source: String,
    pub published_at: UtcDateTime,
    pub url: String,
    pub is_estimated: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub timestamp: UtcDateTime,
    pub price: f64,
    pub volume: f64,
    pub is_estimated: bool,
}

/// Bollinger envelope; `upper >= middle >= lower` by construction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bollinger {
    pub upper: f64,
    pub middle: f64,
    pub lower: f64,
}

impl Bollinger {
    pub fn around(middle: f64) -> Self {
        Self {
            upper: middle * 1.05,
            middle,
            lower: middle * 0.95,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TechnicalIndicatorSet {
    pub rsi: f64,
    pub sma20: f64,
    pub sma50: f64,
    pub macd: f64,
    pub bollinger: Bollinger,
    pub is_estimated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimation_note: Option<String>,
}

/// Complete result bundle of one analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub market: MarketRecord,
    pub news: Vec<NewsItem>,
    pub chart: Vec<ChartPoint>,
    pub indicators: TechnicalIndicatorSet,
    pub recommendation: Recommendation,
    pub confidence: u8,
    pub risk_score: RiskTier,
    pub reasons: [String; 3],
    pub data_quality: AnalysisQuality,
    pub fallback_used: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub similar_assets: Option<Vec<String>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_risk_tolerance_case_insensitively() {
        assert_eq!(
            "Aggressive".parse::<RiskTolerance>().expect("valid"),
            RiskTolerance::Aggressive
        );
        assert!(matches!(
            "reckless".parse::<RiskTolerance>(),
            Err(ValidationError::InvalidRiskTolerance { .. })
        ));
    }

    #[test]
    fn chart_period_round_trips_through_labels() {
        assert_eq!("7d".parse::<ChartPeriod>().expect("valid").days(), 7);
        assert_eq!(ChartPeriod::default().days(), 30);
        assert!("90d".parse::<ChartPeriod>().is_err());
    }

    #[test]
    fn bollinger_bands_are_ordered() {
        let bands = Bollinger::around(100.0);
        assert!(bands.upper >= bands.middle && bands.middle >= bands.lower);
    }

    #[test]
    fn risk_tiers_order_by_severity() {
        assert!(RiskTier::Low < RiskTier::Medium);
        assert!(RiskTier::Medium < RiskTier::High);
    }
}
