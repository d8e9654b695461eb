//! # Assetlens Core
//!
//! Asset resolution and recommendation scoring for stocks, crypto and
//! forex pairs.
//!
//! ## Overview
//!
//! Any free-form identifier resolves to a usable asset: known symbols come
//! from the canonical registry, everything else gets a synthesized
//! descriptor flagged as estimated. Four independent producers then build
//! market, news, chart and indicator data, and the recommendation engine
//! combines them into a buy/hold/sell call.
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`advisory`] | Portfolio fit, volatility, sentiment and comparison verdicts |
//! | [`analyzer`] | Concurrent analysis service and its builder |
//! | [`classifier`] | Heuristic stock / crypto / forex classification |
//! | [`domain`] | Domain models (MarketRecord, NewsItem, AnalysisResult) |
//! | [`engine`] | Signal tally, confidence, risk tier, reasons |
//! | [`envelope`] | Response envelope with metadata |
//! | [`error`] | Core error types |
//! | [`fallback`] | Descriptor synthesis for unknown symbols |
//! | [`history`] | Bounded analysis history stores |
//! | [`random`] | Injectable randomness |
//! | [`registry`] | Canonical symbol table |
//! | [`resolver`] | Registry-or-fallback resolution |
//! | [`synth`] | Market, news, chart and indicator producers |
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use assetlens_core::{AnalyzeRequest, Analyzer};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let analyzer = Analyzer::builder().with_seed(7).build();
//!
//!     let result = analyzer.analyze(&AnalyzeRequest::new("AAPL")).await?;
//!     println!("{} -> {} ({}%)", result.market.symbol, result.recommendation, result.confidence);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │  CLI / User     │
//! └────────┬────────┘
//!          │
//!          ▼
//! ┌─────────────────┐     ┌──────────────────┐
//! │    Analyzer     │────▶│ Resolver         │
//! └────────┬────────┘     │ (registry or     │
//!          │              │  fallback)       │
//!          │              └──────────────────┘
//!          ▼
//! ┌─────────────────┐
//! │ Producers       │  market · news · chart · indicators
//! │ (tokio::join!)  │
//! └────────┬────────┘
//!          │
//!          ▼
//! ┌─────────────────┐     ┌──────────────────┐
//! │ Engine          │────▶│ AnalysisResult   │
//! └─────────────────┘     └──────────────────┘
//! ```
//!
//! ## Error Handling
//!
//! Resolution and scoring never fail. The analyzer reports
//! [`AnalysisError::Timeout`] when the producer group overruns its budget,
//! and history stores report [`HistoryError`], which callers are expected to
//! downgrade to a warning.

pub mod advisory;
pub mod analyzer;
pub mod classifier;
pub mod domain;
pub mod engine;
pub mod envelope;
pub mod error;
pub mod fallback;
pub mod history;
pub mod random;
pub mod registry;
pub mod resolver;
pub mod synth;

// Re-export commonly used types at crate root for convenience

// Advisory
pub use advisory::{
    Comparison, ComparisonVerdict, Insights, PortfolioFit, SentimentScore, Side, Suitability,
    VolatilityLevel, VolatilityProfile, VolatilityTrend,
};

// Analysis service
pub use analyzer::{AnalyzeRequest, Analyzer, AnalyzerBuilder};

// Classification
pub use classifier::classify;

// Domain models
pub use domain::{
    AnalysisQuality, AnalysisResult, AssetSymbol, AssetType, Bollinger, ChartPeriod, ChartPoint,
    DataQuality, MarketRecord, NewsItem, Recommendation, RiskTier, RiskTolerance, Sentiment,
    TechnicalIndicatorSet, UtcDateTime,
};

// Engine
pub use engine::{Engine, SignalTally, SimilarAssetTable};

// Envelope types
pub use envelope::{Envelope, EnvelopeMeta, SCHEMA_VERSION};

// Error types
pub use error::{AnalysisError, CoreError, HistoryError, ValidationError};

// Fallback synthesis
pub use fallback::FallbackTable;

// History
pub use history::{HistoryEntry, HistoryStats, HistoryStore, JsonFileHistory, MemoryHistory};

// Randomness
pub use random::{RandomSource, ScriptedRandom};

// Registry
pub use registry::{AssetDescriptor, Registry, RegistryEntry};

// Resolution
pub use resolver::{resolve, ResolvedAsset};
