//! Analysis service: resolve once, fan out to the producers, join, score.
//!
//! ```text
//!                     ┌──────────────┐
//!  AnalyzeRequest ──▶ │   resolve    │  registry hit or fallback descriptor
//!                     └──────┬───────┘
//!          ┌─────────────┬───┴─────────┬──────────────┐
//!          ▼             ▼             ▼              ▼
//!       market         news          chart       indicators    (tokio::join!)
//!          └─────────────┴──────┬──────┴──────────────┘
//!                               ▼
//!                     ┌──────────────────┐
//!                     │ Engine::recommend│  ──▶ AnalysisResult
//!                     └──────────────────┘
//! ```
//!
//! The whole producer group runs under a single timeout. Nothing is
//! mutated before the join, so dropping an in-flight analysis is safe.

use std::env;
use std::time::{Duration, Instant};

use tracing::{info, warn};

use crate::advisory::{Comparison, ComparisonVerdict};
use crate::engine::Engine;
use crate::fallback::FallbackTable;
use crate::random::RandomSource;
use crate::registry::Registry;
use crate::resolver::{resolve, ResolvedAsset};
use crate::synth::{chart, indicators, market, news};
use crate::{
    AnalysisError, AnalysisResult, AssetSymbol, ChartPeriod, MarketRecord, RiskTolerance,
    UtcDateTime,
};

/// Budget for the whole producer group.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(3_000);
pub const MAX_SEARCH_RESULTS: usize = 10;

/// One analysis request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalyzeRequest {
    pub symbol: AssetSymbol,
    /// Optional display name; its keywords steer fallback categorisation.
    pub name: Option<String>,
    /// Not read by the decision rule.
    pub risk_tolerance: RiskTolerance,
}

impl AnalyzeRequest {
    pub fn new(symbol: &str) -> Self {
        Self {
            symbol: AssetSymbol::new(symbol),
            name: None,
            risk_tolerance: RiskTolerance::default(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_risk_tolerance(mut self, risk_tolerance: RiskTolerance) -> Self {
        self.risk_tolerance = risk_tolerance;
        self
    }
}

/// Simulated upstream latency per producer.
#[derive(Debug, Clone, Copy, PartialEq)]
struct LatencyPlan {
    market: Duration,
    news: Duration,
    chart: Duration,
    indicators: Duration,
}

impl LatencyPlan {
    const NONE: Self = Self {
        market: Duration::ZERO,
        news: Duration::ZERO,
        chart: Duration::ZERO,
        indicators: Duration::ZERO,
    };

    fn draw<R: RandomSource>(rng: &mut R) -> Self {
        let mut millis = |lo: f64, hi: f64| Duration::from_millis(rng.uniform(lo, hi) as u64);
        Self {
            market: millis(500.0, 1_500.0),
            news: millis(300.0, 800.0),
            chart: millis(400.0, 1_000.0),
            indicators: millis(200.0, 600.0),
        }
    }
}

async fn after<T>(delay: Duration, produce: impl FnOnce() -> T) -> T {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
    produce()
}

/// Builder for [`Analyzer`].
///
/// # Environment Variables
///
/// | Variable | Effect |
/// |----------|--------|
/// | `ASSETLENS_SEED` | Fixes the generator seed (u64) |
/// | `ASSETLENS_SIMULATE_LATENCY` | `1`/`true`/`yes` enables simulated producer latency |
/// | `ASSETLENS_TIMEOUT_MS` | Producer group budget in milliseconds |
///
/// Calls made after [`AnalyzerBuilder::from_env`] override what it read.
///
/// # Example
///
/// ```rust,ignore
/// use assetlens_core::AnalyzerBuilder;
///
/// let analyzer = AnalyzerBuilder::from_env()
///     .with_seed(42)
///     .build();
/// ```
#[derive(Debug, Clone)]
pub struct AnalyzerBuilder {
    registry: Registry,
    fallback: FallbackTable,
    engine: Engine,
    seed: Option<u64>,
    simulate_latency: bool,
    timeout: Duration,
    chart_period: ChartPeriod,
}

impl Default for AnalyzerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl AnalyzerBuilder {
    pub fn new() -> Self {
        Self {
            registry: Registry::canonical(),
            fallback: FallbackTable::default(),
            engine: Engine::default(),
            seed: None,
            simulate_latency: false,
            timeout: DEFAULT_TIMEOUT,
            chart_period: ChartPeriod::default(),
        }
    }

    /// Builder preloaded from `ASSETLENS_*` variables. Unparseable values
    /// are logged and ignored.
    pub fn from_env() -> Self {
        let mut builder = Self::new();

        if let Ok(raw) = env::var("ASSETLENS_SEED") {
            match raw.trim().parse::<u64>() {
                Ok(seed) => builder.seed = Some(seed),
                Err(_) => warn!(value = %raw, "ignoring invalid ASSETLENS_SEED"),
            }
        }

        if let Ok(raw) = env::var("ASSETLENS_SIMULATE_LATENCY") {
            builder.simulate_latency = matches!(
                raw.trim().to_ascii_lowercase().as_str(),
                "1" | "true" | "yes" | "on"
            );
        }

        if let Ok(raw) = env::var("ASSETLENS_TIMEOUT_MS") {
            match raw.trim().parse::<u64>() {
                Ok(millis) if millis > 0 => builder.timeout = Duration::from_millis(millis),
                _ => warn!(value = %raw, "ignoring invalid ASSETLENS_TIMEOUT_MS"),
            }
        }

        builder
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_simulated_latency(mut self, enabled: bool) -> Self {
        self.simulate_latency = enabled;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_registry(mut self, registry: Registry) -> Self {
        self.registry = registry;
        self
    }

    pub fn with_fallback_table(mut self, fallback: FallbackTable) -> Self {
        self.fallback = fallback;
        self
    }

    pub fn with_engine(mut self, engine: Engine) -> Self {
        self.engine = engine;
        self
    }

    pub fn with_chart_period(mut self, period: ChartPeriod) -> Self {
        self.chart_period = period;
        self
    }

    pub fn build(self) -> Analyzer {
        Analyzer {
            registry: self.registry,
            fallback: self.fallback,
            engine: self.engine,
            seed: self.seed,
            simulate_latency: self.simulate_latency,
            timeout: self.timeout,
            chart_period: self.chart_period,
        }
    }
}

/// Entry point for analyses, searches and comparisons.
///
/// Holds only immutable tables; every call owns its generators, so one
/// analyzer can serve concurrent requests without locking.
#[derive(Debug, Clone)]
pub struct Analyzer {
    registry: Registry,
    fallback: FallbackTable,
    engine: Engine,
    seed: Option<u64>,
    simulate_latency: bool,
    timeout: Duration,
    chart_period: ChartPeriod,
}

impl Default for Analyzer {
    fn default() -> Self {
        AnalyzerBuilder::new().build()
    }
}

impl Analyzer {
    pub fn builder() -> AnalyzerBuilder {
        AnalyzerBuilder::new()
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn simulates_latency(&self) -> bool {
        self.simulate_latency
    }

    /// A seeded analyzer reproduces the same result for the same symbol.
    fn generator_for(&self, symbol: &AssetSymbol) -> fastrand::Rng {
        match self.seed {
            Some(seed) => fastrand::Rng::with_seed(seed ^ symbol.fingerprint()),
            None => fastrand::Rng::new(),
        }
    }

    /// Runs a full analysis.
    ///
    /// Fails only when the producer group exceeds the configured timeout.
    pub async fn analyze(&self, request: &AnalyzeRequest) -> Result<AnalysisResult, AnalysisError> {
        let started = Instant::now();
        let mut rng = self.generator_for(&request.symbol);
        let asset = resolve(
            &self.registry,
            &self.fallback,
            &request.symbol,
            request.name.as_deref(),
            &mut rng,
        );

        let plan = if self.simulate_latency {
            LatencyPlan::draw(&mut rng)
        } else {
            LatencyPlan::NONE
        };
        let now = UtcDateTime::now();
        let estimated = asset.is_estimated();
        let asset_type = asset.asset_type();
        let period = self.chart_period;

        let mut market_rng = rng.fork();
        let mut chart_rng = rng.fork();
        let mut indicator_rng = rng.fork();

        let producers = async {
            tokio::join!(
                after(plan.market, || market::synthesize(&asset, &mut market_rng, now)),
                after(plan.news, || news::generate(
                    &asset.symbol,
                    asset_type,
                    estimated,
                    now
                )),
                after(plan.chart, || chart::synthesize(
                    asset.base_price,
                    period,
                    estimated,
                    &mut chart_rng,
                    now
                )),
                after(plan.indicators, || indicators::synthesize(
                    asset.base_price,
                    asset_type,
                    estimated,
                    &mut indicator_rng
                )),
            )
        };

        let (market, news, chart, indicators) = tokio::time::timeout(self.timeout, producers)
            .await
            .map_err(|_| {
                let timeout_ms = self.timeout.as_millis() as u64;
                warn!(symbol = %request.symbol, timeout_ms, "analysis timed out");
                AnalysisError::Timeout {
                    symbol: asset.symbol.clone(),
                    timeout_ms,
                }
            })?;

        let result = self
            .engine
            .recommend(market, news, chart, indicators, &mut rng);

        info!(
            symbol = %result.market.symbol,
            recommendation = %result.recommendation,
            confidence = result.confidence,
            fallback_used = result.fallback_used,
            latency_ms = started.elapsed().as_millis() as u64,
            "analysis completed"
        );

        Ok(result)
    }

    /// Market snapshots for registry rows matching `query`, capped at
    /// [`MAX_SEARCH_RESULTS`]. With no match, one fallback snapshot for the
    /// query itself is returned, so the result is never empty.
    pub fn search(&self, query: &str) -> Vec<MarketRecord> {
        let now = UtcDateTime::now();
        let symbol = AssetSymbol::new(query);
        let mut rng = self.generator_for(&symbol);
        let hits = self.registry.search(query);

        if hits.is_empty() {
            let asset = resolve(&self.registry, &self.fallback, &symbol, None, &mut rng);
            return vec![market::synthesize(&asset, &mut rng, now)];
        }

        hits.into_iter()
            .take(MAX_SEARCH_RESULTS)
            .map(|entry| market::synthesize(&ResolvedAsset::from_entry(entry), &mut rng, now))
            .collect()
    }

    /// Analyzes two symbols concurrently and derives a verdict.
    pub async fn compare(&self, first: &str, second: &str) -> Result<Comparison, AnalysisError> {
        let first = AnalyzeRequest::new(first);
        let second = AnalyzeRequest::new(second);

        let (first, second) = tokio::try_join!(self.analyze(&first), self.analyze(&second))?;
        let verdict = ComparisonVerdict::between(&first, &second);

        Ok(Comparison {
            first,
            second,
            verdict,
        })
    }
}
