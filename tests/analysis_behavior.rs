//! Behavior-driven tests for the analysis service.
//!
//! These tests verify how the analyzer resolves known and unknown symbols,
//! fans out to the producers, and enforces its time budget.

use std::time::Duration;

use assetlens_core::advisory::{insights, tolerance_match};
use assetlens_core::{
    classify, AnalysisError, AnalysisQuality, AnalyzeRequest, Analyzer, AssetType, ChartPeriod,
    DataQuality, Recommendation, RiskTier, RiskTolerance, Side,
};

// =============================================================================
// Analysis: Known Symbols
// =============================================================================

#[tokio::test]
async fn when_symbol_is_in_registry_analysis_uses_live_data() {
    // Given: A seeded analyzer
    let analyzer = Analyzer::builder().with_seed(11).build();

    // When: A curated symbol is analyzed
    let result = analyzer
        .analyze(&AnalyzeRequest::new("aapl"))
        .await
        .expect("analysis without latency should finish");

    // Then: The record is live, complete and tagged with the registry sector
    assert_eq!(result.market.symbol, "AAPL");
    assert_eq!(result.market.sector.as_deref(), Some("Technology"));
    assert_eq!(result.market.asset_type, AssetType::Stock);
    assert_eq!(result.market.data_quality, DataQuality::Live);
    assert_eq!(result.data_quality, AnalysisQuality::Complete);
    assert!(!result.fallback_used);
    assert!(result.similar_assets.is_none());
    assert!(result.market.estimation_note.is_none());
}

#[tokio::test]
async fn when_analysis_completes_all_four_producers_contribute() {
    // Given: An analyzer producing a 7 day chart
    let analyzer = Analyzer::builder()
        .with_seed(3)
        .with_chart_period(ChartPeriod::SevenDays)
        .build();

    // When: A crypto symbol is analyzed
    let result = analyzer
        .analyze(&AnalyzeRequest::new("ETH"))
        .await
        .expect("analysis should finish");

    // Then: Market, news, chart and indicators are all populated
    assert!(result.market.price > 0.0);
    assert_eq!(result.news.len(), 4);
    assert_eq!(result.chart.len(), 8);
    assert!(result
        .chart
        .windows(2)
        .all(|pair| pair[0].timestamp < pair[1].timestamp));
    let bands = result.indicators.bollinger;
    assert!(bands.upper >= bands.middle && bands.middle >= bands.lower);
    assert_eq!(result.risk_score, RiskTier::High);
}

// =============================================================================
// Analysis: Unknown Symbols
// =============================================================================

#[tokio::test]
async fn when_symbol_is_unknown_analysis_falls_back_to_estimates() {
    // Given: An analyzer and a symbol absent from the registry
    let analyzer = Analyzer::builder().with_seed(5).build();

    // When: It is analyzed
    let result = analyzer
        .analyze(&AnalyzeRequest::new("ZZZQ123"))
        .await
        .expect("fallback analysis should finish");

    // Then: Every part is flagged as estimated and suggestions are offered
    assert!(result.fallback_used);
    assert_eq!(result.data_quality, AnalysisQuality::Estimated);
    assert_eq!(result.market.data_quality, DataQuality::Estimated);
    assert!(result.market.estimation_note.is_some());
    assert!(result.indicators.is_estimated);
    assert!(result.news.iter().all(|item| item.is_estimated));
    assert!(result.chart.iter().all(|point| point.is_estimated));
    assert_eq!(
        result.similar_assets.as_deref(),
        Some(&["AAPL", "MSFT", "GOOGL", "NVDA"].map(String::from)[..])
    );
    assert!(result.confidence >= 50);
}

#[tokio::test]
async fn when_name_has_keywords_fallback_uses_matching_category() {
    // Given: An unknown ticker described as a bank
    let analyzer = Analyzer::builder().with_seed(8).build();
    let request = AnalyzeRequest::new("QQBK").with_name("Quiet Quay Bank");

    // When: It is analyzed
    let result = analyzer.analyze(&request).await.expect("analysis should finish");

    // Then: The finance profile drives sector and suggestions
    assert_eq!(result.market.name, "Quiet Quay Bank");
    assert_eq!(result.market.sector.as_deref(), Some("Finance"));
    assert_eq!(
        result.similar_assets.as_deref(),
        Some(&["JPM", "BAC", "WFC", "GS"].map(String::from)[..])
    );
}

#[tokio::test]
async fn when_input_is_empty_analysis_still_succeeds() {
    // Given: An empty identifier
    let analyzer = Analyzer::default();

    // When: It is analyzed
    let result = analyzer
        .analyze(&AnalyzeRequest::new("   "))
        .await
        .expect("analysis is total over inputs");

    // Then: A positive-priced estimated stock record comes back
    assert!(result.fallback_used);
    assert_eq!(result.market.asset_type, AssetType::Stock);
    assert!(result.market.price > 0.0);
}

// =============================================================================
// Analysis: Invariants
// =============================================================================

#[tokio::test]
async fn analysis_invariants_hold_across_many_symbols() {
    // Given: A mix of curated and unknown identifiers
    let analyzer = Analyzer::builder().with_seed(2024).build();
    let symbols = [
        "AAPL", "TSLA", "BTC", "DOT", "EURUSD", "EURGBP", "NEWCOIN", "GBPXYZ", "ABCDEFG", "x",
    ];

    for symbol in symbols {
        // When: Each is analyzed
        let result = analyzer
            .analyze(&AnalyzeRequest::new(symbol))
            .await
            .expect("analysis should finish");

        // Then: Confidence, risk and quality invariants hold
        assert!(result.confidence <= 100, "{symbol}");
        if result.market.asset_type == AssetType::Crypto
            || result.market.change_percent_24h.abs() > 5.0
        {
            assert_eq!(result.risk_score, RiskTier::High, "{symbol}");
        }
        assert_eq!(
            result.fallback_used,
            result.data_quality == AnalysisQuality::Estimated,
            "{symbol}"
        );
        assert!(result.market.price > 0.0, "{symbol}");
    }
}

#[tokio::test]
async fn risk_tolerance_does_not_change_the_recommendation() {
    // Given: The same seeded analyzer and symbol
    let analyzer = Analyzer::builder().with_seed(77).build();

    // When: It is analyzed under two risk tolerances
    let cautious = analyzer
        .analyze(&AnalyzeRequest::new("NVDA").with_risk_tolerance(RiskTolerance::Conservative))
        .await
        .expect("analysis should finish");
    let bold = analyzer
        .analyze(&AnalyzeRequest::new("NVDA").with_risk_tolerance(RiskTolerance::Aggressive))
        .await
        .expect("analysis should finish");

    // Then: The call and confidence are identical
    assert_eq!(cautious.recommendation, bold.recommendation);
    assert_eq!(cautious.confidence, bold.confidence);
}

#[tokio::test]
async fn insights_summarize_the_produced_chart_and_news() {
    // Given: A seeded analysis with the default 30-day chart
    let analyzer = Analyzer::builder().with_seed(41).build();
    let result = analyzer
        .analyze(&AnalyzeRequest::new("TSLA"))
        .await
        .expect("analysis should finish");

    // When: Insights are derived for an aggressive investor
    let summary = insights(&result, RiskTolerance::Aggressive);

    // Then: Volatility comes from the random walk and the match from the risk tier
    assert_eq!(result.chart.len(), 31);
    assert!(summary.volatility.baseline_pct > 0.0);
    assert_eq!(
        summary.tolerance_match,
        tolerance_match(result.risk_score, RiskTolerance::Aggressive)
    );
}

#[test]
fn classifier_reference_cases() {
    assert_eq!(classify("EURUSD"), AssetType::Forex);
    assert_eq!(classify("BTC"), AssetType::Crypto);
    assert_eq!(classify("AAPL"), AssetType::Stock);
    assert_eq!(classify("XyzNewToken"), AssetType::Stock);
}

#[tokio::test]
async fn when_symbol_casing_differs_analysis_is_the_same() {
    // Given: A seeded analyzer
    let analyzer = Analyzer::builder().with_seed(29).build();

    // When: One unknown pair is typed in lower and upper case
    let lower = analyzer
        .analyze(&AnalyzeRequest::new("btc-usd"))
        .await
        .expect("analysis should finish");
    let upper = analyzer
        .analyze(&AnalyzeRequest::new("BTC-USD"))
        .await
        .expect("analysis should finish");

    // Then: Both resolve to the same forex analysis
    assert_eq!(classify("usd/jpy"), AssetType::Forex);
    assert_eq!(lower.market.symbol, upper.market.symbol);
    assert_eq!(lower.market.asset_type, AssetType::Forex);
    assert_eq!(upper.market.asset_type, AssetType::Forex);
    assert_eq!(lower.market.price, upper.market.price);
    assert_eq!(lower.recommendation, upper.recommendation);
}

// =============================================================================
// Analysis: Timeouts and Comparison
// =============================================================================

#[tokio::test]
async fn when_simulated_latency_exceeds_budget_analysis_times_out() {
    // Given: Simulated latency of at least 200ms per producer and a 20ms budget
    let analyzer = Analyzer::builder()
        .with_simulated_latency(true)
        .with_timeout(Duration::from_millis(20))
        .build();

    // When: A symbol is analyzed
    let error = analyzer
        .analyze(&AnalyzeRequest::new("MSFT"))
        .await
        .expect_err("the budget is shorter than any producer delay");

    // Then: A timeout naming the symbol and budget is reported
    assert_eq!(
        error,
        AnalysisError::Timeout {
            symbol: String::from("MSFT"),
            timeout_ms: 20,
        }
    );
}

#[tokio::test]
async fn when_two_assets_are_compared_both_analyses_complete() {
    // Given: A seeded analyzer
    let analyzer = Analyzer::builder().with_seed(1).build();

    // When: A live stock is compared with an unknown token
    let comparison = analyzer
        .compare("AAPL", "MOONTOKEN")
        .await
        .expect("comparison should finish");

    // Then: Each side is analyzed independently and complete data wins overall
    assert_eq!(comparison.first.market.symbol, "AAPL");
    assert_eq!(comparison.second.market.symbol, "MOONTOKEN");
    assert_eq!(comparison.second.market.asset_type, AssetType::Crypto);
    assert!(comparison.second.fallback_used);
    assert_eq!(comparison.verdict.better_overall, Side::First);
    assert_eq!(comparison.verdict.safer, match comparison.first.risk_score {
        RiskTier::High => None,
        _ => Some(Side::First),
    });
    assert!(matches!(
        comparison.first.recommendation,
        Recommendation::Buy | Recommendation::Hold | Recommendation::Sell
    ));
}
