//! Behavior-driven tests for the history collaborator.
//!
//! These tests verify the bounded FIFO contract of both stores and how the
//! file-backed store handles missing or damaged files.

use std::fs;

use assetlens_core::{
    history::HISTORY_CAPACITY, AnalyzeRequest, Analyzer, AssetType, HistoryEntry, HistoryError,
    HistoryStore, JsonFileHistory, MemoryHistory, Recommendation, RiskTolerance, UtcDateTime,
};
use uuid::Uuid;

fn entry(symbol: &str) -> HistoryEntry {
    HistoryEntry {
        id: Uuid::new_v4(),
        symbol: symbol.to_owned(),
        name: format!("{symbol} Corporation"),
        asset_type: AssetType::Stock,
        recommendation: Recommendation::Hold,
        risk_tolerance: RiskTolerance::Moderate,
        price: 42.0,
        recorded_at: UtcDateTime::now(),
    }
}

// =============================================================================
// History: Capacity
// =============================================================================

#[test]
fn when_51_entries_are_appended_oldest_is_evicted() {
    // Given: An empty file-backed store
    let dir = tempfile::tempdir().expect("tempdir");
    let mut history = JsonFileHistory::new(dir.path().join("history.json"));

    // When: 51 entries are appended
    for index in 0..=HISTORY_CAPACITY {
        history
            .append(entry(&format!("S{index:02}")))
            .expect("append should succeed");
    }

    // Then: 50 remain, newest first, and the first insert is gone
    let listed = history.list().expect("list should succeed");
    assert_eq!(listed.len(), HISTORY_CAPACITY);
    assert_eq!(listed[0].symbol, "S50");
    assert_eq!(listed[HISTORY_CAPACITY - 1].symbol, "S01");
    assert!(listed.iter().all(|item| item.symbol != "S00"));
}

#[test]
fn memory_and_file_stores_agree_on_order() {
    // Given: One store of each kind
    let dir = tempfile::tempdir().expect("tempdir");
    let mut file = JsonFileHistory::new(dir.path().join("nested").join("history.json"));
    let mut memory = MemoryHistory::new();

    // When: The same entries are appended to both
    for symbol in ["AAPL", "BTC", "EURUSD"] {
        let item = entry(symbol);
        file.append(item.clone()).expect("file append");
        memory.append(item).expect("memory append");
    }

    // Then: Both list identical, most recent first
    let from_file = file.list().expect("file list");
    assert_eq!(from_file, memory.list().expect("memory list"));
    assert_eq!(from_file[0].symbol, "EURUSD");
}

// =============================================================================
// History: Storage Failures
// =============================================================================

#[test]
fn when_file_is_missing_history_reads_empty() {
    // Given: A path that does not exist yet
    let dir = tempfile::tempdir().expect("tempdir");
    let history = JsonFileHistory::new(dir.path().join("absent.json"));

    // When: Listing
    let listed = history.list().expect("missing file is not an error");

    // Then: Nothing is returned
    assert!(listed.is_empty());
}

#[test]
fn when_file_is_corrupt_history_reports_serialization_error() {
    // Given: A file that is not JSON
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("history.json");
    fs::write(&path, "not json").expect("seed corrupt file");
    let mut history = JsonFileHistory::new(&path);

    // When: Appending
    let error = history.append(entry("AAPL")).expect_err("corrupt file must fail");

    // Then: The error is a serialization failure and the file is untouched
    assert!(matches!(error, HistoryError::Serialization(_)));
    assert_eq!(fs::read_to_string(&path).expect("read back"), "not json");
}

#[test]
fn when_history_is_cleared_list_is_empty() {
    // Given: A store with entries
    let dir = tempfile::tempdir().expect("tempdir");
    let mut history = JsonFileHistory::new(dir.path().join("history.json"));
    history.append(entry("AAPL")).expect("append");

    // When: It is cleared twice
    history.clear().expect("clear");
    history.clear().expect("clearing an absent file is fine");

    // Then: Nothing remains
    assert!(history.list().expect("list").is_empty());
}

// =============================================================================
// History: Recording Analyses
// =============================================================================

#[tokio::test]
async fn analyses_are_recorded_with_their_tolerance_and_summarized() {
    // Given: An analyzer and an in-memory store
    let analyzer = Analyzer::builder().with_seed(12).build();
    let mut history = MemoryHistory::new();

    // When: Two analyses are recorded
    for (symbol, tolerance) in [
        ("BTC", RiskTolerance::Aggressive),
        ("AAPL", RiskTolerance::Conservative),
    ] {
        let request = AnalyzeRequest::new(symbol).with_risk_tolerance(tolerance);
        let result = analyzer.analyze(&request).await.expect("analysis");
        history
            .append(HistoryEntry::from_analysis(&result, request.risk_tolerance))
            .expect("append");
    }

    // Then: Stats break the history down by type and tolerance
    let stats = history.stats().expect("stats");
    assert_eq!(stats.total, 2);
    assert_eq!(stats.by_asset_type.get("crypto"), Some(&1));
    assert_eq!(stats.by_asset_type.get("stock"), Some(&1));
    assert_eq!(stats.by_risk_tolerance.get("aggressive"), Some(&1));
    assert_eq!(stats.recent[0].symbol, "AAPL");
    assert_eq!(stats.by_recommendation.values().sum::<usize>(), 2);
}
