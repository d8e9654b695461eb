//! Bounded, most-recent-first analysis history.
//!
//! History is written only after an analysis is final. Its failures are
//! reported as [`HistoryError`] so callers can downgrade them to warnings.

use std::collections::{BTreeMap, VecDeque};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    AnalysisResult, AssetType, HistoryError, Recommendation, RiskTolerance, UtcDateTime,
};

/// Entries kept before the oldest is evicted.
pub const HISTORY_CAPACITY: usize = 50;
/// Entries shown in the stats `recent` list.
pub const RECENT_ENTRIES: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: Uuid,
    pub symbol: String,
    pub name: String,
    #[serde(rename = "type")]
    pub asset_type: AssetType,
    pub recommendation: Recommendation,
    pub risk_tolerance: RiskTolerance,
    pub price: f64,
    pub recorded_at: UtcDateTime,
}

impl HistoryEntry {
    pub fn from_analysis(result: &AnalysisResult, risk_tolerance: RiskTolerance) -> Self {
        Self {
            id: Uuid::new_v4(),
            symbol: result.market.symbol.clone(),
            name: result.market.name.clone(),
            asset_type: result.market.asset_type,
            recommendation: result.recommendation,
            risk_tolerance,
            price: result.market.price,
            recorded_at: UtcDateTime::now(),
        }
    }
}

/// Single-writer store of past analyses.
pub trait HistoryStore {
    /// Records `entry` as the most recent, evicting past [`HISTORY_CAPACITY`].
    fn append(&mut self, entry: HistoryEntry) -> Result<(), HistoryError>;

    /// Most recent first.
    fn list(&self) -> Result<Vec<HistoryEntry>, HistoryError>;

    fn clear(&mut self) -> Result<(), HistoryError>;

    fn stats(&self) -> Result<HistoryStats, HistoryError> {
        Ok(HistoryStats::from_entries(&self.list()?))
    }
}

fn push_bounded(entries: &mut VecDeque<HistoryEntry>, entry: HistoryEntry) {
    entries.push_front(entry);
    entries.truncate(HISTORY_CAPACITY);
}

/// In-process store.
#[derive(Debug, Clone, Default)]
pub struct MemoryHistory {
    entries: VecDeque<HistoryEntry>,
}

impl MemoryHistory {
    pub fn new() -> Self {
        Self::default()
    }
}

impl HistoryStore for MemoryHistory {
    fn append(&mut self, entry: HistoryEntry) -> Result<(), HistoryError> {
        push_bounded(&mut self.entries, entry);
        Ok(())
    }

    fn list(&self) -> Result<Vec<HistoryEntry>, HistoryError> {
        Ok(self.entries.iter().cloned().collect())
    }

    fn clear(&mut self) -> Result<(), HistoryError> {
        self.entries.clear();
        Ok(())
    }
}

/// Store persisted as a JSON array, most recent first.
///
/// A missing file reads as empty history; a file that does not parse is
/// reported as [`HistoryError::Serialization`] and left untouched.
#[derive(Debug, Clone)]
pub struct JsonFileHistory {
    path: PathBuf,
}

impl JsonFileHistory {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<VecDeque<HistoryEntry>, HistoryError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(error) if error.kind() == ErrorKind::NotFound => return Ok(VecDeque::new()),
            Err(error) => return Err(error.into()),
        };
        if raw.trim().is_empty() {
            return Ok(VecDeque::new());
        }
        Ok(serde_json::from_str(&raw)?)
    }

    fn store(&self, entries: &VecDeque<HistoryEntry>) -> Result<(), HistoryError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let payload = serde_json::to_vec_pretty(entries)?;
        let staging = self.path.with_extension("json.tmp");
        fs::write(&staging, payload)?;
        fs::rename(&staging, &self.path)?;
        Ok(())
    }
}

impl HistoryStore for JsonFileHistory {
    fn append(&mut self, entry: HistoryEntry) -> Result<(), HistoryError> {
        let mut entries = self.load()?;
        push_bounded(&mut entries, entry);
        self.store(&entries)
    }

    fn list(&self) -> Result<Vec<HistoryEntry>, HistoryError> {
        let mut entries = self.load()?;
        entries.truncate(HISTORY_CAPACITY);
        Ok(entries.into())
    }

    fn clear(&mut self) -> Result<(), HistoryError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(error) if error.kind() == ErrorKind::NotFound => Ok(()),
            Err(error) => Err(error.into()),
        }
    }
}

/// Aggregate view over the stored history.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HistoryStats {
    pub total: usize,
    pub by_asset_type: BTreeMap<String, usize>,
    pub by_risk_tolerance: BTreeMap<String, usize>,
    pub by_recommendation: BTreeMap<String, usize>,
    pub recent: Vec<HistoryEntry>,
}

impl HistoryStats {
    /// Expects `entries` most recent first.
    pub fn from_entries(entries: &[HistoryEntry]) -> Self {
        let mut stats = Self {
            total: entries.len(),
            recent: entries.iter().take(RECENT_ENTRIES).cloned().collect(),
            ..Self::default()
        };

        for entry in entries {
            *stats
                .by_asset_type
                .entry(entry.asset_type.as_str().to_owned())
                .or_default() += 1;
            *stats
                .by_risk_tolerance
                .entry(entry.risk_tolerance.as_str().to_owned())
                .or_default() += 1;
            *stats
                .by_recommendation
                .entry(entry.recommendation.as_str().to_owned())
                .or_default() += 1;
        }

        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(symbol: &str, asset_type: AssetType, recommendation: Recommendation) -> HistoryEntry {
        HistoryEntry {
            id: Uuid::new_v4(),
            symbol: symbol.to_owned(),
            name: format!("{symbol} name"),
            asset_type,
            recommendation,
            risk_tolerance: RiskTolerance::Moderate,
            price: 10.0,
            recorded_at: UtcDateTime::now(),
        }
    }

    #[test]
    fn memory_history_is_most_recent_first_and_bounded() {
        let mut history = MemoryHistory::new();
        for index in 0..=HISTORY_CAPACITY {
            history
                .append(entry(&format!("S{index}"), AssetType::Stock, Recommendation::Hold))
                .expect("memory append");
        }

        let listed = history.list().expect("memory list");
        assert_eq!(listed.len(), HISTORY_CAPACITY);
        assert_eq!(listed[0].symbol, format!("S{HISTORY_CAPACITY}"));
        assert!(listed.iter().all(|item| item.symbol != "S0"));
    }

    #[test]
    fn stats_break_down_by_category() {
        let entries = vec![
            entry("BTC", AssetType::Crypto, Recommendation::Buy),
            entry("ETH", AssetType::Crypto, Recommendation::Sell),
            entry("AAPL", AssetType::Stock, Recommendation::Buy),
        ];
        let stats = HistoryStats::from_entries(&entries);

        assert_eq!(stats.total, 3);
        assert_eq!(stats.by_asset_type.get("crypto"), Some(&2));
        assert_eq!(stats.by_recommendation.get("buy"), Some(&2));
        assert_eq!(stats.by_risk_tolerance.get("moderate"), Some(&3));
        assert_eq!(stats.recent.len(), 3);
    }

    #[test]
    fn clear_empties_memory_history() {
        let mut history = MemoryHistory::new();
        history
            .append(entry("AAPL", AssetType::Stock, Recommendation::Buy))
            .expect("memory append");
        history.clear().expect("memory clear");
        assert!(history.list().expect("memory list").is_empty());
    }
}
