use assetlens_core::{HistoryEntry, HistoryStats, HistoryStore};
use serde::Serialize;

use crate::cli::{HistoryArgs, HistoryCommand};
use crate::error::CliError;

use super::{CommandResult, Context};

#[derive(Debug, Serialize)]
struct HistoryListData {
    total: usize,
    entries: Vec<HistoryEntry>,
}

#[derive(Debug, Serialize)]
struct HistoryClearData {
    cleared: usize,
}

pub fn run(args: &HistoryArgs, context: &mut Context) -> Result<CommandResult, CliError> {
    let Some(history) = context.history.as_mut() else {
        return Err(CliError::Command(String::from(
            "history is disabled by --no-history",
        )));
    };

    let data = match &args.command {
        HistoryCommand::List(list_args) => {
            let entries = history.list()?;
            serde_json::to_value(HistoryListData {
                total: entries.len(),
                entries: entries.into_iter().take(list_args.limit).collect(),
            })?
        }
        HistoryCommand::Stats => {
            let stats: HistoryStats = history.stats()?;
            serde_json::to_value(stats)?
        }
        HistoryCommand::Clear => {
            // A corrupt file can still be cleared.
            let cleared = history.list().map(|entries| entries.len()).unwrap_or_default();
            history.clear()?;
            serde_json::to_value(HistoryClearData { cleared })?
        }
    };

    Ok(CommandResult::ok(data))
}
