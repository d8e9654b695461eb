mod analyze;
mod classify;
mod compare;
mod history;
mod search;

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use assetlens_core::{
    AnalysisResult, AnalyzerBuilder, Envelope, HistoryEntry, HistoryStore, JsonFileHistory,
    RiskTolerance,
};
use serde_json::Value;
use tracing::warn;

use crate::cli::{Cli, Command};
use crate::error::CliError;
use crate::metadata::response_meta;

pub struct CommandResult {
    pub data: Value,
    pub warnings: Vec<String>,
    pub latency_ms: u64,
    pub fallback_used: bool,
}

impl CommandResult {
    pub fn ok(data: Value) -> Self {
        Self {
            data,
            warnings: Vec::new(),
            latency_ms: 0,
            fallback_used: false,
        }
    }

    pub fn with_warning(mut self, warning: impl Into<String>) -> Self {
        self.warnings.push(warning.into());
        self
    }

    pub fn with_latency(mut self, latency_ms: u64) -> Self {
        self.latency_ms = latency_ms;
        self
    }

    pub fn with_fallback_used(mut self, fallback_used: bool) -> Self {
        self.fallback_used = fallback_used;
        self
    }
}

/// Shared state handed to each command.
pub struct Context {
    pub analyzer: AnalyzerBuilder,
    pub history: Option<JsonFileHistory>,
}

impl Context {
    fn from_cli(cli: &Cli) -> Self {
        Self::with_base(cli, AnalyzerBuilder::from_env())
    }

    /// Applies only the flags given on the command line, so settings
    /// already loaded into `base` survive when a flag is absent.
    fn with_base(cli: &Cli, base: AnalyzerBuilder) -> Self {
        let mut analyzer = base;
        if let Some(timeout_ms) = cli.timeout_ms {
            analyzer = analyzer.with_timeout(Duration::from_millis(timeout_ms));
        }
        if cli.simulate_latency {
            analyzer = analyzer.with_simulated_latency(true);
        }
        if let Some(seed) = cli.seed {
            analyzer = analyzer.with_seed(seed);
        }

        let history = (!cli.no_history).then(|| {
            JsonFileHistory::new(cli.history_file.clone().unwrap_or_else(default_history_path))
        });

        Self { analyzer, history }
    }

    /// Records a finished analysis. A failed write is returned as a warning
    /// and never fails the command.
    pub fn record(&mut self, result: &AnalysisResult, tolerance: RiskTolerance) -> Option<String> {
        let history = self.history.as_mut()?;
        match history.append(HistoryEntry::from_analysis(result, tolerance)) {
            Ok(()) => None,
            Err(error) => {
                warn!(
                    path = %history.path().display(),
                    %error,
                    "history write failed"
                );
                Some(format!("history not recorded: {error}"))
            }
        }
    }
}

fn default_history_path() -> PathBuf {
    env::var_os("HOME")
        .map(PathBuf::from)
        .unwrap_or_default()
        .join(".assetlens")
        .join("history.json")
}

pub async fn run(cli: &Cli) -> Result<Envelope<Value>, CliError> {
    let mut context = Context::from_cli(cli);

    let command_result = match &cli.command {
        Command::Analyze(args) => analyze::run(args, &mut context).await?,
        Command::Search(args) => search::run(args, &context)?,
        Command::Compare(args) => compare::run(args, &context).await?,
        Command::Classify(args) => classify::run(args, &context)?,
        Command::History(args) => history::run(args, &mut context)?,
    };

    let CommandResult {
        data,
        warnings,
        latency_ms,
        fallback_used,
    } = command_result;

    let meta = response_meta(latency_ms, fallback_used, warnings)?;
    Ok(Envelope::success(meta, data))
}
