//! CLI argument definitions for assetlens.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `analyze` | Full analysis and recommendation for one symbol |
//! | `search` | Registry search with current snapshots |
//! | `compare` | Side-by-side analysis of two symbols |
//! | `classify` | Asset-type classification only |
//! | `history` | List, summarize or clear recorded analyses |
//!
//! # Global Options
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `--format` | `json` | Output format (json, ndjson, table) |
//! | `--pretty` | `false` | Pretty-print JSON output |
//! | `--strict` | `false` | Treat warnings as errors |
//! | `--timeout-ms` | `3000` | Analysis timeout in ms (env `ASSETLENS_TIMEOUT_MS`) |
//! | `--seed` | none | Fix the generator seed |
//! | `--simulate-latency` | `false` | Delay producers like upstream calls |
//! | `--history-file` | `~/.assetlens/history.json` | History location |
//! | `--no-history` | `false` | Do not record analyses |
//!
//! # Examples
//!
//! ```bash
//! assetlens analyze AAPL --risk-tolerance conservative --pretty
//! assetlens analyze QQBK --name "Quiet Quay Bank"
//! assetlens compare BTC ETH --seed 7
//! assetlens history stats
//! ```

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Asset analysis and recommendation CLI.
#[derive(Debug, Parser)]
#[command(
    name = "assetlens",
    author,
    version,
    about = "Asset analysis and recommendation CLI",
    long_about = "assetlens resolves any stock, crypto or forex identifier, synthesizes \
market, news, chart and indicator data, and scores a buy/hold/sell recommendation.\n\
\n\
Unknown symbols are never rejected: they are classified heuristically and \
analyzed from sector averages, flagged as estimated.\n\
\n\
Use 'assetlens <command> --help' for command-specific help."
)]
pub struct Cli {
    /// Output format for results.
    ///
    /// - json: Single JSON object (default)
    /// - ndjson: One JSON object per line
    /// - table: Plain text summary
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Pretty-print JSON output with indentation.
    #[arg(long, global = true, default_value_t = false)]
    pub pretty: bool,

    /// Treat warnings as failures (exit code 5).
    #[arg(long, global = true, default_value_t = false)]
    pub strict: bool,

    /// Analysis timeout budget in milliseconds [default: 3000].
    #[arg(long, global = true)]
    pub timeout_ms: Option<u64>,

    /// Seed for reproducible output.
    #[arg(long, global = true, env = "ASSETLENS_SEED")]
    pub seed: Option<u64>,

    /// Delay each producer as if it were calling an upstream service.
    ///
    /// Also enabled by ASSETLENS_SIMULATE_LATENCY.
    #[arg(long, global = true, default_value_t = false)]
    pub simulate_latency: bool,

    /// History file location.
    #[arg(long, global = true, env = "ASSETLENS_HISTORY_FILE")]
    pub history_file: Option<PathBuf>,

    /// Do not read or write analysis history.
    #[arg(long, global = true, default_value_t = false)]
    pub no_history: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Plain text summary for terminal display.
    Table,
    /// Single JSON object output.
    Json,
    /// Newline-delimited JSON.
    Ndjson,
}

/// Available CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Analyze one symbol and recommend buy, hold or sell.
    ///
    /// # Examples
    ///
    ///   assetlens analyze AAPL
    ///   assetlens analyze NEWCOIN --risk-tolerance aggressive --period 7d
    Analyze(AnalyzeArgs),

    /// Search the registry by symbol or name.
    ///
    /// Falls back to a single estimated record when nothing matches.
    ///
    /// # Examples
    ///
    ///   assetlens search micro
    Search(SearchArgs),

    /// Analyze two symbols side by side.
    ///
    /// # Examples
    ///
    ///   assetlens compare AAPL MSFT
    Compare(CompareArgs),

    /// Classify identifiers as stock, crypto or forex.
    ///
    /// # Examples
    ///
    ///   assetlens classify EURUSD BTC AAPL
    Classify(ClassifyArgs),

    /// Inspect recorded analyses.
    History(HistoryArgs),
}

/// Arguments for the `analyze` command.
#[derive(Debug, Args)]
pub struct AnalyzeArgs {
    /// Symbol or free-form identifier (e.g., AAPL, BTC, EURUSD).
    pub symbol: String,

    /// Display name; keywords such as "bank" or "chain" steer estimates.
    #[arg(long)]
    pub name: Option<String>,

    /// Investor risk tolerance: conservative, moderate or aggressive.
    #[arg(long, default_value = "moderate")]
    pub risk_tolerance: String,

    /// Chart period: 7d or 30d.
    #[arg(long, default_value = "30d")]
    pub period: String,
}

/// Arguments for the `search` command.
#[derive(Debug, Args)]
pub struct SearchArgs {
    /// Free-form search query (symbol or name fragment).
    pub query: String,
}

/// Arguments for the `compare` command.
#[derive(Debug, Args)]
pub struct CompareArgs {
    pub first: String,
    pub second: String,
}

/// Arguments for the `classify` command.
#[derive(Debug, Args)]
pub struct ClassifyArgs {
    /// One or more identifiers.
    #[arg(required = true, num_args = 1..)]
    pub identifiers: Vec<String>,
}

/// Arguments for the `history` command group.
#[derive(Debug, Args)]
pub struct HistoryArgs {
    #[command(subcommand)]
    pub command: HistoryCommand,
}

/// History subcommands.
#[derive(Debug, Subcommand)]
pub enum HistoryCommand {
    /// List recorded analyses, most recent first.
    List(HistoryListArgs),

    /// Breakdown by asset type, risk tolerance and recommendation.
    Stats,

    /// Remove all recorded analyses.
    Clear,
}

/// Arguments for `history list`.
#[derive(Debug, Args)]
pub struct HistoryListArgs {
    /// Maximum number of entries to show.
    #[arg(long, default_value_t = 50)]
    pub limit: usize,
}
