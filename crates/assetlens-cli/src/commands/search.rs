use std::time::Instant;

use assetlens_core::{DataQuality, MarketRecord};
use serde::Serialize;

use crate::cli::SearchArgs;
use crate::error::CliError;

use super::{CommandResult, Context};

#[derive(Debug, Serialize)]
struct SearchResponseData {
    query: String,
    results: Vec<MarketRecord>,
}

pub fn run(args: &SearchArgs, context: &Context) -> Result<CommandResult, CliError> {
    let query = args.query.trim();
    if query.is_empty() {
        return Err(CliError::Command(String::from("query must not be empty")));
    }

    let started = Instant::now();
    let results = context.analyzer.clone().build().search(query);
    let fallback_used = results
        .iter()
        .any(|record| record.data_quality == DataQuality::Estimated);

    let data = serde_json::to_value(SearchResponseData {
        query: query.to_owned(),
        results,
    })?;

    Ok(CommandResult::ok(data)
        .with_latency(started.elapsed().as_millis() as u64)
        .with_fallback_used(fallback_used))
}
