use std::time::Instant;

use crate::cli::CompareArgs;
use crate::error::CliError;

use super::{CommandResult, Context};

pub async fn run(args: &CompareArgs, context: &Context) -> Result<CommandResult, CliError> {
    let started = Instant::now();
    let comparison = context
        .analyzer
        .clone()
        .build()
        .compare(&args.first, &args.second)
        .await?;
    let fallback_used = comparison.first.fallback_used || comparison.second.fallback_used;

    Ok(CommandResult::ok(serde_json::to_value(&comparison)?)
        .with_latency(started.elapsed().as_millis() as u64)
        .with_fallback_used(fallback_used))
}
