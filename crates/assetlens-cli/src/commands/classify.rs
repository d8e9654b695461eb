use assetlens_core::{classify, AssetType};
use serde::Serialize;

use crate::cli::ClassifyArgs;
use crate::error::CliError;

use super::{CommandResult, Context};

#[derive(Debug, Serialize)]
struct Classification {
    identifier: String,
    #[serde(rename = "type")]
    asset_type: AssetType,
    /// True when the identifier is a curated registry symbol.
    in_registry: bool,
}

#[derive(Debug, Serialize)]
struct ClassifyResponseData {
    results: Vec<Classification>,
}

pub fn run(args: &ClassifyArgs, context: &Context) -> Result<CommandResult, CliError> {
    let analyzer = context.analyzer.clone().build();
    let registry = analyzer.registry();

    let results = args
        .identifiers
        .iter()
        .map(|identifier| {
            let entry = registry.lookup(identifier);
            Classification {
                identifier: identifier.trim().to_owned(),
                asset_type: entry
                    .map(|entry| entry.descriptor.asset_type)
                    .unwrap_or_else(|| classify(identifier)),
                in_registry: entry.is_some(),
            }
        })
        .collect();

    let data = serde_json::to_value(ClassifyResponseData { results })?;
    Ok(CommandResult::ok(data))
}
