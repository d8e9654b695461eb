use assetlens_core::Envelope;
use serde_json::Value;

use crate::cli::OutputFormat;
use crate::error::CliError;

pub fn render(
    envelope: &Envelope<Value>,
    format: OutputFormat,
    pretty: bool,
) -> Result<(), CliError> {
    match format {
        OutputFormat::Json => {
            let payload = if pretty {
                serde_json::to_string_pretty(envelope)?
            } else {
                serde_json::to_string(envelope)?
            };
            println!("{payload}");
        }
        OutputFormat::Ndjson => {
            for line in ndjson_lines(envelope)? {
                println!("{line}");
            }
        }
        OutputFormat::Table => render_table(envelope)?,
    }

    Ok(())
}

/// Meta on the first line, then one line per record when `data.results`
/// is a list, otherwise the whole payload.
fn ndjson_lines(envelope: &Envelope<Value>) -> Result<Vec<String>, CliError> {
    let mut lines = vec![serde_json::to_string(&envelope.meta)?];

    match envelope.data.get("results").and_then(Value::as_array) {
        Some(results) => {
            for record in results {
                lines.push(serde_json::to_string(record)?);
            }
        }
        None => lines.push(serde_json::to_string(&envelope.data)?),
    }

    Ok(lines)
}

fn render_table(envelope: &Envelope<Value>) -> Result<(), CliError> {
    println!("request_id   : {}", envelope.meta.request_id);
    if let Some(trace_id) = &envelope.meta.trace_id {
        println!("trace_id     : {trace_id}");
    }
    println!("schema       : {}", envelope.meta.schema_version);
    println!("generated_at : {}", envelope.meta.generated_at);
    println!("latency_ms   : {}", envelope.meta.latency_ms);
    println!("fallback_used: {}", envelope.meta.fallback_used);

    if !envelope.meta.warnings.is_empty() {
        println!("warnings:");
        for warning in &envelope.meta.warnings {
            println!("  - {warning}");
        }
    }

    if let Some(summary) = analysis_summary(&envelope.data) {
        println!("summary:");
        for line in summary {
            println!("  {line}");
        }
    }

    println!("data:");
    let pretty_data = serde_json::to_string_pretty(&envelope.data)?;
    for line in pretty_data.lines() {
        println!("  {line}");
    }

    Ok(())
}

fn analysis_summary(data: &Value) -> Option<Vec<String>> {
    let analysis = data.get("analysis")?;
    let market = analysis.get("market")?;
    let text = |value: Option<&Value>| {
        value
            .and_then(Value::as_str)
            .unwrap_or("-")
            .to_owned()
    };

    let mut lines = vec![
        format!(
            "{} ({}) {}",
            text(market.get("symbol")),
            text(market.get("type")),
            text(market.get("name"))
        ),
        format!(
            "price {:.4}  change {:+.2}%",
            market.get("price").and_then(Value::as_f64).unwrap_or_default(),
            market
                .get("change_percent_24h")
                .and_then(Value::as_f64)
                .unwrap_or_default()
        ),
        format!(
            "{} with {}% confidence, {} risk",
            text(analysis.get("recommendation")).to_uppercase(),
            analysis
                .get("confidence")
                .and_then(Value::as_u64)
                .unwrap_or_default(),
            text(analysis.get("risk_score"))
        ),
    ];

    if let Some(reasons) = analysis.get("reasons").and_then(Value::as_array) {
        lines.extend(
            reasons
                .iter()
                .filter_map(Value::as_str)
                .map(|reason| format!("- {reason}")),
        );
    }

    Some(lines)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assetlens_core::EnvelopeMeta;
    use serde_json::json;

    fn envelope(data: Value) -> Envelope<Value> {
        let meta = EnvelopeMeta::new("request-12345", 3, false).expect("meta should be valid");
        Envelope::success(meta, data)
    }

    #[test]
    fn ndjson_splits_result_lists() {
        let lines = ndjson_lines(&envelope(json!({
            "query": "micro",
            "results": [{"symbol": "MSFT"}, {"symbol": "AMD"}]
        })))
        .expect("serializes");

        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains("request-12345"));
        assert_eq!(lines[2], r#"{"symbol":"AMD"}"#);
    }

    #[test]
    fn summary_reads_analysis_payload() {
        let summary = analysis_summary(&json!({
            "analysis": {
                "market": {"symbol": "AAPL", "type": "stock", "name": "Apple Inc.", "price": 175.0, "change_percent_24h": 1.25},
                "recommendation": "buy",
                "confidence": 82,
                "risk_score": "low",
                "reasons": ["Strong positive price momentum"]
            }
        }))
        .expect("analysis payload");

        assert_eq!(summary[0], "AAPL (stock) Apple Inc.");
        assert_eq!(summary[2], "BUY with 82% confidence, low risk");
        assert_eq!(summary[3], "- Strong positive price momentum");
    }

    #[test]
    fn summary_is_absent_for_other_payloads() {
        assert!(analysis_summary(&json!({"results": []})).is_none());
    }
}
