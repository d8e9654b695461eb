use std::time::Instant;

use assetlens_core::advisory::{insights, portfolio_fit};
use assetlens_core::{
    AnalysisResult, AnalyzeRequest, ChartPeriod, Insights, PortfolioFit, RiskTolerance,
};
use serde::Serialize;

use crate::cli::AnalyzeArgs;
use crate::error::CliError;

use super::{CommandResult, Context};

#[derive(Debug, Serialize)]
struct AnalyzeResponseData<'a> {
    risk_tolerance: RiskTolerance,
    analysis: &'a AnalysisResult,
    portfolio_fit: PortfolioFit,
    insights: Insights,
}

pub async fn run(args: &AnalyzeArgs, context: &mut Context) -> Result<CommandResult, CliError> {
    let risk_tolerance = args.risk_tolerance.parse::<RiskTolerance>()?;
    let period = args.period.parse::<ChartPeriod>()?;

    let mut request = AnalyzeRequest::new(&args.symbol).with_risk_tolerance(risk_tolerance);
    if let Some(name) = &args.name {
        request = request.with_name(name.as_str());
    }

    let analyzer = context.analyzer.clone().with_chart_period(period).build();
    let started = Instant::now();
    let analysis = analyzer.analyze(&request).await?;
    let latency_ms = started.elapsed().as_millis() as u64;

    let data = serde_json::to_value(AnalyzeResponseData {
        risk_tolerance,
        analysis: &analysis,
        portfolio_fit: portfolio_fit(&analysis, risk_tolerance),
        insights: insights(&analysis, risk_tolerance),
    })?;

    let mut result = CommandResult::ok(data)
        .with_latency(latency_ms)
        .with_fallback_used(analysis.fallback_used);
    if let Some(warning) = context.record(&analysis, risk_tolerance) {
        result = result.with_warning(warning);
    }

    Ok(result)
}
