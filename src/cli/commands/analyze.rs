//! Analyze command.

use crate::cli::AnalyzeArgs;
use advisor_analysis::{Analyzer, GeminiClient, GeminiConfig};
use advisor_config::{load_config, AppConfig};
use advisor_data::{
    ChartClient, ChartConfig, NewsCollector, NewsConfig, QuoteConfig, QuoteResolver, SymbolTable,
};
use anyhow::{Context, Result};
use std::path::Path;
use std::sync::Arc;

pub async fn run(args: AnalyzeArgs, config_path: Option<&Path>) -> Result<()> {
    let config = load_config(config_path).context("failed to load configuration")?;
    let strategy = args
        .strategy
        .unwrap_or_else(|| config.strategy.default.clone());

    let analyzer = build_analyzer(&config)?;
    let report = analyzer.analyze(&args.symbol, &strategy).await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let price_source = if report.realtime { "realtime" } else { "last close" };

    println!();
    println!("============================================================");
    println!("  {} ({})", report.name, report.code);
    println!("============================================================");
    println!("  Price     : {:.0} ({})", report.current_price, price_source);
    println!("  RSI       : {:.2}", report.rsi);
    println!("  MACD      : {:.2}", report.macd);
    println!("------------------------------------------------------------");
    println!("  Signal    : {} ({})", report.signal.action, report.signal.strategy);
    println!("  Decision  : {} [{}]", report.decision.action, origin_label(&report));
    println!("  Reason    : {}", report.decision.reason);
    println!("============================================================");

    Ok(())
}

fn origin_label(report: &advisor_analysis::AnalysisReport) -> &'static str {
    use advisor_core::types::DecisionOrigin;
    match report.decision.origin {
        DecisionOrigin::Ai => "ai",
        DecisionOrigin::Fallback => "fallback",
    }
}

/// Wire the concrete collaborators into the pipeline.
fn build_analyzer(config: &AppConfig) -> Result<Analyzer> {
    let symbols = match &config.symbols.listing_path {
        Some(path) => SymbolTable::from_csv_path(Path::new(path))
            .with_context(|| format!("failed to load symbol listing from {path}"))?,
        None => SymbolTable::empty(),
    };

    let history = ChartClient::new(ChartConfig {
        base_url: config.history.base_url.clone(),
        range: config.history.range.clone(),
        interval: config.history.interval.clone(),
        symbol_suffix: config.history.symbol_suffix.clone(),
        timeout_secs: config.history.timeout_secs,
    })?;

    let quotes = QuoteResolver::standard(QuoteConfig {
        api_base_url: config.quote.api_base_url.clone(),
        web_base_url: config.quote.web_base_url.clone(),
        timeout_secs: config.quote.timeout_secs,
    })?;

    let news = NewsCollector::new(NewsConfig {
        base_url: config.news.base_url.clone(),
        max_headlines: config.news.max_headlines,
        timeout_secs: config.news.timeout_secs,
    })?;

    let judge = GeminiClient::new(GeminiConfig {
        api_key_env: config.judge.api_key_env.clone(),
        model: config.judge.model.clone(),
        base_url: config.judge.base_url.clone(),
        timeout_secs: config.judge.timeout_secs,
    })?;

    Ok(Analyzer::new(
        Arc::new(symbols),
        Arc::new(history),
        Arc::new(quotes),
        Arc::new(news),
        Arc::new(judge),
        config.indicators.clone(),
    ))
}
