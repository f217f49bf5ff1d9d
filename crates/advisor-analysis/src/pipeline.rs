//! The analysis pipeline orchestrator.
//!
//! Fuses the four inputs into one Decision. History failures
//! (`EmptySeries`, `SchemaError`) and an unresolvable symbol abort the
//! analysis; a missing quote, missing news, missing indicators, or an
//! unreachable judge all degrade along their documented substitutes and the
//! caller always receives a valid Decision.

use crate::arbiter::DecisionArbiter;
use crate::context::build_context;
use crate::summary::ChartSummary;
use advisor_core::error::{AdvisorError, DataError};
use advisor_core::traits::{HeadlineSource, HistorySource, Judge, QuoteSource, SymbolResolver};
use advisor_core::types::{Decision, TechnicalSignal};
use advisor_indicators::{IndicatorConfig, IndicatorEngine};
use advisor_strategies::StrategyRegistry;
use serde::Serialize;
use std::sync::Arc;
use tracing::info;

/// The caller-facing analysis record.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub code: String,
    pub name: String,
    /// Realtime price when a quote resolved, otherwise the last close.
    pub current_price: f64,
    /// Whether `current_price` came from a realtime quote.
    pub realtime: bool,
    pub signal: TechnicalSignal,
    pub decision: Decision,
    /// Display values (0.0 when unavailable), for rendering only.
    pub rsi: f64,
    pub macd: f64,
}

/// The advisor pipeline with injected collaborators.
pub struct Analyzer {
    resolver: Arc<dyn SymbolResolver>,
    history: Arc<dyn HistorySource>,
    quotes: Arc<dyn QuoteSource>,
    news: Arc<dyn HeadlineSource>,
    arbiter: DecisionArbiter,
    engine: IndicatorEngine,
    registry: StrategyRegistry,
}

impl Analyzer {
    pub fn new(
        resolver: Arc<dyn SymbolResolver>,
        history: Arc<dyn HistorySource>,
        quotes: Arc<dyn QuoteSource>,
        news: Arc<dyn HeadlineSource>,
        judge: Arc<dyn Judge>,
        indicator_config: IndicatorConfig,
    ) -> Self {
        Self {
            resolver,
            history,
            quotes,
            news,
            arbiter: DecisionArbiter::new(judge),
            engine: IndicatorEngine::new(indicator_config),
            registry: StrategyRegistry::new(),
        }
    }

    /// Run one full analysis for a symbol name or code.
    pub async fn analyze(
        &self,
        input: &str,
        strategy_id: &str,
    ) -> Result<AnalysisReport, AdvisorError> {
        let symbol = self
            .resolver
            .resolve(input)
            .ok_or_else(|| DataError::SymbolNotFound(input.to_string()))?;
        let strategy = self.registry.create(strategy_id)?;

        info!(code = %symbol.code, name = %symbol.name, strategy = strategy_id, "analysis started");

        let series = self.history.fetch_daily(&symbol.code).await?;

        // Quote and news have no data dependency on each other; fetch them
        // concurrently.
        let (quote, headlines) = tokio::join!(
            self.quotes.resolve(&symbol.code),
            self.news.headlines(&symbol.code)
        );

        let indicators = self.engine.compute(&series);
        let signal = strategy.evaluate(&series, &indicators)?;
        info!(signal = %signal.action, "technical signal evaluated");

        let summary = ChartSummary::from_series(&series, &indicators);
        let context = build_context(quote.as_ref(), &headlines);
        let decision = self.arbiter.decide(&signal, &summary, &context).await;

        // Realtime price takes precedence over the historical close.
        let (current_price, realtime) = match &quote {
            Some(quote) => (quote.price, true),
            None => (summary.close, false),
        };

        Ok(AnalysisReport {
            code: symbol.code,
            name: symbol.name,
            current_price,
            realtime,
            signal,
            decision,
            rsi: summary.rsi.display_value(),
            macd: summary.macd.display_value(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use advisor_core::error::{JudgeError, StrategyError};
    use advisor_core::traits::SymbolInfo;
    use advisor_core::types::{
        Action, Bar, BarSeries, DecisionOrigin, QuoteMethod, QuoteStatus, RealtimeQuote,
    };
    use async_trait::async_trait;

    const DAY_MS: i64 = 86_400_000;

    struct FixedResolver;

    impl SymbolResolver for FixedResolver {
        fn resolve(&self, input: &str) -> Option<SymbolInfo> {
            (input == "000660").then(|| SymbolInfo {
                code: "000660".to_string(),
                name: "SK하이닉스".to_string(),
            })
        }
    }

    struct FixedHistory {
        bars: Vec<Bar>,
    }

    #[async_trait]
    impl HistorySource for FixedHistory {
        async fn fetch_daily(&self, code: &str) -> Result<BarSeries, DataError> {
            if self.bars.is_empty() {
                return Err(DataError::EmptySeries);
            }
            Ok(BarSeries::from_bars(code.to_string(), self.bars.clone()))
        }

        fn name(&self) -> &str {
            "fixed"
        }
    }

    struct FixedQuote {
        quote: Option<RealtimeQuote>,
    }

    #[async_trait]
    impl QuoteSource for FixedQuote {
        async fn resolve(&self, _code: &str) -> Option<RealtimeQuote> {
            self.quote.clone()
        }
    }

    struct NoNews;

    #[async_trait]
    impl HeadlineSource for NoNews {
        async fn headlines(&self, _code: &str) -> Vec<String> {
            Vec::new()
        }
    }

    struct UnreachableJudge;

    #[async_trait]
    impl Judge for UnreachableJudge {
        async fn judge(&self, _prompt: &str) -> Result<String, JudgeError> {
            Err(JudgeError::Connection("service unreachable".to_string()))
        }
    }

    struct ScriptedJudge {
        reply: String,
        expect_in_prompt: Vec<&'static str>,
    }

    #[async_trait]
    impl Judge for ScriptedJudge {
        async fn judge(&self, prompt: &str) -> Result<String, JudgeError> {
            for needle in &self.expect_in_prompt {
                assert!(prompt.contains(needle), "prompt missing {needle:?}");
            }
            Ok(self.reply.clone())
        }
    }

    fn analyzer(
        bars: Vec<Bar>,
        quote: Option<RealtimeQuote>,
        judge: Arc<dyn Judge>,
    ) -> Analyzer {
        Analyzer::new(
            Arc::new(FixedResolver),
            Arc::new(FixedHistory { bars }),
            Arc::new(FixedQuote { quote }),
            Arc::new(NoNews),
            judge,
            IndicatorConfig::default(),
        )
    }

    /// 25 bars ending in a clear SMA(5)-over-SMA(20) upward cross.
    fn golden_cross_bars() -> Vec<Bar> {
        let mut closes: Vec<f64> = (0..23).map(|i| 110.0 - i as f64 * 0.5).collect();
        closes.push(104.0);
        closes.push(120.0);
        closes
            .iter()
            .enumerate()
            .map(|(i, &close)| {
                Bar::new(
                    (i as i64 + 1) * DAY_MS,
                    close,
                    close + 1.0,
                    close - 1.0,
                    close,
                    1000.0,
                )
            })
            .collect()
    }

    #[tokio::test]
    async fn test_judge_unreachable_forces_hold_fallback() {
        // Golden cross fires on the chart, no quote, no news, judge down:
        // the failure still wins and the caller gets a hold.
        let analyzer = analyzer(golden_cross_bars(), None, Arc::new(UnreachableJudge));

        let report = analyzer.analyze("000660", "golden_cross").await.unwrap();

        assert_eq!(report.decision.action, Action::Hold);
        assert_eq!(report.decision.origin, DecisionOrigin::Fallback);
        assert!(
            report.decision.reason.contains("connection") || report.decision.reason.contains("AI")
        );
        assert!(!report.realtime);
    }

    #[tokio::test]
    async fn test_breakout_with_quote_and_judgment() {
        // Yesterday 71000/69000, today open 70200 close 70800: target 70700
        // is cleared, so the technical signal is buy; the judge confirms.
        let bars = vec![
            Bar::new(DAY_MS, 70000.0, 71000.0, 69000.0, 70500.0, 900_000.0),
            Bar::new(2 * DAY_MS, 70200.0, 71200.0, 70000.0, 70800.0, 800_000.0),
        ];
        let quote = RealtimeQuote {
            price: 70000.0,
            rate: -1.5,
            volume: 500_000,
            status: QuoteStatus::Open,
            method: QuoteMethod::Primary,
        };
        let judge = Arc::new(ScriptedJudge {
            reply: "{\"decision\": \"buy\", \"reason\": \"momentum confirmed\"}".to_string(),
            expect_in_prompt: vec!["- Signal: BUY", "Price: 70000", "No notable news."],
        });

        let analyzer = analyzer(bars, Some(quote), judge);
        let report = analyzer
            .analyze("000660", "volatility_breakout")
            .await
            .unwrap();

        assert_eq!(report.signal.action, Action::Buy);
        assert_eq!(report.decision.action, Action::Buy);
        assert_eq!(report.decision.reason, "momentum confirmed");
        assert_eq!(report.decision.origin, DecisionOrigin::Ai);
        // Realtime price overrides the 70800 close
        assert_eq!(report.current_price, 70000.0);
        assert!(report.realtime);
    }

    #[tokio::test]
    async fn test_unknown_symbol_is_fatal() {
        let analyzer = analyzer(golden_cross_bars(), None, Arc::new(UnreachableJudge));

        let result = analyzer.analyze("NoSuchName", "golden_cross").await;

        assert!(matches!(
            result,
            Err(AdvisorError::Data(DataError::SymbolNotFound(_)))
        ));
    }

    #[tokio::test]
    async fn test_empty_history_is_fatal() {
        let analyzer = analyzer(Vec::new(), None, Arc::new(UnreachableJudge));

        let result = analyzer.analyze("000660", "golden_cross").await;

        assert!(matches!(
            result,
            Err(AdvisorError::Data(DataError::EmptySeries))
        ));
    }

    #[tokio::test]
    async fn test_unknown_strategy_is_fatal() {
        let analyzer = analyzer(golden_cross_bars(), None, Arc::new(UnreachableJudge));

        let result = analyzer.analyze("000660", "momentum").await;

        assert!(matches!(
            result,
            Err(AdvisorError::Strategy(StrategyError::UnknownStrategy(_)))
        ));
    }

    #[tokio::test]
    async fn test_single_bar_breakout_reports_insufficient_data() {
        let bars = vec![Bar::new(DAY_MS, 100.0, 101.0, 99.0, 100.5, 1000.0)];
        let analyzer = analyzer(bars, None, Arc::new(UnreachableJudge));

        let result = analyzer.analyze("000660", "volatility_breakout").await;

        assert!(matches!(
            result,
            Err(AdvisorError::Strategy(StrategyError::InsufficientData { .. }))
        ));
    }
}
