//! Decision arbitration.
//!
//! Submits the technical signal plus the aggregated context to the judge
//! and defensively parses the structured reply. Every failure mode yields a
//! valid hold Decision; judgment problems never escape as errors.

use crate::summary::ChartSummary;
use advisor_core::error::JudgeError;
use advisor_core::traits::Judge;
use advisor_core::types::{Action, Decision, TechnicalSignal};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{info, warn};

/// The structured reply shape expected from the judge.
#[derive(Debug, Deserialize)]
struct JudgeReply {
    decision: Option<String>,
    reason: Option<String>,
}

/// Arbitrates the final decision through the judge.
pub struct DecisionArbiter {
    judge: Arc<dyn Judge>,
}

impl DecisionArbiter {
    pub fn new(judge: Arc<dyn Judge>) -> Self {
        Self { judge }
    }

    /// Ask the judge for the final call.
    pub async fn decide(
        &self,
        signal: &TechnicalSignal,
        summary: &ChartSummary,
        context: &str,
    ) -> Decision {
        let prompt = build_prompt(signal, summary, context);

        match self.judge.judge(&prompt).await {
            Ok(reply) => {
                let decision = parse_reply(&reply);
                info!(action = %decision.action, "judgment received");
                decision
            }
            Err(JudgeError::Connection(detail)) => {
                warn!(%detail, "judge unreachable, holding");
                Decision::fallback(format!("judge connection failed: {detail}"))
            }
            Err(e) => {
                warn!(error = %e, "judge reply unusable, holding");
                Decision::fallback(format!("AI error: {e}"))
            }
        }
    }
}

/// Render the judgment prompt.
fn build_prompt(signal: &TechnicalSignal, summary: &ChartSummary, context: &str) -> String {
    format!(
        "You are a dispassionate equity trading analyst.\n\
         Decide a trade action from the information below.\n\
         \n\
         [Technical strategy opinion]\n\
         - Strategy: {strategy}\n\
         - Signal: {signal}\n\
         \n\
         {summary}\n\
         \n\
         [Market context]\n\
         {context}\n\
         Weigh the strategy opinion, the technical snapshot, and the news together,\n\
         pick exactly one of \"buy\", \"sell\" or \"hold\", and explain in one short sentence.\n\
         Respond with only this JSON object:\n\
         {{\"decision\": \"buy\", \"reason\": \"...\"}}",
        strategy = signal.strategy,
        signal = signal.action.as_str().to_uppercase(),
        summary = summary,
        context = context,
    )
}

/// Strip incidental code-fence markup around the reply payload.
fn strip_code_fences(text: &str) -> String {
    text.replace("```json", "").replace("```", "").trim().to_string()
}

/// Parse the reply into a Decision, substituting hold on anything that is
/// not the expected shape.
fn parse_reply(reply: &str) -> Decision {
    let clean = strip_code_fences(reply);

    let parsed: JudgeReply = match serde_json::from_str(&clean) {
        Ok(parsed) => parsed,
        Err(e) => return Decision::fallback(format!("AI error: {e}")),
    };

    let reason = parsed
        .reason
        .unwrap_or_else(|| "no reason given".to_string());

    match parsed.decision.as_deref().map(str::parse::<Action>) {
        Some(Ok(action)) => Decision::ai(action, reason),
        // A well-formed reply with an unknown or missing action still yields
        // a valid Decision: normalize to hold and keep the raw action text
        // in the reason.
        Some(Err(raw)) => Decision::fallback(format!("unrecognized action {raw:?}: {reason}")),
        None => Decision::fallback(format!("no action in reply: {reason}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use advisor_core::types::DecisionOrigin;
    use async_trait::async_trait;

    struct ScriptedJudge {
        reply: Result<String, JudgeError>,
    }

    #[async_trait]
    impl Judge for ScriptedJudge {
        async fn judge(&self, _prompt: &str) -> Result<String, JudgeError> {
            match &self.reply {
                Ok(text) => Ok(text.clone()),
                Err(JudgeError::Connection(d)) => Err(JudgeError::Connection(d.clone())),
                Err(JudgeError::MalformedReply(d)) => Err(JudgeError::MalformedReply(d.clone())),
            }
        }
    }

    fn signal() -> TechnicalSignal {
        TechnicalSignal::new(Action::Buy, "volatility_breakout")
    }

    fn summary() -> ChartSummary {
        use advisor_indicators::IndicatorValue;
        ChartSummary {
            close: 70800.0,
            rsi: IndicatorValue::Value(55.0),
            macd: IndicatorValue::Value(120.0),
        }
    }

    async fn decide(reply: Result<String, JudgeError>) -> Decision {
        let arbiter = DecisionArbiter::new(Arc::new(ScriptedJudge { reply }));
        arbiter.decide(&signal(), &summary(), "context").await
    }

    #[test]
    fn test_prompt_embeds_signal_and_summary() {
        let prompt = build_prompt(&signal(), &summary(), "[Recent news headlines]\n- story\n");

        assert!(prompt.contains("- Strategy: volatility_breakout"));
        assert!(prompt.contains("- Signal: BUY"));
        assert!(prompt.contains("- Close: 70800"));
        assert!(prompt.contains("- RSI: 55.00"));
        assert!(prompt.contains("- story"));
        assert!(prompt.contains("\"decision\""));
    }

    #[tokio::test]
    async fn test_fenced_reply_parses_exactly() {
        let decision = decide(Ok(
            "```json\n{\"decision\": \"buy\", \"reason\": \"momentum confirmed\"}\n```".to_string(),
        ))
        .await;

        assert_eq!(decision.action, Action::Buy);
        assert_eq!(decision.reason, "momentum confirmed");
        assert_eq!(decision.origin, DecisionOrigin::Ai);
    }

    #[tokio::test]
    async fn test_case_insensitive_action() {
        let decision =
            decide(Ok("{\"decision\": \"SELL\", \"reason\": \"overbought\"}".to_string())).await;

        assert_eq!(decision.action, Action::Sell);
        assert_eq!(decision.origin, DecisionOrigin::Ai);
    }

    #[tokio::test]
    async fn test_unparseable_reply_holds_with_detail() {
        let decision = decide(Ok("the market feels bullish today".to_string())).await;

        assert_eq!(decision.action, Action::Hold);
        assert_eq!(decision.origin, DecisionOrigin::Fallback);
        assert!(decision.reason.contains("AI error"));
    }

    #[tokio::test]
    async fn test_unknown_action_normalizes_to_hold() {
        let decision = decide(Ok(
            "{\"decision\": \"strong buy\", \"reason\": \"very bullish\"}".to_string()
        ))
        .await;

        assert_eq!(decision.action, Action::Hold);
        assert_eq!(decision.origin, DecisionOrigin::Fallback);
        assert!(decision.reason.contains("strong buy"));
        assert!(decision.reason.contains("very bullish"));
    }

    #[tokio::test]
    async fn test_connection_failure_holds() {
        let decision =
            decide(Err(JudgeError::Connection("dns lookup failed".to_string()))).await;

        assert_eq!(decision.action, Action::Hold);
        assert_eq!(decision.origin, DecisionOrigin::Fallback);
        assert!(decision.reason.contains("connection"));
    }
}
