//! Golden cross strategy.
//!
//! Trend following on the short/long SMA crossover: buy when the short
//! average crosses from below to above the long average between yesterday
//! and today, sell on the opposite cross. Warm-up bars with unavailable SMA
//! values hold instead of comparing against substitutes, so a partially
//! warmed series can never fabricate a cross.

use crate::Strategy;
use advisor_core::error::StrategyError;
use advisor_core::types::{Action, BarSeries, TechnicalSignal};
use advisor_indicators::IndicatorSet;
use tracing::debug;

pub const ID: &str = "golden_cross";

/// Golden cross strategy.
///
/// SMA windows come from the indicator configuration; the strategy only
/// reads the resolved columns.
#[derive(Debug, Clone, Copy, Default)]
pub struct GoldenCross;

impl Strategy for GoldenCross {
    fn id(&self) -> &str {
        ID
    }

    fn description(&self) -> &str {
        "Buys on a short-over-long SMA cross, sells on the reverse cross"
    }

    fn evaluate(
        &self,
        series: &BarSeries,
        indicators: &IndicatorSet,
    ) -> Result<TechnicalSignal, StrategyError> {
        if series.len() < 2 {
            return Err(StrategyError::InsufficientData {
                required: 2,
                available: series.len(),
            });
        }

        let curr = series.len() - 1;
        let prev = curr - 1;

        let values = (
            indicators.sma_short(prev).value(),
            indicators.sma_long(prev).value(),
            indicators.sma_short(curr).value(),
            indicators.sma_long(curr).value(),
        );

        let (prev_short, prev_long, curr_short, curr_long) = match values {
            (Some(a), Some(b), Some(c), Some(d)) => (a, b, c, d),
            _ => {
                debug!("SMA warm-up incomplete, holding");
                return Ok(TechnicalSignal::new(Action::Hold, ID));
            }
        };

        debug!(curr_short, curr_long, "golden cross check");

        let action = if prev_short < prev_long && curr_short > curr_long {
            Action::Buy
        } else if prev_short > prev_long && curr_short < curr_long {
            Action::Sell
        } else {
            Action::Hold
        };

        Ok(TechnicalSignal::new(action, ID))
    }
}
