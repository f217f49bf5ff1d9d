//! Volatility breakout strategy.
//!
//! Intraday entry rule keyed off the prior day's trading range: buy when
//! today's close clears the open plus a fraction of yesterday's range.
//! Entry-only; there is no sell branch.

use crate::Strategy;
use advisor_core::error::StrategyError;
use advisor_core::types::{Action, BarSeries, TechnicalSignal};
use advisor_indicators::IndicatorSet;
use serde::{Deserialize, Serialize};
use tracing::debug;

pub const ID: &str = "volatility_breakout";

/// Configuration for the volatility breakout strategy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VolatilityBreakoutConfig {
    /// Fraction of yesterday's range added to today's open.
    pub k: f64,
}

impl Default for VolatilityBreakoutConfig {
    fn default() -> Self {
        Self { k: 0.5 }
    }
}

/// Volatility breakout strategy.
pub struct VolatilityBreakout {
    config: VolatilityBreakoutConfig,
}

impl VolatilityBreakout {
    pub fn new(config: VolatilityBreakoutConfig) -> Self {
        Self { config }
    }
}

impl Default for VolatilityBreakout {
    fn default() -> Self {
        Self::new(VolatilityBreakoutConfig::default())
    }
}

impl Strategy for VolatilityBreakout {
    fn id(&self) -> &str {
        ID
    }

    fn description(&self) -> &str {
        "Buys when today's close breaks above open + k x yesterday's range"
    }

    fn evaluate(
        &self,
        series: &BarSeries,
        _indicators: &IndicatorSet,
    ) -> Result<TechnicalSignal, StrategyError> {
        if series.len() < 2 {
            return Err(StrategyError::InsufficientData {
                required: 2,
                available: series.len(),
            });
        }

        let bars = series.bars();
        let today = &bars[bars.len() - 1];
        let yesterday = &bars[bars.len() - 2];

        let target = today.open + yesterday.range() * self.config.k;
        debug!(target, close = today.close, "volatility breakout check");

        let action = if today.close >= target {
            Action::Buy
        } else {
            Action::Hold
        };

        Ok(TechnicalSignal::new(action, ID))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use advisor_core::types::Bar;
    use advisor_indicators::IndicatorEngine;

    const DAY_MS: i64 = 86_400_000;

    fn evaluate(bars: Vec<Bar>) -> Result<TechnicalSignal, StrategyError> {
        let series = BarSeries::from_bars("TEST".to_string(), bars);
        let indicators = IndicatorEngine::default().compute(&series);
        VolatilityBreakout::default().evaluate(&series, &indicators)
    }

    #[test]
    fn test_single_bar_is_insufficient() {
        let result = evaluate(vec![Bar::new(DAY_MS, 100.0, 101.0, 99.0, 100.5, 1000.0)]);

        assert!(matches!(
            result,
            Err(StrategyError::InsufficientData {
                required: 2,
                available: 1
            })
        ));
    }

    #[test]
    fn test_breakout_buys() {
        // Yesterday 71000/69000 range; target = 70200 + 1000 = 70700
        let signal = evaluate(vec![
            Bar::new(DAY_MS, 70000.0, 71000.0, 69000.0, 70500.0, 1000.0),
            Bar::new(2 * DAY_MS, 70200.0, 71200.0, 70000.0, 70800.0, 1200.0),
        ])
        .unwrap();

        assert_eq!(signal.action, Action::Buy);
        assert_eq!(signal.strategy, "volatility_breakout");
    }

    #[test]
    fn test_below_target_holds() {
        // Same target 70700; close 70600 stays under it
        let signal = evaluate(vec![
            Bar::new(DAY_MS, 70000.0, 71000.0, 69000.0, 70500.0, 1000.0),
            Bar::new(2 * DAY_MS, 70200.0, 71200.0, 70000.0, 70600.0, 1200.0),
        ])
        .unwrap();

        assert_eq!(signal.action, Action::Hold);
    }

    #[test]
    fn test_close_exactly_at_target_buys() {
        let signal = evaluate(vec![
            Bar::new(DAY_MS, 70000.0, 71000.0, 69000.0, 70500.0, 1000.0),
            Bar::new(2 * DAY_MS, 70200.0, 71200.0, 70000.0, 70700.0, 1200.0),
        ])
        .unwrap();

        assert_eq!(signal.action, Action::Buy);
    }
}
