//! RSI + Bollinger band mean-reversion strategy.
//!
//! Counter-trend entries: buy when the market is oversold (low RSI) and the
//! close is at or under the lower Bollinger band; sell when overbought.
//! Either indicator being unavailable holds unconditionally.

use crate::Strategy;
use advisor_core::error::StrategyError;
use advisor_core::types::{Action, BarSeries, TechnicalSignal};
use advisor_indicators::IndicatorSet;
use serde::{Deserialize, Serialize};
use tracing::debug;

pub const ID: &str = "rsi_bollinger";

/// Configuration for the RSI + Bollinger strategy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RsiBollingerConfig {
    /// Buy below this RSI (with band confirmation)
    pub oversold: f64,
    /// Sell above this RSI
    pub overbought: f64,
}

impl Default for RsiBollingerConfig {
    fn default() -> Self {
        Self {
            oversold: 30.0,
            overbought: 70.0,
        }
    }
}

/// RSI + Bollinger band strategy.
pub struct RsiBollinger {
    config: RsiBollingerConfig,
}

impl RsiBollinger {
    pub fn new(config: RsiBollingerConfig) -> Self {
        Self { config }
    }
}

impl Default for RsiBollinger {
    fn default() -> Self {
        Self::new(RsiBollingerConfig::default())
    }
}

impl Strategy for RsiBollinger {
    fn id(&self) -> &str {
        ID
    }

    fn description(&self) -> &str {
        "Buys oversold closes at the lower Bollinger band, sells overbought"
    }

    fn evaluate(
        &self,
        series: &BarSeries,
        indicators: &IndicatorSet,
    ) -> Result<TechnicalSignal, StrategyError> {
        let last = series.last().ok_or(StrategyError::InsufficientData {
            required: 1,
            available: 0,
        })?;
        let curr = series.len() - 1;

        let (rsi, lower) = match (
            indicators.rsi(curr).value(),
            indicators.bollinger_lower(curr).value(),
        ) {
            (Some(rsi), Some(lower)) => (rsi, lower),
            _ => {
                debug!("RSI or Bollinger unavailable, holding");
                return Ok(TechnicalSignal::new(Action::Hold, ID));
            }
        };

        debug!(rsi, lower, close = last.close, "rsi/bollinger check");

        let action = if rsi < self.config.oversold && last.close <= lower {
            Action::Buy
        } else if rsi > self.config.overbought {
            Action::Sell
        } else {
            Action::Hold
        };

        Ok(TechnicalSignal::new(action, ID))
    }
}
