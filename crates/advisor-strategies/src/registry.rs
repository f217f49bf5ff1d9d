//! Strategy registry keyed by strategy identifier.

use crate::{
    golden_cross, rsi_bollinger, volatility_breakout, GoldenCross, RsiBollinger, Strategy,
    VolatilityBreakout,
};
use advisor_core::error::StrategyError;

/// Information about a registered strategy.
#[derive(Debug, Clone)]
pub struct StrategyInfo {
    /// Strategy identifier
    pub id: &'static str,
    /// Strategy description
    pub description: &'static str,
}

/// Registry for the available signal strategies.
#[derive(Debug, Clone, Copy, Default)]
pub struct StrategyRegistry;

impl StrategyRegistry {
    pub fn new() -> Self {
        Self
    }

    /// List all available strategies.
    pub fn list(&self) -> Vec<StrategyInfo> {
        vec![
            StrategyInfo {
                id: volatility_breakout::ID,
                description: "Buys when today's close breaks above open + k x yesterday's range",
            },
            StrategyInfo {
                id: golden_cross::ID,
                description: "Buys on a short-over-long SMA cross, sells on the reverse cross",
            },
            StrategyInfo {
                id: rsi_bollinger::ID,
                description: "Buys oversold closes at the lower Bollinger band, sells overbought",
            },
        ]
    }

    /// Check if a strategy exists.
    pub fn exists(&self, id: &str) -> bool {
        self.list().iter().any(|info| info.id == id)
    }

    /// Create a strategy instance with default configuration.
    pub fn create(&self, id: &str) -> Result<Box<dyn Strategy>, StrategyError> {
        match id {
            volatility_breakout::ID => Ok(Box::new(VolatilityBreakout::default())),
            golden_cross::ID => Ok(Box::new(GoldenCross)),
            rsi_bollinger::ID => Ok(Box::new(RsiBollinger::default())),
            _ => Err(StrategyError::UnknownStrategy(id.to_string())),
        }
    }
}
