//! Technical signal strategies.
//!
//! Each strategy is a pure function of a bar series plus its derived
//! indicator set: no I/O, no shared state, one signal per call.

mod golden_cross;
mod registry;
mod rsi_bollinger;
mod volatility_breakout;

pub use golden_cross::GoldenCross;
pub use registry::{StrategyInfo, StrategyRegistry};
pub use rsi_bollinger::{RsiBollinger, RsiBollingerConfig};
pub use volatility_breakout::{VolatilityBreakout, VolatilityBreakoutConfig};

use advisor_core::error::StrategyError;
use advisor_core::types::{BarSeries, TechnicalSignal};
use advisor_indicators::IndicatorSet;

/// Core strategy trait.
///
/// Implementations evaluate the series and its indicators and emit exactly
/// one of buy/sell/hold. An indicator the strategy depends on being
/// unavailable is not an error: the strategy degrades to hold. Structural
/// problems (too few bars to index) surface as
/// [`StrategyError::InsufficientData`].
pub trait Strategy: Send + Sync {
    /// Get the unique identifier of this strategy.
    fn id(&self) -> &str;

    /// Get a description of the strategy.
    fn description(&self) -> &str {
        ""
    }

    /// Evaluate the series and produce a technical signal.
    fn evaluate(
        &self,
        series: &BarSeries,
        indicators: &IndicatorSet,
    ) -> Result<TechnicalSignal, StrategyError>;
}
