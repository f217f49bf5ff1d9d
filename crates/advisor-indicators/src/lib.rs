//! Technical indicators for the advisor.
//!
//! This crate provides the indicator computations (SMA, EMA, RSI, MACD,
//! Bollinger Bands) and the [`IndicatorEngine`] that derives them over a bar
//! series, normalizing the raw, library-style column names into the fixed
//! [`IndicatorSet`] vocabulary the strategies consume.

pub mod engine;
pub mod momentum;
pub mod moving_average;
pub mod volatility;

pub use engine::{ColumnFrame, IndicatorConfig, IndicatorEngine, IndicatorSet, IndicatorValue};
pub use momentum::{Macd, MacdOutput, Rsi};
pub use moving_average::{Ema, Sma};
pub use volatility::{BollingerBands, BollingerOutput};

/// Trait for single-output technical indicators.
pub trait Indicator: Send + Sync {
    /// Calculate indicator values for the given data.
    ///
    /// Returns one value per input window; the first output corresponds to
    /// the earliest input index with a full window.
    fn calculate(&self, data: &[f64]) -> Vec<f64>;

    /// Get the minimum data points required.
    fn period(&self) -> usize;

    /// Get the name of the indicator.
    fn name(&self) -> &str;
}
