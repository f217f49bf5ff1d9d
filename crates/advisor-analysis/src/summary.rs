//! Chart summary handed to the judge.

use advisor_core::types::BarSeries;
use advisor_indicators::{IndicatorSet, IndicatorValue};

/// Snapshot of the latest close and momentum indicators.
///
/// Indicator values stay as [`IndicatorValue`] internally; the 0.0
/// substitution happens only when rendering.
#[derive(Debug, Clone)]
pub struct ChartSummary {
    pub close: f64,
    pub rsi: IndicatorValue,
    pub macd: IndicatorValue,
}

impl ChartSummary {
    /// Build the summary from the latest bar of the series.
    pub fn from_series(series: &BarSeries, indicators: &IndicatorSet) -> Self {
        Self {
            close: series.last().map(|bar| bar.close).unwrap_or(0.0),
            rsi: indicators.latest_rsi(),
            macd: indicators.latest_macd(),
        }
    }
}

impl std::fmt::Display for ChartSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "[Technical snapshot]")?;
        writeln!(f, "- Close: {:.0}", self.close)?;
        writeln!(f, "- RSI: {:.2}", self.rsi.display_value())?;
        write!(f, "- MACD: {:.2}", self.macd.display_value())
    }
}
