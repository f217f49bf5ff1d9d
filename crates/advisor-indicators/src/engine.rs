//! Indicator derivation engine.
//!
//! Computation produces a [`ColumnFrame`] of raw columns carrying
//! library-style, period-suffixed names ("SMA_5", "RSI_14", "MACD_12_26_9",
//! "BBL_20_2.0"). Those names vary with parameterization and casing, so a
//! single mapping step resolves them into the fixed [`IndicatorSet`]
//! vocabulary by case-insensitive prefix scan; the rest of the system never
//! sees a raw column name.
//!
//! A warm-up cell (NaN) and a missing column both surface as
//! [`IndicatorValue::Unavailable`]. The 0.0 substitution exists only for
//! human-readable display; strategy logic must branch on availability.

use crate::momentum::{Macd, Rsi};
use crate::moving_average::Sma;
use crate::volatility::BollingerBands;
use crate::Indicator;
use advisor_core::types::BarSeries;
use serde::{Deserialize, Serialize};

/// A derived indicator cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum IndicatorValue {
    Value(f64),
    /// Warm-up NaN or a column that never materialized.
    Unavailable,
}

impl IndicatorValue {
    fn from_raw(value: f64) -> Self {
        if value.is_nan() {
            IndicatorValue::Unavailable
        } else {
            IndicatorValue::Value(value)
        }
    }

    /// Get the numeric value, if available.
    pub fn value(&self) -> Option<f64> {
        match self {
            IndicatorValue::Value(v) => Some(*v),
            IndicatorValue::Unavailable => None,
        }
    }

    /// Whether a computed value is present.
    pub fn is_available(&self) -> bool {
        matches!(self, IndicatorValue::Value(_))
    }

    /// Numeric form for summaries and display: unavailable renders as 0.0.
    /// Decision logic must use [`IndicatorValue::value`] instead.
    pub fn display_value(&self) -> f64 {
        self.value().unwrap_or(0.0)
    }
}

/// Raw computed columns in insertion order.
///
/// Column names are whatever the computation produced; lookups normalize to
/// lowercase and select the first prefix match, so differently-cased or
/// period-suffixed variants of the same semantic output resolve
/// deterministically to exactly one column.
#[derive(Debug, Default)]
pub struct ColumnFrame {
    columns: Vec<(String, Vec<f64>)>,
}

impl ColumnFrame {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a named column.
    pub fn push(&mut self, name: impl Into<String>, values: Vec<f64>) {
        self.columns.push((name.into(), values));
    }

    /// Resolve the first column whose lowercased name starts with `prefix`,
    /// skipping names that end with one of `excluded_suffixes` (also
    /// compared lowercased).
    pub fn resolve(&self, prefix: &str, excluded_suffixes: &[&str]) -> Option<&[f64]> {
        self.columns
            .iter()
            .find(|(name, _)| {
                let normalized = name.to_lowercase();
                normalized.starts_with(prefix)
                    && !excluded_suffixes
                        .iter()
                        .any(|suffix| normalized.ends_with(suffix))
            })
            .map(|(_, values)| values.as_slice())
    }
}

/// Indicator parameterization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndicatorConfig {
    /// Short SMA window
    pub sma_short: usize,
    /// Long SMA window
    pub sma_long: usize,
    /// RSI period
    pub rsi_period: usize,
    /// MACD fast EMA period
    pub macd_fast: usize,
    /// MACD slow EMA period
    pub macd_slow: usize,
    /// MACD signal EMA period
    pub macd_signal: usize,
    /// Bollinger window
    pub bollinger_period: usize,
    /// Bollinger standard-deviation multiplier
    pub bollinger_std: f64,
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        Self {
            sma_short: 5,
            sma_long: 20,
            rsi_period: 14,
            macd_fast: 12,
            macd_slow: 26,
            macd_signal: 9,
            bollinger_period: 20,
            bollinger_std: 2.0,
        }
    }
}

/// The fixed logical indicator vocabulary, aligned to the bar series.
///
/// Every column is padded to the series length; index N addresses bar N.
#[derive(Debug, Clone, Default)]
pub struct IndicatorSet {
    len: usize,
    sma_short: Option<Vec<f64>>,
    sma_long: Option<Vec<f64>>,
    rsi: Option<Vec<f64>>,
    macd: Option<Vec<f64>>,
    bollinger_lower: Option<Vec<f64>>,
}

impl IndicatorSet {
    /// Resolve the logical keys out of a raw frame.
    pub fn from_frame(frame: &ColumnFrame, config: &IndicatorConfig, len: usize) -> Self {
        let own = |values: Option<&[f64]>| values.map(|v| v.to_vec());

        Self {
            len,
            sma_short: own(frame.resolve(&format!("sma_{}", config.sma_short), &[])),
            sma_long: own(frame.resolve(&format!("sma_{}", config.sma_long), &[])),
            rsi: own(frame.resolve("rsi", &[])),
            // The plain line starts with "macd_"; histogram/signal variants
            // ("macdh_", "macds_") fail the prefix, and the suffix exclusion
            // guards sources that name them by trailing letter instead.
            macd: own(frame.resolve("macd_", &["h", "s"])),
            bollinger_lower: own(frame.resolve("bbl", &[])),
        }
    }

    fn at(column: &Option<Vec<f64>>, index: usize) -> IndicatorValue {
        match column {
            Some(values) => values
                .get(index)
                .copied()
                .map(IndicatorValue::from_raw)
                .unwrap_or(IndicatorValue::Unavailable),
            None => IndicatorValue::Unavailable,
        }
    }

    /// Number of bars the set is aligned to.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the set is aligned to an empty series.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Short SMA at a bar index.
    pub fn sma_short(&self, index: usize) -> IndicatorValue {
        Self::at(&self.sma_short, index)
    }

    /// Long SMA at a bar index.
    pub fn sma_long(&self, index: usize) -> IndicatorValue {
        Self::at(&self.sma_long, index)
    }

    /// RSI at a bar index.
    pub fn rsi(&self, index: usize) -> IndicatorValue {
        Self::at(&self.rsi, index)
    }

    /// MACD line at a bar index.
    pub fn macd(&self, index: usize) -> IndicatorValue {
        Self::at(&self.macd, index)
    }

    /// Bollinger lower band at a bar index.
    pub fn bollinger_lower(&self, index: usize) -> IndicatorValue {
        Self::at(&self.bollinger_lower, index)
    }

    /// RSI at the latest bar.
    pub fn latest_rsi(&self) -> IndicatorValue {
        self.latest(Self::rsi)
    }

    /// MACD line at the latest bar.
    pub fn latest_macd(&self) -> IndicatorValue {
        self.latest(Self::macd)
    }

    fn latest(&self, get: fn(&Self, usize) -> IndicatorValue) -> IndicatorValue {
        if self.len == 0 {
            IndicatorValue::Unavailable
        } else {
            get(self, self.len - 1)
        }
    }
}

/// Derives the indicator set for a bar series.
#[derive(Debug, Clone, Default)]
pub struct IndicatorEngine {
    config: IndicatorConfig,
}

impl IndicatorEngine {
    pub fn new(config: IndicatorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &IndicatorConfig {
        &self.config
    }

    /// Compute all indicators over the series closes and map them into the
    /// fixed vocabulary. Insufficient data never errors here; short columns
    /// simply stay NaN-padded and resolve to `Unavailable`.
    pub fn compute(&self, series: &BarSeries) -> IndicatorSet {
        let closes = series.closes();
        let len = closes.len();
        let cfg = &self.config;

        let mut frame = ColumnFrame::new();

        frame.push(
            format!("SMA_{}", cfg.sma_short),
            pad_front(Sma::new(cfg.sma_short).calculate(&closes), len),
        );
        frame.push(
            format!("SMA_{}", cfg.sma_long),
            pad_front(Sma::new(cfg.sma_long).calculate(&closes), len),
        );
        frame.push(
            format!("RSI_{}", cfg.rsi_period),
            pad_front(Rsi::new(cfg.rsi_period).calculate(&closes), len),
        );

        let macd = Macd::with_periods(cfg.macd_fast, cfg.macd_slow, cfg.macd_signal);
        let macd_suffix = format!("{}_{}_{}", cfg.macd_fast, cfg.macd_slow, cfg.macd_signal);
        let outputs = macd.calculate(&closes);
        frame.push(
            format!("MACD_{macd_suffix}"),
            pad_front(macd.line(&closes), len),
        );
        frame.push(
            format!("MACDh_{macd_suffix}"),
            pad_front(outputs.iter().map(|o| o.histogram).collect(), len),
        );
        frame.push(
            format!("MACDs_{macd_suffix}"),
            pad_front(outputs.iter().map(|o| o.signal).collect(), len),
        );

        let bands =
            BollingerBands::with_params(cfg.bollinger_period, cfg.bollinger_std).calculate(&closes);
        let bb_suffix = format!("{}_{:.1}", cfg.bollinger_period, cfg.bollinger_std);
        frame.push(
            format!("BBL_{bb_suffix}"),
            pad_front(bands.iter().map(|b| b.lower).collect(), len),
        );
        frame.push(
            format!("BBM_{bb_suffix}"),
            pad_front(bands.iter().map(|b| b.middle).collect(), len),
        );
        frame.push(
            format!("BBU_{bb_suffix}"),
            pad_front(bands.iter().map(|b| b.upper).collect(), len),
        );

        IndicatorSet::from_frame(&frame, cfg, len)
    }
}

/// Left-pad a computed column with NaN so index N addresses bar N.
fn pad_front(values: Vec<f64>, len: usize) -> Vec<f64> {
    let pad = len.saturating_sub(values.len());
    let mut out = vec![f64::NAN; pad];
    out.extend(values);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use advisor_core::types::Bar;

    const DAY_MS: i64 = 86_400_000;

    fn series_from_closes(closes: &[f64]) -> BarSeries {
        let bars = closes
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
            .collect();
        BarSeries::from_bars("TEST".to_string(), bars)
    }

    #[test]
    fn test_resolution_case_insensitive_first_match() {
        let mut frame = ColumnFrame::new();
        frame.push("RSI_14", vec![55.0]);
        frame.push("rsi_14_copy", vec![99.0]);

        // Two differently-cased candidates; exactly the first in scan order
        // wins.
        let resolved = frame.resolve("rsi", &[]).unwrap();
        assert_eq!(resolved, &[55.0]);
    }

    #[test]
    fn test_resolution_excludes_macd_variants() {
        let mut frame = ColumnFrame::new();
        frame.push("MACDh_12_26_9", vec![1.0]);
        frame.push("MACDs_12_26_9", vec![2.0]);
        frame.push("MACD_12_26_9", vec![3.0]);

        let resolved = frame.resolve("macd_", &["h", "s"]).unwrap();
        assert_eq!(resolved, &[3.0]);
    }

    #[test]
    fn test_resolution_suffix_exclusion() {
        let mut frame = ColumnFrame::new();
        frame.push("macd_h", vec![1.0]);
        frame.push("macd_line", vec![2.0]);

        let resolved = frame.resolve("macd_", &["h", "s"]).unwrap();
        assert_eq!(resolved, &[2.0]);
    }

    #[test]
    fn test_missing_column_is_unavailable() {
        let frame = ColumnFrame::new();
        let set = IndicatorSet::from_frame(&frame, &IndicatorConfig::default(), 5);

        assert_eq!(set.rsi(4), IndicatorValue::Unavailable);
        assert!((set.rsi(4).display_value() - 0.0).abs() < 1e-10);
    }

    #[test]
    fn test_warmup_nan_is_unavailable_not_zero() {
        let set = IndicatorEngine::default().compute(&series_from_closes(&[100.0; 25]));

        // Long SMA needs 20 bars: index 18 is warm-up, index 19 is the first
        // real value.
        assert_eq!(set.sma_long(18), IndicatorValue::Unavailable);
        assert_eq!(set.sma_long(19), IndicatorValue::Value(100.0));
        // Display substitution maps warm-up to 0.0, distinct from the
        // computed 100.0
        assert!((set.sma_long(18).display_value() - 0.0).abs() < 1e-10);
    }

    #[test]
    fn test_compute_alignment() {
        let closes: Vec<f64> = (0..30).map(|i| 100.0 + i as f64).collect();
        let set = IndicatorEngine::default().compute(&series_from_closes(&closes));

        assert_eq!(set.len(), 30);
        // Short SMA of the last 5 closes of a +1/day ramp
        let expected = (125.0 + 126.0 + 127.0 + 128.0 + 129.0) / 5.0;
        assert_eq!(set.sma_short(29), IndicatorValue::Value(expected));
        // RSI of a strict uptrend saturates at 100
        assert_eq!(set.latest_rsi(), IndicatorValue::Value(100.0));
        // MACD line exists (26-bar warm-up satisfied)
        assert!(set.latest_macd().is_available());
        // Bollinger lower band sits below the middle of the window
        assert!(set.bollinger_lower(29).value().unwrap() < expected);
    }

    #[test]
    fn test_short_series_degrades_to_unavailable() {
        let set = IndicatorEngine::default().compute(&series_from_closes(&[100.0, 101.0]));

        assert_eq!(set.latest_rsi(), IndicatorValue::Unavailable);
        assert_eq!(set.latest_macd(), IndicatorValue::Unavailable);
        assert_eq!(set.sma_long(1), IndicatorValue::Unavailable);
    }
}
