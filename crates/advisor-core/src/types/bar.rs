//! Daily OHLCV bar types.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// One day's open/high/low/close/volume for a symbol.
///
/// Close is never absent in a constructed bar; sources that only carry an
/// adjusted close promote it to `close` during ingest.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    /// Unix timestamp in milliseconds
    pub timestamp: i64,
    /// Opening price
    pub open: f64,
    /// Highest price
    pub high: f64,
    /// Lowest price
    pub low: f64,
    /// Closing price
    pub close: f64,
    /// Trading volume
    pub volume: f64,
}

impl Bar {
    /// Create a new bar.
    pub fn new(timestamp: i64, open: f64, high: f64, low: f64, close: f64, volume: f64) -> Self {
        Self {
            timestamp,
            open,
            high,
            low,
            close,
            volume,
        }
    }

    /// Calculate the bar's range (high - low).
    #[inline]
    pub fn range(&self) -> f64 {
        self.high - self.low
    }

    /// Get the timestamp as a DateTime.
    pub fn datetime(&self) -> DateTime<Utc> {
        DateTime::from_timestamp_millis(self.timestamp)
            .unwrap_or_else(|| DateTime::from_timestamp(0, 0).unwrap())
    }

    /// Get the calendar date of the bar.
    pub fn date(&self) -> NaiveDate {
        self.datetime().date_naive()
    }
}

/// Ordered daily bar series for one symbol.
///
/// Invariants: bars are ordered by timestamp ascending and no two bars share
/// a calendar date. Both are enforced on construction.
#[derive(Debug, Clone)]
pub struct BarSeries {
    /// Symbol identifier
    pub symbol: String,
    bars: Vec<Bar>,
}

impl BarSeries {
    /// Create an empty series.
    pub fn new(symbol: String) -> Self {
        Self {
            symbol,
            bars: Vec::new(),
        }
    }

    /// Build a series from raw bars, normalizing to the series invariants:
    /// bars are sorted ascending and duplicate dates keep the last row seen
    /// (chart sources occasionally repeat the live bar).
    pub fn from_bars(symbol: String, mut bars: Vec<Bar>) -> Self {
        bars.sort_by_key(|b| b.timestamp);

        let mut deduped: Vec<Bar> = Vec::with_capacity(bars.len());
        for bar in bars {
            match deduped.last_mut() {
                Some(last) if last.date() == bar.date() => *last = bar,
                _ => deduped.push(bar),
            }
        }

        Self {
            symbol,
            bars: deduped,
        }
    }

    /// Get the number of bars.
    #[inline]
    pub fn len(&self) -> usize {
        self.bars.len()
    }

    /// Check if the series is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// Get all bars as a slice.
    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    /// Get the last bar.
    pub fn last(&self) -> Option<&Bar> {
        self.bars.last()
    }

    /// Get a bar by index (0 = oldest).
    pub fn get(&self, index: usize) -> Option<&Bar> {
        self.bars.get(index)
    }

    /// Extract close prices as a vector.
    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.close).collect()
    }

    /// Extract open prices as a vector.
    pub fn opens(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.open).collect()
    }

    /// Extract high prices as a vector.
    pub fn highs(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.high).collect()
    }

    /// Extract low prices as a vector.
    pub fn lows(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.low).collect()
    }

    /// Get an iterator over the bars.
    pub fn iter(&self) -> impl Iterator<Item = &Bar> {
        self.bars.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DAY_MS: i64 = 86_400_000;

    #[test]
    fn test_bar_range_and_date() {
        let bar = Bar::new(DAY_MS, 100.0, 110.0, 95.0, 105.0, 1_000_000.0);

        assert!((bar.range() - 15.0).abs() < 1e-10);
        assert_eq!(bar.date().to_string(), "1970-01-02");
    }

    #[test]
    fn test_from_bars_sorts_ascending() {
        let series = BarSeries::from_bars(
            "TEST".to_string(),
            vec![
                Bar::new(3 * DAY_MS, 1.0, 2.0, 0.5, 1.5, 10.0),
                Bar::new(DAY_MS, 1.0, 2.0, 0.5, 1.0, 10.0),
                Bar::new(2 * DAY_MS, 1.0, 2.0, 0.5, 1.2, 10.0),
            ],
        );

        let closes = series.closes();
        assert_eq!(closes, vec![1.0, 1.2, 1.5]);
    }

    #[test]
    fn test_from_bars_dedupes_dates_last_wins() {
        // Two bars on the same calendar date; the later row replaces the
        // earlier one.
        let series = BarSeries::from_bars(
            "TEST".to_string(),
            vec![
                Bar::new(DAY_MS, 1.0, 2.0, 0.5, 1.0, 10.0),
                Bar::new(DAY_MS + 3600_000, 1.0, 2.0, 0.5, 1.3, 20.0),
                Bar::new(2 * DAY_MS, 1.0, 2.0, 0.5, 1.5, 10.0),
            ],
        );

        assert_eq!(series.len(), 2);
        assert!((series.get(0).unwrap().close - 1.3).abs() < 1e-10);
    }

    #[test]
    fn test_extractions() {
        let series = BarSeries::from_bars(
            "TEST".to_string(),
            vec![
                Bar::new(DAY_MS, 100.0, 101.0, 99.0, 100.5, 1000.0),
                Bar::new(2 * DAY_MS, 100.5, 102.0, 100.0, 101.5, 2000.0),
            ],
        );

        assert_eq!(series.closes(), vec![100.5, 101.5]);
        assert_eq!(series.highs(), vec![101.0, 102.0]);
        assert_eq!(series.last().unwrap().volume, 2000.0);
    }
}
