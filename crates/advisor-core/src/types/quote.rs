//! Realtime quote types.

use serde::{Deserialize, Serialize};

/// Market state reported alongside a quote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum QuoteStatus {
    Open,
    Unknown,
}

impl std::fmt::Display for QuoteStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QuoteStatus::Open => write!(f, "OPEN"),
            QuoteStatus::Unknown => write!(f, "UNKNOWN"),
        }
    }
}

/// Which acquisition tier produced the quote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuoteMethod {
    Primary,
    Fallback,
}

/// A best-effort realtime quote.
///
/// Constructed fresh per request and never cached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RealtimeQuote {
    /// Last traded price
    pub price: f64,
    /// Day-over-day change, signed percent
    pub rate: f64,
    /// Accumulated volume
    pub volume: u64,
    /// Market state
    pub status: QuoteStatus,
    /// Acquisition tier
    pub method: QuoteMethod,
}
