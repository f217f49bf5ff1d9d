//! Collaborator trait definitions.
//!
//! These are the seams the pipeline is assembled from. Each external
//! dependency (symbol lookup, market data, news, the reasoning service) is
//! injected behind one of these traits so the pipeline stays testable
//! without network access.

use crate::error::{DataError, JudgeError};
use crate::types::{BarSeries, RealtimeQuote};
use async_trait::async_trait;

/// A resolved symbol: exchange code plus display name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolInfo {
    pub code: String,
    pub name: String,
}

/// Symbol lookup collaborator.
///
/// Loaded once at startup and read-only afterwards; injected at pipeline
/// construction rather than held as process-wide state.
pub trait SymbolResolver: Send + Sync {
    /// Resolve a user-supplied name or code to `(code, display name)`.
    fn resolve(&self, input: &str) -> Option<SymbolInfo>;
}

/// Historical daily bar source.
#[async_trait]
pub trait HistorySource: Send + Sync {
    /// Fetch the daily bar series for a code.
    ///
    /// Fails with [`DataError::EmptySeries`] when the source returns zero
    /// usable rows and [`DataError::SchemaError`] when no close-equivalent
    /// field exists. Both are fatal to the analysis.
    async fn fetch_daily(&self, code: &str) -> Result<BarSeries, DataError>;

    /// Get the source name.
    fn name(&self) -> &str;
}

/// One realtime quote acquisition tier.
///
/// Tiers are composed into an ordered list by the resolver; each tier makes
/// a single attempt with a bounded timeout. An empty payload is a tier
/// failure, not an empty success.
#[async_trait]
pub trait QuoteTier: Send + Sync {
    async fn fetch(&self, code: &str) -> Result<RealtimeQuote, DataError>;

    /// Get the tier name, for logging.
    fn name(&self) -> &str;
}

/// Realtime quote resolution over all tiers.
#[async_trait]
pub trait QuoteSource: Send + Sync {
    /// Resolve the best-effort quote, or `None` when every tier is
    /// exhausted. Callers treat `None` as "use the historical close".
    async fn resolve(&self, code: &str) -> Option<RealtimeQuote>;
}

/// News headline collaborator.
#[async_trait]
pub trait HeadlineSource: Send + Sync {
    /// Fetch up to N recent headlines, most recent first. Failures yield an
    /// empty list, never an error.
    async fn headlines(&self, code: &str) -> Vec<String>;
}

/// External reasoning service.
#[async_trait]
pub trait Judge: Send + Sync {
    /// Submit the prompt and return the raw reply text. Connectivity and
    /// shape failures map to [`JudgeError`]; parsing the reply into a
    /// decision is the arbiter's concern.
    async fn judge(&self, prompt: &str) -> Result<String, JudgeError>;
}
