//! Error types for the advisor pipeline.

use thiserror::Error;

/// Top-level advisor error.
#[derive(Error, Debug)]
pub enum AdvisorError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Data error: {0}")]
    Data(#[from] DataError),

    #[error("Indicator error: {0}")]
    Indicator(#[from] IndicatorError),

    #[error("Strategy error: {0}")]
    Strategy(#[from] StrategyError),

    #[error("Judge error: {0}")]
    Judge(#[from] JudgeError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Market-data acquisition errors.
#[derive(Error, Debug)]
pub enum DataError {
    #[error("Symbol not found: {0}")]
    SymbolNotFound(String),

    /// The history source returned zero usable rows. Fatal to the analysis.
    #[error("History source returned an empty series")]
    EmptySeries,

    /// The history payload carries no close-equivalent field. Fatal.
    #[error("History schema error: {0}")]
    SchemaError(String),

    /// Every realtime quote tier was exhausted. Non-fatal; callers fall
    /// back to the historical close.
    #[error("Realtime quote unavailable")]
    QuoteUnavailable,

    /// The headline collector failed. Non-fatal; callers get an empty list.
    #[error("News unavailable: {0}")]
    NewsUnavailable(String),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Parse error: {0}")]
    Parse(String),
}

/// Indicator derivation errors.
#[derive(Error, Debug)]
pub enum IndicatorError {
    #[error("Insufficient data: need {required} points, have {available}")]
    InsufficientData { required: usize, available: usize },

    /// An expected derived field is missing after computation. Strategies
    /// that depend on it degrade to hold; this never reaches the caller.
    #[error("Indicator unavailable: {0}")]
    Unavailable(String),
}

/// Strategy evaluation errors.
#[derive(Error, Debug)]
pub enum StrategyError {
    #[error("Insufficient data: need {required} bars, have {available}")]
    InsufficientData { required: usize, available: usize },

    #[error("Unknown strategy: {0}")]
    UnknownStrategy(String),
}

/// Reasoning-service errors.
#[derive(Error, Debug)]
pub enum JudgeError {
    /// Connectivity or initialization failure before or during the call.
    #[error("connection failed: {0}")]
    Connection(String),

    /// The reply was received but is not the expected structured shape.
    #[error("malformed reply: {0}")]
    MalformedReply(String),
}

/// Result type alias for advisor operations.
pub type AdvisorResult<T> = Result<T, AdvisorError>;
