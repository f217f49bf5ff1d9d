//! Analysis pipeline: context aggregation, decision arbitration, and the
//! orchestrator that fuses history, realtime quote, news, and the external
//! judgment into one Decision.

pub mod arbiter;
pub mod context;
pub mod gemini;
pub mod pipeline;
pub mod summary;

pub use arbiter::DecisionArbiter;
pub use context::build_context;
pub use gemini::{GeminiClient, GeminiConfig};
pub use pipeline::{Analyzer, AnalysisReport};
pub use summary::ChartSummary;
