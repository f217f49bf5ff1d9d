//! Core data types for the advisor.

mod bar;
mod decision;
mod quote;
mod signal;

pub use bar::{Bar, BarSeries};
pub use decision::{Decision, DecisionOrigin};
pub use quote::{QuoteMethod, QuoteStatus, RealtimeQuote};
pub use signal::{Action, TechnicalSignal};
