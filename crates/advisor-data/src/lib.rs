//! Data acquisition adapters for the advisor.
//!
//! Concrete implementations of the core collaborator traits: the chart
//! history source, the tiered realtime quote resolver, the news headline
//! collector, and the CSV-backed symbol table.

mod history;
mod news;
mod quote;
mod symbols;

pub use history::{ChartClient, ChartConfig};
pub use news::{NewsCollector, NewsConfig};
pub use quote::{HtmlQuoteTier, PriceApiTier, QuoteConfig, QuoteResolver};
pub use symbols::SymbolTable;
