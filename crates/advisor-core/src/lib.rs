//! Core types and traits for the stock advisor.
//!
//! This crate provides the foundational building blocks including:
//! - Market data types (Bar, BarSeries, RealtimeQuote)
//! - Signal and decision types
//! - Collaborator traits for data sources, symbol lookup, and the judge
//! - The error taxonomy

pub mod error;
pub mod traits;
pub mod types;

pub use error::{AdvisorError, AdvisorResult};
pub use traits::*;
pub use types::*;
