//! Trade action and technical signal types.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// A trade action: the output vocabulary shared by the technical strategies
/// and the final decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Buy,
    Sell,
    Hold,
}

impl Action {
    /// Lowercase string form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Buy => "buy",
            Action::Sell => "sell",
            Action::Hold => "hold",
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = String;

    /// Case-insensitive parse; the reasoning service is free with casing.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "buy" => Ok(Action::Buy),
            "sell" => Ok(Action::Sell),
            "hold" => Ok(Action::Hold),
            other => Err(other.to_string()),
        }
    }
}

/// The technical signal produced by a strategy, tagged with the strategy
/// identifier that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TechnicalSignal {
    pub action: Action,
    pub strategy: String,
}

impl TechnicalSignal {
    pub fn new(action: Action, strategy: impl Into<String>) -> Self {
        Self {
            action,
            strategy: strategy.into(),
        }
    }
}
