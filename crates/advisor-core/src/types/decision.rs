//! Final decision type.

use super::Action;
use serde::{Deserialize, Serialize};

/// Where a decision came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DecisionOrigin {
    /// Produced by the reasoning service.
    Ai,
    /// Substituted locally after a reasoning-service failure.
    Fallback,
}

/// The final trading recommendation.
///
/// Created once per analysis request; immutable after construction. Every
/// pipeline path, including all failure paths, yields one of these.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Decision {
    pub action: Action,
    pub reason: String,
    pub origin: DecisionOrigin,
}

impl Decision {
    /// A judged decision from the reasoning service.
    pub fn ai(action: Action, reason: impl Into<String>) -> Self {
        Self {
            action,
            reason: reason.into(),
            origin: DecisionOrigin::Ai,
        }
    }

    /// The safe default substituted when judgment is unavailable.
    pub fn fallback(reason: impl Into<String>) -> Self {
        Self {
            action: Action::Hold,
            reason: reason.into(),
            origin: DecisionOrigin::Fallback,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_holds() {
        let decision = Decision::fallback("judge unreachable");
        assert_eq!(decision.action, Action::Hold);
        assert_eq!(decision.origin, DecisionOrigin::Fallback);
    }
}
