//! XP award values — the grant flowing through the award pipeline.

use serde::{Deserialize, Serialize};

use crate::level::LevelUp;

/// XP granted for completing one habit, before any bonuses.
pub const BASE_COMPLETION_XP: u64 = 15;

/// Reason attached to a fallback award when the remote XP resolution is
/// unavailable.
pub const FALLBACK_REASON: &str = "Habit completed (bonus calculation unavailable)";

// ---------------------------------------------------------------------------
// Award
// ---------------------------------------------------------------------------

/// An XP grant for a single qualifying event.
///
/// Ephemeral: created when the event occurs, consumed by the award pipeline,
/// never persisted as an entity. The `reasons` list explains the grant's
/// composition (base completion, streak milestone, first-of-day, perfect
/// day, ...) in presentation-ready strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct XpAward {
    /// XP to add to the ledger.
    pub amount: u64,
    /// Human-readable breakdown of the grant, in display order.
    pub reasons: Vec<String>,
}

impl XpAward {
    /// An award as resolved by the remote computation.
    #[must_use]
    pub fn new(amount: u64, reasons: Vec<String>) -> Self {
        Self { amount, reasons }
    }

    /// The degraded award used when remote resolution fails every attempt:
    /// the base completion reward with a single synthetic reason.
    #[must_use]
    pub fn fallback(base_xp: u64) -> Self {
        Self {
            amount: base_xp,
            reasons: vec![FALLBACK_REASON.to_string()],
        }
    }
}

// ---------------------------------------------------------------------------
// Outcome
// ---------------------------------------------------------------------------

/// The result of one successful award operation, returned to the caller so
/// it can decide what to present. The pipeline itself never drives UI.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AwardOutcome {
    /// The grant that was applied, including its reason breakdown.
    pub award: XpAward,
    /// The ledger total after the write.
    pub new_total: u64,
    /// Level before the grant.
    pub previous_level: u32,
    /// Level after the grant.
    pub level: u32,
    /// Present exactly when the grant crossed a level boundary.
    pub level_up: Option<LevelUp>,
}

impl AwardOutcome {
    /// Whether this award caused a level-up.
    #[must_use]
    pub fn did_level_up(&self) -> bool {
        self.level_up.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_award_carries_base_xp_and_one_reason() {
        let award = XpAward::fallback(BASE_COMPLETION_XP);
        assert_eq!(award.amount, 15);
        assert_eq!(award.reasons.len(), 1);
        assert_eq!(award.reasons[0], FALLBACK_REASON);
    }
}
