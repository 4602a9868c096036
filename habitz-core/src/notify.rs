//! Acknowledgement policy — what the caller should present after an award.
//!
//! A successful award is acknowledged with a small XP toast, except when it
//! also triggered a level-up: the celebration supersedes the routine toast.
//! The two are mutually exclusive for a single event; this module is the
//! single place that decides which one applies.

use serde::Serialize;

use crate::level::LevelUp;
use crate::xp::AwardOutcome;

/// The one acknowledgement the presentation layer should show for an award.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Acknowledgement {
    /// Routine acknowledgement: XP gained, with its reason breakdown.
    Xp {
        /// XP granted.
        amount: u64,
        /// Reason strings, in display order.
        reasons: Vec<String>,
    },
    /// Level-up celebration, replacing the routine toast.
    LevelUp(LevelUp),
}

/// Pick the acknowledgement for an award outcome.
#[must_use]
pub fn acknowledgement_for(outcome: &AwardOutcome) -> Acknowledgement {
    match &outcome.level_up {
        Some(level_up) => Acknowledgement::LevelUp(level_up.clone()),
        None => Acknowledgement::Xp {
            amount: outcome.award.amount,
            reasons: outcome.award.reasons.clone(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xp::XpAward;

    fn outcome(level_up: Option<LevelUp>) -> AwardOutcome {
        AwardOutcome {
            award: XpAward::new(25, vec!["Habit completed".to_string()]),
            new_total: 225,
            previous_level: 1,
            level: if level_up.is_some() { 2 } else { 1 },
            level_up,
        }
    }

    #[test]
    fn routine_award_gets_xp_toast() {
        let ack = acknowledgement_for(&outcome(None));
        assert!(matches!(ack, Acknowledgement::Xp { amount: 25, .. }));
    }

    #[test]
    fn level_up_supersedes_toast() {
        let up = LevelUp {
            from: 1,
            to: 2,
            rewards: vec!["Custom habit colors".to_string()],
        };
        let ack = acknowledgement_for(&outcome(Some(up.clone())));
        assert_eq!(ack, Acknowledgement::LevelUp(up));
    }
}
