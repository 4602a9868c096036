//! Core type definitions for the HABITZ progression system.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Identity Types
// ---------------------------------------------------------------------------

/// Unique identifier for a user, issued by the external identity provider.
///
/// The core never authenticates; it only receives an already-authenticated
/// identity and threads it into every ledger call. There is no ambient
/// session state anywhere in this workspace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(pub Uuid);

impl UserId {
    /// Create a new random user ID.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

/// Unique identifier for a habit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HabitId(pub Uuid);

impl HabitId {
    /// Create a new random habit ID.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for HabitId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for HabitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Events
// ---------------------------------------------------------------------------

/// A qualifying action that earns XP: one habit checked off for one day.
///
/// Ephemeral — constructed at the moment the completion is recorded, consumed
/// by the award pipeline, then discarded. Exactly-once semantics per
/// real-world completion are the caller's responsibility (check that no
/// completion already exists for the day before awarding); the pipeline does
/// not deduplicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionEvent {
    /// Which habit was completed.
    pub habit: HabitId,
    /// The day the completion counts for.
    pub completed_on: NaiveDate,
}

impl CompletionEvent {
    /// Create a completion event for a habit on a given day.
    #[must_use]
    pub fn new(habit: HabitId, completed_on: NaiveDate) -> Self {
        Self {
            habit,
            completed_on,
        }
    }
}

// ---------------------------------------------------------------------------
// Ledger
// ---------------------------------------------------------------------------

/// A point-in-time view of a user's XP ledger as reported by the store.
///
/// The ledger itself is owned by the external store; every snapshot may be
/// stale by the time a write based on it lands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    /// Cumulative XP. Never spent or deducted by this system.
    pub total_xp: u64,
    /// The level the store has derived from `total_xp`.
    pub level: u32,
}

impl LedgerSnapshot {
    /// Snapshot for a brand-new ledger (zero XP, level 1).
    #[must_use]
    pub fn initial() -> Self {
        Self {
            total_xp: 0,
            level: 1,
        }
    }
}
