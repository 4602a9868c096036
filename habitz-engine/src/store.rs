//! Ledger and resolver ports, plus their implementations.
//!
//! The engine talks to two collaborators: something that computes the XP
//! grant for a completion, and something that holds the durable XP ledger.
//! Production wires both to [`BackendClient`]; tests and local development
//! use [`InMemoryLedger`] and scripted resolvers.

use std::collections::HashMap;

use parking_lot::Mutex;

use habitz_core::level::calculate_level;
use habitz_core::types::{CompletionEvent, LedgerSnapshot, UserId};
use habitz_remote::{AwardBreakdown, BackendClient, RemoteError};

// ---------------------------------------------------------------------------
// Ports
// ---------------------------------------------------------------------------

/// Computes the XP grant for a completion.
///
/// Implementations must be safe to retry: resolving the same event twice
/// must not itself cause side effects.
#[allow(async_fn_in_trait)]
pub trait AwardResolver {
    /// Resolve the XP amount and reason breakdown for one completion.
    async fn resolve_award(
        &self,
        user: &UserId,
        event: &CompletionEvent,
    ) -> Result<AwardBreakdown, RemoteError>;
}

/// Holds the durable XP ledger.
///
/// The ledger is the only shared mutable resource in the system and is
/// arbitrated entirely by the store; every snapshot handed out may already
/// be stale by the time a write based on it arrives. `write_xp` is a
/// compare-and-swap: it succeeds only while the stored total still equals
/// `expected_total`, and the store derives the new level from the new total
/// before returning it.
#[allow(async_fn_in_trait)]
pub trait LedgerStore {
    /// Read the user's current total and derived level.
    async fn read_xp(&self, user: &UserId) -> Result<LedgerSnapshot, RemoteError>;

    /// Write `new_total`, conditioned on the stored total still being
    /// `expected_total`. Fails with [`RemoteError::Conflict`] otherwise.
    async fn write_xp(
        &self,
        user: &UserId,
        new_total: u64,
        expected_total: u64,
    ) -> Result<LedgerSnapshot, RemoteError>;
}

impl<T: AwardResolver> AwardResolver for &T {
    async fn resolve_award(
        &self,
        user: &UserId,
        event: &CompletionEvent,
    ) -> Result<AwardBreakdown, RemoteError> {
        (**self).resolve_award(user, event).await
    }
}

impl<T: LedgerStore> LedgerStore for &T {
    async fn read_xp(&self, user: &UserId) -> Result<LedgerSnapshot, RemoteError> {
        (**self).read_xp(user).await
    }

    async fn write_xp(
        &self,
        user: &UserId,
        new_total: u64,
        expected_total: u64,
    ) -> Result<LedgerSnapshot, RemoteError> {
        (**self).write_xp(user, new_total, expected_total).await
    }
}

// ---------------------------------------------------------------------------
// Hosted backend impls
// ---------------------------------------------------------------------------

impl AwardResolver for BackendClient {
    async fn resolve_award(
        &self,
        user: &UserId,
        event: &CompletionEvent,
    ) -> Result<AwardBreakdown, RemoteError> {
        BackendClient::resolve_award(self, user, event).await
    }
}

impl LedgerStore for BackendClient {
    async fn read_xp(&self, user: &UserId) -> Result<LedgerSnapshot, RemoteError> {
        let row = self.read_ledger(user).await?;
        Ok(LedgerSnapshot {
            total_xp: row.total_xp,
            level: row.current_level,
        })
    }

    async fn write_xp(
        &self,
        user: &UserId,
        new_total: u64,
        expected_total: u64,
    ) -> Result<LedgerSnapshot, RemoteError> {
        let receipt = self.write_ledger(user, new_total, expected_total).await?;
        Ok(LedgerSnapshot {
            total_xp: receipt.total_xp,
            level: receipt.current_level,
        })
    }
}

// ---------------------------------------------------------------------------
// In-memory ledger
// ---------------------------------------------------------------------------

/// Process-local ledger for tests and local development.
///
/// Plays the store's role faithfully: rows must be seeded before use (the
/// hosted backend provisions them at signup), writes are compare-and-swap,
/// and the level is derived from the total on every read and write — the
/// in-process equivalent of the backend's row trigger.
#[derive(Debug, Default)]
pub struct InMemoryLedger {
    rows: Mutex<HashMap<UserId, u64>>,
}

impl InMemoryLedger {
    /// Create an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Provision a row for `user` at `total_xp`, replacing any existing row.
    pub fn seed(&self, user: UserId, total_xp: u64) {
        self.rows.lock().insert(user, total_xp);
    }

    /// The stored total for `user`, if a row exists.
    #[must_use]
    pub fn total(&self, user: &UserId) -> Option<u64> {
        self.rows.lock().get(user).copied()
    }
}

impl LedgerStore for InMemoryLedger {
    async fn read_xp(&self, user: &UserId) -> Result<LedgerSnapshot, RemoteError> {
        let rows = self.rows.lock();
        let total_xp = *rows
            .get(user)
            .ok_or_else(|| RemoteError::LedgerMissing(user.to_string()))?;
        Ok(LedgerSnapshot {
            total_xp,
            level: calculate_level(total_xp).level(),
        })
    }

    async fn write_xp(
        &self,
        user: &UserId,
        new_total: u64,
        expected_total: u64,
    ) -> Result<LedgerSnapshot, RemoteError> {
        let mut rows = self.rows.lock();
        let total = rows
            .get_mut(user)
            .ok_or_else(|| RemoteError::LedgerMissing(user.to_string()))?;
        if *total != expected_total {
            return Err(RemoteError::Conflict {
                expected: expected_total,
            });
        }
        *total = new_total;
        Ok(LedgerSnapshot {
            total_xp: new_total,
            level: calculate_level(new_total).level(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn read_of_unseeded_user_is_missing() {
        let ledger = InMemoryLedger::new();
        let err = ledger.read_xp(&UserId::new()).await.expect_err("missing");
        assert!(matches!(err, RemoteError::LedgerMissing(_)));
    }

    #[tokio::test]
    async fn write_is_compare_and_swap() {
        let ledger = InMemoryLedger::new();
        let user = UserId::new();
        ledger.seed(user, 100);

        // Matching precondition succeeds and derives the level.
        let snapshot = ledger.write_xp(&user, 250, 100).await.expect("write");
        assert_eq!(snapshot.total_xp, 250);
        assert_eq!(snapshot.level, 2);

        // Stale precondition conflicts and leaves the row untouched.
        let err = ledger.write_xp(&user, 999, 100).await.expect_err("stale");
        assert!(err.is_conflict());
        assert_eq!(ledger.total(&user), Some(250));
    }
}
