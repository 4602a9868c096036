//! The award pipeline — grant XP for a completion and report what changed.

use std::time::Duration;

use thiserror::Error;
use tokio::time::sleep;
use tracing::{debug, info, warn};

use habitz_core::config::HabitzConfig;
use habitz_core::level::{LevelProgress, calculate_level, check_level_up};
use habitz_core::types::{CompletionEvent, LedgerSnapshot, UserId};
use habitz_core::xp::{AwardOutcome, XpAward};
use habitz_remote::RemoteError;

use crate::cache::LevelCache;
use crate::store::{AwardResolver, LedgerStore};

/// Errors surfaced by the award pipeline.
///
/// Resolution failures never appear here — they degrade into the base-reward
/// fallback. Only ledger traffic is fatal.
#[derive(Debug, Error)]
pub enum AwardError {
    /// The ledger baseline could not be read; no write was attempted.
    #[error("Failed to read XP ledger")]
    LedgerRead(#[source] RemoteError),

    /// The ledger write failed; the ledger still holds its pre-call total.
    #[error("Failed to write XP ledger")]
    LedgerWrite(#[source] RemoteError),

    /// Every conditional write attempt lost to a concurrent writer.
    #[error("Ledger write contention persisted after {attempts} attempts")]
    WriteContention {
        /// How many compare-and-swap attempts were made.
        attempts: u32,
    },
}

/// Orchestrates XP awards against a resolver and a ledger store.
///
/// One instance serves many users; all state lives in the store and the
/// per-user level cache.
pub struct AwardEngine<R, S> {
    resolver: R,
    store: S,
    cache: LevelCache,
    cache_enabled: bool,
    base_completion_xp: u64,
    max_resolve_attempts: u32,
    retry_backoff_ms: u64,
    max_write_attempts: u32,
}

impl<R, S> AwardEngine<R, S>
where
    R: AwardResolver,
    S: LedgerStore,
{
    /// Create an engine from the workspace configuration.
    #[must_use]
    pub fn new(resolver: R, store: S, config: &HabitzConfig) -> Self {
        info!(
            base_xp = config.award.base_completion_xp,
            resolve_attempts = config.award.max_resolve_attempts,
            write_attempts = config.award.max_write_attempts,
            "Award engine ready"
        );
        Self {
            resolver,
            store,
            cache: LevelCache::new(config.cache.capacity),
            cache_enabled: config.cache.enabled,
            base_completion_xp: config.award.base_completion_xp,
            max_resolve_attempts: config.award.max_resolve_attempts.max(1),
            retry_backoff_ms: config.award.retry_backoff_ms,
            max_write_attempts: config.award.max_write_attempts.max(1),
        }
    }

    // ------------------------------------------------------------------
    // Award
    // ------------------------------------------------------------------

    /// Grant XP for one habit completion.
    ///
    /// Resolves the amount (degrading to the base reward if the resolver
    /// stays unusable), reads the ledger baseline, commits the new total as
    /// a compare-and-swap, and reports whether the grant crossed a level
    /// boundary. Exactly one durable write per successful call.
    ///
    /// Not idempotent per event — callers must ensure a completion is only
    /// awarded once.
    ///
    /// # Errors
    ///
    /// [`AwardError::LedgerRead`] / [`AwardError::LedgerWrite`] on fatal
    /// store failures (the ledger is left at its pre-call total), and
    /// [`AwardError::WriteContention`] when concurrent writers win every
    /// conditional attempt.
    pub async fn award_for_completion(
        &self,
        user: &UserId,
        event: &CompletionEvent,
    ) -> Result<AwardOutcome, AwardError> {
        let award = self.resolve_with_retry(user, event).await;

        let baseline = self
            .store
            .read_xp(user)
            .await
            .map_err(AwardError::LedgerRead)?;

        let (old_total, new_total) = self.write_with_cas(user, baseline, award.amount).await?;

        // Report from the pair that won the write, independent of whatever
        // level the store derived.
        let level_up = check_level_up(old_total, new_total);
        if let Some(up) = &level_up {
            info!(%user, from = up.from, to = up.to, "Level up");
        }

        if self.cache_enabled {
            self.cache.invalidate(user);
        }

        Ok(AwardOutcome {
            previous_level: calculate_level(old_total).level(),
            level: calculate_level(new_total).level(),
            new_total,
            level_up,
            award,
        })
    }

    /// Resolve the XP grant, retrying transient failures, falling back to
    /// the base completion reward when every attempt fails. Never errors.
    ///
    /// Backoff is linear: retry n waits `n × retry_backoff_ms` first.
    async fn resolve_with_retry(&self, user: &UserId, event: &CompletionEvent) -> XpAward {
        let mut last_error = String::new();

        for attempt in 1..=self.max_resolve_attempts {
            if attempt > 1 {
                let wait_ms = self.retry_backoff_ms * u64::from(attempt - 1);
                debug!(attempt, wait_ms, "Retrying XP resolution");
                sleep(Duration::from_millis(wait_ms)).await;
            }

            match self.resolver.resolve_award(user, event).await {
                Ok(breakdown) => match breakdown.xp {
                    Some(amount) => return XpAward::new(amount, breakdown.reasons),
                    None => {
                        last_error = "response missing xp amount".to_string();
                        warn!(attempt, "XP resolution response missing amount");
                    }
                },
                Err(e) => {
                    last_error = e.to_string();
                    warn!(attempt, error = %last_error, "XP resolution attempt failed");
                }
            }
        }

        warn!(
            %user,
            attempts = self.max_resolve_attempts,
            last_error,
            "XP resolution exhausted, applying base reward"
        );
        XpAward::fallback(self.base_completion_xp)
    }

    /// Commit `baseline + amount` as a compare-and-swap, re-reading and
    /// retrying when a concurrent writer moved the total first.
    ///
    /// Returns the `(old, new)` totals of the write that won.
    async fn write_with_cas(
        &self,
        user: &UserId,
        mut baseline: LedgerSnapshot,
        amount: u64,
    ) -> Result<(u64, u64), AwardError> {
        for attempt in 1..=self.max_write_attempts {
            let old_total = baseline.total_xp;
            let new_total = old_total.saturating_add(amount);

            match self.store.write_xp(user, new_total, old_total).await {
                Ok(snapshot) => return Ok((old_total, snapshot.total_xp)),
                Err(e) if e.is_conflict() && attempt < self.max_write_attempts => {
                    debug!(%user, attempt, "Ledger write conflict, re-reading baseline");
                    baseline = self
                        .store
                        .read_xp(user)
                        .await
                        .map_err(AwardError::LedgerRead)?;
                }
                Err(e) if e.is_conflict() => {
                    return Err(AwardError::WriteContention {
                        attempts: self.max_write_attempts,
                    });
                }
                Err(e) => return Err(AwardError::LedgerWrite(e)),
            }
        }

        Err(AwardError::WriteContention {
            attempts: self.max_write_attempts,
        })
    }

    // ------------------------------------------------------------------
    // Read path
    // ------------------------------------------------------------------

    /// The user's current level view, served from cache when possible.
    ///
    /// Awards invalidate the affected user, so a read following an award
    /// always recomputes from the store.
    ///
    /// # Errors
    ///
    /// [`AwardError::LedgerRead`] when the ledger cannot be read on a cache
    /// miss.
    pub async fn level_progress(&self, user: &UserId) -> Result<LevelProgress, AwardError> {
        if self.cache_enabled {
            if let Some(hit) = self.cache.get(user) {
                debug!(%user, "Level view served from cache");
                return Ok(hit);
            }
        }

        let snapshot = self
            .store
            .read_xp(user)
            .await
            .map_err(AwardError::LedgerRead)?;
        let progress = calculate_level(snapshot.total_xp);

        if self.cache_enabled {
            self.cache.insert(*user, progress);
        }
        Ok(progress)
    }
}
