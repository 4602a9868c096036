//! Wire types for the hosted backend.

use serde::{Deserialize, Serialize};

/// Response of the XP resolution RPC.
///
/// `xp` is optional on the wire: a response that arrives without it is
/// malformed and the caller treats it like a failed attempt (retry, then
/// fall back to the base reward).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AwardBreakdown {
    /// XP to grant for the completion, with all bonuses applied.
    #[serde(default)]
    pub xp: Option<u64>,
    /// Human-readable composition of the grant, in display order.
    #[serde(default)]
    pub reasons: Vec<String>,
}

/// One row of the `xp_ledger` table.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct LedgerRow {
    /// Cumulative XP.
    pub total_xp: u64,
    /// Level derived from `total_xp` by the backend.
    pub current_level: u32,
}

/// Representation returned by a successful conditional ledger write.
///
/// The backend recomputes `current_level` from the new total before
/// returning it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct WriteReceipt {
    /// The total after the write.
    pub total_xp: u64,
    /// The level the backend derived from the new total.
    pub current_level: u32,
}
