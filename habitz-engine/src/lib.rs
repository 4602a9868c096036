//! # habitz-engine — Award Orchestration for HABITZ
//!
//! This crate wires the pure progression math from `habitz-core` to the
//! hosted backend from `habitz-remote` and owns the one operation with real
//! failure policy: awarding XP for a habit completion.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │                 Caller (app)                 │
//! │  ┌────────────────────────────────────────┐  │
//! │  │            habitz-engine               │  │
//! │  │  ┌──────────────┐  ┌───────────────┐   │  │
//! │  │  │ AwardEngine  │  │  LevelCache   │   │  │
//! │  │  └──────┬───────┘  └───────┬───────┘   │  │
//! │  │         │                  │           │  │
//! │  │         ▼                  ▼           │  │
//! │  │  ┌─────────────────────────────────┐   │  │
//! │  │  │          habitz-core            │   │  │
//! │  │  └─────────────────────────────────┘   │  │
//! │  │  ┌─────────────────────────────────┐   │  │
//! │  │  │         habitz-remote           │   │  │
//! │  │  └─────────────────────────────────┘   │  │
//! │  └────────────────────────────────────────┘  │
//! └──────────────────────────────────────────────┘
//! ```
//!
//! ## The award pipeline
//!
//! One call to [`award::AwardEngine::award_for_completion`] runs four steps,
//! strictly in order, each awaited before the next begins:
//!
//! 1. **Resolve** the XP amount via the [`store::AwardResolver`] port — up
//!    to three attempts with linear backoff, degrading to the base
//!    completion reward rather than failing.
//! 2. **Read** the user's ledger baseline — failure here is fatal; no write
//!    is attempted without a trustworthy starting total.
//! 3. **Write** the new total as a compare-and-swap conditioned on the
//!    baseline, re-reading and retrying on conflict. The level-up report is
//!    computed locally from the pair that actually won the write.
//! 4. **Invalidate** the cached level view so the next read is fresh.
//!
//! The pipeline is deliberately not idempotent per event: awarding the same
//! completion twice grants XP twice. Callers enforce exactly-once by
//! checking for an existing completion before invoking the engine.
//!
//! ## Modules
//!
//! - `award` — the engine and its error type
//! - `store` — resolver/ledger ports, backend impls, in-memory ledger
//! - `cache` — per-user LRU of computed level views

pub mod award;
pub mod cache;
pub mod store;

pub use award::{AwardEngine, AwardError};
pub use cache::LevelCache;
pub use store::{AwardResolver, InMemoryLedger, LedgerStore};
