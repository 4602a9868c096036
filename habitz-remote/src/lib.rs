//! # habitz-remote — Hosted Backend Abstraction for HABITZ
//!
//! All remote calls made by the progression system go through this crate:
//!
//!   - **XP resolution RPC** — a stored procedure on the hosted backend
//!     computes the XP grant for a completion (base reward plus streak
//!     milestone, first-of-day and perfect-day bonuses) from already-stored
//!     completion facts. Pure with respect to its inputs, so it is safe for
//!     the caller to retry.
//!   - **XP ledger rows** — reads of a user's `total_xp` / `current_level`
//!     row and conditional writes of a new total. The backend derives the
//!     new level on write (trigger-side), and the conditional filter turns
//!     the write into a compare-and-swap.
//!
//! This crate performs exactly one attempt per call and classifies failures;
//! retry, backoff and fallback policy belong to the award engine in
//! `habitz-engine`. A client built with [`BackendProvider::None`] fails every
//! call, which downstream degrades into the base-reward fallback for
//! resolution and a fatal error for ledger traffic.

pub mod client;
pub mod error;
pub mod types;

pub use client::{BackendClient, BackendProvider};
pub use error::RemoteError;
pub use types::{AwardBreakdown, LedgerRow, WriteReceipt};
