//! # HABITZ Core Library
//!
//! Backend-agnostic progression layer for the HABITZ habit tracker.
//!
//! Every user owns an XP ledger: a cumulative experience counter that maps
//! onto a fixed ladder of [`level::LevelTier`]s. Checking off habits earns
//! XP, XP crosses band boundaries, and band crossings unlock perks:
//!
//! - **Level table** — twelve static tiers, each owning a half-open XP band
//!   `[min_xp, max_xp)`; the top band is unbounded.
//! - **Level calculator** — [`level::calculate_level`], a total pure function
//!   from XP to a tier plus progress-within-band.
//! - **Level-up detector** — [`level::check_level_up`], compares a
//!   before/after XP pair and reports which perks unlocked.
//! - **Award types** — [`xp::XpAward`] and [`xp::AwardOutcome`], the values
//!   flowing through the award pipeline in `habitz-engine`.
//! - **Acknowledgement policy** — [`notify::acknowledgement_for`], routine
//!   toast or level-up celebration, never both.
//!
//! Everything in this crate is pure and synchronous. Remote concerns (the
//! hosted ledger store, the XP-resolution RPC) live in `habitz-remote`;
//! orchestration lives in `habitz-engine`.

#![deny(clippy::unwrap_used)]
#![deny(missing_docs)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod level;
pub mod notify;
pub mod types;
pub mod xp;

pub use config::HabitzConfig;
pub use error::CoreError;
pub use level::{LevelProgress, LevelTier, LevelUp, calculate_level, check_level_up};
pub use types::*;
pub use xp::{AwardOutcome, XpAward};
