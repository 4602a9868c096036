//! Property-Based Tests for the Level Ladder
//!
//! Uses `proptest` to verify the progression invariants under random inputs:
//! band coverage, monotonicity, percentage bounds, and level-up strictness.

use proptest::prelude::*;

use habitz_core::level::{self, LEVELS};
use habitz_core::notify::{self, Acknowledgement};
use habitz_core::xp::{AwardOutcome, XpAward};

/// XP values worth exercising: inside every band plus far beyond the top.
fn arb_xp() -> impl Strategy<Value = u64> {
    0..200_000u64
}

// ---------------------------------------------------------------------------
// Property: every XP value lands in exactly one band
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn band_coverage_is_exact(xp in arb_xp()) {
        let progress = level::calculate_level(xp);
        let tier = progress.tier;

        prop_assert!(xp >= tier.min_xp, "XP {} below band of level {}", xp, tier.level);
        match tier.max_xp {
            Some(max) => prop_assert!(xp < max, "XP {} beyond band of level {}", xp, tier.level),
            None => prop_assert_eq!(tier.level, LEVELS.len() as u32),
        }

        // No other tier's bounded band contains this XP.
        let containing = LEVELS
            .iter()
            .filter(|t| xp >= t.min_xp && t.max_xp.is_none_or(|max| xp < max))
            .count();
        prop_assert_eq!(containing, 1);
    }
}

// ---------------------------------------------------------------------------
// Property: level is monotone in XP
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn level_is_monotone(a in arb_xp(), b in arb_xp()) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(
            level::calculate_level(lo).level() <= level::calculate_level(hi).level()
        );
    }
}

// ---------------------------------------------------------------------------
// Property: percentage stays within [0, 100], and is 100 exactly at the top
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn percentage_is_bounded(xp in arb_xp()) {
        let progress = level::calculate_level(xp);
        prop_assert!(progress.percentage >= 0.0);
        prop_assert!(progress.percentage <= 100.0);
        if progress.is_max_level() {
            prop_assert_eq!(progress.percentage, 100.0);
        }
    }
}

// ---------------------------------------------------------------------------
// Property: current_level_xp never reaches the band width
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn progress_stays_inside_band(xp in arb_xp()) {
        let progress = level::calculate_level(xp);
        if let Some(width) = progress.next_level_xp {
            prop_assert!(progress.current_level_xp < width);
        }
    }
}

// ---------------------------------------------------------------------------
// Property: level-up fires iff the level strictly increased
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn level_up_is_strict(old_xp in arb_xp(), new_xp in arb_xp()) {
        let old_level = level::calculate_level(old_xp).level();
        let new_level = level::calculate_level(new_xp).level();

        match level::check_level_up(old_xp, new_xp) {
            Some(up) => {
                prop_assert!(new_level > old_level);
                prop_assert_eq!(up.from, old_level);
                prop_assert_eq!(up.to, new_level);
            }
            None => prop_assert!(new_level <= old_level),
        }
    }
}

proptest! {
    #[test]
    fn no_level_up_without_increase(xp in arb_xp(), drop in 0..1000u64) {
        prop_assert!(level::check_level_up(xp, xp).is_none());
        prop_assert!(level::check_level_up(xp, xp.saturating_sub(drop)).is_none());
    }
}

// ---------------------------------------------------------------------------
// Property: rewards cover every gained tier, in order
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn rewards_cover_all_gained_tiers(old_xp in arb_xp(), gain in 1..50_000u64) {
        let new_xp = old_xp + gain;
        if let Some(up) = level::check_level_up(old_xp, new_xp) {
            let expected: Vec<String> = LEVELS
                .iter()
                .filter(|t| t.level > up.from && t.level <= up.to)
                .flat_map(|t| t.perks.iter().map(|p| (*p).to_string()))
                .collect();
            prop_assert_eq!(up.rewards, expected);
        }
    }
}

// ---------------------------------------------------------------------------
// Property: acknowledgement is exclusive — celebration xor toast
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn acknowledgement_is_exclusive(old_xp in arb_xp(), gain in 0..5_000u64) {
        let new_xp = old_xp + gain;
        let level_up = level::check_level_up(old_xp, new_xp);
        let outcome = AwardOutcome {
            award: XpAward::new(gain, vec!["Habit completed".to_string()]),
            new_total: new_xp,
            previous_level: level::calculate_level(old_xp).level(),
            level: level::calculate_level(new_xp).level(),
            level_up: level_up.clone(),
        };

        match notify::acknowledgement_for(&outcome) {
            Acknowledgement::LevelUp(up) => {
                prop_assert!(outcome.did_level_up());
                prop_assert_eq!(Some(up), level_up);
            }
            Acknowledgement::Xp { amount, .. } => {
                prop_assert!(!outcome.did_level_up());
                prop_assert_eq!(amount, gain);
            }
        }
    }
}
