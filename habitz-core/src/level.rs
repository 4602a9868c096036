//! Level ladder — XP bands, level calculation, level-up detection.
//!
//! The ladder is a fixed, ordered list of tiers. Each tier owns a half-open
//! XP band `[min_xp, max_xp)`; bands are contiguous and non-overlapping, the
//! first band starts at 0, and the top band is unbounded. A user's level is
//! the unique tier whose band contains their cumulative XP.
//!
//! Everything in this module is pure: no I/O, no error cases, total over the
//! documented domain. The award pipeline in `habitz-engine` calls
//! [`check_level_up`] speculatively before committing a ledger write.

use serde::Serialize;

// ---------------------------------------------------------------------------
// Level table
// ---------------------------------------------------------------------------

/// Closed set of tier icons, resolved to actual artwork by the presentation
/// layer. A tier's icon is data on the tier itself — there is no runtime
/// name-to-icon lookup anywhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LevelIcon {
    /// Level 1.
    Seedling,
    /// Level 2.
    Sprout,
    /// Level 3.
    Leaf,
    /// Level 4.
    Sapling,
    /// Level 5.
    Tree,
    /// Level 6.
    Star,
    /// Level 7.
    Medal,
    /// Level 8.
    Trophy,
    /// Level 9.
    Gem,
    /// Level 10.
    Crown,
    /// Level 11.
    Flame,
    /// Level 12.
    Sun,
}

/// One tier of the level ladder.
#[derive(Debug, Serialize)]
pub struct LevelTier {
    /// Level number, contiguous from 1.
    pub level: u32,
    /// Display name.
    pub title: &'static str,
    /// Inclusive lower bound of this tier's XP band.
    pub min_xp: u64,
    /// Exclusive upper bound of the band; `None` for the unbounded top tier.
    pub max_xp: Option<u64>,
    /// Icon identifier for the presentation layer.
    pub icon: LevelIcon,
    /// Perks unlocked upon reaching this tier.
    pub perks: &'static [&'static str],
}

impl LevelTier {
    /// Width of this tier's XP band, `None` for the unbounded top tier.
    #[must_use]
    pub fn band_width(&self) -> Option<u64> {
        self.max_xp.map(|max| max - self.min_xp)
    }
}

/// The level ladder. Static, immutable, process-wide.
pub static LEVELS: [LevelTier; 12] = [
    LevelTier {
        level: 1,
        title: "Newcomer",
        min_xp: 0,
        max_xp: Some(200),
        icon: LevelIcon::Seedling,
        perks: &["Daily check-ins"],
    },
    LevelTier {
        level: 2,
        title: "Starter",
        min_xp: 200,
        max_xp: Some(450),
        icon: LevelIcon::Sprout,
        perks: &["Custom habit colors"],
    },
    LevelTier {
        level: 3,
        title: "Builder",
        min_xp: 450,
        max_xp: Some(750),
        icon: LevelIcon::Leaf,
        perks: &["Weekly progress report"],
    },
    LevelTier {
        level: 4,
        title: "Regular",
        min_xp: 750,
        max_xp: Some(1_200),
        icon: LevelIcon::Sapling,
        perks: &["Custom reminder times"],
    },
    LevelTier {
        level: 5,
        title: "Committed",
        min_xp: 1_200,
        max_xp: Some(1_800),
        icon: LevelIcon::Tree,
        perks: &["Streak freeze token", "Advanced statistics"],
    },
    LevelTier {
        level: 6,
        title: "Consistent",
        min_xp: 1_800,
        max_xp: Some(2_600),
        icon: LevelIcon::Star,
        perks: &["Habit templates"],
    },
    LevelTier {
        level: 7,
        title: "Dedicated",
        min_xp: 2_600,
        max_xp: Some(3_700),
        icon: LevelIcon::Medal,
        perks: &["Mood tracking"],
    },
    LevelTier {
        level: 8,
        title: "Achiever",
        min_xp: 3_700,
        max_xp: Some(5_200),
        icon: LevelIcon::Trophy,
        perks: &["Exclusive badge set", "Priority support"],
    },
    LevelTier {
        level: 9,
        title: "Veteran",
        min_xp: 5_200,
        max_xp: Some(7_500),
        icon: LevelIcon::Gem,
        perks: &["Custom app icon"],
    },
    LevelTier {
        level: 10,
        title: "Master",
        min_xp: 7_500,
        max_xp: Some(12_000),
        icon: LevelIcon::Crown,
        perks: &["Year-in-review report"],
    },
    LevelTier {
        level: 11,
        title: "Grandmaster",
        min_xp: 12_000,
        max_xp: Some(20_000),
        icon: LevelIcon::Flame,
        perks: &["Early access to new features"],
    },
    LevelTier {
        level: 12,
        title: "Legend",
        min_xp: 20_000,
        max_xp: None,
        icon: LevelIcon::Sun,
        perks: &["Legend badge", "Golden profile flair"],
    },
];

/// Find the tier whose band contains `total_xp`.
///
/// Total over all of `u64`: the first band starts at 0, and anything at or
/// beyond the top tier's `min_xp` clamps to the top tier.
#[must_use]
pub fn tier_for_xp(total_xp: u64) -> &'static LevelTier {
    LEVELS
        .iter()
        .rev()
        .find(|tier| total_xp >= tier.min_xp)
        .unwrap_or(&LEVELS[0])
}

// ---------------------------------------------------------------------------
// Level calculator
// ---------------------------------------------------------------------------

/// A user's position on the ladder: current tier plus progress within it.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct LevelProgress {
    /// The tier whose band contains the user's XP.
    pub tier: &'static LevelTier,
    /// XP earned within the current band (`total_xp - tier.min_xp`).
    pub current_level_xp: u64,
    /// Width of the current band; `None` once the top tier is reached.
    pub next_level_xp: Option<u64>,
    /// Progress through the band, 0–100. Always exactly 100 at the top tier.
    pub percentage: f32,
}

impl LevelProgress {
    /// Current level number.
    #[must_use]
    pub fn level(&self) -> u32 {
        self.tier.level
    }

    /// Whether the top (unbounded) tier has been reached.
    #[must_use]
    pub fn is_max_level(&self) -> bool {
        self.tier.max_xp.is_none()
    }
}

/// Map cumulative XP to the current tier and progress within its band.
///
/// Pure and deterministic, with no error cases.
#[must_use]
pub fn calculate_level(total_xp: u64) -> LevelProgress {
    let tier = tier_for_xp(total_xp);
    let current_level_xp = total_xp - tier.min_xp;
    let next_level_xp = tier.band_width();

    // Band containment keeps the ratio below 1; the min() guards against
    // floating-point overshoot at band edges.
    let percentage = match next_level_xp {
        None => 100.0,
        Some(width) => ((current_level_xp as f64 / width as f64) * 100.0).min(100.0) as f32,
    };

    LevelProgress {
        tier,
        current_level_xp,
        next_level_xp,
        percentage,
    }
}

// ---------------------------------------------------------------------------
// Level-up detector
// ---------------------------------------------------------------------------

/// A crossed level boundary, with every perk unlocked by the crossing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LevelUp {
    /// Level before the XP change.
    pub from: u32,
    /// Level after the XP change.
    pub to: u32,
    /// Perks of every tier gained, `from`-exclusive through `to`-inclusive.
    /// A single large grant that skips tiers still surfaces the skipped
    /// tiers' perks.
    pub rewards: Vec<String>,
}

/// Compare a before/after XP pair and report whether a level boundary was
/// crossed.
///
/// Returns `Some` only on a strict level increase — a same-level gain or a
/// decrease never signals a level-up. Safe to call speculatively before a
/// ledger write commits.
#[must_use]
pub fn check_level_up(old_xp: u64, new_xp: u64) -> Option<LevelUp> {
    let old = calculate_level(old_xp);
    let new = calculate_level(new_xp);

    if new.tier.level <= old.tier.level {
        return None;
    }

    let rewards = LEVELS
        .iter()
        .filter(|tier| tier.level > old.tier.level && tier.level <= new.tier.level)
        .flat_map(|tier| tier.perks.iter().map(|perk| (*perk).to_string()))
        .collect();

    Some(LevelUp {
        from: old.tier.level,
        to: new.tier.level,
        rewards,
    })
}
