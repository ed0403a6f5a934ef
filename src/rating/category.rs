//! Rating categories and variant/speed selection
//!
//! Every participant maintains one performance record per category. A game is
//! rated in exactly one category: non-standard variants each have their own
//! bucket regardless of speed, while standard games are bucketed by speed
//! tier. The `Standard` category is a derived aggregate over the six speed
//! tiers and is never selected directly.

use crate::types::{Speed, Variant};
use serde::{Deserialize, Serialize};

/// One of the 14 independent rating buckets a participant maintains
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PerfCategory {
    UltraBullet,
    Bullet,
    Blitz,
    Rapid,
    Classical,
    Correspondence,
    Standard,
    Crazyhouse,
    Chess960,
    KingOfTheHill,
    ThreeCheck,
    Antichess,
    Atomic,
    Horde,
}

impl PerfCategory {
    /// All 14 categories, in record-set order
    pub const ALL: [PerfCategory; 14] = [
        PerfCategory::UltraBullet,
        PerfCategory::Bullet,
        PerfCategory::Blitz,
        PerfCategory::Rapid,
        PerfCategory::Classical,
        PerfCategory::Correspondence,
        PerfCategory::Standard,
        PerfCategory::Crazyhouse,
        PerfCategory::Chess960,
        PerfCategory::KingOfTheHill,
        PerfCategory::ThreeCheck,
        PerfCategory::Antichess,
        PerfCategory::Atomic,
        PerfCategory::Horde,
    ];

    /// The six speed tiers of the standard variant
    pub const STANDARD_SPEEDS: [PerfCategory; 6] = [
        PerfCategory::UltraBullet,
        PerfCategory::Bullet,
        PerfCategory::Blitz,
        PerfCategory::Rapid,
        PerfCategory::Classical,
        PerfCategory::Correspondence,
    ];

    /// Categories eligible for regulation: every selectable category, which is
    /// everything except the derived `Standard` aggregate
    pub const REGULABLE: [PerfCategory; 13] = [
        PerfCategory::UltraBullet,
        PerfCategory::Bullet,
        PerfCategory::Blitz,
        PerfCategory::Rapid,
        PerfCategory::Classical,
        PerfCategory::Correspondence,
        PerfCategory::Crazyhouse,
        PerfCategory::Chess960,
        PerfCategory::KingOfTheHill,
        PerfCategory::ThreeCheck,
        PerfCategory::Antichess,
        PerfCategory::Atomic,
        PerfCategory::Horde,
    ];

    /// Map a game's variant and speed to the category it is rated in.
    ///
    /// Returns `None` for a standard-variant game whose time control resolved
    /// to no recognized speed tier; such a game is not rated in any bucket.
    /// Never returns `Standard`.
    pub fn select(variant: Variant, speed: Option<Speed>) -> Option<PerfCategory> {
        match variant {
            Variant::Standard => speed.map(|speed| match speed {
                Speed::UltraBullet => PerfCategory::UltraBullet,
                Speed::Bullet => PerfCategory::Bullet,
                Speed::Blitz => PerfCategory::Blitz,
                Speed::Rapid => PerfCategory::Rapid,
                Speed::Classical => PerfCategory::Classical,
                Speed::Correspondence => PerfCategory::Correspondence,
            }),
            Variant::Crazyhouse => Some(PerfCategory::Crazyhouse),
            Variant::Chess960 => Some(PerfCategory::Chess960),
            Variant::KingOfTheHill => Some(PerfCategory::KingOfTheHill),
            Variant::ThreeCheck => Some(PerfCategory::ThreeCheck),
            Variant::Antichess => Some(PerfCategory::Antichess),
            Variant::Atomic => Some(PerfCategory::Atomic),
            Variant::Horde => Some(PerfCategory::Horde),
        }
    }

    /// True for the six speed tiers of the standard variant
    pub fn is_standard_speed(self) -> bool {
        Self::STANDARD_SPEEDS.contains(&self)
    }

    /// Stable lowercase key, used in logs and serialized maps
    pub fn key(self) -> &'static str {
        match self {
            PerfCategory::UltraBullet => "ultra_bullet",
            PerfCategory::Bullet => "bullet",
            PerfCategory::Blitz => "blitz",
            PerfCategory::Rapid => "rapid",
            PerfCategory::Classical => "classical",
            PerfCategory::Correspondence => "correspondence",
            PerfCategory::Standard => "standard",
            PerfCategory::Crazyhouse => "crazyhouse",
            PerfCategory::Chess960 => "chess960",
            PerfCategory::KingOfTheHill => "king_of_the_hill",
            PerfCategory::ThreeCheck => "three_check",
            PerfCategory::Antichess => "antichess",
            PerfCategory::Atomic => "atomic",
            PerfCategory::Horde => "horde",
        }
    }
}

impl std::fmt::Display for PerfCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}
