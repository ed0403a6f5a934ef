//! Performance records: per-category ratings and their bookkeeping
//!
//! A `Rating` is one Glicko-2 skill estimate. A `Perf` wraps a rating with
//! game count, last-played timestamp, and a bounded history of recent rating
//! deltas. A `PerfSet` is the full 14-category record set a participant owns.

use crate::rating::category::PerfCategory;
use crate::rating::glicko2::{DEFAULT_DEVIATION, DEFAULT_RATING, DEFAULT_VOLATILITY};
use crate::types::RatingDiff;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Deviation above which a rating is still considered provisional
pub const PROVISIONAL_DEVIATION: f64 = 110.0;

/// Maximum number of recent rating deltas kept per performance record
pub const RECENT_MAX: usize = 12;

/// One participant's Glicko-2 skill estimate in one category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    pub rating: f64,
    pub deviation: f64,
    pub volatility: f64,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Default for Rating {
    fn default() -> Self {
        Self {
            rating: DEFAULT_RATING,
            deviation: DEFAULT_DEVIATION,
            volatility: DEFAULT_VOLATILITY,
            updated_at: None,
        }
    }
}

impl Rating {
    /// Integer rating as displayed and used for diffs
    pub fn int_rating(&self) -> i32 {
        self.rating.round() as i32
    }

    /// True while the deviation is too high to trust the estimate
    pub fn is_provisional(&self) -> bool {
        self.deviation > PROVISIONAL_DEVIATION
    }

    /// Move this rating toward `other` by `factor` on all three components.
    ///
    /// Factor 0 reproduces `self`, factor 1 reproduces `other`; the result
    /// carries `other`'s timestamp.
    pub fn interpolate(&self, other: &Rating, factor: f64) -> Rating {
        Rating {
            rating: self.rating + (other.rating - self.rating) * factor,
            deviation: self.deviation + (other.deviation - self.deviation) * factor,
            volatility: self.volatility + (other.volatility - self.volatility) * factor,
            updated_at: other.updated_at,
        }
    }
}

/// Persisted performance record for one category
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Perf {
    pub glicko: Rating,
    pub games: u64,
    /// Recent signed rating deltas, newest first, capped at [`RECENT_MAX`]
    pub recent: Vec<RatingDiff>,
    pub latest: Option<DateTime<Utc>>,
}

impl Perf {
    /// Fold a newly computed rating into this record.
    ///
    /// Replaces the rating wholesale, increments the game count, stamps the
    /// timestamp, and pushes the signed integer delta onto the history.
    pub fn add(&self, rating: Rating, at: DateTime<Utc>) -> Perf {
        let delta = rating.int_rating() - self.glicko.int_rating();
        let mut recent = Vec::with_capacity((self.recent.len() + 1).min(RECENT_MAX));
        recent.push(delta);
        recent.extend(self.recent.iter().take(RECENT_MAX - 1));
        Perf {
            glicko: Rating {
                updated_at: Some(at),
                ..rating
            },
            games: self.games + 1,
            recent,
            latest: Some(at),
        }
    }

    /// Net rating movement over the recorded delta history
    pub fn progress(&self) -> RatingDiff {
        self.recent.iter().sum()
    }
}

/// The full 14-category performance record set of one participant
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PerfSet {
    pub ultra_bullet: Perf,
    pub bullet: Perf,
    pub blitz: Perf,
    pub rapid: Perf,
    pub classical: Perf,
    pub correspondence: Perf,
    /// Derived aggregate over the six speed tiers; never updated directly
    pub standard: Perf,
    pub crazyhouse: Perf,
    pub chess960: Perf,
    pub king_of_the_hill: Perf,
    pub three_check: Perf,
    pub antichess: Perf,
    pub atomic: Perf,
    pub horde: Perf,
}

impl PerfSet {
    /// The record for one category
    pub fn perf(&self, category: PerfCategory) -> &Perf {
        match category {
            PerfCategory::UltraBullet => &self.ultra_bullet,
            PerfCategory::Bullet => &self.bullet,
            PerfCategory::Blitz => &self.blitz,
            PerfCategory::Rapid => &self.rapid,
            PerfCategory::Classical => &self.classical,
            PerfCategory::Correspondence => &self.correspondence,
            PerfCategory::Standard => &self.standard,
            PerfCategory::Crazyhouse => &self.crazyhouse,
            PerfCategory::Chess960 => &self.chess960,
            PerfCategory::KingOfTheHill => &self.king_of_the_hill,
            PerfCategory::ThreeCheck => &self.three_check,
            PerfCategory::Antichess => &self.antichess,
            PerfCategory::Atomic => &self.atomic,
            PerfCategory::Horde => &self.horde,
        }
    }

    /// Replace the record for one category
    pub fn set_perf(&mut self, category: PerfCategory, perf: Perf) {
        match category {
            PerfCategory::UltraBullet => self.ultra_bullet = perf,
            PerfCategory::Bullet => self.bullet = perf,
            PerfCategory::Blitz => self.blitz = perf,
            PerfCategory::Rapid => self.rapid = perf,
            PerfCategory::Classical => self.classical = perf,
            PerfCategory::Correspondence => self.correspondence = perf,
            PerfCategory::Standard => self.standard = perf,
            PerfCategory::Crazyhouse => self.crazyhouse = perf,
            PerfCategory::Chess960 => self.chess960 = perf,
            PerfCategory::KingOfTheHill => self.king_of_the_hill = perf,
            PerfCategory::ThreeCheck => self.three_check = perf,
            PerfCategory::Antichess => self.antichess = perf,
            PerfCategory::Atomic => self.atomic = perf,
            PerfCategory::Horde => self.horde = perf,
        }
    }

    /// Recompute the derived standard aggregate from the six speed tiers.
    ///
    /// Game-count-weighted mean of rating, deviation, and volatility; game
    /// counts summed; timestamp of the most recently played tier; empty delta
    /// history. Tiers with no games leave the aggregate untouched.
    pub fn update_standard(&mut self) {
        let tiers = [
            &self.ultra_bullet,
            &self.bullet,
            &self.blitz,
            &self.rapid,
            &self.classical,
            &self.correspondence,
        ];
        let total_games: u64 = tiers.iter().map(|p| p.games).sum();
        if total_games == 0 {
            return;
        }
        let weighted = |component: fn(&Rating) -> f64| -> f64 {
            tiers
                .iter()
                .map(|p| component(&p.glicko) * p.games as f64 / total_games as f64)
                .sum()
        };
        let latest = tiers.iter().filter_map(|p| p.latest).max();
        self.standard = Perf {
            glicko: Rating {
                rating: weighted(|g| g.rating),
                deviation: weighted(|g| g.deviation),
                volatility: weighted(|g| g.volatility),
                updated_at: latest,
            },
            games: total_games,
            recent: Vec::new(),
            latest,
        };
    }

    /// Highest non-provisional integer rating across the selectable categories
    pub fn best_rating(&self) -> Option<i32> {
        PerfCategory::REGULABLE
            .iter()
            .map(|&category| &self.perf(category).glicko)
            .filter(|glicko| !glicko.is_provisional())
            .map(|glicko| glicko.int_rating())
            .max()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::current_timestamp;

    fn rating(value: f64, deviation: f64) -> Rating {
        Rating {
            rating: value,
            deviation,
            volatility: DEFAULT_VOLATILITY,
            updated_at: None,
        }
    }

    #[test]
    fn test_add_bookkeeping() {
        let perf = Perf::default();
        let at = current_timestamp();
        let updated = perf.add(rating(1530.0, 180.0), at);

        assert_eq!(updated.games, 1);
        assert_eq!(updated.latest, Some(at));
        assert_eq!(updated.glicko.updated_at, Some(at));
        assert_eq!(updated.recent, vec![30]);
        assert_eq!(updated.glicko.rating, 1530.0);
    }

    #[test]
    fn test_recent_history_is_bounded() {
        let mut perf = Perf::default();
        let at = current_timestamp();
        for i in 0..20 {
            perf = perf.add(rating(1500.0 + i as f64, 100.0), at);
        }
        assert_eq!(perf.recent.len(), RECENT_MAX);
        assert_eq!(perf.games, 20);
        // Newest delta first
        assert_eq!(perf.recent[0], 1);
    }

    #[test]
    fn test_progress_sums_recent_deltas() {
        let mut perf = Perf::default();
        let at = current_timestamp();
        perf = perf.add(rating(1520.0, 100.0), at);
        perf = perf.add(rating(1510.0, 100.0), at);
        assert_eq!(perf.progress(), 10);
    }

    #[test]
    fn test_interpolate_endpoints() {
        let old = rating(1500.0, 200.0);
        let new = rating(1540.0, 180.0);
        assert_eq!(old.interpolate(&new, 0.0).rating, 1500.0);
        assert_eq!(old.interpolate(&new, 1.0).rating, 1540.0);
        let half = old.interpolate(&new, 0.5);
        assert_eq!(half.rating, 1520.0);
        assert_eq!(half.deviation, 190.0);
    }

    #[test]
    fn test_provisional_threshold() {
        assert!(rating(1500.0, 200.0).is_provisional());
        assert!(!rating(1500.0, 60.0).is_provisional());
    }

    #[test]
    fn test_standard_aggregate_weighted_by_games() {
        let mut perfs = PerfSet::default();
        let at = current_timestamp();
        perfs.blitz = Perf {
            glicko: rating(1600.0, 80.0),
            games: 3,
            recent: vec![5],
            latest: Some(at),
        };
        perfs.rapid = Perf {
            glicko: rating(1400.0, 120.0),
            games: 1,
            recent: vec![-5],
            latest: Some(at),
        };
        perfs.update_standard();

        assert_eq!(perfs.standard.games, 4);
        assert_eq!(perfs.standard.glicko.rating, 1550.0);
        assert_eq!(perfs.standard.glicko.deviation, 90.0);
        assert!(perfs.standard.recent.is_empty());
        assert_eq!(perfs.standard.latest, Some(at));
    }

    #[test]
    fn test_standard_aggregate_untouched_without_games() {
        let mut perfs = PerfSet::default();
        let before = perfs.standard.clone();
        perfs.update_standard();
        assert_eq!(perfs.standard, before);
    }

    #[test]
    fn test_standard_aggregate_is_deterministic() {
        let mut perfs = PerfSet::default();
        let at = current_timestamp();
        perfs.bullet = Perf {
            glicko: rating(1700.0, 70.0),
            games: 10,
            recent: vec![],
            latest: Some(at),
        };
        perfs.update_standard();
        let first = perfs.standard.clone();
        perfs.update_standard();
        assert_eq!(perfs.standard, first);
    }

    #[test]
    fn test_best_rating_skips_provisional() {
        let mut perfs = PerfSet::default();
        let at = current_timestamp();
        // Provisional everywhere: no best rating
        assert_eq!(perfs.best_rating(), None);

        perfs.atomic = Perf {
            glicko: rating(1800.0, 60.0),
            games: 50,
            recent: vec![],
            latest: Some(at),
        };
        perfs.blitz = Perf {
            glicko: rating(2100.0, 300.0),
            games: 2,
            recent: vec![],
            latest: Some(at),
        };
        // Blitz is higher but provisional
        assert_eq!(perfs.best_rating(), Some(1800));
    }

    #[test]
    fn test_perf_json_round_trip() {
        let mut perf = Perf::default();
        perf = perf.add(rating(1543.7, 142.2), current_timestamp());
        let json = serde_json::to_string(&perf).unwrap();
        let back: Perf = serde_json::from_str(&json).unwrap();
        assert_eq!(back, perf);
    }
}
