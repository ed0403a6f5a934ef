//! Regulation of abnormal rating swings
//!
//! Categories prone to manipulation can have their rating changes scaled down
//! by a per-category factor in [0, 1]. Factors come from an external
//! configuration source through [`RegulationProvider`] and are re-fetched on
//! every pipeline invocation, so they may change over time.

use crate::rating::category::PerfCategory;
use crate::rating::perf::Perf;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::RwLock;

/// Per-category scaling factors; categories without an entry are unscaled
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegulationFactors {
    factors: HashMap<PerfCategory, f64>,
}

impl RegulationFactors {
    pub fn new() -> Self {
        Self::default()
    }

    /// The same factor for every regulable category
    pub fn uniform(factor: f64) -> Self {
        let mut factors = HashMap::new();
        for category in PerfCategory::REGULABLE {
            factors.insert(category, factor);
        }
        Self { factors }
    }

    /// Builder-style override for one category
    pub fn with_factor(mut self, category: PerfCategory, factor: f64) -> Self {
        self.factors.insert(category, factor);
        self
    }

    /// Effective factor for a category, clamped to [0, 1].
    ///
    /// The derived standard aggregate is never regulated.
    pub fn factor(&self, category: PerfCategory) -> f64 {
        if category == PerfCategory::Standard {
            return 1.0;
        }
        self.factors
            .get(&category)
            .copied()
            .unwrap_or(1.0)
            .clamp(0.0, 1.0)
    }
}

/// Scale the change from `old` to `new` by `factor`.
///
/// Factor 0 yields `old` unchanged and factor 1 yields `new` unchanged, both
/// bit-exact. Intermediate factors interpolate the rating, deviation, and
/// volatility change and rebuild the bookkeeping against `old` so the game
/// count still increments exactly once and the recorded delta matches the
/// final rating.
pub fn regulate(factor: f64, old: &Perf, new: &Perf) -> Perf {
    let factor = factor.clamp(0.0, 1.0);
    if factor <= 0.0 {
        return old.clone();
    }
    if factor >= 1.0 {
        return new.clone();
    }
    let Some(at) = new.latest.or(old.latest) else {
        return new.clone();
    };
    old.add(old.glicko.interpolate(&new.glicko, factor), at)
}

/// Supplier of regulation factors, queried once per pipeline invocation
pub trait RegulationProvider: Send + Sync {
    fn factors(&self) -> RegulationFactors;
}

/// Fixed factors, suitable for configuration-driven deployments
#[derive(Debug, Clone, Default)]
pub struct StaticRegulationProvider {
    factors: RegulationFactors,
}

impl StaticRegulationProvider {
    pub fn new(factors: RegulationFactors) -> Self {
        Self { factors }
    }
}

impl RegulationProvider for StaticRegulationProvider {
    fn factors(&self) -> RegulationFactors {
        self.factors.clone()
    }
}

/// Mock provider for testing; factors can be swapped and fetches are counted
#[derive(Debug, Default)]
pub struct MockRegulationProvider {
    factors: RwLock<RegulationFactors>,
    fetch_count: RwLock<usize>,
}

impl MockRegulationProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the factors returned by subsequent fetches
    pub fn set_factors(&self, factors: RegulationFactors) {
        if let Ok(mut current) = self.factors.write() {
            *current = factors;
        }
    }

    /// Number of times the pipeline fetched factors (for testing)
    pub fn fetch_count(&self) -> usize {
        self.fetch_count.read().map(|count| *count).unwrap_or(0)
    }
}

impl RegulationProvider for MockRegulationProvider {
    fn factors(&self) -> RegulationFactors {
        if let Ok(mut count) = self.fetch_count.write() {
            *count += 1;
        }
        self.factors
            .read()
            .map(|factors| factors.clone())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rating::perf::Rating;
    use crate::utils::current_timestamp;

    fn perf_at(rating: f64, games: u64) -> Perf {
        Perf {
            glicko: Rating {
                rating,
                deviation: 120.0,
                volatility: 0.06,
                updated_at: None,
            },
            games,
            recent: Vec::new(),
            latest: None,
        }
    }

    #[test]
    fn test_missing_category_defaults_to_one() {
        let factors = RegulationFactors::new();
        assert_eq!(factors.factor(PerfCategory::Blitz), 1.0);
    }

    #[test]
    fn test_factors_are_clamped() {
        let factors = RegulationFactors::new()
            .with_factor(PerfCategory::Atomic, 3.0)
            .with_factor(PerfCategory::Horde, -0.5);
        assert_eq!(factors.factor(PerfCategory::Atomic), 1.0);
        assert_eq!(factors.factor(PerfCategory::Horde), 0.0);
    }

    #[test]
    fn test_standard_is_never_regulated() {
        let factors = RegulationFactors::uniform(0.2);
        assert_eq!(factors.factor(PerfCategory::Standard), 1.0);
    }

    #[test]
    fn test_factor_zero_is_exact_noop() {
        let old = perf_at(1500.0, 7);
        let new = old.add(
            Rating {
                rating: 1540.0,
                deviation: 110.0,
                volatility: 0.06,
                updated_at: None,
            },
            current_timestamp(),
        );
        assert_eq!(regulate(0.0, &old, &new), old);
    }

    #[test]
    fn test_factor_one_keeps_raw_output() {
        let old = perf_at(1500.0, 7);
        let new = old.add(
            Rating {
                rating: 1540.0,
                deviation: 110.0,
                volatility: 0.06,
                updated_at: None,
            },
            current_timestamp(),
        );
        assert_eq!(regulate(1.0, &old, &new), new);
    }

    #[test]
    fn test_intermediate_factor_scales_change() {
        let old = perf_at(1500.0, 7);
        let new = old.add(
            Rating {
                rating: 1540.0,
                deviation: 110.0,
                volatility: 0.06,
                updated_at: None,
            },
            current_timestamp(),
        );
        let regulated = regulate(0.5, &old, &new);

        assert_eq!(regulated.glicko.rating, 1520.0);
        assert_eq!(regulated.glicko.deviation, 115.0);
        assert_eq!(regulated.games, new.games);
        assert_eq!(regulated.recent[0], 20);
    }

    #[test]
    fn test_mock_provider_counts_fetches() {
        let provider = MockRegulationProvider::new();
        assert_eq!(provider.fetch_count(), 0);
        let _ = provider.factors();
        let _ = provider.factors();
        assert_eq!(provider.fetch_count(), 2);

        provider.set_factors(RegulationFactors::uniform(0.5));
        assert_eq!(provider.factors().factor(PerfCategory::Blitz), 0.5);
    }
}
