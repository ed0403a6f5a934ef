//! Rating update pipeline
//!
//! Orchestrates one rating update for a finished two-player contest: checks
//! eligibility, selects the category, runs the Glicko-2 calculator, applies
//! bot dampening and regulation, refreshes the derived standard aggregate,
//! and reports the headline rating diffs.

use crate::farming::FarmingDetector;
use crate::rating::category::PerfCategory;
use crate::rating::glicko2::Glicko2Calculator;
use crate::rating::perf::{Perf, PerfSet};
use crate::regulation::{regulate, RegulationProvider};
use crate::types::{Game, Participant, RatingDiff};
use std::sync::Arc;
use tracing::{debug, warn};

/// Outcome of one eligible rating update
#[derive(Debug, Clone)]
pub struct RatingUpdate {
    pub white_perfs: PerfSet,
    pub black_perfs: PerfSet,
    pub white_diff: RatingDiff,
    pub black_diff: RatingDiff,
}

/// Halve the effective change of `new` relative to `old`.
///
/// Applied to the human side of a human-vs-bot pairing: the resulting record
/// carries the arithmetic average of the old and new rating, deviation, and
/// volatility, with bookkeeping rebuilt against `old`.
pub fn dampen(old: &Perf, new: &Perf) -> Perf {
    let Some(at) = new.latest.or(old.latest) else {
        return new.clone();
    };
    old.add(old.glicko.interpolate(&new.glicko, 0.5), at)
}

/// The rating update engine's entry point
///
/// Holds the shared calculator and the external farming and regulation seams;
/// immutable after construction and safe to share across concurrent callers.
pub struct UpdatePipeline {
    calculator: Arc<Glicko2Calculator>,
    farming: Arc<dyn FarmingDetector>,
    regulation: Arc<dyn RegulationProvider>,
}

impl UpdatePipeline {
    pub fn new(
        calculator: Arc<Glicko2Calculator>,
        farming: Arc<dyn FarmingDetector>,
        regulation: Arc<dyn RegulationProvider>,
    ) -> Self {
        Self {
            calculator,
            farming,
            regulation,
        }
    }

    /// Compute updated performance records and rating diffs for one contest.
    ///
    /// Returns `None` without touching anything when the contest is not
    /// eligible or maps to no rating category. A calculation failure is
    /// contained: the affected category stays at its prior values for both
    /// participants and the pipeline still completes.
    pub async fn process(
        &self,
        game: &Game,
        white: &Participant,
        black: &Participant,
    ) -> Option<RatingUpdate> {
        if !game.rated || !game.finished || !game.accountable {
            debug!(game = %game.id, "skipping non-rateable game");
            return None;
        }

        if white.lame || black.lame {
            debug!(game = %game.id, "skipping game with flagged participant");
            return None;
        }

        // The only suspension point; must settle before any computation
        if self.farming.is_farmed(game).await {
            debug!(game = %game.id, "skipping bot-farmed game");
            return None;
        }

        let category = PerfCategory::select(game.variant, game.speed)?;

        let white_old = white.perfs.perf(category).clone();
        let black_old = black.perfs.perf(category).clone();

        let mut white_perfs = white.perfs.clone();
        let mut black_perfs = black.perfs.clone();

        match self
            .calculator
            .update(&white_old.glicko, &black_old.glicko, game.result())
        {
            Ok((white_new, black_new)) => {
                let factor = self.regulation.factors().factor(category);

                let white_raw = white_old.add(white_new, game.played_at);
                let black_raw = black_old.add(black_new, game.played_at);

                let white_next = if !white.bot && black.bot {
                    dampen(&white_old, &white_raw)
                } else {
                    white_raw
                };
                let black_next = if !black.bot && white.bot {
                    dampen(&black_old, &black_raw)
                } else {
                    black_raw
                };

                white_perfs.set_perf(category, regulate(factor, &white_old, &white_next));
                black_perfs.set_perf(category, regulate(factor, &black_old, &black_next));

                if category.is_standard_speed() {
                    white_perfs.update_standard();
                    black_perfs.update_standard();
                }
            }
            Err(error) => {
                warn!(
                    game = %game.id,
                    category = %category,
                    %error,
                    "rating calculation failed, leaving category unchanged"
                );
            }
        }

        let white_diff = rating_diff(&white.perfs, &white_perfs, game.main_category);
        let black_diff = rating_diff(&black.perfs, &black_perfs, game.main_category);

        Some(RatingUpdate {
            white_perfs,
            black_perfs,
            white_diff,
            black_diff,
        })
    }
}

fn rating_diff(before: &PerfSet, after: &PerfSet, category: PerfCategory) -> RatingDiff {
    after.perf(category).glicko.int_rating() - before.perf(category).glicko.int_rating()
}
