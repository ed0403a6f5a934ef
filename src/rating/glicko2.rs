//! Glicko-2 rating calculator
//!
//! This module implements the Glicko-2 update equations for a one-game rating
//! period: scale conversion, expected outcome, estimated variance, rating
//! improvement, the iterative volatility solve, and the posterior rating and
//! deviation. The joint two-seat update always feeds each side the opponent's
//! pre-update values.

use crate::error::RatingError;
use crate::rating::perf::Rating;
use crate::types::GameResult;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Rating given to new players
pub const DEFAULT_RATING: f64 = 1500.0;

/// Deviation given to new players
pub const DEFAULT_DEVIATION: f64 = 500.0;

/// Volatility given to new players
pub const DEFAULT_VOLATILITY: f64 = 0.09;

/// Linear factor between the display scale and the internal Glicko-2 scale
const GLICKO2_SCALE: f64 = 173.7178;

/// Fixed parameters of the Glicko-2 system
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Glicko2Config {
    /// Convergence constant constraining volatility change over time
    pub tau: f64,
    /// Absolute tolerance for the volatility root find
    pub convergence_tolerance: f64,
    /// Iteration bound for the volatility root find
    pub max_iterations: u32,
    /// Lower clamp for posterior ratings
    pub min_rating: f64,
    /// Upper clamp for posterior ratings
    pub max_rating: f64,
    /// Upper clamp for posterior deviations
    pub max_deviation: f64,
}

impl Default for Glicko2Config {
    fn default() -> Self {
        Self {
            tau: 0.75,
            convergence_tolerance: 1e-6,
            max_iterations: 100,
            min_rating: 400.0,
            max_rating: 4000.0,
            max_deviation: DEFAULT_DEVIATION,
        }
    }
}

impl Glicko2Config {
    /// Validate configuration parameters
    pub fn validate(&self) -> crate::error::Result<()> {
        if self.tau <= 0.0 {
            return Err(RatingError::ConfigurationError {
                message: "tau must be positive".to_string(),
            }
            .into());
        }

        if self.convergence_tolerance <= 0.0 {
            return Err(RatingError::ConfigurationError {
                message: "convergence tolerance must be positive".to_string(),
            }
            .into());
        }

        if self.max_iterations == 0 {
            return Err(RatingError::ConfigurationError {
                message: "iteration bound must be positive".to_string(),
            }
            .into());
        }

        if self.min_rating >= self.max_rating {
            return Err(RatingError::ConfigurationError {
                message: "rating bounds must be ordered".to_string(),
            }
            .into());
        }

        if self.max_deviation <= 0.0 {
            return Err(RatingError::ConfigurationError {
                message: "deviation bound must be positive".to_string(),
            }
            .into());
        }

        Ok(())
    }
}

/// Glicko-2 rating calculator with immutable parameters
///
/// Construct once and share freely; all operations are pure.
#[derive(Debug, Clone)]
pub struct Glicko2Calculator {
    config: Glicko2Config,
}

impl Glicko2Calculator {
    /// Create a new calculator, validating the configuration
    pub fn new(config: Glicko2Config) -> crate::error::Result<Self> {
        config.validate()?;

        Ok(Self { config })
    }

    pub fn config(&self) -> &Glicko2Config {
        &self.config
    }

    /// Jointly update both seats of a finished game.
    ///
    /// `result` is relative to `first`. Each posterior is computed against the
    /// opponent's pre-update rating, never a partially updated value. On
    /// failure neither rating is usable and the caller keeps both priors.
    pub fn update(
        &self,
        first: &Rating,
        second: &Rating,
        result: GameResult,
    ) -> crate::error::Result<(Rating, Rating)> {
        let new_first = self.rate_period(first, &[(second.clone(), result.score())])?;
        let new_second = self.rate_period(second, &[(first.clone(), result.invert().score())])?;
        Ok((new_first, new_second))
    }

    /// Apply one Glicko-2 rating period over a set of (opponent, score) games.
    ///
    /// Scores are 1.0 / 0.5 / 0.0 from the rated player's perspective. An
    /// empty set leaves the rating unchanged; deviation decay for inactivity
    /// is a caller concern.
    pub fn rate_period(
        &self,
        rating: &Rating,
        games: &[(Rating, f64)],
    ) -> crate::error::Result<Rating> {
        validate_input(rating)?;
        for (opponent, _) in games {
            validate_input(opponent)?;
        }

        if games.is_empty() {
            return Ok(rating.clone());
        }

        let mu = to_internal_rating(rating.rating);
        let phi = to_internal_deviation(rating.deviation);

        // Estimated variance and improvement sum over the period
        let mut variance_inv = 0.0;
        let mut improvement_sum = 0.0;
        for (opponent, score) in games {
            let g = spread(to_internal_deviation(opponent.deviation));
            let e = expectation(mu, to_internal_rating(opponent.rating), g);
            variance_inv += g * g * e * (1.0 - e);
            improvement_sum += g * (score - e);
        }

        if !variance_inv.is_finite() || variance_inv <= 0.0 {
            return Err(RatingError::CalculationFailed {
                reason: format!("estimated variance degenerate ({variance_inv})"),
            }
            .into());
        }

        let variance = variance_inv.recip();
        let improvement = variance * improvement_sum;

        let volatility = self.solve_volatility(phi, variance, improvement, rating.volatility)?;

        let phi_pre = (phi * phi + volatility * volatility).sqrt();
        let phi_new = (phi_pre.powi(-2) + variance_inv).sqrt().recip();
        let mu_new = mu + phi_new * phi_new * improvement_sum;

        let updated = Rating {
            rating: from_internal_rating(mu_new)
                .clamp(self.config.min_rating, self.config.max_rating),
            deviation: from_internal_deviation(phi_new).min(self.config.max_deviation),
            volatility,
            updated_at: rating.updated_at,
        };

        if !updated.rating.is_finite() || !updated.deviation.is_finite() {
            return Err(RatingError::CalculationFailed {
                reason: "posterior rating is not finite".to_string(),
            }
            .into());
        }

        Ok(updated)
    }

    /// Expected score of `first` against `second`, from the update equations
    pub fn expected_score(&self, first: &Rating, second: &Rating) -> f64 {
        let g = spread(to_internal_deviation(second.deviation));
        expectation(
            to_internal_rating(first.rating),
            to_internal_rating(second.rating),
            g,
        )
    }

    /// Solve the Glicko-2 volatility equation with a bounded Illinois-style
    /// root find over ln(sigma^2).
    fn solve_volatility(
        &self,
        phi: f64,
        variance: f64,
        improvement: f64,
        volatility: f64,
    ) -> crate::error::Result<f64> {
        let tau = self.config.tau;
        let anchor = (volatility * volatility).ln();
        let improvement_sq = improvement * improvement;
        let phi_sq = phi * phi;

        let f = |x: f64| {
            let ex = x.exp();
            ex * (improvement_sq - phi_sq - variance - ex)
                / (2.0 * (phi_sq + variance + ex).powi(2))
                - (x - anchor) / (tau * tau)
        };

        let mut lower = anchor;
        let mut upper = if improvement_sq > phi_sq + variance {
            (improvement_sq - phi_sq - variance).ln()
        } else {
            let mut k = 1.0;
            while f(anchor - k * tau) < 0.0 {
                k += 1.0;
                if k > self.config.max_iterations as f64 {
                    return Err(RatingError::CalculationFailed {
                        reason: "volatility bracket search exhausted".to_string(),
                    }
                    .into());
                }
            }
            anchor - k * tau
        };

        let mut f_lower = f(lower);
        let mut f_upper = f(upper);
        let mut iterations = 0u32;
        while (upper - lower).abs() > self.config.convergence_tolerance {
            iterations += 1;
            if iterations > self.config.max_iterations {
                return Err(RatingError::CalculationFailed {
                    reason: format!(
                        "volatility solve did not converge within {} iterations",
                        self.config.max_iterations
                    ),
                }
                .into());
            }

            let candidate = lower + (lower - upper) * f_lower / (f_upper - f_lower);
            let f_candidate = f(candidate);
            if f_candidate * f_upper <= 0.0 {
                lower = upper;
                f_lower = f_upper;
            } else {
                // Illinois step: halve the retained side to keep convergence
                f_lower /= 2.0;
            }
            upper = candidate;
            f_upper = f_candidate;
        }

        let solved = (lower / 2.0).exp();
        if !solved.is_finite() || solved <= 0.0 {
            return Err(RatingError::CalculationFailed {
                reason: format!("volatility solve produced {solved}"),
            }
            .into());
        }

        Ok(solved)
    }
}

/// Reject degenerate inputs before they poison the equations
fn validate_input(rating: &Rating) -> crate::error::Result<()> {
    if !rating.rating.is_finite()
        || !rating.deviation.is_finite()
        || rating.deviation <= 0.0
        || !rating.volatility.is_finite()
        || rating.volatility <= 0.0
    {
        return Err(RatingError::CalculationFailed {
            reason: format!(
                "degenerate rating input (rating {}, deviation {}, volatility {})",
                rating.rating, rating.deviation, rating.volatility
            ),
        }
        .into());
    }
    Ok(())
}

fn to_internal_rating(rating: f64) -> f64 {
    (rating - 1500.0) / GLICKO2_SCALE
}

fn from_internal_rating(mu: f64) -> f64 {
    mu * GLICKO2_SCALE + 1500.0
}

fn to_internal_deviation(deviation: f64) -> f64 {
    deviation / GLICKO2_SCALE
}

fn from_internal_deviation(phi: f64) -> f64 {
    phi * GLICKO2_SCALE
}

/// g(phi): weight of a game by the opponent's rating uncertainty
fn spread(phi: f64) -> f64 {
    (1.0 + 3.0 * phi * phi / (PI * PI)).sqrt().recip()
}

/// E(mu, mu_j, g): expected score against one opponent
fn expectation(mu: f64, opponent_mu: f64, g: f64) -> f64 {
    (1.0 + (-g * (mu - opponent_mu)).exp()).recip()
}
