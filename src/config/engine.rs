//! Engine configuration
//!
//! Settings for the Glicko-2 calculator and the default regulation posture,
//! loadable from environment variables with fallback to defaults.

use crate::rating::glicko2::Glicko2Config;
use crate::regulation::{RegulationFactors, StaticRegulationProvider};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::env;

/// Top-level engine settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineSettings {
    /// Fixed Glicko-2 parameters
    pub glicko: Glicko2Config,
    /// Factor applied to every regulable category unless overridden
    pub default_regulation_factor: f64,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            glicko: Glicko2Config::default(),
            default_regulation_factor: 1.0,
        }
    }
}

impl EngineSettings {
    /// Load settings from environment variables with fallback to defaults
    pub fn from_env() -> Result<Self> {
        let mut settings = Self::default();

        if let Ok(tau) = env::var("RATING_TAU") {
            settings.glicko.tau = tau.parse()?;
        }
        if let Ok(tolerance) = env::var("RATING_CONVERGENCE_TOLERANCE") {
            settings.glicko.convergence_tolerance = tolerance.parse()?;
        }
        if let Ok(iterations) = env::var("RATING_MAX_ITERATIONS") {
            settings.glicko.max_iterations = iterations.parse()?;
        }
        if let Ok(min_rating) = env::var("RATING_MIN") {
            settings.glicko.min_rating = min_rating.parse()?;
        }
        if let Ok(max_rating) = env::var("RATING_MAX") {
            settings.glicko.max_rating = max_rating.parse()?;
        }
        if let Ok(factor) = env::var("RATING_REGULATION_FACTOR") {
            settings.default_regulation_factor = factor.parse()?;
        }

        settings.validate()?;
        Ok(settings)
    }

    /// Validate all settings
    pub fn validate(&self) -> Result<()> {
        self.glicko.validate()?;

        if !(0.0..=1.0).contains(&self.default_regulation_factor) {
            return Err(crate::error::RatingError::ConfigurationError {
                message: "regulation factor must be within [0, 1]".to_string(),
            }
            .into());
        }

        Ok(())
    }

    /// Regulation provider reflecting the configured default factor
    pub fn regulation_provider(&self) -> StaticRegulationProvider {
        StaticRegulationProvider::new(RegulationFactors::uniform(self.default_regulation_factor))
    }
}
