//! Rating Engine - Glicko-2 rating updates for rated games
//!
//! This crate computes posterior skill ratings for both participants of a
//! finished two-player contest across variant and speed-tier categories,
//! with bot dampening, pluggable swing regulation, and an eligibility gate.

pub mod config;
pub mod error;
pub mod farming;
pub mod pipeline;
pub mod rating;
pub mod regulation;
pub mod types;
pub mod utils;

// Re-export commonly used types and traits
pub use error::{RatingError, Result};
pub use types::*;

// Re-export key components
pub use farming::FarmingDetector;
pub use pipeline::{RatingUpdate, UpdatePipeline};
pub use rating::{Glicko2Calculator, Glicko2Config, Perf, PerfCategory, PerfSet, Rating};
pub use regulation::{RegulationFactors, RegulationProvider};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
