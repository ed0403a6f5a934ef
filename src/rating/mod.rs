//! Glicko-2 rating system: categories, performance records, and the calculator
//!
//! This module provides the category selector, the per-category performance
//! records, and the Glicko-2 update equations used by the pipeline.

pub mod category;
pub mod glicko2;
pub mod perf;

// Re-export commonly used types
pub use category::PerfCategory;
pub use glicko2::{Glicko2Calculator, Glicko2Config};
pub use perf::{Perf, PerfSet, Rating};
