//! Configuration management for the rating engine
//!
//! This module handles configuration loading from environment variables,
//! validation, and default values.

pub mod engine;

// Re-export commonly used types
pub use engine::EngineSettings;
