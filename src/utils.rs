//! Utility functions for the rating engine

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Generate a new unique game ID
pub fn generate_game_id() -> Uuid {
    Uuid::new_v4()
}

/// Get the current UTC timestamp
pub fn current_timestamp() -> DateTime<Utc> {
    Utc::now()
}
