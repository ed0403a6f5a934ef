//! Common types used throughout the rating engine

use crate::rating::category::PerfCategory;
pub use crate::rating::perf::PerfSet;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for players and bots
pub type PlayerId = String;

/// Unique identifier for games
pub type GameId = Uuid;

/// Signed change of a participant's main-category integer rating
pub type RatingDiff = i32;

/// Seat color; White is always the "first" participant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    White,
    Black,
}

impl Color {
    pub fn opposite(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Color::White => write!(f, "white"),
            Color::Black => write!(f, "black"),
        }
    }
}

/// Game variant played in a contest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Variant {
    Standard,
    Crazyhouse,
    Chess960,
    KingOfTheHill,
    ThreeCheck,
    Antichess,
    Atomic,
    Horde,
}

/// Speed tier derived from a game's time control
///
/// A standard-variant game whose time control resolves to none of these tiers
/// carries no speed and is not rated in any category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Speed {
    UltraBullet,
    Bullet,
    Blitz,
    Rapid,
    Classical,
    Correspondence,
}

/// Game outcome expressed relative to the first (white) participant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    Win,
    Loss,
    Draw,
}

impl GameResult {
    /// Encode a raw winner color into a result relative to white
    pub fn from_winner(winner: Option<Color>) -> GameResult {
        match winner {
            Some(Color::White) => GameResult::Win,
            Some(Color::Black) => GameResult::Loss,
            None => GameResult::Draw,
        }
    }

    /// The same outcome seen from the opponent's side
    pub fn invert(self) -> GameResult {
        match self {
            GameResult::Win => GameResult::Loss,
            GameResult::Loss => GameResult::Win,
            GameResult::Draw => GameResult::Draw,
        }
    }

    /// Actual score used by the rating equations
    pub fn score(self) -> f64 {
        match self {
            GameResult::Win => 1.0,
            GameResult::Draw => 0.5,
            GameResult::Loss => 0.0,
        }
    }
}

/// Descriptor of a finished contest, as handed to the update pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Game {
    /// Identifier used only for logging
    pub id: GameId,
    pub variant: Variant,
    /// None when the time control maps to no recognized tier
    pub speed: Option<Speed>,
    /// None means the game was drawn
    pub winner: Option<Color>,
    pub rated: bool,
    pub finished: bool,
    /// False for aborted or otherwise degenerate contests
    pub accountable: bool,
    pub played_at: DateTime<Utc>,
    /// Category whose rating change is reported as the headline diff,
    /// determined per contest type by the caller
    pub main_category: PerfCategory,
}

impl Game {
    /// Result of this game relative to the white seat
    pub fn result(&self) -> GameResult {
        GameResult::from_winner(self.winner)
    }
}

/// Participant descriptor with the full per-category performance record set
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Participant {
    pub id: PlayerId,
    /// Automated-player flag
    pub bot: bool,
    /// Fair-play-violation flag; excludes the participant from rating updates
    pub lame: bool,
    pub perfs: PerfSet,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_encoding() {
        assert_eq!(GameResult::from_winner(Some(Color::White)), GameResult::Win);
        assert_eq!(GameResult::from_winner(Some(Color::Black)), GameResult::Loss);
        assert_eq!(GameResult::from_winner(None), GameResult::Draw);
    }

    #[test]
    fn test_result_inversion_is_involution() {
        for result in [GameResult::Win, GameResult::Loss, GameResult::Draw] {
            assert_eq!(result.invert().invert(), result);
            assert_eq!(result.score() + result.invert().score(), 1.0);
        }
    }

    #[test]
    fn test_color_opposite() {
        assert_eq!(Color::White.opposite(), Color::Black);
        assert_eq!(Color::Black.opposite(), Color::White);
    }
}
