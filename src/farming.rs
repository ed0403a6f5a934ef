//! Bot-farming detection seam
//!
//! The pipeline consults an external asynchronous predicate before rating a
//! contest. Detection itself lives outside this crate; implementations that
//! can fail must pick their own fallback and return a plain verdict.

use crate::types::Game;
use async_trait::async_trait;
use std::sync::Mutex;

/// Asynchronous predicate marking a contest as bot-farmed
#[async_trait]
pub trait FarmingDetector: Send + Sync {
    /// True if the contest should not be rated because it was farmed
    async fn is_farmed(&self, game: &Game) -> bool;
}

/// Detector that never flags anything; the default for trusted pools
#[derive(Debug, Clone, Default)]
pub struct NoFarmingDetector;

#[async_trait]
impl FarmingDetector for NoFarmingDetector {
    async fn is_farmed(&self, _game: &Game) -> bool {
        false
    }
}

/// Mock detector for testing; verdict is fixed and checked games are recorded
#[derive(Debug, Default)]
pub struct MockFarmingDetector {
    verdict: bool,
    checked: Mutex<Vec<crate::types::GameId>>,
}

impl MockFarmingDetector {
    pub fn new(verdict: bool) -> Self {
        Self {
            verdict,
            checked: Mutex::new(Vec::new()),
        }
    }

    /// Ids of the games this detector was asked about (for testing)
    pub fn checked_games(&self) -> Vec<crate::types::GameId> {
        self.checked
            .lock()
            .map(|checked| checked.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl FarmingDetector for MockFarmingDetector {
    async fn is_farmed(&self, game: &Game) -> bool {
        if let Ok(mut checked) = self.checked.lock() {
            checked.push(game.id);
        }
        self.verdict
    }
}
