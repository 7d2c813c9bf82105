use blockfit_engine::SpawnSeed;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Strategy used to pick placements in automated games
#[derive(
    Default, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, derive_more::FromStr,
)]
#[serde(rename_all = "snake_case")]
pub enum Placer {
    /// First staged block at its first legal origin in row-major order
    #[default]
    First,
    /// Uniformly random legal (block, origin) pair
    Random,
}

/// Result of a batch of automated games
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationSummary {
    /// Timestamp when the simulation finished (ISO 8601 format)
    pub simulated_at: DateTime<Utc>,
    pub placer: Placer,
    pub grid_width: usize,
    pub grid_height: usize,
    pub games: Vec<GameSummary>,
    pub mean_score: f64,
    pub max_score: usize,
}

/// Outcome of one automated game
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameSummary {
    /// Spawn seed the game was played with
    pub seed: SpawnSeed,
    pub score: usize,
    pub blocks_placed: usize,
    pub lines_cleared: usize,
    pub batches_spawned: usize,
    /// Whether the game stopped at the placement limit instead of game over
    pub truncated: bool,
}

impl SimulationSummary {
    pub fn new(
        placer: Placer,
        grid_width: usize,
        grid_height: usize,
        games: Vec<GameSummary>,
    ) -> Self {
        let max_score = games.iter().map(|g| g.score).max().unwrap_or(0);
        #[expect(clippy::cast_precision_loss)]
        let mean_score = if games.is_empty() {
            0.0
        } else {
            games.iter().map(|g| g.score as f64).sum::<f64>() / games.len() as f64
        };
        Self {
            simulated_at: Utc::now(),
            placer,
            grid_width,
            grid_height,
            games,
            mean_score,
            max_score,
        }
    }
}
