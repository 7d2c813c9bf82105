use serde::{Deserialize, Serialize};

use crate::core::{Board, BoardSizeError, ShapeCatalog};

use super::score::ScoreTable;

/// Upper bound on spawn points per batch.
pub const MAX_SPAWN_POINTS: usize = 8;

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum SettingsError {
    #[display("invalid board size: {source}")]
    BoardSize { source: BoardSizeError },
    #[display("spawn points must be between 1 and {}, got {count}", MAX_SPAWN_POINTS)]
    SpawnPoints { count: usize },
}

/// Session configuration.
///
/// Every field has a default, so a settings file only needs to name what it
/// changes. The score table and shape catalog validate themselves while
/// being deserialized; [`validate`](Self::validate) covers the rest.
///
/// ```
/// use blockfit_engine::GameSettings;
///
/// let settings: GameSettings = serde_json::from_str(r#"{"grid_width": 8}"#).unwrap();
/// assert_eq!((settings.grid_width, settings.grid_height), (8, 9));
/// assert!(settings.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameSettings {
    pub grid_width: usize,
    pub grid_height: usize,
    pub score_per_line_cleared: ScoreTable,
    /// Blocks drawn per spawn batch.
    pub spawn_points: usize,
    /// Turn each spawned block by a random multiple of 90°.
    pub rotate_spawned_blocks: bool,
    pub shapes: ShapeCatalog,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            grid_width: 9,
            grid_height: 9,
            score_per_line_cleared: ScoreTable::default(),
            spawn_points: 3,
            rotate_spawned_blocks: true,
            shapes: ShapeCatalog::standard(),
        }
    }
}

impl GameSettings {
    pub fn validate(&self) -> Result<(), SettingsError> {
        self.new_board()?;
        if !(1..=MAX_SPAWN_POINTS).contains(&self.spawn_points) {
            return Err(SettingsError::SpawnPoints {
                count: self.spawn_points,
            });
        }
        Ok(())
    }

    pub(crate) fn new_board(&self) -> Result<Board, SettingsError> {
        Board::new(self.grid_width, self.grid_height)
            .map_err(|source| SettingsError::BoardSize { source })
    }
}
