use std::path::Path;

use blockfit_engine::HighScoreEntry;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::util::{self, Output};

/// Persisted best score
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScoreRecord {
    /// Name the player entered for the session
    pub player_name: String,
    pub score: usize,
    /// Timestamp when the score was recorded (ISO 8601 format)
    pub recorded_at: DateTime<Utc>,
}

impl HighScoreRecord {
    pub fn new(player_name: &str, score: usize) -> Self {
        Self {
            player_name: player_name.to_owned(),
            score,
            recorded_at: Utc::now(),
        }
    }

    /// Load the high score file
    ///
    /// A missing file means no high score has been recorded yet.
    pub fn load(path: &Path) -> anyhow::Result<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }
        util::read_json_file("high score", path).map(Some)
    }

    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        Output::open(path.to_owned())?.write_json(self)
    }

    /// The entry that seeds the engine's high score
    pub fn entry(&self) -> HighScoreEntry {
        HighScoreEntry {
            player_name: self.player_name.clone(),
            score: self.score,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;
    use crate::util::temp_path;

    #[test]
    fn test_missing_file_is_no_high_score() {
        let path = temp_path("missing-high-score.json");
        assert_eq!(HighScoreRecord::load(&path).unwrap(), None);
    }

    #[test]
    fn test_save_and_load() {
        let path = temp_path("high-score.json");
        let record = HighScoreRecord::new("ada", 120);
        record.save(&path).unwrap();

        let loaded = HighScoreRecord::load(&path).unwrap().unwrap();
        assert_eq!(loaded, record);
        assert_eq!(
            loaded.entry(),
            HighScoreEntry {
                player_name: "ada".to_owned(),
                score: 120,
            }
        );
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let path = temp_path("corrupt-high-score.json");
        fs::write(&path, "{\"score\": ").unwrap();
        assert!(HighScoreRecord::load(&path).is_err());
        fs::remove_file(&path).unwrap();
    }
}
