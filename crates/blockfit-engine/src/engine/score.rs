use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("score table must have at least one entry")]
pub struct ScoreTableError;

/// Points awarded per clear event, indexed by lines cleared minus one.
///
/// Clears larger than the table reuse its last entry. Default table:
///
/// | lines | points |
/// |-------|--------|
/// | 1     | 10     |
/// | 2     | 20     |
/// | 3     | 50     |
/// | 4     | 100    |
/// | 5+    | 200    |
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<usize>", into = "Vec<usize>")]
pub struct ScoreTable {
    points: Vec<usize>,
}

impl ScoreTable {
    pub const DEFAULT_POINTS: [usize; 5] = [10, 20, 50, 100, 200];

    pub fn new(points: Vec<usize>) -> Result<Self, ScoreTableError> {
        if points.is_empty() {
            return Err(ScoreTableError);
        }
        Ok(Self { points })
    }

    /// Points for a single clear event of `lines_cleared` lines.
    ///
    /// Zero lines score nothing.
    #[must_use]
    pub fn points_for(&self, lines_cleared: usize) -> usize {
        if lines_cleared == 0 {
            return 0;
        }
        let index = (lines_cleared - 1).min(self.points.len() - 1);
        self.points[index]
    }

    #[must_use]
    pub fn points(&self) -> &[usize] {
        &self.points
    }
}

impl Default for ScoreTable {
    fn default() -> Self {
        Self {
            points: Self::DEFAULT_POINTS.to_vec(),
        }
    }
}

impl TryFrom<Vec<usize>> for ScoreTable {
    type Error = ScoreTableError;

    fn try_from(points: Vec<usize>) -> Result<Self, Self::Error> {
        Self::new(points)
    }
}

impl From<ScoreTable> for Vec<usize> {
    fn from(table: ScoreTable) -> Self {
        table.points
    }
}

/// A previously persisted best score.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HighScoreEntry {
    pub player_name: String,
    pub score: usize,
}

/// Snapshot handed to the high-score storage collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreReport {
    /// Running score of the current game.
    pub score: usize,
    /// Whether this game beat the high score the session was seeded with.
    pub achieved: bool,
}

/// Running score and high score.
///
/// # Example
///
/// ```
/// use blockfit_engine::{ScoreKeeper, ScoreTable};
///
/// let mut score = ScoreKeeper::new(ScoreTable::default(), None);
/// score.add_score(1);
/// score.add_score(7); // beyond the table, uses its last entry
///
/// assert_eq!(score.score(), 210);
/// assert_eq!(score.high_score(), 210);
/// ```
#[derive(Debug, Clone)]
pub struct ScoreKeeper {
    table: ScoreTable,
    score: usize,
    high_score: usize,
    seeded_high_score: Option<HighScoreEntry>,
}

impl ScoreKeeper {
    #[must_use]
    pub fn new(table: ScoreTable, seeded_high_score: Option<HighScoreEntry>) -> Self {
        let high_score = seeded_high_score.as_ref().map_or(0, |entry| entry.score);
        Self {
            table,
            score: 0,
            high_score,
            seeded_high_score,
        }
    }

    #[must_use]
    pub const fn score(&self) -> usize {
        self.score
    }

    #[must_use]
    pub const fn high_score(&self) -> usize {
        self.high_score
    }

    #[must_use]
    pub fn table(&self) -> &ScoreTable {
        &self.table
    }

    /// The entry the session was seeded with, if any.
    #[must_use]
    pub fn seeded_high_score(&self) -> Option<&HighScoreEntry> {
        self.seeded_high_score.as_ref()
    }

    /// Adds points for one clear event and returns the points awarded.
    ///
    /// A clear of zero lines is a no-op. The high score follows the running
    /// score whenever it is exceeded.
    pub fn add_score(&mut self, lines_cleared: usize) -> usize {
        if lines_cleared == 0 {
            return 0;
        }
        let points = self.table.points_for(lines_cleared);
        self.score += points;
        if self.score > self.high_score {
            self.high_score = self.score;
        }
        points
    }

    #[must_use]
    pub fn report(&self) -> ScoreReport {
        let seeded = self.seeded_high_score.as_ref().map_or(0, |entry| entry.score);
        ScoreReport {
            score: self.score,
            achieved: self.score > seeded,
        }
    }

    /// Starts a new game: the running score drops to zero, the high score stays.
    ///
    /// `seeded_high_score` replaces the comparison baseline, typically with
    /// the entry the storage collaborator just persisted.
    pub fn reset(&mut self, seeded_high_score: Option<HighScoreEntry>) {
        if let Some(entry) = &seeded_high_score {
            self.high_score = self.high_score.max(entry.score);
        }
        if seeded_high_score.is_some() {
            self.seeded_high_score = seeded_high_score;
        }
        self.score = 0;
    }
}
